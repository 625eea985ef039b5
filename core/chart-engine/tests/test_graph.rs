//! FILENAME: tests/test_graph.rs
//! Integration tests for the graph builder.

mod common;

use binding::{BindingError, Cell, DataBinding, IdentityPolicy, MissingFieldPolicy, Row};
use chart_engine::{
    build_graph, CategoryMode, ChartDefinition, ChartError, ChartKind, GraphModel, GraphOptions,
    RoleOrder,
};
use common::{member, BindingFixture, NetworkFixture};
use std::collections::BTreeSet;

fn graph_definition() -> ChartDefinition {
    ChartDefinition::new(ChartKind::Graph)
}

fn build(binding: &DataBinding, definition: &ChartDefinition) -> GraphModel {
    build_graph(&binding.data, &binding.metadata.normalize(), definition).unwrap()
}

fn node_names(model: &GraphModel) -> BTreeSet<String> {
    model.nodes.iter().filter_map(|n| n.name.clone()).collect()
}

// ============================================================================
// NODES AND EDGES
// ============================================================================

#[test]
fn test_one_node_per_distinct_label() {
    let model = build(&NetworkFixture::binding(), &graph_definition());

    assert_eq!(model.nodes.len(), 3);
    let expected: BTreeSet<String> =
        ["Alice", "Bob", "Carol"].iter().map(|s| s.to_string()).collect();
    assert_eq!(node_names(&model), expected);
}

#[test]
fn test_edge_count_equals_row_count() {
    let binding = NetworkFixture::binding();
    let model = build(&binding, &graph_definition());

    assert_eq!(model.links.len(), binding.data.len());
    // Alice -> Bob appears twice and stays unmerged.
    let parallel = model
        .links
        .iter()
        .filter(|l| l.source.as_deref() == Some("Alice") && l.target.as_deref() == Some("Bob"))
        .count();
    assert_eq!(parallel, 2);
}

#[test]
fn test_dedup_is_idempotent() {
    let binding = NetworkFixture::binding();
    let first = build(&binding, &graph_definition());
    let second = build(&binding, &graph_definition());

    assert_eq!(node_names(&first), node_names(&second));
    assert_eq!(first, second);
}

#[test]
fn test_label_identity_collapses_shared_labels() {
    let binding = BindingFixture::new(&["from", "to"], &["v"])
        .row(
            Row::new()
                .with("from", Cell::member("Springfield", "US_IL"))
                .with("to", Cell::member("Chicago", "US_CHI"))
                .with("v", Cell::measure(1.0)),
        )
        .row(
            Row::new()
                .with("from", Cell::member("Springfield", "US_MA"))
                .with("to", Cell::member("Boston", "US_BOS"))
                .with("v", Cell::measure(1.0)),
        )
        .build();

    let by_label = build(&binding, &graph_definition());
    assert_eq!(by_label.nodes.len(), 3);

    let by_id = build(
        &binding,
        &graph_definition().with_identity(IdentityPolicy::Id),
    );
    assert_eq!(by_id.nodes.len(), 4);
}

// ============================================================================
// CATEGORIES
// ============================================================================

#[test]
fn test_categories_sorted_and_deduplicated() {
    let binding = BindingFixture::new(&["from", "to", "cat"], &["v"])
        .row(
            Row::new()
                .with("from", member("n1"))
                .with("to", member("n2"))
                .with("cat", member("b"))
                .with("v", Cell::measure(1.0)),
        )
        .row(
            Row::new()
                .with("from", member("n3"))
                .with("to", member("n4"))
                .with("cat", member("a"))
                .with("v", Cell::measure(1.0)),
        )
        .row(
            Row::new()
                .with("from", member("n5"))
                .with("to", member("n6"))
                .with("cat", member("c"))
                .with("v", Cell::measure(1.0)),
        )
        .row(
            Row::new()
                .with("from", member("n1"))
                .with("to", member("n6"))
                .with("cat", member("a"))
                .with("v", Cell::measure(1.0)),
        )
        .build();

    let model = build(&binding, &graph_definition());
    let names: Vec<&str> = model.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_network_categories() {
    let model = build(&NetworkFixture::binding(), &graph_definition());
    let names: Vec<&str> = model.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Engineering", "Finance", "Sales"]);

    // Carol is first introduced as a target of a Sales row.
    assert_eq!(
        model.node("Carol").and_then(|n| n.category.as_deref()),
        Some("Sales")
    );
}

#[test]
fn test_split_categories() {
    let binding = BindingFixture::new(&["to", "from", "from_cat", "to_cat"], &["v"])
        .row(
            Row::new()
                .with("to", member("Warehouse"))
                .with("from", member("Supplier"))
                .with("from_cat", member("External"))
                .with("to_cat", member("Internal"))
                .with("v", Cell::measure(40.0)),
        )
        .build();

    let definition = graph_definition().with_graph(GraphOptions {
        role_order: RoleOrder::TargetSource,
        categories: CategoryMode::Split,
    });
    let model = build(&binding, &definition);

    assert_eq!(model.links[0].source.as_deref(), Some("Supplier"));
    assert_eq!(model.links[0].target.as_deref(), Some("Warehouse"));
    assert_eq!(
        model.node("Supplier").and_then(|n| n.category.as_deref()),
        Some("External")
    );
    assert_eq!(
        model.node("Warehouse").and_then(|n| n.category.as_deref()),
        Some("Internal")
    );
    assert_eq!(model.categories.len(), 2);
}

#[test]
fn test_uncategorized_graph() {
    let binding = BindingFixture::new(&["from", "to"], &["v"])
        .row(
            Row::new()
                .with("from", member("A"))
                .with("to", member("B"))
                .with("v", Cell::measure(2.0)),
        )
        .build();

    let model = build(&binding, &graph_definition());
    assert!(model.categories.is_empty());
    assert!(model.nodes.iter().all(|n| n.category.is_none()));
}

// ============================================================================
// EDGE CASES
// ============================================================================

#[test]
fn test_empty_input() {
    let binding = BindingFixture::new(&["from", "to", "cat"], &["v"]).build();
    let model = build(&binding, &graph_definition());

    assert!(model.nodes.is_empty());
    assert!(model.links.is_empty());
    assert!(model.categories.is_empty());
}

#[test]
fn test_missing_cell_propagates_as_absent() {
    let binding = BindingFixture::new(&["from", "to"], &["v"])
        .row(Row::new().with("from", member("A")).with("v", Cell::measure(1.0)))
        .build();

    let model = build(&binding, &graph_definition());
    assert_eq!(model.links.len(), 1);
    assert_eq!(model.links[0].target, None);
    assert_eq!(model.links[0].value, Some(1.0));
    assert!(model.nodes.iter().any(|n| n.name.is_none()));
}

#[test]
fn test_missing_cell_rejected() {
    let binding = BindingFixture::new(&["from", "to"], &["v"])
        .row(Row::new().with("from", member("A")).with("to", member("B")))
        .build();
    let definition = graph_definition().with_missing_fields(MissingFieldPolicy::Reject);

    let err = build_graph(&binding.data, &binding.metadata.normalize(), &definition).unwrap_err();
    assert!(matches!(
        err,
        ChartError::Binding(BindingError::MissingField { row: 0, .. })
    ));
}

#[test]
fn test_non_finite_measure_rejected() {
    let binding = BindingFixture::new(&["from", "to"], &["v"])
        .row(
            Row::new()
                .with("from", member("A"))
                .with("to", member("B"))
                .with("v", Cell::measure(f64::NAN)),
        )
        .build();

    let err = build_graph(
        &binding.data,
        &binding.metadata.normalize(),
        &graph_definition(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ChartError::Binding(BindingError::InvalidValue { .. })
    ));
}

#[test]
fn test_missing_id_rejected_when_keyed_by_id() {
    let unkeyed = |label: &str| Cell {
        label: Some(label.to_string()),
        ..Cell::default()
    };
    let binding = BindingFixture::new(&["from", "to"], &["v"])
        .row(
            Row::new()
                .with("from", unkeyed("Alpha"))
                .with("to", unkeyed("Beta"))
                .with("v", Cell::measure(1.0)),
        )
        .build();
    let definition = graph_definition()
        .with_identity(IdentityPolicy::Id)
        .with_missing_fields(MissingFieldPolicy::Reject);

    let err = build_graph(&binding.data, &binding.metadata.normalize(), &definition).unwrap_err();
    match err {
        ChartError::Binding(BindingError::MissingField { row, field }) => {
            assert_eq!(row, 0);
            assert_eq!(field, "from.id");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_categories_need_no_id_when_keyed_by_id() {
    let binding = BindingFixture::new(&["from", "to", "cat"], &["v"])
        .row(
            Row::new()
                .with("from", member("A"))
                .with("to", member("B"))
                .with(
                    "cat",
                    Cell {
                        label: Some("Ops".to_string()),
                        ..Cell::default()
                    },
                )
                .with("v", Cell::measure(1.0)),
        )
        .build();
    let definition = graph_definition()
        .with_identity(IdentityPolicy::Id)
        .with_missing_fields(MissingFieldPolicy::Reject);

    let model = build(&binding, &definition);
    assert_eq!(model.nodes.len(), 2);
    assert_eq!(model.categories[0].name, "Ops");
}
