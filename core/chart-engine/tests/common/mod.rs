//! FILENAME: tests/common/mod.rs
//! Fixtures for chart-engine integration tests.

#![allow(dead_code)]

use binding::{Cell, DataBinding, Descriptor, Metadata, Row};

/// Builds a successful data binding with the given dimension and measure
/// keys (declared in order) and rows.
pub struct BindingFixture {
    metadata: Metadata,
    rows: Vec<Row>,
}

impl BindingFixture {
    pub fn new(dimensions: &[&str], measures: &[&str]) -> Self {
        let mut metadata = Metadata::default();
        for key in dimensions {
            metadata
                .dimensions
                .insert(key.to_string(), Descriptor::new(*key, key.to_uppercase()));
        }
        for key in measures {
            metadata
                .main_structure_members
                .insert(key.to_string(), Descriptor::new(*key, key.to_uppercase()));
        }
        BindingFixture {
            metadata,
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn build(self) -> DataBinding {
        DataBinding::success(self.rows, self.metadata)
    }
}

/// A member cell whose id is derived from its label.
pub fn member(label: &str) -> Cell {
    Cell::member(label, format!("ID_{}", label.to_uppercase()))
}

/// Graph rows: (source, target, category, value).
pub struct NetworkFixture;

impl NetworkFixture {
    pub fn data() -> Vec<(&'static str, &'static str, &'static str, f64)> {
        vec![
            ("Alice", "Bob", "Sales", 12.0),
            ("Alice", "Carol", "Sales", 7.0),
            ("Bob", "Carol", "Finance", 3.0),
            ("Carol", "Alice", "Engineering", 9.0),
            ("Alice", "Bob", "Sales", 4.0),
        ]
    }

    pub fn binding() -> DataBinding {
        let mut fixture = BindingFixture::new(&["from", "to", "team"], &["messages"]);
        for (source, target, category, value) in Self::data() {
            fixture = fixture.row(
                Row::new()
                    .with("from", member(source))
                    .with("to", member(target))
                    .with("team", member(category))
                    .with("messages", Cell::measure(value)),
            );
        }
        fixture.build()
    }
}

/// Sankey rows: (parent, child, current, prior).
pub fn flow_binding(rows: &[(&str, &str, f64, f64)]) -> DataBinding {
    let mut fixture = BindingFixture::new(&["parent", "child"], &["current", "previous"]);
    for (parent, child, current, prior) in rows {
        fixture = fixture.row(
            Row::new()
                .with("parent", member(parent))
                .with("child", member(child))
                .with("current", Cell::measure(*current))
                .with("previous", Cell::measure(*prior)),
        );
    }
    fixture.build()
}
