//! FILENAME: core/chart-engine/src/label.rs
//! PURPOSE: Flow labels: magnitude-scaled value plus period-over-period delta.
//! CONTEXT: Pure formatting. `main_text` scales the current value to
//! K/M/B; `delta_text` is the percentage change against the prior value,
//! shown only when that change is non-zero.

use std::fmt;

use binding::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Magnitude brackets, largest first. The first bracket the value exceeds wins.
const MAGNITUDES: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Direction of the period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeltaSign {
    Positive,
    Negative,
    /// No change, or no prior value to compare against.
    #[serde(rename = "none")]
    Flat,
}

/// A formatted flow label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedLabel {
    /// Scaled value, e.g. "1.50K".
    pub main_text: String,
    /// Signed percentage, e.g. "+10.00%". Empty when the sign is `Flat`.
    pub delta_text: String,
    pub delta_sign: DeltaSign,
}

impl fmt::Display for FormattedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.delta_sign {
            DeltaSign::Flat => write!(f, "{}", self.main_text),
            _ => write!(f, "{} {}", self.main_text, self.delta_text),
        }
    }
}

/// Rounds to 2 decimal places. Magnitudes too large to scale carry no
/// fraction and are returned as is.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Formats `current` against its prior-period counterpart.
///
/// A zero or missing prior yields a delta of 0 (no annotation) rather than
/// a division by zero, and so does a change too large to represent.
/// Non-finite input fails with `InvalidValue`.
pub fn format_label(current: f64, prior: Option<f64>) -> Result<FormattedLabel, ChartError> {
    let current = ensure_finite(current, "label value")?;
    let prior = prior
        .map(|p| ensure_finite(p, "label prior value"))
        .transpose()?;

    let delta = match prior {
        Some(p) if p != 0.0 => round2((current - p) * 100.0 / p),
        _ => 0.0,
    };
    let delta = if delta.is_finite() { delta } else { 0.0 };

    let (delta_sign, delta_text) = if delta > 0.0 {
        (DeltaSign::Positive, format!("+{:.2}%", delta))
    } else if delta < 0.0 {
        (DeltaSign::Negative, format!("{:.2}%", delta))
    } else {
        (DeltaSign::Flat, String::new())
    };

    Ok(FormattedLabel {
        main_text: scale(current),
        delta_text,
        delta_sign,
    })
}

fn scale(value: f64) -> String {
    for (threshold, suffix) in MAGNITUDES {
        if value > threshold {
            return format!("{:.2}{}", round2(value / threshold), suffix);
        }
    }
    format!("{:.2}", round2(value))
}
