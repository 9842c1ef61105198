//! Column filter functions registered with the table engine.
//!
//! The engine owns filtering itself; this module supplies the custom
//! predicates the app registers next to the engine's built-in ones, and the
//! auto-remove rules for all of them.

mod fuzzy;
mod numeric;

pub use fuzzy::{fuzzy_rank, fuzzy_text_matches};
pub use numeric::NumericFilter;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which filter function a column uses. Columns that name none get
/// substring matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterFnKind {
    /// Fuzzy text match (custom).
    FuzzyText,
    /// Operator-prefixed numeric comparison (custom).
    Numeric,
    /// Cell is at least the numeric filter value (custom).
    GreaterThan,
    /// Engine built-in: exact equality.
    Equals,
    /// Engine built-in: `[min, max]` range.
    InNumberRange,
    /// Engine built-in: case-insensitive substring.
    #[default]
    IncludesString,
}

impl FilterFnKind {
    /// Whether this crate implements the predicate, rather than the engine.
    pub fn is_custom(self) -> bool {
        matches!(self, Self::FuzzyText | Self::Numeric | Self::GreaterThan)
    }

    /// Evaluate a custom predicate. Returns `None` for engine built-ins.
    pub fn matches(self, cell: &Value, filter: &Value) -> Option<bool> {
        match self {
            Self::FuzzyText => Some(fuzzy_text_matches(cell, filter)),
            Self::Numeric => Some(NumericFilter::parse(filter).matches(cell)),
            Self::GreaterThan => Some(at_least(cell, filter)),
            Self::Equals | Self::InNumberRange | Self::IncludesString => None,
        }
    }

    /// Whether the engine should drop a filter holding `value`.
    ///
    /// Text and equality filters go as soon as their value is falsy (empty
    /// text, zero, `false`, null); a range goes once both bounds are empty;
    /// the slider filter goes once its value is not a number.
    pub fn auto_remove(self, value: &Value) -> bool {
        match self {
            Self::FuzzyText | Self::Numeric | Self::Equals | Self::IncludesString => is_falsy(value),
            Self::InNumberRange => {
                is_falsy(value)
                    || value
                        .as_array()
                        .is_some_and(|bounds| bounds.iter().take(2).all(is_falsy))
            }
            Self::GreaterThan => !value.is_number(),
        }
    }
}

fn at_least(cell: &Value, filter: &Value) -> bool {
    match (cell.as_f64(), filter.as_f64()) {
        (Some(cell), Some(min)) => cell >= min,
        _ => false,
    }
}

/// Text form of a cell or filter value.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Falsy in the dynamic-language sense: null, false, zero, NaN or empty text.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
