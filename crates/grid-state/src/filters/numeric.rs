//! Numeric comparison filter.
//!
//! Filter text like `>30`, `<= 2.5` or `!0` compares each cell numerically.
//! Text without a recognised operator falls back to loose equality between
//! the cell and the raw filter value, so `30` matches a cell holding `30`
//! or `"30"`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::value_text;

/// Operator prefix followed by a number. The `.` is deliberately loose:
/// it accepts `3.5` and tolerates separators such as `1,5`.
static NUMERIC_FILTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([=<>!]*)\s*((?:[0-9].?[0-9]*)+)").expect("Invalid numeric filter regex")
});

/// Leading decimal number, as read by a lenient float parser.
static LEADING_FLOAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("Invalid float prefix regex")
});

/// A parsed numeric filter.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericFilter {
    GreaterThan(f64),
    LessThan(f64),
    AtMost(f64),
    AtLeast(f64),
    Equal(f64),
    NotEqual(f64),
    /// No usable operator: compare loosely with the raw filter value.
    Loose(Value),
}

impl NumericFilter {
    /// Parse a filter value. Never fails; unknown input becomes [`NumericFilter::Loose`].
    pub fn parse(filter: &Value) -> Self {
        let text = value_text(filter);
        let Some(captures) = NUMERIC_FILTER_REGEX.captures(&text) else {
            return Self::Loose(filter.clone());
        };
        let operator = captures.get(1).map_or("", |m| m.as_str());
        let operand = captures
            .get(2)
            .map_or(f64::NAN, |m| leading_float(m.as_str()));

        match operator {
            ">" => Self::GreaterThan(operand),
            "<" => Self::LessThan(operand),
            "<=" => Self::AtMost(operand),
            ">=" => Self::AtLeast(operand),
            "=" => Self::Equal(operand),
            "!" => Self::NotEqual(operand),
            _ => Self::Loose(filter.clone()),
        }
    }

    /// Whether `cell` passes this filter.
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, cell: &Value) -> bool {
        let number = || leading_float(&value_text(cell));
        match self {
            Self::GreaterThan(operand) => number() > *operand,
            Self::LessThan(operand) => number() < *operand,
            Self::AtMost(operand) => number() <= *operand,
            Self::AtLeast(operand) => number() >= *operand,
            Self::Equal(operand) => number() == *operand,
            Self::NotEqual(operand) => number() != *operand,
            Self::Loose(filter) => loose_equals(cell, filter),
        }
    }
}

/// Parse the leading number of `text`, or NaN when there is none.
fn leading_float(text: &str) -> f64 {
    LEADING_FLOAT_REGEX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Strict numeric conversion of a whole value: blank text is zero,
/// anything non-numeric is NaN.
fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Equality that converts between numbers, text and booleans.
#[allow(clippy::float_cmp)]
fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => {
            value_text(left) == value_text(right)
        }
        _ => to_number(left) == to_number(right),
    }
}
