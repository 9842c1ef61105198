//! Column definitions.
//!
//! Only the parts of a column definition that this crate reads are modelled:
//! identity, header text, nesting, sizing hints and the filter function the
//! engine should use. Cell rendering stays with the caller.

use serde::{Deserialize, Serialize};

use crate::filters::FilterFnKind;

/// Id of the row-selection checkbox column prepended to every table.
pub const SELECTOR_COLUMN_ID: &str = "_selector";

/// Separator between column ids in a column signature.
pub const SIGNATURE_SEPARATOR: &str = ",";

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// A column, or a group of columns when `columns` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<f64>,
    #[serde(default = "enabled")]
    pub enable_resizing: bool,
    #[serde(default = "enabled")]
    pub enable_grouping: bool,
    #[serde(default = "enabled")]
    pub enable_sorting: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_fn: Option<FilterFnKind>,
    #[serde(default)]
    pub align: Align,
}

fn enabled() -> bool {
    true
}

impl ColumnDef {
    /// A leaf column reading the field `id` of each row.
    pub fn accessor(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: None,
            columns: Vec::new(),
            size: None,
            min_size: None,
            max_size: None,
            enable_resizing: true,
            enable_grouping: true,
            enable_sorting: true,
            filter_fn: None,
            align: Align::Left,
        }
    }

    /// A header group. Its id is the header text.
    pub fn group(header: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        let header = header.into();
        Self {
            columns,
            header: Some(header.clone()),
            ..Self::accessor(header)
        }
    }

    /// The fixed-width row-selection column.
    pub fn selector() -> Self {
        Self {
            size: Some(45.0),
            min_size: Some(45.0),
            max_size: Some(45.0),
            enable_resizing: false,
            enable_grouping: false,
            enable_sorting: false,
            ..Self::accessor(SELECTOR_COLUMN_ID)
        }
    }

    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn min_size(mut self, min_size: f64) -> Self {
        self.min_size = Some(min_size);
        self
    }

    #[must_use]
    pub fn filter_fn(mut self, kind: FilterFnKind) -> Self {
        self.filter_fn = Some(kind);
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn without_grouping(mut self) -> Self {
        self.enable_grouping = false;
        self
    }

    pub fn is_group(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn is_selector(&self) -> bool {
        self.id == SELECTOR_COLUMN_ID
    }

    /// Header text shown for this column.
    ///
    /// Falls back to the id split into words; internal columns (ids starting
    /// with `_`) have no label.
    pub fn label(&self) -> Option<String> {
        if let Some(header) = &self.header {
            return Some(header.clone());
        }
        if self.id.starts_with('_') {
            None
        } else {
            Some(camel_to_words(&self.id))
        }
    }
}

/// Join the top-level column ids, in declared order, into one fingerprint string.
///
/// Ids are joined unescaped, so ids that themselves contain
/// [`SIGNATURE_SEPARATOR`] can collide: `["a,b"]` and `["a", "b"]` give the
/// same signature. Keep the separator out of top-level ids.
pub fn column_signature(columns: &[ColumnDef]) -> String {
    columns
        .iter()
        .map(|column| column.id.as_str())
        .collect::<Vec<_>>()
        .join(SIGNATURE_SEPARATOR)
}

/// All leaf columns, depth-first in declared order.
pub fn leaf_columns(columns: &[ColumnDef]) -> Vec<&ColumnDef> {
    let mut leaves = Vec::new();
    collect_leaves(columns, &mut leaves);
    leaves
}

fn collect_leaves<'a>(columns: &'a [ColumnDef], out: &mut Vec<&'a ColumnDef>) {
    for column in columns {
        if column.is_group() {
            collect_leaves(&column.columns, out);
        } else {
            out.push(column);
        }
    }
}

/// First leaf column, descending into the first group at each level.
pub fn first_leaf(columns: &[ColumnDef]) -> Option<&ColumnDef> {
    let first = columns.first()?;
    if first.is_group() {
        first_leaf(&first.columns)
    } else {
        Some(first)
    }
}

/// Look up a leaf column by id.
pub fn find_leaf<'a>(columns: &'a [ColumnDef], id: &str) -> Option<&'a ColumnDef> {
    leaf_columns(columns).into_iter().find(|column| column.id == id)
}

/// Turn a camelCase or snake_case identifier into capitalised words.
///
/// `"firstName"` becomes `"First Name"`, `"visit_count"` becomes `"Visit Count"`.
pub fn camel_to_words(id: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for ch in id.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        let boundary = match prev {
            Some(p) => ch.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit()),
            None => false,
        };
        if boundary && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
        prev = Some(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
