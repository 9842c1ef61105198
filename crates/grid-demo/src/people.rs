//! The demo "people" table.

use grid_state::{Align, ColumnDef, FilterFnKind};

/// Name the demo table is stored under.
pub const PEOPLE_TABLE: &str = "testTable";

/// Columns of the people table, as declared by the app (no selection column).
pub fn people_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::group(
            "Name",
            vec![
                ColumnDef::accessor("firstName").header("First Name"),
                ColumnDef::accessor("lastName").header("Last Name"),
            ],
        ),
        ColumnDef::group(
            "Info",
            vec![
                ColumnDef::accessor("age")
                    .header("Age")
                    .size(120.0)
                    .min_size(80.0)
                    .filter_fn(FilterFnKind::Equals)
                    .without_grouping()
                    .align(Align::Right),
                ColumnDef::accessor("visits")
                    .header("Visits")
                    .size(120.0)
                    .min_size(100.0)
                    .filter_fn(FilterFnKind::InNumberRange)
                    .align(Align::Right),
                ColumnDef::accessor("status")
                    .header("Status")
                    .filter_fn(FilterFnKind::IncludesString),
                ColumnDef::accessor("progress")
                    .header("Profile Progress")
                    .filter_fn(FilterFnKind::GreaterThan),
            ],
        ),
    ]
}
