//! Subcommand implementations.
//!
//! Each command returns the text to print so tests can inspect it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde_json::Value;
use tracing::{debug, info};

use grid_state::view::{
    FilterChip, PageInfo, TableContext, active_filter_chips, can_toggle_visibility,
    hidable_columns,
};
use grid_state::{
    ColumnFilter, ColumnSort, FilterFnKind, JsonFileStore, PERSISTED_FIELDS, PartialTableState,
    StateOnlyEngine, StateSource, TableEngine, TableSession, ViewStateConfig, ViewStateError,
    ViewStateStore, find_leaf, fuzzy_rank, leaf_columns,
};

use crate::cli::{FilterArgs, FilterKindArg, SetArgs, ShowArgs, TableArg};
use crate::people::people_columns;

/// Settings and store shared by every command.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub config: ViewStateConfig,
    pub store: Arc<JsonFileStore>,
}

impl Workspace {
    /// Load settings and open the file store, preferring `storage_dir` when given.
    ///
    /// An explicitly named settings file must exist and be valid; the default
    /// one falls back to built-in settings.
    pub fn load(config_path: Option<&Path>, storage_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => ViewStateConfig::try_load_from(path).map_err(|e| friendly(&e))?,
            None => ViewStateConfig::load(),
        };
        if storage_dir.is_some() {
            config.storage_dir = storage_dir;
        }
        Ok(Self::new(config))
    }

    pub fn new(config: ViewStateConfig) -> Self {
        let dir = config.resolved_storage_dir();
        debug!("Using table state directory {}", dir.display());
        Self {
            store: Arc::new(JsonFileStore::new(dir)),
            config,
        }
    }

    fn open(&self, table: &TableArg) -> TableSession {
        TableSession::open(
            self.store.clone(),
            &self.config,
            &table.table,
            people_columns(),
            PartialTableState::default(),
        )
    }
}

pub fn run_show(workspace: &Workspace, args: &ShowArgs) -> Result<String> {
    let session = workspace.open(&args.table);
    let mut engine = StateOnlyEngine::new();
    session.mount(&mut engine);
    let state = engine.state();

    let mut out = format!("Table: {}\nSource: {}\n", session.key(), session.source());

    let persisted = serde_json::to_value(session.initial_state().whitelisted())
        .context("encode table state")?;
    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    apply_table_style(&mut table);
    for field in PERSISTED_FIELDS {
        if let Some(value) = persisted.get(field) {
            table.add_row(vec![field.to_string(), compact(value)]);
        }
    }
    out.push_str(&format!("{table}\n"));

    let chips = active_filter_chips(session.columns(), &state.column_filters);
    if !chips.is_empty() {
        let text: Vec<_> = chips.iter().map(FilterChip::text).collect();
        out.push_str(&format!("Active filters: {}\n", text.join(", ")));
    }

    match PageInfo::new(args.rows, state.pagination) {
        Some(page) => {
            let (first, last) = page.visible_range();
            out.push_str(&format!(
                "Page {} of {} (rows {first}-{last} of {})\n",
                page.page_index + 1,
                page.page_count,
                page.row_count
            ));
        }
        None => out.push_str("No rows\n"),
    }

    if args.debug {
        let mut context = TableContext::new();
        context.toggle_debug();
        if let Some(snapshot) = context.debug_snapshot(session.columns(), &state) {
            let pretty = serde_json::to_string_pretty(&snapshot).context("render debug snapshot")?;
            out.push_str(&pretty);
            out.push('\n');
        }
    }

    session.close();
    Ok(out)
}

pub async fn run_set(workspace: &Workspace, args: &SetArgs) -> Result<String> {
    let mut session = workspace.open(&args.table);
    let mut engine = StateOnlyEngine::new();
    session.mount(&mut engine);

    let columns = session.columns().to_vec();
    let sorting = args
        .sort
        .iter()
        .map(String::as_str)
        .map(parse_sort)
        .collect::<Result<Vec<_>>>()?;
    let filters = args
        .filter
        .iter()
        .map(String::as_str)
        .map(parse_filter)
        .collect::<Result<Vec<_>>>()?;
    for id in sorting
        .iter()
        .map(|s| &s.id)
        .chain(filters.iter().map(|f| &f.id))
        .chain(&args.group)
        .chain(&args.hide)
    {
        if find_leaf(&columns, id).is_none() {
            bail!("unknown column '{id}'");
        }
    }
    if args.page_size == Some(0) {
        bail!("page size must be greater than zero");
    }

    let mut visibility = engine.state().column_visibility;
    for id in &args.hide {
        if !hidable_columns(&columns).iter().any(|column| column.id == *id) {
            bail!("column '{id}' cannot be hidden");
        }
        if !can_toggle_visibility(&columns, &visibility, id) {
            bail!("cannot hide '{id}': it is the last visible column");
        }
        visibility.insert(id.clone(), false);
    }

    engine.update(|state| {
        if let Some(page) = args.page {
            state.pagination.page_index = page;
        }
        if let Some(size) = args.page_size {
            state.pagination.page_size = size;
        }
        if !sorting.is_empty() {
            state.sorting = sorting;
        }
        for filter in filters {
            let kind = find_leaf(&columns, &filter.id)
                .and_then(|c| c.filter_fn)
                .unwrap_or_default();
            state.column_filters.retain(|f| f.id != filter.id);
            if kind.auto_remove(&filter.value) {
                debug!(column = %filter.id, "Filter value is empty, removing filter");
                continue;
            }
            state.column_filters.push(filter);
        }
        if !args.group.is_empty() {
            state.grouping = args.group.clone();
        }
        state.column_visibility = visibility;
        if let Some(global) = &args.global {
            state.global_filter = Some(Value::String(global.clone()));
        }
    });
    session.sync(&engine);

    if args.settle {
        let quiet = workspace.config.debounce.quiet_period();
        info!("Waiting {}ms for the state to settle", quiet.as_millis());
        tokio::time::sleep(quiet + Duration::from_millis(10)).await;
    } else {
        session.flush();
    }

    let source = session.reconciler().reconcile().source;
    session.close();
    if source != StateSource::Stored {
        bail!("state for '{}' was not persisted; see the log for details", args.table.table);
    }
    Ok(format!("Saved state for {}\n", args.table.table))
}

pub fn run_clear(workspace: &Workspace, args: &TableArg) -> Result<String> {
    let session = workspace.open(args);
    let removed = session
        .reconciler()
        .clear()
        .map_err(|e| friendly(&e))
        .with_context(|| format!("clear state for '{}'", args.table))?;
    let key = session.key().to_string();
    session.close();
    Ok(if removed {
        format!("Cleared {key}\n")
    } else {
        format!("Nothing stored for {key}\n")
    })
}

pub fn run_keys(workspace: &Workspace) -> String {
    let keys = workspace.store.keys();
    if keys.is_empty() {
        return "No stored tables\n".to_string();
    }
    keys.iter().map(|key| format!("{key}\n")).collect()
}

pub fn run_columns(workspace: &Workspace) -> String {
    let columns = TableSession::columns_for(&workspace.config, people_columns());
    let hidable: Vec<_> = hidable_columns(&columns).iter().map(|c| c.id.clone()).collect();

    let mut table = Table::new();
    table.set_header(vec!["Id", "Header", "Filter", "Sortable", "Groupable", "Hidable"]);
    apply_table_style(&mut table);
    for column in leaf_columns(&columns) {
        let filter = column
            .filter_fn
            .map_or_else(|| "-".to_string(), |kind| format!("{kind:?}"));
        table.add_row(vec![
            column.id.clone(),
            column.label().unwrap_or_default(),
            filter,
            yes_no(column.enable_sorting),
            yes_no(column.enable_grouping),
            yes_no(hidable.contains(&column.id)),
        ]);
    }
    format!("{table}\n")
}

pub fn run_filter(args: &FilterArgs) -> String {
    let filter = parse_value(&args.value);
    let mut table = Table::new();
    table.set_header(vec!["Cell", "Match", "Score"]);
    apply_table_style(&mut table);
    for cell in &args.cells {
        let cell_value = parse_value(cell);
        let (matched, score) = match args.kind {
            FilterKindArg::Fuzzy => {
                let rank = fuzzy_rank(&cell_value, &filter);
                (rank.is_some(), rank.map(|r| r.to_string()))
            }
            FilterKindArg::Numeric => (
                FilterFnKind::Numeric
                    .matches(&cell_value, &filter)
                    .unwrap_or(false),
                None,
            ),
        };
        table.add_row(vec![
            cell.clone(),
            yes_no(matched),
            score.unwrap_or_else(|| "-".to_string()),
        ]);
    }
    format!("{table}\n")
}

/// `column` or `column:desc`.
pub fn parse_sort(spec: &str) -> Result<ColumnSort> {
    let (id, direction) = spec.split_once(':').unwrap_or((spec, "asc"));
    if id.is_empty() {
        bail!("empty column in sort '{spec}'");
    }
    match direction {
        "asc" => Ok(ColumnSort::asc(id)),
        "desc" => Ok(ColumnSort::desc(id)),
        other => bail!("unknown sort direction '{other}' (use asc or desc)"),
    }
}

/// `column=value`; numbers become JSON numbers, anything else text.
pub fn parse_filter(spec: &str) -> Result<ColumnFilter> {
    let Some((id, value)) = spec.split_once('=') else {
        bail!("filter '{spec}' must look like COLUMN=VALUE");
    };
    if id.is_empty() {
        bail!("empty column in filter '{spec}'");
    }
    Ok(ColumnFilter::new(id, parse_value(value)))
}

/// Turn a library error into a message with a hint for the user.
fn friendly(error: &ViewStateError) -> anyhow::Error {
    match error.suggestion() {
        Some(hint) => anyhow!("{}\n  hint: {hint}", error.user_message()),
        None => anyhow!("{}", error.user_message()),
    }
}

fn parse_value(text: &str) -> Value {
    match text.parse::<serde_json::Number>() {
        Ok(number) => Value::Number(number),
        Err(_) => Value::String(text.to_string()),
    }
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn yes_no(flag: bool) -> String {
    (if flag { "yes" } else { "no" }).to_string()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_sort_specs() {
        assert_eq!(parse_sort("age").unwrap(), ColumnSort::asc("age"));
        assert_eq!(parse_sort("age:desc").unwrap(), ColumnSort::desc("age"));
        assert!(parse_sort("age:sideways").is_err());
        assert!(parse_sort(":desc").is_err());
    }

    #[test]
    fn parses_filter_specs() {
        assert_eq!(parse_filter("age=30").unwrap(), ColumnFilter::new("age", json!(30)));
        assert_eq!(parse_filter("status=single").unwrap(), ColumnFilter::new("status", "single"));
        assert_eq!(parse_filter("progress=>50").unwrap(), ColumnFilter::new("progress", ">50"));
        assert!(parse_filter("age").is_err());
    }
}
