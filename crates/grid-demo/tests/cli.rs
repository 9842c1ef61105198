//! Argument parsing tests.

use clap::Parser;
use grid_demo::cli::{Cli, Command, FilterKindArg};

#[test]
fn set_collects_repeated_flags() {
    let cli = Cli::try_parse_from([
        "grid-demo", "set", "--sort", "age:desc", "--sort", "lastName", "--filter", "status=single",
        "--group", "status", "--page", "2",
    ])
    .unwrap();

    let Command::Set(args) = cli.command else {
        panic!("expected set");
    };
    assert_eq!(args.table.table, "testTable");
    assert_eq!(args.sort, ["age:desc", "lastName"]);
    assert_eq!(args.filter, ["status=single"]);
    assert_eq!(args.group, ["status"]);
    assert_eq!(args.page, Some(2));
    assert!(!args.settle);
}

#[test]
fn global_flags_work_after_subcommand() {
    let cli = Cli::try_parse_from([
        "grid-demo", "keys", "--storage-dir", "/tmp/tables", "--log-format", "json",
    ])
    .unwrap();
    assert!(matches!(cli.command, Command::Keys));
    assert_eq!(cli.storage_dir.as_deref(), Some(std::path::Path::new("/tmp/tables")));
}

#[test]
fn filter_requires_cells() {
    assert!(Cli::try_parse_from(["grid-demo", "filter", "numeric", ">3"]).is_err());

    let cli = Cli::try_parse_from(["grid-demo", "filter", "fuzzy", "tan", "Tanner", "Linsley"])
        .unwrap();
    let Command::Filter(args) = cli.command else {
        panic!("expected filter");
    };
    assert_eq!(args.kind, FilterKindArg::Fuzzy);
    assert_eq!(args.cells.len(), 2);
}

#[test]
fn show_takes_table_name() {
    let cli = Cli::try_parse_from(["grid-demo", "show", "--table", "orders", "--debug"]).unwrap();
    let Command::Show(args) = cli.command else {
        panic!("expected show");
    };
    assert_eq!(args.table.table, "orders");
    assert!(args.debug);
    assert_eq!(args.rows, 380);
}
