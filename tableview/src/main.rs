//! # tableview
//!
//! Browse JSON row dumps (books, events, registrations, users) as sorted,
//! searchable, paginated tables.
//!
//! ## Overview
//!
//! tableview is built on top of tableviewlib. It loads rows from a JSON file
//! (a bare array or a `{"data": [...]}` style envelope), drives a table view
//! controller from command-line flags, and prints the current page.
//!
//! ## Usage
//!
//! ```bash
//! # First page, columns inferred from the data
//! tableview events.json
//!
//! # Search, sort descending by date, third page of 25
//! tableview events.json -q "book" -s date --desc -p 3 -n 25
//!
//! # Exact-match filters compose with the search
//! tableview registrations.json -f status=confirmed -f event_id=12
//!
//! # Column labels, formats and searchable fields from a config file
//! tableview users.json --config users.table.json
//!
//! # Machine-readable state and page
//! tableview events.json --output json
//!
//! # Export every matching row (all pages) as CSV
//! tableview export events.json -q "book" --out books.csv
//! ```
//!
//! Logging goes to stderr. Set `TABLEVIEW_LOG` (e.g. `tableviewlib=debug`)
//! or pass `-v`/`-vv`.

mod render;

use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command, ValueEnum};
use console::Term;
use serde::Serialize;
use tableviewlib::{
    load_rows, write_csv, NullPlacement, RenderedTable, Row, SortDirection, SortState,
    TableConfig, TableViewController, Value, ViewSnapshot,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// How `show` prints the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    /// Aligned table for the terminal
    Table,
    /// Controller state and formatted page as JSON
    Json,
}

/// JSON output: controller state plus the formatted page
#[derive(Debug, Serialize)]
struct JsonOutput {
    state: ViewSnapshot<String>,
    table: RenderedTable,
}

/// Arguments shared by the default view and `export`
fn view_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("path")
            .help("JSON file with an array of row objects")
            .required(true),
    )
    .arg(
        Arg::new("config")
            .short('C')
            .long("config")
            .help("Table config file (columns, searchable fields, page sizes)"),
    )
    .arg(
        Arg::new("query")
            .short('q')
            .long("query")
            .help("Case-insensitive search across searchable fields"),
    )
    .arg(
        Arg::new("filter")
            .short('f')
            .long("filter")
            .action(ArgAction::Append)
            .help("Exact-match filter FIELD=VALUE (can be specified multiple times)"),
    )
    .arg(
        Arg::new("sort")
            .short('s')
            .long("sort")
            .help("Column to sort by"),
    )
    .arg(
        Arg::new("desc")
            .long("desc")
            .action(ArgAction::SetTrue)
            .requires("sort")
            .help("Sort descending"),
    )
    .arg(
        Arg::new("nulls")
            .long("nulls")
            .value_parser(["first", "last"])
            .help("Where rows missing the sort field go"),
    )
    .arg(
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
            .help("More log output on stderr (-v debug, -vv trace)"),
    )
}

/// Build the clap Command structure
fn build_command() -> Command {
    let root = Command::new("tableview")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Browse JSON row dumps as sorted, searchable, paginated tables")
        .subcommand_negates_reqs(true)
        .arg(
            Arg::new("page")
                .short('p')
                .long("page")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("1")
                .help("Page number, starting at 1"),
        )
        .arg(
            Arg::new("page-size")
                .short('n')
                .long("page-size")
                .value_parser(value_parser!(usize))
                .help("Rows per page (snaps to the nearest offered size)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(OutputMode))
                .default_value("table")
                .help("Output format"),
        );

    let export = Command::new("export")
        .about("Write every matching row (all pages) as CSV")
        .arg(
            Arg::new("out")
                .long("out")
                .help("Output file (defaults to stdout)"),
        );

    view_args(root).subcommand(view_args(export))
}

/// Install the tracing subscriber. `TABLEVIEW_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("TABLEVIEW_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Parse `FIELD=VALUE`. The value is read as JSON when it parses to a
/// scalar (numbers, booleans, null), otherwise as text or a date.
fn parse_filter(expr: &str) -> anyhow::Result<(String, Value)> {
    let (field, raw) = expr
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid filter '{}': expected FIELD=VALUE", expr))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(anyhow!("invalid filter '{}': empty field name", expr));
    }
    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) if !json.is_array() && !json.is_object() => Value::from(json),
        _ => Value::from(serde_json::Value::String(raw.to_string())),
    };
    Ok((field.to_string(), value))
}

/// Load rows and config, then apply every view flag to a controller
fn build_view(matches: &ArgMatches) -> anyhow::Result<TableViewController<Row>> {
    let path = matches
        .get_one::<String>("path")
        .ok_or_else(|| anyhow!("missing input path"))?;
    let rows = load_rows(path)?;

    let mut config = match matches.get_one::<String>("config") {
        Some(config_path) => TableConfig::load(config_path)?,
        None => TableConfig::infer(&rows),
    };
    if let Some(nulls) = matches.get_one::<String>("nulls") {
        config.nulls = nulls.parse::<NullPlacement>().map_err(|e| anyhow!(e))?;
    }
    debug!(columns = config.columns.len(), "table config ready");

    let mut view = config.build(rows)?;

    if let Some(sort) = matches.get_one::<String>("sort") {
        if view.column(sort).is_none() {
            return Err(anyhow!("unknown sort column '{}'", sort));
        }
        let direction = if matches.get_flag("desc") {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        view.set_sort_state(SortState {
            order_by: Some(sort.clone()),
            direction,
        });
    }

    if let Some(filters) = matches.get_many::<String>("filter") {
        for expr in filters {
            let (field, value) = parse_filter(expr)?;
            view.set_filter(field, value);
        }
    }

    if let Some(query) = matches.get_one::<String>("query") {
        view.set_query(query.as_str());
    }

    Ok(view)
}

/// Default command: print one page
fn show(matches: &ArgMatches) -> anyhow::Result<()> {
    let mut view = build_view(matches)?;

    if let Some(size) = matches.get_one::<usize>("page-size") {
        view.set_page_size(*size);
    }
    let page = matches.get_one::<i64>("page").copied().unwrap_or(1);
    view.set_page(page.saturating_sub(1));

    let table = RenderedTable::from_view(&view);
    let mode = matches
        .get_one::<OutputMode>("output")
        .copied()
        .unwrap_or(OutputMode::Table);
    let mut stdout = io::stdout().lock();
    match mode {
        OutputMode::Json => {
            let output = JsonOutput {
                state: view.snapshot(),
                table,
            };
            serde_json::to_writer_pretty(&mut stdout, &output)?;
            writeln!(stdout)?;
        }
        OutputMode::Table => {
            let width = Term::stdout().size_checked().map(|(_, cols)| cols);
            write!(stdout, "{}", render::render_table(&table, width))?;
        }
    }
    Ok(())
}

/// `export`: CSV of every matching row
fn export(matches: &ArgMatches) -> anyhow::Result<()> {
    let view = build_view(matches)?;

    let written = match matches.get_one::<String>("out") {
        Some(out) => {
            let file = File::create(out).with_context(|| format!("cannot create '{}'", out))?;
            write_csv(&view, file)?
        }
        None => write_csv(&view, io::stdout().lock())?,
    };
    info!(rows = written, "export finished");
    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("export", sub)) => export(sub),
        _ => show(matches),
    }
}

/// `-v` count, whether given before or after the subcommand
fn verbosity(matches: &ArgMatches) -> u8 {
    let sub = matches
        .subcommand()
        .map(|(_, sub)| sub.get_count("verbose"))
        .unwrap_or(0);
    matches.get_count("verbose").saturating_add(sub)
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();

    init_logging(verbosity(&matches));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
