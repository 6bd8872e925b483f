pub mod cli;
pub mod columns;
pub mod data;
pub mod error;
pub mod impute;
pub mod io_utils;
pub mod missing;
pub mod outliers;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod table;
pub mod text;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_cleanse", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Clean(args) => pipeline::execute(&args),
        Commands::Report(args) => handle_report(&args),
    }
}

fn handle_report(args: &cli::ReportArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Reporting missing values for '{}' (delimiter '{}')",
        args.input.display(),
        printable_delimiter(delimiter)
    );

    let mut table = table::Table::load(&args.input, delimiter, encoding)?;
    columns::normalize_headers(&mut table.schema)?;
    let report = missing::MissingReport::of(&table);

    let headers = vec![
        "column".to_string(),
        "missing".to_string(),
        "percent".to_string(),
    ];
    render::print_table(&headers, &report.render_rows());

    if let Some(path) = &args.json {
        report
            .save_json(path)
            .with_context(|| format!("Writing report to {path:?}"))?;
        info!("Missing-value report written to {:?}", path);
    }
    info!(
        "Profiled {} column(s) across {} row(s)",
        report.columns.len(),
        report.rows
    );
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
