//! taxsql - export a taxonomy subtree from NCBI dump files as SQL

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use taxsql::config::{DEFAULT_OUTPUT_FILE, DEFAULT_ROOT_TAX_ID};
use taxsql::{ExportConfig, ExportPipeline};
use taxsql_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "taxsql")]
#[command(author, version, about = "Export a taxonomy subtree from NCBI dump files as SQL")]
struct Cli {
    /// Directory holding division.dmp, nodes.dmp and names.dmp
    #[arg(short, long, env = "TAXSQL_DUMP_DIR", default_value = ".")]
    dump_dir: PathBuf,

    /// SQL script to write
    #[arg(short, long, env = "TAXSQL_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Tax id of the subtree root (default: Embryophyta)
    #[arg(short, long, env = "TAXSQL_ROOT", default_value_t = DEFAULT_ROOT_TAX_ID)]
    root: i32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the confirmation line
    let log_config = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        })
        .output(LogOutput::Console)
        .log_file_prefix("taxsql")
        .build();

    // Environment variables take precedence
    let log_config = log_config.merge_env()?;
    // Held until exit so file logs are flushed
    let _log_guard = init_logging(&log_config)?;

    let config = ExportConfig::new()
        .in_dir(&cli.dump_dir)
        .with_output_path(&cli.output)
        .with_root_tax_id(cli.root);
    debug!(?config, "Starting export");

    let stats = ExportPipeline::new(config).run()?;

    println!("SQL export complete: {}", stats.output_path.display());
    Ok(())
}
