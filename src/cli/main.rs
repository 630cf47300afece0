//! graph-etl-cli - command-line front end for schema-to-graph CSV export

use anyhow::Context;
use clap::{Parser, Subcommand};
use graph_etl_sdk::{ColumnToCsvFieldMapper, ExportConfig, Exporter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graph-etl-cli")]
#[command(about = "Relational-schema to graph CSV mapping and export")]
#[command(version)]
struct Cli {
    /// Log verbosity filter (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a full export against the configured database
    Export {
        /// Path to a JSON or YAML export configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Override the configured destination directory
        #[arg(long)]
        destination: Option<PathBuf>,
    },

    /// Validate a configuration without touching the database
    Validate {
        /// Path to a JSON or YAML export configuration
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.verbosity.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Export {
            config,
            destination,
        } => handle_export(&config, destination),
        Command::Validate { config } => handle_validate(&config),
    }
}

fn handle_export(config_path: &PathBuf, destination: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = ExportConfig::from_path(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    if let Some(destination) = destination {
        config.destination = destination;
    }

    let files = Exporter::new(config).execute().context("export failed")?;
    for file in files {
        println!("{}", file.display());
    }
    Ok(())
}

fn handle_validate(config_path: &PathBuf) -> anyhow::Result<()> {
    let config = ExportConfig::from_path(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let mapper = ColumnToCsvFieldMapper::new(config.formatting.clone());
    for definition in &config.join_tables {
        let join_table = definition
            .build()
            .with_context(|| format!("building table '{}'", definition.table.name))?;
        mapper
            .create_mappings(&join_table)
            .with_context(|| format!("mapping table '{}'", definition.table.name))?;
    }

    println!(
        "Validation successful ({} join tables)",
        config.join_tables.len()
    );
    Ok(())
}
