//! Export orchestration
//!
//! Drives the mapping engine's output to files on disk: for each configured
//! join table, a header file derived from the field list and a data file
//! produced by running the generated unload statement through an external
//! `mysql` client process.

use super::error::ExportError;
use super::statements::unload_statement;
use crate::config::ExportConfig;
use crate::mapping::ColumnToCsvFieldMapper;
use crate::process::Commands;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use uuid::Uuid;

/// Executes one export run over a loaded configuration.
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Export every configured join table, returning the produced file paths
    /// in deterministic order (header file, then data file, per table).
    ///
    /// Fails fast on the first table whose mapping or unload process fails.
    pub fn execute(&self) -> Result<Vec<PathBuf>, ExportError> {
        let run_id = Uuid::new_v4();
        let _span = info_span!("export_run", run_id = %run_id).entered();

        fs::create_dir_all(&self.config.destination)?;
        let mapper = ColumnToCsvFieldMapper::new(self.config.formatting.clone());

        let mut produced = Vec::new();
        for definition in &self.config.join_tables {
            let join_table = definition.build()?;
            let table_name = join_table.name().clone();
            info!(table = %table_name, "exporting table");

            let mappings =
                mapper
                    .create_mappings(&join_table)
                    .map_err(|source| ExportError::Mapping {
                        table: table_name.name().to_string(),
                        source,
                    })?;

            let header_path = self
                .config
                .destination
                .join(format!("{}_headers.csv", table_name.simple_name()));
            let header_tokens: Vec<String> = mappings
                .fields()
                .map(|field| field.header_token())
                .collect();
            fs::write(
                &header_path,
                format!(
                    "{}{}",
                    header_tokens.join(self.config.formatting.field_terminator.as_str()),
                    self.config.formatting.line_terminator
                ),
            )?;

            let data_path = self
                .config
                .destination
                .join(format!("{}.csv", table_name.simple_name()));
            let statement = unload_statement(
                &table_name,
                &mappings,
                &data_path,
                &self.config.formatting,
            );
            debug!(table = %table_name, statement = %statement, "generated unload statement");

            self.mysql_command(&statement)
                .execute()
                .map_err(|source| ExportError::Process {
                    table: table_name.name().to_string(),
                    source,
                })?;

            produced.push(header_path);
            produced.push(data_path);
        }

        info!(files = produced.len(), "export complete");
        Ok(produced)
    }

    fn mysql_command(&self, statement: &str) -> Commands {
        let connection = &self.config.connection;
        Commands::new(
            "mysql",
            [
                "--host".to_string(),
                connection.host.clone(),
                "--port".to_string(),
                connection.port.to_string(),
                "--user".to_string(),
                connection.username.clone(),
                format!("--password={}", connection.password),
                "--execute".to_string(),
                statement.to_string(),
                connection.database.clone(),
            ],
        )
    }
}
