//! Export configuration
//!
//! Serde-backed configuration for an export run: destination directory,
//! connection settings, formatting, and the join-table definitions the
//! mapping engine consumes. Configurations load from JSON or YAML by file
//! extension.

pub mod formatting;

pub use formatting::{Formatting, QuoteChar};

use crate::models::{Column, ConfigError, Join, JoinKey, JoinTable, Table, TableName};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to read config file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported config format '{0}' (expected json, yaml or yml)")]
    UnsupportedFormat(String),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Connection settings for the external `mysql` client process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

fn default_port() -> u16 {
    3306
}

/// One side of a configured join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinKeyConfig {
    pub source: Column,
    pub target: Column,
}

/// A configured join: parent side always, child side for many-to-many join
/// tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinConfig {
    pub parent: JoinKeyConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<JoinKeyConfig>,
}

/// A configured physical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: TableName,
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// A join table definition, buildable into the model the mapper consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinTableConfig {
    pub table: TableConfig,
    pub join: JoinConfig,
}

impl JoinTableConfig {
    /// Validate and build the schema metadata. All configuration errors
    /// surface here, before any row is processed.
    pub fn build(&self) -> Result<JoinTable, ConfigError> {
        let parent = JoinKey::new(
            self.join.parent.source.clone(),
            self.join.parent.target.clone(),
        )?;
        let join = match &self.join.child {
            Some(child) => Join::many_to_many(
                parent,
                JoinKey::new(child.source.clone(), child.target.clone())?,
            )?,
            None => Join::foreign_key(parent),
        };
        let table = Table::new(self.table.name.clone(), self.table.columns.clone());
        JoinTable::new(join, table)
    }
}

/// Full configuration for one export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub destination: PathBuf,
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub formatting: Formatting,
    #[serde(default)]
    pub join_tables: Vec<JoinTableConfig>,
}

impl ExportConfig {
    /// Load a configuration from a JSON or YAML file, selected by extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("json") => Ok(serde_json::from_str(&contents)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&contents)?),
            other => Err(ConfigLoadError::UnsupportedFormat(
                other.unwrap_or("").to_string(),
            )),
        }
    }
}
