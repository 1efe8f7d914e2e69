//! Configuration.
//!
//! Loaded from `api-typer.toml` in the working directory unless `--config`
//! names another file. Every key is optional:
//!
//! ```toml
//! output_path = "resources/js/types"
//! models_path = "models"
//! schema_path = "schema.json"
//! dialect = "ts"              # or "js"
//! auto_generate = true
//! exclude_columns = ["password", "remember_token"]
//! null_type = "null"          # or "unknown"
//! model_suffix = "Resource"
//! value_suffix = "Type"
//! freshness_secs = 3600
//!
//! [type_mappings]
//! json = "Record<string, unknown>"
//! ```
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::dialect::{Dialect, NullPolicy};
use crate::error::Error;
use crate::mapping::TypeMapping;

pub const DEFAULT_CONFIG_FILE: &str = "api-typer.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the declaration files are written to.
    pub output_path: PathBuf,
    /// Directory scanned for model manifests.
    pub models_path: PathBuf,
    /// JSON schema description used by model generation.
    pub schema_path: PathBuf,
    /// Entries layered over the built-in TypeScript table.
    pub type_mappings: IndexMap<String, String>,
    /// Field names never emitted.
    pub exclude_columns: BTreeSet<String>,
    /// Gate for value-driven generation.
    pub auto_generate: bool,
    pub dialect: Dialect,
    #[serde(rename = "null_type")]
    pub null_policy: NullPolicy,
    pub model_suffix: String,
    pub value_suffix: String,
    pub freshness_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("types"),
            models_path: PathBuf::from("models"),
            schema_path: PathBuf::from("schema.json"),
            type_mappings: IndexMap::new(),
            exclude_columns: ["password", "remember_token"].into_iter().map(String::from).collect(),
            auto_generate: true,
            dialect: Dialect::TypeScript,
            null_policy: NullPolicy::Null,
            model_suffix: "Resource".to_string(),
            value_suffix: "Type".to_string(),
            freshness_secs: 3600,
        }
    }
}

impl Config {
    /// Parse a config file. A missing file is `Ok(None)`.
    pub fn load_file(path: &Path) -> Result<Option<Self>, Error> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(path, e)),
        };
        Self::from_toml(&content)
            .map(Some)
            .map_err(|source| Error::Config { path: path.to_path_buf(), source })
    }

    pub fn from_toml(src: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(src)
    }

    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }

    /// The declared-type table for the configured dialect. User mappings are
    /// written in TypeScript syntax and only apply to that dialect.
    pub fn type_mapping(&self) -> TypeMapping {
        match self.dialect {
            Dialect::TypeScript => TypeMapping::with_overrides(self.dialect, &self.type_mappings),
            Dialect::JsDoc => TypeMapping::builtin(self.dialect),
        }
    }

    pub fn artifact_path(&self, type_name: &str) -> PathBuf {
        self.output_path.join(format!("{type_name}.{}", self.dialect.extension()))
    }
}
