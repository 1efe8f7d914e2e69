//! Schema sources: where declared column types come from.
//!
//! A `SchemaFile` is a JSON description of tables:
//!
//! ```json
//! { "tables": { "users": { "columns": [
//!     { "name": "id", "type": "bigint" },
//!     { "name": "deleted_at", "type": "timestamp", "nullable": true }
//! ] } } }
//! ```
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, SchemaError};

/// Column introspection. Lookups of a missing table or column must return the
/// matching `SchemaError` variant.
pub trait SchemaSource {
    fn list_columns(&self, table: &str) -> Result<Vec<String>, SchemaError>;

    fn column_declared_type(&self, table: &str, column: &str) -> Result<String, SchemaError>;

    fn column_is_nullable(&self, table: &str, column: &str) -> Result<bool, SchemaError>;

    fn column_is_decimal(&self, _table: &str, _column: &str) -> Result<bool, SchemaError> {
        Ok(false)
    }

    fn column_is_enum(&self, _table: &str, _column: &str) -> Result<bool, SchemaError> {
        Ok(false)
    }
}

// ------------------------------ File source ------------------------------- //

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    tables: IndexMap<String, TableDef>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct TableDef {
    #[serde(default)]
    columns: Vec<ColumnDef>,
}

#[derive(Clone, Debug, Deserialize)]
struct ColumnDef {
    name: String,
    #[serde(rename = "type")]
    declared_type: String,
    #[serde(default)]
    nullable: bool,
    #[serde(default, rename = "enum")]
    is_enum: bool,
    #[serde(default, rename = "decimal")]
    is_decimal: bool,
}

impl SchemaFile {
    pub fn load(path: &Path) -> Result<Self, Error> {
        crate::path_de::from_file_with_path(path)
    }

    pub fn from_json(src: &str) -> Result<Self, String> {
        crate::path_de::from_slice_with_path(src.as_bytes())
    }

    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    fn table(&self, table: &str) -> Result<&TableDef, SchemaError> {
        self.tables.get(table).ok_or_else(|| SchemaError::TableNotFound {
            table: table.to_string(),
        })
    }

    fn column(&self, table: &str, column: &str) -> Result<&ColumnDef, SchemaError> {
        self.table(table)?
            .columns
            .iter()
            .find(|c| c.name == column)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                table: table.to_string(),
                column: column.to_string(),
            })
    }
}

impl SchemaSource for SchemaFile {
    fn list_columns(&self, table: &str) -> Result<Vec<String>, SchemaError> {
        Ok(self.table(table)?.columns.iter().map(|c| c.name.clone()).collect())
    }

    fn column_declared_type(&self, table: &str, column: &str) -> Result<String, SchemaError> {
        Ok(self.column(table, column)?.declared_type.clone())
    }

    fn column_is_nullable(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        Ok(self.column(table, column)?.nullable)
    }

    fn column_is_decimal(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        Ok(self.column(table, column)?.is_decimal)
    }

    fn column_is_enum(&self, table: &str, column: &str) -> Result<bool, SchemaError> {
        Ok(self.column(table, column)?.is_enum)
    }
}
