//! Type declarations for JSON APIs, inferred from schema metadata or from
//! live response payloads.
//!
//! Pipeline: mapping tables → value inference / declared-type resolution →
//! document assembly → file output.
pub mod cli;
pub mod config;
pub mod dialect;
pub mod document;
pub mod error;
pub mod generator;
pub mod inference;
pub mod ir;
pub mod jq_exec;
pub mod mapping;
pub mod models;
pub mod naming;
pub mod path_de;
pub mod payload;
pub mod resolver;
pub mod schema;

pub use config::Config;
pub use dialect::{Dialect, NullPolicy};
pub use document::TypeDocument;
pub use error::{Error, SchemaError};
pub use generator::{Generator, Outcome, Report};
pub use inference::{infer, Inferencer};
pub use ir::{ColumnDescriptor, InferredType, RuntimeValue};
pub use mapping::TypeMapping;
pub use naming::derive_type_name;
pub use resolver::resolve;
pub use schema::{SchemaFile, SchemaSource};
