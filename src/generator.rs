//! Generation runs: turn models or payloads into declaration files.
//!
//! Each unit (one model, one payload source) is independent. Batch entry
//! points never stop early; every unit's outcome lands in the [`Report`].
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::document::TypeDocument;
use crate::error::{Error, SchemaError, SourceKind};
use crate::inference::Inferencer;
use crate::ir::{ColumnDescriptor, RuntimeValue};
use crate::mapping::TypeMapping;
use crate::models;
use crate::naming::derive_type_name;
use crate::payload;
use crate::resolver;
use crate::schema::SchemaSource;

// ------------------------------- Outcomes --------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    /// An existing artifact is younger than the freshness window.
    Fresh(PathBuf),
    /// `auto_generate` is off.
    Disabled,
}

#[derive(Debug)]
pub struct UnitReport {
    pub unit: String,
    pub result: Result<Outcome, Error>,
}

#[derive(Debug, Default)]
pub struct Report {
    pub units: Vec<UnitReport>,
}

impl Report {
    pub fn push(&mut self, unit: impl Into<String>, result: Result<Outcome, Error>) {
        self.units.push(UnitReport { unit: unit.into(), result });
    }

    pub fn written(&self) -> usize {
        self.count(|r| matches!(r, Ok(Outcome::Written(_))))
    }

    pub fn skipped(&self) -> usize {
        self.count(|r| match r {
            Ok(Outcome::Fresh(_) | Outcome::Disabled) => true,
            Err(e) => e.is_not_found(),
            Ok(Outcome::Written(_)) => false,
        })
    }

    pub fn failed(&self) -> usize {
        self.count(|r| matches!(r, Err(e) if !e.is_not_found()))
    }

    fn count(&self, pred: impl Fn(&Result<Outcome, Error>) -> bool) -> usize {
        self.units.iter().filter(|u| pred(&u.result)).count()
    }
}

/// When to overwrite an existing artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    Always,
    IfStale(Duration),
}

// ------------------------------- Generator -------------------------------- //

pub struct Generator<'a> {
    config: &'a Config,
    mapping: TypeMapping,
    inferencer: Inferencer,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            mapping: config.type_mapping(),
            inferencer: Inferencer::new(config.dialect, config.null_policy),
        }
    }

    // ---- models ---- //

    /// Every manifest under `models_path`.
    pub fn generate_all_models(&self, schema: &dyn SchemaSource) -> Report {
        let mut report = Report::default();
        let names = match models::discover(&self.config.models_path) {
            Ok(names) => names,
            Err(e) => {
                report.push(self.config.models_path.display().to_string(), Err(e));
                return report;
            }
        };
        for name in names {
            let result = self.generate_model(&name, schema);
            report.push(name, result);
        }
        report
    }

    /// Models always regenerate; the schema is authoritative.
    pub fn generate_model(&self, name: &str, schema: &dyn SchemaSource) -> Result<Outcome, Error> {
        info!(model = name, "processing model");
        let document = self.model_document(name, schema)?;
        self.write(&document, WritePolicy::Always)
    }

    pub fn model_document(&self, name: &str, schema: &dyn SchemaSource) -> Result<TypeDocument, Error> {
        let model = models::load(&self.config.models_path, name)?;
        let columns = schema.list_columns(&model.table).map_err(|e| match e {
            SchemaError::TableNotFound { table } => Error::not_found(SourceKind::Table, table),
            other => Error::Schema(other),
        })?;
        let descriptors: Vec<ColumnDescriptor> = columns.iter()
            .map(|column| describe_column(schema, &model.table, column))
            .collect();
        let fields = resolver::resolve_all(&descriptors, &self.mapping);
        let type_name = derive_type_name(&model.name, &self.config.model_suffix);
        Ok(TypeDocument::new(type_name, fields).with_source(format!("table {}", model.table)))
    }

    // ---- values ---- //

    /// One unit per input document, named after the file stem; or, with
    /// `name`, a single unit built from the first usable sample.
    pub fn generate_values(
        &self,
        inputs: &[PathBuf],
        name: Option<&str>,
        jq_expr: Option<&str>,
        force: bool,
    ) -> Report {
        let mut report = Report::default();
        if !self.config.auto_generate {
            report.push(name.unwrap_or("values"), Ok(Outcome::Disabled));
            return report;
        }
        match name {
            Some(name) => {
                let result = self.first_document(inputs, jq_expr)
                    .and_then(|(origin, doc)| self.generate_from_value(name, &origin, &doc, force));
                report.push(name, result);
            }
            None => {
                for path in inputs {
                    let stem = path.file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string());
                    self.generate_file(path, &stem, jq_expr, force, &mut report);
                }
            }
        }
        report
    }

    /// A filter yielding several documents names them `{stem}.{n}`, counting from 1.
    fn generate_file(&self, path: &Path, stem: &str, jq_expr: Option<&str>, force: bool, report: &mut Report) {
        let origin = path.display().to_string();
        let docs = match payload::load_documents(path, jq_expr) {
            Ok(docs) => docs,
            Err(e) => return report.push(stem, Err(e)),
        };
        match docs.len() {
            0 => report.push(stem, Err(Error::UnsupportedPayload {
                origin,
                reason: "filter produced no documents".to_string(),
            })),
            1 => report.push(stem, self.generate_from_value(stem, &origin, &docs[0], force)),
            n => {
                debug!(path = %origin, documents = n, "one unit per filter result");
                for (index, doc) in docs.iter().enumerate() {
                    let unit = format!("{stem}.{}", index + 1);
                    let result = self.generate_from_value(&unit, &origin, doc, force);
                    report.push(unit, result);
                }
            }
        }
    }

    /// Infer from one response document and write unless fresh.
    pub fn generate_from_value(
        &self,
        source_name: &str,
        origin: &str,
        document: &Value,
        force: bool,
    ) -> Result<Outcome, Error> {
        if !self.config.auto_generate {
            return Ok(Outcome::Disabled);
        }
        let doc = self.value_document(source_name, origin, document)?;
        let policy = if force {
            WritePolicy::Always
        } else {
            WritePolicy::IfStale(self.config.freshness_window())
        };
        self.write(&doc, policy)
    }

    pub fn value_document(&self, source_name: &str, origin: &str, document: &Value) -> Result<TypeDocument, Error> {
        let record = payload::sample(document).map_err(|reason| Error::UnsupportedPayload {
            origin: origin.to_string(),
            reason,
        })?;
        let fields: IndexMap<String, RuntimeValue> = record.iter()
            .map(|(k, v)| (k.clone(), RuntimeValue::from(v)))
            .collect();
        let type_name = derive_type_name(source_name, &self.config.value_suffix);
        Ok(TypeDocument::new(type_name, self.inferencer.infer_fields(&fields)).with_source(origin))
    }

    fn first_document(&self, inputs: &[PathBuf], jq_expr: Option<&str>) -> Result<(String, Value), Error> {
        let mut last_err = None;
        for path in inputs {
            match payload::load_documents(path, jq_expr) {
                Ok(docs) => {
                    if docs.len() > 1 {
                        warn!(path = %path.display(), dropped = docs.len() - 1, "named run samples the first document only");
                    }
                    if let Some(doc) = docs.into_iter().next() {
                        return Ok((path.display().to_string(), doc));
                    }
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping payload");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| Error::not_found(SourceKind::Payload, "no input documents")))
    }

    // ---- output ---- //

    fn write(&self, document: &TypeDocument, policy: WritePolicy) -> Result<Outcome, Error> {
        ensure_dir(&self.config.output_path)?;
        let path = self.config.artifact_path(&document.name);
        if let WritePolicy::IfStale(window) = policy {
            if is_fresh(&path, window, SystemTime::now()) {
                debug!(path = %path.display(), "artifact is fresh, skipping");
                return Ok(Outcome::Fresh(path));
            }
        }
        let text = document.assemble(self.config.dialect, &self.config.exclude_columns);
        std::fs::write(&path, text).map_err(|e| Error::io(&path, e))?;
        info!(path = %path.display(), "generated");
        Ok(Outcome::Written(path))
    }
}

// ------------------------------- Helpers ---------------------------------- //

/// Build a descriptor, treating each failed metadata query as "no metadata".
fn describe_column(schema: &dyn SchemaSource, table: &str, column: &str) -> ColumnDescriptor {
    fn or_default<T: Default>(r: Result<T, SchemaError>, what: &str, table: &str, column: &str) -> T {
        r.unwrap_or_else(|e| {
            warn!(table, column, error = %e, "{what} lookup failed, falling back");
            T::default()
        })
    }
    ColumnDescriptor {
        name: column.to_string(),
        declared_type: or_default(schema.column_declared_type(table, column), "type", table, column),
        nullable: or_default(schema.column_is_nullable(table, column), "nullability", table, column),
        is_enum: or_default(schema.column_is_enum(table, column), "enum", table, column),
        is_decimal: or_default(schema.column_is_decimal(table, column), "decimal", table, column),
    }
}

fn ensure_dir(dir: &Path) -> Result<(), Error> {
    if !dir.is_dir() {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        info!(path = %dir.display(), "created output directory");
    }
    Ok(())
}

/// True iff `path` exists and its age is strictly below `window`. A
/// modification time in the future counts as age zero.
pub fn is_fresh(path: &Path, window: Duration, now: SystemTime) -> bool {
    let Ok(modified) = std::fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };
    is_younger_than(modified, window, now)
}

pub fn is_younger_than(modified: SystemTime, window: Duration, now: SystemTime) -> bool {
    let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
    age < window
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn freshness_boundary_is_strict() {
        let now = SystemTime::now();
        assert!(is_younger_than(now - Duration::from_secs(3599), HOUR, now));
        assert!(!is_younger_than(now - HOUR, HOUR, now));
        assert!(!is_younger_than(now - Duration::from_secs(7200), HOUR, now));
        assert!(is_younger_than(now + Duration::from_secs(60), HOUR, now));
        assert!(!is_younger_than(now, Duration::ZERO, now));
    }

    #[test]
    fn missing_artifact_is_never_fresh() {
        assert!(!is_fresh(Path::new("/definitely/not/here.ts"), HOUR, SystemTime::now()));
    }

    struct Flaky;

    impl SchemaSource for Flaky {
        fn list_columns(&self, _: &str) -> Result<Vec<String>, SchemaError> {
            Ok(vec!["id".into()])
        }
        fn column_declared_type(&self, _: &str, _: &str) -> Result<String, SchemaError> {
            Ok("bigint".into())
        }
        fn column_is_nullable(&self, _: &str, _: &str) -> Result<bool, SchemaError> {
            Err(SchemaError::Introspection { message: "driver went away".into() })
        }
        fn column_is_enum(&self, t: &str, c: &str) -> Result<bool, SchemaError> {
            Err(SchemaError::ColumnNotFound { table: t.into(), column: c.into() })
        }
    }

    #[test]
    fn failed_lookups_fall_back_to_raw_type() {
        let col = describe_column(&Flaky, "users", "id");
        assert_eq!(col, ColumnDescriptor::new("id", "bigint"));
    }

    /// `id` resolves normally; `legacy` cannot report its declared type.
    struct Untyped;

    impl SchemaSource for Untyped {
        fn list_columns(&self, _: &str) -> Result<Vec<String>, SchemaError> {
            Ok(vec!["id".into(), "legacy".into()])
        }
        fn column_declared_type(&self, _: &str, column: &str) -> Result<String, SchemaError> {
            match column {
                "id" => Ok("bigint".into()),
                _ => Err(SchemaError::Introspection { message: "type query failed".into() }),
            }
        }
        fn column_is_nullable(&self, _: &str, _: &str) -> Result<bool, SchemaError> {
            Ok(false)
        }
    }

    #[test]
    fn failed_type_lookup_resolves_to_unknown() {
        let col = describe_column(&Untyped, "users", "legacy");
        assert_eq!(col.declared_type, "");
        for (dialect, unknown) in [(Dialect::TypeScript, "any"), (Dialect::JsDoc, "*")] {
            let mapping = TypeMapping::builtin(dialect);
            assert_eq!(resolver::resolve(&col, &mapping), unknown);
        }
    }

    #[test]
    fn failed_type_lookup_still_writes_the_model() {
        let dir = tempfile::TempDir::new().unwrap();
        let models = dir.path().join("models");
        std::fs::create_dir_all(&models).unwrap();
        std::fs::write(models.join("User.json"), "").unwrap();
        let config = Config {
            output_path: dir.path().join("types"),
            models_path: models,
            ..Config::default()
        };

        let generator = Generator::new(&config);
        let outcome = generator.generate_model("User", &Untyped).unwrap();
        let path = config.output_path.join("UserResource.ts");
        assert_eq!(outcome, Outcome::Written(path.clone()));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("  id: number;\n  legacy: any;\n"));
    }

    #[test]
    fn report_counts() {
        let mut report = Report::default();
        report.push("a", Ok(Outcome::Written(PathBuf::from("a.ts"))));
        report.push("b", Ok(Outcome::Fresh(PathBuf::from("b.ts"))));
        report.push("c", Err(Error::not_found(SourceKind::Model, "c")));
        report.push("d", Err(Error::Jq("bad".into())));
        assert_eq!((report.written(), report.skipped(), report.failed()), (1, 2, 1));
    }
}
