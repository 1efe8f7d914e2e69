//! Live value source: JSON response payloads on disk.
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, SourceKind};

/// Expand literal paths and quoted glob patterns, in argument order.
pub fn resolve_inputs<I>(patterns: I) -> Result<Vec<PathBuf>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if has_glob_chars(pattern) {
            let entries = glob::glob(pattern).map_err(|source| Error::Pattern {
                pattern: pattern.to_string(),
                source,
            })?;
            // unreadable entries are skipped; an empty match just yields nothing
            out.extend(entries.filter_map(Result::ok));
        } else {
            out.push(PathBuf::from(pattern));
        }
    }
    Ok(out)
}

/// Read one payload file, optionally running a jq filter over it.
pub fn load_documents(path: &Path, jq_expr: Option<&str>) -> Result<Vec<Value>, Error> {
    if !path.is_file() {
        return Err(Error::not_found(SourceKind::Payload, path.display().to_string()));
    }
    let value: Value = crate::path_de::from_file_with_path(path)?;
    match jq_expr {
        None => Ok(vec![value]),
        Some(expr) => crate::jq_exec::run_jaq(expr, &value),
    }
}

/// Pick the record to type from a response document.
///
/// - `{"data": [first, ..]}` → `first` (when it is an object)
/// - `{"data": {..}}` → the `data` object
/// - any other object → itself
/// - `[first, ..]` → `first` (when it is an object)
pub fn sample(document: &Value) -> Result<&Map<String, Value>, String> {
    match document {
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => match items.first() {
                Some(Value::Object(first)) => Ok(first),
                Some(_) => Err("`data` items are not objects".to_string()),
                None => Err("`data` is empty".to_string()),
            },
            Some(Value::Object(data)) => Ok(data),
            Some(_) | None => Ok(map),
        },
        Value::Array(items) => match items.first() {
            Some(Value::Object(first)) => Ok(first),
            Some(_) => Err("array items are not objects".to_string()),
            None => Err("array is empty".to_string()),
        },
        _ => Err("payload is not an object or array".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn envelopes_are_unwrapped() {
        let doc = json!({"data": [{"id": 1}, {"id": 2}], "links": {}});
        assert_eq!(sample(&doc).unwrap()["id"], 1);

        let doc = json!({"data": {"id": 7}});
        assert_eq!(sample(&doc).unwrap()["id"], 7);

        let doc = json!({"id": 3, "name": "x"});
        assert_eq!(sample(&doc).unwrap().len(), 2);

        let doc = json!({"data": "scalar", "id": 4});
        assert_eq!(sample(&doc).unwrap()["id"], 4);

        let doc = json!([{"id": 5}]);
        assert_eq!(sample(&doc).unwrap()["id"], 5);
    }

    #[test]
    fn unusable_payloads_are_rejected() {
        assert!(sample(&json!({"data": []})).is_err());
        assert!(sample(&json!({"data": [1, 2]})).is_err());
        assert!(sample(&json!([])).is_err());
        assert!(sample(&json!("text")).is_err());
    }

    #[test]
    fn inputs_expand_globs_and_keep_literals() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        let pattern = dir.path().join("*.json").to_string_lossy().to_string();
        let literal = dir.path().join("missing.json").to_string_lossy().to_string();

        let paths = resolve_inputs([pattern, literal]).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("a.json"));
        assert!(paths[2].ends_with("missing.json"));

        assert!(load_documents(&paths[2], None).unwrap_err().is_not_found());
        assert_eq!(load_documents(&paths[0], None).unwrap(), [json!({})]);
    }

    #[test]
    fn jq_filter_splits_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");
        std::fs::write(&path, r#"{"items": [{"a": 1}, {"a": 2}]}"#).unwrap();
        let docs = load_documents(&path, Some(".items[]")).unwrap();
        assert_eq!(docs, [json!({"a": 1}), json!({"a": 2})]);
    }
}
