//! Runtime-value inference.
//!
//! Map one sampled value to a single annotation. This is a shallow guess:
//! - sequences sample their first element only; heterogeneity is not detected;
//! - mappings are `object` unless their keys are exactly `"0".."n-1"`, in
//!   which case they are read as a sequence;
//! - strings become `Date` when they have an exact date/time shape.
pub mod str;
pub mod obj;

use indexmap::IndexMap;

use crate::dialect::{Dialect, NullPolicy};
use crate::ir::{InferredType, RuntimeValue};

pub use str::is_date_string;

// ------------------------------- Front API -------------------------------- //

/// One inferencer per document, so the null policy stays consistent.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inferencer {
    dialect: Dialect,
    null_policy: NullPolicy,
}

impl Inferencer {
    pub fn new(dialect: Dialect, null_policy: NullPolicy) -> Self {
        Self { dialect, null_policy }
    }

    pub fn dialect(&self) -> Dialect { self.dialect }

    pub fn infer(&self, value: &RuntimeValue) -> InferredType {
        InferredType::new(self.annotate(value))
    }

    /// Per-key inference of a top-level mapping, in key order.
    pub fn infer_fields(&self, fields: &IndexMap<String, RuntimeValue>) -> Vec<(String, InferredType)> {
        fields.iter().map(|(k, v)| (k.clone(), self.infer(v))).collect()
    }

    fn annotate(&self, value: &RuntimeValue) -> String {
        let d = self.dialect;
        match value {
            RuntimeValue::Null => d.null_annotation(self.null_policy).to_string(),
            RuntimeValue::Bool(_) => d.boolean().to_string(),
            RuntimeValue::Integer(_) | RuntimeValue::Float(_) => d.number().to_string(),
            RuntimeValue::String(s) if is_date_string(s) => d.date().to_string(),
            RuntimeValue::String(_) => d.string().to_string(),
            RuntimeValue::Sequence(xs) => self.annotate_sequence(xs.first()),
            RuntimeValue::Mapping(m) => match obj::as_sequence(m) {
                Some(mut values) => self.annotate_sequence(values.next()),
                None => d.object().to_string(),
            },
        }
    }

    fn annotate_sequence(&self, first: Option<&RuntimeValue>) -> String {
        let elem = match first {
            None => self.dialect.unknown().to_string(),
            Some(v) => self.annotate(v),
        };
        self.dialect.array_of(&elem)
    }
}

/// Convenience: infer with the TypeScript dialect and the `null` policy.
pub fn infer(value: &RuntimeValue) -> InferredType {
    Inferencer::default().infer(value)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts(v: serde_json::Value) -> String {
        infer(&RuntimeValue::from(v)).into_string()
    }

    fn js(v: serde_json::Value) -> String {
        Inferencer::new(Dialect::JsDoc, NullPolicy::Null)
            .infer(&RuntimeValue::from(v))
            .into_string()
    }

    #[test]
    fn scalars() {
        assert_eq!(ts(json!(null)), "null");
        assert_eq!(ts(json!(true)), "boolean");
        assert_eq!(ts(json!(123)), "number");
        assert_eq!(ts(json!(1.5)), "number");
        assert_eq!(ts(json!("hello")), "string");
        assert_eq!(ts(json!("2025-06-29 10:30:00")), "Date");
    }

    #[test]
    fn null_policy_unknown_uses_sentinel() {
        let inf = Inferencer::new(Dialect::TypeScript, NullPolicy::Unknown);
        assert_eq!(inf.infer(&RuntimeValue::Null), "any");
        assert_eq!(inf.infer(&RuntimeValue::from(json!([null]))), "any[]");
        let inf = Inferencer::new(Dialect::JsDoc, NullPolicy::Unknown);
        assert_eq!(inf.infer(&RuntimeValue::Null), "*");
    }

    #[test]
    fn sequences_sample_first_element() {
        assert_eq!(ts(json!([])), "any[]");
        assert_eq!(ts(json!(["a", "b", "c"])), "string[]");
        assert_eq!(ts(json!([1, "mixed", true])), "number[]");
        assert_eq!(ts(json!([[1, 2], [3]])), "number[][]");
        assert_eq!(ts(json!([{"id": 1}])), "object[]");
    }

    #[test]
    fn mappings_are_objects_unless_index_keyed() {
        assert_eq!(ts(json!({"id": 1, "name": "x"})), "object");
        assert_eq!(ts(json!({"0": "a", "1": "b"})), "string[]");
        assert_eq!(ts(json!({"1": "a", "0": "b"})), "object");
        assert_eq!(ts(json!({"0": "a", "2": "b"})), "object");
        assert_eq!(ts(json!({})), "any[]");
    }

    #[test]
    fn jsdoc_spellings() {
        assert_eq!(js(json!([])), "Array<*>");
        assert_eq!(js(json!(["a"])), "Array<string>");
        assert_eq!(js(json!({"k": 1})), "Object");
        assert_eq!(js(json!("2025-06-29")), "Date");
    }

    #[test]
    fn field_inference_keeps_order() {
        let payload = RuntimeValue::from(json!({
            "id": 1,
            "name": "John Doe",
            "email": "john@example.com",
            "active": true,
            "created_at": "2025-06-29 10:30:00",
            "tags": ["admin", "user"],
            "meta": {"key": "value"},
        }));
        let RuntimeValue::Mapping(m) = payload else { unreachable!() };
        let fields = Inferencer::default().infer_fields(&m);
        let got: Vec<(&str, &str)> = fields.iter().map(|(k, t)| (k.as_str(), t.as_str())).collect();
        assert_eq!(got, [
            ("id", "number"),
            ("name", "string"),
            ("email", "string"),
            ("active", "boolean"),
            ("created_at", "Date"),
            ("tags", "string[]"),
            ("meta", "object"),
        ]);
    }
}
