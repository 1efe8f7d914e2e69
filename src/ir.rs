// Strongly-typed inputs and outputs of the engine. No serde_json::Value past `From`.

use std::fmt;
use indexmap::IndexMap;
use serde_json::Value;

// ------------------------------ Inputs ------------------------------------ //

/// An untyped runtime value, as produced by a JSON response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<RuntimeValue>),
    Mapping(IndexMap<String, RuntimeValue>), // insertion order preserved
}

impl From<Value> for RuntimeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                // u64 above i64::MAX and real floats both land here
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Array(xs) => Self::Sequence(xs.into_iter().map(Self::from).collect()),
            Value::Object(m) => Self::Mapping(
                m.into_iter().map(|(k, v)| (k, Self::from(v))).collect()
            ),
        }
    }
}

impl From<&Value> for RuntimeValue {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

/// One column as reported by a schema source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub declared_type: String,
    pub nullable: bool,
    pub is_enum: bool,
    pub is_decimal: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self { name: name.into(), declared_type: declared_type.into(), ..Self::default() }
    }
    #[must_use]
    pub fn nullable(mut self, yes: bool) -> Self { self.nullable = yes; self }
    #[must_use]
    pub fn enumeration(mut self, yes: bool) -> Self { self.is_enum = yes; self }
    #[must_use]
    pub fn decimal(mut self, yes: bool) -> Self { self.is_decimal = yes; self }
}

// ------------------------------ Output ------------------------------------ //

/// A target-language annotation such as `number`, `string | null` or `Foo[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InferredType(String);

impl InferredType {
    pub fn new(annotation: impl Into<String>) -> Self { Self(annotation.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
    pub fn into_string(self) -> String { self.0 }
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InferredType {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl From<String> for InferredType {
    fn from(s: String) -> Self { Self(s) }
}

impl PartialEq<&str> for InferredType {
    fn eq(&self, other: &&str) -> bool { self.0 == *other }
}

impl PartialEq<str> for InferredType {
    fn eq(&self, other: &str) -> bool { self.0 == other }
}
