//! Declared-type → annotation tables, one per dialect.
//!
//! Tables are total: a declared type that is not listed maps to the dialect's
//! unknown sentinel. Lookup tries the declared name verbatim first, then its
//! normalized spelling (`VARCHAR(255)` → `varchar`, `int unsigned` → `int`).
use indexmap::IndexMap;

use crate::dialect::Dialect;

// ------------------------------- Defaults --------------------------------- //

const TS_DEFAULTS: &[(&str, &str)] = &[
    ("bigint", "number"),
    ("integer", "number"),
    ("int", "number"),
    ("mediumint", "number"),
    ("smallint", "number"),
    ("tinyint", "number"),
    ("float", "number"),
    ("double", "number"),
    ("real", "number"),
    ("decimal", "number"),
    ("numeric", "number"),
    ("year", "number"),
    ("string", "string"),
    ("varchar", "string"),
    ("char", "string"),
    ("text", "string"),
    ("tinytext", "string"),
    ("mediumtext", "string"),
    ("longtext", "string"),
    ("uuid", "string"),
    ("ulid", "string"),
    ("enum", "string"),
    ("binary", "string"),
    ("blob", "string"),
    ("date", "string"),
    ("datetime", "string"),
    ("datetimetz", "string"),
    ("timestamp", "string"),
    ("timestamptz", "string"),
    ("time", "string"),
    ("timetz", "string"),
    ("boolean", "boolean"),
    ("bool", "boolean"),
    ("json", "Record<string, any>"),
    ("jsonb", "Record<string, any>"),
];

// ------------------------------- Table ------------------------------------ //

#[derive(Clone, Debug)]
pub struct TypeMapping {
    dialect: Dialect,
    entries: IndexMap<String, String>,
    normalized: IndexMap<String, String>,
}

impl TypeMapping {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect, entries: IndexMap::new(), normalized: IndexMap::new() }
    }

    /// Built-in table for a dialect. The JSDoc table is the TypeScript one
    /// respelled with JSDoc names.
    pub fn builtin(dialect: Dialect) -> Self {
        let mut table = Self::new(dialect);
        for (declared, annotation) in TS_DEFAULTS {
            let annotation = match dialect {
                Dialect::TypeScript => (*annotation).to_string(),
                Dialect::JsDoc => to_jsdoc(annotation),
            };
            table.insert(*declared, annotation);
        }
        table
    }

    /// Built-in table with user entries layered on top. Existing keys keep
    /// their position; new keys are appended.
    pub fn with_overrides<'a, I>(dialect: Dialect, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut table = Self::builtin(dialect);
        for (declared, annotation) in overrides {
            table.insert(declared.clone(), annotation.clone());
        }
        table
    }

    pub fn insert(&mut self, declared: impl Into<String>, annotation: impl Into<String>) {
        let declared = declared.into();
        let annotation = annotation.into();
        self.normalized.insert(normalize(&declared), annotation.clone());
        self.entries.insert(declared, annotation);
    }

    pub fn dialect(&self) -> Dialect { self.dialect }

    pub fn get(&self, declared: &str) -> Option<&str> {
        self.entries.get(declared)
            .or_else(|| self.normalized.get(&normalize(declared)))
            .map(String::as_str)
    }

    /// Total lookup.
    pub fn lookup(&self, declared: &str) -> &str {
        self.get(declared).unwrap_or(self.dialect.unknown())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

// ------------------------------- Helpers ---------------------------------- //

fn normalize(declared: &str) -> String {
    let lower = declared.trim().to_ascii_lowercase();
    let base = lower.split('(').next().unwrap_or_default();
    let base = base.split_whitespace().next().unwrap_or_default();
    base.to_string()
}

fn to_jsdoc(annotation: &str) -> String {
    match annotation {
        "any" => "*".to_string(),
        "Record<string, any>" | "object" => "Object".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_entry_resolves_to_itself() {
        let table = TypeMapping::builtin(Dialect::TypeScript);
        for (declared, annotation) in TS_DEFAULTS {
            assert_eq!(table.lookup(declared), *annotation, "{declared}");
        }
    }

    #[test]
    fn unknown_types_fall_back_to_sentinel() {
        assert_eq!(TypeMapping::builtin(Dialect::TypeScript).lookup("geometry"), "any");
        assert_eq!(TypeMapping::builtin(Dialect::JsDoc).lookup("geometry"), "*");
        assert_eq!(TypeMapping::new(Dialect::TypeScript).lookup(""), "any");
    }

    #[test]
    fn normalized_spellings_match() {
        let table = TypeMapping::builtin(Dialect::TypeScript);
        assert_eq!(table.lookup("VARCHAR(255)"), "string");
        assert_eq!(table.lookup("int unsigned"), "number");
        assert_eq!(table.lookup("  Boolean "), "boolean");
    }

    #[test]
    fn overrides_replace_in_place_and_append_new_keys() {
        let mut user = IndexMap::new();
        user.insert("json".to_string(), "unknown".to_string());
        user.insert("point".to_string(), "[number, number]".to_string());
        let table = TypeMapping::with_overrides(Dialect::TypeScript, &user);
        assert_eq!(table.lookup("json"), "unknown");
        assert_eq!(table.lookup("point"), "[number, number]");
        assert_eq!(table.len(), TS_DEFAULTS.len() + 1);
        assert_eq!(table.iter().last(), Some(("point", "[number, number]")));
    }

    #[test]
    fn jsdoc_table_uses_jsdoc_spellings() {
        let table = TypeMapping::builtin(Dialect::JsDoc);
        assert_eq!(table.lookup("json"), "Object");
        assert_eq!(table.lookup("bigint"), "number");
    }
}
