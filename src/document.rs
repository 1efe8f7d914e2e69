//! Declaration file assembly.
//!
//! Every document carries three declarations: `{name}`, `{name}Collection`
//! and `{name}Response`. The collection wrapper spells out the pagination
//! `links` / `meta` shape inline so each file stands alone.
use std::collections::BTreeSet;
use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dialect::Dialect;
use crate::ir::InferredType;

pub const HEADER: &str = "// Auto-generated by api-typer";

// ------------------------- Pagination constants --------------------------- //

/// `(name, type, optional)`
const LINKS: &[(&str, &str, bool)] = &[
    ("first", "string", false),
    ("last", "string", false),
    ("prev", "string | null", false),
    ("next", "string | null", false),
];

const META: &[(&str, &str, bool)] = &[
    ("current_page", "number", false),
    ("last_page", "number", false),
    ("per_page", "number", false),
    ("total", "number", false),
    ("from", "number", true),
    ("to", "number", true),
];

static IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

// ------------------------------- Document --------------------------------- //

#[derive(Clone, Debug, Default)]
pub struct TypeDocument {
    pub name: String,
    pub fields: Vec<(String, InferredType)>,
    /// Emitted as a `// Source:` header line when set.
    pub source: Option<String>,
}

impl TypeDocument {
    pub fn new(name: impl Into<String>, fields: Vec<(String, InferredType)>) -> Self {
        Self { name: name.into(), fields, source: None }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Render with the current local time in the header.
    pub fn assemble(&self, dialect: Dialect, excluded: &BTreeSet<String>) -> String {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.assemble_at(dialect, excluded, &now)
    }

    pub fn assemble_at(&self, dialect: Dialect, excluded: &BTreeSet<String>, generated_at: &str) -> String {
        let fields: Vec<(&str, &str)> = self.fields.iter()
            .filter(|(name, _)| !excluded.contains(name))
            .map(|(name, ty)| (name.as_str(), ty.as_str()))
            .collect();

        let mut out = String::new();
        out.push_str(HEADER);
        out.push('\n');
        let _ = writeln!(out, "// Generated at: {generated_at}");
        if let Some(source) = &self.source {
            let _ = writeln!(out, "// Source: {source}");
        }
        out.push('\n');

        match dialect {
            Dialect::TypeScript => typescript(&mut out, &self.name, &fields),
            Dialect::JsDoc => jsdoc(&mut out, &self.name, &fields),
        }
        out
    }
}

// ------------------------------- TypeScript ------------------------------- //

fn typescript(out: &mut String, name: &str, fields: &[(&str, &str)]) {
    let _ = writeln!(out, "export interface {name} {{");
    for (field, ty) in fields {
        let _ = writeln!(out, "  {}: {ty};", property_key(field));
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "export interface {name}Collection {{");
    let _ = writeln!(out, "  data: {name}[];");
    ts_inline_object(out, "links", LINKS);
    ts_inline_object(out, "meta", META);
    out.push_str("}\n\n");

    let _ = writeln!(out, "export interface {name}Response {{");
    let _ = writeln!(out, "  data: {name};");
    out.push_str("}\n");
}

fn ts_inline_object(out: &mut String, key: &str, members: &[(&str, &str, bool)]) {
    let _ = writeln!(out, "  {key}?: {{");
    for (member, ty, optional) in members {
        let mark = if *optional { "?" } else { "" };
        let _ = writeln!(out, "    {member}{mark}: {ty};");
    }
    out.push_str("  };\n");
}

fn property_key(field: &str) -> String {
    if IDENT.is_match(field) {
        field.to_string()
    } else {
        serde_json::Value::from(field).to_string()
    }
}

// --------------------------------- JSDoc ---------------------------------- //

fn jsdoc(out: &mut String, name: &str, fields: &[(&str, &str)]) {
    out.push_str("/**\n");
    let _ = writeln!(out, " * @typedef {{Object}} {name}");
    for (field, ty) in fields {
        let _ = writeln!(out, " * @property {{{ty}}} {}", property_key(field));
    }
    out.push_str(" */\n\n");

    out.push_str("/**\n");
    let _ = writeln!(out, " * @typedef {{Object}} {name}Collection");
    let _ = writeln!(out, " * @property {{Array<{name}>}} data");
    jsdoc_nested(out, "links", LINKS);
    jsdoc_nested(out, "meta", META);
    out.push_str(" */\n\n");

    out.push_str("/**\n");
    let _ = writeln!(out, " * @typedef {{Object}} {name}Response");
    let _ = writeln!(out, " * @property {{{name}}} data");
    out.push_str(" */\n");
}

fn jsdoc_nested(out: &mut String, key: &str, members: &[(&str, &str, bool)]) {
    let _ = writeln!(out, " * @property {{Object}} [{key}]");
    for (member, ty, optional) in members {
        let ty = ty.replace(" | ", "|");
        if *optional {
            let _ = writeln!(out, " * @property {{{ty}}} [{key}.{member}]");
        } else {
            let _ = writeln!(out, " * @property {{{ty}}} {key}.{member}");
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
