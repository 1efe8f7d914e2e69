//! Output dialects and the primitive annotations each one spells.
use serde::{Deserialize, Serialize};

/// Which declaration syntax to emit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum Dialect {
    /// TypeScript interfaces (`.ts`)
    #[default]
    #[serde(rename = "ts")]
    #[value(name = "ts")]
    TypeScript,
    /// JSDoc typedef comments (`.js`)
    #[serde(rename = "js")]
    #[value(name = "js")]
    JsDoc,
}

/// What a `null` runtime value turns into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullPolicy {
    /// the dialect's `null` annotation
    #[default]
    Null,
    /// the dialect's unknown sentinel
    Unknown,
}

impl Dialect {
    pub fn extension(self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::JsDoc => "js",
        }
    }

    /// Fallback when nothing better is known.
    pub fn unknown(self) -> &'static str {
        match self {
            Self::TypeScript => "any",
            Self::JsDoc => "*",
        }
    }

    pub fn number(self) -> &'static str { "number" }
    pub fn string(self) -> &'static str { "string" }
    pub fn boolean(self) -> &'static str { "boolean" }
    pub fn date(self) -> &'static str { "Date" }
    pub fn null(self) -> &'static str { "null" }

    pub fn object(self) -> &'static str {
        match self {
            Self::TypeScript => "object",
            Self::JsDoc => "Object",
        }
    }

    pub fn array_of(self, elem: &str) -> String {
        match self {
            Self::TypeScript if elem.contains('|') || elem.contains(' ') => format!("({elem})[]"),
            Self::TypeScript => format!("{elem}[]"),
            Self::JsDoc => format!("Array<{elem}>"),
        }
    }

    /// Base type widened with an absent marker. JSDoc has no enforced
    /// nullability, so the base is returned as is.
    pub fn nullable(self, base: &str) -> String {
        match self {
            Self::TypeScript => format!("{base} | null"),
            Self::JsDoc => base.to_string(),
        }
    }

    pub fn null_annotation(self, policy: NullPolicy) -> &'static str {
        match policy {
            NullPolicy::Null => self.null(),
            NullPolicy::Unknown => self.unknown(),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
