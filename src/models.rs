//! Model manifests: `{models_path}/{Model}.json`, optionally naming the table.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, SourceKind};
use crate::naming::default_table_name;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ModelManifest {
    pub table: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Model {
    pub name: String,
    pub table: String,
    pub manifest_path: PathBuf,
}

/// Model names in a directory, sorted, taken from `*.json` file stems.
pub fn discover(models_path: &Path) -> Result<Vec<String>, Error> {
    if !models_path.is_dir() {
        return Err(Error::not_found(SourceKind::Directory, models_path.display().to_string()));
    }
    let pattern = models_path.join("*.json").to_string_lossy().to_string();
    let entries = glob::glob(&pattern).map_err(|source| Error::Pattern {
        pattern: pattern.clone(),
        source,
    })?;
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
        .collect();
    names.sort();
    Ok(names)
}

/// Load one model. An empty manifest file is allowed.
pub fn load(models_path: &Path, name: &str) -> Result<Model, Error> {
    let manifest_path = models_path.join(format!("{name}.json"));
    if !manifest_path.is_file() {
        return Err(Error::not_found(SourceKind::Model, name));
    }
    let bytes = std::fs::read(&manifest_path).map_err(|e| Error::io(&manifest_path, e))?;
    let manifest: ModelManifest = if bytes.iter().all(u8::is_ascii_whitespace) {
        ModelManifest::default()
    } else {
        crate::path_de::from_slice_with_path(&bytes).map_err(|detail| Error::Malformed {
            path: manifest_path.clone(),
            detail,
        })?
    };
    let table = manifest.table.unwrap_or_else(|| default_table_name(name));
    Ok(Model { name: name.to_string(), table, manifest_path })
}
