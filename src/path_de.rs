use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Error;

/// Deserialize a JSON file, reporting the JSON path of the first bad node.
pub fn from_file_with_path<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let bytes = std::fs::read(path).map_err(|source| Error::io(path, source))?;
    from_slice_with_path(&bytes).map_err(|detail| Error::Malformed {
        path: path.to_path_buf(),
        detail,
    })
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}
