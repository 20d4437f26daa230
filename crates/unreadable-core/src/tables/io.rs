use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::{LanguageMap, TableError};

/// Persisting a generated map failed.
#[derive(Debug, thiserror::Error)]
#[error("saving {} failed: {source}", path.display())]
pub struct SaveError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Read and deserialize one JSON resource.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, TableError> {
    let name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| TableError::Io {
        name: name.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| TableError::Json { name, source })
}

pub fn load_language_map(path: &Path) -> Result<LanguageMap, TableError> {
    load_json(path)
}

/// Write `map` as pretty JSON (two-space indent, non-ASCII kept literal,
/// trailing newline).
///
/// Atomic write: write to .tmp then rename.
pub fn save_language_map(path: &Path, map: &LanguageMap) -> Result<(), SaveError> {
    let wrap = |source: io::Error| SaveError {
        path: path.to_path_buf(),
        source,
    };

    let mut body = serde_json::to_string_pretty(map).map_err(|e| wrap(io::Error::other(e)))?;
    body.push('\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, body.as_bytes()).map_err(wrap)?;
    fs::rename(&tmp, path).map_err(wrap)?;
    Ok(())
}
