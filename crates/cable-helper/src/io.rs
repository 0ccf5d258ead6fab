//! JSON and text file helpers.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::HelperError;

/// Read and parse a JSON file.
///
/// # Errors
///
/// Returns [`HelperError::Read`] if the file cannot be read and
/// [`HelperError::Parse`] if its contents do not decode as `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, HelperError> {
    let text = fs::read_to_string(path).map_err(|source| HelperError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| HelperError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `contents` to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns [`HelperError::Write`] if a directory or the file cannot be
/// created.
pub fn write_text(path: &Path, contents: &str) -> Result<(), HelperError> {
    let write_err = |source| HelperError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}

/// Pretty-print `value` as JSON into `path`.
///
/// # Errors
///
/// Returns [`HelperError::Serialize`] if encoding fails, otherwise
/// whatever [`write_text`] returns.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), HelperError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    write_text(path, &text)
}
