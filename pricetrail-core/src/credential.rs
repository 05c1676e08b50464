//! API key loading.
//!
//! The RapidAPI key lives in a small local file (one token, default
//! `rapidapi.key`) so it never appears in the config file or on the command
//! line. A missing or empty key is reported before any request goes out —
//! nothing useful can happen without credentials.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read API key file {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("API key file {} is empty", path.display())]
    Empty { path: PathBuf },
}

/// Read the API key from `path`, trimming surrounding whitespace.
pub fn load_api_key(path: &Path) -> Result<String, CredentialError> {
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            CredentialError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            CredentialError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let key = raw.trim();
    if key.is_empty() {
        return Err(CredentialError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_trims_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rapidapi.key");
        fs::write(&path, "  abc123token\n").unwrap();
        assert_eq!(load_api_key(&path).unwrap(), "abc123token");
    }

    #[test]
    fn missing_file_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_api_key(&dir.path().join("nope.key")).unwrap_err();
        assert!(matches!(err, CredentialError::Missing { .. }));
    }

    #[test]
    fn whitespace_only_file_reports_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rapidapi.key");
        fs::write(&path, " \n\t\n").unwrap();
        let err = load_api_key(&path).unwrap_err();
        assert!(matches!(err, CredentialError::Empty { .. }));
    }

    #[test]
    fn error_display_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_api_key(&dir.path().join("nope.key")).unwrap_err();
        assert!(err.to_string().contains("nope.key"));
    }
}
