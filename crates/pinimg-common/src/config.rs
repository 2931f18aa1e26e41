//! Defaults applied to catalog entries that leave optional fields unset.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PinimgError, Result};
use crate::types::Transport;

/// Per-entry defaults for the optional image hints.
///
/// Every field is itself optional: a defaults file only needs to name the
/// hints it wants to fill in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CatalogDefaults {
    /// TLS verification policy for entries that do not set one.
    #[serde(default)]
    pub tls_verify: Option<bool>,
    /// Transport for entries that do not set one.
    #[serde(default, rename = "containers-transport")]
    pub transport: Option<Transport>,
    /// Storage location for entries that do not set one.
    #[serde(default)]
    pub storage_location: Option<String>,
}

impl CatalogDefaults {
    /// Loads defaults from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// defaults document.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PinimgError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| PinimgError::Config {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Returns true if no default is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tls_verify.is_none() && self.transport.is_none() && self.storage_location.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_partial_defaults_file() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("defaults.json");
        std::fs::write(&path, r#"{"containers-transport": "containers-storage"}"#)
            .expect("failed to write");

        let defaults = CatalogDefaults::load(&path).expect("load failed");
        assert_eq!(defaults.transport, Some(Transport::ContainersStorage));
        assert_eq!(defaults.tls_verify, None);
        assert!(!defaults.is_empty());
    }

    #[test]
    fn load_rejects_unknown_transport() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("defaults.json");
        std::fs::write(&path, r#"{"containers-transport": "oci"}"#).expect("failed to write");

        let err = CatalogDefaults::load(&path).unwrap_err();
        assert!(matches!(err, PinimgError::Config { .. }), "got: {err}");
    }

    #[test]
    fn load_missing_file_returns_io_error() {
        let err = CatalogDefaults::load(Path::new("/nonexistent/defaults.json")).unwrap_err();
        assert!(matches!(err, PinimgError::Io { .. }));
    }

    #[test]
    fn default_is_empty() {
        assert!(CatalogDefaults::default().is_empty());
    }
}
