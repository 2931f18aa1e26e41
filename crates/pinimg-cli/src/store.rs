//! Reading catalogs and entry request lists from disk.

use std::path::Path;

use anyhow::Context;
use pinimg_common::error::PinimgError;
use pinimg_source::{EntryRequest, SourceCatalog};

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        PinimgError::Io {
            path: path.to_path_buf(),
            source: e,
        }
        .into()
    })
}

/// Loads and validates a catalog file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any entry breaks a
/// catalog rule.
pub fn load_catalog(path: &Path) -> anyhow::Result<SourceCatalog> {
    tracing::debug!(path = %path.display(), "loading catalog");
    let content = read(path)?;
    let catalog = serde_json::from_str(&content)
        .map_err(PinimgError::from)
        .with_context(|| format!("invalid catalog {}", path.display()))?;
    Ok(catalog)
}

/// Loads a catalog file, or an empty catalog if the file does not exist.
///
/// # Errors
///
/// Returns an error if an existing file cannot be loaded.
pub fn load_or_new(path: &Path) -> anyhow::Result<SourceCatalog> {
    if path.exists() {
        load_catalog(path)
    } else {
        tracing::info!(path = %path.display(), "catalog not found, starting empty");
        Ok(SourceCatalog::new())
    }
}

/// Loads a list of entry requests. Files ending in `.json` are parsed as
/// JSON, anything else as YAML.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_requests(path: &Path) -> anyhow::Result<Vec<EntryRequest>> {
    tracing::debug!(path = %path.display(), "loading entry requests");
    let content = read(path)?;
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let requests = if is_json {
        serde_json::from_str(&content).map_err(anyhow::Error::from)
    } else {
        serde_yaml::from_str(&content).map_err(anyhow::Error::from)
    };
    requests.with_context(|| format!("invalid entry list {}", path.display()))
}
