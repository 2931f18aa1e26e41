//! Output helpers for CLI commands.
//!
//! JSON documents go to a file or to stdout; human-readable reports go to
//! stderr so they never mix with piped JSON.

use std::io::Write;
use std::path::Path;

use pinimg_common::error::PinimgError;
use pinimg_source::Rejection;
use serde::Serialize;

/// Writes `value` as pretty JSON to `path`, or to stdout if `path` is `None`.
///
/// A file is written to a temporary sibling and renamed over `path`, so a
/// failed write never leaves a truncated catalog behind.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json<T: Serialize>(path: Option<&Path>, value: &T) -> anyhow::Result<()> {
    let mut json = serde_json::to_string_pretty(value).map_err(PinimgError::from)?;
    json.push('\n');
    match path {
        Some(path) => {
            write_atomic(path, json.as_bytes())?;
            tracing::info!(path = %path.display(), "wrote catalog");
        }
        None => std::io::stdout().lock().write_all(json.as_bytes())?,
    }
    Ok(())
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<(), PinimgError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let io_err = |source| PinimgError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    file.write_all(content).map_err(io_err)?;
    file.as_file().sync_all().map_err(io_err)?;
    let _ = file.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}

/// Writes one line to stdout.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn line(text: &str) -> anyhow::Result<()> {
    writeln!(std::io::stdout().lock(), "{text}")?;
    Ok(())
}

/// Formats a rejected batch entry for the terminal.
#[must_use]
pub fn format_rejection(rejection: &Rejection) -> String {
    format!(
        "entry #{} (key {:?}): {}: {}",
        rejection.index,
        rejection.key,
        rejection.error.field(),
        rejection.error
    )
}

/// Writes every rejection to stderr, one per line.
///
/// # Errors
///
/// Returns an error if stderr is closed.
pub fn report_rejections(rejections: &[Rejection]) -> anyhow::Result<()> {
    let mut stderr = std::io::stderr().lock();
    for rejection in rejections {
        writeln!(stderr, "{}", format_rejection(rejection))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pinimg_source::ValidationError;

    use super::*;

    #[test]
    fn format_rejection_names_index_key_and_field() {
        let rejection = Rejection {
            index: 3,
            key: "nginx:latest".into(),
            error: ValidationError::InvalidReferenceKey {
                value: "nginx:latest".into(),
            },
        };
        let text = format_rejection(&rejection);
        assert!(text.starts_with("entry #3 (key \"nginx:latest\"): key: "), "got: {text}");
    }

    #[test]
    fn write_json_to_file_ends_with_newline() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("out.json");
        write_json(Some(&path), &serde_json::json!({"items": {}})).expect("write failed");
        let content = std::fs::read_to_string(&path).expect("read failed");
        assert_eq!(content, "{\n  \"items\": {}\n}\n");
    }

    #[test]
    fn write_json_replaces_existing_file_without_leftovers() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("sources.json");
        std::fs::write(&path, "a much longer previous catalog body that must not survive")
            .expect("failed to write");

        write_json(Some(&path), &serde_json::json!({"items": {}})).expect("write failed");

        let content = std::fs::read_to_string(&path).expect("read failed");
        assert_eq!(content, "{\n  \"items\": {}\n}\n");
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read_dir failed")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("sources.json")]);
    }

    #[test]
    fn write_json_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("missing").join("sources.json");
        let err = write_json(Some(&path), &serde_json::json!({})).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PinimgError>(),
            Some(PinimgError::Io { .. })
        ));
        assert!(!path.exists());
    }
}
