//! `pinimg validate` - Check a catalog file against every catalog rule.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the `validate` command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog file to check.
    #[arg(default_value = "sources.json")]
    pub file: PathBuf,
}

/// Executes the `validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any entry is invalid.
pub fn execute(args: &ValidateArgs) -> anyhow::Result<()> {
    tracing::info!(path = %args.file.display(), "validating catalog");
    let catalog = crate::store::load_catalog(&args.file)?;
    crate::output::line(&format!(
        "{}: valid, {} entries",
        args.file.display(),
        catalog.len()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_uppercase_digest() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("sources.json");
        let key = format!("sha256:{}", "a".repeat(64));
        let json = format!(
            r#"{{"items":{{"{key}":{{"image":{{"name":"redis","digest":"sha256:{}"}}}}}}}}"#,
            "A".repeat(64)
        );
        std::fs::write(&path, json).expect("failed to write");

        assert!(execute(&ValidateArgs { file: path }).is_err());
    }

    #[test]
    fn validate_missing_file_fails() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let file = dir.path().join("missing.json");
        assert!(execute(&ValidateArgs { file }).is_err());
    }
}
