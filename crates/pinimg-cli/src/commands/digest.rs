//! `pinimg digest` - Print the sha256 digest of a file.

use std::path::PathBuf;

use clap::Args;
use pinimg_common::error::PinimgError;
use pinimg_common::types::Digest;

/// Arguments for the `digest` command.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// File to hash, typically an image manifest or config blob.
    pub file: PathBuf,
}

/// Computes the digest of the file's content.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn digest_file(args: &DigestArgs) -> anyhow::Result<Digest> {
    let content = std::fs::read(&args.file).map_err(|e| PinimgError::Io {
        path: args.file.clone(),
        source: e,
    })?;
    tracing::debug!(path = %args.file.display(), bytes = content.len(), "hashing file");
    Ok(Digest::from_content(&content))
}

/// Executes the `digest` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn execute(args: &DigestArgs) -> anyhow::Result<()> {
    let digest = digest_file(args)?;
    crate::output::line(digest.as_str())
}
