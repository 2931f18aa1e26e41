//! Unified error types for the pinimg workspace.
//!
//! [`ValidationError`] is the catalog rule taxonomy: every variant names the
//! violated rule and carries the offending value. [`PinimgError`] wraps it
//! together with the I/O and serialization failures of the outer layers.

use std::path::PathBuf;

use thiserror::Error;

/// A catalog entry was rejected because one of its inputs broke a rule.
///
/// All variants are caller-input errors. They are deterministic and never
/// worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The image name is the empty string.
    #[error("image name must not be empty (digest {digest:?})")]
    EmptyName {
        /// Digest supplied alongside the empty name, to locate the entry.
        digest: String,
    },

    /// A digest field does not match `sha256:[0-9a-f]{64}`.
    #[error("invalid digest {value:?}: expected \"sha256:\" followed by 64 lowercase hex characters")]
    InvalidDigestFormat {
        /// The rejected digest string.
        value: String,
    },

    /// The transport is not one of `docker` or `containers-storage`.
    #[error("invalid containers transport {value:?}: expected \"docker\" or \"containers-storage\"")]
    InvalidTransport {
        /// The rejected transport string.
        value: String,
    },

    /// The catalog key is not a well-formed digest.
    #[error("invalid image reference key {value:?}: keys must be sha256 digests, not tags")]
    InvalidReferenceKey {
        /// The rejected key.
        value: String,
    },
}

impl ValidationError {
    /// Wire name of the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName { .. } => "name",
            Self::InvalidDigestFormat { .. } => "digest",
            Self::InvalidTransport { .. } => "containers-transport",
            Self::InvalidReferenceKey { .. } => "key",
        }
    }

    /// The offending input value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::EmptyName { .. } => "",
            Self::InvalidDigestFormat { value }
            | Self::InvalidTransport { value }
            | Self::InvalidReferenceKey { value } => value,
        }
    }
}

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum PinimgError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A catalog entry failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A batch of entry requests contained rejected entries.
    #[error("{rejected} of {total} catalog entries were rejected")]
    InvalidEntries {
        /// Number of rejected requests.
        rejected: usize,
        /// Number of requests in the batch.
        total: usize,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PinimgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_message_echoes_value() {
        let err = ValidationError::InvalidReferenceKey {
            value: "redis:latest".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"redis:latest\""), "got: {msg}");
        assert_eq!(err.field(), "key");
        assert_eq!(err.value(), "redis:latest");
    }

    #[test]
    fn empty_name_message_locates_entry_by_digest() {
        let err = ValidationError::EmptyName {
            digest: "sha256:abc".into(),
        };
        assert!(err.to_string().contains("sha256:abc"));
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn pinimg_error_wraps_validation_transparently() {
        let inner = ValidationError::InvalidTransport {
            value: "bogus".into(),
        };
        let err = PinimgError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
