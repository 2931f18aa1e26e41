//! Domain primitive types used across the pinimg workspace.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::constants::{
    CONTAINERS_STORAGE_TRANSPORT, DIGEST_PATTERN, DIGEST_PREFIX, DOCKER_TRANSPORT,
};
use crate::error::ValidationError;

#[allow(clippy::expect_used)]
static DIGEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DIGEST_PATTERN).expect("digest pattern is a valid regex"));

/// Returns true if `s` is exactly `sha256:` followed by 64 lowercase hex digits.
#[must_use]
pub fn is_digest(s: &str) -> bool {
    DIGEST_RE.is_match(s)
}

/// Content-addressed identifier of the form `sha256:<64 lowercase hex>`.
///
/// A `Digest` can only be obtained through validation or by hashing content,
/// so holding one proves the string is well formed. It serializes as the
/// plain string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Validates a digest string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDigestFormat`] if the string is not
    /// `sha256:` followed by exactly 64 lowercase hex characters. Uppercase
    /// hex, other algorithms and surrounding text are all rejected.
    pub fn parse(s: impl Into<String>) -> Result<Self, ValidationError> {
        let s = s.into();
        if is_digest(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidDigestFormat { value: s })
        }
    }

    /// Validates a string used as a catalog reference key.
    ///
    /// Same rule as [`Digest::parse`], reported as
    /// [`ValidationError::InvalidReferenceKey`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidReferenceKey`] if the key is not a
    /// well-formed digest (for example a `name:tag` reference).
    pub fn parse_reference_key(s: impl Into<String>) -> Result<Self, ValidationError> {
        Self::parse(s).map_err(|err| ValidationError::InvalidReferenceKey {
            value: err.value().to_owned(),
        })
    }

    /// Computes the SHA-256 digest of raw content.
    ///
    /// ```
    /// # use pinimg_common::types::Digest;
    /// let digest = Digest::from_content(b"cat");
    /// assert_eq!(digest.as_str(), "sha256:77af778b51abd4a3c51c5ddd97204a9c3ae614ebccb75a606c3b6865aed6744e");
    /// ```
    #[must_use]
    pub fn from_content(content: &[u8]) -> Self {
        Self(format!("{DIGEST_PREFIX}{:x}", Sha256::digest(content)))
    }

    /// Returns the full `sha256:<hex>` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hex portion after the `sha256:` prefix.
    #[must_use]
    pub fn hex(&self) -> &str {
        &self.0[DIGEST_PREFIX.len()..]
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Digest {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// Mechanism the downstream fetcher uses to obtain an image.
///
/// Leaving the transport unset means "use the fetcher's default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transport {
    /// Remote registry (`docker`).
    Docker,
    /// Local containers-storage (`containers-storage`).
    ContainersStorage,
}

impl Transport {
    /// Every accepted transport.
    pub const ALL: [Self; 2] = [Self::Docker, Self::ContainersStorage];

    /// Returns the wire name of this transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Docker => DOCKER_TRANSPORT,
            Self::ContainersStorage => CONTAINERS_STORAGE_TRANSPORT,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transport {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidTransport {
                value: s.to_owned(),
            })
    }
}
