//! Image descriptors and the catalog entries that wrap them.
//!
//! A descriptor names one image by digest plus optional fetch hints. It can
//! only be created through [`ImageDescriptor::build`] (or by deserializing,
//! which runs the same checks), so every value of this type satisfies the
//! catalog rules.

use pinimg_common::error::ValidationError;
use pinimg_common::types::{Digest, Transport};
use serde::{Deserialize, Serialize};

/// Optional hints for a descriptor, as supplied by the caller.
///
/// `None` means "unset" and is distinct from any concrete value, including
/// `Some(false)` and `Some(String::new())`. The transport is kept as a raw
/// string here; it is checked against the allowed set when the descriptor is
/// built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageOptions {
    /// TLS verification policy (unset = fetcher default).
    pub tls_verify: Option<bool>,
    /// Transport wire name (unset = fetcher default).
    pub transport: Option<String>,
    /// Storage location, passed through untouched.
    pub storage_location: Option<String>,
}

impl ImageOptions {
    /// Creates options with every hint unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the TLS verification policy.
    #[must_use]
    pub const fn tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = Some(verify);
        self
    }

    /// Sets the transport.
    #[must_use]
    pub fn transport(mut self, transport: impl Into<String>) -> Self {
        self.transport = Some(transport.into());
        self
    }

    /// Sets the storage location.
    #[must_use]
    pub fn storage_location(mut self, location: impl Into<String>) -> Self {
        self.storage_location = Some(location.into());
        self
    }
}

/// A validated reference to one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "RawImage")]
pub struct ImageDescriptor {
    name: String,
    digest: Digest,
    #[serde(skip_serializing_if = "Option::is_none")]
    tls_verify: Option<bool>,
    #[serde(rename = "containers-transport", skip_serializing_if = "Option::is_none")]
    transport: Option<Transport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage_location: Option<String>,
}

impl ImageDescriptor {
    /// Builds a descriptor, checking name, then digest, then transport.
    ///
    /// # Errors
    ///
    /// Returns the first rule violated:
    /// - [`ValidationError::EmptyName`] if `name` is empty,
    /// - [`ValidationError::InvalidDigestFormat`] if `digest` is not a sha256 digest,
    /// - [`ValidationError::InvalidTransport`] if a transport is set and unknown.
    pub fn build(name: &str, digest: &str, options: &ImageOptions) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName {
                digest: digest.to_owned(),
            });
        }
        let digest = Digest::parse(digest)?;
        let transport = options
            .transport
            .as_deref()
            .map(str::parse::<Transport>)
            .transpose()?;

        Ok(Self {
            name: name.to_owned(),
            digest,
            tls_verify: options.tls_verify,
            transport,
            storage_location: options.storage_location.clone(),
        })
    }

    /// Image name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image digest.
    #[must_use]
    pub const fn digest(&self) -> &Digest {
        &self.digest
    }

    /// TLS verification policy, if set.
    #[must_use]
    pub const fn tls_verify(&self) -> Option<bool> {
        self.tls_verify
    }

    /// Transport, if set.
    #[must_use]
    pub const fn transport(&self) -> Option<Transport> {
        self.transport
    }

    /// Storage location, if set.
    #[must_use]
    pub fn storage_location(&self) -> Option<&str> {
        self.storage_location.as_deref()
    }
}

/// Wire shape of a descriptor before validation. Unknown fields are
/// rejected so a misspelled hint cannot be dropped silently.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawImage {
    #[serde(default)]
    name: String,
    #[serde(default)]
    digest: String,
    tls_verify: Option<bool>,
    containers_transport: Option<String>,
    storage_location: Option<String>,
}

impl TryFrom<RawImage> for ImageDescriptor {
    type Error = ValidationError;

    fn try_from(raw: RawImage) -> Result<Self, Self::Error> {
        let options = ImageOptions {
            tls_verify: raw.tls_verify,
            transport: raw.containers_transport,
            storage_location: raw.storage_location,
        };
        Self::build(&raw.name, &raw.digest, &options)
    }
}

/// One catalog item: a descriptor under the `image` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    image: ImageDescriptor,
}

impl CatalogEntry {
    /// Wraps an already validated descriptor.
    #[must_use]
    pub const fn new(image: ImageDescriptor) -> Self {
        Self { image }
    }

    /// Builds the descriptor and wraps it.
    ///
    /// # Errors
    ///
    /// Same as [`ImageDescriptor::build`].
    pub fn build(name: &str, digest: &str, options: &ImageOptions) -> Result<Self, ValidationError> {
        ImageDescriptor::build(name, digest, options).map(Self::new)
    }

    /// The wrapped descriptor.
    #[must_use]
    pub const fn image(&self) -> &ImageDescriptor {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_a() -> String {
        format!("sha256:{}", "a".repeat(64))
    }

    #[test]
    fn build_valid_descriptor_keeps_inputs() {
        let options = ImageOptions::new()
            .tls_verify(false)
            .transport("containers-storage")
            .storage_location("/var/lib/containers/storage");
        let desc = ImageDescriptor::build("redis", &digest_a(), &options).expect("valid");

        assert_eq!(desc.name(), "redis");
        assert_eq!(desc.digest().as_str(), digest_a());
        assert_eq!(desc.tls_verify(), Some(false));
        assert_eq!(desc.transport(), Some(Transport::ContainersStorage));
        assert_eq!(desc.storage_location(), Some("/var/lib/containers/storage"));
    }

    #[test]
    fn build_without_options_leaves_hints_unset() {
        let desc = ImageDescriptor::build("redis", &digest_a(), &ImageOptions::new())
            .expect("valid");
        assert_eq!(desc.tls_verify(), None);
        assert_eq!(desc.transport(), None);
        assert_eq!(desc.storage_location(), None);
    }

    #[test]
    fn build_empty_name_fails_before_digest_check() {
        let err = ImageDescriptor::build("", "not-a-digest", &ImageOptions::new()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyName {
                digest: "not-a-digest".into()
            }
        );
    }

    #[test]
    fn build_bad_digest_fails_before_transport_check() {
        let options = ImageOptions::new().transport("bogus");
        let err = ImageDescriptor::build("redis", "sha256:abc", &options).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDigestFormat { .. }));
    }

    #[test]
    fn build_unknown_transport_fails() {
        let options = ImageOptions::new().transport("bogus");
        let err = ImageDescriptor::build("redis", &digest_a(), &options).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidTransport {
                value: "bogus".into()
            }
        );
    }

    #[test]
    fn empty_storage_location_is_kept_distinct_from_unset() {
        let options = ImageOptions::new().storage_location("");
        let desc = ImageDescriptor::build("redis", &digest_a(), &options).expect("valid");
        assert_eq!(desc.storage_location(), Some(""));

        let json = serde_json::to_value(&desc).expect("serialize");
        assert_eq!(json["storage-location"], "");
    }

    #[test]
    fn serialize_omits_unset_fields() {
        let entry = CatalogEntry::build("redis", &digest_a(), &ImageOptions::new()).expect("valid");
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(
            json,
            format!(r#"{{"image":{{"name":"redis","digest":"{}"}}}}"#, digest_a())
        );
    }

    #[test]
    fn serialize_uses_hyphenated_field_names() {
        let options = ImageOptions::new()
            .tls_verify(true)
            .transport("docker")
            .storage_location("/srv");
        let desc = ImageDescriptor::build("redis", &digest_a(), &options).expect("valid");
        let json = serde_json::to_value(&desc).expect("serialize");

        assert_eq!(json["tls-verify"], true);
        assert_eq!(json["containers-transport"], "docker");
        assert_eq!(json["storage-location"], "/srv");
    }

    #[test]
    fn deserialize_runs_validation() {
        let bad = r#"{"image":{"name":"redis","digest":"sha256:abc"}}"#;
        let err = serde_json::from_str::<CatalogEntry>(bad).unwrap_err();
        assert!(err.to_string().contains("invalid digest"), "got: {err}");

        let missing_name = format!(r#"{{"image":{{"digest":"{}"}}}}"#, digest_a());
        let err = serde_json::from_str::<CatalogEntry>(&missing_name).unwrap_err();
        assert!(err.to_string().contains("must not be empty"), "got: {err}");
    }

    #[test]
    fn deserialize_rejects_unknown_transport() {
        let json = format!(
            r#"{{"image":{{"name":"redis","digest":"{}","containers-transport":"oci"}}}}"#,
            digest_a()
        );
        let err = serde_json::from_str::<CatalogEntry>(&json).unwrap_err();
        assert!(err.to_string().contains("\"oci\""), "got: {err}");
    }

    #[test]
    fn deserialize_rejects_misspelled_hint() {
        let json = format!(
            r#"{{"image":{{"name":"redis","digest":"{}","containers_transport":"bogus"}}}}"#,
            digest_a()
        );
        let err = serde_json::from_str::<CatalogEntry>(&json).unwrap_err();
        assert!(err.to_string().contains("containers_transport"), "got: {err}");
    }
}
