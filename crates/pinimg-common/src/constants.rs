//! Wire-format constants and application names.

/// Prefix every digest string starts with.
pub const DIGEST_PREFIX: &str = "sha256:";

/// SHA-256 digest length in hex characters.
pub const SHA256_HEX_LENGTH: usize = 64;

/// Anchored pattern a digest string must match in full.
pub const DIGEST_PATTERN: &str = "^sha256:[0-9a-f]{64}$";

/// Wire name of the registry transport.
pub const DOCKER_TRANSPORT: &str = "docker";

/// Wire name of the local containers-storage transport.
pub const CONTAINERS_STORAGE_TRANSPORT: &str = "containers-storage";

/// Source type name under which the catalog is embedded in a build manifest.
pub const SKOPEO_SOURCE_NAME: &str = "org.osbuild.skopeo";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "pinimg";
