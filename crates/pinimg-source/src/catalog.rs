//! The source catalog: digest-pinned images keyed by reference digest.
//!
//! Entries are validated on the way in and never mutated afterwards. The
//! map is ordered so the serialized form is stable across runs.

use std::collections::BTreeMap;

use pinimg_common::constants::SKOPEO_SOURCE_NAME;
use pinimg_common::error::ValidationError;
use pinimg_common::types::Digest;
use serde::{Deserialize, Serialize};

use crate::descriptor::{CatalogEntry, ImageOptions};

/// A type that can be embedded in the `sources` section of a build manifest.
pub trait Source: Serialize {
    /// Source type name used as the key in the manifest.
    const NAME: &'static str;

    /// Serializes `self` wrapped under its source type name.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    fn to_source_value(&self) -> serde_json::Result<serde_json::Value> {
        let mut map = serde_json::Map::new();
        let _ = map.insert(Self::NAME.to_owned(), serde_json::to_value(self)?);
        Ok(serde_json::Value::Object(map))
    }
}

/// Mapping from reference key to catalog entry.
///
/// `SourceCatalog` has no interior locking. Mutation needs `&mut self`, so
/// callers populating one catalog from several threads must synchronize
/// externally, or build per-thread catalogs and [`merge`](Self::merge) them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCatalog")]
pub struct SourceCatalog {
    items: BTreeMap<Digest, CatalogEntry>,
}

impl Source for SourceCatalog {
    const NAME: &'static str = SKOPEO_SOURCE_NAME;
}

impl SourceCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and adds one entry under `reference_key`.
    ///
    /// The descriptor is checked first (name, digest, transport), then the
    /// key. `reference_key` and `digest` are validated independently and are
    /// not required to be equal. An existing entry under the same key is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered. The catalog is left
    /// unchanged on error.
    pub fn add_entry(
        &mut self,
        name: &str,
        digest: &str,
        reference_key: &str,
        options: &ImageOptions,
    ) -> Result<(), ValidationError> {
        let entry = CatalogEntry::build(name, digest, options)?;
        let key = Digest::parse_reference_key(reference_key)?;
        tracing::debug!(key = %key, name, digest, "adding catalog entry");
        if self.insert(key, entry).is_some() {
            tracing::debug!(key = reference_key, "replaced existing catalog entry");
        }
        Ok(())
    }

    /// Inserts an already validated entry, returning the one it replaced.
    pub fn insert(&mut self, key: Digest, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.items.insert(key, entry)
    }

    /// Moves every entry of `other` into `self`; entries of `other` win on
    /// key collisions.
    pub fn merge(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    /// Looks up the entry stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Digest) -> Option<&CatalogEntry> {
        self.items.get(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Digest, &CatalogEntry)> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a SourceCatalog {
    type Item = (&'a Digest, &'a CatalogEntry);
    type IntoIter = std::collections::btree_map::Iter<'a, Digest, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Wire shape of a catalog before key validation.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCatalog {
    #[serde(default)]
    items: BTreeMap<String, CatalogEntry>,
}

impl TryFrom<RawCatalog> for SourceCatalog {
    type Error = ValidationError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        let items = raw
            .items
            .into_iter()
            .map(|(key, entry)| Ok((Digest::parse_reference_key(key)?, entry)))
            .collect::<Result<_, ValidationError>>()?;
        Ok(Self { items })
    }
}
