//! Batch population of a catalog.
//!
//! Applies a list of unvalidated [`EntryRequest`]s and collects every
//! rejection instead of stopping at the first, so a caller can report all
//! mistakes in an input file at once.

use pinimg_common::config::CatalogDefaults;
use pinimg_common::error::{PinimgError, ValidationError};
use serde::Deserialize;

use crate::catalog::SourceCatalog;
use crate::descriptor::ImageOptions;

/// One requested catalog entry, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EntryRequest {
    /// Image name.
    #[serde(default)]
    pub name: String,
    /// Image digest.
    #[serde(default)]
    pub digest: String,
    /// Catalog key, normally the resolved image ID.
    #[serde(default, alias = "id")]
    pub key: String,
    /// TLS verification policy.
    #[serde(default)]
    pub tls_verify: Option<bool>,
    /// Transport wire name.
    #[serde(default, rename = "containers-transport")]
    pub transport: Option<String>,
    /// Storage location.
    #[serde(default)]
    pub storage_location: Option<String>,
}

impl EntryRequest {
    /// Fills unset hints from `defaults`. Fields the request sets, including
    /// `false` and empty strings, are kept.
    #[must_use]
    pub fn with_defaults(mut self, defaults: &CatalogDefaults) -> Self {
        self.tls_verify = self.tls_verify.or(defaults.tls_verify);
        if self.transport.is_none() {
            self.transport = defaults.transport.map(|t| t.as_str().to_owned());
        }
        if self.storage_location.is_none() {
            self.storage_location.clone_from(&defaults.storage_location);
        }
        self
    }

    fn options(&self) -> ImageOptions {
        ImageOptions {
            tls_verify: self.tls_verify,
            transport: self.transport.clone(),
            storage_location: self.storage_location.clone(),
        }
    }
}

/// A request that was rejected, with its position in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Zero-based index of the request in the batch.
    pub index: usize,
    /// Key the request asked for, to help locate it.
    pub key: String,
    /// Why it was rejected.
    pub error: ValidationError,
}

/// Outcome of [`SourceCatalog::add_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of requests processed.
    pub total: usize,
    /// Number of requests added to the catalog.
    pub accepted: usize,
    /// Requests that were rejected, in input order.
    pub rejected: Vec<Rejection>,
}

impl BatchReport {
    /// Returns true if every request was accepted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Converts a report with rejections into an error.
    ///
    /// # Errors
    ///
    /// Returns [`PinimgError::InvalidEntries`] if any request was rejected.
    pub fn into_result(self) -> Result<usize, PinimgError> {
        if self.is_clean() {
            Ok(self.accepted)
        } else {
            Err(PinimgError::InvalidEntries {
                rejected: self.rejected.len(),
                total: self.total,
            })
        }
    }
}

impl SourceCatalog {
    /// Adds every request in order. Invalid requests are skipped and
    /// reported; valid ones are added even if an earlier request failed.
    pub fn add_all<I>(&mut self, requests: I) -> BatchReport
    where
        I: IntoIterator<Item = EntryRequest>,
    {
        let mut report = BatchReport::default();
        for (index, request) in requests.into_iter().enumerate() {
            report.total += 1;
            match self.add_entry(&request.name, &request.digest, &request.key, &request.options()) {
                Ok(()) => report.accepted += 1,
                Err(error) => {
                    tracing::warn!(
                        index,
                        key = %request.key,
                        field = error.field(),
                        %error,
                        "rejected catalog entry"
                    );
                    report.rejected.push(Rejection {
                        index,
                        key: request.key,
                        error,
                    });
                }
            }
        }
        tracing::info!(
            total = report.total,
            accepted = report.accepted,
            rejected = report.rejected.len(),
            "applied catalog batch"
        );
        report
    }
}
