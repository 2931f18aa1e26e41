//! # pinimg-source
//!
//! Catalog of container images pinned by digest, embedded as a source in an
//! image-build manifest and resolved by a downstream fetcher.
//!
//! Handles:
//! - **Descriptors**: image name, digest and optional transport, TLS and
//!   storage hints, validated on construction.
//! - **Catalog**: entries keyed by reference digest, last write wins.
//! - **Batches**: apply many requests and report every rejection.
//! - **Manifest sources**: wrap the catalog under its source type name.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod batch;
pub mod catalog;
pub mod descriptor;

pub use batch::{BatchReport, EntryRequest, Rejection};
pub use catalog::{Source, SourceCatalog};
pub use descriptor::{CatalogEntry, ImageDescriptor, ImageOptions};
pub use pinimg_common::error::ValidationError;
pub use pinimg_common::types::{Digest, Transport};
