//! # pinimg-common
//!
//! Shared types, error definitions, configuration models, and constants
//! used across the pinimg workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and owns the primitives every catalog rule is built from:
//! the validated [`types::Digest`], the closed [`types::Transport`] set and
//! the [`error::ValidationError`] taxonomy.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
