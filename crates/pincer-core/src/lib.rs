//! Core data types for the pincer constraint-manifest toolkit.
//!
//! This crate defines the fundamental types that represent a dependency
//! constraint manifest: the manifest document itself, requirement entries,
//! version specifiers and their ordering semantics, environment markers,
//! validation, the relax transformation, and tool configuration.
//!
//! This crate is intentionally free of async code and network I/O.

/// Default manifest filename used when none is given on the command line.
pub const DEFAULT_MANIFEST_NAME: &str = "requirements.txt";

pub mod config;
pub mod entry;
pub mod manifest;
pub mod marker;
pub mod relax;
pub mod specifier;
pub mod validate;
pub mod version;
