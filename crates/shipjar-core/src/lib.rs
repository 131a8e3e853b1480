//! Core data types for shipjar.
//!
//! This crate defines what the publication engine reasons about: the host
//! project model read from `shipjar.toml`, the fallback sources used to fill
//! in publish options, platform classification, version suffixes, and the
//! option resolver that turns user configuration into a frozen publish
//! configuration.
//!
//! This crate is intentionally free of async code and network I/O.

/// File name of the per-project description.
pub const MANIFEST_FILE: &str = "shipjar.toml";

pub mod config;
pub mod manifest;
pub mod platform;
pub mod project;
pub mod properties;
pub mod version;
