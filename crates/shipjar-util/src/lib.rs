//! Shared utilities for shipjar.
//!
//! This crate provides cross-cutting concerns used by all other shipjar crates:
//! the error taxonomy, filesystem helpers, host process spawning, identifier
//! casing, and terminal status output.

pub mod errors;
pub mod fs;
pub mod process;
pub mod progress;
pub mod strings;
