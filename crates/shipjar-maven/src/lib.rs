//! Maven publication shaping: which publications a project gets, which
//! sidecar artifacts they carry, and which repository they go to.

pub mod artifacts;
pub mod javadoc;
pub mod publication;
pub mod repository;
pub mod strategy;
pub mod tasks;
