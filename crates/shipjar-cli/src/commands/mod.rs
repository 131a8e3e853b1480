//! Command dispatch and handler modules.

mod classify;
mod plan;
mod publish;

use std::path::PathBuf;

use shipjar_util::errors::{ShipjarError, ShipjarResult};

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> ShipjarResult<()> {
    match cli.command {
        Command::Publish { dry_run, project } => publish::exec(project, dry_run),
        Command::Plan { json, project } => plan::exec(project, json),
        Command::Classify { project } => classify::exec(project),
    }
}

/// `--project` or the current directory.
fn project_dir(project: Option<PathBuf>) -> ShipjarResult<PathBuf> {
    match project {
        Some(dir) => Ok(dir),
        None => Ok(std::env::current_dir().map_err(ShipjarError::Io)?),
    }
}
