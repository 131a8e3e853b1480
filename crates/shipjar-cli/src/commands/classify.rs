use std::path::PathBuf;

use shipjar_core::project::load_project;
use shipjar_util::errors::ShipjarResult;

pub fn exec(project: Option<PathBuf>) -> ShipjarResult<()> {
    let dir = super::project_dir(project)?;
    let loaded = load_project(&dir)?;
    println!("{}", loaded.project.platform());
    Ok(())
}
