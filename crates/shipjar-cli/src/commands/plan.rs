use std::path::PathBuf;

use shipjar_ops::ops_plan::{self, PublishPlan};
use shipjar_ops::ops_publish::SetupOutcome;
use shipjar_util::errors::ShipjarResult;
use shipjar_util::progress::status_warn;

pub fn exec(project: Option<PathBuf>, json: bool) -> ShipjarResult<()> {
    let dir = super::project_dir(project)?;
    match ops_plan::plan(&dir)? {
        SetupOutcome::Ready(setup) => {
            let plan = PublishPlan::of(&setup)?;
            if json {
                println!("{}", plan.to_json()?);
            } else {
                print!("{}", plan.render());
            }
        }
        SetupOutcome::Skipped { project, platform } => {
            status_warn("Skipping", &format!("{project} ({platform} projects are not published)"));
        }
    }
    Ok(())
}
