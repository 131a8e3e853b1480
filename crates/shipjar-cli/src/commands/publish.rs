use std::path::PathBuf;

use console::style;
use shipjar_ops::ops_publish::{self, PublishOptions, PublishOutcome};
use shipjar_util::errors::ShipjarResult;
use shipjar_util::progress::{spinner, status, status_warn};

pub fn exec(project: Option<PathBuf>, dry_run: bool) -> ShipjarResult<()> {
    let dir = super::project_dir(project)?;
    let options = PublishOptions { dry_run };

    let pb = (!dry_run).then(|| spinner("Running host tasks..."));
    let outcome = ops_publish::publish(&dir, &options);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match outcome? {
        PublishOutcome::Published(report) => {
            status("Published", report.coordinate());
            println!("{report}");
        }
        PublishOutcome::DryRun(tasks) => {
            status("Planned", &format!("{} task(s)", tasks.len()));
            for task in tasks {
                println!("{}", style(task).bold());
            }
        }
        PublishOutcome::Skipped { project, platform } => {
            status_warn("Skipping", &format!("{project} ({platform} projects are not published)"));
        }
    }
    Ok(())
}
