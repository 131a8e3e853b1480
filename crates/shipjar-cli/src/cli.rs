//! CLI argument definitions for shipjar.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "shipjar",
    version,
    about = "Publish JVM, Kotlin and Android components to Maven repositories",
    long_about = "shipjar classifies a project from its shipjar.toml, resolves its publish \
                  options, sets up its Maven publications and drives the host build tool \
                  to upload them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and upload the component (publishComponent)
    Publish {
        /// Print the tasks that would run instead of running them
        #[arg(long)]
        dry_run: bool,
        /// Project directory (defaults to the current directory)
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Show the publications, tasks and repository for a project
    Plan {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
        /// Project directory (defaults to the current directory)
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Print the detected platform of a project
    Classify {
        /// Project directory (defaults to the current directory)
        #[arg(short, long)]
        project: Option<PathBuf>,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
