//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clean;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a project and its reference graph
    Build {
        /// Project to build (defaults to the solution's sole project)
        #[arg(short, long)]
        project: Option<String>,

        /// Number of parallel compile jobs (defaults to core count)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Remove build output trees
    Clean {
        /// Project to clean (defaults to every project in the solution)
        #[arg(short, long)]
        project: Option<String>,
    },
}

impl Commands {
    /// Execute the command against the current working directory
    pub async fn run(self) -> Result<()> {
        let solution_dir = PathBuf::from(".");
        match self {
            Commands::Build { project, jobs } => {
                build::execute(&solution_dir, build::BuildArgs { project, jobs }).await
            }
            Commands::Clean { project } => {
                clean::execute(&solution_dir, project.as_deref()).await
            }
        }
    }
}
