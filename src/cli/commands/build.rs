//! Build command implementation
//!
//! Loads the solution from the working directory, resolves the top-level
//! project and drives its reference graph through compile and link.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};

use crate::cli::output::{format_elapsed, status};
use crate::core::driver::{BuildDriver, BuildOptions};
use crate::core::manifest;
use crate::infra::toolchain::GccToolchain;

/// Options for the build command
pub struct BuildArgs {
    /// Build the named project instead of the solution's sole project
    pub project: Option<String>,
    /// Number of parallel compile jobs
    pub jobs: Option<usize>,
}

/// Execute the build command
pub async fn execute(solution_dir: &Path, args: BuildArgs) -> Result<()> {
    let (solution, toolchain_prefix) = manifest::load_solution(solution_dir)
        .with_context(|| format!("Failed to load solution from {}", solution_dir.display()))?;
    let solution = Arc::new(solution);

    let project = match &args.project {
        Some(name) => solution
            .get(name)
            .with_context(|| format!("Project '{name}' not found in solution"))?,
        None => {
            if solution.len() == 1 {
                solution.projects().next().cloned().expect("sole project")
            } else {
                let names: Vec<_> = solution.projects().map(|p| p.name.clone()).collect();
                bail!(
                    "Solution has {} projects; pick one with --project ({})",
                    solution.len(),
                    names.join(", ")
                );
            }
        }
    };

    let toolchain = match toolchain_prefix {
        Some(prefix) => GccToolchain::cross(prefix),
        None => GccToolchain::host(),
    };
    toolchain.verify().context("Toolchain is not available")?;

    let jobs = args.jobs.unwrap_or_else(num_cpus::get);
    tracing::info!(
        "Building {} ({} jobs, solution '{}')",
        project.name,
        jobs,
        solution.name()
    );

    let started = Instant::now();
    let driver = BuildDriver::new(solution, Arc::new(toolchain), BuildOptions { jobs });
    let result = driver.build(&project).await?;
    let elapsed = format_elapsed(started.elapsed());

    println!();
    if result.success() {
        println!("{} Build completed in {elapsed}", status::SUCCESS);
        println!("  Objects compiled: {}", result.objects_compiled);
        for artifact in result.executables.iter().chain(&result.libraries) {
            println!("  Artifact: {}", artifact.display());
        }
        Ok(())
    } else {
        bail!("Build failed after {elapsed}");
    }
}
