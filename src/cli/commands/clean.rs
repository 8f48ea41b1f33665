//! Clean command implementation
//!
//! Removes build output trees for one project or the whole solution.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::status;
use crate::core::clean::{clean_project, clean_solution, CleanResult};
use crate::core::manifest;

/// Execute the clean command
pub async fn execute(solution_dir: &Path, project: Option<&str>) -> Result<()> {
    let (solution, _) = manifest::load_solution(solution_dir)
        .with_context(|| format!("Failed to load solution from {}", solution_dir.display()))?;

    let result: CleanResult = match project {
        Some(name) => {
            let project = solution
                .get(name)
                .with_context(|| format!("Project '{name}' not found in solution"))?;
            clean_project(&project).context("Failed to clean build artifacts")?
        }
        None => clean_solution(&solution).context("Failed to clean build artifacts")?,
    };

    if result.removed.is_empty() {
        println!("{} Nothing to clean", status::SUCCESS);
    } else {
        println!("{} Cleaned build artifacts:", status::SUCCESS);
        for root in &result.removed {
            println!("  Removed {}", root.display());
        }
    }
    Ok(())
}
