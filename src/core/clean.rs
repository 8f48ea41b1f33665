//! Clean logic
//!
//! Removes a project's entire build output tree (obj + bin). Idempotent:
//! cleaning a project that was never built succeeds and reports a skip.

use crate::core::layout::OutputLayout;
use crate::core::project::Project;
use crate::core::solution::Solution;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Result of a clean operation
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Output roots that were removed
    pub removed: Vec<std::path::PathBuf>,
    /// Output roots that did not exist
    pub skipped: Vec<std::path::PathBuf>,
}

/// Remove a project's output root if it exists
pub fn clean_project(project: &Project) -> Result<CleanResult, FilesystemError> {
    let mut result = CleanResult::default();
    let root = OutputLayout::new(project).output_root().clone();

    if root.exists() {
        filesystem::remove_dir_all(&root)?;
        result.removed.push(root);
    } else {
        result.skipped.push(root);
    }
    Ok(result)
}

/// Remove the output roots of every project in the solution
pub fn clean_solution(solution: &Solution) -> Result<CleanResult, FilesystemError> {
    let mut result = CleanResult::default();
    for project in solution.projects() {
        let one = clean_project(project)?;
        result.removed.extend(one.removed);
        result.skipped.extend(one.skipped);
    }
    Ok(result)
}
