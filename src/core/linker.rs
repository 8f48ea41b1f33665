//! Link and archive stage
//!
//! Consumes a project's accumulated compile result and produces its artifact
//! in the build's bin tree. Relinking is skipped when the artifact already
//! exists and nothing was recompiled this pass; a nonzero linker exit code
//! is recorded in the result rather than raised.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::core::layout::OutputLayout;
use crate::core::outcome::CompileResult;
use crate::core::project::{Project, ProjectType};
use crate::error::BuildError;
use crate::infra::toolchain::{ensure_output_dirs, Toolchain};

/// Link or archive one project from its accumulated compile result
///
/// The returned result carries the artifact, the (deduplicated) objects for
/// dependents to fold in, and the pass's recompile count.
pub fn link_project(
    toolchain: &dyn Toolchain,
    super_project: &Project,
    project: &Project,
    compile_result: &CompileResult,
    layout: &OutputLayout,
) -> Result<CompileResult, BuildError> {
    ensure_output_dirs(layout, project)?;

    let artifact = layout.artifact_path(project);
    let objects = dedup_paths(&compile_result.objects);
    let libraries = dedup_paths(&compile_result.libraries);

    let mut result = CompileResult::new();
    result.objects = objects.clone();
    result.objects_compiled = compile_result.objects_compiled;

    // Nothing changed: report the existing artifact without relinking
    if artifact.exists() && compile_result.objects_compiled == 0 {
        record_artifact(&mut result, project, artifact.clone());
        result.libraries.extend(libraries);
        if project.name == super_project.name && project.project_type != ProjectType::StaticLibrary
        {
            report_size(toolchain, project, &artifact);
        }
        return Ok(result);
    }

    println!("[LL]    [{}]", project.name);
    let link = toolchain.link(
        super_project,
        project,
        &objects,
        &libraries,
        &layout.bin_dir(project),
    )?;

    if link.success() {
        record_artifact(&mut result, project, artifact.clone());
        result.libraries.extend(libraries);
        if project.project_type != ProjectType::StaticLibrary {
            report_size(toolchain, project, &artifact);
        }
    } else {
        tracing::error!("link failed for {} (exit {})", project.name, link.exit_code);
        result.exit_code = -1;
    }

    Ok(result)
}

fn record_artifact(result: &mut CompileResult, project: &Project, artifact: PathBuf) {
    match project.project_type {
        ProjectType::StaticLibrary => result.libraries.push(artifact),
        ProjectType::SharedLibrary | ProjectType::Executable => result.executables.push(artifact),
    }
}

/// Size reporting is advisory; failure never fails the build
fn report_size(toolchain: &dyn Toolchain, project: &Project, artifact: &std::path::Path) {
    match toolchain.report_size(project, artifact) {
        Ok(report) => {
            if !report.is_empty() {
                print!("{report}");
            }
        }
        Err(e) => tracing::warn!("size report failed for {}: {e}", project.name),
    }
}

/// Drop duplicate paths while preserving first-seen order
///
/// Diamond-shaped reference graphs fold the shared subtree's objects in once
/// per path here, whatever route they arrived by.
fn dedup_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    paths
        .iter()
        .filter(|p| seen.insert((*p).clone()))
        .cloned()
        .collect()
}
