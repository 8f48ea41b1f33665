//! Graph build driver
//!
//! Recursively builds a project's references before the project itself, in
//! dependency order, visiting each project exactly once per top-level build.
//! All per-pass state (visited results, fail-fast flag, progress counters)
//! lives in a session owned by the invocation, never on the long-lived
//! entities, so repeated builds over the same solution start clean.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::core::layout::OutputLayout;
use crate::core::linker;
use crate::core::outcome::CompileResult;
use crate::core::project::{Project, ProjectType};
use crate::core::scheduler::{BuildProgress, CompileScheduler};
use crate::core::solution::Solution;
use crate::error::BuildError;
use crate::infra::{filesystem, toolchain::Toolchain};

/// Options for one build invocation
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Concurrency ceiling for compile jobs
    pub jobs: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            jobs: num_cpus::get().max(1),
        }
    }
}

/// Per-invocation build state
struct BuildSession {
    /// Projects already built this pass, with their pass results
    visited: HashMap<String, CompileResult>,
}

impl BuildSession {
    fn new() -> Self {
        Self {
            visited: HashMap::new(),
        }
    }
}

/// Drives a whole reference graph through compile and link stages
pub struct BuildDriver {
    solution: Arc<Solution>,
    toolchain: Arc<dyn Toolchain>,
    options: BuildOptions,
}

impl BuildDriver {
    /// Driver over a loaded solution
    pub fn new(
        solution: Arc<Solution>,
        toolchain: Arc<dyn Toolchain>,
        options: BuildOptions,
    ) -> Self {
        Self {
            solution,
            toolchain,
            options,
        }
    }

    /// Build `project` and its reference graph bottom-up
    ///
    /// Reference resolution over the whole graph runs up front (for the
    /// progress total), so a missing reference fails the build before any
    /// compiler is invoked.
    pub async fn build(&self, project: &Arc<Project>) -> Result<CompileResult, BuildError> {
        let progress = Arc::new(BuildProgress::new());
        progress.set_total(self.count_files(project)?);

        let fail_fast = Arc::new(AtomicBool::new(false));
        let scheduler = CompileScheduler::new(
            self.toolchain.clone(),
            self.options.jobs,
            fail_fast,
            progress,
        );
        let layout = OutputLayout::new(project);

        let mut session = BuildSession::new();
        self.build_project(&mut session, project, project.clone(), &scheduler, &layout)
            .await
    }

    /// Total compilable files across the graph, each project counted once
    fn count_files(&self, project: &Arc<Project>) -> Result<usize, BuildError> {
        let mut visited = HashSet::new();
        self.count_files_inner(project, &mut visited)
    }

    fn count_files_inner(
        &self,
        project: &Arc<Project>,
        visited: &mut HashSet<String>,
    ) -> Result<usize, BuildError> {
        if !visited.insert(project.name.clone()) {
            return Ok(0);
        }
        let mut total = project.compilable_count();
        for reference in &project.references {
            let dep = self.solution.resolve(project, &reference.name)?;
            total += self.count_files_inner(&dep, visited)?;
        }
        Ok(total)
    }

    /// Build one project within the super project's output tree
    ///
    /// References build first; a diamond-shared reference reuses its cached
    /// pass result. The first failing reference propagates without building
    /// further siblings.
    fn build_project<'a>(
        &'a self,
        session: &'a mut BuildSession,
        super_project: &'a Arc<Project>,
        project: Arc<Project>,
        scheduler: &'a CompileScheduler,
        layout: &'a OutputLayout,
    ) -> BoxFuture<'a, Result<CompileResult, BuildError>> {
        async move {
            if let Some(cached) = session.visited.get(&project.name) {
                return Ok(cached.clone());
            }

            let mut folded = CompileResult::new();
            for reference in &project.references {
                let dep = self.solution.resolve(&project, &reference.name)?;
                let dep_result = self
                    .build_project(&mut *session, super_project, dep.clone(), scheduler, layout)
                    .await?;

                if !dep_result.success() {
                    return Ok(CompileResult::failed());
                }

                if dep.project_type == ProjectType::StaticLibrary {
                    folded.absorb(&dep_result);
                } else {
                    // Already-built dependent binaries are copied alongside
                    // this project's own artifact, not relinked
                    let bin_dir = layout.bin_dir(&project);
                    filesystem::create_dir_all(&bin_dir)?;
                    for executable in &dep_result.executables {
                        if let Some(file_name) = executable.file_name() {
                            filesystem::copy_file(executable, &bin_dir.join(file_name))?;
                        }
                    }
                }
            }

            let mut compiled = scheduler
                .compile_project(super_project, &project, layout)
                .await?;
            if !compiled.success() {
                session.visited.insert(project.name.clone(), compiled.clone());
                return Ok(compiled);
            }

            compiled.absorb(&folded);

            let result = if compiled.count() > 0 {
                linker::link_project(
                    self.toolchain.as_ref(),
                    super_project,
                    &project,
                    &compiled,
                    layout,
                )?
            } else {
                compiled
            };

            session.visited.insert(project.name.clone(), result.clone());
            Ok(result)
        }
        .boxed()
    }
}
