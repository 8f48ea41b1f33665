//! Bounded-concurrency compile scheduling
//!
//! Runs the staleness check for every eligible source of a project, then
//! dispatches stale files onto semaphore-bounded tokio tasks that invoke the
//! external compiler. Per-project aggregation is linearized through a single
//! mutex; the first nonzero exit code raises the build-wide fail-fast flag,
//! after which queued jobs return without spawning a compiler process.
//! In-flight processes are never killed; the join point drains every
//! dispatched job before the project's result is reported.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::core::layout::OutputLayout;
use crate::core::outcome::CompileResult;
use crate::core::project::Project;
use crate::core::staleness;
use crate::error::BuildError;
use crate::infra::toolchain::{self, Toolchain};

/// Shared compile progress over one whole build pass
#[derive(Debug, Default)]
pub struct BuildProgress {
    compiled: AtomicUsize,
    total: AtomicUsize,
}

impl BuildProgress {
    /// Fresh counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the total compilable file count of the reference graph
    pub fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::SeqCst);
    }

    /// Total compilable file count of the reference graph
    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// Claim the next 1-based progress ordinal
    pub fn next(&self) -> usize {
        self.compiled.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Dispatches compile jobs for one project at a time, bounded build-wide
pub struct CompileScheduler {
    toolchain: Arc<dyn Toolchain>,
    slots: Arc<Semaphore>,
    fail_fast: Arc<AtomicBool>,
    progress: Arc<BuildProgress>,
}

impl CompileScheduler {
    /// Scheduler with a fixed concurrency ceiling
    pub fn new(
        toolchain: Arc<dyn Toolchain>,
        jobs: usize,
        fail_fast: Arc<AtomicBool>,
        progress: Arc<BuildProgress>,
    ) -> Self {
        Self {
            toolchain,
            slots: Arc::new(Semaphore::new(jobs.max(1))),
            fail_fast,
            progress,
        }
    }

    /// Whether any job in this build has failed so far
    pub fn failed(&self) -> bool {
        self.fail_fast.load(Ordering::SeqCst)
    }

    /// Compile every stale source of `project`, invoked once per project
    /// per top-level build
    ///
    /// Fresh files are recorded in the result without spawning work. The
    /// ordering of object paths across concurrent jobs is not guaranteed.
    pub async fn compile_project(
        &self,
        super_project: &Arc<Project>,
        project: &Arc<Project>,
        layout: &OutputLayout,
    ) -> Result<CompileResult, BuildError> {
        let sources: Vec<_> = project.compilable_sources().cloned().collect();
        if sources.is_empty() {
            return Ok(CompileResult::new());
        }

        toolchain::ensure_output_dirs(layout, project)?;
        let obj_dir = layout.obj_dir(project);

        let result = Arc::new(Mutex::new(CompileResult::new()));
        let mut handles: Vec<JoinHandle<Result<(), BuildError>>> = Vec::new();

        for source in sources {
            let object = toolchain::object_path(&obj_dir, &source);
            let listing = toolchain::listing_path(&object);

            if !staleness::is_stale(&object, &listing) {
                result.lock().unwrap().objects.push(object);
                continue;
            }

            // Fail-fast: stop dispatching new jobs, let started ones finish
            if self.failed() {
                break;
            }

            let slots = self.slots.clone();
            let fail_fast = self.fail_fast.clone();
            let progress = self.progress.clone();
            let toolchain = self.toolchain.clone();
            let super_project = super_project.clone();
            let project = project.clone();
            let result = result.clone();

            handles.push(tokio::spawn(async move {
                let permit = slots.acquire_owned().await.unwrap();

                // Raised while this job sat in the queue
                if fail_fast.load(Ordering::SeqCst) {
                    return Ok(());
                }

                let file_name = source
                    .path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_default();
                println!(
                    "[CC {:>3}/{}]    [{}]    {}",
                    progress.next(),
                    progress.total(),
                    project.name,
                    file_name
                );

                let exit_code = {
                    let toolchain = toolchain.clone();
                    let super_project = super_project.clone();
                    let project = project.clone();
                    let source = source.clone();
                    let object = object.clone();
                    tokio::task::spawn_blocking(move || {
                        toolchain.compile(&super_project, &project, &source, &object)
                    })
                    .await
                    .map_err(|e| BuildError::JobJoin {
                        error: e.to_string(),
                    })??
                };
                drop(permit);

                let mut result = result.lock().unwrap();
                if exit_code == 0 && object.exists() {
                    result.objects.push(object);
                    result.objects_compiled += 1;
                } else {
                    if result.exit_code == 0 {
                        result.exit_code = if exit_code == 0 { -1 } else { exit_code };
                    }
                    fail_fast.store(true, Ordering::SeqCst);
                    tracing::error!(
                        "compilation failed: {} ({})",
                        source.path.display(),
                        project.name
                    );
                }
                Ok(())
            }));
        }

        // Join point: the project's result is not ready until every
        // dispatched job has completed, even after a failure.
        let mut first_error = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    first_error.get_or_insert(e);
                }
                Err(e) => {
                    first_error.get_or_insert(BuildError::JobJoin {
                        error: e.to_string(),
                    });
                }
            }
        }
        if let Some(error) = first_error {
            return Err(error);
        }

        let result = Arc::try_unwrap(result)
            .map(|m| m.into_inner().unwrap())
            .unwrap_or_else(|arc| arc.lock().unwrap().clone());
        Ok(result)
    }
}
