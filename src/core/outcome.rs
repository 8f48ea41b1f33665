//! Per-pass build outcome value objects

use std::path::PathBuf;

/// Outcome of compiling (and linking) one project during one build pass
///
/// Created fresh per project per pass and discarded once the link stage and
/// the caller have consumed it. `exit_code == 0` means success; object paths
/// from failed jobs are never recorded.
#[derive(Debug, Clone, Default)]
pub struct CompileResult {
    /// First nonzero exit code observed, 0 on success
    pub exit_code: i32,
    /// Object files produced or reused this pass (unordered across jobs)
    pub objects: Vec<PathBuf>,
    /// Static-library artifacts folded in from references
    pub libraries: Vec<PathBuf>,
    /// Executable / shared-library artifacts produced
    pub executables: Vec<PathBuf>,
    /// Files actually recompiled this pass; zero lets the link stage skip
    pub objects_compiled: usize,
}

impl CompileResult {
    /// An empty successful result
    pub fn new() -> Self {
        Self::default()
    }

    /// A failed result with no recorded artifacts
    pub fn failed() -> Self {
        Self {
            exit_code: -1,
            ..Self::default()
        }
    }

    /// Whether the pass succeeded so far
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Total artifacts recorded (objects, libraries and executables)
    pub fn count(&self) -> usize {
        self.objects.len() + self.libraries.len() + self.executables.len()
    }

    /// Fold another result's artifacts and compile count into this one
    pub fn absorb(&mut self, other: &CompileResult) {
        self.objects.extend(other.objects.iter().cloned());
        self.libraries.extend(other.libraries.iter().cloned());
        self.objects_compiled += other.objects_compiled;
    }
}

/// Outcome of one external link or archive invocation
#[derive(Debug, Clone)]
pub struct LinkResult {
    /// Linker exit code, 0 on success
    pub exit_code: i32,
    /// Produced binary, present on success
    pub artifact: Option<PathBuf>,
}

impl LinkResult {
    /// Successful link producing `artifact`
    pub fn ok(artifact: PathBuf) -> Self {
        Self {
            exit_code: 0,
            artifact: Some(artifact),
        }
    }

    /// Failed link with the given exit code
    pub fn failed(exit_code: i32) -> Self {
        Self {
            exit_code,
            artifact: None,
        }
    }

    /// Whether the link succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
