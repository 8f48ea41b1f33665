//! Error types for crossforge
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Solution-level errors
#[derive(Error, Debug)]
pub enum SolutionError {
    /// A named reference cannot be resolved within the solution
    #[error("Unable to find reference '{reference}' required by '{project}' in {directory}")]
    ReferenceNotFound {
        reference: String,
        project: String,
        directory: PathBuf,
    },

    /// Two projects share the same name
    #[error("Duplicate project name '{name}' in solution")]
    DuplicateProject { name: String },
}

/// Descriptor loading errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Solution descriptor not found
    #[error("No solution descriptor found at '{path}'")]
    NotFound { path: PathBuf },

    /// IO error while reading a descriptor
    #[error("Failed to read descriptor '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Descriptor parse error
    #[error("Failed to parse descriptor '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Solution error raised while assembling loaded projects
    #[error(transparent)]
    Solution(#[from] SolutionError),
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to copy a file
    #[error("Failed to copy '{from}' to '{to}': {error}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// Failed to read file metadata
    #[error("Failed to read metadata for '{path}': {error}")]
    Metadata { path: PathBuf, error: String },
}

/// Build orchestration errors
///
/// Nonzero compiler or linker exit codes are not errors at this level; they
/// travel back through `CompileResult::exit_code` so that partial-failure
/// aggregation stays uniform. These variants cover conditions that prevent
/// the build from proceeding at all.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Reference resolution failed
    #[error(transparent)]
    Reference(#[from] SolutionError),

    /// A required directory could not be created or a file copied
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// A toolchain binary is not available
    #[error("Toolchain not found: {tool}")]
    ToolchainNotFound { tool: String },

    /// An external tool failed to spawn
    #[error("Failed to run {tool}: {error}")]
    ToolSpawn { tool: String, error: String },

    /// A compile job could not be joined
    #[error("Compile job failed to complete: {error}")]
    JobJoin { error: String },
}
