//! Project entity model
//!
//! Passive data describing one build unit: its sources, references,
//! include/define/flag lists and output naming. Loaded once per invocation
//! by [`crate::core::manifest`] and read-only afterwards.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Source language of a project or file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
}

/// Kind of artifact a project produces
///
/// Determines artifact naming and whether the project's objects are merged
/// into dependents' link steps rather than linked standalone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Executable,
    SharedLibrary,
    StaticLibrary,
}

/// A source file belonging to a project
///
/// The path is relative to the project directory. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the project directory
    pub path: PathBuf,
    /// Extra compiler flags for this file only
    pub flags: Vec<String>,
}

impl SourceFile {
    /// Create a source file entry without per-file flags
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            flags: Vec::new(),
        }
    }

    /// Language this file compiles as, by extension
    ///
    /// Returns `None` for headers, linker scripts and anything else that is
    /// not dispatched to the compiler.
    pub fn language(&self) -> Option<Language> {
        let ext = self.path.extension()?.to_str()?;
        if defaults::C_EXTENSIONS.contains(&ext) {
            Some(Language::C)
        } else if defaults::CPP_EXTENSIONS.contains(&ext) {
            Some(Language::Cpp)
        } else {
            None
        }
    }

    /// Whether this file is dispatched to the compiler at all
    pub fn is_compilable(&self) -> bool {
        self.language().is_some()
    }

    /// File stem used for object and dependency-listing naming
    pub fn object_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A dependency edge to another project in the same solution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Name of the referenced project
    pub name: String,
    /// Remote repository the reference can be fetched from
    ///
    /// Fetching happens before the build starts; the orchestrator only
    /// requires that the named project is present in the solution.
    pub git_url: Option<String>,
}

impl Reference {
    /// Create a local reference by name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            git_url: None,
        }
    }
}

/// One compilable unit within a solution
#[derive(Debug, Clone)]
pub struct Project {
    /// Unique name within the solution
    pub name: String,
    /// Directory the project was loaded from
    pub directory: PathBuf,
    /// Artifact kind
    pub project_type: ProjectType,
    /// Languages used, informing which default flags apply
    pub languages: Vec<Language>,
    /// Ordered source files
    pub sources: Vec<SourceFile>,
    /// Ordered dependency edges
    pub references: Vec<Reference>,
    /// Include directories exported to dependents
    pub public_includes: Vec<PathBuf>,
    /// Private include directories
    pub includes: Vec<PathBuf>,
    /// Preprocessor defines
    pub defines: Vec<String>,
    /// Extra flags for C compilation
    pub c_flags: Vec<String>,
    /// Extra flags for C++ compilation
    pub cpp_flags: Vec<String>,
    /// Extra flags for the link step
    pub linker_flags: Vec<String>,
    /// Built-in library names passed to the linker
    pub libraries: Vec<String>,
    /// Linker script, relative to the project directory
    pub linker_script: Option<PathBuf>,
    /// Output-root name override (defaults to "build")
    pub build_directory: Option<String>,
}

impl Project {
    /// Create an empty project of the given type
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>, ty: ProjectType) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            project_type: ty,
            languages: Vec::new(),
            sources: Vec::new(),
            references: Vec::new(),
            public_includes: Vec::new(),
            includes: Vec::new(),
            defines: Vec::new(),
            c_flags: Vec::new(),
            cpp_flags: Vec::new(),
            linker_flags: Vec::new(),
            libraries: Vec::new(),
            linker_script: None,
            build_directory: None,
        }
    }

    /// Name of the output-root directory under the project directory
    pub fn build_dir_name(&self) -> &str {
        self.build_directory
            .as_deref()
            .unwrap_or(defaults::DEFAULT_BUILD_DIR)
    }

    /// Extra compiler flags for the given language
    pub fn flags_for(&self, language: Language) -> &[String] {
        match language {
            Language::C => &self.c_flags,
            Language::Cpp => &self.cpp_flags,
        }
    }

    /// Absolute path of a source file
    pub fn source_path(&self, source: &SourceFile) -> PathBuf {
        self.directory.join(&source.path)
    }

    /// Source files that are dispatched to the compiler
    pub fn compilable_sources(&self) -> impl Iterator<Item = &SourceFile> {
        self.sources.iter().filter(|s| s.is_compilable())
    }

    /// Number of compilable source files, used for progress reporting
    pub fn compilable_count(&self) -> usize {
        self.compilable_sources().count()
    }
}
