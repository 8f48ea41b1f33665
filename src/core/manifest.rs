//! Solution and project descriptor parsing
//!
//! A solution directory holds a `crossforge.toml` naming the participating
//! project directories; each of those holds a `project.toml` describing one
//! build unit. Loading happens once per invocation and produces the
//! read-only entity model consumed by the driver.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::project::{Language, Project, ProjectType, Reference, SourceFile};
use crate::core::solution::Solution;
use crate::error::ManifestError;

/// The solution descriptor (`crossforge.toml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionManifest {
    pub solution: SolutionConfig,
}

/// Solution-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionConfig {
    /// Solution name
    pub name: String,

    /// Project directories, relative to the solution directory
    #[serde(default)]
    pub projects: Vec<String>,

    /// Cross toolchain triple prefix, e.g. "arm-none-eabi"; host tools
    /// when absent
    #[serde(default)]
    pub toolchain: Option<String>,
}

/// One project descriptor (`project.toml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub project: ProjectConfig,

    /// Per-language and linker flags
    #[serde(default)]
    pub flags: FlagsConfig,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Unique project name within the solution
    pub name: String,

    /// Artifact kind
    #[serde(rename = "type")]
    pub project_type: ProjectType,

    /// Languages used
    #[serde(default)]
    pub languages: Vec<Language>,

    /// Source files, either plain paths or entries with per-file flags
    #[serde(default)]
    pub sources: Vec<SourceEntry>,

    /// Names of referenced projects
    #[serde(default)]
    pub references: Vec<String>,

    /// Include directories exported to dependents
    #[serde(default, rename = "public-includes")]
    pub public_includes: Vec<String>,

    /// Private include directories
    #[serde(default)]
    pub includes: Vec<String>,

    /// Preprocessor defines
    #[serde(default)]
    pub defines: Vec<String>,

    /// Built-in library names for the link step
    #[serde(default)]
    pub libraries: Vec<String>,

    /// Linker script path
    #[serde(default, rename = "linker-script")]
    pub linker_script: Option<String>,

    /// Output-root name override
    #[serde(default, rename = "build-directory")]
    pub build_directory: Option<String>,
}

/// A source file entry in the descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceEntry {
    /// Plain path
    Path(String),
    /// Path with extra compiler flags
    Detailed {
        path: String,
        #[serde(default)]
        flags: Vec<String>,
    },
}

/// Flag lists grouped by consumer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlagsConfig {
    #[serde(default)]
    pub c: Vec<String>,
    #[serde(default)]
    pub cpp: Vec<String>,
    #[serde(default)]
    pub linker: Vec<String>,
}

impl SolutionManifest {
    /// Parse a solution descriptor from TOML
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ManifestError> {
        toml::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ProjectManifest {
    /// Parse a project descriptor from TOML
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ManifestError> {
        toml::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Materialize the entity this descriptor describes
    pub fn into_project(self, directory: &Path) -> Project {
        let config = self.project;
        let mut project = Project::new(config.name, directory, config.project_type);
        project.languages = config.languages;
        project.sources = config
            .sources
            .into_iter()
            .map(|entry| match entry {
                SourceEntry::Path(path) => SourceFile::new(path),
                SourceEntry::Detailed { path, flags } => SourceFile { path: path.into(), flags },
            })
            .collect();
        project.references = config.references.into_iter().map(Reference::new).collect();
        project.public_includes = config.public_includes.into_iter().map(Into::into).collect();
        project.includes = config.includes.into_iter().map(Into::into).collect();
        project.defines = config.defines;
        project.libraries = config.libraries;
        project.linker_script = config.linker_script.map(Into::into);
        project.build_directory = config.build_directory;
        project.c_flags = self.flags.c;
        project.cpp_flags = self.flags.cpp;
        project.linker_flags = self.flags.linker;
        project
    }
}

/// Load a solution and all of its project descriptors from a directory
pub fn load_solution(directory: &Path) -> Result<(Solution, Option<String>), ManifestError> {
    let manifest_path = directory.join(defaults::SOLUTION_MANIFEST);
    if !manifest_path.exists() {
        return Err(ManifestError::NotFound {
            path: manifest_path,
        });
    }

    let content = read(&manifest_path)?;
    let manifest = SolutionManifest::from_toml(&manifest_path, &content)?;

    let mut solution = Solution::new(manifest.solution.name, directory);
    for project_dir in &manifest.solution.projects {
        let project_directory = directory.join(project_dir);
        let project_path = project_directory.join(defaults::PROJECT_MANIFEST);
        let content = read(&project_path)?;
        let project_manifest = ProjectManifest::from_toml(&project_path, &content)?;
        solution.add_project(project_manifest.into_project(&project_directory))?;
    }

    Ok((solution, manifest.solution.toolchain))
}

fn read(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).map_err(|e| ManifestError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}
