//! Toolchain invocation
//!
//! Boundary between the orchestration core and the external compiler,
//! archiver and size tools. The core only needs "compile one file", "link
//! one project" and "size one binary"; the exact flag catalogue a given
//! toolchain wants lives behind [`Toolchain`] implementations.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::layout::OutputLayout;
use crate::core::outcome::LinkResult;
use crate::core::project::{Language, Project, ProjectType, SourceFile};
use crate::error::BuildError;

/// External build tool operations required by the orchestrator
///
/// Implementations run one external process per call and report its exit
/// code; they never panic on tool failure. `compile` is also responsible
/// for emitting or refreshing the file's dependency listing.
pub trait Toolchain: Send + Sync {
    /// Compile one source file of `project` to `object_path`
    fn compile(
        &self,
        super_project: &Project,
        project: &Project,
        source: &SourceFile,
        object_path: &Path,
    ) -> Result<i32, BuildError>;

    /// Link or archive one project from the accumulated inputs
    fn link(
        &self,
        super_project: &Project,
        project: &Project,
        objects: &[PathBuf],
        libraries: &[PathBuf],
        output_dir: &Path,
    ) -> Result<LinkResult, BuildError>;

    /// Report the size of a produced binary; advisory only
    fn report_size(&self, project: &Project, artifact: &Path) -> Result<String, BuildError>;
}

/// A prefixed cross GCC toolchain (`<prefix>-gcc`, `-g++`, `-ar`, `-size`)
///
/// An empty prefix drives the host toolchain.
#[derive(Debug, Clone, Default)]
pub struct GccToolchain {
    /// Target triple prefix, e.g. `arm-none-eabi`
    prefix: Option<String>,
    /// Directory holding the tools; bare names resolve over PATH otherwise
    location: Option<PathBuf>,
}

impl GccToolchain {
    /// Host toolchain (plain `gcc`/`g++`/`ar`/`size`)
    pub fn host() -> Self {
        Self::default()
    }

    /// Cross toolchain with the given triple prefix
    pub fn cross(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            location: None,
        }
    }

    /// Use tools from an explicit directory instead of PATH
    #[must_use]
    pub fn with_location(mut self, location: PathBuf) -> Self {
        self.location = Some(location);
        self
    }

    fn tool(&self, name: &str) -> PathBuf {
        let file = match &self.prefix {
            Some(prefix) => format!("{prefix}-{name}"),
            None => name.to_string(),
        };
        match &self.location {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        }
    }

    /// C compiler command
    pub fn cc(&self) -> PathBuf {
        self.tool("gcc")
    }

    /// C++ compiler command
    pub fn cxx(&self) -> PathBuf {
        self.tool("g++")
    }

    /// Archiver command
    pub fn ar(&self) -> PathBuf {
        self.tool("ar")
    }

    /// Size reporter command
    pub fn size(&self) -> PathBuf {
        self.tool("size")
    }

    /// Check that the C compiler is reachable
    pub fn verify(&self) -> Result<(), BuildError> {
        let cc = self.cc();
        if cc.is_absolute() {
            if cc.exists() {
                return Ok(());
            }
        } else if which::which(&cc).is_ok() {
            return Ok(());
        }
        Err(BuildError::ToolchainNotFound {
            tool: cc.display().to_string(),
        })
    }

    fn compiler_for(&self, language: Language) -> PathBuf {
        match language {
            Language::C => self.cc(),
            Language::Cpp => self.cxx(),
        }
    }

    fn compile_args(
        &self,
        project: &Project,
        source: &SourceFile,
        object_path: &Path,
    ) -> Vec<String> {
        let language = source.language().unwrap_or(Language::C);
        let dep_path = object_path.with_extension("d");

        let mut args = vec![
            "-c".to_string(),
            project.source_path(source).display().to_string(),
            "-o".to_string(),
            object_path.display().to_string(),
            // Dependency listing, consumed by the next pass's staleness check
            "-MMD".to_string(),
            "-MQ".to_string(),
            object_path.display().to_string(),
            "-MF".to_string(),
            dep_path.display().to_string(),
        ];

        for include in project.includes.iter().chain(&project.public_includes) {
            args.push(format!("-I{}", project.directory.join(include).display()));
        }
        for define in &project.defines {
            args.push(format!("-D{define}"));
        }
        args.extend(project.flags_for(language).iter().cloned());
        args.extend(source.flags.iter().cloned());
        args
    }

    fn run(&self, tool: &Path, args: &[String]) -> Result<std::process::Output, BuildError> {
        tracing::debug!("{} {}", tool.display(), args.join(" "));
        Command::new(tool)
            .args(args)
            .output()
            .map_err(|e| BuildError::ToolSpawn {
                tool: tool.display().to_string(),
                error: e.to_string(),
            })
    }
}

impl Toolchain for GccToolchain {
    fn compile(
        &self,
        _super_project: &Project,
        project: &Project,
        source: &SourceFile,
        object_path: &Path,
    ) -> Result<i32, BuildError> {
        let language = source.language().unwrap_or(Language::C);
        let compiler = self.compiler_for(language);
        let args = self.compile_args(project, source, object_path);

        let output = self.run(&compiler, &args)?;
        if !output.stderr.is_empty() {
            eprint!("{}", String::from_utf8_lossy(&output.stderr));
        }
        Ok(output.status.code().unwrap_or(-1))
    }

    fn link(
        &self,
        _super_project: &Project,
        project: &Project,
        objects: &[PathBuf],
        libraries: &[PathBuf],
        output_dir: &Path,
    ) -> Result<LinkResult, BuildError> {
        let artifact = output_dir.join(crate::core::layout::artifact_name(project));

        let (tool, args) = match project.project_type {
            ProjectType::StaticLibrary => {
                let mut args = vec!["rcs".to_string(), artifact.display().to_string()];
                args.extend(objects.iter().map(|o| o.display().to_string()));
                (self.ar(), args)
            }
            ProjectType::SharedLibrary | ProjectType::Executable => {
                let linker = if project.languages.contains(&Language::Cpp) {
                    self.cxx()
                } else {
                    self.cc()
                };
                let mut args = Vec::new();
                if project.project_type == ProjectType::SharedLibrary {
                    args.push("-shared".to_string());
                }
                args.extend(objects.iter().map(|o| o.display().to_string()));
                args.extend(libraries.iter().map(|l| l.display().to_string()));
                for library in &project.libraries {
                    args.push(format!("-l{library}"));
                }
                if let Some(script) = &project.linker_script {
                    args.push("-T".to_string());
                    args.push(project.directory.join(script).display().to_string());
                }
                args.extend(project.linker_flags.iter().cloned());
                args.push("-o".to_string());
                args.push(artifact.display().to_string());
                (linker, args)
            }
        };

        let output = self.run(&tool, &args)?;
        if !output.stderr.is_empty() {
            eprint!("{}", String::from_utf8_lossy(&output.stderr));
        }
        let code = output.status.code().unwrap_or(-1);
        if code == 0 {
            Ok(LinkResult::ok(artifact))
        } else {
            Ok(LinkResult::failed(code))
        }
    }

    fn report_size(&self, _project: &Project, artifact: &Path) -> Result<String, BuildError> {
        let output = self.run(&self.size(), &[artifact.display().to_string()])?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Compute the expected object path for a source within an object directory
pub fn object_path(obj_dir: &Path, source: &SourceFile) -> PathBuf {
    obj_dir.join(format!("{}.o", source.object_stem()))
}

/// Compute the dependency-listing path belonging to an object path
pub fn listing_path(object_path: &Path) -> PathBuf {
    object_path.with_extension("d")
}

/// Ensure a project's object and bin directories exist for this build
pub fn ensure_output_dirs(layout: &OutputLayout, project: &Project) -> Result<(), BuildError> {
    crate::infra::filesystem::create_dir_all(&layout.obj_dir(project))?;
    crate::infra::filesystem::create_dir_all(&layout.bin_dir(project))?;
    Ok(())
}
