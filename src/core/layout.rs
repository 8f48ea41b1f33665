//! Build output directory layout
//!
//! All artifacts of one top-level build land under the super project's
//! output root: `<super.directory>/<build-dir>/obj` and `/bin` for the super
//! project itself, with per-project subdirectories for references. The layout
//! is derived, never stored.

use std::path::PathBuf;

use crate::config::defaults;
use crate::core::project::{Project, ProjectType};

/// Output tree of one top-level build
#[derive(Debug, Clone)]
pub struct OutputLayout {
    /// Name of the project the build was started for
    super_name: String,
    /// `<super.directory>/<build-dir>`
    output_root: PathBuf,
}

impl OutputLayout {
    /// Layout rooted at the given super project
    pub fn new(super_project: &Project) -> Self {
        Self {
            super_name: super_project.name.clone(),
            output_root: super_project.directory.join(super_project.build_dir_name()),
        }
    }

    /// The output root that `clean` removes
    pub fn output_root(&self) -> &PathBuf {
        &self.output_root
    }

    /// Object directory for a project within this build
    pub fn obj_dir(&self, project: &Project) -> PathBuf {
        self.subdir(defaults::OBJ_DIR, project)
    }

    /// Binary directory for a project within this build
    pub fn bin_dir(&self, project: &Project) -> PathBuf {
        self.subdir(defaults::BIN_DIR, project)
    }

    /// Artifact path for a project within this build
    ///
    /// Static libraries archive to `lib<Name>.a`, shared libraries link to
    /// `lib<Name>.so`, executables to `<Name>.elf`.
    pub fn artifact_path(&self, project: &Project) -> PathBuf {
        self.bin_dir(project).join(artifact_name(project))
    }

    fn subdir(&self, kind: &str, project: &Project) -> PathBuf {
        let dir = self.output_root.join(kind);
        if project.name == self.super_name {
            dir
        } else {
            dir.join(&project.name)
        }
    }
}

/// Artifact file name for a project
pub fn artifact_name(project: &Project) -> String {
    match project.project_type {
        ProjectType::StaticLibrary => format!("lib{}.a", project.name),
        ProjectType::SharedLibrary => format!("lib{}.so", project.name),
        ProjectType::Executable => format!("{}.elf", project.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, ty: ProjectType) -> Project {
        Project::new(name, format!("/work/{name}"), ty)
    }

    #[test]
    fn test_super_project_dirs() {
        let app = project("App", ProjectType::Executable);
        let layout = OutputLayout::new(&app);

        assert_eq!(*layout.output_root(), PathBuf::from("/work/App/build"));
        assert_eq!(layout.obj_dir(&app), PathBuf::from("/work/App/build/obj"));
        assert_eq!(layout.bin_dir(&app), PathBuf::from("/work/App/build/bin"));
    }

    #[test]
    fn test_reference_dirs_are_namespaced() {
        let app = project("App", ProjectType::Executable);
        let utils = project("Utils", ProjectType::StaticLibrary);
        let layout = OutputLayout::new(&app);

        assert_eq!(
            layout.obj_dir(&utils),
            PathBuf::from("/work/App/build/obj/Utils")
        );
        assert_eq!(
            layout.bin_dir(&utils),
            PathBuf::from("/work/App/build/bin/Utils")
        );
    }

    #[test]
    fn test_build_directory_override() {
        let mut app = project("App", ProjectType::Executable);
        app.build_directory = Some("out".to_string());
        let layout = OutputLayout::new(&app);
        assert_eq!(*layout.output_root(), PathBuf::from("/work/App/out"));
    }

    #[test]
    fn test_artifact_naming() {
        let layout = OutputLayout::new(&project("App", ProjectType::Executable));
        assert_eq!(
            layout.artifact_path(&project("App", ProjectType::Executable)),
            PathBuf::from("/work/App/build/bin/App.elf")
        );
        assert!(layout
            .artifact_path(&project("Utils", ProjectType::StaticLibrary))
            .ends_with("bin/Utils/libUtils.a"));
        assert_eq!(
            artifact_name(&project("Core", ProjectType::SharedLibrary)),
            "libCore.so"
        );
    }
}
