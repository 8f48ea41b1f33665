//! Test utilities
//!
//! A recording mock toolchain and fixture helpers shared by the unit tests,
//! plus proptest generators for the dependency-listing parser.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::core::outcome::LinkResult;
use crate::core::project::{Project, ProjectType, SourceFile};
use crate::error::BuildError;
use crate::infra::toolchain::Toolchain;

/// Create a project directory under `root` with the given source files
///
/// Each file is written with placeholder content so staleness checks see
/// real paths and modification times.
pub fn new_project(root: &Path, name: &str, ty: ProjectType, sources: &[&str]) -> Project {
    let directory = root.join(name);
    std::fs::create_dir_all(&directory).expect("create project directory");

    let mut project = Project::new(name, &directory, ty);
    for source in sources {
        let path = directory.join(source);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source directory");
        }
        std::fs::write(&path, format!("// {source}\n")).expect("write source");
        project.sources.push(SourceFile::new(*source));
    }
    project
}

/// A toolchain double that records invocations instead of running GCC
///
/// `compile` writes the object file and a dependency listing naming the
/// source, so incremental rebuild behavior is exercised end to end; `link`
/// writes the artifact file. An in-flight gauge captures the maximum
/// number of concurrent compile invocations observed.
#[derive(Debug, Default)]
pub struct MockToolchain {
    compile_delay: Option<Duration>,
    fail_sources: HashSet<String>,
    fail_link: bool,
    compiled: Mutex<Vec<PathBuf>>,
    linked: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit nonzero for sources whose file name matches
    #[must_use]
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.fail_sources.insert(file_name.to_string());
        self
    }

    /// Exit nonzero from every link invocation
    #[must_use]
    pub fn failing_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    /// Hold each compile invocation open for `delay`
    #[must_use]
    pub fn with_compile_delay(mut self, delay: Duration) -> Self {
        self.compile_delay = Some(delay);
        self
    }

    /// Number of compile invocations so far
    pub fn compiled_count(&self) -> usize {
        self.compiled.lock().unwrap().len()
    }

    /// Project names linked, in invocation order
    pub fn linked_projects(&self) -> Vec<String> {
        self.linked.lock().unwrap().clone()
    }

    /// Maximum concurrent compile invocations observed
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Toolchain for MockToolchain {
    fn compile(
        &self,
        _super_project: &Project,
        project: &Project,
        source: &SourceFile,
        object_path: &Path,
    ) -> Result<i32, BuildError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.compile_delay {
            std::thread::sleep(delay);
        }

        let source_path = project.source_path(source);
        self.compiled.lock().unwrap().push(source_path.clone());
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let file_name = source
            .path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.fail_sources.contains(&file_name) {
            return Ok(1);
        }

        std::fs::write(object_path, "object").expect("write mock object");
        std::fs::write(
            object_path.with_extension("d"),
            format!("{}: \\\n {} \\\n", object_path.display(), source_path.display()),
        )
        .expect("write mock listing");
        Ok(0)
    }

    fn link(
        &self,
        _super_project: &Project,
        project: &Project,
        _objects: &[PathBuf],
        _libraries: &[PathBuf],
        output_dir: &Path,
    ) -> Result<LinkResult, BuildError> {
        self.linked.lock().unwrap().push(project.name.clone());
        if self.fail_link {
            return Ok(LinkResult::failed(1));
        }
        let artifact = output_dir.join(crate::core::layout::artifact_name(project));
        std::fs::write(&artifact, "artifact").expect("write mock artifact");
        Ok(LinkResult::ok(artifact))
    }

    fn report_size(&self, _project: &Project, _artifact: &Path) -> Result<String, BuildError> {
        Ok(String::new())
    }
}

pub mod generators {
    use proptest::prelude::*;

    /// Generate a plausible relative dependency path
    pub fn dependency_path() -> impl Strategy<Value = String> {
        ("[a-z][a-z0-9_]{0,12}", "[a-z][a-z0-9_]{0,12}", "[ch]")
            .prop_map(|(dir, stem, ext)| format!("{dir}/{stem}.{ext}"))
    }

    /// Generate a make-rule dependency listing and the paths it records
    pub fn listing_with_paths() -> impl Strategy<Value = (String, Vec<String>)> {
        prop::collection::vec(dependency_path(), 0..8).prop_map(|paths| {
            let mut listing = String::from("build/obj/main.o: \\\n");
            for (i, path) in paths.iter().enumerate() {
                listing.push(' ');
                listing.push_str(path);
                if i + 1 < paths.len() {
                    listing.push_str(" \\");
                }
                listing.push('\n');
            }
            (listing, paths)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::core::staleness::parse_listing;
    use proptest::prelude::*;
    use std::path::PathBuf;

    proptest! {
        #[test]
        fn test_parse_listing_recovers_recorded_paths((listing, paths) in listing_with_paths()) {
            let parsed = parse_listing(&listing);
            let expected: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
            prop_assert_eq!(parsed, expected);
        }
    }
}
