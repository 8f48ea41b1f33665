//! Solution model and reference resolution
//!
//! A solution owns the set of projects that participate in one build and
//! provides name lookup. Project names are unique within a solution; the
//! map is read-only once a build or clean command starts.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::project::Project;
use crate::error::SolutionError;

/// A named collection of projects built together
#[derive(Debug, Default)]
pub struct Solution {
    /// Solution name
    name: String,
    /// Directory the solution was loaded from
    directory: PathBuf,
    /// Projects by unique name
    projects: BTreeMap<String, Arc<Project>>,
}

impl Solution {
    /// Create an empty solution
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            projects: BTreeMap::new(),
        }
    }

    /// Solution name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the solution was loaded from
    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }

    /// Add a project, rejecting duplicate names
    pub fn add_project(&mut self, project: Project) -> Result<(), SolutionError> {
        if self.projects.contains_key(&project.name) {
            return Err(SolutionError::DuplicateProject {
                name: project.name.clone(),
            });
        }
        self.projects.insert(project.name.clone(), Arc::new(project));
        Ok(())
    }

    /// Look up a project by name
    pub fn get(&self, name: &str) -> Option<Arc<Project>> {
        self.projects.get(name).cloned()
    }

    /// Resolve a reference edge of `project` to a concrete project
    ///
    /// Fails with [`SolutionError::ReferenceNotFound`] when the name is not
    /// present in the solution. Fatal for the whole build invocation.
    pub fn resolve(
        &self,
        project: &Project,
        reference: &str,
    ) -> Result<Arc<Project>, SolutionError> {
        self.get(reference)
            .ok_or_else(|| SolutionError::ReferenceNotFound {
                reference: reference.to_string(),
                project: project.name.clone(),
                directory: project.directory.clone(),
            })
    }

    /// All projects, in name order
    pub fn projects(&self) -> impl Iterator<Item = &Arc<Project>> {
        self.projects.values()
    }

    /// Number of projects in the solution
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the solution holds no projects
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::ProjectType;

    fn project(name: &str) -> Project {
        Project::new(name, format!("/tmp/{name}"), ProjectType::StaticLibrary)
    }

    #[test]
    fn test_resolve_existing_reference() {
        let mut solution = Solution::new("demo", "/tmp");
        solution.add_project(project("App")).unwrap();
        solution.add_project(project("Utils")).unwrap();

        let app = solution.get("App").unwrap();
        let resolved = solution.resolve(&app, "Utils").unwrap();
        assert_eq!(resolved.name, "Utils");
    }

    #[test]
    fn test_resolve_missing_reference_is_fatal() {
        let mut solution = Solution::new("demo", "/tmp");
        solution.add_project(project("App")).unwrap();

        let app = solution.get("App").unwrap();
        let err = solution.resolve(&app, "Missing").unwrap_err();
        assert!(matches!(
            err,
            SolutionError::ReferenceNotFound { ref reference, .. } if reference == "Missing"
        ));
    }

    #[test]
    fn test_duplicate_project_name_rejected() {
        let mut solution = Solution::new("demo", "/tmp");
        solution.add_project(project("App")).unwrap();
        let err = solution.add_project(project("App")).unwrap_err();
        assert!(matches!(err, SolutionError::DuplicateProject { .. }));
    }
}
