// jmdeps-common/src/model/project.rs
// In-memory view of the host build's projects.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::coordinate::{Coordinate, GroupArtifact};
use super::dependency::Dependency;

/// Index of a project inside a [`BuildSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub usize);

/// One `<dependencyManagement>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedDependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ManagedDependency {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Project {
    pub group: String,
    pub artifact: String,
    pub version: String,
    /// Effective properties used for classifier interpolation.
    pub properties: BTreeMap<String, String>,
    pub compile_source_roots: Vec<PathBuf>,
    pub test_compile_source_roots: Vec<PathBuf>,
    pub dependency_management: Vec<ManagedDependency>,
    pub parent: Option<ProjectId>,
    pub dependencies: Vec<Dependency>,
}

impl Project {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Uses the conventional `src/main/java` and `src/test/java` layout below `basedir`.
    pub fn with_standard_layout(mut self, basedir: &Path) -> Self {
        self.compile_source_roots = vec![basedir.join("src").join("main").join("java")];
        self.test_compile_source_roots = vec![basedir.join("src").join("test").join("java")];
        self
    }

    pub fn with_parent(mut self, parent: ProjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_managed(mut self, managed: ManagedDependency) -> Self {
        self.dependency_management.push(managed);
        self
    }

    pub fn group_artifact(&self) -> GroupArtifact {
        GroupArtifact::new(&self.group, &self.artifact)
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(&self.group, &self.artifact, &self.version)
    }
}

/// All projects known to one build, plus which of them take part in resolution.
///
/// Parent projects that are not built (e.g. an imported parent) live in the
/// arena so the managed-version walk can reach them, but are not in the reactor.
#[derive(Debug, Clone, Default)]
pub struct BuildSession {
    projects: Vec<Project>,
    reactor: Vec<ProjectId>,
}

impl BuildSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a project that is built (and resolved) in this session.
    pub fn add_project(&mut self, project: Project) -> ProjectId {
        let id = self.add_external(project);
        self.reactor.push(id);
        id
    }

    /// Adds a project that is only reachable as a parent.
    pub fn add_external(&mut self, project: Project) -> ProjectId {
        let id = ProjectId(self.projects.len());
        self.projects.push(project);
        id
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(id.0)
    }

    pub fn project_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        self.projects.get_mut(id.0)
    }

    pub fn reactor(&self) -> &[ProjectId] {
        &self.reactor
    }

    pub fn reactor_projects(&self) -> impl Iterator<Item = (ProjectId, &Project)> {
        self.reactor
            .iter()
            .filter_map(|id| self.project(*id).map(|p| (*id, p)))
    }
}
