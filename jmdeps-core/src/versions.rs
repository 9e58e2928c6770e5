// jmdeps-core/src/versions.rs
// Versions declared in <dependencyManagement> along the parent chain.

use std::collections::HashSet;

use jmdeps_common::model::{BuildSession, ManagedDependency, ProjectId};
use tracing::{debug, warn};

/// Managed entries of a project followed by those of each ancestor, nearest first.
#[derive(Debug, Clone, Default)]
pub struct ManagedVersions {
    entries: Vec<ManagedDependency>,
}

impl ManagedVersions {
    pub fn collect(session: &BuildSession, project: ProjectId) -> Self {
        let mut entries = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(project);

        while let Some(id) = current {
            if !visited.insert(id) {
                warn!("Cyclic parent reference at project #{}; stopping version lookup", id.0);
                break;
            }
            let Some(project) = session.project(id) else {
                warn!("Parent project #{} is not part of the session", id.0);
                break;
            };
            entries.extend(project.dependency_management.iter().cloned());
            current = project.parent;
        }

        debug!("Collected {} managed dependencies", entries.len());
        Self { entries }
    }

    /// Version of the first entry matching `group:artifact` exactly.
    pub fn find_version(&self, group: &str, artifact: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|m| m.group == group && m.artifact == artifact)
            .map(|m| m.version.as_str())
    }
}

#[cfg(test)]
mod tests {
    use jmdeps_common::model::Project;

    use super::*;

    #[test]
    fn nearest_declaration_wins() {
        let mut session = BuildSession::new();
        let root = session.add_external(
            Project::new("org.example", "root", "1")
                .with_managed(ManagedDependency::new("org.slf4j", "slf4j-api", "1.7.30"))
                .with_managed(ManagedDependency::new("com.google.guava", "guava", "33.0-jre")),
        );
        let parent = session.add_external(
            Project::new("org.example", "parent", "1")
                .with_parent(root)
                .with_managed(ManagedDependency::new("org.slf4j", "slf4j-api", "2.0.9")),
        );
        let app = session.add_project(Project::new("org.example", "app", "1").with_parent(parent));

        let managed = ManagedVersions::collect(&session, app);
        assert_eq!(managed.find_version("org.slf4j", "slf4j-api"), Some("2.0.9"));
        assert_eq!(managed.find_version("com.google.guava", "guava"), Some("33.0-jre"));
        assert_eq!(managed.find_version("org.slf4j", "slf4j-simple"), None);
    }

    #[test]
    fn own_version_wins_over_parent() {
        let mut session = BuildSession::new();
        let parent = session.add_external(
            Project::new("g", "parent", "1").with_managed(ManagedDependency::new("a", "b", "1.0")),
        );
        let app = session.add_project(
            Project::new("g", "app", "1")
                .with_parent(parent)
                .with_managed(ManagedDependency::new("a", "b", "2.0")),
        );
        let managed = ManagedVersions::collect(&session, app);
        assert_eq!(managed.find_version("a", "b"), Some("2.0"));
        // Lookup does not consume or reorder anything.
        assert_eq!(managed.find_version("a", "b"), Some("2.0"));
    }

    #[test]
    fn cyclic_parents_terminate() {
        let mut session = BuildSession::new();
        let a = session.add_project(
            Project::new("g", "a", "1").with_managed(ManagedDependency::new("x", "y", "1")),
        );
        let b = session.add_project(Project::new("g", "b", "1").with_parent(a));
        session.project_mut(a).unwrap().parent = Some(b);

        let managed = ManagedVersions::collect(&session, b);
        assert_eq!(managed.find_version("x", "y"), Some("1"));
        assert_eq!(ManagedVersions::collect(&session, a).find_version("x", "y"), Some("1"));
    }
}
