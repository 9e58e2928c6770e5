// jmdeps/src/manifest.rs
//! JSON description of a build session, for running resolution outside a host build tool.
//!
//! ```json
//! {
//!   "projects": [
//!     { "id": "parent", "group": "org.example", "artifact": "parent", "version": "1.0",
//!       "reactor": false,
//!       "dependencyManagement": [{ "group": "org.slf4j", "artifact": "slf4j-api", "version": "2.0.16" }] },
//!     { "group": "org.example", "artifact": "app", "version": "1.0",
//!       "parent": "parent", "basedir": "app" }
//!   ]
//! }
//! ```
//!
//! Relative paths are resolved against the session root. A project without
//! explicit source roots uses the standard layout below its `basedir`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use jmdeps_common::error::{JmdError, Result};
use jmdeps_common::model::{BuildSession, Dependency, ManagedDependency, Project, ProjectId};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionManifest {
    /// Session root, relative to the manifest's directory.
    #[serde(default)]
    pub root: Option<PathBuf>,
    pub projects: Vec<ProjectManifest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectManifest {
    /// Name other entries use as `parent`; defaults to `group:artifact`.
    #[serde(default)]
    pub id: Option<String>,
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub parent: Option<String>,
    /// Whether the project is built in this session, as opposed to a pure parent.
    #[serde(default = "default_reactor")]
    pub reactor: bool,
    #[serde(default)]
    pub basedir: Option<PathBuf>,
    #[serde(default)]
    pub source_roots: Option<Vec<PathBuf>>,
    #[serde(default)]
    pub test_source_roots: Option<Vec<PathBuf>>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub dependency_management: Vec<ManagedDependency>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

fn default_reactor() -> bool {
    true
}

impl ProjectManifest {
    fn key(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}:{}", self.group, self.artifact))
    }

    fn to_project(&self, root: &Path) -> Project {
        let mut project = Project::new(&self.group, &self.artifact, &self.version);
        let basedir = match &self.basedir {
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        };
        project = project.with_standard_layout(&basedir);
        if let Some(roots) = &self.source_roots {
            project.compile_source_roots = roots.iter().map(|r| basedir.join(r)).collect();
        }
        if let Some(roots) = &self.test_source_roots {
            project.test_compile_source_roots = roots.iter().map(|r| basedir.join(r)).collect();
        }
        project.properties = self.properties.clone();
        project.dependency_management = self.dependency_management.clone();
        project.dependencies = self.dependencies.clone();
        project
    }
}

impl SessionManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| JmdError::ReadFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The root declared by the manifest, relative to `manifest_dir`.
    pub fn root_in(&self, manifest_dir: &Path) -> PathBuf {
        match &self.root {
            Some(root) => manifest_dir.join(root),
            None => manifest_dir.to_path_buf(),
        }
    }

    /// Builds the session arena. Parents may be listed after their children.
    pub fn into_session(self, root: &Path) -> Result<BuildSession> {
        let mut session = BuildSession::new();
        let mut ids: HashMap<String, ProjectId> = HashMap::new();

        for entry in &self.projects {
            let key = entry.key();
            let project = entry.to_project(root);
            let id = if entry.reactor {
                session.add_project(project)
            } else {
                session.add_external(project)
            };
            if ids.insert(key.clone(), id).is_some() {
                return Err(JmdError::Config(format!(
                    "Project '{key}' is listed more than once in the manifest"
                )));
            }
        }

        for entry in &self.projects {
            let Some(parent) = &entry.parent else {
                continue;
            };
            let parent_id = *ids.get(parent).ok_or_else(|| {
                JmdError::NotFound(format!(
                    "parent '{parent}' of project '{}'",
                    entry.key()
                ))
            })?;
            let child_id = ids[&entry.key()];
            if let Some(project) = session.project_mut(child_id) {
                project.parent = Some(parent_id);
            }
        }

        debug!(
            "Loaded {} projects ({} in reactor) rooted at {}",
            self.projects.len(),
            session.reactor().len(),
            root.display()
        );
        Ok(session)
    }
}
