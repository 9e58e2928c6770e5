// jmdeps-core/src/session.rs
//! Two-pass driver over every project of a build.
//!
//! The first pass indexes the modules of all projects, the second resolves the
//! directives of each project against that index. Because the index is
//! complete before anything is resolved, the order projects are listed in
//! does not matter.

use jmdeps_common::config::Config;
use jmdeps_common::error::{JmdError, Result};
use jmdeps_common::mapping::{ModuleMappings, OverrideMappings, SharedMappings};
use jmdeps_common::model::{BuildSession, Coordinate, Dependency, ProjectId};
use serde::Serialize;
use tracing::{debug, info};

use crate::index::LocalModuleIndex;
use crate::locate::{DescriptorSource, SourceSet};
use crate::resolver::{DependencyResolver, Resolution, ResolutionContext, Warning};
use crate::synthesize::add_dependency;
use crate::versions::ManagedVersions;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub project: Coordinate,
    pub added: Vec<Dependency>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolutionReport {
    pub projects: Vec<ProjectReport>,
}

impl ResolutionReport {
    pub fn warnings(&self) -> impl Iterator<Item = (&Coordinate, &Warning)> {
        self.projects
            .iter()
            .flat_map(|p| p.warnings.iter().map(move |w| (&p.project, w)))
    }

    pub fn added_count(&self) -> usize {
        self.projects.iter().map(|p| p.added.len()).sum()
    }

    pub fn project(&self, group: &str, artifact: &str) -> Option<&ProjectReport> {
        self.projects
            .iter()
            .find(|p| p.project.group == group && p.project.artifact == artifact)
    }
}

/// Indexes and resolves every reactor project, appending to their dependency lists.
///
/// Overrides come from the override file below `config`'s root; external
/// modules fall back to the bundled table.
pub fn resolve_session(
    session: &mut BuildSession,
    config: &Config,
    source: &dyn DescriptorSource,
) -> Result<ResolutionReport> {
    let index = LocalModuleIndex::build(session, source)?;
    let overrides = OverrideMappings::load(&config.override_mappings_path())?;
    let shared = SharedMappings::global()?;
    resolve_all(session, &index, &overrides, shared)
}

/// Second pass only, with explicit mapping tables.
pub fn resolve_all(
    session: &mut BuildSession,
    index: &LocalModuleIndex,
    overrides: &dyn ModuleMappings,
    shared: &dyn ModuleMappings,
) -> Result<ResolutionReport> {
    let resolver = DependencyResolver::new(index, overrides, shared);
    let mut report = ResolutionReport::default();

    for id in session.reactor().to_vec() {
        let project_report = resolve_project(session, id, index, &resolver)?;
        if let Some(project) = session.project_mut(id) {
            project
                .dependencies
                .extend(project_report.added.iter().cloned());
        }
        report.projects.push(project_report);
    }

    info!(
        "Added {} dependencies across {} projects",
        report.added_count(),
        report.projects.len()
    );
    Ok(report)
}

fn resolve_project(
    session: &BuildSession,
    id: ProjectId,
    index: &LocalModuleIndex,
    resolver: &DependencyResolver<'_>,
) -> Result<ProjectReport> {
    let project = session
        .project(id)
        .ok_or_else(|| JmdError::NotFound(format!("project #{}", id.0)))?;
    let managed = ManagedVersions::collect(session, id);
    let context = ResolutionContext {
        project,
        managed: &managed,
    };

    debug!("Resolving module dependencies of {}", project.coordinate());
    let mut added = Vec::new();
    let mut warnings = Vec::new();
    for source_set in [SourceSet::Main, SourceSet::Test] {
        for (kind, module_name) in index.descriptor(project, source_set).directives() {
            let resolution = resolver
                .resolve(&context, source_set, kind, module_name)
                .map_err(|e| e.in_project(project.group_artifact().to_string()))?;
            match resolution {
                Resolution::Resolved(target) => {
                    add_dependency(&mut added, target);
                }
                Resolution::Unresolved(warning) => warnings.push(warning),
                Resolution::Platform | Resolution::SelfReference => {}
            }
        }
    }

    Ok(ProjectReport {
        project: project.coordinate(),
        added,
        warnings,
    })
}
