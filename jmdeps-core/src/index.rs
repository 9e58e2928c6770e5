// jmdeps-core/src/index.rs
// Which module names the projects of this build produce themselves.

use std::collections::HashMap;

use jmdeps_common::descriptor::ModuleDescriptor;
use jmdeps_common::error::Result;
use jmdeps_common::model::{BuildSession, Coordinate, GroupArtifact, Project};
use tracing::{debug, warn};

use crate::locate::{DescriptorSource, SourceSet};

#[derive(Debug, Default)]
pub struct LocalModuleIndex {
    main_modules: HashMap<String, Coordinate>,
    test_modules: HashMap<String, Coordinate>,
    main_descriptors: HashMap<GroupArtifact, ModuleDescriptor>,
    test_descriptors: HashMap<GroupArtifact, ModuleDescriptor>,
}

impl LocalModuleIndex {
    /// Scans every reactor project. Must finish before any project is resolved,
    /// since a project may require a module built anywhere in the session.
    pub fn build(session: &BuildSession, source: &dyn DescriptorSource) -> Result<Self> {
        let mut index = Self::default();
        for (_, project) in session.reactor_projects() {
            index
                .put(project, source)
                .map_err(|e| e.in_project(project.group_artifact().to_string()))?;
        }
        debug!(
            "Indexed {} main and {} test modules",
            index.main_modules.len(),
            index.test_modules.len()
        );
        Ok(index)
    }

    pub fn put(&mut self, project: &Project, source: &dyn DescriptorSource) -> Result<()> {
        for source_set in [SourceSet::Main, SourceSet::Test] {
            let Some(path) = source.find(project, source_set) else {
                continue;
            };
            let descriptor = source.read(&path)?;
            self.insert(project, source_set, descriptor);
        }
        Ok(())
    }

    pub fn insert(&mut self, project: &Project, source_set: SourceSet, descriptor: ModuleDescriptor) {
        let (modules, descriptors) = match source_set {
            SourceSet::Main => (&mut self.main_modules, &mut self.main_descriptors),
            SourceSet::Test => (&mut self.test_modules, &mut self.test_descriptors),
        };

        let coordinate = project.coordinate();
        if !descriptor.module_name().is_empty() {
            debug!(
                "Module '{}' ({:?}) is built by {}",
                descriptor.module_name(),
                source_set,
                coordinate
            );
            if let Some(previous) =
                modules.insert(descriptor.module_name().to_string(), coordinate.clone())
            {
                if previous != coordinate {
                    warn!(
                        "Module '{}' is declared by both {} and {}; using the latter",
                        descriptor.module_name(),
                        previous,
                        coordinate
                    );
                }
            }
        }
        descriptors.insert(project.group_artifact(), descriptor);
    }

    pub fn main_module(&self, module_name: &str) -> Option<&Coordinate> {
        self.main_modules.get(module_name)
    }

    pub fn test_module(&self, module_name: &str) -> Option<&Coordinate> {
        self.test_modules.get(module_name)
    }

    /// The project's descriptor, or the empty descriptor if it has none.
    pub fn descriptor(&self, project: &Project, source_set: SourceSet) -> &ModuleDescriptor {
        let descriptors = match source_set {
            SourceSet::Main => &self.main_descriptors,
            SourceSet::Test => &self.test_descriptors,
        };
        descriptors
            .get(&project.group_artifact())
            .unwrap_or(ModuleDescriptor::empty())
    }
}
