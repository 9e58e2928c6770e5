// jmdeps-core/src/locate.rs
// Finding a project's module descriptors on disk.

use std::path::{Path, PathBuf};

use jmdeps_common::config::{Config, ALT_TEST_ROOT_SUFFIX};
use jmdeps_common::error::Result;
use jmdeps_common::model::Project;
use jmdeps_common::ModuleDescriptor;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSet {
    Main,
    Test,
}

/// Supplies the descriptors of a project's main and test source sets.
pub trait DescriptorSource {
    fn find(&self, project: &Project, source_set: SourceSet) -> Option<PathBuf>;

    fn read(&self, path: &Path) -> Result<ModuleDescriptor> {
        ModuleDescriptor::from_file(path)
    }
}

/// Looks for the descriptor file at the top of each source root.
///
/// Test roots are tried as declared first, then with the alternate suffix
/// (`src/test/java` → `src/test/java9`).
#[derive(Debug, Clone)]
pub struct FsDescriptorSource {
    config: Config,
}

impl FsDescriptorSource {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn candidates(project: &Project, source_set: SourceSet) -> Vec<PathBuf> {
        match source_set {
            SourceSet::Main => project.compile_source_roots.clone(),
            SourceSet::Test => {
                let declared = project.test_compile_source_roots.iter().cloned();
                let alternates = project.test_compile_source_roots.iter().map(|root| {
                    let mut alt = root.clone().into_os_string();
                    alt.push(ALT_TEST_ROOT_SUFFIX);
                    PathBuf::from(alt)
                });
                declared.chain(alternates).collect()
            }
        }
    }
}

impl Default for FsDescriptorSource {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl DescriptorSource for FsDescriptorSource {
    fn find(&self, project: &Project, source_set: SourceSet) -> Option<PathBuf> {
        let found = Self::candidates(project, source_set)
            .into_iter()
            .map(|root| self.config.descriptor_path(&root))
            .find(|path| path.is_file());
        debug!(
            "{}:{} {:?} descriptor: {:?}",
            project.group, project.artifact, source_set, found
        );
        found
    }
}
