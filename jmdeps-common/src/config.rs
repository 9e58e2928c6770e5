// jmdeps-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{JmdError, Result};

pub const DEFAULT_DESCRIPTOR_FILE: &str = "module-info.java";
pub const DEFAULT_OVERRIDE_MAPPINGS: &str = ".mvn/modules.properties";
/// Appended to test source roots to find descriptors in e.g. `src/test/java9`.
pub const ALT_TEST_ROOT_SUFFIX: &str = "9";

#[derive(Debug, Clone)]
pub struct Config {
    /// Multi-module root of the build; the override file is resolved against it.
    pub root: PathBuf,
    pub descriptor_file: String,
    pub override_mappings: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading jmdeps configuration");

        let root = match env::var("JMDEPS_ROOT").ok().filter(|s| !s.is_empty()) {
            Some(root) => PathBuf::from(root),
            None => {
                let cwd = env::current_dir().map_err(|e| {
                    JmdError::Config(format!("Could not determine current directory: {e}"))
                })?;
                debug!(
                    "JMDEPS_ROOT not set or empty, using current directory: {}",
                    cwd.display()
                );
                cwd
            }
        };

        let descriptor_file = env::var("JMDEPS_DESCRIPTOR")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTOR_FILE.to_string());
        if descriptor_file.contains(['/', '\\']) {
            return Err(JmdError::Config(format!(
                "JMDEPS_DESCRIPTOR must be a file name, not a path: {descriptor_file}"
            )));
        }

        let override_mappings = env::var("JMDEPS_MAPPINGS")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OVERRIDE_MAPPINGS));

        debug!("Effective root set to: {}", root.display());
        Ok(Self {
            root,
            descriptor_file,
            override_mappings,
        })
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the project-local override file.
    pub fn override_mappings_path(&self) -> PathBuf {
        self.root.join(&self.override_mappings)
    }

    /// Where a descriptor would sit inside `source_root`.
    pub fn descriptor_path(&self, source_root: &Path) -> PathBuf {
        source_root.join(&self.descriptor_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            descriptor_file: DEFAULT_DESCRIPTOR_FILE.to_string(),
            override_mappings: PathBuf::from(DEFAULT_OVERRIDE_MAPPINGS),
        }
    }
}
