// jmdeps-common/src/mapping/overrides.rs
// Per-build mappings from `<root>/.mvn/modules.properties`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::{properties, ModuleMappings};
use crate::error::{JmdError, Result};
use crate::model::ExternalMapping;

#[derive(Debug, Default)]
pub struct OverrideMappings {
    mappings: HashMap<String, ExternalMapping>,
}

impl OverrideMappings {
    /// Loads the override file if it exists; a missing file gives an empty table.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No override mappings at {}", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|e| JmdError::ReadFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let table = Self::parse(&path.display().to_string(), &text)?;
        debug!(
            "Loaded {} override mappings from {}",
            table.mappings.len(),
            path.display()
        );
        Ok(table)
    }

    /// Later keys replace earlier ones, as with any properties file.
    pub fn parse(source: &str, text: &str) -> Result<Self> {
        let mut mappings = HashMap::new();
        for entry in properties::parse(source, text)? {
            let mapping = ExternalMapping::parse(&entry.value).map_err(|e| {
                JmdError::Properties(source.to_string(), entry.line, e.to_string())
            })?;
            mappings.insert(entry.key, mapping);
        }
        Ok(Self { mappings })
    }
}

impl ModuleMappings for OverrideMappings {
    fn get(&self, module_name: &str) -> Option<&ExternalMapping> {
        self.mappings.get(module_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let table = OverrideMappings::load(&dir.path().join(".mvn/modules.properties")).unwrap();
        assert!(table.get("jakarta.mail").is_none());
    }

    #[test]
    fn loads_file_and_last_entry_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modules.properties");
        fs::write(
            &path,
            "jakarta.mail=com.sun.mail:jakarta.mail\njakarta.mail=org.eclipse.angus:jakarta.mail\n",
        )
        .unwrap();

        let table = OverrideMappings::load(&path).unwrap();
        assert_eq!(
            table.get("jakarta.mail").unwrap().to_string(),
            "org.eclipse.angus:jakarta.mail"
        );
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file cannot be read as text.
        let path = dir.path().join("modules.properties");
        fs::create_dir(&path).unwrap();
        assert!(matches!(
            OverrideMappings::load(&path),
            Err(JmdError::ReadFile { .. })
        ));
    }
}
