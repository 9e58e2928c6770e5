// jmdeps-common/src/mapping/shared.rs
// Module name -> coordinates table bundled with the binary.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use tracing::debug;

use super::{properties, ModuleMappings};
use crate::error::{JmdError, Result};
use crate::model::ExternalMapping;

/// Bundled data files, merged in this order.
const BUNDLED_SOURCES: [(&str, &str); 2] = [
    (
        "unique_modules.properties",
        include_str!("../../resources/unique_modules.properties"),
    ),
    (
        "modules.properties",
        include_str!("../../resources/modules.properties"),
    ),
];

static SHARED: OnceCell<SharedMappings> = OnceCell::new();

#[derive(Debug, Default)]
pub struct SharedMappings {
    mappings: HashMap<String, ExternalMapping>,
}

impl SharedMappings {
    /// The process-wide table, built from the bundled data on first use.
    pub fn global() -> Result<&'static SharedMappings> {
        SHARED.get_or_try_init(|| Self::from_sources(&BUNDLED_SOURCES))
    }

    /// Builds a table from `(name, properties text)` sources.
    ///
    /// A key seen twice, within one source or across sources, is an error.
    pub fn from_sources(sources: &[(&str, &str)]) -> Result<Self> {
        let mut mappings = HashMap::new();
        for (source, text) in sources {
            let entries = properties::parse(source, text)?;
            debug!("Loaded {} module mappings from {}", entries.len(), source);
            for entry in entries {
                let mapping = ExternalMapping::parse(&entry.value).map_err(|e| {
                    JmdError::Properties(source.to_string(), entry.line, e.to_string())
                })?;
                if mappings.contains_key(&entry.key) {
                    return Err(JmdError::DuplicateMapping(entry.key));
                }
                mappings.insert(entry.key, mapping);
            }
        }
        Ok(Self { mappings })
    }
}

impl ModuleMappings for SharedMappings {
    fn get(&self, module_name: &str) -> Option<&ExternalMapping> {
        self.mappings.get(module_name)
    }
}
