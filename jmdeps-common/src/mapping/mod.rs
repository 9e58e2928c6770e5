// jmdeps-common/src/mapping/mod.rs
pub mod overrides;
pub mod properties;
pub mod shared;

pub use overrides::OverrideMappings;
pub use shared::SharedMappings;

use crate::model::ExternalMapping;

/// A lookup from module name to the package that provides it.
pub trait ModuleMappings {
    fn get(&self, module_name: &str) -> Option<&ExternalMapping>;
}
