// jmdeps-common/src/lib.rs
pub mod config;
pub mod descriptor;
pub mod error;
pub mod interpolate;
pub mod mapping;
pub mod model;
pub mod platform;

// Re-export key types
pub use config::Config;
pub use descriptor::{DirectiveKind, ModuleDescriptor};
pub use error::{JmdError, Result};
pub use mapping::{ModuleMappings, OverrideMappings, SharedMappings};
pub use model::{BuildSession, Coordinate, Dependency, ExternalMapping, Project, ProjectId, Scope};
