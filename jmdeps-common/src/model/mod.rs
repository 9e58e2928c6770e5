// jmdeps-common/src/model/mod.rs
pub mod coordinate;
pub mod dependency;
pub mod project;

// Re-export
pub use coordinate::{Coordinate, ExternalMapping, GroupArtifact};
pub use dependency::{Dependency, Scope, TESTS_CLASSIFIER};
pub use project::{BuildSession, ManagedDependency, Project, ProjectId};
