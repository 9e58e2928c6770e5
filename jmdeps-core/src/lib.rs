// jmdeps-core/src/lib.rs
pub mod index;
pub mod locate;
pub mod resolver;
pub mod session;
pub mod synthesize;
pub mod versions;

// Re-export key types for the CLI crate
pub use index::LocalModuleIndex;
pub use locate::{DescriptorSource, FsDescriptorSource, SourceSet};
pub use resolver::{DependencyResolver, Resolution, Warning};
pub use session::{resolve_session, ResolutionReport};
pub use versions::ManagedVersions;
