use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum JmdError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] Arc<serde_json::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Error reading {}: {message}", .path.display())]
    ReadFile { path: PathBuf, message: String },

    #[error("Error parsing {} (line {line}): {message}", .path.display())]
    Descriptor {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Malformed coordinate '{0}': {1}")]
    Coordinate(String, String),

    #[error("{0} already present.")]
    DuplicateMapping(String),

    #[error("Malformed properties in {0} (line {1}): {2}")]
    Properties(String, usize, String),

    #[error("Interpolation Error in '{0}': {1}")]
    Interpolation(String, String),

    #[error("Project {project}: {source}")]
    Project {
        project: String,
        #[source]
        source: Box<JmdError>,
    },

    #[error("Resource Not Found: {0}")]
    NotFound(String),
}

impl JmdError {
    /// Attaches the `group:artifact` of the project whose processing failed.
    pub fn in_project(self, project: impl Into<String>) -> Self {
        JmdError::Project {
            project: project.into(),
            source: Box::new(self),
        }
    }
}

impl From<std::io::Error> for JmdError {
    fn from(err: std::io::Error) -> Self {
        JmdError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for JmdError {
    fn from(err: serde_json::Error) -> Self {
        JmdError::Json(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, JmdError>;
