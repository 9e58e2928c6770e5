// jmdeps-common/src/model/dependency.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;

/// Classifier attached to dependencies on another project's test module.
pub const TESTS_CLASSIFIER: &str = "tests";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Compile,
    Provided,
    Test,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Test => "test",
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::Compile
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency entry written into a project's dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl Dependency {
    pub fn new(coordinate: Coordinate, scope: Scope, classifier: Option<String>) -> Self {
        Self {
            group: coordinate.group,
            artifact: coordinate.artifact,
            version: coordinate.version,
            scope,
            classifier,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        write!(f, ":{}", self.scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_classifier_and_scope() {
        let dep = Dependency::new(
            Coordinate::new("org.example", "lib", "1.0"),
            Scope::Test,
            Some(TESTS_CLASSIFIER.to_string()),
        );
        assert_eq!(dep.to_string(), "org.example:lib:1.0:tests:test");
    }

    #[test]
    fn scope_serializes_lowercase() {
        let json = serde_json::to_string(&Scope::Provided).unwrap();
        assert_eq!(json, "\"provided\"");
    }
}
