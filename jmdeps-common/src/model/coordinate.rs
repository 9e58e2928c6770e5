// jmdeps-common/src/model/coordinate.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{JmdError, Result};

/// A `group:artifact` pair identifying a package independently of its version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupArtifact {
    pub group: String,
    pub artifact: String,
}

impl GroupArtifact {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    pub fn matches(&self, group: &str, artifact: &str) -> bool {
        self.group == group && self.artifact == artifact
    }
}

impl fmt::Display for GroupArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)
    }
}

/// A fully versioned `group:artifact:version` coordinate of a locally built module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    pub fn same_package(&self, other: &GroupArtifact) -> bool {
        other.matches(&self.group, &self.artifact)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

/// Value of a module-name mapping entry: `group:artifact[|classifierExpression]`.
///
/// The classifier expression is kept verbatim; it may reference project
/// properties and is only interpolated once the requiring project is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalMapping {
    pub package: GroupArtifact,
    pub classifier_expr: Option<String>,
}

impl ExternalMapping {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let (coordinates, classifier_expr) = match value.split_once('|') {
            Some((ga, classifier)) => {
                let classifier = classifier.trim();
                if classifier.is_empty() {
                    return Err(JmdError::Coordinate(
                        value.to_string(),
                        "empty classifier after '|'".to_string(),
                    ));
                }
                (ga, Some(classifier.to_string()))
            }
            None => (value, None),
        };

        let segments = split_segments(coordinates, ':')?;
        match segments.as_slice() {
            [group, artifact] => Ok(Self {
                package: GroupArtifact::new(*group, *artifact),
                classifier_expr,
            }),
            _ => Err(JmdError::Coordinate(
                value.to_string(),
                format!("expected group:artifact, found {} segments", segments.len()),
            )),
        }
    }
}

impl fmt::Display for ExternalMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.classifier_expr {
            Some(classifier) => write!(f, "{}|{}", self.package, classifier),
            None => write!(f, "{}", self.package),
        }
    }
}

fn split_segments(value: &str, separator: char) -> Result<Vec<&str>> {
    let segments: Vec<&str> = value.split(separator).map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(JmdError::Coordinate(
            value.to_string(),
            "empty segment".to_string(),
        ));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_matches_its_package() {
        let coordinate = Coordinate::new("org.example", "lib", "1.0");
        assert_eq!(coordinate.to_string(), "org.example:lib:1.0");
        assert!(coordinate.same_package(&GroupArtifact::new("org.example", "lib")));
        assert!(!coordinate.same_package(&GroupArtifact::new("org.example", "app")));
    }

    #[test]
    fn rejects_mapping_with_empty_segment() {
        assert!(ExternalMapping::parse("org.example:").is_err());
        assert!(ExternalMapping::parse(":lib|linux").is_err());
    }

    #[test]
    fn parses_mapping_with_classifier() {
        let mapping = ExternalMapping::parse("org.openjfx:javafx-base|${javafx.platform}").unwrap();
        assert_eq!(mapping.package, GroupArtifact::new("org.openjfx", "javafx-base"));
        assert_eq!(mapping.classifier_expr.as_deref(), Some("${javafx.platform}"));
        assert_eq!(mapping.to_string(), "org.openjfx:javafx-base|${javafx.platform}");
    }

    #[test]
    fn parses_mapping_without_classifier() {
        let mapping = ExternalMapping::parse("com.sun.mail:jakarta.mail").unwrap();
        assert_eq!(mapping.package.to_string(), "com.sun.mail:jakarta.mail");
        assert!(mapping.classifier_expr.is_none());
    }

    #[test]
    fn rejects_mapping_with_version() {
        assert!(ExternalMapping::parse("com.sun.mail:jakarta.mail:2.0.1").is_err());
        assert!(ExternalMapping::parse("jakarta.mail").is_err());
        assert!(ExternalMapping::parse("com.sun.mail:jakarta.mail|").is_err());
    }
}
