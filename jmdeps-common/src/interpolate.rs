// jmdeps-common/src/interpolate.rs
// `${property}` substitution for classifier expressions.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::{JmdError, Result};
use crate::model::Project;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\$\{([^}]*)\}").unwrap();
}

/// Values a classifier expression may reference for one project.
pub struct PropertySource<'a> {
    properties: &'a BTreeMap<String, String>,
    group: &'a str,
    artifact: &'a str,
    version: &'a str,
}

impl<'a> PropertySource<'a> {
    pub fn for_project(project: &'a Project) -> Self {
        Self {
            properties: &project.properties,
            group: &project.group,
            artifact: &project.artifact,
            version: &project.version,
        }
    }

    fn lookup(&self, name: &str) -> Option<&'a str> {
        match name {
            "project.groupId" | "pom.groupId" => Some(self.group),
            "project.artifactId" | "pom.artifactId" => Some(self.artifact),
            "project.version" | "pom.version" => Some(self.version),
            _ => self.properties.get(name).map(String::as_str),
        }
    }

    /// Replaces every `${name}`; values are interpolated recursively.
    ///
    /// References that cannot be resolved (undefined, empty or unterminated)
    /// are copied through verbatim. Only a reference cycle is an error.
    pub fn interpolate(&self, expr: &str) -> Result<String> {
        let mut active = Vec::new();
        self.expand(expr, expr, &mut active)
    }

    fn expand(&self, original: &str, text: &str, active: &mut Vec<&'a str>) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in PLACEHOLDER_RE.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            last = whole.end();

            let name = name.as_str().trim();
            if active.iter().any(|n| *n == name) {
                return Err(JmdError::Interpolation(
                    original.to_string(),
                    format!("property '{name}' references itself"),
                ));
            }
            let Some(value) = self.lookup(name) else {
                debug!("Leaving unresolved reference '{}' in '{}'", whole.as_str(), original);
                out.push_str(whole.as_str());
                continue;
            };

            let Some(value_name) = self.key_of(name) else {
                out.push_str(value);
                continue;
            };
            active.push(value_name);
            let expanded = self.expand(original, value, active)?;
            active.pop();
            out.push_str(&expanded);
        }

        out.push_str(&text[last..]);
        Ok(out)
    }

    // Borrowed key with the source's lifetime so it can sit on the cycle stack.
    fn key_of(&self, name: &str) -> Option<&'a str> {
        self.properties
            .get_key_value(name)
            .map(|(key, _)| key.as_str())
    }
}
