// jmdeps-core/src/synthesize.rs
use jmdeps_common::model::Dependency;
use tracing::debug;

use crate::resolver::Target;

/// Appends the dependency for `target`; entries keep the order they were resolved in.
pub fn add_dependency(dependencies: &mut Vec<Dependency>, target: Target) -> &Dependency {
    let dependency = Dependency::new(target.coordinate, target.scope, target.classifier);
    debug!("Adding dependency {}", dependency);
    dependencies.push(dependency);
    &dependencies[dependencies.len() - 1]
}

#[cfg(test)]
mod tests {
    use jmdeps_common::model::{Coordinate, Scope};

    use super::*;

    #[test]
    fn appends_in_order() {
        let mut deps = vec![Dependency::new(
            Coordinate::new("existing", "dep", "1"),
            Scope::Compile,
            None,
        )];
        add_dependency(
            &mut deps,
            Target {
                coordinate: Coordinate::new("org.example", "lib", "1.0"),
                scope: Scope::Provided,
                classifier: None,
            },
        );
        let added = add_dependency(
            &mut deps,
            Target {
                coordinate: Coordinate::new("org.example", "lib", "1.0"),
                scope: Scope::Test,
                classifier: Some("tests".to_string()),
            },
        );
        assert_eq!(added.to_string(), "org.example:lib:1.0:tests:test");

        let rendered: Vec<String> = deps.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "existing:dep:1:compile",
                "org.example:lib:1.0:provided",
                "org.example:lib:1.0:tests:test",
            ]
        );
    }
}
