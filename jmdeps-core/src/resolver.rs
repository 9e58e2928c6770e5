// jmdeps-core/src/resolver.rs
//! Turns one `requires` directive into a dependency target.
//!
//! Precedence, first hit wins:
//!
//! 1. platform modules (never a dependency),
//! 2. main modules built in this session,
//! 3. test modules built in this session (classifier `tests`),
//! 4. the build's override mappings,
//! 5. the bundled shared mappings.
//!
//! External packages (4 and 5) additionally need a managed version.

use std::fmt;

use jmdeps_common::descriptor::DirectiveKind;
use jmdeps_common::error::Result;
use jmdeps_common::interpolate::PropertySource;
use jmdeps_common::mapping::ModuleMappings;
use jmdeps_common::model::{Coordinate, GroupArtifact, Project, Scope, TESTS_CLASSIFIER};
use jmdeps_common::platform;
use serde::Serialize;
use tracing::{debug, warn};

use crate::index::LocalModuleIndex;
use crate::locate::SourceSet;
use crate::versions::ManagedVersions;

/// Path named in the missing-mapping warning.
pub const OVERRIDE_MAPPINGS_HINT: &str = ".mvn/modules.properties";

/// Scope for a directive found in the given source set's descriptor.
///
/// `requires transitive` and `requires static transitive` are both `compile`;
/// only plain `requires static` maps to `provided`.
pub fn scope_for(source_set: SourceSet, kind: DirectiveKind) -> Scope {
    match (source_set, kind) {
        (SourceSet::Test, _) => Scope::Test,
        (SourceSet::Main, DirectiveKind::Requires) => Scope::Compile,
        (SourceSet::Main, DirectiveKind::RequiresTransitive) => Scope::Compile,
        (SourceSet::Main, DirectiveKind::RequiresStatic) => Scope::Provided,
        (SourceSet::Main, DirectiveKind::RequiresStaticTransitive) => Scope::Compile,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub coordinate: Coordinate,
    pub scope: Scope,
    pub classifier: Option<String>,
}

/// A recoverable problem: the directive is dropped, resolution carries on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    MissingMapping { module: String },
    MissingVersion { package: GroupArtifact },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMapping { module } => {
                write!(f, "Mapping missing in '{OVERRIDE_MAPPINGS_HINT}': {module}")
            }
            Self::MissingVersion { package } => write!(f, "Version missing: {package}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Target),
    /// Provided by the platform.
    Platform,
    /// The requiring project's own main module.
    SelfReference,
    Unresolved(Warning),
}

/// Per-project inputs: the requiring project and its managed versions.
pub struct ResolutionContext<'a> {
    pub project: &'a Project,
    pub managed: &'a ManagedVersions,
}

pub struct DependencyResolver<'a> {
    index: &'a LocalModuleIndex,
    overrides: &'a dyn ModuleMappings,
    shared: &'a dyn ModuleMappings,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(
        index: &'a LocalModuleIndex,
        overrides: &'a dyn ModuleMappings,
        shared: &'a dyn ModuleMappings,
    ) -> Self {
        Self {
            index,
            overrides,
            shared,
        }
    }

    /// Resolves one directive. Only a cyclic classifier expression is an error.
    pub fn resolve(
        &self,
        context: &ResolutionContext<'_>,
        source_set: SourceSet,
        kind: DirectiveKind,
        module_name: &str,
    ) -> Result<Resolution> {
        let project = context.project;

        if platform::is_platform_module(module_name) {
            debug!("'{}' is a platform module", module_name);
            return Ok(Resolution::Platform);
        }

        let scope = scope_for(source_set, kind);

        if let Some(local) = self.index.main_module(module_name) {
            if local.same_package(&project.group_artifact()) {
                debug!(
                    "'{}' is {}'s own module, not adding a dependency",
                    module_name, local
                );
                return Ok(Resolution::SelfReference);
            }
            return Ok(Resolution::Resolved(Target {
                coordinate: local.clone(),
                scope,
                classifier: None,
            }));
        }

        if let Some(local) = self.index.test_module(module_name) {
            return Ok(Resolution::Resolved(Target {
                coordinate: local.clone(),
                scope,
                classifier: Some(TESTS_CLASSIFIER.to_string()),
            }));
        }

        let Some(mapping) = self
            .overrides
            .get(module_name)
            .or_else(|| self.shared.get(module_name))
        else {
            let warning = Warning::MissingMapping {
                module: module_name.to_string(),
            };
            warn!("{}", warning);
            return Ok(Resolution::Unresolved(warning));
        };

        let classifier = mapping
            .classifier_expr
            .as_deref()
            .map(|expr| PropertySource::for_project(project).interpolate(expr))
            .transpose()?;

        let package = &mapping.package;
        let Some(version) = context
            .managed
            .find_version(&package.group, &package.artifact)
        else {
            let warning = Warning::MissingVersion {
                package: package.clone(),
            };
            warn!("{}", warning);
            return Ok(Resolution::Unresolved(warning));
        };

        debug!("'{}' resolved to {}:{}", module_name, package, version);
        Ok(Resolution::Resolved(Target {
            coordinate: Coordinate::new(&package.group, &package.artifact, version),
            scope,
            classifier,
        }))
    }
}

#[cfg(test)]
mod tests {
    use jmdeps_common::mapping::OverrideMappings;
    use jmdeps_common::model::{BuildSession, ManagedDependency};
    use jmdeps_common::ModuleDescriptor;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(SourceSet::Main, DirectiveKind::Requires, Scope::Compile)]
    #[case(SourceSet::Main, DirectiveKind::RequiresTransitive, Scope::Compile)]
    #[case(SourceSet::Main, DirectiveKind::RequiresStatic, Scope::Provided)]
    #[case(SourceSet::Main, DirectiveKind::RequiresStaticTransitive, Scope::Compile)]
    #[case(SourceSet::Test, DirectiveKind::Requires, Scope::Test)]
    #[case(SourceSet::Test, DirectiveKind::RequiresTransitive, Scope::Test)]
    #[case(SourceSet::Test, DirectiveKind::RequiresStatic, Scope::Test)]
    #[case(SourceSet::Test, DirectiveKind::RequiresStaticTransitive, Scope::Test)]
    fn scope_table(#[case] source_set: SourceSet, #[case] kind: DirectiveKind, #[case] expected: Scope) {
        assert_eq!(scope_for(source_set, kind), expected);
    }

    struct Fixture {
        index: LocalModuleIndex,
        overrides: OverrideMappings,
        shared: OverrideMappings,
        session: BuildSession,
    }

    impl Fixture {
        fn new() -> Self {
            let mut index = LocalModuleIndex::default();
            let lib = Project::new("org.example", "lib", "1.0");
            let app = Project::new("org.example", "app", "1.0");
            index.insert(&lib, SourceSet::Main, ModuleDescriptor::parse("module org.example.lib {}").unwrap());
            index.insert(&lib, SourceSet::Test, ModuleDescriptor::parse("module org.example.lib.fixtures {}").unwrap());
            index.insert(&app, SourceSet::Main, ModuleDescriptor::parse("module org.example.app {}").unwrap());

            let overrides = OverrideMappings::parse(
                "overrides",
                "jakarta.mail=com.sun.mail:jakarta.mail\norg.example.shadowed=org.local:shadowed\n",
            )
            .unwrap();
            // Stands in for the bundled table so the test controls its contents.
            let shared = OverrideMappings::parse(
                "shared",
                "jakarta.mail=org.eclipse.angus:jakarta.mail\n\
                 org.example.shadowed=org.shared:shadowed\n\
                 org.slf4j=org.slf4j:slf4j-api\n\
                 javafx.base=org.openjfx:javafx-base|${javafx.platform}\n",
            )
            .unwrap();

            let mut session = BuildSession::new();
            session.add_project(
                app.with_property("javafx.platform", "linux")
                    .with_managed(ManagedDependency::new("com.sun.mail", "jakarta.mail", "2.0.1"))
                    .with_managed(ManagedDependency::new("org.openjfx", "javafx-base", "21"))
                    .with_managed(ManagedDependency::new("org.local", "shadowed", "3")),
            );
            Self {
                index,
                overrides,
                shared,
                session,
            }
        }

        fn resolve(&self, source_set: SourceSet, kind: DirectiveKind, module: &str) -> Result<Resolution> {
            let id = self.session.reactor()[0];
            let project = self.session.project(id).unwrap();
            let managed = ManagedVersions::collect(&self.session, id);
            let context = ResolutionContext {
                project,
                managed: &managed,
            };
            DependencyResolver::new(&self.index, &self.overrides, &self.shared)
                .resolve(&context, source_set, kind, module)
        }
    }

    #[test]
    fn platform_modules_are_skipped() {
        let fixture = Fixture::new();
        for module in platform::platform_modules() {
            for kind in DirectiveKind::ALL {
                assert_eq!(
                    fixture.resolve(SourceSet::Main, kind, module).unwrap(),
                    Resolution::Platform
                );
            }
        }
    }

    #[test]
    fn local_main_module_resolves_without_classifier() {
        let fixture = Fixture::new();
        let resolution = fixture
            .resolve(SourceSet::Main, DirectiveKind::Requires, "org.example.lib")
            .unwrap();
        assert_eq!(
            resolution,
            Resolution::Resolved(Target {
                coordinate: Coordinate::new("org.example", "lib", "1.0"),
                scope: Scope::Compile,
                classifier: None,
            })
        );
    }

    #[rstest]
    fn own_main_module_is_suppressed(
        #[values(
            DirectiveKind::Requires,
            DirectiveKind::RequiresTransitive,
            DirectiveKind::RequiresStatic,
            DirectiveKind::RequiresStaticTransitive
        )]
        kind: DirectiveKind,
        #[values(SourceSet::Main, SourceSet::Test)] source_set: SourceSet,
    ) {
        let fixture = Fixture::new();
        assert_eq!(
            fixture.resolve(source_set, kind, "org.example.app").unwrap(),
            Resolution::SelfReference
        );
    }

    #[test]
    fn local_test_module_gets_tests_classifier() {
        let fixture = Fixture::new();
        let resolution = fixture
            .resolve(SourceSet::Test, DirectiveKind::Requires, "org.example.lib.fixtures")
            .unwrap();
        assert_eq!(
            resolution,
            Resolution::Resolved(Target {
                coordinate: Coordinate::new("org.example", "lib", "1.0"),
                scope: Scope::Test,
                classifier: Some("tests".to_string()),
            })
        );
    }

    #[test]
    fn override_wins_over_shared() {
        let fixture = Fixture::new();
        let resolution = fixture
            .resolve(SourceSet::Main, DirectiveKind::Requires, "jakarta.mail")
            .unwrap();
        assert_eq!(
            resolution,
            Resolution::Resolved(Target {
                coordinate: Coordinate::new("com.sun.mail", "jakarta.mail", "2.0.1"),
                scope: Scope::Compile,
                classifier: None,
            })
        );
    }

    #[test]
    fn classifier_is_interpolated() {
        let fixture = Fixture::new();
        let Resolution::Resolved(target) = fixture
            .resolve(SourceSet::Main, DirectiveKind::RequiresStatic, "javafx.base")
            .unwrap()
        else {
            panic!("javafx.base should resolve");
        };
        assert_eq!(target.coordinate.to_string(), "org.openjfx:javafx-base:21");
        assert_eq!(target.scope, Scope::Provided);
        assert_eq!(target.classifier.as_deref(), Some("linux"));
    }

    #[test]
    fn missing_mapping_warns() {
        let fixture = Fixture::new();
        let resolution = fixture
            .resolve(SourceSet::Main, DirectiveKind::Requires, "commons.math3")
            .unwrap();
        match resolution {
            Resolution::Unresolved(warning) => assert_eq!(
                warning.to_string(),
                "Mapping missing in '.mvn/modules.properties': commons.math3"
            ),
            other => panic!("expected a warning, got {other:?}"),
        }
    }

    #[test]
    fn missing_version_warns() {
        let fixture = Fixture::new();
        let resolution = fixture
            .resolve(SourceSet::Main, DirectiveKind::Requires, "org.slf4j")
            .unwrap();
        match resolution {
            Resolution::Unresolved(warning) => {
                assert_eq!(warning.to_string(), "Version missing: org.slf4j:slf4j-api")
            }
            other => panic!("expected a warning, got {other:?}"),
        }
    }

    #[test]
    fn undefined_classifier_property_is_kept_verbatim() {
        let mut fixture = Fixture::new();
        let id = fixture.session.reactor()[0];
        fixture
            .session
            .project_mut(id)
            .unwrap()
            .properties
            .clear();
        match fixture
            .resolve(SourceSet::Main, DirectiveKind::Requires, "javafx.base")
            .unwrap()
        {
            Resolution::Resolved(target) => {
                assert_eq!(target.classifier.as_deref(), Some("${javafx.platform}"))
            }
            other => panic!("javafx.base should resolve, got {other:?}"),
        }
    }

    #[test]
    fn cyclic_classifier_is_fatal() {
        let mut fixture = Fixture::new();
        let id = fixture.session.reactor()[0];
        fixture
            .session
            .project_mut(id)
            .unwrap()
            .properties
            .insert("javafx.platform".to_string(), "${javafx.platform}".to_string());
        assert!(fixture
            .resolve(SourceSet::Main, DirectiveKind::Requires, "javafx.base")
            .is_err());
    }
}
