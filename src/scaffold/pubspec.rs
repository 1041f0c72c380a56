//! `pubspec.yaml` for a generated project.

use super::config::{Routing, ScaffoldConfig, StateManagement};

/// Packages every generated project depends on.
const COMMON_DEPENDENCIES: &[&str] = &[
    "dio: ^5.4.0",
    "freezed_annotation: ^2.4.1",
    "json_annotation: ^4.8.1",
    "equatable: ^2.0.5",
    "dartz: ^0.10.1",
    "get_it: ^7.6.4",
    "injectable: ^2.3.2",
    "flutter_secure_storage: ^9.0.0",
    "intl: ^0.18.1",
];

const COMMON_DEV_DEPENDENCIES: &[&str] = &[
    "build_runner: ^2.4.8",
    "freezed: ^2.4.6",
    "json_serializable: ^6.7.1",
    "injectable_generator: ^2.4.1",
    "mocktail: ^1.0.1",
];

/// Dependency lines, each a `name: constraint` entry (possibly multi-line).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl DependencySet {
    fn add(&mut self, entries: &[&str]) {
        self.dependencies.extend(entries.iter().map(|e| e.to_string()));
    }

    fn add_dev(&mut self, entries: &[&str]) {
        self.dev_dependencies
            .extend(entries.iter().map(|e| e.to_string()));
    }
}

/// Dependencies implied by the configuration, in declaration order.
pub fn dependencies_for(config: &ScaffoldConfig) -> DependencySet {
    let mut deps = DependencySet::default();
    deps.add(&["flutter:\n    sdk: flutter"]);
    deps.add_dev(&["flutter_test:\n    sdk: flutter", "flutter_lints: ^3.0.1"]);

    match config.state_management {
        StateManagement::Riverpod => {
            deps.add(&["flutter_riverpod: ^2.4.9", "riverpod_annotation: ^2.3.3"]);
            deps.add_dev(&["riverpod_generator: ^2.3.9"]);
        }
        StateManagement::Bloc => {
            deps.add(&["flutter_bloc: ^8.1.3", "bloc: ^8.1.2"]);
            deps.add_dev(&["bloc_test: ^9.1.5"]);
        }
        StateManagement::Provider => deps.add(&["provider: ^6.1.1"]),
        StateManagement::Other => {}
    }

    match config.routing {
        Routing::GoRouter => deps.add(&["go_router: ^13.0.1"]),
        Routing::AutoRoute => {
            deps.add(&["auto_route: ^7.8.4"]);
            deps.add_dev(&["auto_route_generator: ^7.3.2"]);
        }
        Routing::None => {}
    }

    deps.add(COMMON_DEPENDENCIES);
    deps.add_dev(COMMON_DEV_DEPENDENCIES);

    if config.firebase {
        deps.add(&["firebase_core: ^2.24.2", "firebase_auth: ^4.16.0"]);
        if config.firebase_crashlytics {
            deps.add(&["firebase_crashlytics: ^3.4.9"]);
        }
    }

    deps
}

pub fn render_pubspec(config: &ScaffoldConfig) -> String {
    let deps = dependencies_for(config);
    let dependencies = deps.dependencies.join("\n  ");
    let dev_dependencies = deps.dev_dependencies.join("\n  ");

    format!(
        r#"name: {name}
description: {description}
version: 1.0.0+1
publish_to: none

environment:
  sdk: ">=3.0.0 <4.0.0"
  flutter: ">=3.16.0"

dependencies:
  {dependencies}

dev_dependencies:
  {dev_dependencies}

flutter:
  uses-material-design: true
  generate: true

  assets:
    - assets/images/
    - assets/icons/
"#,
        name = config.project_name,
        description = config.description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{audit_manifest, extract_packages};

    fn config(json: &str) -> ScaffoldConfig {
        ScaffoldConfig::from_json_or_default(json)
    }

    #[test]
    fn test_default_is_riverpod_with_go_router() {
        let pubspec = render_pubspec(&ScaffoldConfig::default());
        assert!(pubspec.starts_with("name: my_app\ndescription: A new Flutter application\n"));
        assert!(pubspec.contains(
            "dependencies:\n  flutter:\n    sdk: flutter\n  flutter_riverpod: ^2.4.9\n  riverpod_annotation: ^2.3.3\n  go_router: ^13.0.1\n  dio: ^5.4.0\n"
        ));
        assert!(pubspec.contains(
            "dev_dependencies:\n  flutter_test:\n    sdk: flutter\n  flutter_lints: ^3.0.1\n  riverpod_generator: ^2.3.9\n  build_runner: ^2.4.8\n"
        ));
        assert!(!pubspec.contains("firebase"));
    }

    #[test]
    fn test_bloc_packages() {
        let packages =
            extract_packages(&render_pubspec(&config(r#"{"state_management": "bloc"}"#)));
        for name in ["flutter_bloc", "bloc", "bloc_test"] {
            assert!(packages.contains(name), "missing {name}");
        }
        assert!(!packages.contains("flutter_riverpod"));
    }

    #[test]
    fn test_auto_route_and_provider() {
        let deps = dependencies_for(&config(
            r#"{"state_management": "provider", "routing": "auto_route"}"#,
        ));
        assert!(deps.dependencies.contains(&"provider: ^6.1.1".to_string()));
        assert!(deps.dependencies.contains(&"auto_route: ^7.8.4".to_string()));
        assert!(deps
            .dev_dependencies
            .contains(&"auto_route_generator: ^7.3.2".to_string()));
    }

    #[test]
    fn test_crashlytics_requires_firebase() {
        let without = dependencies_for(&config(r#"{"firebase_crashlytics": true}"#));
        assert!(!without.dependencies.iter().any(|d| d.starts_with("firebase")));

        let with = dependencies_for(&config(
            r#"{"firebase": true, "firebase_crashlytics": true}"#,
        ));
        let firebase: Vec<_> = with
            .dependencies
            .iter()
            .filter(|d| d.starts_with("firebase"))
            .collect();
        assert_eq!(
            firebase,
            vec![
                "firebase_core: ^2.24.2",
                "firebase_auth: ^4.16.0",
                "firebase_crashlytics: ^3.4.9"
            ]
        );
    }

    #[test]
    fn test_generated_manifest_passes_audit() {
        let audit = audit_manifest(&render_pubspec(&ScaffoldConfig::default()));
        assert!(audit.is_clean(), "{audit:?}");
    }
}
