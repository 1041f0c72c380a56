//! Scaffold options, read from JSON and merged over defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateManagement {
    Riverpod,
    Bloc,
    Provider,
    /// Anything else adds no state-management packages
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Routing {
    GoRouter,
    AutoRoute,
    #[serde(other)]
    None,
}

/// Every field is optional in the input document; missing ones keep
/// their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub project_name: String,
    pub description: String,
    pub state_management: StateManagement,
    pub routing: Routing,
    pub firebase: bool,
    /// Only honoured together with `firebase`
    pub firebase_crashlytics: bool,
    pub platforms: Vec<String>,
    /// Parent directory of the generated project
    pub output_path: PathBuf,
    pub repo_url: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            project_name: "my_app".to_string(),
            description: "A new Flutter application".to_string(),
            state_management: StateManagement::Riverpod,
            routing: Routing::GoRouter,
            firebase: false,
            firebase_crashlytics: false,
            platforms: vec!["android".to_string(), "ios".to_string(), "web".to_string()],
            output_path: PathBuf::from("."),
            repo_url: "https://github.com/user/repo".to_string(),
        }
    }
}

impl ScaffoldConfig {
    /// Merge a JSON object over the defaults key by key.
    ///
    /// Blank input, invalid JSON or a non-object document yields the
    /// defaults; a single key with an unusable value is skipped while the
    /// other keys still apply.
    pub fn from_json_or_default(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(overrides)) => Self::default().merged(overrides),
            Ok(_) => {
                tracing::warn!("ignoring scaffold configuration that is not a JSON object");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring invalid scaffold configuration");
                Self::default()
            }
        }
    }

    /// Apply each override that still deserializes; others are logged and dropped.
    fn merged(self, overrides: Map<String, Value>) -> Self {
        let Ok(Value::Object(mut current)) = serde_json::to_value(&self) else {
            return self;
        };

        for (key, value) in overrides {
            let mut candidate = current.clone();
            candidate.insert(key.clone(), value);
            match serde_json::from_value::<Self>(Value::Object(candidate.clone())) {
                Ok(_) => current = candidate,
                Err(e) => tracing::warn!(key, error = %e, "skipping scaffold option"),
            }
        }

        serde_json::from_value(Value::Object(current)).unwrap_or(self)
    }

    /// Directory the project is generated into.
    pub fn project_dir(&self) -> PathBuf {
        self.output_path.join(&self.project_name)
    }

    /// Database name derived from the project name.
    pub fn db_name(&self) -> String {
        self.project_name.replace('-', "_")
    }
}
