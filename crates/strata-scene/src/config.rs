// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scene-wide configuration.
//!
//! The configuration is plain data and round-trips through RON, the format the
//! engine uses for its hand-edited settings files.

use crate::error::{Result, SceneError};
use serde::{Deserialize, Serialize};

/// What a scene does when a component is attached to an object that already
/// holds a component of the same concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Refuse the new component and leave the object untouched.
    #[default]
    Reject,
    /// Detach the old component (its owner reference is cleared) and attach
    /// the new one in its place.
    Replace,
}

/// Settings that control how a [`Scene`](crate::scene::Scene) behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Human-readable scene name.
    pub name: String,
    /// Policy applied by [`Scene::attach_component`](crate::scene::Scene::attach_component).
    pub duplicate_component: DuplicatePolicy,
    /// Emits one debug log line per assigned ID during ID generation.
    pub log_id_generation: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: String::from("scene"),
            duplicate_component: DuplicatePolicy::Reject,
            log_id_generation: false,
        }
    }
}

impl SceneConfig {
    /// Creates a default configuration with the given scene name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a configuration from a RON document. Missing fields take their
    /// default values.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        ron::from_str(source).map_err(|e| SceneError::InvalidConfig(e.to_string()))
    }

    /// Serializes the configuration to pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SceneError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rejects_duplicates() {
        let config = SceneConfig::default();
        assert_eq!(config.duplicate_component, DuplicatePolicy::Reject);
        assert!(!config.log_id_generation);
    }

    #[test]
    fn test_parse_partial_document() {
        let config = SceneConfig::from_ron_str("(name: \"cornell\", duplicate_component: Replace)")
            .expect("valid document");
        assert_eq!(config.name, "cornell");
        assert_eq!(config.duplicate_component, DuplicatePolicy::Replace);
        assert!(!config.log_id_generation);
    }

    #[test]
    fn test_parse_unknown_policy_fails() {
        let err = SceneConfig::from_ron_str("(duplicate_component: Merge)").unwrap_err();
        assert!(matches!(err, SceneError::InvalidConfig(_)));
    }

    #[test]
    fn test_ron_round_trip() {
        let config = SceneConfig {
            name: String::from("sponza"),
            duplicate_component: DuplicatePolicy::Replace,
            log_id_generation: true,
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(SceneConfig::from_ron_str(&text).unwrap(), config);
    }
}
