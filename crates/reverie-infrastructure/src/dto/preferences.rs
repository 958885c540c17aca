use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const PREFERENCES_SCHEMA_VERSION: &str = "1.0.0";

/// On-disk layout of `preferences.toml`: a flat key to JSON-string table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesFileDto {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

fn default_version() -> String {
    PREFERENCES_SCHEMA_VERSION.to_string()
}

impl Default for PreferencesFileDto {
    fn default() -> Self {
        Self {
            version: default_version(),
            values: BTreeMap::new(),
        }
    }
}
