//! Session configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Length of one observation window.
    #[serde(with = "duration_secs")]
    pub window: Duration,
    /// Number of resolved detections kept for display.
    pub history_capacity: usize,
    pub idle_prompt: String,
    pub no_match_text: String,
    pub no_match_price: String,
    /// Set code (label prefix before the first `-`) to set name.
    pub set_names: BTreeMap<String, String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(5),
            history_capacity: 10,
            idle_prompt: "Press 's' to start matching and 'q' to quit.".to_string(),
            no_match_text: "No matches found.".to_string(),
            no_match_price: "NA".to_string(),
            set_names: default_set_names(),
        }
    }
}

impl SessionConfig {
    /// Set name for the set code leading `label`, e.g. `OP10-001_alt` -> OP10.
    pub fn set_name_for(&self, label: &str) -> Option<&str> {
        let code = label.split('-').next()?;
        self.set_names.get(code).map(String::as_str)
    }
}

fn default_set_names() -> BTreeMap<String, String> {
    [
        ("OP01", "Romance Dawn"),
        ("OP02", "Paramount War"),
        ("OP03", "Pillars of Strength"),
        ("OP04", "Kingdoms of Intrigue"),
        ("OP05", "Awakening of the New Era"),
        ("OP06", "Wings of the Captain"),
        ("OP07", "500 Years in the Future"),
        ("OP08", "Two Legends"),
        ("OP09", "Emperors in the New World"),
        ("OP10", "Royal Blood"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

/// Durations are stored as fractional seconds in config files.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_name_lookup() {
        let config = SessionConfig::default();
        assert_eq!(config.set_name_for("OP10-001_alt"), Some("Royal Blood"));
        assert_eq!(config.set_name_for("ST01-001"), None);
    }
}
