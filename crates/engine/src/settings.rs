//! Pipeline settings.
//!
//! Plain serde struct with per-field defaults; `from_env` overlays values
//! from `CHRONICLER_*` environment variables.

use serde::{Deserialize, Serialize};

use chronicler_nlp::DEFAULT_MATCH_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineSettings {
    /// Inclusive similarity threshold for fuzzy identity resolution.
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    /// Cap on ranked fuzzy match lists.
    #[serde(default = "default_max_ranked_matches")]
    pub max_ranked_matches: usize,
}

fn default_match_threshold() -> f64 {
    DEFAULT_MATCH_THRESHOLD
}

fn default_max_ranked_matches() -> usize {
    5
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            match_threshold: default_match_threshold(),
            max_ranked_matches: default_max_ranked_matches(),
        }
    }
}

impl PipelineSettings {
    /// Defaults overridden by `CHRONICLER_MATCH_THRESHOLD` and
    /// `CHRONICLER_MAX_RANKED_MATCHES` where set.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("CHRONICLER"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.match_threshold, DEFAULT_MATCH_THRESHOLD);
        assert_eq!(settings.max_ranked_matches, 5);
    }

    #[test]
    fn deserializing_an_empty_map_uses_field_defaults() {
        let settings: PipelineSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, PipelineSettings::default());
    }

    #[test]
    fn explicit_values_win_over_defaults() {
        let settings: PipelineSettings =
            serde_json::from_str(r#"{"match_threshold": 0.9, "max_ranked_matches": 2}"#).unwrap();
        assert_eq!(settings.match_threshold, 0.9);
        assert_eq!(settings.max_ranked_matches, 2);
    }
}
