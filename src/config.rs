//! Predictor behaviour flags loaded from TOML.
//!
//! Unlike the conversion settings singleton of the wider engine, the
//! predictor reads its config from the `ConversionRequest` exactly once
//! per call, so this type is a plain value with no global state.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_TOML: &str = include_str!("default_config.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Run the immutable converter on the typed key and mix the results in.
    pub use_realtime_conversion: bool,
    /// Allow dictionary-based suggestions (unigram/bigram/suffix) in
    /// SUGGESTION mode.
    pub use_dictionary_suggest: bool,
    /// Expand the typed key through the composer's ambiguity set before
    /// predictive lookup.
    pub expand_ambiguous_key: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            use_realtime_conversion: true,
            use_dictionary_suggest: true,
            expand_ambiguous_key: false,
        }
    }
}

pub fn parse_config_toml(toml_str: &str) -> Result<PredictorConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
}
