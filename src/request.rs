//! Per-call request: behaviour flags plus the optional composer handle.

use std::collections::BTreeSet;

use crate::config::PredictorConfig;

/// Ambiguity expansion source for the typed key.
///
/// For romaji input "あk" the pair is ("あ", {"か", "き", ...}); for kana
/// input "あか" it is ("あ", {"か", "が"}).
pub trait Composer {
    /// (committed base, alternative next-morae strings).
    fn queries_for_prediction(&self) -> (String, BTreeSet<String>);
}

/// Everything a single `predict` call needs besides the segments.
#[derive(Clone, Copy)]
pub struct ConversionRequest<'a> {
    pub config: PredictorConfig,
    /// Mobile-style mode: realtime conversion is the primary candidate
    /// source and the LM cost variant is used.
    pub mixed_conversion: bool,
    /// Suggestions may be produced for an empty key right after a commit.
    pub zero_query_suggestion: bool,
    pub composer: Option<&'a dyn Composer>,
}

impl Default for ConversionRequest<'_> {
    fn default() -> Self {
        Self {
            config: PredictorConfig::default(),
            mixed_conversion: false,
            zero_query_suggestion: false,
            composer: None,
        }
    }
}

impl<'a> ConversionRequest<'a> {
    pub fn new(config: PredictorConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn with_composer(mut self, composer: &'a dyn Composer) -> Self {
        self.composer = Some(composer);
        self
    }
}
