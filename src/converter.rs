//! Converter-side collaborators, injected at predictor construction.
//!
//! All of these are read-only from the predictor's point of view and must
//! tolerate concurrent calls.

use crate::segments::Segments;

/// Full-sentence realtime conversion of the typed key. Appends candidates
/// to `conversion_segment(0)` and respects `max_prediction_candidates_size`.
pub trait ImmutableConverter: Send + Sync {
    fn convert(&self, segments: &mut Segments) -> bool;
}

/// Bigram transition costs between part-of-speech ids.
pub trait Connector: Send + Sync {
    fn transition_cost(&self, rid: u16, lid: u16) -> i32;
}

/// Per-POS penalty for a word ending a phrase.
pub trait Segmenter: Send + Sync {
    fn suffix_penalty(&self, rid: u16) -> i32;
}
