//! Dictionary-based prediction: strategy selection, candidate aggregation,
//! cost assignment, filtering, and emission.
//!
//! One `predict` call owns a fresh node arena and result vector; the only
//! persistent state is the set of collaborator handles injected at
//! construction.

mod aggregate;
mod cost;
mod emit;
mod filter;
pub mod strategy;
pub(crate) mod testutil;

#[cfg(test)]
mod tests;

pub use strategy::PredictionKinds;

use tracing::{debug, debug_span};

use crate::converter::{Connector, ImmutableConverter, Segmenter};
use crate::dict::{Dictionary, NodeArena, NodeId, PosMatcher};
use crate::request::ConversionRequest;
use crate::segments::{RequestType, Segments};

/// Black-list of surfaces that must not be suggested.
pub trait SuggestionFilter: Send + Sync {
    fn is_bad_suggestion(&self, value: &str) -> bool;
}

/// One aggregated candidate before emission.
///
/// `cost: None` marks a result excluded by the cost model (the emitter
/// stops at the first such result after heap ordering); `filtered` marks
/// results dropped by the mis-spelling and bigram-continuation filters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Prediction {
    pub node: NodeId,
    pub kinds: PredictionKinds,
    pub cost: Option<i32>,
    pub filtered: bool,
}

impl Prediction {
    pub(crate) fn new(node: NodeId, kinds: PredictionKinds) -> Self {
        Self {
            node,
            kinds,
            cost: None,
            filtered: false,
        }
    }
}

/// The prediction core. Borrows all collaborators; owns nothing persistent
/// beyond the counter-suffix POS id.
pub struct DictionaryPredictor<'a> {
    immutable_converter: &'a dyn ImmutableConverter,
    dictionary: &'a dyn Dictionary,
    suffix_dictionary: &'a dyn Dictionary,
    connector: &'a dyn Connector,
    segmenter: &'a dyn Segmenter,
    suggestion_filter: &'a dyn SuggestionFilter,
    counter_suffix_word_id: u16,
}

impl<'a> DictionaryPredictor<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        immutable_converter: &'a dyn ImmutableConverter,
        dictionary: &'a dyn Dictionary,
        suffix_dictionary: &'a dyn Dictionary,
        connector: &'a dyn Connector,
        segmenter: &'a dyn Segmenter,
        suggestion_filter: &'a dyn SuggestionFilter,
        pos_matcher: &dyn PosMatcher,
    ) -> Self {
        Self {
            immutable_converter,
            dictionary,
            suffix_dictionary,
            connector,
            segmenter,
            suggestion_filter,
            counter_suffix_word_id: pos_matcher.counter_suffix_word_id(),
        }
    }

    /// Predict with the default request.
    pub fn predict(&self, segments: &mut Segments) -> bool {
        self.predict_for_request(&ConversionRequest::default(), segments)
    }

    /// Run the full pipeline. Returns true iff at least one candidate was
    /// appended to `conversion_segment(0)`.
    pub fn predict_for_request(
        &self,
        request: &ConversionRequest,
        segments: &mut Segments,
    ) -> bool {
        let _span = debug_span!("predict", request_type = ?segments.request_type).entered();

        let mut arena = NodeArena::new();
        let mut results: Vec<Prediction> = Vec::new();

        if !self.aggregate_prediction(request, segments, &mut arena, &mut results) {
            return false;
        }

        self.assign_costs(request, segments, &arena, &mut results);
        self.remove_predictions(request, segments, &arena, &mut results);
        self.emit(request, segments, &arena, &results)
    }

    fn aggregate_prediction(
        &self,
        request: &ConversionRequest,
        segments: &mut Segments,
        arena: &mut NodeArena,
        results: &mut Vec<Prediction>,
    ) -> bool {
        let kinds = strategy::select(segments, request);
        if kinds.is_empty() {
            return false;
        }

        match segments.request_type {
            // Partial modes ask for the conversion of the text before the
            // cursor, so only candidates whose key exactly matches the query
            // are useful. Realtime conversion is the one source with that
            // property.
            RequestType::PartialSuggestion | RequestType::PartialPrediction => {
                self.aggregate_realtime(kinds, request, segments, arena, results);
            }
            _ => {
                self.aggregate_realtime(kinds, request, segments, arena, results);
                self.aggregate_unigram(kinds, request, segments, arena, results);
                self.aggregate_bigram(kinds, request, segments, arena, results);
                self.aggregate_suffix(kinds, request, segments, arena, results);
            }
        }

        if results.is_empty() {
            debug!("aggregation produced no results");
            return false;
        }
        true
    }

    fn remove_predictions(
        &self,
        request: &ConversionRequest,
        segments: &Segments,
        arena: &NodeArena,
        results: &mut [Prediction],
    ) {
        // Spelling correction is a desktop feature; mixed mode has none.
        if request.mixed_conversion {
            return;
        }
        let input_key_len = segments.conversion_key().chars().count();
        filter::remove_miss_spelled_candidates(arena, results, input_key_len);
    }
}
