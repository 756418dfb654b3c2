//! Ranking costs, in the -500 * log(prob) unit shared with the converter.

use crate::dict::{Node, NodeArena};
use crate::request::ConversionRequest;
use crate::segments::{RequestType, Segments};

use super::{DictionaryPredictor, Prediction, PredictionKinds};

/// The cost unit: cost = -COST_FACTOR * ln(prob).
const COST_FACTOR: f64 = 500.0;

/// 500 * ln(50): an exact candidate is treated as 50 times more frequent
/// than a longer completion in mixed mode.
const NOT_EXACT_PENALTY: i32 = 1956;

/// 500 * ln(10): a candidate reached only through ambiguity expansion is
/// treated as 10 times less frequent.
const KEY_EXPANSION_PENALTY: i32 = 1151;

/// Noun-to-noun transition cost, substituted for the missing transition
/// between the committed word and a bigram continuation.
const DEFAULT_TRANSITION_COST: i32 = 1347;

/// Fallback for a history candidate whose cost was never set.
const DEFAULT_PREV_COST: i32 = 5000;

// Long sentence-like completions of a very short query are suppressed
// unless the candidate set is small or the completion is very frequent.
const AGGRESSIVE_MIN_RESULTS: usize = 10;
const AGGRESSIVE_MIN_KEY_LEN: usize = 8;
const AGGRESSIVE_MIN_COST: i32 = 5000;
const AGGRESSIVE_QUERY_RATIO: f64 = 0.4;

/// A long completion of a short query, e.g. "ただしい" showing
/// "ただしいけめんにかぎる". The ratio bound is inclusive: for
/// key_len = 10, query_len = 4 is gated.
fn is_aggressive_suggestion(
    query_len: usize,
    key_len: usize,
    cost: i32,
    is_suggestion: bool,
    total_results: usize,
) -> bool {
    is_suggestion
        && total_results >= AGGRESSIVE_MIN_RESULTS
        && key_len >= AGGRESSIVE_MIN_KEY_LEN
        && cost >= AGGRESSIVE_MIN_COST
        && query_len <= (AGGRESSIVE_QUERY_RATIO * key_len as f64) as usize
}

impl DictionaryPredictor<'_> {
    pub(crate) fn assign_costs(
        &self,
        request: &ConversionRequest,
        segments: &Segments,
        arena: &NodeArena,
        results: &mut [Prediction],
    ) {
        if request.mixed_conversion {
            self.assign_lm_cost(segments, arena, results);
        } else {
            self.assign_prediction_cost(segments, arena, results);
        }
        apply_key_expansion_penalty(segments, arena, results);
    }

    /// transition_cost[rid][node.lid] + node.wcost, plus the suffix penalty
    /// for results that did not come from realtime conversion (those already
    /// carry phrase-boundary penalties).
    fn lm_cost(&self, kinds: PredictionKinds, node: &Node, rid: u16) -> i32 {
        let mut cost = self.connector.transition_cost(rid, node.lid) + node.wcost;
        if !kinds.contains(PredictionKinds::REALTIME) {
            cost += self.segmenter.suffix_penalty(node.rid);
        }
        cost
    }

    /// Desktop ranking: reward the characters the user saves.
    ///
    /// cost = -500 * log(prob(w) * (1 + remain_length)), where remain_length
    /// is how much of the candidate's reading the user has not typed yet.
    /// Two candidates with the same reading get the same length bonus, so
    /// within one reading the order stays the language-model order, exactly
    /// as in conversion.
    fn assign_prediction_cost(
        &self,
        segments: &Segments,
        arena: &NodeArena,
        results: &mut [Prediction],
    ) {
        let rid = segments.last_history_candidate().map_or(0, |c| c.rid);

        let input_key = segments.conversion_key();
        let (history_key, _) = segments.history_key_value().unwrap_or(("", ""));
        let bigram_key_len = history_key.chars().count() + input_key.chars().count();
        let unigram_key_len = input_key.chars().count();
        let is_suggestion = segments.request_type == RequestType::Suggestion;
        let total_results = results.len();

        for result in results.iter_mut() {
            let node = arena.get(result.node);
            let lm_cost = self.lm_cost(result.kinds, node, rid);

            let query_len = if result.kinds.contains(PredictionKinds::BIGRAM) {
                bigram_key_len
            } else {
                unigram_key_len
            };
            let key_len = node.key.chars().count();

            if is_aggressive_suggestion(query_len, key_len, lm_cost, is_suggestion, total_results)
            {
                result.cost = None;
                continue;
            }

            let remain_length = key_len.saturating_sub(query_len);
            result.cost =
                Some(lm_cost - (COST_FACTOR * (1.0 + remain_length as f64).ln()) as i32);
        }
    }

    /// Mixed-mode ranking: plain language-model cost, with exact candidates
    /// boosted over longer completions and bigram continuations normalised
    /// by a generic transition in place of the unknowable real one.
    fn assign_lm_cost(&self, segments: &Segments, arena: &NodeArena, results: &mut [Prediction]) {
        let mut rid = 0;
        let mut prev_cost = 0;
        if let Some(candidate) = segments.last_history_candidate() {
            rid = candidate.rid;
            prev_cost = candidate.cost;
            if prev_cost == 0 {
                prev_cost = DEFAULT_PREV_COST;
            }
        }

        let input_key_len = segments.conversion_key().chars().count();

        for result in results.iter_mut() {
            let node = arena.get(result.node);
            let mut cost = self.lm_cost(result.kinds, node, rid);

            if result.kinds.contains(PredictionKinds::UNIGRAM) {
                let key_len = node.key.chars().count();
                if key_len > input_key_len {
                    cost += NOT_EXACT_PENALTY;
                }
            }
            if result.kinds.contains(PredictionKinds::BIGRAM) {
                cost += DEFAULT_TRANSITION_COST - prev_cost;
            }
            result.cost = Some(cost);
        }
    }
}

/// Candidates reachable only through the ambiguity expansion are demoted
/// below those matching the literally typed key.
fn apply_key_expansion_penalty(segments: &Segments, arena: &NodeArena, results: &mut [Prediction]) {
    if segments.conversion_segments.is_empty() {
        return;
    }
    let conversion_key = segments.conversion_key();
    for result in results.iter_mut() {
        let Some(cost) = result.cost else {
            continue;
        };
        if !arena.get(result.node).key.starts_with(conversion_key) {
            result.cost = Some(cost + KEY_EXPANSION_PENALTY);
        }
    }
}
