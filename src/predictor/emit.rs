//! Emission: pop results in cost order and append surviving candidates to
//! the caller's segment.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use tracing::debug;

use crate::dict::{NodeArena, NodeAttributes};
use crate::request::ConversionRequest;
use crate::segments::{Candidate, CandidateAttributes, Segments};

use super::filter::miss_spelled_position;
use super::{DictionaryPredictor, Prediction, PredictionKinds};

/// Heap key: costless (excluded) results order after every real cost, and
/// equal costs break ties by result index so emission is deterministic.
fn heap_key(result: &Prediction, index: usize) -> Reverse<(i64, usize)> {
    let cost = match result.cost {
        Some(cost) => cost as i64,
        None => i64::MAX,
    };
    Reverse((cost, index))
}

impl DictionaryPredictor<'_> {
    /// Append up to `max_prediction_candidates_size` candidates in ascending
    /// cost order. Returns true iff at least one was appended.
    pub(crate) fn emit(
        &self,
        request: &ConversionRequest,
        segments: &mut Segments,
        arena: &NodeArena,
        results: &[Prediction],
    ) -> bool {
        let mixed_conversion = request.mixed_conversion;

        let input_key = segments.conversion_key().to_string();
        let input_key_len = input_key.chars().count();
        let (history_key, history_value) = segments
            .history_key_value()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .unwrap_or_default();
        // Exact-match duplicate test for bigram results; deliberately built
        // without ambiguity expansion.
        let exact_bigram_key = format!("{history_key}{input_key}");

        let size = segments.max_prediction_candidates_size.min(results.len());

        // The heap is built over (cost, index) pairs so the results vector
        // itself stays untouched; entries are popped lazily because skipped
        // values must not count against `size`.
        let mut heap: BinaryHeap<Reverse<(i64, usize)>> = results
            .iter()
            .enumerate()
            .map(|(i, r)| heap_key(r, i))
            .collect();

        let Some(segment) = segments.conversion_segments.first_mut() else {
            return false;
        };

        let mut added = 0;
        let mut seen: HashSet<String> = HashSet::new();

        while added < size {
            let Some(Reverse((_, index))) = heap.pop() else {
                break;
            };
            let result = &results[index];
            // Everything after the first costless result is costless too.
            let Some(cost) = result.cost else {
                break;
            };
            if result.filtered {
                continue;
            }

            let node = arena.get(result.node);
            let is_realtime = result.kinds.contains(PredictionKinds::REALTIME);

            // Realtime results already passed the converter's own filtering,
            // so mixed mode trusts them.
            if self.suggestion_filter.is_bad_suggestion(&node.value)
                && !(mixed_conversion && is_realtime)
            {
                debug!(value = %node.value, "bad suggestion");
                continue;
            }

            // Don't suggest exactly what the user typed, except in mixed
            // mode where the candidate list doubles as the conversion.
            if !mixed_conversion && !is_realtime {
                let duplicate = if result.kinds.contains(PredictionKinds::BIGRAM) {
                    exact_bigram_key == node.value
                } else {
                    input_key == node.value
                };
                if duplicate {
                    continue;
                }
            }

            let (key, value) = if result.kinds.contains(PredictionKinds::BIGRAM) {
                (
                    node.key.strip_prefix(history_key.as_str()).unwrap_or_default(),
                    node.value
                        .strip_prefix(history_value.as_str())
                        .unwrap_or_default(),
                )
            } else {
                (node.key.as_str(), node.value.as_str())
            };

            if !seen.insert(value.to_string()) {
                continue;
            }

            // A partially typed mis-spelling must not resurface the
            // correction: "おーすとり" typed, key/value
            // "おーすとりら"/"オーストラリア" has its mismatch at 4.
            if node.attributes.contains(NodeAttributes::SPELLING_CORRECTION)
                && key != input_key
                && input_key_len <= miss_spelled_position(key, value) + 1
            {
                continue;
            }

            let mut attributes = CandidateAttributes::default();
            if node.attributes.contains(NodeAttributes::SPELLING_CORRECTION) {
                attributes.insert(CandidateAttributes::SPELLING_CORRECTION);
            }
            segment.candidates.push(Candidate {
                key: key.to_string(),
                value: value.to_string(),
                content_key: key.to_string(),
                content_value: value.to_string(),
                lid: node.lid,
                rid: node.rid,
                wcost: node.wcost,
                cost,
                attributes,
                description: description_for(is_realtime),
            });
            added += 1;
        }

        added > 0
    }
}

#[cfg(debug_assertions)]
fn description_for(is_realtime: bool) -> String {
    if is_realtime {
        "Real-time Conversion".to_string()
    } else {
        "Dictionary Suggest".to_string()
    }
}

#[cfg(not(debug_assertions))]
fn description_for(_is_realtime: bool) -> String {
    String::new()
}
