//! The four candidate producers: realtime conversion, unigram and bigram
//! dictionary prediction, and zero-query suffix prediction.

use tracing::{debug, debug_span, warn};

use crate::dict::{Dictionary, KeyTrie, LookupLimit, Node, NodeArena, NodeAttributes, NodeId};
use crate::request::ConversionRequest;
use crate::segments::{CandidateAttributes, RequestType, Segments};
use crate::unicode::{first_script_type, last_script_type, ScriptType};
use crate::zero_query;

use super::{DictionaryPredictor, Prediction, PredictionKinds};

// Prediction mode is much slower than suggestion; the cutoff bounds how
// many raw nodes a single backend may contribute.
const SUGGESTION_MAX_NODES: usize = 256;
const PREDICTION_MAX_NODES: usize = 100_000;

/// Above this key length realtime conversion is expected less useful, so
/// fewer candidates are requested.
const FEW_RESULT_THRESHOLD: usize = 8;

/// Cost step between consecutive fabricated counter suffixes, keeping the
/// table order under the cost sort.
const COUNTER_SUFFIX_COST_STEP: i32 = 10;

/// Nodes gathered by one predictive lookup, already copied into the arena.
/// `saturated` reports that the lookup hit the caller's cutoff.
pub(crate) struct GatheredNodes {
    pub ids: Vec<NodeId>,
    pub saturated: bool,
}

/// How many realtime-conversion candidates to request for this call.
fn realtime_max_size(segments: &Segments, mixed_conversion: bool, mut max_size: usize) -> usize {
    let mut default_size = 6;
    if let Some(first) = segments.segment(0) {
        if first.key.chars().count() >= FEW_RESULT_THRESHOLD {
            max_size = max_size.min(8);
            default_size = 3;
        }
    }
    let size = match segments.request_type {
        RequestType::Prediction => {
            if mixed_conversion {
                max_size.saturating_sub(default_size)
            } else {
                default_size
            }
        }
        // Fewer candidates are needed for plain suggestion, but mixed mode
        // behaves like conversion.
        RequestType::Suggestion => {
            if mixed_conversion {
                default_size
            } else {
                1
            }
        }
        RequestType::PartialPrediction => max_size,
        RequestType::PartialSuggestion => default_size,
        RequestType::Conversion => 0,
    };
    max_size.min(size)
}

fn unigram_cutoff(request_type: RequestType, mixed_conversion: bool) -> usize {
    if mixed_conversion {
        return SUGGESTION_MAX_NODES;
    }
    if request_type == RequestType::Prediction {
        return PREDICTION_MAX_NODES;
    }
    SUGGESTION_MAX_NODES
}

impl DictionaryPredictor<'_> {
    /// Run the immutable converter on the typed key and lift its candidates
    /// into prediction results. The segment and the candidate cap are
    /// restored before returning, also when conversion fails.
    pub(crate) fn aggregate_realtime(
        &self,
        kinds: PredictionKinds,
        request: &ConversionRequest,
        segments: &mut Segments,
        arena: &mut NodeArena,
        results: &mut Vec<Prediction>,
    ) {
        if !kinds.contains(PredictionKinds::REALTIME) {
            return;
        }
        let Some(segment) = segments.conversion_segment(0) else {
            return;
        };
        let _span = debug_span!("aggregate_realtime").entered();

        let prev_candidates_size = segment.candidates.len();
        let prev_max_size = segments.max_prediction_candidates_size;
        let budget = prev_max_size.saturating_sub(prev_candidates_size);
        let realtime_size = realtime_max_size(segments, request.mixed_conversion, budget);
        segments.max_prediction_candidates_size = prev_candidates_size + realtime_size;

        let converted = self.immutable_converter.convert(segments);
        if converted {
            if let Some(segment) = segments.conversion_segment_mut(0) {
                for candidate in &segment.candidates[prev_candidates_size.min(segment.candidates.len())..] {
                    let mut attributes = NodeAttributes::default();
                    if candidate
                        .attributes
                        .contains(CandidateAttributes::SPELLING_CORRECTION)
                    {
                        attributes.insert(NodeAttributes::SPELLING_CORRECTION);
                    }
                    let node = Node {
                        key: candidate.key.clone(),
                        value: candidate.value.clone(),
                        lid: candidate.lid,
                        rid: candidate.rid,
                        wcost: candidate.wcost,
                        attributes,
                    };
                    results.push(Prediction::new(arena.alloc(node), PredictionKinds::REALTIME));
                }
                // The converter's candidates belong to the results vector
                // now, not to the caller's segment.
                let appended = segment.candidates.len() - prev_candidates_size.min(segment.candidates.len());
                segment.erase_candidates(prev_candidates_size, appended);
            }
        } else {
            warn!("realtime conversion failed");
        }
        segments.max_prediction_candidates_size = prev_max_size;
    }

    /// Predictive lookup of the typed key.
    pub(crate) fn aggregate_unigram(
        &self,
        kinds: PredictionKinds,
        request: &ConversionRequest,
        segments: &Segments,
        arena: &mut NodeArena,
        results: &mut Vec<Prediction>,
    ) {
        if !kinds.contains(PredictionKinds::UNIGRAM) {
            return;
        }
        let _span = debug_span!("aggregate_unigram").entered();

        let cutoff = unigram_cutoff(segments.request_type, request.mixed_conversion);
        let prev_results_size = results.len();

        let gathered = self.predictive_nodes(self.dictionary, "", request, segments, arena, cutoff);
        for id in gathered.ids {
            results.push(Prediction::new(id, PredictionKinds::UNIGRAM));
        }

        // A saturated lookup means the key is too unspecific to rank; keep
        // nothing rather than an arbitrary sample.
        if gathered.saturated {
            debug!(cutoff, "unigram lookup saturated, dropping block");
            results.truncate(prev_results_size);
        }
    }

    /// Predictive lookup anchored on the last committed word.
    pub(crate) fn aggregate_bigram(
        &self,
        kinds: PredictionKinds,
        request: &ConversionRequest,
        segments: &Segments,
        arena: &mut NodeArena,
        results: &mut Vec<Prediction>,
    ) {
        if !kinds.contains(PredictionKinds::BIGRAM) {
            return;
        }
        let _span = debug_span!("aggregate_bigram").entered();

        let input_key = segments.conversion_key();
        let is_zero_query = input_key.is_empty();

        let Some((history_key, history_value)) = segments.history_key_value() else {
            return;
        };

        // The history pair may come from T13N or manual segment resizing,
        // in which case it is not a dictionary word and no continuation can
        // be trusted.
        let Some(history_node) = self.lookup_key_value(history_key, history_value) else {
            debug!("history pair not in dictionary");
            return;
        };

        let cutoff = if segments.request_type == RequestType::Prediction {
            PREDICTION_MAX_NODES
        } else {
            SUGGESTION_MAX_NODES
        };
        let prev_results_size = results.len();

        let gathered =
            self.predictive_nodes(self.dictionary, history_key, request, segments, arena, cutoff);
        for id in gathered.ids {
            if arena.get(id).value.starts_with(history_value) {
                results.push(Prediction::new(id, PredictionKinds::BIGRAM));
            }
        }

        if gathered.saturated {
            debug!(cutoff, "bigram lookup saturated, dropping block");
            results.truncate(prev_results_size);
            return;
        }

        if history_value.is_empty() {
            return;
        }
        let last_history_ctype = last_script_type(history_value);

        // Filter out irrelevant continuations, e.g. "リカ" from the
        // history "アメ".
        for result in &mut results[prev_results_size..] {
            let node = arena.get(result.node);
            let key = node.key.strip_prefix(history_key).unwrap_or_default();
            let value = node.value.strip_prefix(history_value).unwrap_or_default();

            if key.is_empty() || value.is_empty() {
                result.filtered = true;
                continue;
            }

            // If freq(history) < freq(continuation), the continuation was
            // already suggested while the history itself was being typed.
            // Ties survive.
            if history_node.wcost > node.wcost {
                result.filtered = true;
                continue;
            }

            // An unchanged character type suggests the boundary is not a
            // word boundary. Hiragana is never trusted; katakana only when
            // the whole key is reasonably long.
            let ctype = first_script_type(value);
            if ctype == last_history_ctype
                && (ctype == ScriptType::Hiragana
                    || (ctype == ScriptType::Katakana && node.key.chars().count() <= 5))
            {
                result.filtered = true;
                continue;
            }

            // Kanji compounds are often absent from the dictionary
            // ("霊長類研究所" after "京都大学"), so the presence check is
            // skipped for them on zero query.
            if ctype == ScriptType::Kanji && is_zero_query {
                continue;
            }

            if self.lookup_key_value(key, value).is_none() {
                result.filtered = true;
            }
        }
    }

    /// Zero-query suffixes: counter words after a committed number,
    /// otherwise the suffix dictionary.
    pub(crate) fn aggregate_suffix(
        &self,
        kinds: PredictionKinds,
        request: &ConversionRequest,
        segments: &Segments,
        arena: &mut NodeArena,
        results: &mut Vec<Prediction>,
    ) {
        if !kinds.contains(PredictionKinds::SUFFIX) {
            return;
        }
        let _span = debug_span!("aggregate_suffix").entered();

        let history_key = segments
            .history_segments
            .last()
            .map_or("", |s| s.key.as_str());
        let has_number_history =
            !segments.history_segments.is_empty() && history_key.bytes().all(|b| b.is_ascii_digit());

        if has_number_history && segments.conversion_key().is_empty() {
            let suffixes = zero_query::number_suffixes(zero_query::ZERO_QUERY_NUMBER, history_key);
            let mut wcost = 0;
            for suffix in suffixes {
                let node = Node {
                    key: suffix.to_string(),
                    value: suffix.to_string(),
                    lid: self.counter_suffix_word_id,
                    rid: self.counter_suffix_word_id,
                    wcost,
                    attributes: NodeAttributes::default(),
                };
                results.push(Prediction::new(arena.alloc(node), PredictionKinds::SUFFIX));
                wcost += COUNTER_SUFFIX_COST_STEP;
            }
        } else {
            let gathered = self.predictive_nodes(
                self.suffix_dictionary,
                "",
                request,
                segments,
                arena,
                usize::MAX,
            );
            for id in gathered.ids {
                results.push(Prediction::new(id, PredictionKinds::SUFFIX));
            }
        }
    }

    /// Predictive lookup of `history_key` + typed key, routed through the
    /// composer's ambiguity expansion when enabled. Hides how the backing
    /// store yields its matches; the nodes land in the arena.
    pub(crate) fn predictive_nodes(
        &self,
        dictionary: &dyn Dictionary,
        history_key: &str,
        request: &ConversionRequest,
        segments: &Segments,
        arena: &mut NodeArena,
        cutoff: usize,
    ) -> GatheredNodes {
        let nodes = match request.composer {
            Some(composer) if request.config.expand_ambiguous_key => {
                let (base, expanded) = composer.queries_for_prediction();
                let input_key = format!("{history_key}{base}");
                if expanded.is_empty() {
                    dictionary.lookup_predictive_with_limit(&input_key, &LookupLimit::default())
                } else {
                    let mut trie = KeyTrie::new();
                    for entry in &expanded {
                        trie.insert(entry);
                    }
                    let limit = LookupLimit {
                        begin_with: Some(&trie),
                    };
                    dictionary.lookup_predictive_with_limit(&input_key, &limit)
                }
            }
            _ => {
                let input_key = format!("{}{}", history_key, segments.conversion_key());
                dictionary.lookup_predictive(&input_key)
            }
        };
        let saturated = nodes.len() >= cutoff;
        let ids = nodes.into_iter().map(|node| arena.alloc(node)).collect();
        GatheredNodes { ids, saturated }
    }

    /// The dictionary node whose reading is a prefix of `key` and whose
    /// surface equals `value`, when one exists.
    fn lookup_key_value(&self, key: &str, value: &str) -> Option<Node> {
        self.dictionary
            .lookup_prefix(key)
            .into_iter()
            .find(|node| node.value == value)
    }
}
