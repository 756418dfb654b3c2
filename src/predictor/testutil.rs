#![cfg(test)]

//! Shared mock collaborators for predictor tests.

use std::collections::{BTreeSet, HashSet};

use crate::converter::{Connector, ImmutableConverter, Segmenter};
use crate::dict::{Dictionary, LookupLimit, Node, PosMatcher};
use crate::request::Composer;
use crate::segments::{Candidate, RequestType, Segment, Segments};

use super::{DictionaryPredictor, SuggestionFilter};

pub(crate) fn node(key: &str, value: &str, wcost: i32) -> Node {
    Node {
        key: key.to_string(),
        value: value.to_string(),
        wcost,
        ..Default::default()
    }
}

/// In-memory dictionary over a flat node list.
#[derive(Default)]
pub(crate) struct MockDictionary {
    pub nodes: Vec<Node>,
}

impl Dictionary for MockDictionary {
    fn lookup_predictive(&self, key: &str) -> Vec<Node> {
        self.nodes
            .iter()
            .filter(|n| n.key.starts_with(key))
            .cloned()
            .collect()
    }

    fn lookup_predictive_with_limit(&self, key: &str, limit: &LookupLimit) -> Vec<Node> {
        self.nodes
            .iter()
            .filter(|n| {
                let Some(rest) = n.key.strip_prefix(key) else {
                    return false;
                };
                match limit.begin_with {
                    Some(trie) => rest.is_empty() || trie.begins_with(rest),
                    None => true,
                }
            })
            .cloned()
            .collect()
    }

    fn lookup_prefix(&self, key: &str) -> Vec<Node> {
        self.nodes
            .iter()
            .filter(|n| !n.key.is_empty() && key.starts_with(n.key.as_str()))
            .cloned()
            .collect()
    }
}

/// Appends a fixed candidate list, respecting the candidate cap the way the
/// real converter does.
#[derive(Default)]
pub(crate) struct MockConverter {
    pub candidates: Vec<Candidate>,
    pub fail: bool,
}

impl ImmutableConverter for MockConverter {
    fn convert(&self, segments: &mut Segments) -> bool {
        if self.fail {
            return false;
        }
        let cap = segments.max_prediction_candidates_size;
        let Some(segment) = segments.conversion_segment_mut(0) else {
            return false;
        };
        for candidate in &self.candidates {
            if segment.candidates.len() >= cap {
                break;
            }
            segment.candidates.push(candidate.clone());
        }
        true
    }
}

/// Constant transition cost.
#[derive(Default)]
pub(crate) struct MockConnector {
    pub cost: i32,
}

impl Connector for MockConnector {
    fn transition_cost(&self, _rid: u16, _lid: u16) -> i32 {
        self.cost
    }
}

/// Constant suffix penalty.
#[derive(Default)]
pub(crate) struct MockSegmenter {
    pub penalty: i32,
}

impl Segmenter for MockSegmenter {
    fn suffix_penalty(&self, _rid: u16) -> i32 {
        self.penalty
    }
}

#[derive(Default)]
pub(crate) struct MockSuggestionFilter {
    pub bad: HashSet<String>,
}

impl SuggestionFilter for MockSuggestionFilter {
    fn is_bad_suggestion(&self, value: &str) -> bool {
        self.bad.contains(value)
    }
}

pub(crate) struct MockPosMatcher {
    pub counter_suffix_word_id: u16,
}

impl Default for MockPosMatcher {
    fn default() -> Self {
        Self {
            counter_suffix_word_id: 500,
        }
    }
}

impl PosMatcher for MockPosMatcher {
    fn counter_suffix_word_id(&self) -> u16 {
        self.counter_suffix_word_id
    }
}

pub(crate) struct MockComposer {
    pub base: String,
    pub expanded: Vec<String>,
}

impl Composer for MockComposer {
    fn queries_for_prediction(&self) -> (String, BTreeSet<String>) {
        (
            self.base.clone(),
            self.expanded.iter().cloned().collect(),
        )
    }
}

/// Owns one of every collaborator so tests can borrow a predictor from a
/// single binding.
#[derive(Default)]
pub(crate) struct Mocks {
    pub converter: MockConverter,
    pub dictionary: MockDictionary,
    pub suffix_dictionary: MockDictionary,
    pub connector: MockConnector,
    pub segmenter: MockSegmenter,
    pub suggestion_filter: MockSuggestionFilter,
    pub pos_matcher: MockPosMatcher,
}

impl Mocks {
    pub fn predictor(&self) -> DictionaryPredictor<'_> {
        DictionaryPredictor::new(
            &self.converter,
            &self.dictionary,
            &self.suffix_dictionary,
            &self.connector,
            &self.segmenter,
            &self.suggestion_filter,
            &self.pos_matcher,
        )
    }
}

pub(crate) fn segments_with_key(request_type: RequestType, key: &str) -> Segments {
    let mut segments = Segments::new(request_type);
    segments.conversion_segments.push(Segment::new(key));
    segments
}

pub(crate) fn push_history(segments: &mut Segments, key: &str, value: &str) {
    let mut segment = Segment::new(key);
    segment.candidates.push(Candidate {
        key: key.into(),
        value: value.into(),
        content_key: key.into(),
        content_value: value.into(),
        ..Default::default()
    });
    segments.history_segments.push(segment);
}
