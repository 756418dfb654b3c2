//! Input/output container shared with the conversion layer.
//!
//! A prediction call reads the typed key and conversion history out of
//! `Segments` and appends ranked `Candidate`s to the first conversion
//! segment. The container is mutated in place and never retained.

use serde::{Deserialize, Serialize};

/// What the session layer is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    Conversion,
    Prediction,
    Suggestion,
    PartialPrediction,
    PartialSuggestion,
}

/// Attribute bits carried on an emitted candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAttributes(u16);

impl CandidateAttributes {
    pub const SPELLING_CORRECTION: Self = Self(1 << 0);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

/// A single conversion/prediction candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub key: String,
    pub value: String,
    pub content_key: String,
    pub content_value: String,
    /// Left part-of-speech id.
    pub lid: u16,
    /// Right part-of-speech id.
    pub rid: u16,
    /// Word cost, -500 * log(prob).
    pub wcost: i32,
    /// Total ranking cost assigned by the predictor.
    pub cost: i32,
    pub attributes: CandidateAttributes,
    /// Debug label; filled only in debug builds.
    pub description: String,
}

/// One segment of the input: a reading plus its candidate list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub key: String,
    pub candidates: Vec<Candidate>,
}

impl Segment {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            candidates: Vec::new(),
        }
    }

    /// Remove `count` candidates starting at `start`. Out-of-range requests
    /// are clamped to the candidate list.
    pub fn erase_candidates(&mut self, start: usize, count: usize) {
        let start = start.min(self.candidates.len());
        let end = start.saturating_add(count).min(self.candidates.len());
        self.candidates.drain(start..end);
    }
}

/// Ordered history segments followed by ordered conversion segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segments {
    pub request_type: RequestType,
    pub history_segments: Vec<Segment>,
    pub conversion_segments: Vec<Segment>,
    /// Upper bound on the number of candidates a prediction call may emit.
    pub max_prediction_candidates_size: usize,
}

impl Segments {
    pub fn new(request_type: RequestType) -> Self {
        Self {
            request_type,
            history_segments: Vec::new(),
            conversion_segments: Vec::new(),
            max_prediction_candidates_size: 10,
        }
    }

    /// All segments in order, history first. Index 0 is the first history
    /// segment when any exists.
    pub fn segment(&self, i: usize) -> Option<&Segment> {
        if i < self.history_segments.len() {
            self.history_segments.get(i)
        } else {
            self.conversion_segments.get(i - self.history_segments.len())
        }
    }

    pub fn conversion_segment(&self, i: usize) -> Option<&Segment> {
        self.conversion_segments.get(i)
    }

    pub fn conversion_segment_mut(&mut self, i: usize) -> Option<&mut Segment> {
        self.conversion_segments.get_mut(i)
    }

    /// Key of the first conversion segment, or "" when there is none.
    pub fn conversion_key(&self) -> &str {
        self.conversion_segments
            .first()
            .map_or("", |s| s.key.as_str())
    }

    /// Top candidate of the last history segment.
    pub fn last_history_candidate(&self) -> Option<&Candidate> {
        self.history_segments.last()?.candidates.first()
    }

    /// (key, value) of the last committed word, when a history candidate
    /// exists.
    pub fn history_key_value(&self) -> Option<(&str, &str)> {
        self.last_history_candidate()
            .map(|c| (c.key.as_str(), c.value.as_str()))
    }
}
