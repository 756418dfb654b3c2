//! Maps a request onto the set of prediction strategies to run.

use std::ops::{BitOr, BitOrAssign};

use tracing::debug;

use crate::request::ConversionRequest;
use crate::segments::{RequestType, Segments};

/// Realtime conversion is skipped for very long keys.
const MAX_REALTIME_KEY_BYTES: usize = 300;

/// Set of prediction strategies. The empty set means "no prediction";
/// per-result filtering is tracked separately on the result record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictionKinds(u8);

impl PredictionKinds {
    pub const NONE: Self = Self(0);
    pub const REALTIME: Self = Self(1 << 0);
    pub const UNIGRAM: Self = Self(1 << 1);
    pub const BIGRAM: Self = Self(1 << 2);
    pub const SUFFIX: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for PredictionKinds {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PredictionKinds {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A short all-digit key (with optional '-') is a zip code, not a word.
fn is_zip_code_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit() || b == b'-')
}

/// Decide which strategies apply to this request.
pub(crate) fn select(segments: &Segments, request: &ConversionRequest) -> PredictionKinds {
    if segments.request_type == RequestType::Conversion {
        debug!("request type is CONVERSION");
        return PredictionKinds::NONE;
    }

    let Some(segment) = segments.conversion_segment(0) else {
        debug!("no conversion segment");
        return PredictionKinds::NONE;
    };
    let key = segment.key.as_str();

    let mut result = PredictionKinds::NONE;

    if segments.request_type == RequestType::PartialSuggestion {
        result |= PredictionKinds::REALTIME;
    } else if (request.config.use_realtime_conversion || request.mixed_conversion)
        && !key.is_empty()
        && key.len() < MAX_REALTIME_KEY_BYTES
    {
        result |= PredictionKinds::REALTIME;
    }

    if !request.config.use_dictionary_suggest && segments.request_type == RequestType::Suggestion {
        debug!("dictionary suggest disabled");
        return result;
    }

    let key_len = key.chars().count();
    if key_len == 0 && !request.zero_query_suggestion {
        return result;
    }

    // Never trigger dictionary prediction on a zip-code-looking key.
    if segments.request_type == RequestType::Suggestion && is_zip_code_key(key) && key_len < 6 {
        return result;
    }

    // Suggesting from a very short key is annoying; zero-query mode relaxes
    // the bound because the history carries the context.
    let min_unigram_key_len = if request.zero_query_suggestion { 1 } else { 3 };
    if (segments.request_type == RequestType::Prediction && key_len >= 1)
        || key_len >= min_unigram_key_len
    {
        result |= PredictionKinds::UNIGRAM;
    }

    let min_history_key_len = if request.zero_query_suggestion { 2 } else { 3 };
    if let Some(candidate) = segments.last_history_candidate() {
        if candidate.key.chars().count() >= min_history_key_len {
            result |= PredictionKinds::BIGRAM;
        }
    }

    if !segments.history_segments.is_empty() && request.zero_query_suggestion {
        result |= PredictionKinds::SUFFIX;
    }

    result
}
