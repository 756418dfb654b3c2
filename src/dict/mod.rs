//! Lexicon lookup surface consumed by the predictor.
//!
//! The backing store (trie, array, cursor) is hidden behind `Dictionary`;
//! lookups return owned `Node`s which the predictor copies into its
//! per-call arena.

mod node;
mod trie;

pub use node::{Node, NodeArena, NodeAttributes, NodeId};
pub use trie::KeyTrie;

/// Restriction applied to a predictive lookup.
///
/// `begin_with` limits the extension past the looked-up key to strings
/// starting with one of the trie entries (ambiguity expansion).
#[derive(Default)]
pub struct LookupLimit<'a> {
    pub begin_with: Option<&'a KeyTrie>,
}

/// Read-only dictionary interface. Implementations must be safe for
/// concurrent lookups from multiple prediction calls.
pub trait Dictionary: Send + Sync {
    /// All entries whose reading starts with `key`.
    fn lookup_predictive(&self, key: &str) -> Vec<Node>;

    /// Predictive lookup with an extension restriction.
    fn lookup_predictive_with_limit(&self, key: &str, limit: &LookupLimit) -> Vec<Node>;

    /// All entries whose reading is a prefix of `key`.
    fn lookup_prefix(&self, key: &str) -> Vec<Node>;
}

/// Recognises part-of-speech id classes. Only the counter-suffix id is
/// needed here; it is captured once at predictor construction.
pub trait PosMatcher: Send + Sync {
    fn counter_suffix_word_id(&self) -> u16;
}
