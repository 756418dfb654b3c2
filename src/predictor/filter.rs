//! Removal of mis-spelled candidates (desktop mode only).
//!
//! A dictionary entry flagged SPELLING_CORRECTION pairs a mis-spelled
//! reading with the correct surface ("おーすとらりや" -> "オーストラリア").
//! When both the corrected and uncorrected forms are present in the
//! results, the redundant ones are dropped.

use crate::dict::{NodeArena, NodeAttributes};
use crate::unicode::{katakana_to_hiragana, script_type, ScriptType};

use super::Prediction;

/// First character index where `key` stops reading `value`.
///
/// `value` is folded katakana -> hiragana first; when the folded form is
/// not pure hiragana the comparison is meaningless and the full key length
/// is returned.
pub(crate) fn miss_spelled_position(key: &str, value: &str) -> usize {
    let hiragana_value = katakana_to_hiragana(value);
    if script_type(&hiragana_value) != ScriptType::Hiragana {
        return key.chars().count();
    }

    let mut position = 0;
    let mut key_chars = key.chars();
    let mut value_chars = hiragana_value.chars();
    loop {
        let Some(k) = key_chars.next() else {
            return position;
        };
        match value_chars.next() {
            Some(v) if v != k => return position,
            Some(_) => position += 1,
            None => {
                // value exhausted: count the rest of the key through.
                return position + 1 + key_chars.count();
            }
        }
    }
}

/// Drop results made redundant by a spelling correction.
///
/// For each corrected result, the uncorrected results sharing its key or
/// its value decide the outcome:
/// - both present: the corrected result and the same-key ones go;
/// - only same-value: the corrected result goes (the correct surface is
///   already reachable from its own reading);
/// - only same-key: the same-key ones go, and the corrected result too
///   when the user has typed past the mis-spelling point.
///
/// At most five corrected results are examined, so a pathological result
/// set cannot erase itself entirely.
pub(crate) fn remove_miss_spelled_candidates(
    arena: &NodeArena,
    results: &mut [Prediction],
    request_key_len: usize,
) {
    if results.len() <= 1 {
        return;
    }

    let mut budget = 5;
    for i in 0..results.len() {
        let node_id = results[i].node;
        let node = arena.get(node_id);
        if !node.attributes.contains(NodeAttributes::SPELLING_CORRECTION) {
            continue;
        }

        budget -= 1;
        if budget == 0 {
            return;
        }

        let mut same_key_index = Vec::new();
        let mut same_value_index = Vec::new();
        for (j, other) in results.iter().enumerate() {
            if i == j {
                continue;
            }
            let other_node = arena.get(other.node);
            if other_node
                .attributes
                .contains(NodeAttributes::SPELLING_CORRECTION)
            {
                continue;
            }
            if other_node.key == node.key {
                same_key_index.push(j);
            }
            if other_node.value == node.value {
                same_value_index.push(j);
            }
        }

        match (!same_key_index.is_empty(), !same_value_index.is_empty()) {
            (true, true) => {
                results[i].filtered = true;
                for &j in &same_key_index {
                    results[j].filtered = true;
                }
            }
            (false, true) => {
                results[i].filtered = true;
            }
            (true, false) => {
                for &j in &same_key_index {
                    results[j].filtered = true;
                }
                let node = arena.get(node_id);
                if request_key_len <= miss_spelled_position(&node.key, &node.value) {
                    results[i].filtered = true;
                }
            }
            (false, false) => {}
        }
    }
}
