use crate::dict::{Node, NodeArena, NodeAttributes};
use crate::predictor::filter::remove_miss_spelled_candidates;
use crate::predictor::testutil::{node, segments_with_key, Mocks};
use crate::predictor::{Prediction, PredictionKinds};
use crate::request::ConversionRequest;
use crate::segments::RequestType;

fn corrected(key: &str, value: &str) -> Node {
    let mut node = node(key, value, 3000);
    node.attributes.insert(NodeAttributes::SPELLING_CORRECTION);
    node
}

fn push(arena: &mut NodeArena, results: &mut Vec<Prediction>, node: Node) {
    let id = arena.alloc(node);
    results.push(Prediction::new(id, PredictionKinds::UNIGRAM));
}

#[test]
fn test_same_key_and_value_drop_correction_and_same_key() {
    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    push(&mut arena, &mut results, corrected("あぼがど", "アボカド"));
    push(&mut arena, &mut results, node("あぼがど", "アボガド", 3100));
    push(&mut arena, &mut results, node("あぼかど", "アボカド", 3200));

    remove_miss_spelled_candidates(&arena, &mut results, 4);

    assert!(results[0].filtered);
    assert!(results[1].filtered);
    assert!(!results[2].filtered);
}

#[test]
fn test_same_value_only_drops_correction() {
    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    push(&mut arena, &mut results, corrected("あぼがど", "アボカド"));
    push(&mut arena, &mut results, node("あぼかど", "アボカド", 3200));

    remove_miss_spelled_candidates(&arena, &mut results, 4);

    assert!(results[0].filtered);
    assert!(!results[1].filtered);
}

#[test]
fn test_same_key_only_drops_same_key_and_checks_position() {
    // Mismatch position of あぼがど/アボカド is 2.
    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    push(&mut arena, &mut results, corrected("あぼがど", "アボカド"));
    push(&mut arena, &mut results, node("あぼがど", "アボガド", 3100));

    // Typed up to the mis-spelling point: the correction goes too.
    remove_miss_spelled_candidates(&arena, &mut results, 2);
    assert!(results[0].filtered);
    assert!(results[1].filtered);

    // Typed past the mis-spelling: keep the correction.
    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    push(&mut arena, &mut results, corrected("あぼがど", "アボカド"));
    push(&mut arena, &mut results, node("あぼがど", "アボガド", 3100));

    remove_miss_spelled_candidates(&arena, &mut results, 3);
    assert!(!results[0].filtered);
    assert!(results[1].filtered);
}

#[test]
fn test_unrelated_results_untouched() {
    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    push(&mut arena, &mut results, corrected("あぼがど", "アボカド"));
    push(&mut arena, &mut results, node("てんき", "天気", 3000));

    remove_miss_spelled_candidates(&arena, &mut results, 4);

    assert!(!results[0].filtered);
    assert!(!results[1].filtered);
}

#[test]
fn test_single_result_is_left_alone() {
    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    push(&mut arena, &mut results, corrected("あぼがど", "アボカド"));

    remove_miss_spelled_candidates(&arena, &mut results, 1);
    assert!(!results[0].filtered);
}

#[test]
fn test_at_most_four_corrections_are_processed() {
    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    // Five corrections, each shadowed by a same-value sibling.
    for i in 0..5 {
        push(
            &mut arena,
            &mut results,
            corrected(&format!("きい{i}"), &format!("値{i}")),
        );
        push(
            &mut arena,
            &mut results,
            node(&format!("せいかい{i}"), &format!("値{i}"), 3100),
        );
    }

    remove_miss_spelled_candidates(&arena, &mut results, 4);

    // The first four corrections are dropped; the budget runs out before
    // the fifth.
    assert!(results[0].filtered);
    assert!(results[2].filtered);
    assert!(results[4].filtered);
    assert!(results[6].filtered);
    assert!(!results[8].filtered);
}

#[test]
fn test_partially_typed_miss_spelling_is_not_emitted() {
    let mut mocks = Mocks::default();
    let mut entry = node("おーすとりら", "オーストラリア", 3000);
    entry.attributes.insert(NodeAttributes::SPELLING_CORRECTION);
    mocks.dictionary.nodes = vec![entry];
    let predictor = mocks.predictor();

    let mut request = ConversionRequest::default();
    request.config.use_realtime_conversion = false;

    // Mismatch position is 4; a 5-char partial input sits inside the
    // mis-spelled region.
    let mut segments = segments_with_key(RequestType::Suggestion, "おーすとり");
    assert!(!predictor.predict_for_request(&request, &mut segments));

    // The fully typed mis-spelling still shows the correction.
    let mut segments = segments_with_key(RequestType::Suggestion, "おーすとりら");
    assert!(predictor.predict_for_request(&request, &mut segments));
    let candidates = &segments.conversion_segment(0).unwrap().candidates;
    assert_eq!(candidates[0].value, "オーストラリア");
    assert!(candidates[0]
        .attributes
        .contains(crate::segments::CandidateAttributes::SPELLING_CORRECTION));
}
