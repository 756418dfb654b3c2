use crate::dict::NodeArena;
use crate::predictor::testutil::{node, push_history, segments_with_key, Mocks};
use crate::predictor::{Prediction, PredictionKinds};
use crate::request::ConversionRequest;
use crate::segments::{Candidate, RequestType};

fn run_bigram(mocks: &Mocks, segments: &crate::segments::Segments) -> (NodeArena, Vec<Prediction>) {
    let predictor = mocks.predictor();
    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    predictor.aggregate_bigram(
        PredictionKinds::BIGRAM,
        &ConversionRequest::default(),
        segments,
        &mut arena,
        &mut results,
    );
    (arena, results)
}

#[test]
fn test_realtime_restores_cap_and_erases_candidates() {
    let mut mocks = Mocks::default();
    mocks.converter.candidates = vec![
        Candidate {
            key: "きょうはいいてんき".into(),
            value: "今日は良い天気".into(),
            lid: 10,
            rid: 20,
            wcost: 4500,
            ..Default::default()
        },
        Candidate {
            key: "きょうはいいてんき".into(),
            value: "今日はいい天気".into(),
            wcost: 4700,
            ..Default::default()
        },
    ];
    let predictor = mocks.predictor();

    // 9 chars: the few-result clamp kicks in, and plain suggestion asks
    // for a single realtime candidate.
    let mut segments = segments_with_key(RequestType::Suggestion, "きょうはいいてんき");
    segments.max_prediction_candidates_size = 10;

    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    predictor.aggregate_realtime(
        PredictionKinds::REALTIME,
        &ConversionRequest::default(),
        &mut segments,
        &mut arena,
        &mut results,
    );

    assert_eq!(results.len(), 1);
    assert!(results[0].kinds.contains(PredictionKinds::REALTIME));
    let lifted = arena.get(results[0].node);
    assert_eq!(lifted.value, "今日は良い天気");
    assert_eq!(lifted.lid, 10);
    assert_eq!(lifted.rid, 20);
    assert!(segments.conversion_segment(0).unwrap().candidates.is_empty());
    assert_eq!(segments.max_prediction_candidates_size, 10);
}

#[test]
fn test_realtime_failure_restores_cap() {
    let mut mocks = Mocks::default();
    mocks.converter.fail = true;
    let predictor = mocks.predictor();

    let mut segments = segments_with_key(RequestType::Suggestion, "てんき");
    segments.max_prediction_candidates_size = 7;

    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    predictor.aggregate_realtime(
        PredictionKinds::REALTIME,
        &ConversionRequest::default(),
        &mut segments,
        &mut arena,
        &mut results,
    );

    assert!(results.is_empty());
    assert_eq!(segments.max_prediction_candidates_size, 7);
}

#[test]
fn test_unigram_overflow_discards_block() {
    let mut mocks = Mocks::default();
    for i in 0..256 {
        mocks
            .dictionary
            .nodes
            .push(node(&format!("あい{i:03}"), &format!("値{i}"), 3000));
    }
    let predictor = mocks.predictor();
    let segments = segments_with_key(RequestType::Suggestion, "あい");

    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    predictor.aggregate_unigram(
        PredictionKinds::UNIGRAM,
        &ConversionRequest::default(),
        &segments,
        &mut arena,
        &mut results,
    );
    assert!(results.is_empty());
}

#[test]
fn test_unigram_below_cutoff_is_kept() {
    let mut mocks = Mocks::default();
    for i in 0..255 {
        mocks
            .dictionary
            .nodes
            .push(node(&format!("あい{i:03}"), &format!("値{i}"), 3000));
    }
    let predictor = mocks.predictor();
    let segments = segments_with_key(RequestType::Suggestion, "あい");

    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    predictor.aggregate_unigram(
        PredictionKinds::UNIGRAM,
        &ConversionRequest::default(),
        &segments,
        &mut arena,
        &mut results,
    );
    assert_eq!(results.len(), 255);
}

#[test]
fn test_bigram_requires_history_in_dictionary() {
    let mut mocks = Mocks::default();
    mocks.dictionary.nodes = vec![node("ろっぽんぎひるず", "六本木ヒルズ", 3500)];
    // "六本木" itself is missing, so no continuation is trusted.
    let mut segments = segments_with_key(RequestType::Suggestion, "");
    push_history(&mut segments, "ろっぽんぎ", "六本木");

    let (_, results) = run_bigram(&mocks, &segments);
    assert!(results.is_empty());
}

#[test]
fn test_bigram_suggests_continuation() {
    let mut mocks = Mocks::default();
    mocks.dictionary.nodes = vec![
        node("ろっぽんぎ", "六本木", 3000),
        node("ろっぽんぎひるず", "六本木ヒルズ", 3500),
        node("ひるず", "ヒルズ", 4000),
    ];
    let mut segments = segments_with_key(RequestType::Suggestion, "");
    push_history(&mut segments, "ろっぽんぎ", "六本木");

    let (arena, results) = run_bigram(&mocks, &segments);
    let kept: Vec<&Prediction> = results.iter().filter(|r| !r.filtered).collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(arena.get(kept[0].node).value, "六本木ヒルズ");
}

#[test]
fn test_bigram_drops_more_frequent_continuation() {
    let mut mocks = Mocks::default();
    mocks.dictionary.nodes = vec![
        node("ろっぽんぎ", "六本木", 3000),
        // More frequent than the history itself: it was already suggested
        // while 六本木 was being typed.
        node("ろっぽんぎえき", "六本木駅", 2000),
        node("えき", "駅", 2500),
    ];
    let mut segments = segments_with_key(RequestType::Suggestion, "");
    push_history(&mut segments, "ろっぽんぎ", "六本木");

    let (_, results) = run_bigram(&mocks, &segments);
    assert!(results.iter().all(|r| r.filtered));
}

#[test]
fn test_bigram_equal_wcost_survives() {
    let mut mocks = Mocks::default();
    mocks.dictionary.nodes = vec![
        node("ろっぽんぎ", "六本木", 3000),
        node("ろっぽんぎえき", "六本木駅", 3000),
        node("えき", "駅", 2500),
    ];
    let mut segments = segments_with_key(RequestType::Suggestion, "");
    push_history(&mut segments, "ろっぽんぎ", "六本木");

    let (_, results) = run_bigram(&mocks, &segments);
    assert!(results.iter().any(|r| !r.filtered));
}

#[test]
fn test_bigram_drops_same_script_katakana_boundary() {
    let mut mocks = Mocks::default();
    mocks.dictionary.nodes = vec![
        node("あめ", "アメ", 3000),
        node("あめりか", "アメリカ", 3500),
        node("りか", "リカ", 4000),
    ];
    let mut segments = segments_with_key(RequestType::Suggestion, "");
    push_history(&mut segments, "あめ", "アメ");

    // "リカ" continues the katakana run of a 4-char key: not a word
    // boundary.
    let (_, results) = run_bigram(&mocks, &segments);
    assert!(results.iter().all(|r| r.filtered));
}

#[test]
fn test_bigram_long_katakana_key_is_trusted() {
    let mut mocks = Mocks::default();
    mocks.dictionary.nodes = vec![
        node("ばーじょんあっぷ", "バージョンアップ", 3000),
        node("ばーじょんあっぷだうん", "バージョンアップダウン", 3500),
        node("だうん", "ダウン", 2800),
    ];
    let mut segments = segments_with_key(RequestType::Suggestion, "");
    push_history(&mut segments, "ばーじょんあっぷ", "バージョンアップ");

    // The whole key is 11 chars, above the 5-char katakana bound.
    let (_, results) = run_bigram(&mocks, &segments);
    assert!(results.iter().any(|r| !r.filtered));
}

#[test]
fn test_bigram_requires_stripped_pair_in_dictionary() {
    let mut mocks = Mocks::default();
    mocks.dictionary.nodes = vec![
        node("いん", "イン", 3000),
        node("いんたーねっと", "インターネット", 3500),
        // "たーねっと/ターネット" is not a word.
    ];
    let mut segments = segments_with_key(RequestType::Suggestion, "");
    push_history(&mut segments, "いん", "イン");

    let (_, results) = run_bigram(&mocks, &segments);
    assert!(results.iter().all(|r| r.filtered));
}

#[test]
fn test_bigram_kanji_compound_skips_dictionary_check_on_zero_query() {
    let mut mocks = Mocks::default();
    mocks.dictionary.nodes = vec![
        node("きょうとだいがく", "京都大学", 3000),
        node(
            "きょうとだいがくれいちょうるいけんきゅうじょ",
            "京都大学霊長類研究所",
            3500,
        ),
        // The stripped compound 霊長類研究所 is not a dictionary word.
    ];
    let mut segments = segments_with_key(RequestType::Suggestion, "");
    push_history(&mut segments, "きょうとだいがく", "京都大学");

    let (arena, results) = run_bigram(&mocks, &segments);
    let kept: Vec<&Prediction> = results.iter().filter(|r| !r.filtered).collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(arena.get(kept[0].node).value, "京都大学霊長類研究所");
}

#[test]
fn test_bigram_keeps_only_history_value_continuations() {
    let mut mocks = Mocks::default();
    mocks.dictionary.nodes = vec![
        node("あめ", "アメ", 3000),
        // Same reading prefix, different surface: not a continuation.
        node("あめもよう", "雨模様", 3200),
    ];
    let mut segments = segments_with_key(RequestType::Suggestion, "");
    push_history(&mut segments, "あめ", "アメ");

    let (arena, results) = run_bigram(&mocks, &segments);
    // "雨模様" is never appended; the history word itself strips to an
    // empty continuation and is filtered.
    assert!(results
        .iter()
        .all(|r| arena.get(r.node).value != "雨模様"));
    assert!(results.iter().all(|r| r.filtered));
}

#[test]
fn test_suffix_number_history_fabricates_counters() {
    let mocks = Mocks::default();
    let predictor = mocks.predictor();

    let mut segments = segments_with_key(RequestType::Suggestion, "");
    segments
        .history_segments
        .push(crate::segments::Segment::new("24"));

    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    predictor.aggregate_suffix(
        PredictionKinds::SUFFIX,
        &ConversionRequest::default(),
        &segments,
        &mut arena,
        &mut results,
    );

    // The "24" row comes first, then the default counters; wcost steps by
    // 10 to preserve table order under the cost sort.
    assert!(results.len() > 2);
    let first = arena.get(results[0].node);
    let second = arena.get(results[1].node);
    assert_eq!(first.value, "時");
    assert_eq!(first.wcost, 0);
    assert_eq!(first.lid, 500);
    assert_eq!(first.rid, 500);
    assert_eq!(second.value, "時間");
    assert_eq!(second.wcost, 10);
    assert_eq!(first.key, first.value);
}

#[test]
fn test_suffix_falls_back_to_suffix_dictionary() {
    let mut mocks = Mocks::default();
    mocks.suffix_dictionary.nodes = vec![node("です", "です", 2000), node("ます", "ます", 2100)];
    let predictor = mocks.predictor();

    let mut segments = segments_with_key(RequestType::Suggestion, "");
    push_history(&mut segments, "いく", "行く");

    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    predictor.aggregate_suffix(
        PredictionKinds::SUFFIX,
        &ConversionRequest::default(),
        &segments,
        &mut arena,
        &mut results,
    );

    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|r| r.kinds.contains(PredictionKinds::SUFFIX)));
}

#[test]
fn test_expansion_limits_first_morae() {
    let mut mocks = Mocks::default();
    mocks.dictionary.nodes = vec![
        node("あかい", "赤い", 3000),
        node("あきた", "秋田", 3100),
        node("あいす", "アイス", 3200),
    ];
    let predictor = mocks.predictor();

    let composer = crate::predictor::testutil::MockComposer {
        base: "あ".into(),
        expanded: vec!["か".into(), "が".into()],
    };
    let mut request = ConversionRequest::default();
    request.config.expand_ambiguous_key = true;
    let request = request.with_composer(&composer);

    let segments = segments_with_key(RequestType::Suggestion, "あか");

    let mut arena = NodeArena::new();
    let mut results = Vec::new();
    predictor.aggregate_unigram(
        PredictionKinds::UNIGRAM,
        &request,
        &segments,
        &mut arena,
        &mut results,
    );

    assert_eq!(results.len(), 1);
    assert_eq!(arena.get(results[0].node).value, "赤い");
}
