//! Zero-query number-counter table.
//!
//! After the user commits a number, an empty follow-up key triggers counter
//! suffixes (個, 円, 本, ...). A row matching the committed digits is
//! emitted first, then the `"default"` row; order within a row is the
//! emission order.

/// (history trigger, counter suffixes in emission order).
pub type ZeroQueryRow = (&'static str, &'static [&'static str]);

pub static ZERO_QUERY_NUMBER: &[ZeroQueryRow] = &[
    (
        "default",
        &["個", "円", "人", "回", "分", "本", "日", "歳", "枚", "番"],
    ),
    ("1", &["月", "時", "位"]),
    ("2", &["月", "時"]),
    ("3", &["月", "時"]),
    ("4", &["月", "時"]),
    ("5", &["月", "時"]),
    ("6", &["月", "時"]),
    ("7", &["月", "時"]),
    ("8", &["月", "時"]),
    ("9", &["月", "時"]),
    ("10", &["月", "時", "倍"]),
    ("11", &["月", "時"]),
    ("12", &["月", "時"]),
    ("24", &["時", "時間"]),
    ("100", &["円", "点", "倍"]),
];

/// Counter suffixes for a committed number: the matching row's entries
/// followed by the `"default"` row's entries.
pub fn number_suffixes<'a>(table: &[(&'a str, &[&'a str])], history_key: &str) -> Vec<&'a str> {
    let mut suffixes = Vec::new();
    let mut default_row: Option<&[&str]> = None;

    for &(trigger, row) in table {
        if trigger == "default" {
            default_row = Some(row);
        } else if trigger == history_key {
            suffixes.extend_from_slice(row);
        }
    }

    debug_assert!(default_row.is_some(), "table must carry a default row");
    if let Some(row) = default_row {
        suffixes.extend_from_slice(row);
    }
    suffixes
}
