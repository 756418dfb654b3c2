//! Character-level Unicode classification for Japanese text.

/// Script class of a character or a uniform string.
///
/// `Other` covers punctuation, symbols, and anything outside the classes
/// the prediction heuristics care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptType {
    Hiragana,
    Katakana,
    Kanji,
    Number,
    Alphabet,
    Other,
}

/// Check the full Hiragana block (U+3040..U+309F). This includes a few unassigned
/// codepoints (U+3040, U+3097-3098) but these never appear in IME input or
/// dictionary readings, so the simpler block-level check is preferred over an
/// exact range (U+3041..U+3096 + U+3099..U+309F) for clarity.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes rarely-used symbols
/// (゠ U+30A0, ヿ U+30FF) but no unassigned codepoints. The prolonged sound
/// mark ー (U+30FC) falls in this block.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// Classify a single character.
pub fn char_script_type(c: char) -> ScriptType {
    if c.is_ascii_digit() {
        ScriptType::Number
    } else if c.is_ascii_alphabetic() {
        ScriptType::Alphabet
    } else if is_hiragana(c) {
        ScriptType::Hiragana
    } else if is_katakana(c) {
        ScriptType::Katakana
    } else if is_kanji(c) {
        ScriptType::Kanji
    } else {
        ScriptType::Other
    }
}

/// Classify a string: the shared script of all characters, or `Other` when
/// the string is empty or mixes scripts.
pub fn script_type(s: &str) -> ScriptType {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return ScriptType::Other;
    };
    let script = char_script_type(first);
    for c in chars {
        if char_script_type(c) != script {
            return ScriptType::Other;
        }
    }
    script
}

/// Script of the first character, `Other` for the empty string.
pub fn first_script_type(s: &str) -> ScriptType {
    s.chars().next().map_or(ScriptType::Other, char_script_type)
}

/// Script of the last character, `Other` for the empty string.
pub fn last_script_type(s: &str) -> ScriptType {
    s.chars().next_back().map_or(ScriptType::Other, char_script_type)
}

/// Convert a katakana string to hiragana.
/// Characters outside U+30A1..U+30F6 (ー, ASCII, kanji, etc.) pass through
/// unchanged, so mixed input stays mixed.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
