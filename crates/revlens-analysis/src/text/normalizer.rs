//! Text normalizer: URL stripping, allow-list filtering, whitespace collapse.
//!
//! The output is the canonical scorer input and feeds the heuristic noise
//! hash, so any change to the rules must bump [`NORMALIZER_VERSION`].

use std::sync::LazyLock;

use regex::Regex;

/// Bumped whenever normalization output can change for some input.
pub const NORMALIZER_VERSION: u32 = 1;

const URL_PATTERN: &str =
    r"http[s]?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+";

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"));

/// Punctuation kept besides kana, kanji, ASCII alphanumerics and whitespace.
const ALLOWED_PUNCTUATION: &[char] = &[
    '。', '、', '！', '？', '.', ',', '!', '?', '(', ')', '（', '）', '-',
];

/// Normalize raw review text. Never fails.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.to_string();
    // Output must be a fixed point of this function.
    loop {
        let stripped = URL_RE.replace_all(&current, "");
        let filtered: String = stripped.chars().filter(|&c| is_allowed(c)).collect();
        if filtered == current {
            break;
        }
        current = filtered;
    }
    collapse_whitespace(&current)
}

/// Missing text normalizes to the empty string.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

fn is_allowed(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{309F}'      // hiragana
            | '\u{30A0}'..='\u{30FF}' // katakana
            | '\u{4E00}'..='\u{9FAF}' // CJK unified ideographs
            | '\u{3400}'..='\u{4DBF}' // CJK extension A
    ) || c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || ALLOWED_PUNCTUATION.contains(&c)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
