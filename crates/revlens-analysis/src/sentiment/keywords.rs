//! Fixed keyword sets for the heuristic scorer.

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "良い", "よい", "親切", "丁寧", "安心", "素晴らしい", "優しい", "清潔", "的確", "頼り",
];

pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "悪い", "わるい", "高い", "長い", "狭い", "不便", "不十分", "古い", "不安",
];

/// Number of distinct keywords from `keywords` that occur in `text`.
pub fn count_present(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}
