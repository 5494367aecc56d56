//! Property tests for text normalization.

use proptest::prelude::*;
use revlens_analysis::text::normalize;

fn review_like() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[ぁ-ゖ]{1,4}",
            "[ァ-ヺ]{1,4}",
            "[一-龯]{1,3}",
            "[a-zA-Z0-9]{1,6}",
            "[ \t\n\u{3000}]{1,3}",
            "[。、！？.,!?()（）\\-]",
            "[😀★♪※@#/:%=&]{1,2}",
            Just("https://example.com/path?q=1".to_string()),
            Just("http://".to_string()),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in review_like()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_arbitrary_text(s in "\\PC*") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn output_has_no_edge_or_double_whitespace(s in review_like()) {
        let out = normalize(&s);
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.contains("  "));
        prop_assert!(out.chars().all(|c| !c.is_whitespace() || c == ' '));
    }

    #[test]
    fn output_contains_no_url_scheme(s in review_like()) {
        let out = normalize(&s);
        prop_assert!(!out.contains("://"));
    }
}
