//! Matcher, normalizer and position-mapper properties.

use proptest::prelude::*;

use docpeep::{find_match, find_match_candidate, fuzzy_threshold, map_to_original, normalize};

/// Word-ish text with the punctuation real extractions are full of.
fn noisy_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 .,:;$()\\-\n]{0,80}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Normalized output only holds lowercase letters and digits.
    #[test]
    fn normalized_is_lower_alnum(text in noisy_text()) {
        let normalized = normalize(&text).normalized;
        prop_assert!(normalized.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    /// Embedding a query verbatim guarantees an exact hit at the right place.
    #[test]
    fn embedded_query_found_at_its_position(
        prefix in noisy_text(),
        query in "[a-z]{3,10}",
        suffix in noisy_text(),
    ) {
        let text = format!("{}{}{}", prefix, query, suffix);
        let candidate = find_match_candidate(&text, &query).unwrap();
        prop_assert_eq!(candidate.distance, 0);

        // The first exact occurrence can't start after ours
        let offset = find_match(&text, &query).unwrap();
        prop_assert!(offset <= prefix.chars().count());
    }

    /// Candidates never exceed the threshold.
    #[test]
    fn candidate_within_threshold(text in noisy_text(), query in "[a-z]{1,12}") {
        if let Some(candidate) = find_match_candidate(&text, &query) {
            prop_assert!(candidate.distance <= fuzzy_threshold(normalize(&query).len()));
        }
    }

    /// Mapped offsets are monotone in the normalized offset.
    #[test]
    fn mapping_is_monotone(text in noisy_text(), a in 0usize..80, b in 0usize..80) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(map_to_original(&text, lo) <= map_to_original(&text, hi));
    }

    /// Offsets past the end clamp to the original length.
    #[test]
    fn mapping_clamps(text in noisy_text()) {
        let len = text.chars().count();
        let past = normalize(&text).len() + 1;
        prop_assert_eq!(map_to_original(&text, past), len);
    }
}
