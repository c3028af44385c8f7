//! Simple, obviously-correct reference implementations.

use proptest::prelude::*;

/// Brute force: smallest-distance window, earliest on ties.
pub fn oracle_best_window(haystack: &[char], needle: &[char], threshold: usize) -> Option<(usize, usize)> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .map(|i| {
            let window: String = haystack[i..i + needle.len()].iter().collect();
            let needle: String = needle.iter().collect();
            (i, strsim::levenshtein(&window, &needle))
        })
        .filter(|&(_, d)| d <= threshold)
        .min_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Edit distance agrees with strsim.
    #[test]
    fn diff_edit_distance(a in "[a-e ]{0,16}", b in "[a-e ]{0,16}") {
        prop_assert_eq!(docpeep::edit_distance(&a, &b), strsim::levenshtein(&a, &b));
    }

    /// Window scan agrees with brute force.
    #[test]
    fn diff_best_window(haystack in "[a-c]{0,24}", needle in "[a-c]{1,10}") {
        let haystack: Vec<char> = haystack.chars().collect();
        let needle: Vec<char> = needle.chars().collect();
        let threshold = docpeep::fuzzy_threshold(needle.len());

        let ours = docpeep::fuzzy::best_window(&haystack, &needle, threshold)
            .map(|c| (c.offset, c.distance));
        prop_assert_eq!(ours, oracle_best_window(&haystack, &needle, threshold));
    }
}
