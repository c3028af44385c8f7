//! Whole-search properties over random corpora.

use proptest::prelude::*;

use super::common::MemorySource;
use docpeep::search;

fn corpus_strategy() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[a-z ]{0,40}", 0i64..1_000), 0..12)
}

fn build(corpus: &[(String, i64)]) -> MemorySource {
    corpus
        .iter()
        .enumerate()
        .fold(MemorySource::new(), |source, (i, (text, secs))| {
            source.with_document(&format!("doc{}.txt", i), *secs, text)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Results are sorted newest first.
    #[test]
    fn results_sorted_by_recency(corpus in corpus_strategy(), query in "[a-z]{1,6}") {
        let results = search(&build(&corpus), &query).unwrap();
        for pair in results.windows(2) {
            prop_assert!(pair[0].modified_at >= pair[1].modified_at);
        }
    }

    /// Each document appears at most once, and only if it matches.
    #[test]
    fn results_are_exactly_the_matching_documents(corpus in corpus_strategy(), query in "[a-z]{1,6}") {
        let results = search(&build(&corpus), &query).unwrap();
        let expected = corpus
            .iter()
            .filter(|(text, _)| docpeep::find_match(text, &query).is_some())
            .count();
        prop_assert_eq!(results.len(), expected);

        let mut ids: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), results.len());
    }

    /// Page invariants hold for every result.
    #[test]
    fn page_fields_consistent(corpus in corpus_strategy(), query in "[a-z]{1,6}") {
        for result in search(&build(&corpus), &query).unwrap() {
            prop_assert_eq!(result.page_count, result.matched_pages.len());
            prop_assert_eq!(result.primary_page, result.matched_pages.first().copied().unwrap_or(1));
        }
    }
}
