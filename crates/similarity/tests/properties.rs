use canonical::{normalize, segment, CanonicalizeConfig, SegmentConfig, SentenceUnit};
use proptest::prelude::*;
use similarity::{compare, compare_with_details, CoverageStrategy, SimilarityConfig};

fn sentence() -> impl Strategy<Value = String> {
    let words = prop::sample::select(vec![
        "data", "model", "results", "we", "show", "the", "sample", "error", "is", "small",
        "figure", "two", "agree",
    ]);
    (prop::collection::vec(words, 2..8), prop::sample::select(vec![".", "?", "!"]))
        .prop_map(|(words, end)| format!("{}{end}", words.join(" ")))
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(sentence(), 0..8).prop_map(|sentences| sentences.join(" "))
}

fn units(text: &str) -> Vec<SentenceUnit> {
    segment(text, &SegmentConfig::default()).collect()
}

proptest! {
    #[test]
    fn coverage_never_drops_when_docx_grows(
        pdf in document(),
        docx in document(),
        appended in document(),
    ) {
        let cfg = SimilarityConfig::default();
        let sentences = units(&pdf);
        let base = compare(&pdf, &docx, &sentences, &cfg);
        let grown_text = format!("{docx} {appended}");
        let grown = compare(&pdf, grown_text.trim(), &sentences, &cfg);
        prop_assert!(grown.sentence_coverage >= base.sentence_coverage);
        prop_assert!(grown.matched_sentences >= base.matched_sentences);
    }

    #[test]
    fn metrics_stay_in_unit_interval(pdf in document(), docx in document(), best in any::<bool>()) {
        let strategy = if best { CoverageStrategy::BestSentence } else { CoverageStrategy::Substring };
        let cfg = SimilarityConfig::new().with_strategy(strategy);
        let metrics = compare(&pdf, &docx, &units(&pdf), &cfg);
        for value in [metrics.char_ratio, metrics.token_fuzzy_ratio, metrics.sentence_coverage] {
            prop_assert!((0.0..=1.0).contains(&value));
        }
        prop_assert!(metrics.matched_sentences <= metrics.total_sentences);
    }

    #[test]
    fn self_comparison_is_perfect(raw in document()) {
        let text = normalize(&raw, &CanonicalizeConfig::default());
        let outcome = compare_with_details(&text, &text, &units(&text), &SimilarityConfig::default());
        prop_assert_eq!(outcome.metrics.char_ratio, 1.0);
        prop_assert_eq!(outcome.metrics.token_fuzzy_ratio, 1.0);
        prop_assert_eq!(outcome.metrics.sentence_coverage, 1.0);
        prop_assert!(outcome.diff.iter().all(|span| span.is_equal()));
    }

    #[test]
    fn char_ratio_metric_is_symmetric(a in document(), b in document()) {
        let cfg = SimilarityConfig::default();
        let ab = compare(&a, &b, &units(&a), &cfg);
        let ba = compare(&b, &a, &units(&b), &cfg);
        prop_assert_eq!(ab.char_ratio, ba.char_ratio);
        prop_assert_eq!(ab.token_fuzzy_ratio, ba.token_fuzzy_ratio);
    }
}
