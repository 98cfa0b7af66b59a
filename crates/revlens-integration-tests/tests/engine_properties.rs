//! # Engine Property Tests
//!
//! Randomized batches over a fixed taxonomy:
//! - Two runs over the same input produce identical results.
//! - A category count is never below any of its subcategory counts, and
//!   never above the number of processed reviews.
//! - Parallel classification yields the same results as a sequential run.
//! - Categories whose keywords never occur stay at zero.
//! - processed + skipped + failed = total.

use std::sync::Arc;

use proptest::prelude::*;

use revlens_core::{
    Category, CategoryId, RawReviewRecord, SentimentLexicon, Subcategory, SubcategoryId, Taxonomy,
};
use revlens_engine::{Engine, NoopObserver, UnicodeWordTokenizer};

const WORDS: &[&str] = &[
    "battle", "gacha", "controls", "fun", "boring", "not", "great", "bug", "story", "the", "ガチャ",
    "楽しい", "ない",
];

fn taxonomy() -> Taxonomy {
    let sub = |id: &str, keywords: &[&str]| {
        Subcategory::new(SubcategoryId::new(id).unwrap(), id, keywords.iter().copied())
    };
    let mechanics = Category::new(
        CategoryId::new("mechanics").unwrap(),
        "Mechanics",
        vec![sub("combat", &["battle"]), sub("controls", &["controls", "bug"])],
    )
    .unwrap();
    let money = Category::new(
        CategoryId::new("money").unwrap(),
        "Money",
        vec![sub("gacha", &["gacha", "ガチャ"])],
    )
    .unwrap()
    .with_weight(1.5)
    .unwrap();
    let unreachable = Category::new(
        CategoryId::new("unreachable").unwrap(),
        "Unreachable",
        vec![sub("never", &["zzz-never-generated"])],
    )
    .unwrap();
    Taxonomy::new(vec![mechanics, money, unreachable]).unwrap()
}

fn engine() -> Engine {
    let lexicon = SentimentLexicon::new(["fun", "great", "楽しい"], ["boring", "bug"], ["not", "ない"]);
    Engine::new(taxonomy(), lexicon)
        .with_tokenizer(UnicodeWordTokenizer::new())
        .with_observer(Arc::new(NoopObserver))
}

fn record_strategy() -> impl Strategy<Value = RawReviewRecord> {
    (
        prop::collection::vec(prop::sample::select(WORDS), 0..8),
        prop::option::of(prop_oneof![
            (1i64..=5).prop_map(|r| r.to_string()),
            Just("n/a".to_string()),
            Just("3.0".to_string()),
        ]),
    )
        .prop_map(|(words, rating)| RawReviewRecord {
            id: String::new(),
            date: None,
            author: None,
            content: Some(words.join(" ")),
            rating,
        })
}

fn batch_strategy() -> impl Strategy<Value = Vec<RawReviewRecord>> {
    prop::collection::vec(record_strategy(), 0..60).prop_map(|mut records| {
        for (i, r) in records.iter_mut().enumerate() {
            r.id = format!("r{i}");
        }
        records
    })
}

proptest! {
    #[test]
    fn runs_are_deterministic(records in batch_strategy()) {
        let engine = engine();
        let a = engine.run(records.clone());
        let b = engine.run(records);
        prop_assert_eq!(a.results, b.results);
    }

    #[test]
    fn counts_are_conserved(records in batch_strategy()) {
        let report = engine().run(records);
        let processed = report.summary.processed as u64;
        for cat in &report.results.categories {
            prop_assert!(cat.stats.comment_count <= processed);
            for sub in &cat.subcategories {
                prop_assert!(sub.stats.comment_count <= cat.stats.comment_count);
            }
            prop_assert_eq!(cat.stats.comments.len() as u64, cat.stats.comment_count);
        }
        prop_assert_eq!(
            report.summary.processed + report.summary.skipped + report.summary.failed,
            report.summary.total
        );
    }

    #[test]
    fn parallel_equals_sequential(records in batch_strategy()) {
        let engine = engine();
        let sequential = engine.run(records.clone());
        let parallel = engine.run_parallel(records);
        prop_assert_eq!(sequential.results, parallel.results);
        prop_assert_eq!(sequential.summary.processed, parallel.summary.processed);
    }

    #[test]
    fn unreachable_category_stays_zero(records in batch_strategy()) {
        let report = engine().run(records);
        let cat = report
            .results
            .category(&CategoryId::new("unreachable").unwrap())
            .unwrap();
        prop_assert_eq!(cat.stats.comment_count, 0);
        prop_assert_eq!(cat.stats.average_score, 0.0);
        prop_assert_eq!(cat.stats.satisfaction_score, 0.0);
    }

    #[test]
    fn average_score_within_rating_range(records in batch_strategy()) {
        let report = engine().run(records);
        for cat in &report.results.categories {
            if cat.stats.comment_count > 0 {
                prop_assert!((1.0..=5.0).contains(&cat.stats.average_score));
            }
        }
    }
}
