//! # File Pipeline
//!
//! YAML taxonomy and TSV export on disk, through the engine, out to CSV and
//! JSON, using the same entry points as the `revlens` binary.

use std::fs;
use std::path::Path;

use revlens_cli::analyze::{run_analyze, AnalyzeArgs};
use revlens_config::load_config;
use revlens_engine::{Engine, EngineSettings, NoopObserver};
use revlens_report::{read_reviews, write_summary, ConsoleReport};

const CONFIG: &str = "\
game_review_categories:
  game_mechanics:
    name: ゲームメカニクス
    subcategories:
      core_gameplay:
        name: コアゲームプレイ
        keywords: [バトル, 戦闘, 操作]
  monetization:
    name: 課金
    subcategories:
      gacha:
        name: ガチャ
        keywords: [ガチャ, 課金]
sentiment_words:
  positive: [楽しい, 面白い]
  negative: [最悪, バグ]
negation_patterns: [ない, ません]
category_weights:
  monetization: 0.5
  not_a_category: 3.0
";

const REVIEWS: &str = "\
1\t2024-05-01\tuser1\tバトルが楽しい\t5
2\t2024-05-02\tuser2\tガチャの確率が最悪\t1
3\t2024-05-03\tuser3\t操作が面白くない、ガチャも渋い\t2
4\t2024-05-04\tuser4\t\t4
5\t2024-05-05\tuser5\t特になし\tabc
6\t2024-05-06\tuser6\t普通のゲーム\t3
";

fn write_inputs(dir: &Path) {
    fs::write(dir.join("categories.yaml"), CONFIG).unwrap();
    fs::write(dir.join("input_data.tsv"), REVIEWS).unwrap();
}

#[test]
fn loaded_inputs_produce_expected_statistics() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let config = load_config(&dir.path().join("categories.yaml")).unwrap();
    let records = read_reviews(&dir.path().join("input_data.tsv")).unwrap();
    assert_eq!(records.len(), 6);

    let report = Engine::new(config.taxonomy, config.sentiment)
        .with_settings(EngineSettings {
            progress_interval: std::time::Duration::ZERO,
            ..EngineSettings::default()
        })
        .with_observer(std::sync::Arc::new(NoopObserver))
        .run(records);

    assert_eq!(report.summary.total, 6);
    assert_eq!(report.summary.processed, 4);
    assert_eq!(report.summary.skipped, 2);

    let cats = &report.results.categories;
    assert_eq!(cats[0].id.as_str(), "game_mechanics");
    assert_eq!(cats[1].id.as_str(), "monetization");

    // Mechanics: review 1 (5 + 0.2) and review 3 (2, negated: no polarity word matched).
    let mechanics = &cats[0].stats;
    assert_eq!(mechanics.comment_count, 2);
    assert_eq!(mechanics.average_score, 3.5);
    assert!((mechanics.satisfaction_score - 3.6).abs() < 1e-9);

    // Monetization at weight 0.5: review 2 (0.5 - 0.2) and review 3 (1.0).
    let money = &cats[1];
    assert_eq!(money.weight, 0.5);
    assert_eq!(money.stats.comment_count, 2);
    assert!((money.stats.satisfaction_score - 0.65).abs() < 1e-9);

    let text = ConsoleReport::new(&report.results).to_string();
    assert!(text.contains("■ ゲームメカニクス"));

    let mut csv = Vec::new();
    write_summary(&mut csv, &report.results).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.contains("課金,(total),2,1.50,0.65"));
    assert!(csv.contains("課金,ガチャ,2,1.50,0.65"));
}

#[test]
fn analyze_command_writes_requested_files() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());
    let out = dir.path().join("output");

    let args = AnalyzeArgs {
        input: dir.path().join("input_data.tsv"),
        config: dir.path().join("categories.yaml"),
        output: out.join("result.csv"),
        comments: Some(out.join("comments.csv")),
        json: Some(out.join("result.json")),
        parallel: true,
        progress_secs: 0,
        max_comments: Some(1),
        fallback_builtin: false,
        quiet: true,
    };
    assert_eq!(run_analyze(&args).unwrap(), 0);

    let summary = fs::read_to_string(out.join("result.csv")).unwrap();
    assert!(summary.starts_with("category,subcategory,comment_count,average_score,satisfaction_score\n"));
    assert!(summary.contains("ゲームメカニクス,(total),2,3.50,3.60"));

    let comments = fs::read_to_string(out.join("comments.csv")).unwrap();
    // One retained comment per accumulator: two categories, two subcategories.
    assert_eq!(comments.lines().count(), 1 + 4);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("result.json")).unwrap()).unwrap();
    assert_eq!(json["summary"]["processed"], 4);
    assert_eq!(json["results"]["categories"][1]["comment_count"], 2);
}

#[test]
fn unparsable_taxonomy_needs_explicit_fallback() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input_data.tsv"), REVIEWS).unwrap();
    fs::write(dir.path().join("categories.yaml"), "game_review_categories: {broken").unwrap();

    let mut args = AnalyzeArgs {
        input: dir.path().join("input_data.tsv"),
        config: dir.path().join("categories.yaml"),
        output: dir.path().join("result.csv"),
        comments: None,
        json: None,
        parallel: false,
        progress_secs: 0,
        max_comments: None,
        fallback_builtin: false,
        quiet: true,
    };
    assert!(run_analyze(&args).is_err());
    assert!(!args.output.exists());

    args.fallback_builtin = true;
    assert_eq!(run_analyze(&args).unwrap(), 0);
    assert!(args.output.exists());
}
