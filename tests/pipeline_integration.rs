mod common;

use doccmp::{ComparatorConfig, CoverageStrategy, OutputPaths, compare_files, run, summary_line};

#[test]
fn run_writes_report_and_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (pdf, docx) = common::pair(
        dir.path(),
        &["The quick brown fox. It jumps daily."],
        &["the quick brown fox. it jumps every day."],
    );
    let paths = OutputPaths {
        report: dir.path().join("compare_report.html"),
        summary: Some(dir.path().join("compare_summary.json")),
    };

    let output = run(&pdf, &docx, &ComparatorConfig::default(), &paths).expect("run succeeds");

    let metrics = output.run.metrics();
    assert_eq!(metrics.total_sentences, 2);
    assert_eq!(metrics.matched_sentences, 1);
    assert_eq!(metrics.sentence_coverage, 0.5);
    assert!(metrics.char_ratio > 0.8 && metrics.char_ratio < 1.0);

    assert_eq!(output.written.html, paths.report);
    let html = std::fs::read_to_string(&paths.report).expect("report written");
    assert!(html.contains("paper.pdf"));
    assert!(html.contains("paper.docx"));
    assert!(html.contains("it jumps daily."));
    assert!(html.contains("<ins>"));

    let summary = std::fs::read_to_string(paths.summary.as_ref().expect("summary path"))
        .expect("summary written");
    let value: serde_json::Value = serde_json::from_str(&summary).expect("summary parses");
    assert_eq!(value["sentence_coverage"], 0.5);
    assert_eq!(value["pdf"], "paper.pdf");

    assert!(summary_line(metrics).ends_with("sentence_coverage=50.00 matched_sentences=1/2"));
}

#[test]
fn summary_can_be_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (pdf, docx) = common::pair(dir.path(), &["Same text here."], &["Same text here."]);
    let paths = OutputPaths {
        report: dir.path().join("only.html"),
        summary: None,
    };

    let output = run(&pdf, &docx, &ComparatorConfig::default(), &paths).expect("run succeeds");

    assert!(output.written.summary.is_none());
    assert!(paths.report.exists());
    assert!(!dir.path().join("compare_summary.json").exists());
}

#[test]
fn identical_content_scores_perfectly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let text = "Results were consistent across all trials. The effect size was small.";
    let (pdf, docx) = common::pair(dir.path(), &[text], &[text]);

    let run = compare_files(&pdf, &docx, &ComparatorConfig::default()).expect("compare succeeds");

    let metrics = run.metrics();
    assert_eq!(metrics.char_ratio, 1.0);
    assert_eq!(metrics.token_fuzzy_ratio, 1.0);
    assert_eq!(metrics.sentence_coverage, 1.0);
    assert!(run.report.outcome.diff.iter().all(|span| span.is_equal()));
    assert_eq!(run.report.pdf.sentence_count, 2);
    assert!(run.report.identical_after_normalization());
    assert_eq!(run.report.pdf.sha256_hex, run.pdf_canonical.sha256_hex);
    assert_eq!(run.report.pdf.token_count, 11);
    assert_eq!(run.report.settings.normalization, ComparatorConfig::default().canonical);
}

#[test]
fn pages_and_paragraphs_line_up() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (pdf, docx) = common::pair(
        dir.path(),
        &["Chapter one opens quietly.", "Chapter two ends loudly."],
        &["Chapter one opens quietly.", "Chapter two ends loudly."],
    );

    let run = compare_files(&pdf, &docx, &ComparatorConfig::default()).expect("compare succeeds");

    assert_eq!(run.pdf.unit_count, 2);
    assert_eq!(run.docx.unit_count, 2);
    assert_eq!(run.metrics().matched_sentences, 2);
    assert_eq!(run.metrics().sentence_coverage, 1.0);
}

#[test]
fn percentage_threshold_from_yaml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (pdf, docx) = common::pair(
        dir.path(),
        &["The quick brown fox. It jumps daily."],
        &["the quick brown fox. it jumps every day."],
    );
    let cfg = ComparatorConfig::from_yaml(
        r#"
similarity:
  sentence_threshold: 40
  coverage_strategy: substring
"#,
    )
    .expect("config parses");
    assert_eq!(cfg.similarity.coverage_strategy, CoverageStrategy::Substring);

    let run = compare_files(&pdf, &docx, &cfg).expect("compare succeeds");

    assert_eq!(run.metrics().sentence_coverage, 1.0);
    assert_eq!(run.report.settings.sentence_threshold, 0.4);
}

#[test]
fn empty_documents_compare_as_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (pdf, docx) = common::pair(dir.path(), &[""], &[]);

    let run = compare_files(&pdf, &docx, &ComparatorConfig::default()).expect("compare succeeds");

    let metrics = run.metrics();
    assert_eq!(metrics.total_sentences, 0);
    assert_eq!(metrics.sentence_coverage, 1.0);
    assert_eq!(metrics.char_ratio, 1.0);
    assert!(!run.report.pdf.warnings.is_empty());
}
