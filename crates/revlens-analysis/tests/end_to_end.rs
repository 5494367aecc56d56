//! Full pipeline runs over small fixtures.

use revlens_analysis::ingest::RawTable;
use revlens_analysis::pipeline::MetricOutcome;
use revlens_analysis::scoring::review_score;
use revlens_analysis::sentiment::heuristic::heuristic_distribution;
use revlens_analysis::text::normalize;
use revlens_analysis::{AnalysisPipeline, AnalysisSession};
use revlens_core::config::{BackendConfig, BootstrapConfig, ResampleLevel, ScoringConfig};
use revlens_core::errors::{AnalysisError, ErrorCode, ValidationError};
use revlens_core::RevlensConfig;

const SOLO: &str = "solo";

fn solo_config(iterations: usize) -> RevlensConfig {
    RevlensConfig {
        scoring: ScoringConfig {
            backends: vec![BackendConfig::heuristic(SOLO, "Solo", 0.0)],
        },
        bootstrap: BootstrapConfig {
            iterations,
            ..BootstrapConfig::default()
        },
        ..RevlensConfig::default()
    }
}

fn csv_table(csv: &str) -> RawTable {
    RawTable::from_csv_reader(csv.as_bytes()).unwrap()
}

/// Review score of any text under a zero-bias heuristic backend.
fn solo_score(text: &str) -> f64 {
    review_score(&heuristic_distribution(&normalize(text), SOLO, 0.0))
}

#[test]
fn four_review_two_facility_fixture() {
    // F1 reviews carry positive keywords and F2 reviews negative ones, so the
    // facility means differ in sign regardless of the per-text perturbation.
    let texts = [
        "先生が親切で丁寧",
        "安心できる良い病院",
        "待ち時間が長い",
        "料金が高いし駐車場も狭い",
    ];
    let table = csv_table(&format!(
        "facility_id,review_text,star_rating\nF1,{},5\nF1,{},1\nF2,{},3\nF2,{},4\n",
        texts[0], texts[1], texts[2], texts[3]
    ));

    let pipeline = AnalysisPipeline::from_config(solo_config(500)).unwrap();
    let result = pipeline.run_analysis(&table).unwrap();

    let facilities = &result.facilities;
    assert_eq!(facilities.len(), 2);
    assert_eq!(facilities[0].facility_id, "F1");
    assert_eq!(facilities[0].review_count, 2);
    assert_eq!(facilities[0].mean_star_score, 0.0);
    assert_eq!(facilities[1].mean_star_score, 0.5);

    let f1 = (solo_score(texts[0]) + solo_score(texts[1])) / 2.0;
    let f2 = (solo_score(texts[2]) + solo_score(texts[3])) / 2.0;
    assert!(f1 > 0.5, "f1 = {f1}");
    assert!(f2 < -0.3, "f2 = {f2}");
    assert!((facilities[0].mean_backend_scores[0] - f1).abs() < 1e-12);
    assert!((facilities[1].mean_backend_scores[0] - f2).abs() < 1e-12);

    let metric = &result.metrics[0];
    let expected_mae = (f1.abs() + (0.5 - f2).abs()) / 2.0;
    assert!((metric.mae - expected_mae).abs() < 1e-12);

    // Two facilities with opposite ordering: r = -1 and, with n = 2, p = 1.
    assert!(metric.issue.is_none());
    assert!((metric.correlation + 1.0).abs() < 1e-12);
    assert_eq!(metric.p_value, 1.0);

    // Every non-degenerate resample of two points reproduces r = -1.
    let interval = result.correlation_intervals[0].interval.value().unwrap();
    assert!((interval.ci_lower + 1.0).abs() < 1e-12);
    assert!((interval.ci_upper + 1.0).abs() < 1e-12);

    let summary = &result.summary;
    assert_eq!(summary.total_reviews, 4);
    assert_eq!(summary.unique_facilities, 2);
    assert!((summary.avg_rating - 3.25).abs() < 1e-12);
    assert_eq!(
        summary.star_distribution.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
        vec![(1, 1), (3, 1), (4, 1), (5, 1)]
    );

    // One backend: no pairs, a best backend and no runner-up.
    assert!(result.pairwise.is_empty());
    assert_eq!(result.ranking.best(), Some(SOLO));
    assert_eq!(result.ranking.second_best(), None);
}

#[test]
fn missing_star_rating_column_is_named() {
    let table = csv_table("facility_id,review_text\nA,良い\n");
    let pipeline = AnalysisPipeline::from_config(solo_config(10)).unwrap();
    match pipeline.run_analysis(&table) {
        Err(AnalysisError::Validation(err)) => {
            assert_eq!(err.missing_columns(), &["star_rating".to_string()]);
            assert_eq!(err.error_code(), "VALIDATION_MISSING_COLUMNS");
        }
        other => panic!("expected missing column error, got {other:?}"),
    }
}

#[test]
fn out_of_range_ratings_are_dropped() {
    let table = csv_table(
        "facility_id,review_text,star_rating\n\
         A,良い,0\nA,悪い,6\nA,普通,3\nB,丁寧,4\nB,高い,2\n",
    );
    let pipeline = AnalysisPipeline::from_config(solo_config(50)).unwrap();
    let result = pipeline.run_analysis(&table).unwrap();
    assert_eq!(result.summary.total_reviews, 3);
    assert_eq!(result.summary.input_rows, 5);
    assert_eq!(result.summary.dropped.invalid_rating, 2);
    assert_eq!(result.scored_reviews.len(), 3);
}

#[test]
fn all_rows_invalid_fails_validation() {
    let table = csv_table("facility_id,review_text,star_rating\nA,良い,0\n");
    let pipeline = AnalysisPipeline::from_config(solo_config(10)).unwrap();
    assert!(matches!(
        pipeline.run_analysis(&table),
        Err(AnalysisError::Validation(ValidationError::NoValidRows { dropped: 1 }))
    ));
}

#[test]
fn single_facility_reports_unavailable_statistics() {
    let table = csv_table(
        "facility_id,review_text,star_rating\nA,良い,5\nA,悪い,1\nA,普通,3\n",
    );
    let pipeline = AnalysisPipeline::from_config(solo_config(50)).unwrap();
    let result = pipeline.run_analysis(&table).unwrap();

    assert_eq!(result.facilities.len(), 1);
    let f = &result.facilities[0];
    assert_eq!(f.review_count, 3);
    assert_eq!(f.mean_star_score, 0.0);

    let metric = &result.metrics[0];
    assert!(metric.correlation.is_nan());
    assert!(metric.mae.is_finite());
    match &result.correlation_intervals[0].interval {
        MetricOutcome::Unavailable { code, .. } => assert_eq!(code, "STATS_INSUFFICIENT_DATA"),
        other => panic!("expected unavailable interval, got {other:?}"),
    }
    assert!(!result.regressions[0].fit.is_computed());
}

fn multi_facility_csv() -> String {
    let texts = [
        "先生が親切で丁寧でした",
        "待ち時間が長いし料金が高い",
        "安心できる良い病院です",
        "駐車場が狭くて不便",
        "普通の病院でした",
        "清潔で優しいスタッフ",
        "説明が不十分で不安",
        "また行きます",
    ];
    let mut csv = String::from("facility_id,review_text,star_rating\n");
    for i in 0..40 {
        let text = texts[i % texts.len()];
        let rating = match i % texts.len() {
            0 | 2 | 5 => 5,
            1 | 3 | 6 => 1 + i % 2,
            _ => 3,
        };
        csv.push_str(&format!("F{},{},{}\n", i % 10, text, rating));
    }
    csv
}

#[test]
fn default_backends_produce_all_pairs() {
    let config = RevlensConfig {
        bootstrap: BootstrapConfig {
            iterations: 300,
            ..BootstrapConfig::default()
        },
        ..RevlensConfig::default()
    };
    let pipeline = AnalysisPipeline::from_config(config).unwrap();
    let result = pipeline.run_analysis(&csv_table(&multi_facility_csv())).unwrap();

    assert_eq!(result.backends.len(), 3);
    assert_eq!(result.facilities.len(), 10);
    assert_eq!(result.pairwise.len(), 3);
    let ids: Vec<&str> = result.backends.iter().map(|b| b.id.as_str()).collect();
    assert!(result.comparison(ids[0], ids[1]).is_some());
    assert!(result.comparison(ids[1], ids[0]).is_none());

    for pair in &result.pairwise {
        let r = pair.result.value().unwrap();
        assert_eq!(r.is_significant, r.ci_lower > 0.0 || r.ci_upper < 0.0);
        assert!((0.0..=1.0).contains(&r.p_value));
        assert_eq!(r.difference_samples.len(), 300);
    }
    for metric in &result.metrics {
        assert!((-1.0..=1.0).contains(&metric.correlation));
        assert!(metric.mae >= 0.0);
    }
    assert_eq!(result.correlation_matrix.values.len(), 3);
    assert_eq!(result.ranking.order.len(), 3);
    assert_eq!(result.facility_overview.len(), 10);
    assert!(result.regressions.iter().all(|r| r.fit.is_computed()));
}

#[test]
fn runs_are_deterministic() {
    let table = csv_table(&multi_facility_csv());
    let run = |threads: Option<usize>| {
        let config = RevlensConfig {
            bootstrap: BootstrapConfig {
                iterations: 200,
                threads,
                ..BootstrapConfig::default()
            },
            ..RevlensConfig::default()
        };
        let result = AnalysisPipeline::from_config(config)
            .unwrap()
            .run_analysis(&table)
            .unwrap();
        serde_json::to_string(&result).unwrap()
    };
    assert_eq!(run(None), run(None));
    assert_eq!(run(None), run(Some(2)));
}

#[test]
fn review_level_resampling() {
    let config = RevlensConfig {
        bootstrap: BootstrapConfig {
            iterations: 200,
            level: ResampleLevel::Review,
            ..BootstrapConfig::default()
        },
        ..RevlensConfig::default()
    };
    let mut session = AnalysisSession::from_config(config).unwrap();
    let result = session.run_analysis(&csv_table(&multi_facility_csv())).unwrap();
    assert_eq!(result.resample_level, ResampleLevel::Review);
    let stored = result.pairwise[0].result.value().unwrap().clone();

    let ids: Vec<String> = result.backends.iter().map(|b| b.id.clone()).collect();
    let on_demand = session.compare_backends(&ids[0], &ids[1]).unwrap();
    assert_eq!(on_demand, stored);
}

#[test]
fn config_file_drives_the_session() {
    revlens_core::logging::init_tracing();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("revlens.toml"),
        r#"
[bootstrap]
iterations = 100
seed = 7

[[scoring.backends]]
id = "left"
display_name = "Left"
bias = -0.1

[[scoring.backends]]
id = "right"
display_name = "Right"
bias = 0.1
"#,
    )
    .unwrap();

    let config = RevlensConfig::load(dir.path(), None).unwrap();
    let mut session = AnalysisSession::from_config(config).unwrap();
    session.run_analysis(&csv_table(&multi_facility_csv())).unwrap();

    let csv = String::from_utf8(session.export_csv().unwrap()).unwrap();
    assert!(csv.starts_with(
        "Facility ID,Review Text,Star Rating,Star Score,Left Score,Right Score\n"
    ));
    let cmp = session.compare_backends("Left", "Right").unwrap();
    assert_eq!(cmp.iteration_count, 100);
}
