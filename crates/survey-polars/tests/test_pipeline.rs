//! End-to-end analysis of a survey file: load, prepare, tabulate, test

mod common;

use approx::assert_relative_eq;
use survey_core::{MissingStrategy, ProjectConfig};
use survey_crosstab::run_tiered_crosstabs;
use survey_effect::EffectSizeInterpretation;
use survey_hypothesis::{
    frequency_distribution, run_tier_chi_square, t_test_independent, HypothesisTest,
};
use survey_polars::load_and_prepare;

const GROUPS_CSV: &str = "\
Q1. Group,Q2. Score,Q3. Answer
a,5,yes
a,5,yes
a,4,maybe
a,5,yes
a,4,yes
b,1,no
b,2,no
b,2,maybe
b,3,no
b,1,no
";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config(data_path: &std::path::Path, output_dir: &std::path::Path) -> ProjectConfig {
    ProjectConfig::new(data_path, output_dir)
        .with_question("group", "Q1. Group")
        .with_question("score", "Q2. Score")
        .with_question("answer", "Q3. Answer")
        .with_category_order("answer", ["no", "maybe", "yes"])
        .with_tier_pair("main", "group", "answer")
        .with_tier_pair("main", "group", "absent")
}

#[test]
fn test_full_pipeline() -> anyhow::Result<()> {
    init_tracing();
    let (dir, path) = common::write_csv(GROUPS_CSV);
    let config = config(&path, dir.path());

    let prepared = load_and_prepare(&config, &MissingStrategy::Keep)?;
    assert!(prepared.warnings.is_empty());
    let data = &prepared.data;
    tracing::info!(rows = data.n_rows(), "prepared survey");

    let tier = run_tiered_crosstabs(data, &config, "main");
    assert_eq!(tier.len(), 1);
    assert_eq!(tier.warnings.len(), 1);

    let t = t_test_independent(data, "group", "score", "a", "b", Some(&config))?;
    assert_relative_eq!(t.mean1 - t.mean2, 2.8, epsilon = 1e-12);
    assert!(t.p_value < 0.01);
    assert_eq!(t.effect_size().interpretation, EffectSizeInterpretation::Large);

    let batch = run_tier_chi_square(data, &config, "main", true);
    assert_eq!(batch.len(), 2);
    assert!(batch[0].is_ok());
    assert!(batch[0].correction.is_some());
    assert!(!batch[1].is_ok());
    Ok(())
}

#[test]
fn test_frequencies_follow_category_order() -> anyhow::Result<()> {
    let (dir, path) = common::write_csv(GROUPS_CSV);
    let config = config(&path, dir.path());
    let prepared = load_and_prepare(&config, &MissingStrategy::Keep)?;

    let table = frequency_distribution(&prepared.data, "Q3. Answer", false)?;
    assert_eq!(table.count_of(Some("yes")), 4);
    assert_eq!(table.count_of(Some("no")), 4);
    assert_eq!(table.total(), 10);
    Ok(())
}
