//! End-to-end survey analysis
//!
//! Usage: `cargo run -p survey-polars --example analyze_survey -- <config.json>`
//!
//! Without an argument a small demo survey is written to a temporary
//! directory and analysed. Set `RUST_LOG=debug` for per-operation detail.

use anyhow::Context;
use std::io::Write;
use survey_core::audit::{check_completeness, check_consistency, check_validity};
use survey_core::{MissingStrategy, ProjectConfig, SurveyConfig};
use survey_crosstab::{export_csv, run_tiered_crosstabs, summarize_crosstab};
use survey_hypothesis::{
    all_frequencies, analyze_missing_values, run_tier_chi_square, HypothesisTest,
};
use survey_polars::{load_raw_data, prepare};
use tracing_subscriber::EnvFilter;

const DEMO_CSV: &str = "\
Q1. Gender,Q2. Age,Q3. Satisfaction,Q4. Hobbies
m,20s,high,reading、movies
f,30s,low,movies
f,20s,mid,
m,40s,high,sports、reading
f,30s,mid,reading
m,30s,low,movies、sports
f,20s,high,reading、movies、sports
m,40s,mid,sports
f,40s,low,movies
m,20s,high,reading
";

fn demo_config(dir: &std::path::Path) -> anyhow::Result<ProjectConfig> {
    let data_path = dir.join("survey.csv");
    std::fs::File::create(&data_path)?.write_all(DEMO_CSV.as_bytes())?;

    Ok(ProjectConfig::new(data_path, dir.join("output"))
        .with_question("gender", "Q1. Gender")
        .with_question("age", "Q2. Age")
        .with_question("satisfaction", "Q3. Satisfaction")
        .with_question("hobbies", "Q4. Hobbies")
        .with_category_order("satisfaction", ["low", "mid", "high"])
        .with_category_order("age", ["20s", "30s", "40s"])
        .with_tier_pair("tier1", "gender", "satisfaction")
        .with_tier_pair("tier1", "age", "satisfaction")
        .with_tier_pair("tier2", "gender", "region"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let demo_dir = tempfile::tempdir()?;
    let config = match std::env::args().nth(1) {
        Some(path) => ProjectConfig::from_json_file(&path)
            .with_context(|| format!("reading configuration {path}"))?,
        None => demo_config(demo_dir.path())?,
    };

    for problem in config.validate() {
        println!("config: {problem}");
    }

    // audits look at the raw answers; preparation turns out-of-order values
    // into missing cells
    let raw = load_raw_data(&config)?;
    println!(
        "=== Survey: {} respondents, {} columns ===\n",
        raw.n_rows(),
        raw.n_columns()
    );

    println!("1. Data quality");
    let completeness = check_completeness(&raw, &config);
    println!("  Missing columns: {:?}", completeness.missing_columns);
    for validity in check_validity(&raw, &config).iter().filter(|v| !v.is_valid()) {
        println!("  {}: invalid values {:?}", validity.column, validity.invalid_values);
    }
    let consistency = check_consistency(&raw);
    println!("  Duplicate rows: {}", consistency.duplicate_rows.len());
    for missing in analyze_missing_values(&raw).iter().filter(|m| m.missing_count > 0) {
        println!(
            "  {}: {} missing ({}%)",
            missing.column, missing.missing_count, missing.missing_percentage
        );
    }

    let prepared = prepare(&raw, &config, &MissingStrategy::Keep)?;
    for warning in &prepared.warnings {
        println!("  warning: {warning}");
    }
    let data = &prepared.data;

    println!("\n2. Frequencies");
    let frequencies = all_frequencies(data, &config, false);
    for (question_id, table) in &frequencies.tables {
        if let Some(entry) = table.entries.first() {
            println!(
                "  {question_id}: most common {:?} ({} answers)",
                entry.value.as_deref().unwrap_or("-"),
                entry.count
            );
        }
    }

    let output_dir = config.ensure_output_dir()?;
    for tier in config.crosstab_tiers().keys() {
        println!("\n3. Cross-tabulation, {tier}");
        let crosstabs = run_tiered_crosstabs(data, &config, tier);
        for (key, table) in &crosstabs.tables {
            let summary = summarize_crosstab(table, table.row_name(), table.col_name());
            if let Some(cell) = summary.max_cell {
                println!(
                    "  {key}: n = {}, largest cell {} x {} = {} ({:.1}%)",
                    summary.total_n, cell.row, cell.col, cell.count, cell.percentage
                );
            }
        }
        for warning in &crosstabs.warnings {
            println!("  skipped: {warning}");
        }
        let saved = export_csv(
            crosstabs.tables.iter().map(|(k, t)| (k.as_str(), t)),
            output_dir,
            tier,
        )?;
        println!("  saved {} tables to {}", saved.len(), output_dir.display());

        println!("\n4. Chi-square tests, {tier}");
        for item in run_tier_chi_square(data, &config, tier, true) {
            match (&item.result, item.correction) {
                (Ok(result), Some(correction)) => println!(
                    "  {}: chi2 = {:.3}, p = {:.4} {}, corrected p = {:.4}, {}",
                    item.key(),
                    result.chi2,
                    result.p_value,
                    result.marker(),
                    correction.p_value_corrected,
                    result.effect_size()
                ),
                (Ok(result), None) => println!(
                    "  {}: chi2 = {:.3}, p = {:.4}",
                    item.key(),
                    result.chi2,
                    result.p_value
                ),
                (Err(e), _) => println!("  {}: skipped ({e})", item.key()),
            }
        }
    }

    Ok(())
}
