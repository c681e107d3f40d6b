//! Common test utilities for survey-polars tests

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use survey_core::ProjectConfig;
use tempfile::TempDir;

pub const SURVEY_CSV: &str = "\
Q1. Gender,Q2. Age,Q3. Satisfaction,Q4. Score
m,20s,high,5
f,30s,low,2
f,20s,mid,
m,40s,high,4
f,,mid,3
m,30s,unknown,1
";

/// Write `contents` as `survey.csv` inside a fresh temporary directory
pub fn write_csv(contents: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}

pub fn config(data_path: &Path, output_dir: &Path) -> ProjectConfig {
    ProjectConfig::new(data_path, output_dir)
        .with_question("gender", "Q1. Gender")
        .with_question("age", "Q2. Age")
        .with_question("satisfaction", "Q3. Satisfaction")
        .with_question("score", "Q4. Score")
        .with_category_order("satisfaction", ["low", "mid", "high"])
        .with_tier_pair("tier1", "gender", "satisfaction")
}
