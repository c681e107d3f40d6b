//! Shared fixtures for crosstab integration tests

#![allow(dead_code)]

use survey_core::{Dataset, ProjectConfig};

/// Twelve respondents with gender, age band, satisfaction and hobbies
pub fn survey() -> Dataset {
    Dataset::builder()
        .text(
            "Q1. Gender",
            ["m", "f", "f", "m", "f", "m", "f", "f", "m", "m", "f", "m"],
        )
        .text_opt(
            "Q2. Age",
            [
                Some("20s"),
                Some("30s"),
                Some("20s"),
                Some("40s"),
                None,
                Some("30s"),
                Some("20s"),
                Some("40s"),
                Some("20s"),
                Some("30s"),
                Some("30s"),
                None,
            ],
        )
        .text(
            "Q3. Satisfaction",
            [
                "high", "low", "mid", "high", "mid", "low", "high", "high", "mid", "low", "mid",
                "high",
            ],
        )
        .text_opt(
            "Q4. Hobbies",
            [
                Some("reading、movies"),
                Some("movies"),
                None,
                Some("sports、reading"),
                Some("reading"),
                Some("movies、sports"),
                Some(""),
                Some("reading、movies、sports"),
                None,
                Some("sports"),
                Some("movies"),
                Some("reading"),
            ],
        )
        .build()
        .expect("fixture columns have equal length")
}

pub fn config() -> ProjectConfig {
    ProjectConfig::new("data/survey.csv", "output")
        .with_question("gender", "Q1. Gender")
        .with_question("age", "Q2. Age")
        .with_question("satisfaction", "Q3. Satisfaction")
        .with_question("hobbies", "Q4. Hobbies")
        .with_tier_pair("tier1", "gender", "satisfaction")
        .with_tier_pair("tier1", "gender", "region")
        .with_tier_pair("tier2", "age", "satisfaction")
        .with_tier_pair("tier2", "satisfaction", "gender")
}
