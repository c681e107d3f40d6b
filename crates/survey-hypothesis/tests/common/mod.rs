//! Shared fixtures for hypothesis-test integration tests

#![allow(dead_code)]

use survey_core::{apply_category_orders, Dataset, ProjectConfig};

pub const SATISFACTION_ORDER: [&str; 3] = ["low", "mid", "high"];

/// Sixteen respondents: two groups with clearly different scores, a region
/// with three levels and an ordered satisfaction answer
pub fn survey() -> Dataset {
    Dataset::builder()
        .text(
            "Q1. Group",
            [
                "a", "a", "a", "a", "b", "b", "b", "b", "a", "a", "b", "b", "c", "c", "c", "c",
            ],
        )
        .text(
            "Q2. Region",
            [
                "north", "north", "south", "west", "north", "south", "south", "west", "west",
                "north", "south", "west", "north", "south", "west", "west",
            ],
        )
        .numeric_opt(
            "Q3. Score",
            [
                Some(5.0),
                Some(5.0),
                Some(4.0),
                Some(5.0),
                Some(1.0),
                Some(2.0),
                Some(2.0),
                Some(3.0),
                Some(4.0),
                None,
                Some(2.0),
                Some(1.0),
                Some(3.0),
                Some(3.0),
                Some(4.0),
                Some(2.0),
            ],
        )
        .text(
            "Q4. Satisfaction",
            [
                "high", "high", "mid", "high", "low", "low", "mid", "low", "high", "mid", "low",
                "low", "mid", "mid", "high", "low",
            ],
        )
        .text(
            "Q5. Comment",
            [
                "good", "fine", "ok", "great", "bad", "meh", "bad", "poor", "nice", "ok", "bad",
                "bad", "ok", "ok", "good", "meh",
            ],
        )
        .build()
        .expect("fixture columns have equal length")
}

pub fn config() -> ProjectConfig {
    ProjectConfig::new("data/survey.csv", "output")
        .with_question("group", "Q1. Group")
        .with_question("region", "Q2. Region")
        .with_question("score", "Q3. Score")
        .with_question("satisfaction", "Q4. Satisfaction")
        .with_question("comment", "Q5. Comment")
        .with_category_order("satisfaction", SATISFACTION_ORDER)
        .with_tier_pair("tier1", "group", "satisfaction")
        .with_tier_pair("tier1", "group", "missing")
        .with_tier_pair("tier1", "region", "satisfaction")
}

/// The survey with satisfaction converted to an ordered column
pub fn prepared_survey() -> Dataset {
    let (data, _) = apply_category_orders(&survey(), &config()).expect("fixture config is valid");
    data
}
