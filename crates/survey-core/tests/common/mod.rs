//! Common fixtures for survey-core tests

use survey_core::{Dataset, ProjectConfig};

/// Ten respondents answering four categorical questions
pub fn sample_dataset() -> Dataset {
    Dataset::builder()
        .text(
            "Age",
            ["20s", "30s", "20s", "40s", "30s", "20s", "30s", "40s", "20s", "30s"],
        )
        .text(
            "Gender",
            ["M", "F", "M", "F", "M", "F", "M", "F", "M", "F"],
        )
        .text(
            "Satisfaction",
            [
                "satisfied",
                "neutral",
                "unhappy",
                "satisfied",
                "satisfied",
                "neutral",
                "unhappy",
                "satisfied",
                "neutral",
                "very happy",
            ],
        )
        .numeric("Score", [4.0, 3.0, 1.0, 5.0, 4.0, 3.0, 2.0, 5.0, 3.0, 4.0])
        .build()
        .unwrap()
}

/// Configuration matching [`sample_dataset`]
pub fn sample_config() -> ProjectConfig {
    ProjectConfig::new("/tmp/test_survey.csv", "/tmp/test_output")
        .with_question("age", "Age")
        .with_question("gender", "Gender")
        .with_question("satisfaction", "Satisfaction")
        .with_question("interest", "Interest")
        .with_category_order("satisfaction", ["unhappy", "neutral", "satisfied"])
}
