//! Shared vocabulary of test results

use serde::Serialize;
use std::fmt;
use survey_effect::EffectSize;

/// Which test produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    ChiSquare,
    TTest,
    Anova,
    Correlation,
}

impl TestKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChiSquare => "chi_square",
            Self::TTest => "t_test",
            Self::Anova => "anova",
            Self::Correlation => "correlation",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Common view of every test result
pub trait HypothesisTest {
    /// Which test produced this result
    fn kind(&self) -> TestKind;

    /// The test statistic (chi², t, F or the correlation coefficient)
    fn statistic(&self) -> f64;

    fn p_value(&self) -> f64;

    /// Effect size with its interpretation band
    fn effect_size(&self) -> EffectSize;

    /// Whether the p-value is below `alpha`
    fn is_significant(&self, alpha: f64) -> bool {
        self.p_value() < alpha
    }

    /// Significance stars of the p-value
    fn marker(&self) -> &'static str {
        significance_marker(self.p_value())
    }
}

/// `***` for p ≤ 0.001, `**` for p ≤ 0.01, `*` for p ≤ 0.05, otherwise `ns`
pub fn significance_marker(p_value: f64) -> &'static str {
    if p_value <= 0.001 {
        "***"
    } else if p_value <= 0.01 {
        "**"
    } else if p_value <= 0.05 {
        "*"
    } else {
        "ns"
    }
}
