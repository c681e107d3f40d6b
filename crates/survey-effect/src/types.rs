//! Types for effect size representation

use serde::Serialize;
use std::fmt;

/// Kinds of effect size reported by the survey tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSizeType {
    /// Association strength of a contingency table
    CramersV,
    /// Standardized mean difference with pooled standard deviation
    CohensD,
    /// Proportion of variance explained by group membership
    EtaSquared,
    /// A correlation coefficient (Pearson, Spearman or Kendall)
    Correlation,
}

impl EffectSizeType {
    /// Get the name of the effect size type
    pub fn name(&self) -> &'static str {
        match self {
            Self::CramersV => "Cramér's V",
            Self::CohensD => "Cohen's d",
            Self::EtaSquared => "Eta-squared",
            Self::Correlation => "Correlation",
        }
    }

    /// Get the range of possible values for this effect size type
    pub fn typical_range(&self) -> (f64, f64) {
        match self {
            Self::CramersV => (0.0, 1.0),
            Self::CohensD => (f64::NEG_INFINITY, f64::INFINITY),
            Self::EtaSquared => (0.0, 1.0),
            Self::Correlation => (-1.0, 1.0),
        }
    }

    /// Upper bounds of the interpretation bands, applied to the absolute
    /// magnitude. A magnitude at or above the last bound falls in the top
    /// band.
    pub fn band_thresholds(&self) -> &'static [f64] {
        match self {
            Self::CramersV => &[0.1, 0.3, 0.5],
            Self::CohensD => &[0.2, 0.5, 0.8],
            Self::EtaSquared => &[0.01, 0.06, 0.14],
            Self::Correlation => &[0.1, 0.3, 0.5, 0.7],
        }
    }
}

impl fmt::Display for EffectSizeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An effect size measurement with magnitude and interpretation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectSize {
    /// The effect size magnitude
    pub magnitude: f64,
    /// The type of effect size
    pub effect_type: EffectSizeType,
    /// Interpretation of the magnitude
    pub interpretation: EffectSizeInterpretation,
    /// Sample sizes (group1, group2) for two-group measures
    pub sample_sizes: Option<(usize, usize)>,
}

impl EffectSize {
    /// Create a new effect size
    pub fn new(
        magnitude: f64,
        effect_type: EffectSizeType,
        sample_sizes: Option<(usize, usize)>,
    ) -> Self {
        let interpretation = EffectSizeInterpretation::from_magnitude(magnitude, effect_type);

        Self {
            magnitude,
            effect_type,
            interpretation,
            sample_sizes,
        }
    }

    /// Get the absolute magnitude
    pub fn abs_magnitude(&self) -> f64 {
        self.magnitude.abs()
    }

    /// Band label in the vocabulary of this effect size type
    pub fn label(&self) -> &'static str {
        self.interpretation.label(self.effect_type)
    }

    /// Check if the effect reaches at least the moderate band
    pub fn is_practically_significant(&self) -> bool {
        self.interpretation >= EffectSizeInterpretation::Moderate
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.3} ({})",
            self.effect_type.name(),
            self.magnitude,
            self.label()
        )
    }
}

/// Interpretation band of an effect size magnitude
///
/// Bands are ordered from weakest to strongest. Only correlations use
/// [`EffectSizeInterpretation::VeryLarge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectSizeInterpretation {
    /// No meaningful effect
    Negligible,
    /// Small (or weak) effect
    Small,
    /// Moderate effect
    Moderate,
    /// Large (or strong) effect
    Large,
    /// Very strong correlation
    VeryLarge,
}

impl EffectSizeInterpretation {
    /// Get interpretation from magnitude based on effect size type
    ///
    /// The sign is ignored and non-finite magnitudes are treated as
    /// negligible. The computed value itself is never altered.
    pub fn from_magnitude(magnitude: f64, effect_type: EffectSizeType) -> Self {
        let abs_magnitude = magnitude.abs();
        if abs_magnitude.is_nan() {
            return Self::Negligible;
        }

        let band = effect_type
            .band_thresholds()
            .iter()
            .take_while(|&&bound| abs_magnitude >= bound)
            .count();

        match band {
            0 => Self::Negligible,
            1 => Self::Small,
            2 => Self::Moderate,
            3 => Self::Large,
            _ => Self::VeryLarge,
        }
    }

    /// Label of this band for the given effect size type
    pub fn label(&self, effect_type: EffectSizeType) -> &'static str {
        use EffectSizeType::*;
        match (self, effect_type) {
            (Self::Negligible, _) => "none",
            (Self::Small, CramersV | Correlation) => "weak",
            (Self::Small, _) => "small",
            (Self::Moderate, _) => "moderate",
            (Self::Large, CramersV | Correlation) => "strong",
            (Self::Large, _) => "large",
            (Self::VeryLarge, Correlation) => "very strong",
            (Self::VeryLarge, _) => "large",
        }
    }
}

impl fmt::Display for EffectSizeInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Moderate => "moderate",
            Self::Large => "large",
            Self::VeryLarge => "very large",
        };
        write!(f, "{}", s)
    }
}

/// Band a Cramér's V value: none, weak, moderate, strong
pub fn interpret_cramers_v(v: f64) -> &'static str {
    interpret(v, EffectSizeType::CramersV)
}

/// Band a Cohen's d value by absolute size: none, small, moderate, large
pub fn interpret_cohens_d(d: f64) -> &'static str {
    interpret(d, EffectSizeType::CohensD)
}

/// Band an eta-squared value: none, small, moderate, large
pub fn interpret_eta_squared(eta_squared: f64) -> &'static str {
    interpret(eta_squared, EffectSizeType::EtaSquared)
}

/// Band a correlation coefficient by absolute size: none, weak, moderate,
/// strong, very strong
pub fn interpret_correlation(r: f64) -> &'static str {
    interpret(r, EffectSizeType::Correlation)
}

/// Band label for any effect size type
pub fn interpret(value: f64, effect_type: EffectSizeType) -> &'static str {
    EffectSizeInterpretation::from_magnitude(value, effect_type).label(effect_type)
}
