//! Correlation between two variables

use crate::distribution::{normal_two_sided, t_two_sided};
use crate::types::{HypothesisTest, TestKind};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use survey_core::{resolve, Dataset, Error, Result, SurveyConfig};
use survey_effect::{EffectSize, EffectSizeType};
use tracing::debug;

/// Correlation coefficient to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationMethod {
    /// Rank correlation, robust to monotone transforms
    #[default]
    Spearman,
    /// Linear correlation
    Pearson,
    /// Kendall's tau-b
    Kendall,
}

impl CorrelationMethod {
    pub const ALL: [&'static str; 3] = ["spearman", "pearson", "kendall"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spearman => "spearman",
            Self::Pearson => "pearson",
            Self::Kendall => "kendall",
        }
    }
}

impl FromStr for CorrelationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "spearman" => Ok(Self::Spearman),
            "pearson" => Ok(Self::Pearson),
            "kendall" => Ok(Self::Kendall),
            other => Err(Error::unknown_method(
                "correlation method",
                other,
                &Self::ALL,
            )),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a correlation test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub method: CorrelationMethod,
    pub var1: String,
    pub var2: String,
    pub correlation: f64,
    pub p_value: f64,
    /// Number of complete pairs used
    pub n: usize,
}

impl HypothesisTest for CorrelationResult {
    fn kind(&self) -> TestKind {
        TestKind::Correlation
    }

    fn statistic(&self) -> f64 {
        self.correlation
    }

    fn p_value(&self) -> f64 {
        self.p_value
    }

    fn effect_size(&self) -> EffectSize {
        EffectSize::new(self.correlation, EffectSizeType::Correlation, Some((self.n, self.n)))
    }
}

/// Correlate two variables over the respondents who answered both.
///
/// Ordered categorical variables contribute their rank codes; text
/// variables must hold numbers.
///
/// # Errors
///
/// * [`Error::ColumnNotFound`] if either variable has no column
/// * [`Error::NonNumeric`] if a variable cannot be read as numbers
/// * [`Error::InsufficientData`] with fewer than three complete pairs or a
///   constant variable
pub fn correlation_test(
    data: &Dataset,
    var1: &str,
    var2: &str,
    method: CorrelationMethod,
    config: Option<&dyn SurveyConfig>,
) -> Result<CorrelationResult> {
    let column1 = data.require(resolve(config, var1))?;
    let column2 = data.require(resolve(config, var2))?;
    let values1 = column1.numeric_values()?;
    let values2 = column2.numeric_values()?;

    let (x, y): (Vec<f64>, Vec<f64>) = values1
        .iter()
        .zip(&values2)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();

    let n = x.len();
    if n < 3 {
        return Err(Error::insufficient(3, n, "correlation complete pairs"));
    }
    if is_constant(&x) || is_constant(&y) {
        return Err(Error::InsufficientData(format!(
            "correlation of {var1} and {var2} is undefined for a constant variable"
        )));
    }

    let (correlation, p_value) = match method {
        CorrelationMethod::Pearson => pearson_with_p(&x, &y)?,
        CorrelationMethod::Spearman => pearson_with_p(&average_ranks(&x), &average_ranks(&y))?,
        CorrelationMethod::Kendall => kendall_tau_b(&x, &y)?,
    };
    debug!(var1, var2, %method, correlation, p_value, n, "correlation test");

    Ok(CorrelationResult {
        method,
        var1: var1.to_string(),
        var2: var2.to_string(),
        correlation,
        p_value,
        n,
    })
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Pearson's r of two equally long, non-constant samples
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

fn pearson_with_p(x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
    let r = pearson(x, y);
    if r.abs() >= 1.0 {
        return Ok((r, 0.0));
    }
    let df = x.len() as f64 - 2.0;
    let t = r * (df / (1.0 - r * r)).sqrt();
    Ok((r, t_two_sided(t, df)?))
}

/// Ranks starting at 1, ties sharing their average rank
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end share ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = rank;
        }
        start = end;
    }
    ranks
}

/// Kendall's tau-b.
///
/// Untied samples of up to 33 pairs (or with at most one pair out of
/// order) get the exact p-value from the permutation distribution. Otherwise
/// the p-value comes from the normal approximation with a tie-corrected
/// variance.
fn kendall_tau_b(x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
    let n = x.len();
    let mut concordant = 0i64;
    let mut discordant = 0i64;
    for i in 0..n {
        for j in (i + 1)..n {
            if x[i] == x[j] || y[i] == y[j] {
                continue;
            }
            if (x[i] - x[j]).signum() == (y[i] - y[j]).signum() {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let ties_x = tie_groups(x);
    let ties_y = tie_groups(y);
    let nf = n as f64;
    let n0 = nf * (nf - 1.0) / 2.0;
    let n1: f64 = ties_x.iter().map(|&t| t * (t - 1.0) / 2.0).sum();
    let n2: f64 = ties_y.iter().map(|&u| u * (u - 1.0) / 2.0).sum();

    let s = (concordant - discordant) as f64;
    let tau = (s / ((n0 - n1) * (n0 - n2)).sqrt()).clamp(-1.0, 1.0);

    if ties_x.is_empty() && ties_y.is_empty() {
        let n_pairs = n * (n - 1) / 2;
        let discordant = discordant as usize;
        let c = discordant.min(n_pairs - discordant);
        if n <= EXACT_KENDALL_MAX_N || c <= 1 {
            return Ok((tau, kendall_exact_p(n, c)));
        }
    }

    let v0 = nf * (nf - 1.0) * (2.0 * nf + 5.0);
    let vt: f64 = ties_x.iter().map(|&t| t * (t - 1.0) * (2.0 * t + 5.0)).sum();
    let vu: f64 = ties_y.iter().map(|&u| u * (u - 1.0) * (2.0 * u + 5.0)).sum();
    let v1 = ties_x.iter().map(|&t| t * (t - 1.0)).sum::<f64>()
        * ties_y.iter().map(|&u| u * (u - 1.0)).sum::<f64>();
    let v2 = ties_x.iter().map(|&t| t * (t - 1.0) * (t - 2.0)).sum::<f64>()
        * ties_y.iter().map(|&u| u * (u - 1.0) * (u - 2.0)).sum::<f64>();

    let var_s = (v0 - vt - vu) / 18.0
        + v1 / (2.0 * nf * (nf - 1.0))
        + v2 / (9.0 * nf * (nf - 1.0) * (nf - 2.0));

    let p_value = if var_s > 0.0 {
        normal_two_sided(s / var_s.sqrt())?
    } else {
        f64::NAN
    };
    Ok((tau, p_value))
}

const EXACT_KENDALL_MAX_N: usize = 33;

/// Two-sided exact p-value of Kendall's tau for `n` untied pairs, where `c`
/// is the smaller of the discordant and concordant pair counts.
///
/// Counts the permutations of `n` items with at most `c` inversions
/// (Mahonian numbers) and doubles the tail.
fn kendall_exact_p(n: usize, c: usize) -> f64 {
    if n <= 2 {
        return 1.0;
    }
    if c == 0 {
        return if n < 171 { 2.0 / factorial(n) } else { 0.0 };
    }
    if c == 1 {
        return if n < 172 { 2.0 / factorial(n - 1) } else { 0.0 };
    }
    if 4 * c == n * (n - 1) {
        return 1.0;
    }

    // inversion counts 0..=c over the permutations of two items
    let mut counts = vec![0.0; c + 1];
    counts[0] = 1.0;
    counts[1] = 1.0;
    for j in 3..=n {
        let mut running = 0.0;
        for count in counts.iter_mut() {
            running += *count;
            *count = running;
        }
        if j <= c {
            let cumulative = counts.clone();
            for k in j..=c {
                counts[k] -= cumulative[k - j];
            }
        }
    }
    (2.0 * counts.iter().sum::<f64>() / factorial(n)).clamp(0.0, 1.0)
}

fn factorial(n: usize) -> f64 {
    (2..=n).map(|k| k as f64).product()
}

/// Sizes of the groups of tied values (only groups larger than one)
fn tie_groups(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
        .chunk_by(|a, b| a == b)
        .map(|chunk| chunk.len() as f64)
        .filter(|&len| len > 1.0)
        .collect()
}
