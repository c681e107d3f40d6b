//! Descriptive statistics: frequency tables, summaries and missing-value
//! analysis

use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::HashMap;
use survey_core::{Column, DataQualityWarning, Dataset, Result, SurveyConfig};
use tracing::debug;

/// One value of a frequency table; `value` is `None` for the missing bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyEntry {
    pub value: Option<String>,
    pub count: usize,
    /// Share of all rows, two decimals, when normalisation was requested
    pub percentage: Option<f64>,
}

/// Value counts of one column, most frequent first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    pub column: String,
    pub entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Count of a value, or of the missing bucket for `None`
    pub fn count_of(&self, value: Option<&str>) -> usize {
        self.entries
            .iter()
            .find(|e| e.value.as_deref() == value)
            .map_or(0, |e| e.count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// The same table without the missing bucket
    pub fn without_missing(mut self) -> Self {
        self.entries.retain(|e| e.value.is_some());
        self
    }
}

/// Count every value of `column`, missing cells included.
///
/// Entries are sorted by count, descending; ties keep the order in which the
/// values first appear.
pub fn frequency_distribution(
    data: &Dataset,
    column: &str,
    normalize: bool,
) -> Result<FrequencyTable> {
    let column = data.require(column)?;

    let mut entries: Vec<FrequencyEntry> = Vec::new();
    let mut position: HashMap<Option<String>, usize> = HashMap::new();
    for row in 0..column.len() {
        let value = column.label(row).map(|label| label.into_owned());
        match position.get(&value) {
            Some(&i) => entries[i].count += 1,
            None => {
                position.insert(value.clone(), entries.len());
                entries.push(FrequencyEntry {
                    value,
                    count: 1,
                    percentage: None,
                });
            }
        }
    }
    entries.sort_by(|a, b| b.count.cmp(&a.count));

    if normalize {
        let total = column.len() as f64;
        for entry in &mut entries {
            entry.percentage = Some(round2(entry.count as f64 / total * 100.0));
        }
    }

    Ok(FrequencyTable {
        column: column.name().to_string(),
        entries,
    })
}

/// Summary of a numeric column, computed over non-missing values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    /// Adjusted Fisher-Pearson skewness (G1)
    pub skewness: f64,
    /// Excess kurtosis with small-sample adjustment (G2)
    pub kurtosis: f64,
}

/// Summary of a categorical or text column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    pub mode: Option<String>,
    pub mode_count: usize,
    pub mode_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryStatistics {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

/// Summarise a column. Numeric columns get moments and quantiles; every
/// other column gets its mode.
pub fn summary_statistics(data: &Dataset, column: &str) -> Result<SummaryStatistics> {
    let column = data.require(column)?;
    if column.is_numeric() {
        let values: Vec<f64> = column.numeric_values()?.into_iter().flatten().collect();
        Ok(SummaryStatistics::Numeric(numeric_summary(&values)))
    } else {
        Ok(SummaryStatistics::Categorical(categorical_summary(column)))
    }
}

/// Moments and quantiles of a sample. An empty sample gives NaN everywhere.
pub fn numeric_summary(values: &[f64]) -> NumericSummary {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let (min, max) = match (sorted.first(), sorted.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => (f64::NAN, f64::NAN),
    };

    NumericSummary {
        count: values.len(),
        mean: values.iter().mean(),
        std: values.iter().std_dev(),
        min,
        max,
        median: quantile_sorted(&sorted, 0.5),
        q1: quantile_sorted(&sorted, 0.25),
        q3: quantile_sorted(&sorted, 0.75),
        skewness: skewness(values),
        kurtosis: excess_kurtosis(values),
    }
}

/// Quantile of sorted data by linear interpolation between closest ranks
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

fn central_sums(values: &[f64]) -> (f64, f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().fold((0.0, 0.0, 0.0), |(s2, s3, s4), &x| {
        let d = x - mean;
        let d2 = d * d;
        (s2 + d2, s3 + d2 * d, s4 + d2 * d2)
    })
}

/// Adjusted sample skewness; NaN below three values, 0 for constant data
fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 3 {
        return f64::NAN;
    }
    let (s2, s3, _) = central_sums(values);
    let m2 = s2 / n;
    let m3 = s3 / n;
    if m2 == 0.0 {
        return 0.0;
    }
    (n * (n - 1.0)).sqrt() / (n - 2.0) * m3 / m2.powf(1.5)
}

/// Adjusted excess kurtosis; NaN below four values, 0 for constant data
fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 4 {
        return f64::NAN;
    }
    let (s2, _, s4) = central_sums(values);
    let denominator = (n - 2.0) * (n - 3.0) * s2 * s2;
    if denominator == 0.0 {
        return 0.0;
    }
    let numerator = n * (n + 1.0) * (n - 1.0) * s4;
    let adjustment = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    numerator / denominator - adjustment
}

fn categorical_summary(column: &Column) -> CategoricalSummary {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();
    for row in 0..column.len() {
        let Some(label) = column.label(row) else {
            continue;
        };
        match position.get(&*label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(label.to_string(), counts.len());
                counts.push((label.into_owned(), 1));
            }
        }
    }

    let count: usize = counts.iter().map(|(_, c)| c).sum();
    // first value with the highest count
    let mode = counts
        .iter()
        .fold(None::<&(String, usize)>, |best, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        });

    CategoricalSummary {
        count,
        unique: counts.len(),
        mode: mode.map(|(label, _)| label.clone()),
        mode_count: mode.map_or(0, |(_, c)| *c),
        mode_percentage: mode.map_or(0.0, |(_, c)| *c as f64 / count as f64 * 100.0),
    }
}

/// Frequency tables for every configured question, keyed by question id
#[derive(Debug, Clone, Default)]
pub struct AllFrequencies {
    pub tables: Vec<(String, FrequencyTable)>,
    pub warnings: Vec<DataQualityWarning>,
}

impl AllFrequencies {
    pub fn get(&self, question_id: &str) -> Option<&FrequencyTable> {
        self.tables
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, table)| table)
    }
}

/// Normalised frequency tables of every configured question. Questions whose
/// column is absent are skipped with a [`DataQualityWarning::MissingColumn`].
pub fn all_frequencies(
    data: &Dataset,
    config: &dyn SurveyConfig,
    include_missing: bool,
) -> AllFrequencies {
    let mut result = AllFrequencies::default();
    for (question_id, column) in config.questions() {
        if !data.has_column(column) {
            result.warnings.push(
                DataQualityWarning::MissingColumn {
                    question_id: Some(question_id.clone()),
                    column: column.clone(),
                }
                .emit(),
            );
            continue;
        }
        // presence checked above
        if let Ok(table) = frequency_distribution(data, column, true) {
            let table = if include_missing { table } else { table.without_missing() };
            result.tables.push((question_id.clone(), table));
        }
    }
    debug!(tables = result.tables.len(), "frequencies computed");
    result
}

/// Missing cells of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingSummary {
    pub column: String,
    pub missing_count: usize,
    /// Two decimals
    pub missing_percentage: f64,
}

/// Missing-value counts of every column, most incomplete first
pub fn analyze_missing_values(data: &Dataset) -> Vec<MissingSummary> {
    let n = data.n_rows();
    let mut summaries: Vec<MissingSummary> = data
        .columns()
        .iter()
        .map(|column| {
            let missing_count = column.missing_count();
            let missing_percentage = if n == 0 {
                0.0
            } else {
                round2(missing_count as f64 / n as f64 * 100.0)
            };
            MissingSummary {
                column: column.name().to_string(),
                missing_count,
                missing_percentage,
            }
        })
        .collect();
    summaries.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
    summaries
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
