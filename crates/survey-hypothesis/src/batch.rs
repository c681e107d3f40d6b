//! Chi-square tests over many variable pairs

use crate::chi_square::{chi_square_test, ChiSquareResult};
use crate::correction::{apply_fdr_correction, CorrectionMethod};
use survey_core::{DataQualityWarning, Dataset, Result, SurveyConfig};
use survey_crosstab::pair_key;
use tracing::{debug, instrument, warn};

/// Multiple-testing adjustment attached to one successful test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    pub p_value_corrected: f64,
    /// Corrected p-value below the configured alpha
    pub significant: bool,
}

/// Outcome of one pair of a batch
#[derive(Debug)]
pub struct ChiSquareBatchItem {
    pub var1: String,
    pub var2: String,
    pub result: Result<ChiSquareResult>,
    /// Present only when correction was requested and the test produced a
    /// finite p-value
    pub correction: Option<Correction>,
}

impl ChiSquareBatchItem {
    pub fn key(&self) -> String {
        pair_key(&self.var1, &self.var2)
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Non-fatal warning describing a failed pair
    pub fn warning(&self) -> Option<DataQualityWarning> {
        self.result.as_ref().err().map(|e| DataQualityWarning::PairFailed {
            key: self.key(),
            reason: e.to_string(),
        })
    }
}

/// Run a chi-square test for every pair, in order.
///
/// Failing pairs are kept in the output with their error. With
/// `apply_correction`, Benjamini-Hochberg correction at the configured alpha
/// is applied across the pairs that produced a finite p-value only.
#[instrument(skip(data, pairs, config), fields(n_pairs = pairs.len()))]
pub fn run_tiered_chi_square(
    data: &Dataset,
    pairs: &[(String, String)],
    config: &dyn SurveyConfig,
    apply_correction: bool,
) -> Vec<ChiSquareBatchItem> {
    let mut items: Vec<ChiSquareBatchItem> = pairs
        .iter()
        .map(|(var1, var2)| {
            let result = chi_square_test(data, var1, var2, Some(config));
            if let Err(e) = &result {
                warn!(var1 = %var1, var2 = %var2, error = %e, "chi-square pair failed");
            }
            ChiSquareBatchItem {
                var1: var1.clone(),
                var2: var2.clone(),
                result,
                correction: None,
            }
        })
        .collect();

    if apply_correction {
        if let Err(e) = correct_items(&mut items, config.alpha()) {
            warn!(error = %e, "multiple-testing correction skipped");
        }
    }

    debug!(
        succeeded = items.iter().filter(|item| item.is_ok()).count(),
        total = items.len(),
        "chi-square batch done"
    );
    items
}

/// Run [`run_tiered_chi_square`] over the pairs configured under `tier`
pub fn run_tier_chi_square(
    data: &Dataset,
    config: &dyn SurveyConfig,
    tier: &str,
    apply_correction: bool,
) -> Vec<ChiSquareBatchItem> {
    let pairs = config
        .crosstab_tiers()
        .get(tier)
        .map(Vec::as_slice)
        .unwrap_or_default();
    run_tiered_chi_square(data, pairs, config, apply_correction)
}

/// Warnings for every failed item of a batch
pub fn batch_warnings(items: &[ChiSquareBatchItem]) -> Vec<DataQualityWarning> {
    items.iter().filter_map(ChiSquareBatchItem::warning).collect()
}

fn correct_items(items: &mut [ChiSquareBatchItem], alpha: f64) -> Result<()> {
    let valid: Vec<(usize, f64)> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match &item.result {
            Ok(r) if r.p_value.is_finite() => Some((i, r.p_value)),
            _ => None,
        })
        .collect();
    if valid.is_empty() {
        return Ok(());
    }

    let p_values: Vec<f64> = valid.iter().map(|&(_, p)| p).collect();
    let corrected = apply_fdr_correction(&p_values, CorrectionMethod::FdrBh, alpha)?;
    for (&(i, _), &p) in valid.iter().zip(&corrected.p_corrected) {
        items[i].correction = Some(Correction {
            p_value_corrected: p,
            significant: p < alpha,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::{Error, ProjectConfig};

    fn data() -> Dataset {
        Dataset::builder()
            .text("a", ["x", "x", "y", "y", "x", "y", "x", "y"])
            .text("b", ["p", "p", "q", "q", "p", "q", "p", "q"])
            .text("c", ["k", "l", "k", "l", "k", "l", "l", "k"])
            .text("d", ["z", "z", "z", "z", "z", "z", "z", "z"])
            .build()
            .unwrap()
    }

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn test_failures_are_kept_in_order() {
        let config = ProjectConfig::new("d.csv", "out");
        let items = run_tiered_chi_square(
            &data(),
            &pairs(&[("a", "b"), ("a", "missing"), ("a", "d"), ("a", "c")]),
            &config,
            false,
        );
        assert_eq!(items.len(), 4);
        assert!(items[0].is_ok());
        assert!(matches!(items[1].result, Err(Error::ColumnNotFound { .. })));
        assert!(matches!(items[2].result, Err(Error::InsufficientData(_))));
        assert!(items[3].is_ok());
        assert!(items.iter().all(|item| item.correction.is_none()));
        assert_eq!(batch_warnings(&items).len(), 2);
    }

    #[test]
    fn test_correction_only_on_successes() {
        let config = ProjectConfig::new("d.csv", "out");
        let items = run_tiered_chi_square(
            &data(),
            &pairs(&[("a", "b"), ("a", "missing"), ("a", "c")]),
            &config,
            true,
        );
        assert!(items[0].correction.is_some());
        assert!(items[1].correction.is_none());
        assert!(items[2].correction.is_some());

        let raw = items[0].result.as_ref().unwrap().p_value;
        let corrected = items[0].correction.unwrap().p_value_corrected;
        assert!(corrected >= raw);
    }

    #[test]
    fn test_tier_lookup() {
        let config = ProjectConfig::new("d.csv", "out")
            .with_tier_pair("core", "a", "b")
            .with_tier_pair("core", "a", "c");
        assert_eq!(run_tier_chi_square(&data(), &config, "core", true).len(), 2);
        assert!(run_tier_chi_square(&data(), &config, "other", true).is_empty());
    }

    #[test]
    fn test_warning_key() {
        let config = ProjectConfig::new("d.csv", "out");
        let items = run_tiered_chi_square(&data(), &pairs(&[("a", "nope")]), &config, true);
        match items[0].warning() {
            Some(DataQualityWarning::PairFailed { key, reason }) => {
                assert_eq!(key, "a_x_nope");
                assert!(reason.contains("nope"));
            }
            other => panic!("unexpected warning: {other:?}"),
        }
    }
}
