//! Batch cross-tabulation over a configured tier

use crate::builder::build_crosstab;
use crate::table::CountTable;
use survey_core::{DataQualityWarning, Dataset, SurveyConfig};
use tracing::{debug, instrument};

/// Tables of one tier, keyed `"{row}_x_{col}"` in declaration order, and
/// one warning per pair that could not be built
#[derive(Debug, Clone, Default)]
pub struct TierCrosstabs {
    pub tables: Vec<(String, CountTable)>,
    pub warnings: Vec<DataQualityWarning>,
}

impl TierCrosstabs {
    /// Table by key
    pub fn get(&self, key: &str) -> Option<&CountTable> {
        self.tables
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, table)| table)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Key under which a pair's table is stored
pub fn pair_key(row_var: &str, col_var: &str) -> String {
    format!("{row_var}_x_{col_var}")
}

/// Build a crosstab with margins for every pair declared under `tier`.
///
/// A pair that fails is recorded as [`DataQualityWarning::PairFailed`] and
/// skipped; the rest of the tier is still built. An unknown tier yields an
/// empty result.
#[instrument(skip(data, config))]
pub fn run_tiered_crosstabs(
    data: &Dataset,
    config: &dyn SurveyConfig,
    tier: &str,
) -> TierCrosstabs {
    let mut result = TierCrosstabs::default();

    let Some(pairs) = config.crosstab_tiers().get(tier) else {
        debug!(tier, "tier not configured");
        return result;
    };

    for (row_var, col_var) in pairs {
        let key = pair_key(row_var, col_var);
        match build_crosstab(data, row_var, col_var, Some(config), true) {
            Ok(table) => result.tables.push((key, table)),
            Err(e) => result.warnings.push(
                DataQualityWarning::PairFailed {
                    key,
                    reason: e.to_string(),
                }
                .emit(),
            ),
        }
    }

    debug!(
        built = result.tables.len(),
        failed = result.warnings.len(),
        "tier crosstabs done"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::ProjectConfig;

    #[test]
    fn test_unknown_tier_is_empty() {
        let data = Dataset::builder().text("a", ["x"]).build().unwrap();
        let config = ProjectConfig::new("d.csv", "out");
        let result = run_tiered_crosstabs(&data, &config, "tier9");
        assert!(result.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_pair_key() {
        assert_eq!(pair_key("age", "gender"), "age_x_gender");
    }
}
