//! Project configuration
//!
//! Every survey project supplies a [`SurveyConfig`]: the mapping from short
//! question identifiers to the (usually long) column headers of the raw data,
//! optional category orderings, the significance level and the tiered
//! variable pairs to cross-tabulate. [`ProjectConfig`] is a ready-made
//! implementation that can be built in code or loaded from JSON.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Question id → column name
pub type QuestionMap = BTreeMap<String, String>;
/// Question id (or column name) → ordered category labels
pub type CategoryOrders = BTreeMap<String, Vec<String>>;
/// Tier label → ordered (row variable, column variable) pairs
pub type TierMap = BTreeMap<String, Vec<(String, String)>>;

static NO_ORDERS: CategoryOrders = BTreeMap::new();
static NO_TIERS: TierMap = BTreeMap::new();

/// Default significance level
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Configuration provider consumed by the analysis engines
pub trait SurveyConfig {
    /// Question id → column name mapping
    fn questions(&self) -> &QuestionMap;

    /// Location of the raw response file
    fn raw_data_path(&self) -> &Path;

    /// Directory that receives exported results
    fn output_dir(&self) -> &Path;

    /// Ordered category labels, keyed by question id or column name
    fn category_orders(&self) -> &CategoryOrders {
        &NO_ORDERS
    }

    /// Words excluded from free-text analysis
    fn stopwords(&self) -> &[String] {
        &[]
    }

    /// Significance level used by the tests
    fn alpha(&self) -> f64 {
        DEFAULT_ALPHA
    }

    /// Variable pairs to cross-tabulate, grouped by priority tier
    fn crosstab_tiers(&self) -> &TierMap {
        &NO_TIERS
    }

    /// Resolve a question id to its column name.
    ///
    /// Unmapped identifiers are returned unchanged, so either a short id or a
    /// literal column name may be passed.
    fn column_name<'a>(&'a self, question_id: &'a str) -> &'a str {
        self.questions()
            .get(question_id)
            .map(String::as_str)
            .unwrap_or(question_id)
    }

    /// Reverse lookup: the question id mapped to `column`, if any
    fn question_id(&self, column: &str) -> Option<&str> {
        self.questions()
            .iter()
            .find(|(_, c)| c.as_str() == column)
            .map(|(id, _)| id.as_str())
    }

    /// Category order for a variable, looked up by id first, then by its
    /// resolved column name.
    fn category_order(&self, variable: &str) -> Option<&[String]> {
        let orders = self.category_orders();
        orders
            .get(variable)
            .or_else(|| orders.get(self.column_name(variable)))
            .map(Vec::as_slice)
    }

    /// Check the configuration, returning one message per problem found
    fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !self.raw_data_path().exists() {
            problems.push(format!(
                "data file not found: {}",
                self.raw_data_path().display()
            ));
        }

        if self.questions().is_empty() {
            problems.push("questions is empty; define at least one question".to_string());
        }

        let alpha = self.alpha();
        if !(alpha > 0.0 && alpha < 1.0) {
            problems.push(format!("alpha must be in (0, 1): {alpha}"));
        }

        problems
    }

    /// Create the output directory if needed and return it
    fn ensure_output_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(self.output_dir())?;
        Ok(self.output_dir())
    }
}

/// Concrete project configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub questions: QuestionMap,
    pub raw_data_path: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub category_orders: CategoryOrders,
    #[serde(default)]
    pub stopwords: Vec<String>,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default)]
    pub crosstab_tiers: TierMap,
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

impl ProjectConfig {
    /// Create a configuration with the required fields; optional fields
    /// take their defaults.
    pub fn new(raw_data_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            questions: QuestionMap::new(),
            raw_data_path: raw_data_path.into(),
            output_dir: output_dir.into(),
            category_orders: CategoryOrders::new(),
            stopwords: Vec::new(),
            alpha: DEFAULT_ALPHA,
            crosstab_tiers: TierMap::new(),
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        if !(config.alpha > 0.0 && config.alpha < 1.0) {
            return Err(Error::InvalidArgument(format!(
                "alpha must be in (0, 1): {}",
                config.alpha
            )));
        }
        Ok(config)
    }

    pub fn with_question(mut self, id: impl Into<String>, column: impl Into<String>) -> Self {
        self.questions.insert(id.into(), column.into());
        self
    }

    pub fn with_category_order<S: Into<String>>(
        mut self,
        variable: impl Into<String>,
        order: impl IntoIterator<Item = S>,
    ) -> Self {
        self.category_orders
            .insert(variable.into(), order.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_stopwords<S: Into<String>>(mut self, words: impl IntoIterator<Item = S>) -> Self {
        self.stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Append a pair to a tier, creating the tier if needed
    pub fn with_tier_pair(
        mut self,
        tier: impl Into<String>,
        row_var: impl Into<String>,
        col_var: impl Into<String>,
    ) -> Self {
        self.crosstab_tiers
            .entry(tier.into())
            .or_default()
            .push((row_var.into(), col_var.into()));
        self
    }
}

impl SurveyConfig for ProjectConfig {
    fn questions(&self) -> &QuestionMap {
        &self.questions
    }

    fn raw_data_path(&self) -> &Path {
        &self.raw_data_path
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn category_orders(&self) -> &CategoryOrders {
        &self.category_orders
    }

    fn stopwords(&self) -> &[String] {
        &self.stopwords
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn crosstab_tiers(&self) -> &TierMap {
        &self.crosstab_tiers
    }
}

/// Resolve a variable through an optional configuration
pub fn resolve<'a>(config: Option<&'a dyn SurveyConfig>, variable: &'a str) -> &'a str {
    match config {
        Some(config) => config.column_name(variable),
        None => variable,
    }
}
