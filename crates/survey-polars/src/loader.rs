//! Reading survey CSV files through Polars

use crate::traits::SurveyFrameExt;
use crate::{Error, Result};
use polars::prelude::*;
use std::path::Path;
use survey_core::{
    add_derived_columns, apply_category_orders, handle_missing_values, DataQualityWarning,
    Dataset, DerivedColumns, MissingStrategy, SurveyConfig,
};
use tracing::{debug, info};

/// Read a CSV file with a header row into a DataFrame
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(Error::DataFileNotFound(path.to_path_buf()));
    }
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    info!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "loaded survey data"
    );
    Ok(frame)
}

/// Load the configured raw data file as an unprepared dataset
pub fn load_raw_data(config: &dyn SurveyConfig) -> Result<Dataset> {
    read_csv(config.raw_data_path())?.to_dataset()
}

/// A dataset ready for analysis and the warnings raised while preparing it
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub data: Dataset,
    pub warnings: Vec<DataQualityWarning>,
}

/// Load the configured data file, apply `strategy` to missing cells, then
/// convert every configured category order into an ordered column.
pub fn load_and_prepare(
    config: &dyn SurveyConfig,
    strategy: &MissingStrategy,
) -> Result<PreparedData> {
    let raw = load_raw_data(config)?;
    prepare(&raw, config, strategy)
}

/// [`load_and_prepare`], then add the project's derived columns
pub fn load_and_prepare_with(
    config: &dyn SurveyConfig,
    strategy: &MissingStrategy,
    derivations: &DerivedColumns,
) -> Result<PreparedData> {
    let raw = load_raw_data(config)?;
    prepare_with(&raw, config, strategy, derivations)
}

/// The preparation half of [`load_and_prepare`], for data loaded elsewhere
pub fn prepare(
    raw: &Dataset,
    config: &dyn SurveyConfig,
    strategy: &MissingStrategy,
) -> Result<PreparedData> {
    prepare_with(raw, config, strategy, &DerivedColumns::default())
}

/// [`prepare`] followed by the derived columns. Derivations run last, so
/// they see cleaned values and ordered categories; a failed derivation
/// becomes a warning.
pub fn prepare_with(
    raw: &Dataset,
    config: &dyn SurveyConfig,
    strategy: &MissingStrategy,
    derivations: &DerivedColumns,
) -> Result<PreparedData> {
    let cleaned = handle_missing_values(raw, strategy)?;
    let (ordered, mut warnings) = apply_category_orders(&cleaned, config)?;
    let (data, derived_warnings) = add_derived_columns(&ordered, config, derivations);
    warnings.extend(derived_warnings);
    debug!(
        rows = data.n_rows(),
        derived = derivations.len(),
        warnings = warnings.len(),
        ?strategy,
        "prepared survey data"
    );
    Ok(PreparedData { data, warnings })
}
