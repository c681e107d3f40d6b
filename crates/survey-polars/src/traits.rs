//! Extension trait turning Polars DataFrames into survey datasets

use crate::{Error, Result};
use polars::prelude::*;
use survey_core::{Column as SurveyColumn, Dataset, SurveyConfig};

/// Survey operations on Polars DataFrames
pub trait SurveyFrameExt {
    /// Convert to a [`Dataset`].
    ///
    /// Column names are trimmed. String columns become text columns, integer
    /// and float columns become numeric columns, and any other dtype is cast
    /// to its string form.
    fn to_dataset(&self) -> Result<Dataset>;

    /// Keep only the columns named in the configured question map, in
    /// question-id order. Configured columns absent from the frame are
    /// skipped.
    fn select_questions(&self, config: &dyn SurveyConfig) -> Result<DataFrame>;
}

impl SurveyFrameExt for DataFrame {
    fn to_dataset(&self) -> Result<Dataset> {
        let columns = self
            .get_columns()
            .iter()
            .map(convert_column)
            .collect::<Result<Vec<_>>>()?;
        Ok(Dataset::new(columns)?)
    }

    fn select_questions(&self, config: &dyn SurveyConfig) -> Result<DataFrame> {
        let present: Vec<&str> = config
            .questions()
            .values()
            .map(String::as_str)
            .filter(|name| self.column(name).is_ok())
            .collect();
        Ok(self.select(present)?)
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn convert_column(column: &Column) -> Result<SurveyColumn> {
    let name = column.name().trim();
    if name.is_empty() {
        return Err(Error::InvalidColumn(format!(
            "column '{}' has an empty name",
            column.name()
        )));
    }

    let series = column.as_materialized_series();
    let converted = match series.dtype() {
        DataType::String => SurveyColumn::text(name, series.str()?.into_iter()),
        dtype if is_numeric(dtype) => {
            let floats = series.cast(&DataType::Float64)?;
            SurveyColumn::numeric(name, floats.f64()?.into_iter())
        }
        _ => {
            let strings = series.cast(&DataType::String)?;
            SurveyColumn::text(name, strings.str()?.into_iter())
        }
    };
    Ok(converted)
}
