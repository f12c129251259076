//! One-hot encoding for unordered categorical features.

use std::collections::BTreeSet;

use tracing::debug;

use crate::encoding::CategoricalRow;
use crate::error::PipelineError;

/// The unordered categorical columns of a resale record.
pub(crate) const DEFAULT_COLUMNS: [&str; 3] = ["town", "flat_type", "flat_model"];

/// One-hot encoder over a set of named categorical columns.
///
/// `fit` records, per column, the distinct values observed in the training
/// corpus, sorted lexicographically so repeated fits on the same data (in
/// any row order) produce identical vocabularies and identical output
/// column order. Each (column, value) pair becomes one indicator column
/// named `<column>_<value>`.
///
/// # Example
/// ```
/// use resale_pricer::encoding::OneHotEncoder;
/// # use resale_pricer::parse::EngineeredRecord;
/// # fn rec(town: &str) -> EngineeredRecord {
/// #     EngineeredRecord {
/// #         floor_area_sqm: 90.0, sale_year: 2021, sale_month_num: 3,
/// #         years_remaining: 60, months_remaining: 0,
/// #         town: town.to_string(), flat_type: "4 ROOM".to_string(),
/// #         flat_model: "Improved".to_string(), storey_range: "01 TO 03".to_string(),
/// #     }
/// # }
/// let corpus = vec![rec("BEDOK"), rec("ANG MO KIO")];
/// let fitted = OneHotEncoder::new().fit(&corpus).unwrap();
/// assert!(fitted
///     .feature_names()
///     .contains(&"town_ANG MO KIO".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    columns: Vec<String>,
}

impl OneHotEncoder {
    /// Encoder over the resale record's categorical columns
    /// (`town`, `flat_type`, `flat_model`).
    pub fn new() -> Self {
        Self::with_columns(DEFAULT_COLUMNS.iter().map(|c| c.to_string()))
    }

    /// Encoder over an explicit list of columns.
    pub fn with_columns(columns: impl IntoIterator<Item = String>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    /// Learn the per-column vocabularies from the training corpus.
    ///
    /// # Errors
    /// - [`PipelineError::EmptyData`] on an empty corpus.
    /// - [`PipelineError::MissingValue`] if a configured column is not a
    ///   categorical column of the row type.
    pub fn fit<R: CategoricalRow>(&self, rows: &[R]) -> Result<FittedOneHotEncoder, PipelineError> {
        if rows.is_empty() {
            return Err(PipelineError::EmptyData(
                "cannot fit one-hot encoder on an empty corpus".to_string(),
            ));
        }

        let mut vocabularies: Vec<Vec<String>> = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            // BTreeSet gives the deterministic lexicographic ordering.
            let mut values: BTreeSet<String> = BTreeSet::new();
            for row in rows {
                let value = row
                    .category(column)
                    .ok_or_else(|| PipelineError::MissingValue {
                        fields: vec![column.clone()],
                    })?;
                values.insert(value.to_string());
            }
            vocabularies.push(values.into_iter().collect());
        }

        let feature_names: Vec<String> = self
            .columns
            .iter()
            .zip(&vocabularies)
            .flat_map(|(column, vocabulary)| {
                vocabulary
                    .iter()
                    .map(move |value| format!("{column}_{value}"))
            })
            .collect();

        debug!(
            columns = self.columns.len(),
            indicators = feature_names.len(),
            "fitted one-hot encoder"
        );

        Ok(FittedOneHotEncoder {
            columns: self.columns.clone(),
            vocabularies,
            feature_names,
        })
    }
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fitted one-hot encoder; immutable after [`OneHotEncoder::fit`].
#[derive(Debug, Clone)]
pub struct FittedOneHotEncoder {
    columns: Vec<String>,
    /// Sorted vocabulary per column, parallel to `columns`.
    vocabularies: Vec<Vec<String>>,
    /// Indicator names `<column>_<value>`, in output order.
    feature_names: Vec<String>,
}

impl FittedOneHotEncoder {
    /// The source columns, in configured order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The sorted vocabulary learned for `column`.
    pub fn vocabulary(&self, column: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.vocabularies[i].as_slice())
    }

    /// Indicator column names, in output order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Total number of indicator columns.
    pub fn n_features_out(&self) -> usize {
        self.feature_names.len()
    }

    /// Encode one row into its indicator values, aligned with
    /// [`feature_names`](Self::feature_names): exactly one 1.0 among each
    /// source column's indicators, 0.0 elsewhere.
    ///
    /// # Errors
    /// - [`PipelineError::UnknownCategory`] if the row's value for a column
    ///   was never seen at fit time (no silent zero-vector fallback).
    /// - [`PipelineError::MissingValue`] if the row lacks a configured
    ///   column.
    pub fn encode<R: CategoricalRow>(&self, row: &R) -> Result<Vec<f64>, PipelineError> {
        let mut indicators = vec![0.0; self.feature_names.len()];
        let mut offset = 0;

        for (column, vocabulary) in self.columns.iter().zip(&self.vocabularies) {
            let value = row
                .category(column)
                .ok_or_else(|| PipelineError::MissingValue {
                    fields: vec![column.clone()],
                })?;
            let position = vocabulary
                .binary_search_by(|known| known.as_str().cmp(value))
                .map_err(|_| PipelineError::UnknownCategory {
                    column: column.clone(),
                    value: value.to_string(),
                    expected: vocabulary.clone(),
                })?;
            indicators[offset + position] = 1.0;
            offset += vocabulary.len();
        }

        Ok(indicators)
    }
}
