//! Feature pipeline: from raw transaction records to a numeric training
//! matrix, and from one raw listing to a prediction-ready feature row.
//!
//! The pipeline owns all fitted encoding state. Fitting happens exactly
//! once, on the training corpus; the resulting [`FittedFeaturePipeline`] is
//! immutable and is reused for every later transform, including the single
//! out-of-sample prediction. Each stage is a pure transform producing a new
//! structure (listing → engineered record → feature row), so the
//! column-order contract stays explicit and checkable.

use std::collections::HashMap;

use ndarray::Array1;
use tracing::debug;

use crate::encoding::{FittedOneHotEncoder, FittedOrdinalEncoder, OneHotEncoder, OrdinalEncoder};
use crate::error::PipelineError;
use crate::matrix::{FeatureMatrix, TrainingSet};
use crate::parse::EngineeredRecord;
use crate::record::{FlatListing, TransactionRecord};

/// The derived numeric columns, in canonical order. One-hot indicator
/// columns follow these in the final matrix.
pub const DERIVED_COLUMNS: [&str; 6] = [
    "floor_area_sqm",
    "storey",
    "sale_year",
    "sale_month_num",
    "years_remaining",
    "months_remaining",
];

/// Unfitted feature pipeline.
///
/// Carries only configuration (the encoders to fit); all learned state
/// lives in the [`FittedFeaturePipeline`] that [`fit`](Self::fit) returns.
#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    one_hot: OneHotEncoder,
}

impl FeaturePipeline {
    pub fn new() -> Self {
        Self {
            one_hot: OneHotEncoder::new(),
        }
    }

    /// Fit the encoders on the training corpus and assemble the training
    /// matrix and label vector.
    ///
    /// Every record is validated and parsed first; the ordinal encoder is
    /// frozen over its fixed vocabulary and the one-hot encoder is fit on
    /// this corpus; then every record is transformed through both. The
    /// resulting column-name sequence (label excluded) becomes the
    /// canonical order for all later transforms.
    ///
    /// # Errors
    /// Any [`PipelineError`] raised by validation, parsing, or encoding.
    /// The fit either fully succeeds or fails outright; there is no
    /// row-level skip-and-continue.
    pub fn fit(
        &self,
        records: &[TransactionRecord],
    ) -> Result<(FittedFeaturePipeline, TrainingSet), PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::EmptyData(
                "cannot fit feature pipeline on an empty corpus".to_string(),
            ));
        }

        // Validate and parse everything before fitting any encoder.
        let mut engineered: Vec<EngineeredRecord> = Vec::with_capacity(records.len());
        let mut labels: Vec<f64> = Vec::with_capacity(records.len());
        for record in records {
            record.validate()?;
            engineered.push(EngineeredRecord::from_listing(&record.listing())?);
            labels.push(record.resale_price);
        }

        let storey = OrdinalEncoder::storey_range().fit()?;
        let categories = self.one_hot.fit(&engineered)?;

        let mut columns: Vec<String> = DERIVED_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(categories.feature_names().iter().cloned());

        let fitted = FittedFeaturePipeline {
            storey,
            categories,
            columns,
        };

        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(engineered.len());
        for record in &engineered {
            rows.push(fitted.feature_row(record)?);
        }

        let features = FeatureMatrix::from_rows(fitted.columns.clone(), rows)?;
        debug!(
            records = records.len(),
            columns = features.n_columns(),
            "fitted feature pipeline"
        );

        let training = TrainingSet::new(features, Array1::from_vec(labels))?;
        Ok((fitted, training))
    }
}

/// Fitted feature pipeline: the ordinal and one-hot encoding state plus the
/// canonical column order. Immutable after [`FeaturePipeline::fit`].
#[derive(Debug, Clone)]
pub struct FittedFeaturePipeline {
    storey: FittedOrdinalEncoder,
    categories: FittedOneHotEncoder,
    columns: Vec<String>,
}

impl FittedFeaturePipeline {
    /// The canonical feature column order established at fit time.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The fitted one-hot encoding state.
    pub fn categories(&self) -> &FittedOneHotEncoder {
        &self.categories
    }

    /// The fitted storey-band encoding state.
    pub fn storey(&self) -> &FittedOrdinalEncoder {
        &self.storey
    }

    /// Transform one raw listing into a feature row aligned with
    /// [`columns`](Self::columns).
    ///
    /// The listing is parsed with the same rules as at fit time and pushed
    /// through the already-fitted encoders, then reindexed into exactly the
    /// canonical columns. A town/flat_type/flat_model/storey_range value
    /// never seen during fitting fails with
    /// [`PipelineError::UnknownCategory`]; a column-set discrepancy fails
    /// with [`PipelineError::SchemaMismatch`] rather than producing a
    /// silently misaligned row.
    pub fn transform_listing(&self, listing: &FlatListing) -> Result<Array1<f64>, PipelineError> {
        let engineered = EngineeredRecord::from_listing(listing)?;
        let named = self.named_values(&engineered)?;
        self.reindex(named)
    }

    /// Assemble one engineered record's values in canonical column order.
    ///
    /// Used during fit, where the assembled names are the canonical order
    /// by construction; `transform_listing` goes through the checked
    /// [`reindex`](Self::reindex) instead.
    fn feature_row(&self, record: &EngineeredRecord) -> Result<Vec<f64>, PipelineError> {
        let mut row: Vec<f64> = Vec::with_capacity(self.columns.len());
        row.extend(self.derived_values(record)?);
        row.extend(self.categories.encode(record)?);
        Ok(row)
    }

    fn derived_values(&self, record: &EngineeredRecord) -> Result<[f64; 6], PipelineError> {
        let storey = self.storey.encode(&record.storey_range)?;
        Ok([
            record.floor_area_sqm,
            f64::from(storey),
            f64::from(record.sale_year),
            f64::from(record.sale_month_num),
            f64::from(record.years_remaining),
            f64::from(record.months_remaining),
        ])
    }

    /// The record's values as (column, value) pairs, before reindexing.
    fn named_values(
        &self,
        record: &EngineeredRecord,
    ) -> Result<Vec<(String, f64)>, PipelineError> {
        let mut named: Vec<(String, f64)> = DERIVED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .zip(self.derived_values(record)?)
            .collect();
        named.extend(
            self.categories
                .feature_names()
                .iter()
                .cloned()
                .zip(self.categories.encode(record)?),
        );
        Ok(named)
    }

    /// Select and order `named` into exactly the canonical columns.
    ///
    /// # Errors
    /// [`PipelineError::SchemaMismatch`] if any canonical column is absent
    /// from `named`, or `named` carries a column the training matrix never
    /// had. The one-hot vocabulary from training fully determines the
    /// prediction-time schema; this is where that invariant is enforced.
    fn reindex(&self, named: Vec<(String, f64)>) -> Result<Array1<f64>, PipelineError> {
        let actual: Vec<String> = named.iter().map(|(name, _)| name.clone()).collect();
        let by_name: HashMap<&str, f64> =
            named.iter().map(|(name, value)| (name.as_str(), *value)).collect();

        for name in &actual {
            if !self.columns.contains(name) {
                return Err(PipelineError::SchemaMismatch {
                    reason: format!("unexpected column {name}"),
                    expected: self.columns.clone(),
                    actual,
                });
            }
        }

        let mut row: Vec<f64> = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            match by_name.get(column.as_str()) {
                Some(value) => row.push(*value),
                None => {
                    return Err(PipelineError::SchemaMismatch {
                        reason: format!("missing column {column}"),
                        expected: self.columns.clone(),
                        actual,
                    });
                }
            }
        }

        Ok(Array1::from_vec(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        town: &str,
        flat_type: &str,
        flat_model: &str,
        storey_range: &str,
        area: f64,
        price: f64,
    ) -> TransactionRecord {
        TransactionRecord {
            town: town.to_string(),
            flat_type: flat_type.to_string(),
            block: "100".to_string(),
            street_name: "MAIN ST".to_string(),
            storey_range: storey_range.to_string(),
            floor_area_sqm: area,
            flat_model: flat_model.to_string(),
            lease_commence_year: 1990,
            remaining_lease: "65 years 06 months".to_string(),
            sale_month: "2021-05".to_string(),
            resale_price: price,
        }
    }

    fn corpus() -> Vec<TransactionRecord> {
        vec![
            record("BEDOK", "4 ROOM", "Improved", "01 TO 03", 92.0, 420_000.0),
            record("ANG MO KIO", "3 ROOM", "New Generation", "07 TO 09", 68.0, 330_000.0),
            record("BEDOK", "3 ROOM", "Improved", "04 TO 06", 67.0, 345_000.0),
            record("ANG MO KIO", "4 ROOM", "New Generation", "01 TO 03", 93.0, 410_000.0),
        ]
    }

    #[test]
    fn test_fit_column_composition() {
        let (fitted, training) = FeaturePipeline::new().fit(&corpus()).unwrap();
        // 6 derived + 2 towns + 2 flat types + 2 flat models.
        assert_eq!(fitted.columns().len(), 12);
        assert_eq!(training.features().n_columns(), 12);
        assert_eq!(training.n_rows(), 4);
        assert_eq!(&fitted.columns()[0..6], &DERIVED_COLUMNS);
        assert!(fitted.columns().contains(&"town_BEDOK".to_string()));
        assert!(fitted
            .columns()
            .contains(&"flat_model_New Generation".to_string()));
    }

    #[test]
    fn test_fit_separates_labels() {
        let (_, training) = FeaturePipeline::new().fit(&corpus()).unwrap();
        assert_eq!(
            training.labels().to_vec(),
            vec![420_000.0, 330_000.0, 345_000.0, 410_000.0]
        );
        assert!(!training
            .features()
            .columns()
            .contains(&"resale_price".to_string()));
    }

    #[test]
    fn test_fit_encodes_derived_fields() {
        let (_, training) = FeaturePipeline::new().fit(&corpus()).unwrap();
        let row = training.features().row(1);
        // floor_area, storey rank of "07 TO 09", year, month, lease years, lease months
        assert_eq!(row[0], 68.0);
        assert_eq!(row[1], 2.0);
        assert_eq!(row[2], 2021.0);
        assert_eq!(row[3], 5.0);
        assert_eq!(row[4], 65.0);
        assert_eq!(row[5], 6.0);
    }

    #[test]
    fn test_transform_listing_matches_training_schema() {
        let (fitted, training) = FeaturePipeline::new().fit(&corpus()).unwrap();
        let listing = record("BEDOK", "4 ROOM", "Improved", "10 TO 12", 95.0, 0.0).listing();
        let row = fitted.transform_listing(&listing).unwrap();
        assert_eq!(row.len(), training.features().n_columns());
        assert_eq!(row[1], 3.0); // "10 TO 12" is the 4th band
    }

    #[test]
    fn test_transform_listing_is_idempotent() {
        let (fitted, _) = FeaturePipeline::new().fit(&corpus()).unwrap();
        let listing =
            record("ANG MO KIO", "3 ROOM", "New Generation", "01 TO 03", 70.0, 0.0).listing();
        let a = fitted.transform_listing(&listing).unwrap();
        let b = fitted.transform_listing(&listing).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_transform_unseen_category_fails() {
        let (fitted, _) = FeaturePipeline::new().fit(&corpus()).unwrap();
        let listing = record("BEDOK", "4 ROOM", "Maisonette", "01 TO 03", 120.0, 0.0).listing();
        assert!(matches!(
            fitted.transform_listing(&listing),
            Err(PipelineError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_transform_unseen_storey_band_fails() {
        let (fitted, _) = FeaturePipeline::new().fit(&corpus()).unwrap();
        let mut listing = record("BEDOK", "4 ROOM", "Improved", "01 TO 03", 92.0, 0.0).listing();
        listing.storey_range = "51 TO 53".to_string();
        assert!(matches!(
            fitted.transform_listing(&listing),
            Err(PipelineError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_fit_rejects_invalid_record() {
        let mut records = corpus();
        records[2].sale_month = "May 2021".to_string();
        assert!(matches!(
            FeaturePipeline::new().fit(&records),
            Err(PipelineError::Parse { .. })
        ));
    }

    #[test]
    fn test_fit_empty_corpus_fails() {
        assert!(matches!(
            FeaturePipeline::new().fit(&[]),
            Err(PipelineError::EmptyData(_))
        ));
    }

    #[test]
    fn test_fit_permuted_corpus_same_columns() {
        let mut reversed = corpus();
        reversed.reverse();
        let (a, _) = FeaturePipeline::new().fit(&corpus()).unwrap();
        let (b, _) = FeaturePipeline::new().fit(&reversed).unwrap();
        assert_eq!(a.columns(), b.columns());
    }

    #[test]
    fn test_reindex_rejects_missing_column() {
        let (fitted, _) = FeaturePipeline::new().fit(&corpus()).unwrap();
        let named: Vec<(String, f64)> = fitted
            .columns()
            .iter()
            .skip(1) // drop one expected column
            .map(|c| (c.clone(), 0.0))
            .collect();
        assert!(matches!(
            fitted.reindex(named),
            Err(PipelineError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_reindex_rejects_unexpected_column() {
        let (fitted, _) = FeaturePipeline::new().fit(&corpus()).unwrap();
        let mut named: Vec<(String, f64)> =
            fitted.columns().iter().map(|c| (c.clone(), 0.0)).collect();
        named.push(("town_YISHUN".to_string(), 1.0));
        assert!(matches!(
            fitted.reindex(named),
            Err(PipelineError::SchemaMismatch { .. })
        ));
    }
}
