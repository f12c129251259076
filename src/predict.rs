//! Single-record price prediction.

use tracing::debug;

use crate::error::PipelineError;
use crate::matrix::FeatureMatrix;
use crate::model::FittedRegressor;
use crate::pipeline::FittedFeaturePipeline;
use crate::record::FlatListing;

/// A fitted feature pipeline paired with a fitted model, able to price one
/// raw listing at a time.
///
/// Construction enforces column-count and column-identity equality between
/// the pipeline's canonical columns and the model's training columns, and
/// prediction re-checks the assembled row against both. A silent
/// column-order mismatch would produce a plausible-looking but wrong
/// number, so every discrepancy fails fast with
/// [`PipelineError::SchemaMismatch`] instead.
#[derive(Debug, Clone)]
pub struct PricePredictor<M: FittedRegressor> {
    pipeline: FittedFeaturePipeline,
    model: M,
}

impl<M: FittedRegressor> PricePredictor<M> {
    /// Pair a fitted pipeline with a fitted model.
    ///
    /// # Errors
    /// [`PipelineError::SchemaMismatch`] unless the model was trained on
    /// exactly the pipeline's canonical columns, in order.
    pub fn new(pipeline: FittedFeaturePipeline, model: M) -> Result<Self, PipelineError> {
        if pipeline.columns() != model.feature_columns() {
            return Err(PipelineError::SchemaMismatch {
                reason: "model was not trained on this pipeline's columns".to_string(),
                expected: pipeline.columns().to_vec(),
                actual: model.feature_columns().to_vec(),
            });
        }
        Ok(Self { pipeline, model })
    }

    /// Predict the resale price of one flat not in the training corpus.
    ///
    /// # Errors
    /// Every pipeline error propagates verbatim: `Parse` and `MissingValue`
    /// from the raw listing, `UnknownCategory` for a town/flat_type/
    /// flat_model/storey_range value unseen at fit time, `SchemaMismatch`
    /// for any column misalignment.
    pub fn predict(&self, listing: &FlatListing) -> Result<f64, PipelineError> {
        let row = self.pipeline.transform_listing(listing)?;
        let features =
            FeatureMatrix::from_rows(self.pipeline.columns().to_vec(), vec![row.to_vec()])?;
        let predictions = self.model.predict(&features)?;
        let price = predictions[0];
        debug!(price, "predicted single listing");
        Ok(price)
    }

    pub fn pipeline(&self) -> &FittedFeaturePipeline {
        &self.pipeline
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}
