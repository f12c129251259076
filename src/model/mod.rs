//! Regression models with a strict fit-once / predict-many lifecycle.
//!
//! The capability set is split across two traits so the states are distinct
//! types: [`Regressor`] is the unfitted, configurable side with a single
//! `fit`; [`FittedRegressor`] is the trained side with side-effect-free
//! `predict` and `score`. Alternative regression algorithms plug in behind
//! these traits without touching the feature pipeline.

pub mod linear;

pub use linear::{FittedLinearRegression, LinearRegression};

use ndarray::Array1;

use crate::error::PipelineError;
use crate::matrix::{FeatureMatrix, TrainingSet};

/// An unfitted regression model.
pub trait Regressor {
    /// The trained model type produced by [`fit`](Self::fit).
    type Fitted: FittedRegressor;

    /// Learn model parameters from the training set.
    ///
    /// One fit per model instance; there is no retraining or online-update
    /// support. The returned fitted model is immutable.
    ///
    /// # Errors
    /// [`PipelineError`] on empty data or a failed solve.
    fn fit(&self, data: &TrainingSet) -> Result<Self::Fitted, PipelineError>;
}

/// A trained regression model; read-only after fitting.
pub trait FittedRegressor {
    /// The feature columns the model was trained on, in training order.
    fn feature_columns(&self) -> &[String];

    /// Predict one label per row of `features`.
    ///
    /// # Errors
    /// [`PipelineError::SchemaMismatch`] if `features` does not carry
    /// exactly the training columns, in training order.
    fn predict(&self, features: &FeatureMatrix) -> Result<Array1<f64>, PipelineError>;

    /// Coefficient of determination (R²) on the given data.
    ///
    /// # Errors
    /// Propagates [`predict`](Self::predict) errors;
    /// [`PipelineError::Numerical`] when the labels have zero variance.
    fn score(&self, data: &TrainingSet) -> Result<f64, PipelineError> {
        let predictions = self.predict(data.features())?;
        let labels = data.labels();
        if labels.is_empty() {
            return Err(PipelineError::EmptyData(
                "cannot score on an empty set".to_string(),
            ));
        }

        let mean = labels.sum() / labels.len() as f64;
        let ss_res: f64 = labels
            .iter()
            .zip(predictions.iter())
            .map(|(l, p)| (l - p) * (l - p))
            .sum();
        let ss_tot: f64 = labels.iter().map(|l| (l - mean) * (l - mean)).sum();

        if ss_tot == 0.0 {
            return Err(PipelineError::Numerical(
                "labels have zero variance; R\u{b2} is undefined".to_string(),
            ));
        }

        Ok(1.0 - ss_res / ss_tot)
    }
}
