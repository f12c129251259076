//! Error metrics on a held-out split.

use std::fmt;

use ndarray::ArrayView1;
use tracing::info;

use crate::error::PipelineError;
use crate::matrix::TrainingSet;
use crate::model::FittedRegressor;

/// Goodness-of-fit summary for a model on held-out data.
///
/// `mse` and `r2` are the primary pair; `rmse` and `mae` are carried as the
/// customary companions.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub r2: f64,
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mse={:.3} rmse={:.3} mae={:.3} r2={:.4}",
            self.mse, self.rmse, self.mae, self.r2
        )
    }
}

/// Mean squared error between predictions and observed labels.
///
/// # Errors
/// [`PipelineError::EmptyData`] on empty inputs,
/// [`PipelineError::SchemaMismatch`] on length mismatch.
pub fn mean_squared_error(
    predictions: ArrayView1<'_, f64>,
    labels: ArrayView1<'_, f64>,
) -> Result<f64, PipelineError> {
    check_lengths(predictions, labels)?;
    let sum: f64 = predictions
        .iter()
        .zip(labels.iter())
        .map(|(p, l)| (p - l) * (p - l))
        .sum();
    Ok(sum / predictions.len() as f64)
}

/// Mean absolute error between predictions and observed labels.
///
/// # Errors
/// Same conditions as [`mean_squared_error`].
pub fn mean_absolute_error(
    predictions: ArrayView1<'_, f64>,
    labels: ArrayView1<'_, f64>,
) -> Result<f64, PipelineError> {
    check_lengths(predictions, labels)?;
    let sum: f64 = predictions
        .iter()
        .zip(labels.iter())
        .map(|(p, l)| (p - l).abs())
        .sum();
    Ok(sum / predictions.len() as f64)
}

fn check_lengths(
    predictions: ArrayView1<'_, f64>,
    labels: ArrayView1<'_, f64>,
) -> Result<(), PipelineError> {
    if predictions.is_empty() {
        return Err(PipelineError::EmptyData(
            "cannot compute metrics on empty predictions".to_string(),
        ));
    }
    if predictions.len() != labels.len() {
        return Err(PipelineError::SchemaMismatch {
            reason: format!(
                "{} predictions against {} labels",
                predictions.len(),
                labels.len()
            ),
            expected: vec!["labels".to_string()],
            actual: vec!["predictions".to_string()],
        });
    }
    Ok(())
}

/// Evaluate a fitted model on a held-out set.
///
/// # Errors
/// Propagates prediction and scoring errors unchanged.
pub fn evaluate<M: FittedRegressor>(
    model: &M,
    holdout: &TrainingSet,
) -> Result<EvaluationReport, PipelineError> {
    let predictions = model.predict(holdout.features())?;
    let mse = mean_squared_error(predictions.view(), holdout.labels())?;
    let mae = mean_absolute_error(predictions.view(), holdout.labels())?;
    let r2 = model.score(holdout)?;

    let report = EvaluationReport {
        mse,
        rmse: mse.sqrt(),
        mae,
        r2,
    };
    info!(%report, rows = holdout.n_rows(), "evaluated model on holdout");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array1;

    #[test]
    fn test_mse_known_value() {
        // errors 1 and 2 -> (1 + 4) / 2
        let predictions = Array1::from_vec(vec![1.0, 2.0]);
        let labels = Array1::from_vec(vec![0.0, 0.0]);
        let mse = mean_squared_error(predictions.view(), labels.view()).unwrap();
        assert_abs_diff_eq!(mse, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_mse_perfect_predictions() {
        let values = Array1::from_vec(vec![3.0, 4.0, 5.0]);
        let mse = mean_squared_error(values.view(), values.view()).unwrap();
        assert_eq!(mse, 0.0);
    }

    #[test]
    fn test_mae_known_value() {
        let predictions = Array1::from_vec(vec![1.0, -2.0]);
        let labels = Array1::from_vec(vec![0.0, 0.0]);
        let mae = mean_absolute_error(predictions.view(), labels.view()).unwrap();
        assert_abs_diff_eq!(mae, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_metrics_reject_length_mismatch() {
        let predictions = Array1::from_vec(vec![1.0, 2.0]);
        let labels = Array1::from_vec(vec![1.0]);
        assert!(matches!(
            mean_squared_error(predictions.view(), labels.view()),
            Err(PipelineError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_metrics_reject_empty() {
        let empty = Array1::<f64>::from_vec(vec![]);
        assert!(matches!(
            mean_squared_error(empty.view(), empty.view()),
            Err(PipelineError::EmptyData(_))
        ));
    }

    #[test]
    fn test_report_display() {
        let report = EvaluationReport {
            mse: 4.0,
            rmse: 2.0,
            mae: 1.5,
            r2: 0.93,
        };
        let text = report.to_string();
        assert!(text.contains("mse=4.000"));
        assert!(text.contains("r2=0.9300"));
    }
}
