//! Ordinary least-squares linear regression with an intercept term.

use ndarray::{s, Array1, Array2};
use tracing::debug;

use crate::error::PipelineError;
use crate::matrix::{FeatureMatrix, TrainingSet};
use crate::model::{FittedRegressor, Regressor};

/// Ordinary least squares, solved in closed form via the normal equations.
///
/// A small Tikhonov damping term, scaled by the mean diagonal of the Gram
/// matrix, is added before factorization: full one-hot indicator groups plus
/// the intercept column are exactly collinear, so the undamped Gram matrix
/// is singular for this pipeline's feature layout. The default of `1e-8`
/// perturbs well-conditioned solutions far below observable precision.
///
/// # Example
/// ```
/// use ndarray::Array1;
/// use resale_pricer::matrix::{FeatureMatrix, TrainingSet};
/// use resale_pricer::model::{FittedRegressor, LinearRegression, Regressor};
///
/// // y = 2a + 1
/// let features = FeatureMatrix::from_rows(
///     vec!["a".to_string()],
///     vec![vec![0.0], vec![1.0], vec![2.0]],
/// )
/// .unwrap();
/// let data = TrainingSet::new(features, Array1::from_vec(vec![1.0, 3.0, 5.0])).unwrap();
///
/// let fitted = LinearRegression::new().fit(&data).unwrap();
/// let predicted = fitted.predict(data.features()).unwrap();
/// assert!((predicted[2] - 5.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct LinearRegression {
    damping: f64,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self { damping: 1e-8 }
    }

    /// Override the relative damping added to the Gram diagonal.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl Regressor for LinearRegression {
    type Fitted = FittedLinearRegression;

    fn fit(&self, data: &TrainingSet) -> Result<FittedLinearRegression, PipelineError> {
        if self.damping < 0.0 {
            return Err(PipelineError::InvalidParameter(format!(
                "damping must be non-negative, got {}",
                self.damping
            )));
        }

        let x = data.features().values();
        let (n, p) = (x.nrows(), x.ncols());
        if n == 0 || p == 0 {
            return Err(PipelineError::EmptyData(
                "cannot fit linear regression on an empty training set".to_string(),
            ));
        }

        // Augment with the intercept column of ones.
        let mut design = Array2::<f64>::ones((n, p + 1));
        design.slice_mut(s![.., ..p]).assign(&x);

        let mut gram = design.t().dot(&design);
        let rhs = design.t().dot(&data.labels());

        let diag_mean = gram.diag().sum() / (p + 1) as f64;
        let damping = self.damping * diag_mean.max(1.0);
        for i in 0..=p {
            gram[[i, i]] += damping;
        }

        let solution = cholesky_solve(gram, rhs)?;
        let weights = solution.slice(s![..p]).to_owned();
        let intercept = solution[p];

        debug!(rows = n, features = p, intercept, "fitted linear regression");

        Ok(FittedLinearRegression {
            columns: data.features().columns().to_vec(),
            weights,
            intercept,
        })
    }
}

/// Trained linear model: learned weights, intercept, and the training
/// column names it will accept at prediction time.
#[derive(Debug, Clone)]
pub struct FittedLinearRegression {
    columns: Vec<String>,
    weights: Array1<f64>,
    intercept: f64,
}

impl FittedLinearRegression {
    /// The learned weight per feature column.
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// `(column, weight)` pairs sorted by descending weight magnitude.
    pub fn named_coefficients(&self) -> Vec<(String, f64)> {
        let mut coefficients: Vec<(String, f64)> = self
            .columns
            .iter()
            .cloned()
            .zip(self.weights.iter().copied())
            .collect();
        coefficients.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        coefficients
    }
}

impl FittedRegressor for FittedLinearRegression {
    fn feature_columns(&self) -> &[String] {
        &self.columns
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Array1<f64>, PipelineError> {
        if features.columns() != self.columns.as_slice() {
            return Err(PipelineError::SchemaMismatch {
                reason: "prediction features differ from training columns".to_string(),
                expected: self.columns.clone(),
                actual: features.columns().to_vec(),
            });
        }
        Ok(features.values().dot(&self.weights) + self.intercept)
    }
}

/// Solve `A x = b` for symmetric positive-definite `A` by Cholesky
/// factorization. `A` is consumed and overwritten with the lower factor.
fn cholesky_solve(mut a: Array2<f64>, b: Array1<f64>) -> Result<Array1<f64>, PipelineError> {
    let n = a.nrows();

    for j in 0..n {
        let mut pivot = a[[j, j]] - (0..j).map(|k| a[[j, k]] * a[[j, k]]).sum::<f64>();
        if pivot <= 0.0 {
            return Err(PipelineError::Numerical(
                "Gram matrix is not positive definite; increase the damping".to_string(),
            ));
        }
        pivot = pivot.sqrt();
        a[[j, j]] = pivot;
        for i in (j + 1)..n {
            let dot: f64 = (0..j).map(|k| a[[i, k]] * a[[j, k]]).sum();
            a[[i, j]] = (a[[i, j]] - dot) / pivot;
        }
    }

    // Forward substitution: L z = b.
    let mut z = b;
    for i in 0..n {
        let dot: f64 = (0..i).map(|k| a[[i, k]] * z[k]).sum();
        z[i] = (z[i] - dot) / a[[i, i]];
    }
    // Back substitution: Lᵀ x = z.
    for i in (0..n).rev() {
        let dot: f64 = ((i + 1)..n).map(|k| a[[k, i]] * z[k]).sum();
        z[i] = (z[i] - dot) / a[[i, i]];
    }

    Ok(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn training_set(columns: &[&str], rows: Vec<Vec<f64>>, labels: Vec<f64>) -> TrainingSet {
        let features =
            FeatureMatrix::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows)
                .unwrap();
        TrainingSet::new(features, Array1::from_vec(labels)).unwrap()
    }

    fn exact_corpus() -> TrainingSet {
        // y = 2a + 3b + 5
        training_set(
            &["a", "b"],
            vec![
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![2.0, 2.0],
                vec![3.0, 1.0],
            ],
            vec![7.0, 8.0, 15.0, 14.0],
        )
    }

    #[test]
    fn test_fit_recovers_known_coefficients() {
        let fitted = LinearRegression::new().fit(&exact_corpus()).unwrap();
        assert_abs_diff_eq!(fitted.weights()[0], 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(fitted.weights()[1], 3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(fitted.intercept(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_predict_on_training_data() {
        let data = exact_corpus();
        let fitted = LinearRegression::new().fit(&data).unwrap();
        let predictions = fitted.predict(data.features()).unwrap();
        for (pred, label) in predictions.iter().zip(data.labels().iter()) {
            assert_abs_diff_eq!(*pred, *label, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_score_is_one_on_exact_fit() {
        let data = exact_corpus();
        let fitted = LinearRegression::new().fit(&data).unwrap();
        assert_abs_diff_eq!(fitted.score(&data).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let data = exact_corpus();
        let a = LinearRegression::new().fit(&data).unwrap();
        let b = LinearRegression::new().fit(&data).unwrap();
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.intercept(), b.intercept());
    }

    #[test]
    fn test_fit_handles_collinear_indicators() {
        // Two indicator columns that always sum to 1: singular without
        // damping, solvable with it.
        let data = training_set(
            &["is_a", "is_b"],
            vec![
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 0.0],
                vec![0.0, 1.0],
            ],
            vec![10.0, 20.0, 10.0, 20.0],
        );
        let fitted = LinearRegression::new().fit(&data).unwrap();
        let predictions = fitted.predict(data.features()).unwrap();
        assert_abs_diff_eq!(predictions[0], 10.0, epsilon = 1e-3);
        assert_abs_diff_eq!(predictions[1], 20.0, epsilon = 1e-3);
    }

    #[test]
    fn test_predict_rejects_reordered_columns() {
        let data = exact_corpus();
        let fitted = LinearRegression::new().fit(&data).unwrap();

        let reordered = training_set(
            &["b", "a"],
            vec![vec![0.0, 1.0]],
            vec![7.0],
        );
        assert!(matches!(
            fitted.predict(reordered.features()),
            Err(PipelineError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_predict_rejects_wrong_column_count() {
        let data = exact_corpus();
        let fitted = LinearRegression::new().fit(&data).unwrap();

        let narrow = training_set(&["a"], vec![vec![1.0]], vec![7.0]);
        assert!(matches!(
            fitted.predict(narrow.features()),
            Err(PipelineError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_fit_empty_set_fails() {
        let data = training_set(&["a"], vec![], vec![]);
        assert!(matches!(
            LinearRegression::new().fit(&data),
            Err(PipelineError::EmptyData(_))
        ));
    }

    #[test]
    fn test_negative_damping_rejected() {
        let data = exact_corpus();
        assert!(matches!(
            LinearRegression::new().with_damping(-1.0).fit(&data),
            Err(PipelineError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_named_coefficients_sorted_by_magnitude() {
        let fitted = LinearRegression::new().fit(&exact_corpus()).unwrap();
        let coefficients = fitted.named_coefficients();
        assert_eq!(coefficients[0].0, "b");
        assert_eq!(coefficients[1].0, "a");
        assert!(coefficients[0].1.abs() >= coefficients[1].1.abs());
    }

    #[test]
    fn test_cholesky_solve_identity() {
        let a = Array2::<f64>::eye(3);
        let b = Array1::from_vec(vec![1.0, 2.0, 3.0]);
        let x = cholesky_solve(a, b.clone()).unwrap();
        assert_eq!(x, b);
    }

    #[test]
    fn test_cholesky_rejects_indefinite_matrix() {
        let mut a = Array2::<f64>::eye(2);
        a[[1, 1]] = -1.0;
        let b = Array1::from_vec(vec![1.0, 1.0]);
        assert!(matches!(
            cholesky_solve(a, b),
            Err(PipelineError::Numerical(_))
        ));
    }
}
