//! Named-column feature matrix and training set containers.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::PipelineError;

/// A numeric feature matrix with a fixed, named column ordering.
///
/// The column sequence recorded at training time is the binding contract
/// between training and prediction: any row submitted for prediction must
/// carry exactly these columns in exactly this order. Consumers that hold a
/// `FeatureMatrix` can rely on `columns().len() == values().ncols()`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl FeatureMatrix {
    /// Build a matrix from row vectors.
    ///
    /// # Errors
    /// [`PipelineError::SchemaMismatch`] if any row's width differs from the
    /// column count.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, PipelineError> {
        let width = columns.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(PipelineError::SchemaMismatch {
                    reason: format!("row {i} has wrong width"),
                    expected: columns.clone(),
                    actual: (0..row.len()).map(|c| format!("column {c}")).collect(),
                });
            }
        }

        let n_rows = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let values = Array2::from_shape_vec((n_rows, width), flat)
            .map_err(|e| PipelineError::Numerical(e.to_string()))?;

        Ok(Self { columns, values })
    }

    /// Column names, in canonical order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The numeric values, shape `(n_rows, n_columns)`.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// One row as a view.
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.row(index)
    }

    /// A new matrix containing the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self, PipelineError> {
        let width = self.n_columns();
        let mut flat: Vec<f64> = Vec::with_capacity(indices.len() * width);
        for &i in indices {
            if i >= self.n_rows() {
                return Err(PipelineError::Numerical(format!(
                    "row index {i} out of bounds for {} rows",
                    self.n_rows()
                )));
            }
            flat.extend(self.values.row(i).iter());
        }
        let values = Array2::from_shape_vec((indices.len(), width), flat)
            .map_err(|e| PipelineError::Numerical(e.to_string()))?;

        Ok(Self {
            columns: self.columns.clone(),
            values,
        })
    }
}

/// A feature matrix paired with its label vector.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    features: FeatureMatrix,
    labels: Array1<f64>,
}

impl TrainingSet {
    /// # Errors
    /// [`PipelineError::SchemaMismatch`] if the label count differs from the
    /// row count.
    pub fn new(features: FeatureMatrix, labels: Array1<f64>) -> Result<Self, PipelineError> {
        if labels.len() != features.n_rows() {
            return Err(PipelineError::SchemaMismatch {
                reason: format!(
                    "label count {} does not match row count {}",
                    labels.len(),
                    features.n_rows()
                ),
                expected: features.columns().to_vec(),
                actual: features.columns().to_vec(),
            });
        }
        Ok(Self { features, labels })
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn labels(&self) -> ArrayView1<'_, f64> {
        self.labels.view()
    }

    pub fn n_rows(&self) -> usize {
        self.features.n_rows()
    }

    /// A new set containing the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self, PipelineError> {
        let features = self.features.select_rows(indices)?;
        let labels = Array1::from_iter(indices.iter().map(|&i| self.labels[i]));
        Self::new(features, labels)
    }
}
