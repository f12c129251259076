//! Seeded random train/test splitting.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::error::PipelineError;
use crate::matrix::TrainingSet;

/// Configuration for [`train_test_split`].
///
/// Defaults: 25% held out, seed 42. The seed fully determines the split, so
/// repeated runs over the same corpus are reproducible.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    holdout: f64,
    seed: u64,
}

impl SplitConfig {
    pub fn new() -> Self {
        Self {
            holdout: 0.25,
            seed: 42,
        }
    }

    /// Fraction of rows held out for evaluation; must be in `(0, 1)`.
    pub fn with_holdout(mut self, holdout: f64) -> Self {
        self.holdout = holdout;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Partition `data` into a training set and a held-out set.
///
/// Row indices are shuffled with a `StdRng` seeded from the config, then
/// each side is restored to corpus order so the split is stable to inspect.
/// Both sides always receive at least one row.
///
/// # Errors
/// - [`PipelineError::InvalidParameter`] if the holdout fraction is outside
///   `(0, 1)`.
/// - [`PipelineError::EmptyData`] if `data` has fewer than two rows.
pub fn train_test_split(
    data: &TrainingSet,
    config: &SplitConfig,
) -> Result<(TrainingSet, TrainingSet), PipelineError> {
    if !(config.holdout > 0.0 && config.holdout < 1.0) {
        return Err(PipelineError::InvalidParameter(format!(
            "holdout fraction must be in (0, 1), got {}",
            config.holdout
        )));
    }
    let n = data.n_rows();
    if n < 2 {
        return Err(PipelineError::EmptyData(format!(
            "need at least 2 rows to split, got {n}"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(config.seed));

    let n_test = ((n as f64) * config.holdout).round() as usize;
    let n_test = n_test.clamp(1, n - 1);

    let mut test_indices = indices[..n_test].to_vec();
    let mut train_indices = indices[n_test..].to_vec();
    train_indices.sort_unstable();
    test_indices.sort_unstable();

    debug!(
        total = n,
        train = train_indices.len(),
        test = test_indices.len(),
        seed = config.seed,
        "split corpus"
    );

    Ok((
        data.select_rows(&train_indices)?,
        data.select_rows(&test_indices)?,
    ))
}
