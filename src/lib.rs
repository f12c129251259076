//! # resale-pricer
//!
//! Resale price estimation for public housing flats: a single-pass
//! analytical pipeline that decodes raw transaction records, encodes their
//! categorical and textual fields into a stable numeric feature matrix,
//! fits a linear regression model, and prices one unseen flat.
//!
//! ## Core Design Principles
//!
//! - **Fit-once / transform-many**: encoders, the feature pipeline, and
//!   models all separate an unfitted configuration type from an immutable
//!   fitted type, so transforming before fitting is unrepresentable.
//! - **Explicit column contract**: the feature column ordering recorded at
//!   training time is carried by name through every later transform; any
//!   misalignment fails with a schema error rather than producing a
//!   plausible-looking but wrong prediction.
//! - **Closed vocabularies**: a categorical value never seen during fitting
//!   is an error, not a silent zero vector.
//! - **Pure stage-to-stage transforms**: raw listing → engineered record →
//!   feature row, each stage producing a new structure with no hidden
//!   in-place state.
//!
//! ## Quick Start
//!
//! ```
//! use resale_pricer::model::{LinearRegression, Regressor};
//! use resale_pricer::pipeline::FeaturePipeline;
//! use resale_pricer::predict::PricePredictor;
//! # use resale_pricer::record::TransactionRecord;
//! # fn record(town: &str, storey: &str, area: f64, price: f64) -> TransactionRecord {
//! #     TransactionRecord {
//! #         town: town.to_string(), flat_type: "4 ROOM".to_string(),
//! #         block: "1".to_string(), street_name: "MAIN ST".to_string(),
//! #         storey_range: storey.to_string(), floor_area_sqm: area,
//! #         flat_model: "Improved".to_string(), lease_commence_year: 1990,
//! #         remaining_lease: "60 years".to_string(), sale_month: "2021-01".to_string(),
//! #         resale_price: price,
//! #     }
//! # }
//!
//! let records = vec![
//!     record("BEDOK", "01 TO 03", 90.0, 400_000.0),
//!     record("BEDOK", "04 TO 06", 91.0, 405_000.0),
//!     record("YISHUN", "01 TO 03", 95.0, 380_000.0),
//!     record("YISHUN", "07 TO 09", 96.0, 390_000.0),
//! ];
//!
//! // Fit the encoding pipeline and the model on the full corpus.
//! let (pipeline, training) = FeaturePipeline::new().fit(&records)?;
//! let model = LinearRegression::new().fit(&training)?;
//!
//! // Price one flat that is not in the corpus.
//! let predictor = PricePredictor::new(pipeline, model)?;
//! let listing = record("BEDOK", "07 TO 09", 93.0, 0.0).listing();
//! let price = predictor.predict(&listing)?;
//! assert!(price.is_finite());
//! # Ok::<(), resale_pricer::error::PipelineError>(())
//! ```
//!
//! ## Module Structure
//!
//! - `record` — raw record schema and missing-value validation
//! - `parse` — date/lease text decoding into numeric sub-fields
//! - `encoding` — ordinal and one-hot category encoders
//! - `matrix` — named-column feature matrix and training set
//! - `pipeline` — feature pipeline orchestration and the column contract
//! - `model` — regression traits and the linear reference implementation
//! - `split` — seeded train/test splitting
//! - `eval` — held-out error metrics
//! - `predict` — single-record price prediction
//! - `error` — the pipeline error taxonomy

/// The pipeline error taxonomy.
pub mod error;

/// Raw record schema and missing-value validation.
pub mod record;

/// Decoding of textual date and lease fields.
pub mod parse;

/// Category encoders with a fit-once / transform-many lifecycle.
pub mod encoding;

/// Named-column feature matrix and training set containers.
pub mod matrix;

/// Feature pipeline: records in, aligned numeric matrix out.
pub mod pipeline;

/// Regression models behind pluggable fit/predict/score traits.
pub mod model;

/// Seeded random train/test splitting.
pub mod split;

/// Held-out evaluation metrics.
pub mod eval;

/// Single-record price prediction.
pub mod predict;

pub use error::PipelineError;
pub use eval::{evaluate, EvaluationReport};
pub use matrix::{FeatureMatrix, TrainingSet};
pub use model::{FittedLinearRegression, FittedRegressor, LinearRegression, Regressor};
pub use pipeline::{FeaturePipeline, FittedFeaturePipeline};
pub use predict::PricePredictor;
pub use record::{FlatListing, TransactionRecord};
pub use split::{train_test_split, SplitConfig};
