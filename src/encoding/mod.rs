//! Category encoders for the feature pipeline.
//!
//! Both encoders follow the same two-phase contract as the rest of the
//! crate: an unfitted value carrying configuration, a `fit` that produces an
//! immutable fitted value, and transform methods that exist only on the
//! fitted value. Calling transform before fit is therefore unrepresentable.
//!
//! - [`OrdinalEncoder`]: ranked categories with a fixed, externally
//!   specified vocabulary (storey bands).
//! - [`OneHotEncoder`]: unordered categories (town, flat type, flat model)
//!   expanded into indicator columns learned from the training corpus.
//!
//! Neither encoder has an "unknown" bucket: a value outside the fitted
//! vocabulary fails with [`PipelineError::UnknownCategory`], identically
//! during training-corpus transformation and at prediction time.
//!
//! [`PipelineError::UnknownCategory`]: crate::error::PipelineError

mod one_hot;
mod ordinal;

pub use one_hot::{FittedOneHotEncoder, OneHotEncoder};
pub use ordinal::{FittedOrdinalEncoder, OrdinalEncoder, STOREY_BANDS};

use crate::parse::EngineeredRecord;
use crate::record::FlatListing;

/// Access to named categorical columns of a row.
///
/// The seam between the one-hot encoder and the record types: the encoder
/// is configured with column names and reads values through this trait, so
/// it is not welded to one record shape.
pub trait CategoricalRow {
    /// The row's value for `column`, or `None` if the row has no such
    /// categorical column.
    fn category(&self, column: &str) -> Option<&str>;
}

impl CategoricalRow for FlatListing {
    fn category(&self, column: &str) -> Option<&str> {
        match column {
            "town" => Some(&self.town),
            "flat_type" => Some(&self.flat_type),
            "flat_model" => Some(&self.flat_model),
            "storey_range" => Some(&self.storey_range),
            _ => None,
        }
    }
}

impl CategoricalRow for EngineeredRecord {
    fn category(&self, column: &str) -> Option<&str> {
        match column {
            "town" => Some(&self.town),
            "flat_type" => Some(&self.flat_type),
            "flat_model" => Some(&self.flat_model),
            "storey_range" => Some(&self.storey_range),
            _ => None,
        }
    }
}
