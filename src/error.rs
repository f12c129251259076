//! Error types for the pricing pipeline.

use thiserror::Error;

/// Error type for every stage of the pipeline: record validation, text
/// parsing, category encoding, matrix assembly, and model fitting.
///
/// All variants are terminal for the operation that raised them. The
/// pipeline assumes a previously cleaned, consistent corpus, so a malformed
/// row indicates a structural data or schema problem rather than a transient
/// fault; nothing is retried and no row is skipped.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Malformed date or lease text in a raw record.
    #[error("cannot parse {field} from {value:?}: {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// One or more required fields are empty or non-finite.
    #[error("missing value in column(s): {}", fields.join(", "))]
    MissingValue { fields: Vec<String> },

    /// A categorical value outside the fitted (or fixed) vocabulary.
    ///
    /// Raised identically during training-corpus transformation and at
    /// single-record prediction time; there is no "other" bucket.
    #[error("unknown category {value:?} in column {column} (expected one of: {})", expected.join(", "))]
    UnknownCategory {
        column: String,
        value: String,
        expected: Vec<String>,
    },

    /// Assembled feature columns do not exactly match the training schema.
    #[error("schema mismatch: {reason} (expected {} columns, got {})", expected.len(), actual.len())]
    SchemaMismatch {
        reason: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Empty data provided where non-empty was required.
    #[error("empty data: {0}")]
    EmptyData(String),

    /// Invalid hyperparameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical computation error.
    #[error("numerical error: {0}")]
    Numerical(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_parse() {
        let err = PipelineError::Parse {
            field: "sale_month",
            value: "2017/03".to_string(),
            reason: "expected YYYY-MM".to_string(),
        };
        assert!(err.to_string().contains("sale_month"));
        assert!(err.to_string().contains("2017/03"));
    }

    #[test]
    fn test_error_display_missing_value() {
        let err = PipelineError::MissingValue {
            fields: vec!["town".to_string(), "flat_model".to_string()],
        };
        assert!(err.to_string().contains("town, flat_model"));
    }

    #[test]
    fn test_error_display_unknown_category() {
        let err = PipelineError::UnknownCategory {
            column: "flat_type".to_string(),
            value: "6 ROOM".to_string(),
            expected: vec!["3 ROOM".to_string(), "4 ROOM".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("flat_type"));
        assert!(msg.contains("6 ROOM"));
        assert!(msg.contains("3 ROOM"));
    }

    #[test]
    fn test_error_display_schema_mismatch() {
        let err = PipelineError::SchemaMismatch {
            reason: "missing indicator column".to_string(),
            expected: vec!["a".to_string(), "b".to_string()],
            actual: vec!["a".to_string()],
        };
        assert!(err.to_string().contains("expected 2 columns, got 1"));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PipelineError::EmptyData("no rows".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
