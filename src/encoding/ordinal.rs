//! Ordinal encoding for ranked categorical features.

use std::collections::HashMap;

use crate::error::PipelineError;

/// The 17 canonical 3-level storey bands, in rank order.
///
/// This vocabulary is fixed by the housing data publisher, not learned from
/// data frequency: "01 TO 03" ranks lowest and "49 TO 51" highest.
pub const STOREY_BANDS: [&str; 17] = [
    "01 TO 03", "04 TO 06", "07 TO 09", "10 TO 12", "13 TO 15", "16 TO 18", "19 TO 21", "22 TO 24",
    "25 TO 27", "28 TO 30", "31 TO 33", "34 TO 36", "37 TO 39", "40 TO 42", "43 TO 45", "46 TO 48",
    "49 TO 51",
];

/// Ordinal encoder for a ranked categorical column.
///
/// Maps each vocabulary label to its position, so the encoding is a total,
/// strictly monotonic bijection from the vocabulary onto `0..len`. Unlike
/// the one-hot encoder the vocabulary is supplied up front rather than
/// learned; `fit` only freezes it into an immutable
/// [`FittedOrdinalEncoder`].
///
/// # Example
/// ```
/// use resale_pricer::encoding::OrdinalEncoder;
///
/// let fitted = OrdinalEncoder::storey_range().fit().unwrap();
/// assert_eq!(fitted.encode("01 TO 03").unwrap(), 0);
/// assert_eq!(fitted.encode("49 TO 51").unwrap(), 16);
/// assert!(fitted.encode("52 TO 54").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct OrdinalEncoder {
    column: String,
    vocabulary: Vec<String>,
}

impl OrdinalEncoder {
    /// Encoder for `storey_range` over the fixed [`STOREY_BANDS`]
    /// vocabulary.
    pub fn storey_range() -> Self {
        Self::with_vocabulary("storey_range", STOREY_BANDS.iter().map(|s| s.to_string()))
    }

    /// Encoder over an explicit ordered vocabulary.
    pub fn with_vocabulary(
        column: impl Into<String>,
        vocabulary: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            column: column.into(),
            vocabulary: vocabulary.into_iter().collect(),
        }
    }

    /// Freeze the vocabulary into a fitted encoder.
    ///
    /// Takes no data: the ranking is externally specified. The method
    /// exists so the encoder follows the same fit-once / transform-many
    /// lifecycle as the rest of the pipeline.
    ///
    /// # Errors
    /// [`PipelineError::EmptyData`] if the vocabulary is empty.
    pub fn fit(&self) -> Result<FittedOrdinalEncoder, PipelineError> {
        if self.vocabulary.is_empty() {
            return Err(PipelineError::EmptyData(format!(
                "ordinal vocabulary for column {} is empty",
                self.column
            )));
        }

        let ranks = self
            .vocabulary
            .iter()
            .enumerate()
            .map(|(rank, label)| (label.clone(), rank as u32))
            .collect();

        Ok(FittedOrdinalEncoder {
            column: self.column.clone(),
            vocabulary: self.vocabulary.clone(),
            ranks,
        })
    }
}

/// Fitted ordinal encoder; immutable after [`OrdinalEncoder::fit`].
#[derive(Debug, Clone)]
pub struct FittedOrdinalEncoder {
    column: String,
    vocabulary: Vec<String>,
    ranks: HashMap<String, u32>,
}

impl FittedOrdinalEncoder {
    /// The column this encoder applies to.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The ordered vocabulary.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Encode one value to its rank.
    ///
    /// # Errors
    /// [`PipelineError::UnknownCategory`] for any value outside the
    /// vocabulary; there is deliberately no "other" rank.
    pub fn encode(&self, value: &str) -> Result<u32, PipelineError> {
        self.ranks
            .get(value)
            .copied()
            .ok_or_else(|| PipelineError::UnknownCategory {
                column: self.column.clone(),
                value: value.to_string(),
                expected: self.vocabulary.clone(),
            })
    }
}
