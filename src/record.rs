//! Raw record schema for resale transactions.
//!
//! Column names and the date/lease text formats are a hard schema contract
//! with the external data source; the `Deserialize` derives make the mapping
//! explicit for whatever loader (CSV, API client) supplies the rows.

use serde::Deserialize;

use crate::error::PipelineError;

/// The raw description of one flat, as it arrives from the data source.
///
/// This is the shape shared by historical transactions and prediction
/// inputs: a [`TransactionRecord`] is a `FlatListing` plus the observed
/// `resale_price`.
///
/// `block` and `street_name` are carried for schema fidelity but unused
/// downstream; `lease_commence_year` is dropped once the lease text has been
/// decoded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlatListing {
    pub town: String,
    pub flat_type: String,
    pub block: String,
    pub street_name: String,
    /// Ordered storey band, e.g. "01 TO 03".
    pub storey_range: String,
    pub floor_area_sqm: f64,
    pub flat_model: String,
    pub lease_commence_year: u16,
    /// Lease text, e.g. "61 years 04 months" or "99 years".
    pub remaining_lease: String,
    /// Sale date text, "YYYY-MM".
    pub sale_month: String,
}

impl FlatListing {
    /// Validate that no field is missing.
    ///
    /// The source corpus is documented to contain no nulls; this enforces
    /// that invariant instead of assuming it. String fields must be
    /// non-empty and float fields finite.
    ///
    /// # Errors
    /// [`PipelineError::MissingValue`] naming every offending column.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let mut missing: Vec<String> = Vec::new();

        let string_fields = [
            ("town", &self.town),
            ("flat_type", &self.flat_type),
            ("block", &self.block),
            ("street_name", &self.street_name),
            ("storey_range", &self.storey_range),
            ("flat_model", &self.flat_model),
            ("remaining_lease", &self.remaining_lease),
            ("sale_month", &self.sale_month),
        ];
        for (name, value) in string_fields {
            if value.trim().is_empty() {
                missing.push(name.to_string());
            }
        }
        if !self.floor_area_sqm.is_finite() {
            missing.push("floor_area_sqm".to_string());
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::MissingValue { fields: missing })
        }
    }
}

/// One historical sale: a [`FlatListing`] plus the transaction price.
///
/// Fields are repeated rather than nested so a tabular row (e.g. one CSV
/// record) deserializes directly into this type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionRecord {
    pub town: String,
    pub flat_type: String,
    pub block: String,
    pub street_name: String,
    pub storey_range: String,
    pub floor_area_sqm: f64,
    pub flat_model: String,
    pub lease_commence_year: u16,
    pub remaining_lease: String,
    pub sale_month: String,
    /// The target variable.
    pub resale_price: f64,
}

impl TransactionRecord {
    /// The flat description without the price.
    pub fn listing(&self) -> FlatListing {
        FlatListing {
            town: self.town.clone(),
            flat_type: self.flat_type.clone(),
            block: self.block.clone(),
            street_name: self.street_name.clone(),
            storey_range: self.storey_range.clone(),
            floor_area_sqm: self.floor_area_sqm,
            flat_model: self.flat_model.clone(),
            lease_commence_year: self.lease_commence_year,
            remaining_lease: self.remaining_lease.clone(),
            sale_month: self.sale_month.clone(),
        }
    }

    /// Validate that no field is missing, including the label.
    ///
    /// # Errors
    /// [`PipelineError::MissingValue`] naming every offending column.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let mut missing = match self.listing().validate() {
            Ok(()) => Vec::new(),
            Err(PipelineError::MissingValue { fields }) => fields,
            Err(other) => return Err(other),
        };
        if !self.resale_price.is_finite() {
            missing.push("resale_price".to_string());
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::MissingValue { fields: missing })
        }
    }
}
