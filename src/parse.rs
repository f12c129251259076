//! Decoding of the textual date and lease fields into numeric sub-fields.
//!
//! Both parsers are pure functions with no retry semantics: a malformed row
//! is a hard error surfaced to the caller.

use crate::error::PipelineError;
use crate::record::FlatListing;

/// Parse `sale_month` text of the form "YYYY-MM".
///
/// # Errors
/// [`PipelineError::Parse`] if the text is not exactly two `-`-separated
/// numeric tokens, or the month is outside 1..=12.
///
/// # Example
/// ```
/// use resale_pricer::parse::parse_sale_month;
///
/// assert_eq!(parse_sale_month("2017-03").unwrap(), (2017, 3));
/// assert!(parse_sale_month("2017/03").is_err());
/// ```
pub fn parse_sale_month(text: &str) -> Result<(u16, u8), PipelineError> {
    let parse_err = |reason: &str| PipelineError::Parse {
        field: "sale_month",
        value: text.to_string(),
        reason: reason.to_string(),
    };

    let tokens: Vec<&str> = text.trim().split('-').collect();
    if tokens.len() != 2 {
        return Err(parse_err("expected \"YYYY-MM\""));
    }

    let year: u16 = tokens[0]
        .parse()
        .map_err(|_| parse_err("year is not numeric"))?;
    let month: u8 = tokens[1]
        .parse()
        .map_err(|_| parse_err("month is not numeric"))?;
    if !(1..=12).contains(&month) {
        return Err(parse_err("month must be 1..=12"));
    }

    Ok((year, month))
}

/// Parse `remaining_lease` text of the form "<N> years" or
/// "<N> years <M> months".
///
/// Tokenization is whitespace-split; 2 or 4 tokens are accepted. The months
/// component defaults to 0 when absent and must be 0..=11 when present.
///
/// # Errors
/// [`PipelineError::Parse`] on any other token count, non-numeric count
/// tokens, or unexpected unit words.
///
/// # Example
/// ```
/// use resale_pricer::parse::parse_remaining_lease;
///
/// assert_eq!(parse_remaining_lease("61 years 04 months").unwrap(), (61, 4));
/// assert_eq!(parse_remaining_lease("99 years").unwrap(), (99, 0));
/// ```
pub fn parse_remaining_lease(text: &str) -> Result<(u16, u8), PipelineError> {
    let parse_err = |reason: &str| PipelineError::Parse {
        field: "remaining_lease",
        value: text.to_string(),
        reason: reason.to_string(),
    };

    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 2 && tokens.len() != 4 {
        return Err(parse_err("expected \"<N> years\" or \"<N> years <M> months\""));
    }

    let years: u16 = tokens[0]
        .parse()
        .map_err(|_| parse_err("year count is not numeric"))?;
    if !matches!(tokens[1], "year" | "years") {
        return Err(parse_err("expected unit \"years\""));
    }

    let months: u8 = if tokens.len() == 4 {
        let m: u8 = tokens[2]
            .parse()
            .map_err(|_| parse_err("month count is not numeric"))?;
        if !matches!(tokens[3], "month" | "months") {
            return Err(parse_err("expected unit \"months\""));
        }
        if m > 11 {
            return Err(parse_err("month count must be 0..=11"));
        }
        m
    } else {
        0
    };

    Ok((years, months))
}

/// A transaction record with its textual fields decoded into numbers.
///
/// Keeps the categorical values (`town`, `flat_type`, `flat_model`,
/// `storey_range`) verbatim for the encoders to consume; `block`,
/// `street_name` and `lease_commence_year` are dropped here.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineeredRecord {
    pub floor_area_sqm: f64,
    pub sale_year: u16,
    pub sale_month_num: u8,
    pub years_remaining: u16,
    pub months_remaining: u8,
    pub town: String,
    pub flat_type: String,
    pub flat_model: String,
    pub storey_range: String,
}

impl EngineeredRecord {
    /// Validate and decode one raw listing. Pure; the input is untouched.
    ///
    /// # Errors
    /// [`PipelineError::MissingValue`] for absent fields,
    /// [`PipelineError::Parse`] for malformed date/lease text.
    pub fn from_listing(listing: &FlatListing) -> Result<Self, PipelineError> {
        listing.validate()?;
        let (sale_year, sale_month_num) = parse_sale_month(&listing.sale_month)?;
        let (years_remaining, months_remaining) = parse_remaining_lease(&listing.remaining_lease)?;

        Ok(Self {
            floor_area_sqm: listing.floor_area_sqm,
            sale_year,
            sale_month_num,
            years_remaining,
            months_remaining,
            town: listing.town.clone(),
            flat_type: listing.flat_type.clone(),
            flat_model: listing.flat_model.clone(),
            storey_range: listing.storey_range.clone(),
        })
    }
}
