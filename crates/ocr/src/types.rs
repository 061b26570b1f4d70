use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tahsilat_core::CollectionMethod;

/// Structured fields read out of one recognition attempt's raw text.
///
/// Every field is optional: a rule that finds nothing leaves its field
/// `None`, and the UI fills in whatever is present, leaving the rest for
/// manual entry. The JSON keys match the auto-fill payload the entry form
/// consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(rename = "evrakNo")]
    pub document_number: Option<String>,
    #[serde(rename = "tutar")]
    pub amount: Option<Decimal>,
    /// Normalized `DD.MM.YYYY`. Kept as a string on purpose: the extractor
    /// does no calendar validation, so values like `31.02.2025` must pass
    /// through untouched.
    #[serde(rename = "tarih")]
    pub date: Option<String>,
    #[serde(rename = "odemeSecenegi")]
    pub payment_method: Option<CollectionMethod>,
    /// Additive score: +30 document number, +25 amount, +20 date,
    /// +15 payment method. Not a probability.
    pub confidence: u8,
}

impl ExtractedFields {
    /// True when no rule matched anything.
    pub fn is_empty(&self) -> bool {
        self.document_number.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.payment_method.is_none()
    }

    /// The date re-keyed as ISO `YYYY-MM-DD`, the shape a date picker wants.
    pub fn date_iso(&self) -> Option<String> {
        let date = self.date.as_deref()?;
        let mut parts = date.splitn(3, '.');
        let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
        Some(format!("{year}-{month}-{day}"))
    }
}
