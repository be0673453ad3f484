//! Result types for extraction

use crate::error::ExtractorError;
use basket_domain::ShoppingItemRecord;

/// Outcome of analyzing one line of text
///
/// Both variants carry a complete record; callers that only need the record
/// use [`Analysis::into_record`].
#[derive(Debug)]
pub enum Analysis {
    /// The model's reply was parsed and normalized
    Extracted(ShoppingItemRecord),

    /// Extraction failed; the record is the deterministic fallback
    Fallback {
        /// The fallback record for the input text
        record: ShoppingItemRecord,
        /// Why extraction failed
        reason: ExtractorError,
    },
}

impl Analysis {
    /// Borrow the record
    pub fn record(&self) -> &ShoppingItemRecord {
        match self {
            Analysis::Extracted(record) => record,
            Analysis::Fallback { record, .. } => record,
        }
    }

    /// Take the record
    pub fn into_record(self) -> ShoppingItemRecord {
        match self {
            Analysis::Extracted(record) => record,
            Analysis::Fallback { record, .. } => record,
        }
    }

    /// Whether the fallback was used
    pub fn is_fallback(&self) -> bool {
        matches!(self, Analysis::Fallback { .. })
    }

    /// Why the fallback was used, if it was
    pub fn fallback_reason(&self) -> Option<&ExtractorError> {
        match self {
            Analysis::Extracted(_) => None,
            Analysis::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// The six fields as read from the model's reply, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ModelFields {
    pub item_name: String,
    pub quantity: String,
    pub unit: String,
    pub brand: String,
    pub priority: String,
    pub details: String,
}
