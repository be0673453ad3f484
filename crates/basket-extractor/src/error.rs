//! Error types for the Extractor

use thiserror::Error;

/// Reasons an extraction can fail
///
/// The analyzer never returns these to its caller directly; each one ends in
/// the fallback record and is reported alongside it.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Input text was empty or whitespace
    #[error("Input text is empty")]
    EmptyInput,

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Completion provider error (transport, auth, HTTP status)
    #[error("LLM error: {0}")]
    Llm(String),

    /// The completion call exceeded the configured timeout
    #[error("Extraction timeout")]
    Timeout,

    /// Reply was not JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Reply was JSON but not the expected shape
    #[error("Invalid record format: {0}")]
    InvalidFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

/// Errors from batch file processing
#[derive(Error, Debug)]
pub enum BatchError {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet could not be opened or read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File extension is not one we can read or write
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Input had no non-blank rows
    #[error("No valid rows found")]
    NoRows,
}

impl From<calamine::Error> for BatchError {
    fn from(e: calamine::Error) -> Self {
        BatchError::Spreadsheet(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for BatchError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        BatchError::Spreadsheet(e.to_string())
    }
}
