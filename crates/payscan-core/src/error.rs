//! Error types for the payscan-core library.

use thiserror::Error;

/// Main error type for the payscan library.
#[derive(Error, Debug)]
pub enum PayscanError {
    /// Registry or pipeline configuration error.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Salary extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that indicate a missing or inconsistent setup rather than bad data.
///
/// These are fatal: a market we do not support is not the same thing as a
/// posting without a salary.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// No salary-context terms are registered for the country.
    #[error("unsupported country: {0}")]
    UnsupportedCountry(String),

    /// The requested text column does not exist on a posting.
    #[error("unknown text column: {0}")]
    UnknownTextColumn(String),

    /// A registry pattern failed to compile.
    #[error("invalid pattern for {label}: {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },

    /// A plausibility range is empty or negative.
    #[error("invalid bounds for {country}: {reason}")]
    InvalidBounds { country: String, reason: String },
}

/// Errors raised while resolving a single posting.
///
/// The resolver never surfaces these to callers; they are logged and turned
/// into a failed [`crate::ResolvedSalary`].
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The text to scan is missing or blank.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The posting belongs to a market without a registry profile.
    #[error("no patterns registered for country: {0}")]
    UnknownCountry(String),

    /// A numeric token could not be converted.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },
}

/// Result type for the payscan library.
pub type Result<T> = std::result::Result<T, PayscanError>;
