//! Error handling for SQM night analysis.
//!
//! Provides error types with context for record parsing, night window
//! detection, statistics estimation and boundary refinement failures.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqmError {
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record at line {line}: {reason} (content: '{content}')")]
    MalformedRecord {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("No night data: the series has no non-zero brightness reading")]
    NoNightData,

    #[error("Empty window: start index {start} is after end index {end}")]
    EmptyWindow { start: usize, end: usize },

    #[error("Window end index {end} is out of bounds for a series of {len} records")]
    WindowOutOfBounds { end: usize, len: usize },

    #[error("Invalid modifier {modifier}: must be greater than zero")]
    InvalidModifier { modifier: f64 },

    #[error("No reading in window {start}..={end} exceeds threshold {threshold:.4}")]
    NoCrossing {
        threshold: f64,
        start: usize,
        end: usize,
    },

    #[error("Source not found: '{locator}' is not a readable data file")]
    SourceNotFound { locator: String },

    #[error("Request for '{locator}' failed: {reason}")]
    Network { locator: String, reason: String },

    #[error("Server returned HTTP {status} for '{locator}'")]
    HttpStatus { locator: String, status: u16 },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Analysis task failed for {source_name}: {reason}")]
    TaskFailed { source_name: String, reason: String },
}

impl SqmError {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a malformed record error for a 1-based line number
    pub fn malformed_record(
        line: usize,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn source_not_found(locator: impl Into<String>) -> Self {
        Self::SourceNotFound {
            locator: locator.into(),
        }
    }

    pub fn network(locator: impl Into<String>, reason: impl ToString) -> Self {
        Self::Network {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }

    pub fn file_not_found(path: &Path) -> Self {
        Self::SourceNotFound {
            locator: path.display().to_string(),
        }
    }

    /// Stable name of the error kind, as reported by the CLI
    pub fn kind(&self) -> &'static str {
        match self {
            SqmError::Io { .. } => "IoError",
            SqmError::MalformedRecord { .. } => "MalformedRecordError",
            SqmError::NoNightData => "NoNightDataError",
            SqmError::EmptyWindow { .. } => "EmptyWindowError",
            SqmError::WindowOutOfBounds { .. } => "WindowOutOfBoundsError",
            SqmError::InvalidModifier { .. } => "InvalidModifierError",
            SqmError::NoCrossing { .. } => "NoCrossingError",
            SqmError::SourceNotFound { .. } => "SourceNotFoundError",
            SqmError::Network { .. } => "NetworkError",
            SqmError::HttpStatus { .. } => "HttpStatusError",
            SqmError::Configuration { .. } => "ConfigurationError",
            SqmError::TaskFailed { .. } => "TaskFailedError",
        }
    }
}

impl From<std::io::Error> for SqmError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

pub type Result<T> = std::result::Result<T, SqmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SqmError::malformed_record(3, "a;b;c", "missing field").kind(),
            "MalformedRecordError"
        );
        assert_eq!(SqmError::NoNightData.kind(), "NoNightDataError");
        assert_eq!(
            SqmError::InvalidModifier { modifier: 0.0 }.kind(),
            "InvalidModifierError"
        );
        assert_eq!(
            SqmError::HttpStatus {
                locator: "https://example.org/night.dat".into(),
                status: 404
            }
            .kind(),
            "HttpStatusError"
        );
    }

    #[test]
    fn test_malformed_record_message_names_line() {
        let error = SqmError::malformed_record(12, "2024;1;2", "expected at least 6 fields, found 3");
        let message = error.to_string();
        assert!(message.contains("line 12"));
        assert!(message.contains("2024;1;2"));
    }
}
