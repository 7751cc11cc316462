//! Error types for the zonemeet crates.

use thiserror::Error;

/// Errors that can occur in zonemeet operations.
///
/// Validation, range, and timezone errors are always raised before anything
/// is written; a caller that sees one of them can assume no partial state.
#[derive(Error, Debug)]
pub enum SchedError {
    #[error("{0} required")]
    MissingField(&'static str),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date-time: {0}")]
    InvalidTimeFormat(String),

    #[error("Can't pick a date that has passed")]
    InvalidRange,

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SchedError {
    /// Stable machine-readable code for the error category, so presentation
    /// layers can branch without parsing the message.
    pub fn code(&self) -> &'static str {
        match self {
            SchedError::MissingField(_) => "missing_field",
            SchedError::InvalidTimezone(_) => "invalid_timezone",
            SchedError::InvalidTimeFormat(_) => "invalid_time_format",
            SchedError::InvalidRange => "invalid_range",
            SchedError::ProfileNotFound(_) => "profile_not_found",
            SchedError::EventNotFound(_) => "event_not_found",
            SchedError::Config(_) | SchedError::Io(_) | SchedError::Serialization(_) => "internal",
        }
    }
}

impl From<serde_json::Error> for SchedError {
    fn from(err: serde_json::Error) -> Self {
        SchedError::Serialization(err.to_string())
    }
}

/// Result type alias for zonemeet operations.
pub type SchedResult<T> = Result<T, SchedError>;
