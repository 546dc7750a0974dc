//! Error types for the FHIR object model

use thiserror::Error;

/// Failures raised while building model instances or loading configuration.
///
/// Every variant that comes out of a `build()` call names the offending element,
/// so callers can report the failure without inspecting the builder state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Missing required element: '{field}'")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid type: {actual} for choice element: '{field}' must be one of: {allowed}")]
    InvalidChoiceType {
        field: &'static str,
        actual: &'static str,
        allowed: String,
    },

    #[error("Invalid value for element '{field}': {reason}")]
    InvalidFieldValue { field: &'static str, reason: String },

    #[error("Invalid model configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidFieldValue {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the element the failure refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::MissingRequiredField { field }
            | Error::InvalidChoiceType { field, .. }
            | Error::InvalidFieldValue { field, .. } => Some(field),
            Error::Config(_) => None,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
