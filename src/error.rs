//! Error types for blogmetrics

use crate::aggregate::AggregateError;
use crate::filter::FilterError;

/// Errors that can occur while loading a dataset or configuration file
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// IO error reading file
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    /// YAML deserialization error
    #[error("Invalid YAML: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },
    /// Duplicate primary key or dangling foreign key
    #[error("Dataset integrity error: {0}")]
    Integrity(String),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::Io {
            path: String::new(),
            source: err,
        }
    }
}

/// Request-level failure of an analytics call.
///
/// The first two variants are caused by the caller's input; `Internal`
/// covers everything else and must not be shown verbatim to clients.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Malformed filter tree, or a filter the dataset cannot apply
    #[error(transparent)]
    InvalidFilter(#[from] FilterError),
    /// Missing or invalid request parameter
    #[error("{0}")]
    InvalidParameter(String),
    /// Unexpected failure while aggregating
    #[error("internal error: {0}")]
    Internal(String),
}

impl AnalyticsError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        AnalyticsError::InvalidParameter(message.into())
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AnalyticsError::Internal(_))
    }

    /// Message safe to return to a client
    pub fn public_message(&self) -> String {
        match self {
            AnalyticsError::Internal(_) => "Server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<AggregateError> for AnalyticsError {
    fn from(err: AggregateError) -> Self {
        AnalyticsError::Internal(err.to_string())
    }
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_message_is_opaque() {
        let err = AnalyticsError::Internal("index 7 out of range".into());
        assert!(!err.is_client_error());
        assert_eq!(err.public_message(), "Server error");
    }

    #[test]
    fn test_parameter_message_is_passed_through() {
        let err = AnalyticsError::invalid_parameter("compare is required");
        assert!(err.is_client_error());
        assert_eq!(err.public_message(), "compare is required");
    }
}
