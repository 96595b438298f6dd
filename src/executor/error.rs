//! HTTP request execution error types.
//!
//! These never escape [`execute`](super::execute) as errors: they are folded
//! into an [`ExecutionResult`](crate::models::ExecutionResult) carrying
//! [`RequestError::error_class`] and [`RequestError::into_body`].

use crate::models::ErrorClass;
use thiserror::Error;

/// Errors that can occur while a request is on the wire.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request did not complete within the configured ceiling.
    #[error("Request timed out")]
    Timeout,

    /// Connection failure, DNS resolution error, or any other transport fault
    /// before a response arrived.
    #[error("{0}")]
    Network(String),

    /// The response started but the body could not be read to the end.
    ///
    /// `partial` holds whatever was received before the fault.
    #[error("Failed to read response body: {message}")]
    BodyRead { message: String, partial: String },

    /// The HTTP client itself could not be built or the request was rejected
    /// by the client before sending.
    #[error("Request build error: {0}")]
    Build(String),
}

impl RequestError {
    /// Class reported for this fault.
    ///
    /// A request the client refuses to build (for example an illegal header
    /// name) never reached the wire, so it counts as a configuration problem.
    pub fn error_class(&self) -> ErrorClass {
        match self {
            RequestError::Build(_) => ErrorClass::Configuration,
            _ => ErrorClass::Network,
        }
    }

    /// Text placed in the result body for this fault.
    ///
    /// A body-read fault keeps the partial payload after the fault text.
    pub fn into_body(self) -> String {
        match self {
            RequestError::BodyRead { message, partial } if !partial.is_empty() => {
                format!("Failed to read response body: {}\n{}", message, partial)
            }
            RequestError::Build(message) => format!("Request build error: {}", message),
            other => format!("Network Error: {}", other),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::Build(err.to_string())
        } else if err.is_connect() {
            RequestError::Network(format!("Connection failed: {}", err))
        } else {
            RequestError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(RequestError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            RequestError::Network("Connection refused".to_string()).to_string(),
            "Connection refused"
        );
        assert_eq!(
            RequestError::Build("bad header".to_string()).to_string(),
            "Request build error: bad header"
        );
    }

    #[test]
    fn test_body_text() {
        assert_eq!(
            RequestError::Timeout.into_body(),
            "Network Error: Request timed out"
        );

        let err = RequestError::BodyRead {
            message: "connection reset".to_string(),
            partial: "{\"items\": [".to_string(),
        };
        assert_eq!(
            err.into_body(),
            "Failed to read response body: connection reset\n{\"items\": ["
        );
    }

    #[test]
    fn test_error_class() {
        assert_eq!(RequestError::Timeout.error_class(), ErrorClass::Network);
        assert_eq!(
            RequestError::Build("x".to_string()).error_class(),
            ErrorClass::Configuration
        );
        assert_eq!(
            RequestError::Build("bad header".to_string()).into_body(),
            "Request build error: bad header"
        );
    }

    #[test]
    fn test_body_read_without_partial() {
        let err = RequestError::BodyRead {
            message: "eof".to_string(),
            partial: String::new(),
        };
        assert_eq!(
            err.into_body(),
            "Network Error: Failed to read response body: eof"
        );
    }
}
