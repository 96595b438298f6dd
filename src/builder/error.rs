//! Request building error types.
//!
//! Every variant is a configuration problem on the user's side. Nothing is
//! sent when one of these is returned.

use thiserror::Error;

/// Errors that stop a definition from becoming an outbound request.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The environment text is not a string-to-string JSON object.
    #[error("Error parsing Env Variables: {0}")]
    InvalidEnvironment(#[source] serde_json::Error),

    /// The resolved header text is not a string-to-string JSON object.
    #[error("Error parsing Headers. Check JSON format: {0}")]
    InvalidHeaders(#[source] serde_json::Error),

    /// The resolved query-parameter text is not a string-to-string JSON object.
    #[error("Error parsing Query Params. Check JSON format: {0}")]
    InvalidQueryParams(#[source] serde_json::Error),

    /// The resolved URL could not be parsed.
    #[error("Invalid URL format: {url} ({source})")]
    InvalidUrl {
        /// URL after placeholder resolution
        url: String,
        /// Parser failure
        #[source]
        source: url::ParseError,
    },

    /// The declared method is not one of the supported tokens.
    #[error("Request Method is set incorrectly: {0:?}")]
    UnsupportedMethod(String),

    /// The GraphQL envelope could not be serialized.
    #[error("Error encoding GraphQL request: {0}")]
    GraphQL(#[source] serde_json::Error),
}
