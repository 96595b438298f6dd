//! Proxy marshalling.
//!
//! Browser front ends cannot call arbitrary hosts, so they post a
//! [`ProxyRequest`] to a relay that forwards it and answers with a
//! [`ProxyResponse`]. Placeholders are already resolved by the caller, so the
//! posted request goes through the regular builder with an empty environment
//! and then through the executor.

use crate::builder::{build_request, BuildError};
use crate::executor::{execute, ExecutionConfig};
use crate::models::{OutboundRequest, RequestDefinition};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Status reported when nothing came back from the target.
pub const ERROR_STATUS: &str = "Error";

/// Request as posted by a browser front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyRequest {
    pub method: String,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Answer returned to the front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    /// Status line, or `"Error"` when the exchange failed.
    pub status: String,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    fn error(body: impl Into<String>) -> Self {
        Self {
            status: ERROR_STATUS.to_string(),
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Returns true if the exchange failed.
    pub fn is_error(&self) -> bool {
        self.status == ERROR_STATUS
    }
}

/// Converts a posted request into an outbound one.
///
/// Method, body and GraphQL rules are the builder's, so a proxied request is
/// shaped exactly like a sent saved one.
pub fn to_outbound(request: &ProxyRequest) -> Result<OutboundRequest, BuildError> {
    let mut definition = RequestDefinition::new("", request.method.as_str(), request.url.as_str());
    definition.headers =
        serde_json::to_string(&request.headers).map_err(BuildError::InvalidHeaders)?;
    definition.body = request.body.clone();

    build_request(&definition, "{}")
}

/// Forwards `request` and maps the outcome for the front end.
pub async fn forward(request: &ProxyRequest, config: &ExecutionConfig) -> ProxyResponse {
    let outbound = match to_outbound(request) {
        Ok(outbound) => outbound,
        Err(err) => {
            warn!("Rejected proxy request: {}", err);
            return ProxyResponse::error(format!("Failed to create request: {}", err));
        }
    };

    let result = execute(&outbound, config).await;
    if result.is_completed() {
        ProxyResponse {
            status: result.status,
            headers: result.headers,
            body: result.body,
        }
    } else {
        ProxyResponse::error(result.body)
    }
}

/// Decodes a posted JSON body, forwards it and encodes the answer.
///
/// # Errors
///
/// Returns the decoding error when `body` is not a valid [`ProxyRequest`].
pub async fn forward_json(
    body: &str,
    config: &ExecutionConfig,
) -> Result<String, serde_json::Error> {
    let request: ProxyRequest = serde_json::from_str(body)?;
    let response = forward(&request, config).await;
    serde_json::to_string(&response)
}
