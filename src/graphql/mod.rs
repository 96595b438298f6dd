//! GraphQL support.
//!
//! A definition declared as `GRAPHQL` carries the query document in its body
//! and the operation variables in its query-parameter field. On the wire it
//! becomes a POST whose JSON body follows the GraphQL over HTTP convention:
//!
//! ```json
//! {"query": "query { ping }", "variables": {"id": "1"}}
//! ```
//!
//! `variables` is omitted when the parameter text is blank or is not a JSON
//! object.

use serde::{Deserialize, Serialize};

/// Content type applied to GraphQL requests that do not set one.
pub const GRAPHQL_CONTENT_TYPE: &str = "application/json";

/// A GraphQL request envelope ready for HTTP transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLRequest {
    /// The GraphQL query or mutation document.
    pub query: String,

    /// Variables as a JSON object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GraphQLRequest {
    /// Builds an envelope from a query and raw variables text.
    ///
    /// Variables that are blank, malformed, or not a JSON object are dropped
    /// rather than rejected.
    pub fn from_parts(query: &str, variables_text: &str) -> Self {
        let variables = match serde_json::from_str::<serde_json::Value>(variables_text) {
            Ok(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        };
        Self {
            query: query.to_string(),
            variables,
        }
    }

    /// Checks if this request has variables.
    pub fn has_variables(&self) -> bool {
        self.variables.is_some()
    }

    /// Converts this request to a compact JSON string for HTTP transport.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
