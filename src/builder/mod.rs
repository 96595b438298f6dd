//! Request builder.
//!
//! Turns a [`RequestDefinition`] plus the raw environment text into an
//! [`OutboundRequest`]. The pipeline is:
//!
//! 1. parse the environment into bindings,
//! 2. resolve placeholders in URL, headers, params and body (each on its own),
//! 3. parse headers,
//! 4. parse the declared method,
//! 5. parse the URL and merge query parameters into it (every verb),
//! 6. attach the body for body-carrying verbs,
//! 7. wrap GraphQL definitions into a JSON POST, reusing the same parameters
//!    as the operation variables.
//!
//! Any failure is a [`BuildError`] and nothing reaches the network.

pub mod error;
pub mod query;

pub use error::BuildError;
pub use query::merge_query;

use crate::graphql::{GraphQLRequest, GRAPHQL_CONTENT_TYPE};
use crate::models::{DeclaredMethod, HttpMethod, OutboundRequest, RequestDefinition};
use crate::variables::{parse_environment, placeholder_names, resolve};
use log::debug;
use std::collections::{BTreeMap, HashMap};
use url::Url;

/// Builds the outbound request for `definition` using `environment_text`.
///
/// The definition is only read; resolved values never flow back into it.
///
/// # Errors
///
/// Returns a [`BuildError`] when the environment, headers, query parameters
/// or URL are malformed, or when the method token is not supported.
///
/// # Example
///
/// ```
/// use gostman::builder::build_request;
/// use gostman::models::{HttpMethod, RequestDefinition};
///
/// let mut def = RequestDefinition::new("search", "GET", "{{host}}/search?z=2");
/// def.query_params = r#"{"q": "1"}"#.to_string();
///
/// let request = build_request(&def, r#"{"host": "http://x"}"#).unwrap();
/// assert_eq!(request.method, HttpMethod::GET);
/// assert_eq!(request.url.as_str(), "http://x/search?z=2&q=1");
/// assert!(request.body.is_none());
/// ```
pub fn build_request(
    definition: &RequestDefinition,
    environment_text: &str,
) -> Result<OutboundRequest, BuildError> {
    let variables = parse_environment(environment_text).map_err(BuildError::InvalidEnvironment)?;

    let url_text = resolve(definition.url.trim(), &variables);
    let headers_text = resolve(&definition.headers, &variables);
    let params_text = resolve(&definition.query_params, &variables);
    let body_text = resolve(&definition.body, &variables);

    let unresolved = placeholder_names(&url_text);
    if !unresolved.is_empty() {
        debug!("URL still has unresolved placeholders: {:?}", unresolved);
    }

    let headers = parse_string_map(&headers_text).map_err(BuildError::InvalidHeaders)?;

    let declared = DeclaredMethod::parse(&definition.method)
        .ok_or_else(|| BuildError::UnsupportedMethod(definition.method.clone()))?;

    let mut url = Url::parse(&url_text).map_err(|source| BuildError::InvalidUrl {
        url: url_text.clone(),
        source,
    })?;

    if !params_text.trim().is_empty() {
        let params: BTreeMap<String, String> =
            serde_json::from_str(&params_text).map_err(BuildError::InvalidQueryParams)?;
        merge_query(&mut url, &params);
    }

    let request = match declared {
        DeclaredMethod::Http(method) => build_http(method, url, headers, body_text),
        DeclaredMethod::GraphQL => build_graphql(url, headers, &params_text, &body_text)?,
    };

    debug!(
        "Built {} {} ({} headers, body: {})",
        request.method,
        request.url,
        request.headers.len(),
        request.has_body()
    );

    Ok(request)
}

fn build_http(
    method: HttpMethod,
    url: Url,
    headers: HashMap<String, String>,
    body_text: String,
) -> OutboundRequest {
    let body = if method.sends_body() && !body_text.is_empty() {
        Some(body_text)
    } else {
        None
    };

    OutboundRequest {
        method,
        url,
        headers,
        body,
    }
}

fn build_graphql(
    url: Url,
    headers: HashMap<String, String>,
    variables_text: &str,
    query: &str,
) -> Result<OutboundRequest, BuildError> {
    let envelope = GraphQLRequest::from_parts(query, variables_text);
    debug!("GraphQL envelope (variables: {})", envelope.has_variables());
    let body = envelope.to_json().map_err(BuildError::GraphQL)?;

    let mut request = OutboundRequest {
        method: HttpMethod::POST,
        url,
        headers,
        body: Some(body),
    };
    if request.content_type().is_none() {
        request
            .headers
            .insert("Content-Type".to_string(), GRAPHQL_CONTENT_TYPE.to_string());
    }
    Ok(request)
}

/// Parses JSON-object text into a string map. Blank text is an empty map.
fn parse_string_map(text: &str) -> Result<HashMap<String, String>, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_json::from_str(text)
}
