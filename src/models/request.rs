//! Request data models.
//!
//! A [`RequestDefinition`] is what the user edits and what the store persists:
//! every field is raw text, including the JSON-encoded headers and query
//! parameters. An [`OutboundRequest`] is what the builder produces from it once
//! placeholders are resolved and the nested JSON has been parsed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// HTTP method sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to create a resource
    POST,
    /// HTTP PUT method - replace a resource
    PUT,
    /// HTTP DELETE method - remove a resource
    DELETE,
    /// HTTP PATCH method - partially modify a resource
    PATCH,
    /// HTTP HEAD method - retrieve headers only
    HEAD,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
        }
    }

    /// Parses a method token, ignoring case and surrounding whitespace.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "PATCH" => Some(HttpMethod::PATCH),
            "HEAD" => Some(HttpMethod::HEAD),
            _ => None,
        }
    }

    /// Whether a request body is attached for this method.
    ///
    /// GET, HEAD and DELETE never carry a body, whatever the definition holds.
    pub fn sends_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT | HttpMethod::PATCH)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Method as declared on a request definition.
///
/// `GRAPHQL` is not an HTTP verb: the builder turns it into a POST with a
/// JSON envelope around the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredMethod {
    /// A plain HTTP verb, sent as is
    Http(HttpMethod),
    /// GraphQL convenience mode
    GraphQL,
}

impl DeclaredMethod {
    /// Parses the method token stored on a definition.
    ///
    /// # Returns
    ///
    /// `None` for any token other than the six HTTP verbs and `GRAPHQL`.
    pub fn parse(token: &str) -> Option<Self> {
        if token.trim().eq_ignore_ascii_case("GRAPHQL") {
            return Some(DeclaredMethod::GraphQL);
        }
        HttpMethod::parse(token).map(DeclaredMethod::Http)
    }
}

/// A saved (or not yet saved) request as authored by the user.
///
/// Field names on disk follow the document format shared with the desktop
/// and terminal front ends, hence `queryParams` and `response`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDefinition {
    /// Unique identifier, or empty while the definition has never been saved.
    pub id: String,

    /// Display name.
    pub name: String,

    /// URL template, may contain `{{placeholders}}`.
    pub url: String,

    /// Declared method token (GET, POST, PUT, DELETE, HEAD, PATCH, GRAPHQL).
    pub method: String,

    /// Headers as JSON-object text.
    pub headers: String,

    /// Raw body text. For GRAPHQL this is the query document.
    pub body: String,

    /// Query parameters as JSON-object text. For GRAPHQL these are the
    /// operation variables.
    #[serde(rename = "queryParams")]
    pub query_params: String,

    /// Body of the last response received for this definition.
    pub response: String,
}

impl RequestDefinition {
    /// Creates an unsaved definition with empty headers and parameters.
    pub fn new(name: impl Into<String>, method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            url: url.into(),
            method: method.into(),
            headers: "{}".to_string(),
            body: String::new(),
            query_params: String::new(),
            response: String::new(),
        }
    }

    /// Whether this definition has been assigned an id by the store.
    pub fn is_saved(&self) -> bool {
        !self.id.is_empty()
    }
}

/// A transport-ready request produced by the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP method sent on the wire.
    pub method: HttpMethod,

    /// Final URL with resolved placeholders and merged query parameters.
    pub url: Url,

    /// Request headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Request body, only present for body-carrying methods.
    pub body: Option<String>,
}

impl OutboundRequest {
    /// Creates a new request with no headers and no body.
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Gets the Content-Type header value if present.
    ///
    /// Header names are compared case-insensitively.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|b| !b.is_empty())
    }
}
