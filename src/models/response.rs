//! Execution result models.
//!
//! Every send produces an [`ExecutionResult`], whether the exchange completed,
//! failed on the wire, or never left the machine because the definition was
//! malformed. The [`ErrorClass`] tells the caller which of those happened.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Category of failure attached to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    /// The exchange completed, whatever its status code.
    None,
    /// Malformed environment, headers, params, URL, or unsupported method.
    /// Nothing was sent.
    Configuration,
    /// Connection failure, timeout, or a fault while reading the body.
    Network,
    /// A lookup by id found nothing.
    NotFound,
    /// A persisted write was rejected.
    Validation,
    /// The backing file could not be read or written.
    Storage,
}

impl ErrorClass {
    /// Short user-facing label for this class.
    ///
    /// Empty for [`ErrorClass::None`].
    pub fn label(&self) -> &'static str {
        match self {
            ErrorClass::None => "",
            ErrorClass::Configuration => "Configuration Error",
            ErrorClass::Network => "Network Error",
            ErrorClass::NotFound => "Not Found",
            ErrorClass::Validation => "Validation Error",
            ErrorClass::Storage => "Storage Error",
        }
    }

    /// Returns true if this class reports a failure.
    pub fn is_error(&self) -> bool {
        !matches!(self, ErrorClass::None)
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized outcome of sending one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Response payload on success, fault description otherwise.
    pub body: String,

    /// Status line such as `200 OK`. Empty when no response was received.
    pub status: String,

    /// What kind of failure occurred, if any.
    pub error_class: ErrorClass,

    /// Response headers. Empty when no response was received.
    pub headers: HashMap<String, String>,

    /// Wall-clock time spent on the exchange.
    pub duration: Duration,
}

impl ExecutionResult {
    /// Creates a result for a completed exchange.
    pub fn completed(status: String, headers: HashMap<String, String>, body: String) -> Self {
        Self {
            body,
            status,
            error_class: ErrorClass::None,
            headers,
            duration: Duration::ZERO,
        }
    }

    /// Creates a failed result carrying `message` as its body.
    pub fn failed(error_class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            body: message.into(),
            status: String::new(),
            error_class,
            headers: HashMap::new(),
            duration: Duration::ZERO,
        }
    }

    /// Sets the elapsed time.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Returns true if the exchange completed.
    ///
    /// A 4xx or 5xx response still counts as completed.
    pub fn is_completed(&self) -> bool {
        !self.error_class.is_error()
    }

    /// Text to show in a status slot: the status line, or the error label.
    pub fn status_label(&self) -> &str {
        if self.error_class.is_error() {
            self.error_class.label()
        } else {
            &self.status
        }
    }
}

/// Formats a status line the way HTTP/1.1 servers write it, e.g. `404 Not Found`.
pub fn status_line(code: u16, reason: Option<&str>) -> String {
    match reason {
        Some(reason) if !reason.is_empty() => format!("{} {}", code, reason),
        _ => code.to_string(),
    }
}
