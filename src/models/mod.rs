//! Data models for request definitions, outbound requests, and results.
//!
//! This module contains the core data structures shared by the builder, the
//! executor, and the store.

pub mod request;
pub mod response;

pub use request::{DeclaredMethod, HttpMethod, OutboundRequest, RequestDefinition};
pub use response::{ErrorClass, ExecutionResult};
