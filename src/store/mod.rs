//! Persistent store for saved requests and environment variables.
//!
//! One JSON document holds the environment text and the list of saved
//! definitions:
//!
//! ```json
//! {
//!   "variables": "{\"host\": \"http://localhost:8080\"}",
//!   "requests": [
//!     {"id": "...", "name": "...", "url": "...", "method": "GET",
//!      "headers": "{}", "body": "", "queryParams": "", "response": ""}
//!   ]
//! }
//! ```

pub mod models;
pub mod storage;

pub use models::{SavedDocument, StoreError, EMPTY_ENVIRONMENT};
pub use storage::{validate_environment, RequestStore};
