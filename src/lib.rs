//! Gostman request engine
//!
//! The core behind the Gostman API client: it resolves `{{placeholders}}`
//! against the saved environment, builds a transport-ready request per HTTP
//! verb, sends it, and normalizes the outcome. It also owns the JSON document
//! holding saved requests and environment variables, which stays consistent
//! under concurrent updates.
//!
//! # Architecture
//!
//! - **variables**: placeholder resolution against an environment map
//! - **builder**: turns a saved definition into an outbound request
//! - **graphql**: JSON envelope for `GRAPHQL` definitions
//! - **executor**: sends a request with reqwest and normalizes the result
//! - **store**: file-backed saved requests and environment
//! - **commands**: the facade front ends call
//! - **proxy**: request/response marshalling for browser relays
//! - **config**: engine settings
//! - **models**: shared data types
//!
//! # Flow
//!
//! 1. A front end hands a [`models::RequestDefinition`] to [`commands::Commands::send`]
//! 2. The saved environment text is read from the [`store::RequestStore`]
//! 3. [`builder::build_request`] resolves placeholders and composes the request
//! 4. [`executor::execute`] performs the call under a ceiling timeout
//! 5. An [`models::ExecutionResult`] comes back for display
//!
//! # Example
//!
//! ```no_run
//! use gostman::commands::Commands;
//! use gostman::executor::ExecutionConfig;
//! use gostman::models::RequestDefinition;
//! use gostman::store::RequestStore;
//!
//! # async fn example() {
//! let commands = Commands::new(RequestStore::new("gostman.json"), ExecutionConfig::default());
//! commands.save_environment(r#"{"base": "https://api.example.com"}"#);
//!
//! let definition = RequestDefinition::new("users", "GET", "{{base}}/users");
//! let result = commands.send(&definition).await;
//! println!("{}\n{}", result.status_label(), result.body);
//! # }
//! ```

pub mod builder;
pub mod commands;
pub mod config;
pub mod executor;
pub mod graphql;
pub mod models;
pub mod proxy;
pub mod store;
pub mod variables;
