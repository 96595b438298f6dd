//! Variables module for the request engine
//!
//! This module provides placeholder substitution for request definitions.
//! Environments are kept as raw JSON-object text and only parsed into a
//! map right before substitution.

pub mod substitution;

pub use substitution::{parse_environment, placeholder_names, resolve, Variables};
