//! Core types and trait definitions for the lead-intake service.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod lead;
pub mod status;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
