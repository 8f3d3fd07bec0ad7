//! JSON-file backend for the lead store.
//!
//! A single `db.json` holds the whole collection; every mutation is a full
//! read-modify-write with an atomic replace (write to a sibling temp file,
//! then rename).

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;

#[cfg(test)]
mod tests;
