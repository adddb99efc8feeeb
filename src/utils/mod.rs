//! Shared utilities: error types, extractors, JWT handling and validation helpers.

pub mod errors;
pub mod extract;
pub mod jwt;
pub mod validation;
