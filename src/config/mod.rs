//! Service configuration: environment variables and database settings.

pub mod database;
pub mod environment;

pub use environment::*;
