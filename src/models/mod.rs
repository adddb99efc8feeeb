//! Domain models
//!
//! Routes, plans, trip templates, users and the difficulty lookup table.

pub mod difficulty;
pub mod plan;
pub mod route;
pub mod template;
pub mod user;
