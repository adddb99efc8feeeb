//! Controllers: request-level orchestration between handlers and storage

pub mod plan_controller;
pub mod route_controller;
pub mod template_controller;
