//! HTTP routers, one per resource

pub mod plan_routes;
pub mod route_routes;
pub mod template_routes;
