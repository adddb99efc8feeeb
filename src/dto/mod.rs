pub mod api_response;
pub mod plan_dto;
pub mod route_dto;
pub mod template_dto;

pub use api_response::ApiResponse;
