//! Bearer-token authentication
//!
//! Verifies the JWT on every protected request, maps the `email` claim to
//! a local user (created on first sight) and injects `AuthenticatedUser`
//! into the request extensions.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token},
        validation::non_blank,
    },
};

/// User resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;

    let email = non_blank(claims.email.as_deref())
        .ok_or_else(|| AppError::Unauthorized("Token carries no email claim".to_string()))?
        .to_lowercase();

    let user = state.users.find_or_create_by_email(&email).await?;
    tracing::debug!(user_id = %user.id, subject = %claims.sub, "request authenticated");

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id: user.id });

    Ok(next.run(request).await)
}
