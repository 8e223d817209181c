//! API middleware

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::auth::{validate_token, CurrentUser};
use crate::error::ApiError;
use crate::AppState;

/// Authentication middleware
///
/// Validates the bearer token and inserts a [`CurrentUser`] into the request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            warn!("Missing or invalid Authorization header");
            ApiError::Unauthorized
        })?;

    let user = validate_token(token, &state.config.jwt_secret)
        .and_then(CurrentUser::try_from)
        .map_err(|e| {
            warn!(error = %e, "Token validation failed");
            ApiError::from(e)
        })?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Audit logging middleware
///
/// Logs every API request with the acting user
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let (user_id, role) = request
        .extensions()
        .get::<CurrentUser>()
        .map(|u| (u.user_id.to_string(), u.role.as_str()))
        .unwrap_or_else(|| ("anonymous".to_string(), "-"));

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user_id,
        role,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
