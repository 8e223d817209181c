//! HTTP API Layer
//!
//! This crate provides the REST API for lecturer claims using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for claims, dashboards and health
//! - **Middleware**: Authentication, tracing, audit logging
//! - **Policy**: Role table deciding which role may perform which action
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(service), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;
pub mod policy;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimLifecycleService;

use crate::config::ApiConfig;
use crate::handlers::{claims, dashboard, health};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClaimLifecycleService>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Claim lifecycle service wired to its adapters
/// * `config` - API configuration
pub fn create_router(service: Arc<ClaimLifecycleService>, config: ApiConfig) -> Router {
    let body_limit = config.max_body_bytes;
    let state = AppState { service, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", get(claims::index).post(claims::create))
        .route("/:id", get(claims::view_details))
        .route("/:id/verify", post(claims::verify))
        .route("/:id/approve", post(claims::approve))
        .route("/:id/reject", post(claims::reject));

    let dashboard_routes = Router::new()
        .route("/coordinator", get(dashboard::coordinator_dashboard))
        .route("/manager", get(dashboard::manager_dashboard));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/dashboard", dashboard_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
