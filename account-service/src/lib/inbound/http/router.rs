use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header::InvalidHeaderValue;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::AllowHeaders;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_account::get_account;
use super::handlers::list_accounts::list_accounts;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_profile::update_profile;
use super::middleware::gate;
use crate::account::ports::AccountServicePort;
use crate::authentication::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub authenticator: Arc<Authenticator>,
}

#[derive(Debug, thiserror::Error)]
pub enum CorsError {
    #[error("Wildcard origin cannot be combined with credentials")]
    WildcardOrigin,

    #[error("Invalid origin {origin:?}: {source}")]
    InvalidOrigin {
        origin: String,
        source: InvalidHeaderValue,
    },
}

/// CORS policy for browser clients on the given origins.
///
/// Credentials are allowed, so every origin must be listed explicitly.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, CorsError> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            if origin.trim() == "*" {
                return Err(CorsError::WildcardOrigin);
            }
            HeaderValue::from_str(origin).map_err(|source| CorsError::InvalidOrigin {
                origin: origin.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let user_routes = Router::new()
        .route("/api/users", get(list_accounts))
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route(
            "/api/users/:username",
            get(get_account).patch(update_profile),
        );

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .merge(user_routes)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.authenticator),
            gate,
        ))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
