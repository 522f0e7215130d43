use std::sync::Arc;

use auth::Authenticator;
use auth::JwtError;
use auth::TokenCodec;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::authentication::models::Identity;
use crate::inbound::http::handlers::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of checking a request's credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Path bypasses the gate.
    Exempt,
    /// No usable bearer credential; the request continues without identity.
    Unauthenticated,
    Authenticated(Identity),
    Rejected(GateRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    TokenExpired,
    /// Not shaped like a JWT at all.
    MalformedToken,
    InvalidToken,
}

impl GateRejection {
    pub fn reason(self) -> &'static str {
        match self {
            GateRejection::TokenExpired => "Token expired",
            GateRejection::MalformedToken => "Invalid token format",
            GateRejection::InvalidToken => "Invalid token",
        }
    }
}

/// Registration and everything under `/api/auth` skip the gate.
pub fn is_exempt(path: &str) -> bool {
    path == "/api/users/register" || path == "/api/auth" || path.starts_with("/api/auth/")
}

/// Token carried by an `Authorization: Bearer <token>` header.
fn bearer_token(header: Option<&HeaderValue>) -> Option<&str> {
    header?.to_str().ok()?.strip_prefix(BEARER_PREFIX)
}

/// Decide what the gate does with a request.
pub fn evaluate(path: &str, header: Option<&HeaderValue>, codec: &TokenCodec) -> GateState {
    if is_exempt(path) {
        return GateState::Exempt;
    }

    let Some(token) = bearer_token(header) else {
        return GateState::Unauthenticated;
    };

    match codec.verify(token) {
        Ok(subject) => GateState::Authenticated(Identity::new(subject)),
        Err(JwtError::TokenExpired) => GateState::Rejected(GateRejection::TokenExpired),
        Err(JwtError::MalformedToken(_)) => GateState::Rejected(GateRejection::MalformedToken),
        Err(_) => GateState::Rejected(GateRejection::InvalidToken),
    }
}

/// Middleware verifying bearer tokens once per request.
///
/// A verified identity is stored in the request extensions unless one is
/// already present. Rejected requests never reach a handler.
pub async fn gate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let state = evaluate(
        req.uri().path(),
        req.headers().get(AUTHORIZATION),
        authenticator.token_codec(),
    );

    match state {
        GateState::Exempt | GateState::Unauthenticated => {}
        GateState::Authenticated(identity) => {
            if req.extensions().get::<Identity>().is_none() {
                req.extensions_mut().insert(identity);
            }
        }
        GateState::Rejected(rejection) => {
            tracing::warn!(
                path = %req.uri().path(),
                reason = rejection.reason(),
                "Rejected request credentials"
            );
            return Err(ApiError::Unauthorized(rejection.reason().to_string()));
        }
    }

    Ok(next.run(req).await)
}

/// Extractor for the identity attached by [`gate`].
///
/// Rejects with 401 when the request carried no valid token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::atomic::Ordering;

    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::middleware;
    use axum::routing::get;
    use axum::routing::post;
    use axum::Router;
    use chrono::Duration;
    use tower::ServiceExt;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator(ttl: Duration) -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, ttl))
    }

    fn header(value: &str) -> HeaderValue {
        HeaderValue::from_str(value).unwrap()
    }

    async fn whoami(Authenticated(identity): Authenticated) -> String {
        identity.subject().to_string()
    }

    async fn preset_identity(mut req: Request, next: Next) -> Response {
        req.extensions_mut().insert(Identity::new("preset"));
        next.run(req).await
    }

    fn app(authenticator: Arc<Authenticator>) -> Router {
        Router::new()
            .route("/api/users", get(whoami))
            .route("/api/users/register", post(|| async { StatusCode::CREATED }))
            .layer(middleware::from_fn_with_state(authenticator, gate))
    }

    fn request(method: &str, uri: &str, authorization: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_exempt_paths() {
        assert!(is_exempt("/api/users/register"));
        assert!(is_exempt("/api/auth"));
        assert!(is_exempt("/api/auth/login"));
        assert!(is_exempt("/api/auth/register"));

        assert!(!is_exempt("/api/users/register/extra"));
        assert!(!is_exempt("/api/users/login"));
        assert!(!is_exempt("/api/authx"));
        assert!(!is_exempt("/api/users"));
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(Some(&header("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(Some(&header("Basic abc"))), None);
        assert_eq!(bearer_token(Some(&header("bearer abc"))), None);
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn test_evaluate() {
        let authenticator = authenticator(Duration::hours(1));
        let codec = authenticator.token_codec();
        let token = codec.issue("alice").unwrap();
        let valid = header(&format!("Bearer {}", token));

        assert_eq!(
            evaluate("/api/users", Some(&valid), codec),
            GateState::Authenticated(Identity::new("alice"))
        );
        assert_eq!(
            evaluate("/api/auth/login", Some(&header("Bearer junk")), codec),
            GateState::Exempt
        );
        assert_eq!(
            evaluate("/api/users", None, codec),
            GateState::Unauthenticated
        );
        assert_eq!(
            evaluate("/api/users", Some(&header("Token abc")), codec),
            GateState::Unauthenticated
        );
        assert_eq!(
            evaluate("/api/users", Some(&header("Bearer junk")), codec),
            GateState::Rejected(GateRejection::MalformedToken)
        );
    }

    #[test]
    fn test_evaluate_foreign_signature() {
        let authenticator = authenticator(Duration::hours(1));
        let foreign = TokenCodec::new(b"another_secret_key_at_least_32_bytes", Duration::hours(1));
        let token = foreign.issue("alice").unwrap();

        assert_eq!(
            evaluate(
                "/api/users",
                Some(&header(&format!("Bearer {}", token))),
                authenticator.token_codec()
            ),
            GateState::Rejected(GateRejection::InvalidToken)
        );
    }

    #[tokio::test]
    async fn test_malformed_and_forged_tokens_have_distinct_reasons() {
        let authenticator = authenticator(Duration::hours(1));
        let forged = TokenCodec::new(b"another_secret_key_at_least_32_bytes", Duration::hours(1))
            .issue("alice")
            .unwrap();

        let response = app(Arc::clone(&authenticator))
            .oneshot(request("GET", "/api/users", Some("Bearer junk")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Invalid token format"));

        let response = app(authenticator)
            .oneshot(request("GET", "/api/users", Some(&format!("Bearer {}", forged))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_text(response).await;
        assert!(body.contains("Invalid token"));
        assert!(!body.contains("Invalid token format"));
    }

    #[test]
    fn test_evaluate_expired_token() {
        let authenticator = authenticator(Duration::zero());
        let codec = authenticator.token_codec();
        let token = codec.issue("alice").unwrap();

        assert_eq!(
            evaluate(
                "/api/users",
                Some(&header(&format!("Bearer {}", token))),
                codec
            ),
            GateState::Rejected(GateRejection::TokenExpired)
        );
    }

    #[tokio::test]
    async fn test_expired_token_never_reaches_handler() {
        let authenticator = authenticator(Duration::zero());
        let token = authenticator.generate_token("alice").unwrap();

        let ran = Arc::new(AtomicBool::new(false));
        let handler_ran = Arc::clone(&ran);
        let app = Router::new()
            .route(
                "/api/users",
                get(move || {
                    let handler_ran = Arc::clone(&handler_ran);
                    async move {
                        handler_ran.store(true, Ordering::SeqCst);
                        StatusCode::OK
                    }
                }),
            )
            .layer(middleware::from_fn_with_state(authenticator, gate));

        let response = app
            .oneshot(request("GET", "/api/users", Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Token expired"));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_registration_ignores_bad_header() {
        let app = app(authenticator(Duration::hours(1)));

        let response = app
            .oneshot(request(
                "POST",
                "/api/users/register",
                Some("Bearer not-a-token"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_valid_token_attaches_identity() {
        let authenticator = authenticator(Duration::hours(1));
        let token = authenticator.generate_token("alice").unwrap();
        let app = app(authenticator);

        let response = app
            .oneshot(request("GET", "/api/users", Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "alice");
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let app = app(authenticator(Duration::hours(1)));

        let response = app
            .oneshot(request("GET", "/api/users", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response)
            .await
            .contains("Authentication required"));
    }

    #[tokio::test]
    async fn test_existing_identity_is_kept() {
        let authenticator = authenticator(Duration::hours(1));
        let token = authenticator.generate_token("alice").unwrap();
        let app = app(authenticator).layer(middleware::from_fn(preset_identity));

        let response = app
            .oneshot(request("GET", "/api/users", Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "preset");
    }
}
