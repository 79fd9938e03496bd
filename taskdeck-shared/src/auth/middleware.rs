/// Bearer-token request authentication for Axum
///
/// This module resolves the `Authorization: Bearer <token>` header of an
/// incoming request to a user identity. On success an [`AuthContext`] is
/// inserted into the request extensions for handlers to extract; no database
/// lookup happens here — the token's embedded claims are trusted, and the
/// store re-validates ownership against current task records.
///
/// # Failure modes
///
/// Only two rejections exist, both 401:
///
/// - missing credential: header absent, not `Bearer `-prefixed, or an empty
///   token after the scheme
/// - invalid credential: expired, tampered, or otherwise unverifiable token
///
/// Expired and forged tokens deliberately produce the same message so a
/// caller cannot probe which one it was.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use taskdeck_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("user {} ({})", auth.user_id, auth.email)
/// }
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::jwt::validate_token;

/// Scheme prefix required on the authorization header
const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated identity resolved from a bearer token
///
/// Added to the request extensions after successful authentication.
/// Handlers extract it with Axum's `Extension` extractor.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authenticated user ID (the token's `sub` claim)
    pub user_id: i64,

    /// Email embedded in the token at issuance time
    pub email: String,
}

/// Error type for request authentication
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization header absent, malformed, or carrying an empty token
    MissingCredentials,

    /// Token failed validation (expired, tampered, or unverifiable)
    InvalidToken,
}

impl AuthError {
    /// Stable client-facing message for this rejection
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "Token de autenticação não fornecido",
            AuthError::InvalidToken => "Token inválido ou expirado",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": self.message() })),
        )
            .into_response()
    }
}

/// Resolves the bearer token in `headers` to an [`AuthContext`]
///
/// Pure with respect to the request: reads the authorization header,
/// delegates validation to the token service, and never touches the
/// database.
///
/// # Errors
///
/// - [`AuthError::MissingCredentials`] if the header is absent, does not
///   start with the literal `Bearer ` scheme, or the token part is empty
/// - [`AuthError::InvalidToken`] if token validation fails for any reason
pub fn authenticate_request(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MissingCredentials)?;

    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    // Expiry and forgery collapse into the same rejection on purpose; the
    // typed distinction stays available in logs
    let claims = validate_token(token, secret).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        AuthError::InvalidToken
    })?;

    Ok(AuthContext {
        user_id: claims.sub,
        email: claims.email,
    })
}

/// Axum middleware that authenticates the request and injects [`AuthContext`]
///
/// Layer this onto any router whose routes require an authenticated owner:
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use taskdeck_shared::auth::middleware::bearer_auth;
///
/// let secret = "secret-key-at-least-32-bytes-long!!!".to_string();
/// let app: Router = Router::new()
///     .route("/tasks", get(|| async { "tasks" }))
///     .layer(middleware::from_fn(move |req, next| {
///         bearer_auth(secret.clone(), req, next)
///     }));
/// ```
pub async fn bearer_auth(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let context = authenticate_request(req.headers(), &secret)?;
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
