/// Error handling for the API server
///
/// A unified error type that maps to HTTP responses. All handlers return
/// `Result<T, ApiError>`, which converts to the appropriate status code with
/// a `{"error": <message>}` JSON body — the only error shape the API emits.
///
/// Internal failures are logged server-side and surface to the client as a
/// generic message with no detail.
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::json;
///
/// async fn handler() -> ApiResult<Json<serde_json::Value>> {
///     Err(ApiError::NotFound("Tarefa não encontrada".to_string()))
/// }
/// ```

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use taskdeck_shared::auth::{jwt::JwtError, middleware::AuthError, password::PasswordError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Generic message for failures whose detail must not reach the client
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno do servidor";

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400) - malformed or invalid payload
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unauthorized (401) - missing or invalid credential
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Not found (404) - resource absent or not owned by the caller
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (409) - uniqueness violation, e.g. duplicate email
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error (500) - detail logged, never sent to clients
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body: `{"error": <message>}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// A unique-constraint violation on the users email column is the
/// second line of defense behind the register route's pre-check; it
/// surfaces as the same conflict outcome. Everything else is internal.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email já cadastrado".to_string());
                    }
                }
                ApiError::Internal(format!("Database error: {}", err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert request-authentication errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthorized(err.message().to_string())
    }
}

/// Convert password hashing errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert token creation errors to API errors
///
/// Issuance only fails on server-side problems; validation failures never
/// travel this path (the authenticator maps them itself).
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::Internal(format!("Token operation failed: {}", err))
    }
}

/// Convert JSON extractor rejections to API errors
///
/// Any body that fails to parse as the expected JSON shape produces the
/// same stable 400 message.
impl From<JsonRejection> for ApiError {
    fn from(_: JsonRejection) -> Self {
        ApiError::BadRequest("Body inválido. Envie um JSON válido.".to_string())
    }
}
