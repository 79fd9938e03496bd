/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/register` - Register a new user
/// - `POST /auth/login` - Authenticate and receive an identity token
///
/// Login deliberately returns the identical `"Email ou senha inválidos"`
/// rejection whether the email is unknown or the password is wrong, so a
/// caller can never learn which emails are registered.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    validation::{validate_payload, LoginRequest, RegisterRequest},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use taskdeck_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User, UserSummary},
};

/// Stable rejection for both unknown email and wrong password
const INVALID_CREDENTIALS: &str = "Email ou senha inválidos";

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: String,

    /// The created user (id, name, email only)
    pub user: UserSummary,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed identity token
    pub token: String,

    /// The authenticated user (id, name, email only)
    pub user: UserSummary,
}

/// Register a new user
///
/// Validates the payload, checks the email is unused, hashes the password,
/// and persists the user. A concurrent registration racing past the check
/// is caught by the database unique constraint and surfaces as the same
/// 409 conflict.
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// { "name": "Ana", "email": "ana@x.com", "password": "Abcdef12" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: malformed body or failed validation
/// - `409 Conflict`: email already registered
/// - `500 Internal Server Error`: storage failure
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(req) = payload?;
    validate_payload(&req)?;

    if User::email_exists(&state.db, &req.email).await? {
        return Err(ApiError::Conflict("Email já cadastrado".to_string()));
    }

    let password_hash =
        password::hash_password_with_cost(&req.password, state.config.auth.hash_time_cost)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Usuário criado com sucesso".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// Login and obtain an identity token
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// { "email": "ana@x.com", "password": "Abcdef12" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: malformed body or failed validation
/// - `401 Unauthorized`: unknown email or wrong password (indistinguishable)
/// - `500 Internal Server Error`: storage or signing failure
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    validate_payload(&req)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let claims = jwt::Claims::new(user.id, user.email.clone(), state.token_lifetime());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(LoginResponse {
        token,
        user: UserSummary::from(&user),
    }))
}
