/// Typed, schema-validated request payloads
///
/// One struct per inbound payload shape (registration, login, task create,
/// task update), each deriving `validator::Validate`. Checks are pure and
/// synchronous: a payload either normalizes into its typed form or yields
/// the first failing rule's message, which becomes the 400 body.
///
/// The status field needs no rule of its own — deserializing into
/// [`TaskStatus`] already rejects anything outside the closed enumeration.
///
/// # Rules
///
/// - Registration: name >= 2 chars; well-formed email; password >= 8 chars
///   containing at least one uppercase letter, one lowercase letter, and
///   one digit
/// - Login: well-formed email; non-empty password
/// - Task create: title 1-255 chars; optional description; optional status
/// - Task update: same field rules, every field optional; the empty payload
///   is a downstream error, not a validation error

use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use taskdeck_shared::models::task::{CreateTask, TaskStatus, UpdateTask};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ApiError;

/// Registration payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 2, message = "Nome deve ter pelo menos 2 caracteres"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    /// Plaintext password (hashed before it ever reaches the store)
    #[validate(
        length(min = 8, message = "Senha deve ter pelo menos 8 caracteres"),
        custom(function = password_composition)
    )]
    pub password: String,
}

/// Login payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    /// Plaintext password
    #[validate(length(min = 1, message = "Senha é obrigatória"))]
    pub password: String,
}

/// Task creation payload
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Title (1-255 characters)
    #[validate(custom(function = validate_title))]
    pub title: String,

    /// Optional free-text description
    #[serde(default, deserialize_with = "present_or_absent")]
    pub description: Option<String>,

    /// Optional status; omitted means `pending`
    #[serde(default, deserialize_with = "present_or_absent")]
    pub status: Option<TaskStatus>,
}

impl CreateTaskRequest {
    /// Normalizes into the store's input type for the given owner
    ///
    /// An empty-string description is stored as NULL.
    pub fn into_create_task(self, user_id: i64) -> CreateTask {
        CreateTask {
            user_id,
            title: self.title,
            description: self.description.filter(|d| !d.is_empty()),
            status: self.status,
        }
    }
}

/// Task update payload - every field optional
///
/// Fields may be omitted but never explicitly `null`; a null value fails
/// deserialization and produces the generic malformed-body 400.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title (1-255 characters)
    #[serde(default, deserialize_with = "present_or_absent")]
    #[validate(custom(function = validate_title))]
    pub title: Option<String>,

    /// New description; an empty string clears it to NULL
    #[serde(default, deserialize_with = "present_or_absent")]
    pub description: Option<String>,

    /// New status
    #[serde(default, deserialize_with = "present_or_absent")]
    pub status: Option<TaskStatus>,
}

impl UpdateTaskRequest {
    /// True when the payload carries no field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// Normalizes into the store's partial-update type
    pub fn into_update_task(self) -> UpdateTask {
        UpdateTask {
            title: self.title,
            description: self
                .description
                .map(|d| if d.is_empty() { None } else { Some(d) }),
            status: self.status,
        }
    }
}

/// Deserializes an optional field that may be absent but never `null`
///
/// `Option<T>` on its own accepts `null` as `None`, which would make an
/// explicit `"description": null` indistinguishable from an omitted field.
fn present_or_absent<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Runs a payload's schema checks, surfacing the first error as a 400
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::BadRequest(first_error_message(&e)))
}

/// Fields in payload-schema order, so the surfaced message is deterministic
/// when several fields fail at once
const FIELD_ORDER: [&str; 6] = ["name", "email", "password", "title", "description", "status"];

/// Extracts the first failing rule's message, in schema field order
fn first_error_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(field))
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Dados inválidos".to_string())
}

/// Password must contain at least one uppercase letter, one lowercase
/// letter, and one digit
fn password_composition(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("password_composition").with_message(Cow::Borrowed(
            "Senha deve conter pelo menos uma letra maiúscula, uma minúscula e um número",
        )))
    }
}

/// Title must be non-empty and at most 255 characters
fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::new("title_required")
            .with_message(Cow::Borrowed("Título é obrigatório")));
    }
    if title.chars().count() > 255 {
        return Err(
            ValidationError::new("title_too_long").with_message(Cow::Borrowed("Título muito longo"))
        );
    }
    Ok(())
}
