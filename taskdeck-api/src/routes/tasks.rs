/// Owner-scoped task CRUD endpoints
///
/// # Endpoints
///
/// - `GET /tasks` - List the caller's tasks, newest first
/// - `POST /tasks` - Create a task owned by the caller
/// - `PUT /tasks/:id` - Partially update an owned task
/// - `DELETE /tasks/:id` - Hard-delete an owned task
///
/// All routes sit behind the bearer-auth middleware; handlers read the
/// resolved identity from [`AuthContext`]. A task owned by another user is
/// reported as 404, never 403, so the existence of other users' tasks is
/// not confirmed.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    validation::{validate_payload, CreateTaskRequest, UpdateTaskRequest},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use taskdeck_shared::{auth::middleware::AuthContext, models::task::Task};

const TASK_NOT_FOUND: &str = "Tarefa não encontrada";
const INVALID_TASK_ID: &str = "ID da tarefa inválido";

/// Response wrapping a list of tasks
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    /// All tasks owned by the caller, newest-created-first
    pub tasks: Vec<Task>,
}

/// Response wrapping a single task
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    /// The task
    pub task: Task,
}

/// Response for a successful delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Confirmation message
    pub message: String,
}

/// Parses the path id, rejecting anything that is not a number
fn parse_task_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest(INVALID_TASK_ID.to_string()))
}

/// List all tasks owned by the authenticated user
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// Authorization: Bearer <token>
/// ```
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TaskListResponse>> {
    let tasks = Task::list_by_user(&state.db, auth.user_id).await?;

    Ok(Json(TaskListResponse { tasks }))
}

/// Create a task owned by the authenticated user
///
/// Status defaults to `pending` when omitted.
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "title": "Buy milk" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: malformed body or failed validation
/// - `401 Unauthorized`: missing/invalid token
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let Json(req) = payload?;
    validate_payload(&req)?;

    let task = Task::create(&state.db, req.into_create_task(auth.user_id)).await?;

    tracing::debug!(task_id = task.id, user_id = auth.user_id, "task created");

    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

/// Partially update an owned task
///
/// Applies only the supplied subset of {title, description, status} and
/// refreshes `updated_at`. The ownership check runs first, so an empty
/// payload against someone else's task still reports 404.
///
/// # Endpoint
///
/// ```text
/// PUT /tasks/42
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "status": "completed" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: invalid id, malformed body, failed validation, or
///   no fields to update
/// - `401 Unauthorized`: missing/invalid token
/// - `404 Not Found`: task absent or owned by another user
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = parse_task_id(&id)?;

    let Json(req) = payload?;
    validate_payload(&req)?;

    if Task::find_owned(&state.db, auth.user_id, task_id).await?.is_none() {
        return Err(ApiError::NotFound(TASK_NOT_FOUND.to_string()));
    }

    if req.is_empty() {
        return Err(ApiError::BadRequest("Nenhum campo para atualizar".to_string()));
    }

    // A concurrent delete between the check and the write lands here as 404
    let task = Task::update_owned(&state.db, auth.user_id, task_id, req.into_update_task())
        .await?
        .ok_or_else(|| ApiError::NotFound(TASK_NOT_FOUND.to_string()))?;

    Ok(Json(TaskResponse { task }))
}

/// Hard-delete an owned task
///
/// Deleting the same task twice yields 200 then 404.
///
/// # Endpoint
///
/// ```text
/// DELETE /tasks/42
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: invalid id
/// - `401 Unauthorized`: missing/invalid token
/// - `404 Not Found`: task absent or owned by another user
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let task_id = parse_task_id(&id)?;

    let deleted = Task::delete_owned(&state.db, auth.user_id, task_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(TASK_NOT_FOUND.to_string()));
    }

    tracing::debug!(task_id, user_id = auth.user_id, "task deleted");

    Ok(Json(DeleteResponse {
        message: "Tarefa deletada com sucesso".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_id() {
        assert_eq!(parse_task_id("42").unwrap(), 42);

        assert!(matches!(
            parse_task_id("abc"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(matches!(parse_task_id(""), Err(ApiError::BadRequest(_))));
        assert!(matches!(
            parse_task_id("1.5"),
            Err(ApiError::BadRequest(_))
        ));
    }
}
