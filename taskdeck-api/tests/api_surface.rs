/// Integration tests for the API surface
///
/// These tests drive the full router (middleware stack included) with
/// in-memory requests. The pool is created lazily against an unreachable
/// address, so every path exercised here is one that must reject the
/// request *before* any storage round trip: authentication failures,
/// malformed bodies, validation failures, and bad path ids.
///
/// End-to-end flows that touch Postgres (register/login/task lifecycle)
/// require a running database and a configured DATABASE_URL.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use taskdeck_api::{
    app::{build_router, AppState},
    config::{ApiConfig, AuthConfig, Config, DatabaseConfig, JwtConfig},
};
use taskdeck_shared::auth::jwt::{create_token, Claims};
use tower::ServiceExt as _;

const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

fn test_app() -> Router {
    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            // Unreachable on purpose; no test below may hit the database
            url: "postgresql://127.0.0.1:1/taskdeck_test".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: SECRET.to_string(),
            expires_days: 7,
        },
        auth: AuthConfig { hash_time_cost: 2 },
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy(&config.database.url)
        .expect("lazy pool");

    build_router(AppState::new(pool, config))
}

fn bearer_token(user_id: i64) -> String {
    let claims = Claims::new(user_id, "ana@x.com", Duration::days(1));
    format!("Bearer {}", create_token(&claims, SECRET).unwrap())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_tasks_without_token_is_401() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/tasks")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Token de autenticação não fornecido");
}

#[tokio::test]
async fn test_wrong_scheme_is_missing_credential() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/tasks")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Token de autenticação não fornecido");
}

#[tokio::test]
async fn test_garbage_token_is_401_generic() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/tasks")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Token inválido ou expirado");
}

#[tokio::test]
async fn test_expired_token_indistinguishable_from_forged() {
    let app = test_app();

    let expired = Claims::new(1, "ana@x.com", Duration::hours(-2));
    let token = create_token(&expired, SECRET).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/tasks")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    // Same message a forged token gets
    assert_eq!(json["error"], "Token inválido ou expirado");
}

#[tokio::test]
async fn test_update_with_non_numeric_id_is_400() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/tasks/abc")
                .header(header::AUTHORIZATION, bearer_token(1))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"status":"completed"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "ID da tarefa inválido");
}

#[tokio::test]
async fn test_delete_with_non_numeric_id_is_400() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/tasks/xyz")
                .header(header::AUTHORIZATION, bearer_token(1))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "ID da tarefa inválido");
}

#[tokio::test]
async fn test_register_malformed_json_is_400() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Body inválido. Envie um JSON válido.");
}

#[tokio::test]
async fn test_register_weak_password_is_400() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"name":"Ana","email":"ana@x.com","password":"abcdefgh"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Senha deve conter pelo menos uma letra maiúscula, uma minúscula e um número"
    );
}

#[tokio::test]
async fn test_login_invalid_email_is_400() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email":"nope","password":"x"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Email inválido");
}

#[tokio::test]
async fn test_create_task_empty_title_is_400() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks")
                .header(header::AUTHORIZATION, bearer_token(1))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"title":""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Título é obrigatório");
}

#[tokio::test]
async fn test_create_task_unknown_status_is_400() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks")
                .header(header::AUTHORIZATION, bearer_token(1))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"title":"t","status":"archived"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Unrecognized status values fail deserialization of the closed enum
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Body inválido. Envie um JSON válido.");
}

#[tokio::test]
async fn test_update_explicit_null_field_is_400() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/tasks/1")
                .header(header::AUTHORIZATION, bearer_token(1))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"description":null}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Null is not "omitted"; it fails the body schema outright
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Body inválido. Envie um JSON válido.");
}

#[tokio::test]
async fn test_update_malformed_json_is_400() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/tasks/1")
                .header(header::AUTHORIZATION, bearer_token(1))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{broken"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Body inválido. Envie um JSON válido.");
}
