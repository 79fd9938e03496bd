/// Database models for TaskDeck
///
/// This module contains the database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts (created at registration, immutable afterwards)
/// - `task`: Task records, every operation scoped to the owning user
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         name: "Ana".to_string(),
///         email: "ana@x.com".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
