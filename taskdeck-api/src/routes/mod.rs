/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login)
/// - `tasks`: Owner-scoped task CRUD endpoints

pub mod auth;
pub mod health;
pub mod tasks;
