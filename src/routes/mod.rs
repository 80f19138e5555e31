/**
 * Routes Module
 * API route handlers
 */

pub mod blogs;
pub mod certifications;
pub mod comments;
pub mod courses;
pub mod education;
pub mod health;
pub mod projects;
pub mod purchases;
pub mod rss;
pub mod subscribers;
pub mod tags;
pub mod users;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use regex::Regex;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;

use crate::db;

/// GET / - Plain-text greeting
pub async fn index() -> &'static str {
    "Hello Hono + Drizzle + Neon!"
}

// ============================================================================
// Shared response types
// ============================================================================

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Success response (for delete)
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ============================================================================
// Shared helpers
// ============================================================================

pub(crate) fn error_response(status: StatusCode, error: &str, message: Option<&str>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message: message.map(str::to_string),
        }),
    )
        .into_response()
}

pub(crate) fn bad_request(error: &str, message: Option<&str>) -> Response {
    error_response(StatusCode::BAD_REQUEST, error, message)
}

pub(crate) fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found", None)
}

/// Handlers degrade to 503 until the pool has been initialized.
pub(crate) fn require_pool() -> Result<Arc<PgPool>, Response> {
    db::get_pool().ok_or_else(|| {
        error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Database not available",
            None,
        )
    })
}

/// Map a storage error onto a status code: constraint violations are client
/// conflicts, everything else is a logged 500.
pub(crate) fn db_error_response(err: sqlx::Error, action: &str) -> Response {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            sqlx::error::ErrorKind::UniqueViolation => {
                return error_response(StatusCode::CONFLICT, "Already exists", None);
            }
            sqlx::error::ErrorKind::ForeignKeyViolation => {
                return error_response(
                    StatusCode::CONFLICT,
                    "Referenced row does not exist",
                    None,
                );
            }
            _ => {}
        }
    }

    tracing::error!("Database error while trying to {}: {}", action, err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error", None)
}

// ============================================================================
// Shared validation
// ============================================================================

lazy_static::lazy_static! {
    /// Deliberately loose: one @, no whitespace, a dot in the domain part.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_greeting_text() {
        assert_eq!(index().await, "Hello Hono + Drizzle + Neon!");
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("nodot@example"));
    }

    #[test]
    fn test_require_pool_before_init_is_service_unavailable() {
        let err = require_pool().err().expect("no pool in unit tests");
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
