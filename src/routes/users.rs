/**
 * User Routes
 * CRUD API endpoints for platform users
 */
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::db::models::{NewUser, UpdateUser};
use crate::db::queries::users as queries;
use crate::routes::{
    bad_request, db_error_response, is_valid_email, not_found, require_pool, SuccessResponse,
};

/// GET /api/users - All users, in storage order
pub async fn list_users() -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::list_users(pool.as_ref()).await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => db_error_response(e, "list users"),
    }
}

/// POST /api/users - Create a user
pub async fn create_user(Json(payload): Json<NewUser>) -> Response {
    if payload.full_name.trim().is_empty() {
        return bad_request("Full name is required", None);
    }
    if !is_valid_email(&payload.email) {
        return bad_request("Invalid email", None);
    }
    if payload.password_hash.trim().is_empty() {
        return bad_request("Password hash is required", None);
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::create_user(pool.as_ref(), payload).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => db_error_response(e, "create user"),
    }
}

/// GET /api/users/{id} - Single user by id
pub async fn get_user(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::get_user(pool.as_ref(), id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error_response(e, "fetch user"),
    }
}

/// PATCH /api/users/{id} - Update a user
pub async fn update_user(Path(id): Path<Uuid>, Json(payload): Json<UpdateUser>) -> Response {
    if let Some(email) = &payload.email {
        if !is_valid_email(email) {
            return bad_request("Invalid email", None);
        }
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::update_user(pool.as_ref(), id, payload).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error_response(e, "update user"),
    }
}

/// DELETE /api/users/{id} - Delete a user and everything it owns
pub async fn delete_user(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::delete_user(pool.as_ref(), id).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "delete user"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn test_router() -> Router {
        Router::new()
            .route("/api/users", get(list_users).post(create_user))
            .route("/api/users/{id}", get(get_user))
    }

    #[tokio::test]
    async fn test_list_users_without_pool_is_503() {
        let req = Request::get("/api/users").body(Body::empty()).unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_email() {
        let body = serde_json::json!({
            "fullName": "Jane Doe",
            "email": "not-an-email",
            "passwordHash": "$2b$12$abc"
        });
        let req = Request::post("/api/users")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_user_rejects_empty_name() {
        let body = serde_json::json!({
            "fullName": "   ",
            "email": "jane@example.com",
            "passwordHash": "$2b$12$abc"
        });
        let req = Request::post("/api/users")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_user_rejects_malformed_id() {
        let req = Request::get("/api/users/not-a-uuid")
            .body(Body::empty())
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
