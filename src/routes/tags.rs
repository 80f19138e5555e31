/**
 * Tag Routes
 * Tags shared across blogs and projects
 */
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::db::models::NewTag;
use crate::db::queries::tags as queries;
use crate::routes::{bad_request, db_error_response, not_found, require_pool, SuccessResponse};

/// GET /api/tags - All tags, alphabetical
pub async fn list_tags() -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::list_tags(pool.as_ref()).await {
        Ok(tags) => (StatusCode::OK, Json(tags)).into_response(),
        Err(e) => db_error_response(e, "list tags"),
    }
}

/// POST /api/tags - Create a tag (name is unique)
pub async fn create_tag(Json(payload): Json<NewTag>) -> Response {
    if payload.name.trim().is_empty() {
        return bad_request("Name is required", None);
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::create_tag(pool.as_ref(), payload).await {
        Ok(tag) => (StatusCode::CREATED, Json(tag)).into_response(),
        Err(e) => db_error_response(e, "create tag"),
    }
}

/// DELETE /api/tags/{id} - Delete a tag; blogs and projects keep existing,
/// only the join rows go
pub async fn delete_tag(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::delete_tag(pool.as_ref(), id).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "delete tag"),
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
        Router::new().route("/api/tags", get(list_tags).post(create_tag))
    }

    #[tokio::test]
    async fn test_list_tags_without_pool_is_503() {
        let req = Request::get("/api/tags").body(Body::empty()).unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_tag_rejects_empty_name() {
        let body = serde_json::json!({ "name": "" });
        let req = Request::post("/api/tags")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
