/**
 * Comment Routes
 * Threaded comments on blog posts
 */
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::db::models::NewBlogComment;
use crate::db::queries::{blogs as blog_queries, comments as queries};
use crate::routes::{bad_request, db_error_response, not_found, require_pool, SuccessResponse};

/// GET /api/blogs/{slug}/comments - All comments on a blog, oldest first.
/// `parentId` on each row carries the reply threading.
pub async fn list_comments(Path(slug): Path<String>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    let blog = match blog_queries::get_blog_by_slug(pool.as_ref(), &slug).await {
        Ok(Some(b)) => b,
        Ok(None) => return not_found(),
        Err(e) => return db_error_response(e, "fetch blog"),
    };

    match queries::list_comments_for_blog(pool.as_ref(), blog.id).await {
        Ok(comments) => (StatusCode::OK, Json(comments)).into_response(),
        Err(e) => db_error_response(e, "list comments"),
    }
}

/// POST /api/blogs/{slug}/comments - Comment on a blog, or reply to an
/// existing comment via `parentId`
pub async fn create_comment(
    Path(slug): Path<String>,
    Json(payload): Json<NewBlogComment>,
) -> Response {
    if payload.content.trim().is_empty() {
        return bad_request("Content is required", None);
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    let blog = match blog_queries::get_blog_by_slug(pool.as_ref(), &slug).await {
        Ok(Some(b)) => b,
        Ok(None) => return not_found(),
        Err(e) => return db_error_response(e, "fetch blog"),
    };

    // A reply must target a comment on the same blog.
    if let Some(parent_id) = payload.parent_id {
        match queries::get_comment(pool.as_ref(), parent_id).await {
            Ok(Some(parent)) if parent.blog_id == blog.id => {}
            Ok(Some(_)) => {
                return bad_request("Parent comment belongs to a different blog", None);
            }
            Ok(None) => return bad_request("Parent comment does not exist", None),
            Err(e) => return db_error_response(e, "fetch parent comment"),
        }
    }

    match queries::create_comment(pool.as_ref(), blog.id, payload).await {
        Ok(comment) => (StatusCode::CREATED, Json(comment)).into_response(),
        Err(e) => db_error_response(e, "create comment"),
    }
}

/// DELETE /api/comments/{id} - Delete a comment and its reply subtree
pub async fn delete_comment(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::delete_comment(pool.as_ref(), id).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "delete comment"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::{delete, get};
    use axum::Router;
    use tower::ServiceExt;

    fn test_router() -> Router {
        Router::new()
            .route(
                "/api/blogs/{slug}/comments",
                get(list_comments).post(create_comment),
            )
            .route("/api/comments/{id}", delete(delete_comment))
    }

    #[tokio::test]
    async fn test_list_comments_without_pool_is_503() {
        let req = Request::get("/api/blogs/hello-world/comments")
            .body(Body::empty())
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_comment_rejects_empty_content() {
        let body = serde_json::json!({
            "userId": Uuid::new_v4(),
            "content": "   "
        });
        let req = Request::post("/api/blogs/hello-world/comments")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_comment_rejects_malformed_id() {
        let req = Request::delete("/api/comments/42")
            .body(Body::empty())
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
