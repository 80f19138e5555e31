/**
 * Blog Routes
 * CRUD API endpoints for blog posts
 */
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::db::models::{Blog, BlogStatus, NewBlog, Tag, UpdateBlog};
use crate::db::queries::{blogs as queries, tags as tag_queries};
use crate::routes::{bad_request, db_error_response, not_found, require_pool, SuccessResponse};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /api/blogs (list)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    pub status: Option<BlogStatus>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Response for GET /api/blogs (list)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListResponse {
    pub items: Vec<Blog>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

/// Blog with its attached tags
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogWithTags {
    #[serde(flatten)]
    pub blog: Blog,
    pub tags: Vec<Tag>,
}

// ============================================================================
// Validation
// ============================================================================

lazy_static::lazy_static! {
    /// Valid slug pattern: lowercase letters, numbers, and hyphens
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

fn invalid_slug() -> Response {
    bad_request(
        "Invalid slug",
        Some("Slug must contain only lowercase letters, numbers, and hyphens"),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/blogs - List blogs with pagination and optional status filter
pub async fn list_blogs(Query(query): Query<BlogListQuery>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    // Clamp page_size to max 100
    let page_size = query.page_size.clamp(1, 100);
    let page = query.page.max(1);

    match queries::list_blogs(pool.as_ref(), page, page_size, query.status).await {
        Ok((items, total)) => (
            StatusCode::OK,
            Json(BlogListResponse {
                items,
                page,
                page_size,
                total,
            }),
        )
            .into_response(),
        Err(e) => db_error_response(e, "list blogs"),
    }
}

/// GET /api/blogs/{slug} - Single blog by slug, with tags
pub async fn get_blog(Path(slug): Path<String>) -> Response {
    if !is_valid_slug(&slug) {
        return invalid_slug();
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    let blog = match queries::get_blog_by_slug(pool.as_ref(), &slug).await {
        Ok(Some(b)) => b,
        Ok(None) => return not_found(),
        Err(e) => return db_error_response(e, "fetch blog"),
    };

    match tag_queries::tags_for_blog(pool.as_ref(), blog.id).await {
        Ok(tags) => (StatusCode::OK, Json(BlogWithTags { blog, tags })).into_response(),
        Err(e) => db_error_response(e, "fetch blog tags"),
    }
}

/// POST /api/blogs - Create a blog
pub async fn create_blog(Json(payload): Json<NewBlog>) -> Response {
    if payload.title.trim().is_empty() {
        return bad_request("Title is required", None);
    }
    if payload.slug.trim().is_empty() {
        return bad_request("Slug is required", None);
    }
    if !is_valid_slug(&payload.slug) {
        return invalid_slug();
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::create_blog(pool.as_ref(), payload).await {
        Ok(blog) => (StatusCode::CREATED, Json(blog)).into_response(),
        Err(e) => db_error_response(e, "create blog"),
    }
}

/// PATCH /api/blogs/{slug} - Update a blog (tagIds replaces the tag set)
pub async fn update_blog(Path(slug): Path<String>, Json(payload): Json<UpdateBlog>) -> Response {
    if !is_valid_slug(&slug) {
        return invalid_slug();
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::update_blog(pool.as_ref(), &slug, payload).await {
        Ok(Some(blog)) => (StatusCode::OK, Json(blog)).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error_response(e, "update blog"),
    }
}

/// DELETE /api/blogs/{slug} - Delete a blog (comments and tag links cascade)
pub async fn delete_blog(Path(slug): Path<String>) -> Response {
    if !is_valid_slug(&slug) {
        return invalid_slug();
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::delete_blog_by_slug(pool.as_ref(), &slug).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "delete blog"),
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
            .route("/api/blogs", get(list_blogs).post(create_blog))
            .route(
                "/api/blogs/{slug}",
                get(get_blog).patch(update_blog).delete(delete_blog),
            )
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("a1-b2-c3"));
        assert!(is_valid_slug("2024"));
        assert!(!is_valid_slug("Hello-World"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("under_score"));
        assert!(!is_valid_slug(""));
    }

    #[tokio::test]
    async fn test_get_blog_invalid_slug_is_400() {
        let req = Request::get("/api/blogs/Not%20A%20Slug")
            .body(Body::empty())
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_blogs_without_pool_is_503() {
        let req = Request::get("/api/blogs?page=1&pageSize=5")
            .body(Body::empty())
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_blog_rejects_invalid_status() {
        let body = serde_json::json!({
            "userId": uuid::Uuid::new_v4(),
            "title": "Hello",
            "slug": "hello",
            "content": "body",
            "coverImageUrl": "",
            "status": "pending"
        });
        let req = Request::post("/api/blogs")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
