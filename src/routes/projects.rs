/**
 * Project Routes
 * CRUD API endpoints for portfolio projects
 */
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::db::models::{NewProject, Project, Tag, UpdateProject};
use crate::db::queries::{projects as queries, tags as tag_queries};
use crate::routes::{bad_request, db_error_response, not_found, require_pool, SuccessResponse};

/// Project with its attached tags
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithTags {
    #[serde(flatten)]
    pub project: Project,
    pub tags: Vec<Tag>,
}

/// GET /api/projects - All projects, newest first
pub async fn list_projects() -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::list_projects(pool.as_ref()).await {
        Ok(projects) => (StatusCode::OK, Json(projects)).into_response(),
        Err(e) => db_error_response(e, "list projects"),
    }
}

/// GET /api/projects/{id} - Single project with its tags
pub async fn get_project(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    let project = match queries::get_project(pool.as_ref(), id).await {
        Ok(Some(p)) => p,
        Ok(None) => return not_found(),
        Err(e) => return db_error_response(e, "fetch project"),
    };

    match tag_queries::tags_for_project(pool.as_ref(), project.id).await {
        Ok(tags) => (StatusCode::OK, Json(ProjectWithTags { project, tags })).into_response(),
        Err(e) => db_error_response(e, "fetch project tags"),
    }
}

/// POST /api/projects - Create a project
pub async fn create_project(Json(payload): Json<NewProject>) -> Response {
    if payload.title.trim().is_empty() {
        return bad_request("Title is required", None);
    }
    if payload.github_url.trim().is_empty() {
        return bad_request("GitHub URL is required", None);
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::create_project(pool.as_ref(), payload).await {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(e) => db_error_response(e, "create project"),
    }
}

/// PATCH /api/projects/{id} - Update a project (tagIds replaces the tag set)
pub async fn update_project(Path(id): Path<Uuid>, Json(payload): Json<UpdateProject>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::update_project(pool.as_ref(), id, payload).await {
        Ok(Some(project)) => (StatusCode::OK, Json(project)).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error_response(e, "update project"),
    }
}

/// DELETE /api/projects/{id} - Delete a project
pub async fn delete_project(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::delete_project(pool.as_ref(), id).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "delete project"),
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
        Router::new().route("/api/projects", get(list_projects).post(create_project))
    }

    #[tokio::test]
    async fn test_list_projects_without_pool_is_503() {
        let req = Request::get("/api/projects").body(Body::empty()).unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_project_rejects_unknown_difficulty() {
        let body = serde_json::json!({
            "userId": Uuid::new_v4(),
            "title": "Terminal portfolio",
            "description": "A portfolio in the terminal",
            "difficulty": "expert",
            "githubUrl": "https://github.com/example/terminal-portfolio"
        });
        let req = Request::post("/api/projects")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        // Unknown enum value fails deserialization before the handler runs
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_project_rejects_empty_title() {
        let body = serde_json::json!({
            "userId": Uuid::new_v4(),
            "title": "",
            "description": "desc",
            "difficulty": "basic",
            "githubUrl": "https://github.com/example/x"
        });
        let req = Request::post("/api/projects")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
