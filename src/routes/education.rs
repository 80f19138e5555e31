/**
 * Education Routes
 * CRUD API endpoints for education history entries
 */
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::models::{NewEducation, UpdateEducation};
use crate::db::queries::education as queries;
use crate::routes::{bad_request, db_error_response, not_found, require_pool, SuccessResponse};

/// Query parameters for GET /api/education
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationListQuery {
    pub user_id: Option<Uuid>,
}

/// GET /api/education - Education entries, optionally for one user
pub async fn list_education(Query(query): Query<EducationListQuery>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::list_education(pool.as_ref(), query.user_id).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => db_error_response(e, "list education"),
    }
}

/// POST /api/education - Create an education entry
pub async fn create_education(Json(payload): Json<NewEducation>) -> Response {
    if payload.institution.trim().is_empty() {
        return bad_request("Institution is required", None);
    }
    if let Some(end_date) = payload.end_date {
        if end_date < payload.start_date {
            return bad_request("End date must not precede start date", None);
        }
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::create_education(pool.as_ref(), payload).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => db_error_response(e, "create education entry"),
    }
}

/// PATCH /api/education/{id} - Update an education entry
pub async fn update_education(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEducation>,
) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::update_education(pool.as_ref(), id, payload).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(entry)).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error_response(e, "update education entry"),
    }
}

/// DELETE /api/education/{id} - Delete an education entry
pub async fn delete_education(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::delete_education(pool.as_ref(), id).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "delete education entry"),
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
        Router::new().route("/api/education", get(list_education).post(create_education))
    }

    #[tokio::test]
    async fn test_list_education_without_pool_is_503() {
        let req = Request::get("/api/education").body(Body::empty()).unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_education_rejects_reversed_dates() {
        let body = serde_json::json!({
            "userId": Uuid::new_v4(),
            "institution": "Example University",
            "degreeOrCourse": "BSc",
            "fieldOfStudy": "Computer Science",
            "startDate": "2022-09-01",
            "endDate": "2020-06-30",
            "location": "Nairobi"
        });
        let req = Request::post("/api/education")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
