/**
 * Certification Routes
 * CRUD API endpoints for certifications
 */
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::models::{NewCertification, UpdateCertification};
use crate::db::queries::certifications as queries;
use crate::routes::{bad_request, db_error_response, not_found, require_pool, SuccessResponse};

/// Query parameters for GET /api/certifications
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationListQuery {
    pub user_id: Option<Uuid>,
}

/// GET /api/certifications - Certifications, optionally for one user
pub async fn list_certifications(Query(query): Query<CertificationListQuery>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::list_certifications(pool.as_ref(), query.user_id).await {
        Ok(certs) => (StatusCode::OK, Json(certs)).into_response(),
        Err(e) => db_error_response(e, "list certifications"),
    }
}

/// POST /api/certifications - Create a certification
pub async fn create_certification(Json(payload): Json<NewCertification>) -> Response {
    if payload.title.trim().is_empty() {
        return bad_request("Title is required", None);
    }
    if let Some(expiry_date) = payload.expiry_date {
        if expiry_date < payload.issue_date {
            return bad_request("Expiry date must not precede issue date", None);
        }
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::create_certification(pool.as_ref(), payload).await {
        Ok(cert) => (StatusCode::CREATED, Json(cert)).into_response(),
        Err(e) => db_error_response(e, "create certification"),
    }
}

/// PATCH /api/certifications/{id} - Update a certification
pub async fn update_certification(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCertification>,
) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::update_certification(pool.as_ref(), id, payload).await {
        Ok(Some(cert)) => (StatusCode::OK, Json(cert)).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error_response(e, "update certification"),
    }
}

/// DELETE /api/certifications/{id} - Delete a certification
pub async fn delete_certification(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::delete_certification(pool.as_ref(), id).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "delete certification"),
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
        Router::new().route(
            "/api/certifications",
            get(list_certifications).post(create_certification),
        )
    }

    #[tokio::test]
    async fn test_list_certifications_without_pool_is_503() {
        let req = Request::get("/api/certifications")
            .body(Body::empty())
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_certification_rejects_expiry_before_issue() {
        let body = serde_json::json!({
            "userId": Uuid::new_v4(),
            "title": "Cloud Practitioner",
            "issuedBy": "Example Cloud",
            "issueDate": "2024-03-01",
            "expiryDate": "2023-03-01",
            "fileUrl": "https://cdn.example.com/certs/cloud.pdf"
        });
        let req = Request::post("/api/certifications")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
