/**
 * Purchase Routes
 * Records course purchases and donations; actual payment processing is
 * handled by the external provider
 */
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::models::NewPurchase;
use crate::db::queries::purchases as queries;
use crate::routes::{bad_request, db_error_response, not_found, require_pool};

/// Query parameters for GET /api/purchases
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseListQuery {
    pub user_id: Option<Uuid>,
}

/// Request body for PATCH /api/purchases/{id}
#[derive(Debug, Deserialize)]
pub struct UpdatePurchaseStatusRequest {
    pub status: String,
}

/// GET /api/purchases - Purchases and donations, optionally for one user
pub async fn list_purchases(Query(query): Query<PurchaseListQuery>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::list_purchases(pool.as_ref(), query.user_id).await {
        Ok(purchases) => (StatusCode::OK, Json(purchases)).into_response(),
        Err(e) => db_error_response(e, "list purchases"),
    }
}

/// POST /api/purchases - Record a course purchase or a donation
pub async fn create_purchase(Json(payload): Json<NewPurchase>) -> Response {
    if payload.amount <= Decimal::ZERO {
        return bad_request("Amount must be positive", None);
    }
    if payload.external_payment_id.trim().is_empty() {
        return bad_request("External payment id is required", None);
    }
    // A donation carries no course; a purchase must name one.
    if payload.is_donation && payload.course_id.is_some() {
        return bad_request("Donations must not reference a course", None);
    }
    if !payload.is_donation && payload.course_id.is_none() {
        return bad_request("Course purchases must reference a course", None);
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::create_purchase(pool.as_ref(), payload).await {
        Ok(purchase) => (StatusCode::CREATED, Json(purchase)).into_response(),
        Err(e) => db_error_response(e, "create purchase"),
    }
}

/// PATCH /api/purchases/{id} - Move the payment status along
/// (e.g. pending -> completed, as reported by the provider)
pub async fn update_purchase_status(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePurchaseStatusRequest>,
) -> Response {
    if payload.status.trim().is_empty() {
        return bad_request("Status is required", None);
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::update_purchase_status(pool.as_ref(), id, payload.status.trim()).await {
        Ok(Some(purchase)) => (StatusCode::OK, Json(purchase)).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error_response(e, "update purchase status"),
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
        Router::new().route("/api/purchases", get(list_purchases).post(create_purchase))
    }

    #[tokio::test]
    async fn test_create_donation_with_course_is_400() {
        let body = serde_json::json!({
            "userId": Uuid::new_v4(),
            "courseId": Uuid::new_v4(),
            "amount": "5.00",
            "paymentMethod": "bmac",
            "externalPaymentId": "bmac_1",
            "isDonation": true
        });
        let req = Request::post("/api/purchases")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_purchase_without_course_is_400() {
        let body = serde_json::json!({
            "userId": Uuid::new_v4(),
            "amount": "49.00",
            "paymentMethod": "stripe",
            "externalPaymentId": "pi_42"
        });
        let req = Request::post("/api/purchases")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_purchase_rejects_negative_amount() {
        let body = serde_json::json!({
            "userId": Uuid::new_v4(),
            "courseId": Uuid::new_v4(),
            "amount": "-1.00",
            "paymentMethod": "mpesa",
            "externalPaymentId": "MP123"
        });
        let req = Request::post("/api/purchases")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_purchases_without_pool_is_503() {
        let req = Request::get("/api/purchases").body(Body::empty()).unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
