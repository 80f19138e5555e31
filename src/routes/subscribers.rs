/**
 * Subscriber Routes
 * Newsletter subscription endpoints; sending mail is someone else's job
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::db::models::NewSubscriber;
use crate::db::queries::subscribers as queries;
use crate::routes::{
    bad_request, db_error_response, is_valid_email, not_found, require_pool, SuccessResponse,
};

/// Request body for POST /api/subscribers/unsubscribe
#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: String,
}

/// GET /api/subscribers - All subscribers, newest first
pub async fn list_subscribers() -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::list_subscribers(pool.as_ref()).await {
        Ok(subscribers) => (StatusCode::OK, Json(subscribers)).into_response(),
        Err(e) => db_error_response(e, "list subscribers"),
    }
}

/// POST /api/subscribers - Subscribe an email address. Subscribing an
/// address again just re-activates it.
pub async fn subscribe(Json(payload): Json<NewSubscriber>) -> Response {
    if !is_valid_email(&payload.email) {
        return bad_request("Invalid email", None);
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::subscribe(pool.as_ref(), payload).await {
        Ok(subscriber) => (StatusCode::CREATED, Json(subscriber)).into_response(),
        Err(e) => db_error_response(e, "subscribe"),
    }
}

/// POST /api/subscribers/unsubscribe - Stamp the unsubscribe timestamp
pub async fn unsubscribe(Json(payload): Json<UnsubscribeRequest>) -> Response {
    if !is_valid_email(&payload.email) {
        return bad_request("Invalid email", None);
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::unsubscribe(pool.as_ref(), &payload.email).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "unsubscribe"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::{get, post};
    use axum::Router;
    use tower::ServiceExt;

    fn test_router() -> Router {
        Router::new()
            .route("/api/subscribers", get(list_subscribers).post(subscribe))
            .route("/api/subscribers/unsubscribe", post(unsubscribe))
    }

    #[tokio::test]
    async fn test_subscribe_rejects_bad_email() {
        let body = serde_json::json!({ "email": "nope" });
        let req = Request::post("/api/subscribers")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unsubscribe_rejects_bad_email() {
        let body = serde_json::json!({ "email": "still nope" });
        let req = Request::post("/api/subscribers/unsubscribe")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_subscribers_without_pool_is_503() {
        let req = Request::get("/api/subscribers").body(Body::empty()).unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
