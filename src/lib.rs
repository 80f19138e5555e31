//! Portfolio Platform - library for app logic and testing

pub mod db;
pub mod logging;
pub mod routes;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN.
/// Falls back to localhost origins in development.
pub fn configure_cors() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .and_then(|s| {
            let origins: Vec<HeaderValue> = s
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        })
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            vec![
                "http://localhost:3000".parse().unwrap(),
                "http://127.0.0.1:3000".parse().unwrap(),
            ]
        });

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app() -> Router {
    let cors = configure_cors();
    tracing::info!("CORS configured");

    Router::new()
        .route("/", get(routes::index))
        .route("/rss.xml", get(routes::rss::rss_feed))
        .route(
            "/api/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/api/users/{id}",
            get(routes::users::get_user)
                .patch(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route(
            "/api/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(routes::projects::get_project)
                .patch(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/api/blogs",
            get(routes::blogs::list_blogs).post(routes::blogs::create_blog),
        )
        .route(
            "/api/blogs/{slug}",
            get(routes::blogs::get_blog)
                .patch(routes::blogs::update_blog)
                .delete(routes::blogs::delete_blog),
        )
        .route(
            "/api/blogs/{slug}/comments",
            get(routes::comments::list_comments).post(routes::comments::create_comment),
        )
        .route("/api/comments/{id}", delete(routes::comments::delete_comment))
        .route(
            "/api/tags",
            get(routes::tags::list_tags).post(routes::tags::create_tag),
        )
        .route("/api/tags/{id}", delete(routes::tags::delete_tag))
        .route(
            "/api/education",
            get(routes::education::list_education).post(routes::education::create_education),
        )
        .route(
            "/api/education/{id}",
            patch(routes::education::update_education).delete(routes::education::delete_education),
        )
        .route(
            "/api/certifications",
            get(routes::certifications::list_certifications)
                .post(routes::certifications::create_certification),
        )
        .route(
            "/api/certifications/{id}",
            patch(routes::certifications::update_certification)
                .delete(routes::certifications::delete_certification),
        )
        .route(
            "/api/courses",
            get(routes::courses::list_courses).post(routes::courses::create_course),
        )
        .route(
            "/api/courses/{id}",
            get(routes::courses::get_course)
                .patch(routes::courses::update_course)
                .delete(routes::courses::delete_course),
        )
        .route(
            "/api/courses/{id}/modules",
            post(routes::courses::create_module),
        )
        .route(
            "/api/modules/{id}",
            patch(routes::courses::update_module).delete(routes::courses::delete_module),
        )
        .route(
            "/api/modules/{id}/lessons",
            post(routes::courses::create_lesson),
        )
        .route(
            "/api/lessons/{id}",
            patch(routes::courses::update_lesson).delete(routes::courses::delete_lesson),
        )
        .route(
            "/api/purchases",
            get(routes::purchases::list_purchases).post(routes::purchases::create_purchase),
        )
        .route(
            "/api/purchases/{id}",
            patch(routes::purchases::update_purchase_status),
        )
        .route(
            "/api/subscribers",
            get(routes::subscribers::list_subscribers).post(routes::subscribers::subscribe),
        )
        .route(
            "/api/subscribers/unsubscribe",
            post(routes::subscribers::unsubscribe),
        )
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/database", get(routes::health::health_database))
        .route("/health/ready", get(routes::health::health_ready))
        .layer(logging::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::log_request))
        .layer(logging::request_id_layer())
        .layer(TraceLayer::new_for_http())
        // Compress responses with gzip/br/zstd automatically
        .layer(CompressionLayer::new())
        // Global 2 MB request body cap
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    let _log_guards = logging::init();

    routes::health::init_start_time();

    if std::env::var("DATABASE_URL").is_ok() {
        match db::init_pool(None).await {
            Ok(pool) => {
                if let Err(e) = db::run_migrations(&pool).await {
                    tracing::error!("Failed to run database migrations: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize database pool: {}. Continuing without database.",
                    e
                );
            }
        }
    } else {
        tracing::info!("DATABASE_URL not set. Running without database connection.");
    }

    let app = create_app();

    // Bind address is configurable via HOST / PORT env vars.
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST/PORT configuration");
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_create_app_returns_router() {
        let _app = create_app();
        // Just test that it compiles and doesn't panic
    }

    #[tokio::test]
    async fn test_root_returns_exact_greeting() {
        let app = create_app();
        let req = Request::get("/").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Hello Hono + Drizzle + Neon!");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_app();
        let req = Request::get("/api/unknown").body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
