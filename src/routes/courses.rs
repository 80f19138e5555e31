/**
 * Course Routes
 * CRUD API endpoints for courses, their ordered modules, and lessons
 */
use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::db::models::{
    Course, CourseLesson, CourseModule, NewCourse, NewCourseLesson, NewCourseModule,
    UpdateCourse, UpdateCourseLesson, UpdateCourseModule,
};
use crate::db::queries::courses as queries;
use crate::routes::{bad_request, db_error_response, not_found, require_pool, SuccessResponse};

// ============================================================================
// Response Types
// ============================================================================

/// Module with its lessons in order
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleWithLessons {
    #[serde(flatten)]
    pub module: CourseModule,
    pub lessons: Vec<CourseLesson>,
}

/// Full course detail: the course plus modules and lessons in order
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub modules: Vec<ModuleWithLessons>,
}

// ============================================================================
// Course handlers
// ============================================================================

/// GET /api/courses - All courses, newest first
pub async fn list_courses() -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::list_courses(pool.as_ref()).await {
        Ok(courses) => (StatusCode::OK, Json(courses)).into_response(),
        Err(e) => db_error_response(e, "list courses"),
    }
}

/// GET /api/courses/{id} - Course with modules and lessons in order
pub async fn get_course(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    let course = match queries::get_course(pool.as_ref(), id).await {
        Ok(Some(c)) => c,
        Ok(None) => return not_found(),
        Err(e) => return db_error_response(e, "fetch course"),
    };

    let modules = match queries::list_modules(pool.as_ref(), course.id).await {
        Ok(m) => m,
        Err(e) => return db_error_response(e, "list course modules"),
    };

    let mut detail_modules = Vec::with_capacity(modules.len());
    for module in modules {
        let lessons = match queries::list_lessons(pool.as_ref(), module.id).await {
            Ok(l) => l,
            Err(e) => return db_error_response(e, "list module lessons"),
        };
        detail_modules.push(ModuleWithLessons { module, lessons });
    }

    (
        StatusCode::OK,
        Json(CourseDetail {
            course,
            modules: detail_modules,
        }),
    )
        .into_response()
}

/// POST /api/courses - Create a course
pub async fn create_course(Json(payload): Json<NewCourse>) -> Response {
    if payload.title.trim().is_empty() {
        return bad_request("Title is required", None);
    }
    if payload.is_paid && payload.price.is_none() {
        return bad_request("Paid courses require a price", None);
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::create_course(pool.as_ref(), payload).await {
        Ok(course) => (StatusCode::CREATED, Json(course)).into_response(),
        Err(e) => db_error_response(e, "create course"),
    }
}

/// PATCH /api/courses/{id} - Update a course
pub async fn update_course(Path(id): Path<Uuid>, Json(payload): Json<UpdateCourse>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::update_course(pool.as_ref(), id, payload).await {
        Ok(Some(course)) => (StatusCode::OK, Json(course)).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error_response(e, "update course"),
    }
}

/// DELETE /api/courses/{id} - Delete a course (modules, lessons, purchases
/// cascade)
pub async fn delete_course(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::delete_course(pool.as_ref(), id).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "delete course"),
    }
}

// ============================================================================
// Module handlers
// ============================================================================

/// POST /api/courses/{id}/modules - Add a module to a course
pub async fn create_module(
    Path(course_id): Path<Uuid>,
    Json(payload): Json<NewCourseModule>,
) -> Response {
    if payload.title.trim().is_empty() {
        return bad_request("Title is required", None);
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::get_course(pool.as_ref(), course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(),
        Err(e) => return db_error_response(e, "fetch course"),
    }

    match queries::create_module(pool.as_ref(), course_id, payload).await {
        Ok(module) => (StatusCode::CREATED, Json(module)).into_response(),
        Err(e) => db_error_response(e, "create module"),
    }
}

/// PATCH /api/modules/{id} - Update a module (title/position)
pub async fn update_module(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourseModule>,
) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::update_module(pool.as_ref(), id, payload).await {
        Ok(Some(module)) => (StatusCode::OK, Json(module)).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error_response(e, "update module"),
    }
}

/// DELETE /api/modules/{id} - Delete a module and its lessons
pub async fn delete_module(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::delete_module(pool.as_ref(), id).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "delete module"),
    }
}

// ============================================================================
// Lesson handlers
// ============================================================================

/// POST /api/modules/{id}/lessons - Add a lesson to a module
pub async fn create_lesson(
    Path(module_id): Path<Uuid>,
    Json(payload): Json<NewCourseLesson>,
) -> Response {
    if payload.title.trim().is_empty() {
        return bad_request("Title is required", None);
    }
    if let Some(duration) = payload.duration_seconds {
        if duration <= 0 {
            return bad_request("Duration must be positive", None);
        }
    }

    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::get_module(pool.as_ref(), module_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(),
        Err(e) => return db_error_response(e, "fetch module"),
    }

    match queries::create_lesson(pool.as_ref(), module_id, payload).await {
        Ok(lesson) => (StatusCode::CREATED, Json(lesson)).into_response(),
        Err(e) => db_error_response(e, "create lesson"),
    }
}

/// PATCH /api/lessons/{id} - Update a lesson
pub async fn update_lesson(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCourseLesson>,
) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::update_lesson(pool.as_ref(), id, payload).await {
        Ok(Some(lesson)) => (StatusCode::OK, Json(lesson)).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error_response(e, "update lesson"),
    }
}

/// DELETE /api/lessons/{id} - Delete a lesson
pub async fn delete_lesson(Path(id): Path<Uuid>) -> Response {
    let pool = match require_pool() {
        Ok(p) => p,
        Err(r) => return r,
    };

    match queries::delete_lesson(pool.as_ref(), id).await {
        Ok(true) => (StatusCode::OK, Json(SuccessResponse { success: true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error_response(e, "delete lesson"),
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
            .route("/api/courses", get(list_courses).post(create_course))
            .route("/api/courses/{id}/modules", post(create_module))
            .route("/api/modules/{id}/lessons", post(create_lesson))
    }

    #[tokio::test]
    async fn test_list_courses_without_pool_is_503() {
        let req = Request::get("/api/courses").body(Body::empty()).unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_paid_course_without_price_is_400() {
        let body = serde_json::json!({
            "userId": Uuid::new_v4(),
            "title": "Rust for the terminally curious",
            "description": "A course",
            "isPaid": true
        });
        let req = Request::post("/api/courses")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_lesson_rejects_zero_duration() {
        let body = serde_json::json!({
            "title": "Intro",
            "position": 1,
            "durationSeconds": 0
        });
        let req = Request::post(format!("/api/modules/{}/lessons", Uuid::new_v4()))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
