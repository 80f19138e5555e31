use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{
    Course, CourseLesson, CourseModule, NewCourse, NewCourseLesson, NewCourseModule,
    UpdateCourse, UpdateCourseLesson, UpdateCourseModule,
};

// ============================================================================
// Courses
// ============================================================================

pub async fn list_courses(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, user_id, title, description, is_paid, price,
               media_urls, downloadable_links, created_at, updated_at
        FROM courses
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_course(pool: &PgPool, id: Uuid) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, user_id, title, description, is_paid, price,
               media_urls, downloadable_links, created_at, updated_at
        FROM courses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_course(pool: &PgPool, new_course: NewCourse) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        INSERT INTO courses (user_id, title, description, is_paid, price,
                             media_urls, downloadable_links)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, title, description, is_paid, price,
                  media_urls, downloadable_links, created_at, updated_at
        "#,
    )
    .bind(new_course.user_id)
    .bind(&new_course.title)
    .bind(&new_course.description)
    .bind(new_course.is_paid)
    .bind(new_course.price)
    .bind(&new_course.media_urls)
    .bind(&new_course.downloadable_links)
    .fetch_one(pool)
    .await
}

pub async fn update_course(
    pool: &PgPool,
    id: Uuid,
    changes: UpdateCourse,
) -> Result<Option<Course>, sqlx::Error> {
    let existing = match get_course(pool, id).await? {
        Some(c) => c,
        None => return Ok(None),
    };

    let title = changes.title.unwrap_or(existing.title);
    let description = changes.description.unwrap_or(existing.description);
    let is_paid = changes.is_paid.unwrap_or(existing.is_paid);
    let price = changes.price.or(existing.price);
    let media_urls = changes.media_urls.unwrap_or(existing.media_urls);
    let downloadable_links = changes
        .downloadable_links
        .unwrap_or(existing.downloadable_links);

    let course = sqlx::query_as::<_, Course>(
        r#"
        UPDATE courses
        SET title = $1, description = $2, is_paid = $3, price = $4,
            media_urls = $5, downloadable_links = $6, updated_at = now()
        WHERE id = $7
        RETURNING id, user_id, title, description, is_paid, price,
                  media_urls, downloadable_links, created_at, updated_at
        "#,
    )
    .bind(&title)
    .bind(&description)
    .bind(is_paid)
    .bind(price)
    .bind(&media_urls)
    .bind(&downloadable_links)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(Some(course))
}

/// Delete a course; modules, their lessons, and the course's purchases
/// cascade.
pub async fn delete_course(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Modules
// ============================================================================

/// Modules of a course in their explicit order.
pub async fn list_modules(pool: &PgPool, course_id: Uuid) -> Result<Vec<CourseModule>, sqlx::Error> {
    sqlx::query_as::<_, CourseModule>(
        r#"
        SELECT id, course_id, title, position, created_at
        FROM course_modules
        WHERE course_id = $1
        ORDER BY position, created_at
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub async fn get_module(pool: &PgPool, id: Uuid) -> Result<Option<CourseModule>, sqlx::Error> {
    sqlx::query_as::<_, CourseModule>(
        r#"
        SELECT id, course_id, title, position, created_at
        FROM course_modules
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_module(
    pool: &PgPool,
    course_id: Uuid,
    new_module: NewCourseModule,
) -> Result<CourseModule, sqlx::Error> {
    sqlx::query_as::<_, CourseModule>(
        r#"
        INSERT INTO course_modules (course_id, title, position)
        VALUES ($1, $2, $3)
        RETURNING id, course_id, title, position, created_at
        "#,
    )
    .bind(course_id)
    .bind(&new_module.title)
    .bind(new_module.position)
    .fetch_one(pool)
    .await
}

pub async fn update_module(
    pool: &PgPool,
    id: Uuid,
    changes: UpdateCourseModule,
) -> Result<Option<CourseModule>, sqlx::Error> {
    let existing = match get_module(pool, id).await? {
        Some(m) => m,
        None => return Ok(None),
    };

    let title = changes.title.unwrap_or(existing.title);
    let position = changes.position.unwrap_or(existing.position);

    let module = sqlx::query_as::<_, CourseModule>(
        r#"
        UPDATE course_modules
        SET title = $1, position = $2
        WHERE id = $3
        RETURNING id, course_id, title, position, created_at
        "#,
    )
    .bind(&title)
    .bind(position)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(Some(module))
}

pub async fn delete_module(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM course_modules WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Lessons
// ============================================================================

/// Lessons of a module in their explicit order.
pub async fn list_lessons(pool: &PgPool, module_id: Uuid) -> Result<Vec<CourseLesson>, sqlx::Error> {
    sqlx::query_as::<_, CourseLesson>(
        r#"
        SELECT id, module_id, title, position, video_url, duration_seconds,
               is_free_preview, created_at
        FROM course_lessons
        WHERE module_id = $1
        ORDER BY position, created_at
        "#,
    )
    .bind(module_id)
    .fetch_all(pool)
    .await
}

pub async fn get_lesson(pool: &PgPool, id: Uuid) -> Result<Option<CourseLesson>, sqlx::Error> {
    sqlx::query_as::<_, CourseLesson>(
        r#"
        SELECT id, module_id, title, position, video_url, duration_seconds,
               is_free_preview, created_at
        FROM course_lessons
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_lesson(
    pool: &PgPool,
    module_id: Uuid,
    new_lesson: NewCourseLesson,
) -> Result<CourseLesson, sqlx::Error> {
    sqlx::query_as::<_, CourseLesson>(
        r#"
        INSERT INTO course_lessons (module_id, title, position, video_url,
                                    duration_seconds, is_free_preview)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, module_id, title, position, video_url, duration_seconds,
                  is_free_preview, created_at
        "#,
    )
    .bind(module_id)
    .bind(&new_lesson.title)
    .bind(new_lesson.position)
    .bind(&new_lesson.video_url)
    .bind(new_lesson.duration_seconds)
    .bind(new_lesson.is_free_preview)
    .fetch_one(pool)
    .await
}

pub async fn update_lesson(
    pool: &PgPool,
    id: Uuid,
    changes: UpdateCourseLesson,
) -> Result<Option<CourseLesson>, sqlx::Error> {
    let existing = match get_lesson(pool, id).await? {
        Some(l) => l,
        None => return Ok(None),
    };

    let title = changes.title.unwrap_or(existing.title);
    let position = changes.position.unwrap_or(existing.position);
    let video_url = changes.video_url.or(existing.video_url);
    let duration_seconds = changes.duration_seconds.or(existing.duration_seconds);
    let is_free_preview = changes.is_free_preview.unwrap_or(existing.is_free_preview);

    let lesson = sqlx::query_as::<_, CourseLesson>(
        r#"
        UPDATE course_lessons
        SET title = $1, position = $2, video_url = $3, duration_seconds = $4,
            is_free_preview = $5
        WHERE id = $6
        RETURNING id, module_id, title, position, video_url, duration_seconds,
                  is_free_preview, created_at
        "#,
    )
    .bind(&title)
    .bind(position)
    .bind(&video_url)
    .bind(duration_seconds)
    .bind(is_free_preview)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(Some(lesson))
}

pub async fn delete_lesson(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM course_lessons WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
