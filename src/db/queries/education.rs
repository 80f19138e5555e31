use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Education, NewEducation, UpdateEducation};

/// Education entries, most recent studies first, optionally per user.
pub async fn list_education(
    pool: &PgPool,
    user_id: Option<Uuid>,
) -> Result<Vec<Education>, sqlx::Error> {
    if let Some(user_id) = user_id {
        sqlx::query_as::<_, Education>(
            r#"
            SELECT id, user_id, institution, degree_or_course, field_of_study,
                   start_date, end_date, grade_or_score, location, description, created_at
            FROM education
            WHERE user_id = $1
            ORDER BY start_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, Education>(
            r#"
            SELECT id, user_id, institution, degree_or_course, field_of_study,
                   start_date, end_date, grade_or_score, location, description, created_at
            FROM education
            ORDER BY start_date DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }
}

pub async fn get_education(pool: &PgPool, id: Uuid) -> Result<Option<Education>, sqlx::Error> {
    sqlx::query_as::<_, Education>(
        r#"
        SELECT id, user_id, institution, degree_or_course, field_of_study,
               start_date, end_date, grade_or_score, location, description, created_at
        FROM education
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_education(
    pool: &PgPool,
    new_entry: NewEducation,
) -> Result<Education, sqlx::Error> {
    sqlx::query_as::<_, Education>(
        r#"
        INSERT INTO education (user_id, institution, degree_or_course, field_of_study,
                               start_date, end_date, grade_or_score, location, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, user_id, institution, degree_or_course, field_of_study,
                  start_date, end_date, grade_or_score, location, description, created_at
        "#,
    )
    .bind(new_entry.user_id)
    .bind(&new_entry.institution)
    .bind(&new_entry.degree_or_course)
    .bind(&new_entry.field_of_study)
    .bind(new_entry.start_date)
    .bind(new_entry.end_date)
    .bind(&new_entry.grade_or_score)
    .bind(&new_entry.location)
    .bind(&new_entry.description)
    .fetch_one(pool)
    .await
}

pub async fn update_education(
    pool: &PgPool,
    id: Uuid,
    changes: UpdateEducation,
) -> Result<Option<Education>, sqlx::Error> {
    let existing = match get_education(pool, id).await? {
        Some(e) => e,
        None => return Ok(None),
    };

    let institution = changes.institution.unwrap_or(existing.institution);
    let degree_or_course = changes.degree_or_course.unwrap_or(existing.degree_or_course);
    let field_of_study = changes.field_of_study.unwrap_or(existing.field_of_study);
    let start_date = changes.start_date.unwrap_or(existing.start_date);
    let end_date = changes.end_date.or(existing.end_date);
    let grade_or_score = changes.grade_or_score.or(existing.grade_or_score);
    let location = changes.location.unwrap_or(existing.location);
    let description = changes.description.or(existing.description);

    let entry = sqlx::query_as::<_, Education>(
        r#"
        UPDATE education
        SET institution = $1, degree_or_course = $2, field_of_study = $3,
            start_date = $4, end_date = $5, grade_or_score = $6,
            location = $7, description = $8
        WHERE id = $9
        RETURNING id, user_id, institution, degree_or_course, field_of_study,
                  start_date, end_date, grade_or_score, location, description, created_at
        "#,
    )
    .bind(&institution)
    .bind(&degree_or_course)
    .bind(&field_of_study)
    .bind(start_date)
    .bind(end_date)
    .bind(&grade_or_score)
    .bind(&location)
    .bind(&description)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(Some(entry))
}

pub async fn delete_education(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM education WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
