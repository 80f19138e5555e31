use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Certification, NewCertification, UpdateCertification};

/// Certifications, most recently issued first, optionally per user.
pub async fn list_certifications(
    pool: &PgPool,
    user_id: Option<Uuid>,
) -> Result<Vec<Certification>, sqlx::Error> {
    if let Some(user_id) = user_id {
        sqlx::query_as::<_, Certification>(
            r#"
            SELECT id, user_id, title, issued_by, issue_date, expiry_date,
                   credential_id, credential_url, file_url, description, created_at
            FROM certifications
            WHERE user_id = $1
            ORDER BY issue_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, Certification>(
            r#"
            SELECT id, user_id, title, issued_by, issue_date, expiry_date,
                   credential_id, credential_url, file_url, description, created_at
            FROM certifications
            ORDER BY issue_date DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }
}

pub async fn get_certification(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Certification>, sqlx::Error> {
    sqlx::query_as::<_, Certification>(
        r#"
        SELECT id, user_id, title, issued_by, issue_date, expiry_date,
               credential_id, credential_url, file_url, description, created_at
        FROM certifications
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_certification(
    pool: &PgPool,
    new_cert: NewCertification,
) -> Result<Certification, sqlx::Error> {
    sqlx::query_as::<_, Certification>(
        r#"
        INSERT INTO certifications (user_id, title, issued_by, issue_date, expiry_date,
                                    credential_id, credential_url, file_url, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, user_id, title, issued_by, issue_date, expiry_date,
                  credential_id, credential_url, file_url, description, created_at
        "#,
    )
    .bind(new_cert.user_id)
    .bind(&new_cert.title)
    .bind(&new_cert.issued_by)
    .bind(new_cert.issue_date)
    .bind(new_cert.expiry_date)
    .bind(&new_cert.credential_id)
    .bind(&new_cert.credential_url)
    .bind(&new_cert.file_url)
    .bind(&new_cert.description)
    .fetch_one(pool)
    .await
}

pub async fn update_certification(
    pool: &PgPool,
    id: Uuid,
    changes: UpdateCertification,
) -> Result<Option<Certification>, sqlx::Error> {
    let existing = match get_certification(pool, id).await? {
        Some(c) => c,
        None => return Ok(None),
    };

    let title = changes.title.unwrap_or(existing.title);
    let issued_by = changes.issued_by.unwrap_or(existing.issued_by);
    let issue_date = changes.issue_date.unwrap_or(existing.issue_date);
    let expiry_date = changes.expiry_date.or(existing.expiry_date);
    let credential_id = changes.credential_id.or(existing.credential_id);
    let credential_url = changes.credential_url.or(existing.credential_url);
    let file_url = changes.file_url.unwrap_or(existing.file_url);
    let description = changes.description.or(existing.description);

    let cert = sqlx::query_as::<_, Certification>(
        r#"
        UPDATE certifications
        SET title = $1, issued_by = $2, issue_date = $3, expiry_date = $4,
            credential_id = $5, credential_url = $6, file_url = $7, description = $8
        WHERE id = $9
        RETURNING id, user_id, title, issued_by, issue_date, expiry_date,
                  credential_id, credential_url, file_url, description, created_at
        "#,
    )
    .bind(&title)
    .bind(&issued_by)
    .bind(issue_date)
    .bind(expiry_date)
    .bind(&credential_id)
    .bind(&credential_url)
    .bind(&file_url)
    .bind(&description)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(Some(cert))
}

pub async fn delete_certification(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM certifications WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
