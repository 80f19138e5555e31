use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewUser, UpdateUser, User};

/// Fetch all users in storage order.
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, full_name, email, password_hash, role, created_at, updated_at FROM users",
    )
    .fetch_all(pool)
    .await
}

pub async fn get_user(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, full_name, email, password_hash, role, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_user(pool: &PgPool, new_user: NewUser) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (full_name, email, password_hash, role)
        VALUES ($1, $2, $3, COALESCE($4, 'editor'::user_role))
        RETURNING id, full_name, email, password_hash, role, created_at, updated_at
        "#,
    )
    .bind(&new_user.full_name)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(new_user.role)
    .fetch_one(pool)
    .await
}

pub async fn update_user(
    pool: &PgPool,
    id: Uuid,
    changes: UpdateUser,
) -> Result<Option<User>, sqlx::Error> {
    let existing = match get_user(pool, id).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    let full_name = changes.full_name.unwrap_or(existing.full_name);
    let email = changes.email.unwrap_or(existing.email);
    let password_hash = changes.password_hash.unwrap_or(existing.password_hash);
    let role = changes.role.unwrap_or(existing.role);

    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET full_name = $1, email = $2, password_hash = $3, role = $4, updated_at = now()
        WHERE id = $5
        RETURNING id, full_name, email, password_hash, role, created_at, updated_at
        "#,
    )
    .bind(&full_name)
    .bind(&email)
    .bind(&password_hash)
    .bind(role)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(Some(user))
}

/// Delete a user. Everything the user owns (projects, blogs, education,
/// certifications, courses and their modules/lessons, purchases, comments)
/// goes with it through the ON DELETE CASCADE chain.
pub async fn delete_user(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
