use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewTag, Tag};

pub async fn list_tags(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT id, name, created_at FROM tags ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn create_tag(pool: &PgPool, new_tag: NewTag) -> Result<Tag, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        "INSERT INTO tags (name) VALUES ($1) RETURNING id, name, created_at",
    )
    .bind(&new_tag.name)
    .fetch_one(pool)
    .await
}

/// Delete a tag; the join rows on both sides disappear via cascade, the
/// blogs and projects themselves stay.
pub async fn delete_tag(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tags WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn tags_for_blog(pool: &PgPool, blog_id: Uuid) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name, t.created_at
        FROM tags t
        JOIN blog_tags bt ON bt.tag_id = t.id
        WHERE bt.blog_id = $1
        ORDER BY t.name
        "#,
    )
    .bind(blog_id)
    .fetch_all(pool)
    .await
}

pub async fn tags_for_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.id, t.name, t.created_at
        FROM tags t
        JOIN project_tags pt ON pt.tag_id = t.id
        WHERE pt.project_id = $1
        ORDER BY t.name
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}
