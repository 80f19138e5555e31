use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{BlogComment, NewBlogComment};

/// All comments on a blog, oldest first. Threading is reconstructed by the
/// caller from `parent_id`; replies can nest to any depth.
pub async fn list_comments_for_blog(
    pool: &PgPool,
    blog_id: Uuid,
) -> Result<Vec<BlogComment>, sqlx::Error> {
    sqlx::query_as::<_, BlogComment>(
        r#"
        SELECT id, blog_id, user_id, parent_id, content, created_at, updated_at
        FROM blog_comments
        WHERE blog_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(blog_id)
    .fetch_all(pool)
    .await
}

pub async fn get_comment(pool: &PgPool, id: Uuid) -> Result<Option<BlogComment>, sqlx::Error> {
    sqlx::query_as::<_, BlogComment>(
        r#"
        SELECT id, blog_id, user_id, parent_id, content, created_at, updated_at
        FROM blog_comments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_comment(
    pool: &PgPool,
    blog_id: Uuid,
    new_comment: NewBlogComment,
) -> Result<BlogComment, sqlx::Error> {
    sqlx::query_as::<_, BlogComment>(
        r#"
        INSERT INTO blog_comments (blog_id, user_id, parent_id, content)
        VALUES ($1, $2, $3, $4)
        RETURNING id, blog_id, user_id, parent_id, content, created_at, updated_at
        "#,
    )
    .bind(blog_id)
    .bind(new_comment.user_id)
    .bind(new_comment.parent_id)
    .bind(&new_comment.content)
    .fetch_one(pool)
    .await
}

/// Delete a comment and, via cascade, its whole reply subtree.
pub async fn delete_comment(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM blog_comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
