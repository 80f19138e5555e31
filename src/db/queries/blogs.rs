use chrono::Utc;
use sqlx::PgPool;

use crate::db::models::{Blog, BlogStatus, NewBlog, UpdateBlog};

/// Paginated blog listing, optionally filtered by status, newest first.
pub async fn list_blogs(
    pool: &PgPool,
    page: i64,
    page_size: i64,
    status: Option<BlogStatus>,
) -> Result<(Vec<Blog>, i64), sqlx::Error> {
    let offset = (page - 1) * page_size;

    if let Some(status) = status {
        let blogs = sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, user_id, title, slug, content, cover_image_url, status,
                   published_at, created_at, updated_at
            FROM blogs
            WHERE status = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(page_size)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blogs WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await?;

        Ok((blogs, total.0))
    } else {
        let blogs = sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, user_id, title, slug, content, cover_image_url, status,
                   published_at, created_at, updated_at
            FROM blogs
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blogs")
            .fetch_one(pool)
            .await?;

        Ok((blogs, total.0))
    }
}

pub async fn get_blog_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        r#"
        SELECT id, user_id, title, slug, content, cover_image_url, status,
               published_at, created_at, updated_at
        FROM blogs
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

/// Insert a blog and its tag join rows in one transaction. Creating a blog
/// directly in `published` status stamps `published_at`.
pub async fn create_blog(pool: &PgPool, new_blog: NewBlog) -> Result<Blog, sqlx::Error> {
    let status = new_blog.status.unwrap_or(BlogStatus::Draft);
    let published_at = (status == BlogStatus::Published).then(Utc::now);

    let mut tx = pool.begin().await?;

    let blog = sqlx::query_as::<_, Blog>(
        r#"
        INSERT INTO blogs (user_id, title, slug, content, cover_image_url, status, published_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, title, slug, content, cover_image_url, status,
                  published_at, created_at, updated_at
        "#,
    )
    .bind(new_blog.user_id)
    .bind(&new_blog.title)
    .bind(&new_blog.slug)
    .bind(&new_blog.content)
    .bind(&new_blog.cover_image_url)
    .bind(status)
    .bind(published_at)
    .fetch_one(&mut *tx)
    .await?;

    for tag_id in &new_blog.tag_ids {
        sqlx::query(
            "INSERT INTO blog_tags (blog_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(blog.id)
        .bind(tag_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(blog)
}

pub async fn update_blog(
    pool: &PgPool,
    slug: &str,
    changes: UpdateBlog,
) -> Result<Option<Blog>, sqlx::Error> {
    let existing = match get_blog_by_slug(pool, slug).await? {
        Some(b) => b,
        None => return Ok(None),
    };

    let title = changes.title.unwrap_or(existing.title);
    let content = changes.content.unwrap_or(existing.content);
    let cover_image_url = changes.cover_image_url.unwrap_or(existing.cover_image_url);
    let status = changes.status.unwrap_or(existing.status);

    // First transition into `published` stamps the timestamp; it survives
    // later archiving so re-publishing keeps the original date.
    let published_at = if status == BlogStatus::Published && existing.published_at.is_none() {
        Some(Utc::now())
    } else {
        existing.published_at
    };

    let mut tx = pool.begin().await?;

    let blog = sqlx::query_as::<_, Blog>(
        r#"
        UPDATE blogs
        SET title = $1, content = $2, cover_image_url = $3, status = $4,
            published_at = $5, updated_at = now()
        WHERE slug = $6
        RETURNING id, user_id, title, slug, content, cover_image_url, status,
                  published_at, created_at, updated_at
        "#,
    )
    .bind(&title)
    .bind(&content)
    .bind(&cover_image_url)
    .bind(status)
    .bind(published_at)
    .bind(slug)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(tag_ids) = &changes.tag_ids {
        sqlx::query("DELETE FROM blog_tags WHERE blog_id = $1")
            .bind(blog.id)
            .execute(&mut *tx)
            .await?;
        for tag_id in tag_ids {
            sqlx::query(
                "INSERT INTO blog_tags (blog_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(blog.id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    Ok(Some(blog))
}

/// Delete a blog; comments and tag join rows cascade.
pub async fn delete_blog_by_slug(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM blogs WHERE slug = $1")
        .bind(slug)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Published blogs for the RSS feed, newest first.
pub async fn list_published_blogs(pool: &PgPool, limit: i64) -> Result<Vec<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(
        r#"
        SELECT id, user_id, title, slug, content, cover_image_url, status,
               published_at, created_at, updated_at
        FROM blogs
        WHERE status = 'published'
        ORDER BY published_at DESC NULLS LAST
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
