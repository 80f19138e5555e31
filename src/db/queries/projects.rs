use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewProject, Project, UpdateProject};

pub async fn list_projects(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, user_id, title, description, tech_stack, difficulty,
               github_url, live_url, image_urls, created_at, updated_at
        FROM projects
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_project(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        SELECT id, user_id, title, description, tech_stack, difficulty,
               github_url, live_url, image_urls, created_at, updated_at
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Insert a project and its tag join rows in one transaction.
pub async fn create_project(
    pool: &PgPool,
    new_project: NewProject,
) -> Result<Project, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (user_id, title, description, tech_stack, difficulty,
                              github_url, live_url, image_urls)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_id, title, description, tech_stack, difficulty,
                  github_url, live_url, image_urls, created_at, updated_at
        "#,
    )
    .bind(new_project.user_id)
    .bind(&new_project.title)
    .bind(&new_project.description)
    .bind(&new_project.tech_stack)
    .bind(new_project.difficulty)
    .bind(&new_project.github_url)
    .bind(&new_project.live_url)
    .bind(&new_project.image_urls)
    .fetch_one(&mut *tx)
    .await?;

    for tag_id in &new_project.tag_ids {
        sqlx::query(
            "INSERT INTO project_tags (project_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(project.id)
        .bind(tag_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(project)
}

pub async fn update_project(
    pool: &PgPool,
    id: Uuid,
    changes: UpdateProject,
) -> Result<Option<Project>, sqlx::Error> {
    let existing = match get_project(pool, id).await? {
        Some(p) => p,
        None => return Ok(None),
    };

    let title = changes.title.unwrap_or(existing.title);
    let description = changes.description.unwrap_or(existing.description);
    let tech_stack = changes.tech_stack.unwrap_or(existing.tech_stack);
    let difficulty = changes.difficulty.unwrap_or(existing.difficulty);
    let github_url = changes.github_url.unwrap_or(existing.github_url);
    let live_url = changes.live_url.or(existing.live_url);
    let image_urls = changes.image_urls.unwrap_or(existing.image_urls);

    let mut tx = pool.begin().await?;

    let project = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET title = $1, description = $2, tech_stack = $3, difficulty = $4,
            github_url = $5, live_url = $6, image_urls = $7, updated_at = now()
        WHERE id = $8
        RETURNING id, user_id, title, description, tech_stack, difficulty,
                  github_url, live_url, image_urls, created_at, updated_at
        "#,
    )
    .bind(&title)
    .bind(&description)
    .bind(&tech_stack)
    .bind(difficulty)
    .bind(&github_url)
    .bind(&live_url)
    .bind(&image_urls)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    // Replace-set semantics: passing tagIds swaps the whole tag set.
    if let Some(tag_ids) = &changes.tag_ids {
        sqlx::query("DELETE FROM project_tags WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for tag_id in tag_ids {
            sqlx::query(
                "INSERT INTO project_tags (project_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    Ok(Some(project))
}

pub async fn delete_project(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
