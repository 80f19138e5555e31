use sqlx::PgPool;

use crate::db::models::{NewSubscriber, Subscriber};

pub async fn list_subscribers(pool: &PgPool) -> Result<Vec<Subscriber>, sqlx::Error> {
    sqlx::query_as::<_, Subscriber>(
        r#"
        SELECT id, email, name, subscribed_at, unsubscribed_at
        FROM subscribers
        ORDER BY subscribed_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Subscribe an email address. Re-subscribing an existing address clears
/// `unsubscribed_at` and refreshes `subscribed_at` instead of failing the
/// unique constraint.
pub async fn subscribe(
    pool: &PgPool,
    new_subscriber: NewSubscriber,
) -> Result<Subscriber, sqlx::Error> {
    sqlx::query_as::<_, Subscriber>(
        r#"
        INSERT INTO subscribers (email, name)
        VALUES ($1, $2)
        ON CONFLICT (email) DO UPDATE SET
            name = COALESCE(EXCLUDED.name, subscribers.name),
            subscribed_at = now(),
            unsubscribed_at = NULL
        RETURNING id, email, name, subscribed_at, unsubscribed_at
        "#,
    )
    .bind(&new_subscriber.email)
    .bind(&new_subscriber.name)
    .fetch_one(pool)
    .await
}

/// Stamp `unsubscribed_at`; the row is kept for audit. Returns false when
/// the address was never subscribed.
pub async fn unsubscribe(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE subscribers SET unsubscribed_at = now() WHERE email = $1",
    )
    .bind(email)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
