use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewPurchase, Purchase};

/// Purchases and donations, newest first, optionally per user.
pub async fn list_purchases(
    pool: &PgPool,
    user_id: Option<Uuid>,
) -> Result<Vec<Purchase>, sqlx::Error> {
    if let Some(user_id) = user_id {
        sqlx::query_as::<_, Purchase>(
            r#"
            SELECT id, user_id, course_id, amount, payment_method, external_payment_id,
                   is_donation, status, message, created_at
            FROM purchases
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query_as::<_, Purchase>(
            r#"
            SELECT id, user_id, course_id, amount, payment_method, external_payment_id,
                   is_donation, status, message, created_at
            FROM purchases
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }
}

pub async fn get_purchase(pool: &PgPool, id: Uuid) -> Result<Option<Purchase>, sqlx::Error> {
    sqlx::query_as::<_, Purchase>(
        r#"
        SELECT id, user_id, course_id, amount, payment_method, external_payment_id,
               is_donation, status, message, created_at
        FROM purchases
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Record a purchase or donation. Status starts at 'pending'; the payment
/// provider callback is expected to move it along via `update_purchase_status`.
pub async fn create_purchase(
    pool: &PgPool,
    new_purchase: NewPurchase,
) -> Result<Purchase, sqlx::Error> {
    sqlx::query_as::<_, Purchase>(
        r#"
        INSERT INTO purchases (user_id, course_id, amount, payment_method,
                               external_payment_id, is_donation, message)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, user_id, course_id, amount, payment_method, external_payment_id,
                  is_donation, status, message, created_at
        "#,
    )
    .bind(new_purchase.user_id)
    .bind(new_purchase.course_id)
    .bind(new_purchase.amount)
    .bind(new_purchase.payment_method)
    .bind(&new_purchase.external_payment_id)
    .bind(new_purchase.is_donation)
    .bind(&new_purchase.message)
    .fetch_one(pool)
    .await
}

pub async fn update_purchase_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<Option<Purchase>, sqlx::Error> {
    sqlx::query_as::<_, Purchase>(
        r#"
        UPDATE purchases
        SET status = $1
        WHERE id = $2
        RETURNING id, user_id, course_id, amount, payment_method, external_payment_id,
                  is_donation, status, message, created_at
        "#,
    )
    .bind(status)
    .bind(id)
    .fetch_optional(pool)
    .await
}
