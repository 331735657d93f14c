// src/db/notification_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::notification::Notification};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // O fan-out roda sempre DEPOIS do commit da mutação primária, então a
    // inserção nunca participa de transação alheia.
    pub async fn insert(
        &self,
        user_id: Uuid,
        brand_id: Option<Uuid>,
        kind: &str,
        title: &str,
        message: &str,
        metadata: &serde_json::Value,
    ) -> Result<Notification, AppError> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, brand_id, kind, title, message, metadata)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(brand_id)
        .bind(kind)
        .bind(title)
        .bind(message)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
             WHERE user_id = $1 AND (NOT $2 OR read = FALSE)
             ORDER BY read, created_at DESC
             LIMIT 100
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    // Só o destinatário marca como lida; o filtro por user_id garante que
    // um id de terceiro não afeta nada (0 linhas).
    pub async fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Option<Uuid>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
               SET read = TRUE
             WHERE user_id = $1 AND read = FALSE AND ($2::uuid IS NULL OR id = $2)
            "#,
        )
        .bind(user_id)
        .bind(notification_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
