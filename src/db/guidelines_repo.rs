// src/db/guidelines_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::guidelines::BrandGuidelines};

#[derive(Clone)]
pub struct GuidelinesRepository {
    pool: PgPool,
}

impl GuidelinesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // A única linha autoritativa: filtro por status na leitura.
    pub async fn find_approved(&self, brand_id: Uuid) -> Result<Option<BrandGuidelines>, AppError> {
        let guidelines = sqlx::query_as::<_, BrandGuidelines>(
            "SELECT * FROM brand_guidelines WHERE brand_id = $1 AND status = 'approved'",
        )
        .bind(brand_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(guidelines)
    }

    /// A cópia de trabalho mais recente (draft ou pending_review), se houver.
    pub async fn find_working_copy<'e, E>(
        &self,
        executor: E,
        brand_id: Uuid,
    ) -> Result<Option<BrandGuidelines>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let guidelines = sqlx::query_as::<_, BrandGuidelines>(
            r#"
            SELECT * FROM brand_guidelines
             WHERE brand_id = $1 AND status IN ('draft', 'pending_review')
             ORDER BY updated_at DESC
             LIMIT 1
            "#,
        )
        .bind(brand_id)
        .fetch_optional(executor)
        .await?;

        Ok(guidelines)
    }

    pub async fn has_any_active(&self, brand_id: Uuid) -> Result<Option<String>, AppError> {
        // Devolve o status da versão não-arquivada mais recente, se existir.
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT status FROM brand_guidelines
             WHERE brand_id = $1 AND status <> 'archived'
             ORDER BY updated_at DESC
             LIMIT 1
            "#,
        )
        .bind(brand_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(status,)| status))
    }

    // A versão é sequencial por marca; o subselect roda na mesma instrução.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        brand_id: Uuid,
        status: &str,
        content: &serde_json::Value,
        created_by: Uuid,
    ) -> Result<BrandGuidelines, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let guidelines = sqlx::query_as::<_, BrandGuidelines>(
            r#"
            INSERT INTO brand_guidelines (brand_id, status, content, version, created_by)
            VALUES ($1, $2, $3,
                    (SELECT COALESCE(MAX(version), 0) + 1 FROM brand_guidelines WHERE brand_id = $1),
                    $4)
            RETURNING *
            "#,
        )
        .bind(brand_id)
        .bind(status)
        .bind(content)
        .bind(created_by)
        .fetch_one(executor)
        .await?;

        Ok(guidelines)
    }

    pub async fn update_content<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: &str,
        content: &serde_json::Value,
    ) -> Result<BrandGuidelines, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let guidelines = sqlx::query_as::<_, BrandGuidelines>(
            r#"
            UPDATE brand_guidelines
               SET status = $2, content = $3, updated_at = now()
             WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(content)
        .fetch_one(executor)
        .await?;

        Ok(guidelines)
    }

    /// Arquiva a versão aprovada atual (se houver) — passo um da
    /// promoção; o índice único parcial garante que nunca existam duas
    /// aprovadas ao mesmo tempo.
    pub async fn archive_approved<'e, E>(&self, executor: E, brand_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE brand_guidelines
               SET status = 'archived', updated_at = now()
             WHERE brand_id = $1 AND status = 'approved'
            "#,
        )
        .bind(brand_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn promote<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<BrandGuidelines, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let guidelines = sqlx::query_as::<_, BrandGuidelines>(
            r#"
            UPDATE brand_guidelines
               SET status = 'approved', updated_at = now()
             WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(executor)
        .await?;

        Ok(guidelines)
    }
}
