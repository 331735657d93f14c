// src/db/quota_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::quota::{BrandQuota, QuotaKind},
};

#[derive(Clone)]
pub struct QuotaRepository {
    pool: PgPool,
}

impl QuotaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Toda marca nasce com os três contadores zerados nos tetos padrão.
    pub async fn seed_defaults<'e, E>(&self, executor: E, brand_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let kinds: Vec<String> = QuotaKind::ALL.iter().map(|k| k.as_str().to_string()).collect();
        let limits: Vec<i64> = QuotaKind::ALL.iter().map(|k| k.default_limit()).collect();

        sqlx::query(
            r#"
            INSERT INTO brand_quotas (brand_id, kind, quota_limit)
            SELECT $1, kind, quota_limit
              FROM UNNEST($2::text[], $3::bigint[]) AS t (kind, quota_limit)
            ON CONFLICT (brand_id, kind) DO NOTHING
            "#,
        )
        .bind(brand_id)
        .bind(&kinds)
        .bind(&limits)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn list_for_brand(&self, brand_id: Uuid) -> Result<Vec<BrandQuota>, AppError> {
        let quotas = sqlx::query_as::<_, BrandQuota>(
            "SELECT * FROM brand_quotas WHERE brand_id = $1 ORDER BY kind",
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quotas)
    }

    pub async fn find(
        &self,
        brand_id: Uuid,
        kind: QuotaKind,
    ) -> Result<Option<BrandQuota>, AppError> {
        let quota = sqlx::query_as::<_, BrandQuota>(
            "SELECT * FROM brand_quotas WHERE brand_id = $1 AND kind = $2",
        )
        .bind(brand_id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(quota)
    }

    /// Único caminho sancionado de consumo: a função do banco faz a
    /// checagem e o incremento na MESMA instrução, em uma ida só.
    pub async fn consume(
        &self,
        brand_id: Uuid,
        kind: QuotaKind,
        amount: i64,
    ) -> Result<bool, AppError> {
        let consumed: bool = sqlx::query_scalar("SELECT consume_brand_quota($1, $2, $3)")
            .bind(brand_id)
            .bind(kind.as_str())
            .bind(amount)
            .fetch_one(&self.pool)
            .await?;

        Ok(consumed)
    }
}
