// src/services/quota_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::QuotaRepository,
    models::quota::{QuotaKind, QuotaStatus},
};

#[derive(Clone)]
pub struct QuotaService {
    repo: QuotaRepository,
}

impl QuotaService {
    pub fn new(repo: QuotaRepository) -> Self {
        Self { repo }
    }

    /// Projeção consultiva de todas as cotas da marca, para exibição.
    pub async fn status_for_brand(&self, brand_id: Uuid) -> Result<Vec<QuotaStatus>, AppError> {
        let rows = self.repo.list_for_brand(brand_id).await?;
        Ok(rows.iter().map(QuotaStatus::from_row).collect())
    }

    /// Checagem consultiva de um tipo só. NÃO reserva nada.
    pub async fn check(&self, brand_id: Uuid, kind: QuotaKind) -> Result<QuotaStatus, AppError> {
        let row = self.repo.find(brand_id, kind).await?;
        match row {
            Some(row) => Ok(QuotaStatus::from_row(&row)),
            // Marca sem linha de cota não tem o que consumir.
            None => Ok(QuotaStatus {
                kind: kind.as_str().to_string(),
                has_quota: false,
                remaining: 0,
                quota_limit: 0,
                used: 0,
            }),
        }
    }

    /// Consumo sancionado: uma ida só ao banco, checagem e incremento na
    /// mesma instrução. Cota esgotada vira a falha tipada QUOTA_EXCEEDED,
    /// distinta de erro de transporte/banco.
    pub async fn consume(
        &self,
        brand_id: Uuid,
        kind: QuotaKind,
        amount: i64,
    ) -> Result<(), AppError> {
        if amount <= 0 {
            return Err(AppError::InvalidInput(
                "A quantidade consumida deve ser positiva.".into(),
            ));
        }

        if self.repo.consume(brand_id, kind, amount).await? {
            return Ok(());
        }

        let remaining = self
            .repo
            .find(brand_id, kind)
            .await?
            .map(|q| (q.quota_limit - q.used).max(0))
            .unwrap_or(0);

        Err(AppError::QuotaExceeded { kind: kind.as_str().to_string(), remaining })
    }
}
