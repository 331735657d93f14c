// src/models/quota.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Tipos de operação medida por cota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuotaKind {
    PromptTokens,
    ImageGenerations,
    WorkflowExecutions,
}

impl QuotaKind {
    pub const ALL: [QuotaKind; 3] = [
        QuotaKind::PromptTokens,
        QuotaKind::ImageGenerations,
        QuotaKind::WorkflowExecutions,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "prompt_tokens" => Some(QuotaKind::PromptTokens),
            "image_generations" => Some(QuotaKind::ImageGenerations),
            "workflow_executions" => Some(QuotaKind::WorkflowExecutions),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaKind::PromptTokens => "prompt_tokens",
            QuotaKind::ImageGenerations => "image_generations",
            QuotaKind::WorkflowExecutions => "workflow_executions",
        }
    }

    // Tetos iniciais de uma marca recém-criada.
    pub fn default_limit(&self) -> i64 {
        match self {
            QuotaKind::PromptTokens => 1_000_000,
            QuotaKind::ImageGenerations => 200,
            QuotaKind::WorkflowExecutions => 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandQuota {
    #[schema(ignore)]
    pub brand_id: Uuid,

    #[schema(example = "prompt_tokens")]
    pub kind: String,

    pub quota_limit: i64,
    pub used: i64,
    pub updated_at: DateTime<Utc>,
}

// Projeção consultiva para exibição. NÃO reserva nada: o consumo real só
// acontece pela função atômica do banco.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    #[schema(example = "prompt_tokens")]
    pub kind: String,

    pub has_quota: bool,
    pub remaining: i64,
    pub quota_limit: i64,
    pub used: i64,
}

impl QuotaStatus {
    pub fn from_row(row: &BrandQuota) -> Self {
        let remaining = (row.quota_limit - row.used).max(0);
        Self {
            kind: row.kind.clone(),
            has_quota: remaining > 0,
            remaining,
            quota_limit: row.quota_limit,
            used: row.used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn row(limit: i64, used: i64) -> BrandQuota {
        BrandQuota {
            brand_id: Uuid::new_v4(),
            kind: "prompt_tokens".into(),
            quota_limit: limit,
            used,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn projecao_calcula_o_restante() {
        let status = QuotaStatus::from_row(&row(100, 30));
        assert!(status.has_quota);
        assert_eq!(status.remaining, 70);
    }

    #[test]
    fn cota_esgotada_nao_fica_negativa() {
        let status = QuotaStatus::from_row(&row(100, 100));
        assert!(!status.has_quota);
        assert_eq!(status.remaining, 0);
    }

    #[test]
    fn kind_desconhecido_nao_e_aceito() {
        assert_eq!(QuotaKind::parse("video_minutes"), None);
        for kind in QuotaKind::ALL {
            assert_eq!(QuotaKind::parse(kind.as_str()), Some(kind));
        }
    }
}
