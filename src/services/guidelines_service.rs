// src/services/guidelines_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BrandRepository, GuidelinesRepository},
    models::{
        auth::User,
        guidelines::{BrandGuidelines, GuidelinesStatus},
        rbac::{self, BrandRole, Permission},
    },
};

// Desfecho da leitura de diretrizes, mapeado pelo handler para
// 200 / 202 / 404.
#[derive(Debug)]
pub enum GuidelinesLookup {
    Approved(BrandGuidelines),
    // existe versão ativa, mas nenhuma aprovada ainda
    Pending(String),
    None,
}

/// Decisão pura da leitura: aprovada vence; senão, qualquer versão ativa
/// responde como pendente; senão, nada.
pub fn lookup_outcome(
    approved: Option<BrandGuidelines>,
    active_status: Option<String>,
) -> GuidelinesLookup {
    match (approved, active_status) {
        (Some(guidelines), _) => GuidelinesLookup::Approved(guidelines),
        (None, Some(status)) => GuidelinesLookup::Pending(status),
        (None, None) => GuidelinesLookup::None,
    }
}

#[derive(Clone)]
pub struct GuidelinesService {
    repo: GuidelinesRepository,
    brand_repo: BrandRepository,
    pool: PgPool,
}

impl GuidelinesService {
    pub fn new(repo: GuidelinesRepository, brand_repo: BrandRepository, pool: PgPool) -> Self {
        Self { repo, brand_repo, pool }
    }

    // Rota com brandId no path: a associação é verificada aqui. Quem não
    // é membro recebe 403 sem descobrir se a marca sequer existe.
    async fn require_role(&self, brand_id: Uuid, user: &User) -> Result<BrandRole, AppError> {
        self.brand_repo
            .find_membership(brand_id, user.id)
            .await?
            .and_then(|m| m.parsed_role())
            .ok_or_else(|| AppError::Forbidden("Você não tem acesso a esta marca.".into()))
    }

    pub async fn get(&self, brand_id: Uuid, user: &User) -> Result<GuidelinesLookup, AppError> {
        self.require_role(brand_id, user).await?;

        let approved = self.repo.find_approved(brand_id).await?;
        if approved.is_some() {
            return Ok(lookup_outcome(approved, None));
        }

        let active_status = self.repo.has_any_active(brand_id).await?;
        Ok(lookup_outcome(None, active_status))
    }

    /// Cria ou substitui a cópia de trabalho (draft ou pending_review).
    pub async fn upsert_working_copy(
        &self,
        brand_id: Uuid,
        user: &User,
        content: serde_json::Value,
        submit_for_review: bool,
    ) -> Result<BrandGuidelines, AppError> {
        let role = self.require_role(brand_id, user).await?;
        if !rbac::has_permission(role, Permission::EditGuidelines) {
            return Err(AppError::Forbidden(
                "Seu papel não permite editar diretrizes.".into(),
            ));
        }

        let status = if submit_for_review {
            GuidelinesStatus::PendingReview
        } else {
            GuidelinesStatus::Draft
        };

        let mut tx = self.pool.begin().await?;

        let existing = self.repo.find_working_copy(&mut *tx, brand_id).await?;
        let result = match existing {
            Some(current) => {
                self.repo
                    .update_content(&mut *tx, current.id, status.as_str(), &content)
                    .await?
            }
            None => {
                self.repo
                    .insert(&mut *tx, brand_id, status.as_str(), &content, user.id)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    /// Promove a cópia de trabalho a aprovada. A versão aprovada anterior
    /// (se houver) é arquivada na mesma transação; o índice único parcial
    /// garante no máximo uma aprovada por marca.
    pub async fn approve(&self, brand_id: Uuid, user: &User) -> Result<BrandGuidelines, AppError> {
        let role = self.require_role(brand_id, user).await?;
        if !rbac::has_permission(role, Permission::ApproveGuidelines) {
            return Err(AppError::Forbidden(
                "Seu papel não permite aprovar diretrizes.".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let working = self
            .repo
            .find_working_copy(&mut *tx, brand_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Nenhuma versão pendente para aprovar.".into()))?;

        self.repo.archive_approved(&mut *tx, brand_id).await?;
        let approved = self.repo.promote(&mut *tx, working.id).await?;

        tx.commit().await?;
        Ok(approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn guidelines(status: &str) -> BrandGuidelines {
        BrandGuidelines {
            id: Uuid::new_v4(),
            brand_id: Uuid::new_v4(),
            status: status.into(),
            content: json!({"paleta": ["#102030"]}),
            version: 1,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn aprovada_responde_como_aprovada() {
        let outcome = lookup_outcome(Some(guidelines("approved")), None);
        assert!(matches!(outcome, GuidelinesLookup::Approved(_)));
    }

    #[test]
    fn pendente_sem_aprovada_responde_202() {
        let outcome = lookup_outcome(None, Some("pending_review".into()));
        match outcome {
            GuidelinesLookup::Pending(status) => assert_eq!(status, "pending_review"),
            other => panic!("esperava Pending, veio {:?}", other),
        }
    }

    #[test]
    fn sem_nenhuma_versao_responde_404() {
        assert!(matches!(lookup_outcome(None, None), GuidelinesLookup::None));
    }
}
