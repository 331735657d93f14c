// src/models/brand.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::rbac::BrandRole;

// A marca (tenant). Toda entidade do sistema é particionada por brand_id.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: Uuid,

    #[schema(example = "Acme Studio")]
    pub name: String,

    #[schema(example = "acme-studio")]
    pub slug: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da tabela-ponte brand_users. O papel vem como TEXT do banco e só
// é interpretado via BrandRole::parse (fail closed).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandMembership {
    pub id: Uuid,
    pub brand_id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "editor")]
    pub role: String,

    pub created_at: DateTime<Utc>,
}

impl BrandMembership {
    pub fn parsed_role(&self) -> Option<BrandRole> {
        BrandRole::parse(&self.role)
    }
}

// Membro da marca com os dados de perfil já juntados, para listagem.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandMemberView {
    pub id: Uuid,
    pub user_id: Uuid,

    #[schema(example = "ana@exemplo.com")]
    pub email: String,

    #[schema(example = "Ana Souza")]
    pub display_name: String,

    #[schema(example = "editor")]
    pub role: String,

    pub created_at: DateTime<Utc>,
}

// Uma marca do usuário com o papel dele nela (resposta de GET /api/brands).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandWithRole {
    pub id: Uuid,
    pub name: String,
    pub slug: String,

    #[schema(example = "owner")]
    pub role: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrandPayload {
    #[validate(length(min = 2, message = "O nome da marca deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Acme Studio")]
    pub name: String,

    // Quando ausente, o slug é derivado do nome.
    #[schema(example = "acme-studio")]
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRolePayload {
    pub member_id: Uuid,

    // Validado contra BrandRole::parse no serviço; string inválida é 400.
    #[validate(length(min = 1, message = "O novo papel é obrigatório."))]
    #[schema(example = "editor")]
    pub new_role: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InviteMemberPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "bruno@exemplo.com")]
    pub email: String,

    // Validado contra BrandRole::parse no serviço.
    #[validate(length(min = 1, message = "O papel é obrigatório."))]
    #[schema(example = "editor")]
    pub role: String,
}

// Resposta padrão das mutações de membro.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberMutationResponse {
    pub success: bool,

    #[schema(example = "Papel atualizado com sucesso.")]
    pub message: String,
}
