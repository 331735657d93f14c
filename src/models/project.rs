// src/models/project.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,

    #[schema(ignore)]
    pub brand_id: Uuid,

    pub user_id: Uuid,

    #[schema(example = "Rebranding 2026")]
    pub name: String,

    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectShare {
    pub id: Uuid,
    pub project_id: Uuid,
    pub shared_with: Uuid,

    #[schema(example = "read")]
    pub permission: String,

    #[schema(example = "pending")]
    pub status: String,

    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

// Projeto compartilhado COM o chamador, para a listagem.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SharedProjectView {
    pub id: Uuid,

    #[schema(example = "Rebranding 2026")]
    pub name: String,

    pub owner_name: String,

    #[schema(example = "read")]
    pub permission: String,

    pub shared_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectPayload {
    #[validate(length(min = 1, message = "O nome do projeto é obrigatório."))]
    #[schema(example = "Rebranding 2026")]
    pub name: String,

    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareProjectPayload {
    pub project_id: Uuid,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "bruno@exemplo.com")]
    pub email: String,

    #[schema(example = "read")]
    pub permission: String,
}
