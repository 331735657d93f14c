// src/models/guidelines.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Ciclo de vida de uma versão de diretrizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GuidelinesStatus {
    Draft,
    PendingReview,
    Approved,
    Archived,
}

impl GuidelinesStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuidelinesStatus::Draft => "draft",
            GuidelinesStatus::PendingReview => "pending_review",
            GuidelinesStatus::Approved => "approved",
            GuidelinesStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandGuidelines {
    pub id: Uuid,

    #[schema(ignore)]
    pub brand_id: Uuid,

    #[schema(example = "approved")]
    pub status: String,

    // Documento estruturado (paleta, tipografia, tom de voz, etc).
    #[schema(value_type = Object)]
    pub content: serde_json::Value,

    pub version: i32,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertGuidelinesPayload {
    #[schema(value_type = Object)]
    pub content: serde_json::Value,

    // true -> a versão nasce como pending_review; false/ausente -> draft.
    #[serde(default)]
    pub submit_for_review: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuidelinesResponse {
    pub success: bool,
    pub guidelines: BrandGuidelines,
}

// Corpo do 202: existem diretrizes, mas nenhuma aprovada ainda.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuidelinesPendingResponse {
    pub success: bool,
    pub has_guidelines: bool,

    #[schema(example = "pending_review")]
    pub status: String,
}
