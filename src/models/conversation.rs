// src/models/conversation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Permissão concedida por um compartilhamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SharePermission {
    Read,
    Write,
}

impl SharePermission {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "read" => Some(SharePermission::Read),
            "write" => Some(SharePermission::Write),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SharePermission::Read => "read",
            SharePermission::Write => "write",
        }
    }
}

// Estado do convite. Apenas `accepted` concede acesso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShareStatus {
    Pending,
    Accepted,
    Declined,
}

impl ShareStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(ShareStatus::Pending),
            "accepted" => Some(ShareStatus::Accepted),
            "declined" => Some(ShareStatus::Declined),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShareStatus::Pending => "pending",
            ShareStatus::Accepted => "accepted",
            ShareStatus::Declined => "declined",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Uuid,

    #[schema(ignore)]
    pub brand_id: Uuid,

    // Dono exclusivo; visibilidade adicional só via compartilhamentos.
    pub user_id: Uuid,

    pub project_id: Option<Uuid>,

    #[schema(example = "Campanha de inverno")]
    pub title: String,

    pub archived: bool,
    pub last_message_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationShare {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub shared_with: Uuid,

    #[schema(example = "write")]
    pub permission: String,

    #[schema(example = "accepted")]
    pub status: String,

    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl ConversationShare {
    pub fn parsed_permission(&self) -> Option<SharePermission> {
        SharePermission::parse(&self.permission)
    }

    pub fn is_accepted(&self) -> bool {
        ShareStatus::parse(&self.status) == Some(ShareStatus::Accepted)
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,

    #[schema(example = "user")]
    pub role: String,

    pub content: String,

    // Autor, para conversas colaborativas. Mensagens do assistente não têm.
    pub user_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

// Mensagem enriquecida para a resposta do endpoint colaborativo.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: Uuid,

    #[schema(example = "user")]
    pub role: String,

    pub content: String,
    pub user_id: Option<Uuid>,

    #[schema(example = "Ana Souza")]
    pub display_name: Option<String>,

    pub is_current_user: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollaborativeMessagesResponse {
    pub messages: Vec<MessageView>,
    pub is_collaborative: bool,
    pub is_owner: bool,
}

// Conversa compartilhada COM o chamador, para a listagem.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SharedConversationView {
    pub id: Uuid,

    #[schema(example = "Campanha de inverno")]
    pub title: String,

    pub owner_name: String,

    #[schema(example = "write")]
    pub permission: String,

    pub last_message_at: Option<DateTime<Utc>>,
    pub shared_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    #[schema(example = "Campanha de inverno")]
    pub title: String,

    pub project_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShareConversationPayload {
    pub conversation_id: Uuid,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "bruno@exemplo.com")]
    pub email: String,

    // Validado contra SharePermission::parse no serviço.
    #[schema(example = "write")]
    pub permission: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondSharePayload {
    pub share_id: Uuid,
    pub accept: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostMessagePayload {
    pub conversation_id: Uuid,

    #[validate(length(min = 1, message = "A mensagem não pode ser vazia."))]
    pub content: String,
}
