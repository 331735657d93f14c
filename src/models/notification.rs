// src/models/notification.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub brand_id: Option<Uuid>,

    #[schema(example = "role_changed")]
    pub kind: String,

    #[schema(example = "Seu papel mudou")]
    pub title: String,

    pub message: String,

    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,

    pub read: bool,
    pub created_at: DateTime<Utc>,
}

// Eventos que geram fan-out de notificação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    RoleChanged,
    MemberRemoved,
    MemberInvited,
    ConversationShared,
    ProjectShared,
    ShareResponded,
    MessagePosted,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::RoleChanged => "role_changed",
            NotificationKind::MemberRemoved => "member_removed",
            NotificationKind::MemberInvited => "member_invited",
            NotificationKind::ConversationShared => "conversation_shared",
            NotificationKind::ProjectShared => "project_shared",
            NotificationKind::ShareResponded => "share_responded",
            NotificationKind::MessagePosted => "message_posted",
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadPayload {
    // Ausente = marcar todas como lidas.
    pub notification_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadResponse {
    pub success: bool,
    pub updated: u64,
}
