// src/handlers/conversations.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, brand::BrandMember},
    models::conversation::{
        CollaborativeMessagesResponse, Conversation, ConversationShare, CreateConversationPayload,
        Message, PostMessagePayload, RespondSharePayload, ShareConversationPayload,
        SharedConversationView,
    },
};

// POST /api/conversations
#[utoipa::path(
    post,
    path = "/api/conversations",
    tag = "Conversations",
    request_body = CreateConversationPayload,
    responses(
        (status = 201, description = "Conversa criada", body = Conversation)
    ),
    params(("x-brand-id" = Uuid, Header, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn create_conversation(
    State(app_state): State<AppState>,
    member: BrandMember,
    Json(payload): Json<CreateConversationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let conversation = app_state
        .conversation_repo
        .create(
            &app_state.db_pool,
            member.brand_id,
            member.user.id,
            payload.project_id,
            &payload.title,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(conversation)))
}

// GET /api/conversations
#[utoipa::path(
    get,
    path = "/api/conversations",
    tag = "Conversations",
    responses(
        (status = 200, description = "Conversas do chamador na marca", body = Vec<Conversation>)
    ),
    params(("x-brand-id" = Uuid, Header, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn list_conversations(
    State(app_state): State<AppState>,
    member: BrandMember,
) -> Result<Json<Vec<Conversation>>, AppError> {
    let conversations = app_state
        .conversation_repo
        .list_for_owner(member.brand_id, member.user.id)
        .await?;

    Ok(Json(conversations))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CollaborativeMessagesQuery {
    pub conversation_id: Uuid,
}

// GET /api/collaborative-messages?conversationId=
#[utoipa::path(
    get,
    path = "/api/collaborative-messages",
    tag = "Conversations",
    responses(
        (status = 200, description = "Mensagens + flags de colaboração", body = CollaborativeMessagesResponse),
        (status = 401, description = "Não autenticado"),
        (status = 403, description = "Sem posse e sem share aceito"),
        (status = 404, description = "Conversa inexistente")
    ),
    params(CollaborativeMessagesQuery),
    security(("api_jwt" = []))
)]
pub async fn get_collaborative_messages(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<CollaborativeMessagesQuery>,
) -> Result<Json<CollaborativeMessagesResponse>, AppError> {
    let response = app_state
        .sharing_service
        .collaborative_messages(&user.0, query.conversation_id)
        .await?;

    Ok(Json(response))
}

// POST /api/collaborative-messages
#[utoipa::path(
    post,
    path = "/api/collaborative-messages",
    tag = "Conversations",
    request_body = PostMessagePayload,
    responses(
        (status = 201, description = "Mensagem publicada", body = Message),
        (status = 402, description = "Cota de tokens esgotada"),
        (status = 403, description = "Acesso somente leitura ou inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn post_collaborative_message(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<PostMessagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let message = app_state
        .sharing_service
        .post_message(&user.0, payload.conversation_id, &payload.content)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

// POST /api/conversations/share
#[utoipa::path(
    post,
    path = "/api/conversations/share",
    tag = "Conversations",
    request_body = ShareConversationPayload,
    responses(
        (status = 201, description = "Convite criado (pending)", body = ConversationShare),
        (status = 403, description = "Só o dono compartilha"),
        (status = 404, description = "Conversa ou usuário inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn share_conversation(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ShareConversationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let share = app_state
        .sharing_service
        .share_conversation(
            &user.0,
            payload.conversation_id,
            &payload.email,
            &payload.permission,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(share)))
}

// POST /api/shares/respond
#[utoipa::path(
    post,
    path = "/api/shares/respond",
    tag = "Conversations",
    request_body = RespondSharePayload,
    responses(
        (status = 200, description = "Convite respondido", body = ConversationShare),
        (status = 403, description = "Convite de outra pessoa"),
        (status = 404, description = "Convite inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn respond_share(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<RespondSharePayload>,
) -> Result<Json<ConversationShare>, AppError> {
    let share = app_state
        .sharing_service
        .respond_share(&user.0, payload.share_id, payload.accept)
        .await?;

    Ok(Json(share))
}

// GET /api/shared-conversations/list
#[utoipa::path(
    get,
    path = "/api/shared-conversations/list",
    tag = "Conversations",
    responses(
        (status = 200, description = "Conversas compartilhadas com o chamador", body = Vec<SharedConversationView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_shared_conversations(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<SharedConversationView>>, AppError> {
    let shared = app_state.conversation_repo.list_shared_with(user.0.id).await?;
    Ok(Json(shared))
}
