// src/handlers/notifications.rs

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::notification::{MarkReadPayload, MarkReadResponse, Notification},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    #[serde(default)]
    pub unread_only: bool,
}

// GET /api/notifications?unreadOnly=
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    responses(
        (status = 200, description = "Notificações do chamador (não lidas primeiro)", body = Vec<Notification>)
    ),
    params(ListNotificationsQuery),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = app_state
        .notification_repo
        .list_for_user(user.0.id, query.unread_only)
        .await?;

    Ok(Json(notifications))
}

// PATCH /api/notifications/read
#[utoipa::path(
    patch,
    path = "/api/notifications/read",
    tag = "Notifications",
    request_body = MarkReadPayload,
    responses(
        (status = 200, description = "Notificações marcadas como lidas", body = MarkReadResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<MarkReadPayload>,
) -> Result<Json<MarkReadResponse>, AppError> {
    // Só as próprias notificações: o filtro por user_id está na query.
    let updated = app_state
        .notification_repo
        .mark_read(user.0.id, payload.notification_id)
        .await?;

    Ok(Json(MarkReadResponse { success: true, updated }))
}
