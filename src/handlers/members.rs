// src/handlers/members.rs

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
    middleware::{
        auth::AuthenticatedUser,
        brand::{BrandContext, BrandMember},
    },
    models::brand::{
        BrandMemberView, BrandMembership, InviteMemberPayload, MemberMutationResponse,
        UpdateMemberRolePayload,
    },
};

// GET /api/brand-members
#[utoipa::path(
    get,
    path = "/api/brand-members",
    tag = "Members",
    responses(
        (status = 200, description = "Membros da marca", body = Vec<BrandMemberView>)
    ),
    params(("x-brand-id" = Uuid, Header, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn list_members(
    State(app_state): State<AppState>,
    member: BrandMember,
) -> Result<Json<Vec<BrandMemberView>>, AppError> {
    let members = app_state.brand_repo.list_members(member.brand_id).await?;
    Ok(Json(members))
}

// PATCH /api/brand-members/role
//
// A cadeia de pré-condições do serviço exige validar o papel ANTES da
// membership do chamador, por isso aqui só o cabeçalho é extraído.
#[utoipa::path(
    patch,
    path = "/api/brand-members/role",
    tag = "Members",
    request_body = UpdateMemberRolePayload,
    responses(
        (status = 200, description = "Papel atualizado", body = MemberMutationResponse),
        (status = 400, description = "Papel inválido ou chamador sem membership"),
        (status = 403, description = "Apenas owners alteram papéis / único owner"),
        (status = 404, description = "Membro não encontrado")
    ),
    params(("x-brand-id" = Uuid, Header, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn update_member_role(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    brand: BrandContext,
    Json(payload): Json<UpdateMemberRolePayload>,
) -> Result<Json<MemberMutationResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let message = app_state
        .member_service
        .change_role(&user.0, brand.0, payload.member_id, &payload.new_role)
        .await?;

    Ok(Json(MemberMutationResponse { success: true, message }))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMemberQuery {
    pub member_id: Uuid,
}

// DELETE /api/brand-members/role?memberId=
#[utoipa::path(
    delete,
    path = "/api/brand-members/role",
    tag = "Members",
    responses(
        (status = 200, description = "Membro removido", body = MemberMutationResponse),
        (status = 400, description = "Auto-remoção não suportada"),
        (status = 403, description = "Sem permissão / admin não remove owner"),
        (status = 404, description = "Membro não encontrado")
    ),
    params(
        RemoveMemberQuery,
        ("x-brand-id" = Uuid, Header, description = "ID da marca")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_member(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    brand: BrandContext,
    Query(query): Query<RemoveMemberQuery>,
) -> Result<Json<MemberMutationResponse>, AppError> {
    let message = app_state
        .member_service
        .remove_member(&user.0, brand.0, query.member_id)
        .await?;

    Ok(Json(MemberMutationResponse { success: true, message }))
}

// POST /api/brand-members/invite
#[utoipa::path(
    post,
    path = "/api/brand-members/invite",
    tag = "Members",
    request_body = InviteMemberPayload,
    responses(
        (status = 201, description = "Membro adicionado", body = BrandMembership),
        (status = 400, description = "Papel inválido ou usuário já é membro"),
        (status = 403, description = "Sem permissão ou papel não-inferior"),
        (status = 404, description = "Usuário não encontrado")
    ),
    params(("x-brand-id" = Uuid, Header, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn invite_member(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    brand: BrandContext,
    Json(payload): Json<InviteMemberPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let membership = app_state
        .member_service
        .invite_member(&user.0, brand.0, &payload.email, &payload.role)
        .await?;

    Ok((StatusCode::CREATED, Json(membership)))
}
