// src/handlers/projects.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, brand::BrandMember},
    models::{
        conversation::RespondSharePayload,
        project::{
            CreateProjectPayload, Project, ProjectShare, ShareProjectPayload, SharedProjectView,
        },
    },
};

// POST /api/projects
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    request_body = CreateProjectPayload,
    responses(
        (status = 201, description = "Projeto criado", body = Project)
    ),
    params(("x-brand-id" = uuid::Uuid, Header, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn create_project(
    State(app_state): State<AppState>,
    member: BrandMember,
    Json(payload): Json<CreateProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let project = app_state
        .project_repo
        .create(
            &app_state.db_pool,
            member.brand_id,
            member.user.id,
            &payload.name,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

// GET /api/projects
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "Projetos do chamador na marca", body = Vec<Project>)
    ),
    params(("x-brand-id" = uuid::Uuid, Header, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn list_projects(
    State(app_state): State<AppState>,
    member: BrandMember,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = app_state
        .project_repo
        .list_for_owner(member.brand_id, member.user.id)
        .await?;

    Ok(Json(projects))
}

// POST /api/projects/share
#[utoipa::path(
    post,
    path = "/api/projects/share",
    tag = "Projects",
    request_body = ShareProjectPayload,
    responses(
        (status = 201, description = "Convite criado (pending)", body = ProjectShare),
        (status = 403, description = "Só o dono compartilha"),
        (status = 404, description = "Projeto ou usuário inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn share_project(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<ShareProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let share = app_state
        .sharing_service
        .share_project(&user.0, payload.project_id, &payload.email, &payload.permission)
        .await?;

    Ok((StatusCode::CREATED, Json(share)))
}

// POST /api/projects/shares/respond
#[utoipa::path(
    post,
    path = "/api/projects/shares/respond",
    tag = "Projects",
    request_body = RespondSharePayload,
    responses(
        (status = 200, description = "Convite respondido", body = ProjectShare),
        (status = 403, description = "Convite de outra pessoa"),
        (status = 404, description = "Convite inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn respond_project_share(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<RespondSharePayload>,
) -> Result<Json<ProjectShare>, AppError> {
    let share = app_state
        .sharing_service
        .respond_project_share(&user.0, payload.share_id, payload.accept)
        .await?;

    Ok(Json(share))
}

// GET /api/shared-projects/list
#[utoipa::path(
    get,
    path = "/api/shared-projects/list",
    tag = "Projects",
    responses(
        (status = 200, description = "Projetos compartilhados com o chamador", body = Vec<SharedProjectView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_shared_projects(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<SharedProjectView>>, AppError> {
    let shared = app_state.project_repo.list_shared_with(user.0.id).await?;
    Ok(Json(shared))
}
