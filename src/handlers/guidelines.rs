// src/handlers/guidelines.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::guidelines::{
        BrandGuidelines, GuidelinesPendingResponse, GuidelinesResponse, UpsertGuidelinesPayload,
    },
    services::guidelines_service::GuidelinesLookup,
};

// GET /api/brands/{brand_id}/guidelines
#[utoipa::path(
    get,
    path = "/api/brands/{brand_id}/guidelines",
    tag = "Guidelines",
    responses(
        (status = 200, description = "Diretrizes aprovadas", body = GuidelinesResponse),
        (status = 202, description = "Existem diretrizes, mas nenhuma aprovada", body = GuidelinesPendingResponse),
        (status = 403, description = "Sem acesso à marca"),
        (status = 404, description = "Nenhuma diretriz")
    ),
    params(("brand_id" = Uuid, Path, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn get_guidelines(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(brand_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lookup = app_state.guidelines_service.get(brand_id, &user.0).await?;

    // Mapeamento 200 / 202 / 404 do contrato.
    let response = match lookup {
        GuidelinesLookup::Approved(guidelines) => (
            StatusCode::OK,
            Json(GuidelinesResponse { success: true, guidelines }),
        )
            .into_response(),
        GuidelinesLookup::Pending(status) => (
            StatusCode::ACCEPTED,
            Json(GuidelinesPendingResponse { success: false, has_guidelines: true, status }),
        )
            .into_response(),
        GuidelinesLookup::None => {
            return Err(AppError::NotFound(
                "Nenhuma diretriz encontrada para esta marca.".into(),
            ));
        }
    };

    Ok(response)
}

// PUT /api/brands/{brand_id}/guidelines
#[utoipa::path(
    put,
    path = "/api/brands/{brand_id}/guidelines",
    tag = "Guidelines",
    request_body = UpsertGuidelinesPayload,
    responses(
        (status = 200, description = "Cópia de trabalho criada/atualizada", body = BrandGuidelines),
        (status = 403, description = "Papel sem permissão de edição")
    ),
    params(("brand_id" = Uuid, Path, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn upsert_guidelines(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(brand_id): Path<Uuid>,
    Json(payload): Json<UpsertGuidelinesPayload>,
) -> Result<Json<BrandGuidelines>, AppError> {
    let guidelines = app_state
        .guidelines_service
        .upsert_working_copy(brand_id, &user.0, payload.content, payload.submit_for_review)
        .await?;

    Ok(Json(guidelines))
}

// POST /api/brands/{brand_id}/guidelines/approve
#[utoipa::path(
    post,
    path = "/api/brands/{brand_id}/guidelines/approve",
    tag = "Guidelines",
    responses(
        (status = 200, description = "Versão promovida a aprovada", body = BrandGuidelines),
        (status = 403, description = "Papel sem permissão de aprovação"),
        (status = 404, description = "Nenhuma versão pendente")
    ),
    params(("brand_id" = Uuid, Path, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn approve_guidelines(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(brand_id): Path<Uuid>,
) -> Result<Json<BrandGuidelines>, AppError> {
    let guidelines = app_state.guidelines_service.approve(brand_id, &user.0).await?;
    Ok(Json(guidelines))
}
