// src/handlers/brands.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::brand::{Brand, BrandWithRole, CreateBrandPayload},
};

// POST /api/brands
#[utoipa::path(
    post,
    path = "/api/brands",
    tag = "Brands",
    request_body = CreateBrandPayload,
    responses(
        (status = 201, description = "Marca criada; o criador vira owner", body = Brand),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_brand(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateBrandPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // Operação transacional: marca + owner + cotas padrão, tudo ou nada.
    let brand = app_state
        .brand_service
        .create_brand_with_owner(&payload.name, payload.slug.as_deref(), user.0.id)
        .await?;

    Ok((StatusCode::CREATED, Json(brand)))
}

// GET /api/brands
#[utoipa::path(
    get,
    path = "/api/brands",
    tag = "Brands",
    responses(
        (status = 200, description = "Marcas do usuário, com o papel dele em cada uma", body = Vec<BrandWithRole>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_brands(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<BrandWithRole>>, AppError> {
    let brands = app_state.brand_repo.list_brands_for_user(user.0.id).await?;
    Ok(Json(brands))
}
