// src/handlers/assets.rs

use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        storage::{self, AssetCategory},
    },
    middleware::brand::BrandMember,
    models::rbac::{self, Permission},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPathPayload {
    #[schema(example = "manual-da-marca.pdf")]
    pub filename: Option<String>,

    #[validate(length(min = 1, message = "O tipo de conteúdo é obrigatório."))]
    #[schema(example = "application/pdf")]
    pub content_type: String,

    #[schema(example = 482133)]
    pub size_bytes: i64,

    #[schema(example = "guidelines")]
    pub category: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPathResponse {
    pub success: bool,

    #[schema(example = "7f1d.../guidelines/manual-da-marca.pdf")]
    pub path: String,
}

// POST /api/assets/upload-path
//
// Valida o upload ANTES de qualquer chamada externa e devolve o caminho
// isolado por tenant onde o cliente deve gravar o objeto.
#[utoipa::path(
    post,
    path = "/api/assets/upload-path",
    tag = "Assets",
    request_body = UploadPathPayload,
    responses(
        (status = 200, description = "Caminho de upload", body = UploadPathResponse),
        (status = 400, description = "MISSING_FILE / INVALID_FILE_TYPE / FILE_TOO_LARGE"),
        (status = 403, description = "Papel sem permissão de upload")
    ),
    params(("x-brand-id" = uuid::Uuid, Header, description = "ID da marca")),
    security(("api_jwt" = []))
)]
pub async fn upload_path(
    member: BrandMember,
    Json(payload): Json<UploadPathPayload>,
) -> Result<Json<UploadPathResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let allowed = member
        .role()
        .map(|r| rbac::has_permission(r, Permission::UploadAssets))
        .unwrap_or(false);
    if !allowed {
        return Err(AppError::Forbidden(
            "Seu papel não permite enviar arquivos.".into(),
        ));
    }

    let category = AssetCategory::parse(&payload.category)
        .ok_or_else(|| AppError::InvalidInput(format!("Categoria inválida: '{}'.", payload.category)))?;

    storage::validate_upload(
        payload.filename.as_deref(),
        &payload.content_type,
        payload.size_bytes,
    )?;

    // filename presente é garantido pela validação acima
    let filename = payload.filename.as_deref().unwrap_or_default();
    let path = storage::object_path(member.brand_id, category, filename);

    Ok(Json(UploadPathResponse { success: true, path }))
}
