// src/handlers/quota.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::brand::BrandMember,
    models::quota::{QuotaKind, QuotaStatus},
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct QuotaQuery {
    // Ausente = todas as cotas da marca.
    pub kind: Option<String>,
}

// GET /api/quota?kind=
//
// Projeção consultiva, para a interface exibir saldo e mensagens de
// upgrade. Nenhum consumo acontece por aqui.
#[utoipa::path(
    get,
    path = "/api/quota",
    tag = "Quota",
    responses(
        (status = 200, description = "Status das cotas da marca", body = Vec<QuotaStatus>),
        (status = 400, description = "Tipo de cota desconhecido")
    ),
    params(
        QuotaQuery,
        ("x-brand-id" = uuid::Uuid, Header, description = "ID da marca")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_quota(
    State(app_state): State<AppState>,
    member: BrandMember,
    Query(query): Query<QuotaQuery>,
) -> Result<impl IntoResponse, AppError> {
    match query.kind {
        Some(raw) => {
            let kind = QuotaKind::parse(&raw).ok_or_else(|| {
                AppError::InvalidInput(format!("Tipo de cota desconhecido: '{}'.", raw))
            })?;
            let status = app_state.quota_service.check(member.brand_id, kind).await?;
            Ok(Json(vec![status]))
        }
        None => {
            let status = app_state.quota_service.status_for_brand(member.brand_id).await?;
            Ok(Json(status))
        }
    }
}
