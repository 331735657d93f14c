// src/middleware/brand.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{auth::User, rbac::BrandRole},
};

// O nome do nosso cabeçalho HTTP customizado
const BRAND_ID_HEADER: &str = "x-brand-id";

// Extrator leve: apenas o UUID da marca que o usuário quer acessar.
#[derive(Debug, Clone)]
pub struct BrandContext(pub Uuid);

impl<S> FromRequestParts<S> for BrandContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(BRAND_ID_HEADER)
            .ok_or_else(|| AppError::InvalidInput("O cabeçalho x-brand-id é obrigatório.".into()))?;

        let value_str = header_value.to_str().map_err(|_| {
            AppError::InvalidInput("Cabeçalho x-brand-id contém caracteres inválidos.".into())
        })?;

        let brand_id = Uuid::parse_str(value_str).map_err(|_| {
            AppError::InvalidInput("Cabeçalho x-brand-id inválido (não é um UUID).".into())
        })?;

        Ok(BrandContext(brand_id))
    }
}

// Extrator "pesado": resolve a associação do chamador com a marca no
// banco, já dentro do from_request_parts (mesma mecânica do guardião de
// permissões). Sem associação, a requisição morre aqui.
#[derive(Debug, Clone)]
pub struct BrandMember {
    pub brand_id: Uuid,
    pub user: User,
    pub role_raw: String,
}

impl BrandMember {
    // Papel interpretado; TEXT desconhecido no banco = sem permissões.
    pub fn role(&self) -> Option<BrandRole> {
        BrandRole::parse(&self.role_raw)
    }
}

impl<S> FromRequestParts<S> for BrandMember
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Usuário autenticado (inserido pelo auth_guard)
        let user = parts
            .extensions
            .get::<User>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        // B. Marca alvo
        let BrandContext(brand_id) = BrandContext::from_request_parts(parts, state).await?;

        // C. Associação no banco
        let membership = app_state
            .brand_repo
            .find_membership(brand_id, user.id)
            .await?
            .ok_or_else(|| AppError::InvalidInput("Você não é membro desta marca.".into()))?;

        Ok(BrandMember { brand_id, user, role_raw: membership.role })
    }
}
