// src/handlers/rbac.rs

use axum::Json;

use crate::models::rbac::{self, RoleInfo};

// GET /api/roles (para o frontend saber o que mostrar na tela de gestão)
//
// A tabela é estática e compilada no binário; não existe caminho de
// mutação em tempo de execução.
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Members",
    responses(
        (status = 200, description = "Papéis, ranks e permissões de cada um", body = Vec<RoleInfo>)
    )
)]
pub async fn list_roles() -> Json<Vec<RoleInfo>> {
    Json(rbac::role_table())
}
