// src/services/member_service.rs

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BrandRepository, UserRepository},
    models::{
        auth::User,
        brand::BrandMembership,
        notification::NotificationKind,
        rbac::{self, BrandRole, Permission},
    },
    services::notification_service::NotificationService,
};

#[derive(Clone)]
pub struct MemberService {
    brand_repo: BrandRepository,
    user_repo: UserRepository,
    notifications: NotificationService,
    pool: PgPool,
}

impl MemberService {
    pub fn new(
        brand_repo: BrandRepository,
        user_repo: UserRepository,
        notifications: NotificationService,
        pool: PgPool,
    ) -> Self {
        Self { brand_repo, user_repo, notifications, pool }
    }

    // A associação do chamador com a marca; sem ela, nada adiante roda.
    async fn caller_membership(
        &self,
        brand_id: Uuid,
        caller: &User,
    ) -> Result<BrandMembership, AppError> {
        self.brand_repo
            .find_membership(brand_id, caller.id)
            .await?
            .ok_or_else(|| AppError::InvalidInput("Você não é membro desta marca.".into()))
    }

    /// Troca o papel de um membro da marca. Pré-condições na ordem do
    /// contrato — a primeira falha vence: papel válido, membership do
    /// chamador, chamador é owner, alvo existe na marca, invariante do
    /// único owner. A contagem de owners e o UPDATE acontecem na MESMA
    /// transação, com as linhas de owner trancadas.
    pub async fn change_role(
        &self,
        caller: &User,
        brand_id: Uuid,
        member_id: Uuid,
        new_role_raw: &str,
    ) -> Result<String, AppError> {
        // 2. O papel alvo precisa existir no vocabulário.
        let new_role = BrandRole::parse(new_role_raw).ok_or_else(|| {
            AppError::InvalidInput(format!("Papel inválido: '{}'.", new_role_raw))
        })?;

        // 3. Chamador precisa ser membro.
        let caller_membership = self.caller_membership(brand_id, caller).await?;

        // 4. Trocar papéis é mais restrito que a tabela geral: SÓ owner.
        check_role_change_privilege(caller_membership.parsed_role())?;

        let mut tx = self.pool.begin().await?;

        // 5. O alvo precisa existir e pertencer à mesma marca. Um membro
        // de outra marca responde como inexistente, sem vazar nada.
        let target = self
            .brand_repo
            .find_membership_by_id(&mut *tx, member_id)
            .await?
            .filter(|m| m.brand_id == brand_id)
            .ok_or_else(|| AppError::NotFound("Membro não encontrado.".into()))?;

        // 6. Invariante do único owner: rebaixar um owner exige que sobre
        // pelo menos um. O FOR UPDATE serializa trocas concorrentes.
        if target.role == BrandRole::Owner.as_str() && new_role != BrandRole::Owner {
            let owners = self.brand_repo.lock_and_count_owners(&mut *tx, brand_id).await?;

            if sole_owner_violation(owners, new_role) {
                return Err(AppError::Forbidden(
                    "Não é possível rebaixar o único owner da marca.".into(),
                ));
            }
        }

        self.brand_repo
            .update_member_role(&mut *tx, member_id, new_role.as_str())
            .await?;

        tx.commit().await?;

        // Efeitos colaterais best-effort, SEMPRE depois do commit.
        self.notifications
            .notify(
                target.user_id,
                Some(brand_id),
                NotificationKind::RoleChanged,
                "Seu papel na marca mudou",
                &format!(
                    "{} alterou seu papel para '{}'.",
                    caller.display_name,
                    new_role.as_str()
                ),
                json!({ "newRole": new_role.as_str(), "changedBy": caller.id }),
            )
            .await;

        Ok("Papel atualizado com sucesso.".into())
    }

    /// Remove um membro da marca. Limiar: owner OU admin; um admin nunca
    /// remove um owner; ninguém se remove por este caminho.
    pub async fn remove_member(
        &self,
        caller: &User,
        brand_id: Uuid,
        member_id: Uuid,
    ) -> Result<String, AppError> {
        let caller_membership = self.caller_membership(brand_id, caller).await?;

        let caller_role = caller_membership.parsed_role();
        check_removal_privilege(caller_role)?;

        let mut tx = self.pool.begin().await?;

        let target = self
            .brand_repo
            .find_membership_by_id(&mut *tx, member_id)
            .await?
            .filter(|m| m.brand_id == brand_id)
            .ok_or_else(|| AppError::NotFound("Membro não encontrado.".into()))?;

        check_removal_target(
            caller_role,
            BrandRole::parse(&target.role),
            target.user_id == caller.id,
        )?;

        self.brand_repo.remove_member(&mut *tx, member_id).await?;

        tx.commit().await?;

        self.notifications
            .notify(
                target.user_id,
                Some(brand_id),
                NotificationKind::MemberRemoved,
                "Você foi removido de uma marca",
                &format!("{} removeu seu acesso à marca.", caller.display_name),
                json!({ "removedBy": caller.id }),
            )
            .await;

        Ok("Membro removido com sucesso.".into())
    }

    /// Convida um usuário existente para a marca com um papel
    /// estritamente abaixo do papel do chamador.
    pub async fn invite_member(
        &self,
        caller: &User,
        brand_id: Uuid,
        email: &str,
        role_raw: &str,
    ) -> Result<BrandMembership, AppError> {
        let role = BrandRole::parse(role_raw)
            .ok_or_else(|| AppError::InvalidInput(format!("Papel inválido: '{}'.", role_raw)))?;

        let caller_membership = self.caller_membership(brand_id, caller).await?;
        let caller_role = caller_membership.parsed_role();

        let allowed = caller_role
            .map(|r| rbac::has_permission(r, Permission::InviteMembers))
            .unwrap_or(false);
        if !allowed {
            return Err(AppError::Forbidden("Seu papel não permite convidar membros.".into()));
        }

        // Só se concede papel estritamente abaixo do próprio.
        let outranks = caller_role
            .map(|r| rbac::can_manage_user(r, role))
            .unwrap_or(false);
        if !outranks {
            return Err(AppError::Forbidden(
                "Você só pode convidar membros com papel abaixo do seu.".into(),
            ));
        }

        let target = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

        if self.brand_repo.find_membership(brand_id, target.id).await?.is_some() {
            return Err(AppError::InvalidInput("Este usuário já é membro da marca.".into()));
        }

        let mut tx = self.pool.begin().await?;
        let membership = self
            .brand_repo
            .add_member(&mut *tx, brand_id, target.id, role.as_str())
            .await?;
        tx.commit().await?;

        self.notifications
            .notify(
                target.id,
                Some(brand_id),
                NotificationKind::MemberInvited,
                "Você entrou em uma marca",
                &format!(
                    "{} adicionou você como '{}'.",
                    caller.display_name,
                    role.as_str()
                ),
                json!({ "role": role.as_str(), "invitedBy": caller.id }),
            )
            .await;

        Ok(membership)
    }
}

// ---
// Pré-condições puras (testáveis sem banco)
// ---

fn check_role_change_privilege(caller_role: Option<BrandRole>) -> Result<(), AppError> {
    if caller_role != Some(BrandRole::Owner) {
        return Err(AppError::Forbidden(
            "Apenas owners podem alterar papéis de membros.".into(),
        ));
    }
    Ok(())
}

// Com as linhas de owner trancadas, `owners` é a contagem exata. Rebaixar
// com um único owner deixaria a marca órfã.
fn sole_owner_violation(owners: i64, new_role: BrandRole) -> bool {
    owners <= 1 && new_role != BrandRole::Owner
}

// Limiar de remoção: owner OU admin.
fn check_removal_privilege(caller_role: Option<BrandRole>) -> Result<(), AppError> {
    let allowed = caller_role
        .map(|r| rbac::is_role_at_least(r, BrandRole::Admin))
        .unwrap_or(false);

    if !allowed {
        return Err(AppError::Forbidden("Você não pode remover membros.".into()));
    }
    Ok(())
}

fn check_removal_target(
    caller_role: Option<BrandRole>,
    target_role: Option<BrandRole>,
    is_self: bool,
) -> Result<(), AppError> {
    // Regra anti-escalação: admin nunca remove owner.
    if target_role == Some(BrandRole::Owner) && caller_role != Some(BrandRole::Owner) {
        return Err(AppError::Forbidden("Administradores não podem remover owners.".into()));
    }

    // Auto-remoção não é suportada: evitaria uma sessão ativa sem marca.
    if is_self {
        return Err(AppError::InvalidInput(
            "Não é possível remover a si mesmo da marca.".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apenas_owner_troca_papeis() {
        assert!(check_role_change_privilege(Some(BrandRole::Owner)).is_ok());
        // admins removem membros, mas NÃO trocam papéis
        assert!(matches!(
            check_role_change_privilege(Some(BrandRole::Admin)),
            Err(AppError::Forbidden(_))
        ));
        // papel desconhecido no banco: fail closed
        assert!(check_role_change_privilege(None).is_err());
    }

    #[test]
    fn rebaixar_o_unico_owner_e_rejeitado() {
        // marca com owners = {A}: rebaixar A falha
        assert!(sole_owner_violation(1, BrandRole::Admin));
        assert!(sole_owner_violation(1, BrandRole::User));
        // marca com owners = {A, B}: rebaixar um deles passa
        assert!(!sole_owner_violation(2, BrandRole::Editor));
        // "rebaixar" para owner não é rebaixamento
        assert!(!sole_owner_violation(1, BrandRole::Owner));
    }

    #[test]
    fn limiar_de_remocao_e_owner_ou_admin() {
        assert!(check_removal_privilege(Some(BrandRole::Owner)).is_ok());
        assert!(check_removal_privilege(Some(BrandRole::Admin)).is_ok());
        assert!(check_removal_privilege(Some(BrandRole::Editor)).is_err());
        assert!(check_removal_privilege(Some(BrandRole::User)).is_err());
        assert!(check_removal_privilege(None).is_err());
    }

    #[test]
    fn admin_nao_remove_owner() {
        let result = check_removal_target(Some(BrandRole::Admin), Some(BrandRole::Owner), false);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
        // owner removendo admin/owner é permitido
        assert!(check_removal_target(Some(BrandRole::Owner), Some(BrandRole::Admin), false).is_ok());
        assert!(check_removal_target(Some(BrandRole::Owner), Some(BrandRole::Owner), false).is_ok());
    }

    #[test]
    fn auto_remocao_e_rejeitada() {
        let result = check_removal_target(Some(BrandRole::Owner), Some(BrandRole::Owner), true);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
