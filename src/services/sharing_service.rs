// src/services/sharing_service.rs

use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BrandRepository, ConversationRepository, ProjectRepository, UserRepository},
    models::{
        auth::User,
        conversation::{
            CollaborativeMessagesResponse, Conversation, ConversationShare, Message, MessageView,
            SharePermission, ShareStatus,
        },
        notification::NotificationKind,
        project::ProjectShare,
        quota::QuotaKind,
        rbac::{self, Permission},
    },
    services::{notification_service::NotificationService, quota_service::QuotaService},
};

// Resultado da autorização de acesso a uma conversa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationAccess {
    pub is_owner: bool,
    pub can_write: bool,
    pub is_collaborative: bool,
}

/// Decisão pura de acesso: dono OU share aceito. O modo colaborativo é
/// um estado da conversa (existe ALGUM share aceito de escrita), avaliado
/// igualmente para dono e convidados.
pub fn resolve_access(
    owner_id: Uuid,
    caller_id: Uuid,
    caller_share: Option<&ConversationShare>,
    any_accepted_write_share: bool,
) -> Option<ConversationAccess> {
    let is_owner = owner_id == caller_id;

    let accepted_share = caller_share.filter(|s| s.is_accepted());
    let has_share_access = accepted_share.is_some();

    if !is_owner && !has_share_access {
        // pending e declined não contam: acesso negado, nenhum dado sai.
        return None;
    }

    let caller_can_write = accepted_share
        .and_then(|s| s.parsed_permission())
        .map(|p| p == SharePermission::Write)
        .unwrap_or(false);

    Some(ConversationAccess {
        is_owner,
        can_write: is_owner || caller_can_write,
        is_collaborative: any_accepted_write_share || caller_can_write,
    })
}

// Estimativa grosseira de tokens do prompt (~4 bytes por token).
fn estimate_prompt_tokens(content: &str) -> i64 {
    ((content.len() as i64) / 4).max(1)
}

#[derive(Clone)]
pub struct SharingService {
    conversation_repo: ConversationRepository,
    project_repo: ProjectRepository,
    user_repo: UserRepository,
    brand_repo: BrandRepository,
    notifications: NotificationService,
    quotas: QuotaService,
    pool: PgPool,
}

impl SharingService {
    pub fn new(
        conversation_repo: ConversationRepository,
        project_repo: ProjectRepository,
        user_repo: UserRepository,
        brand_repo: BrandRepository,
        notifications: NotificationService,
        quotas: QuotaService,
        pool: PgPool,
    ) -> Self {
        Self {
            conversation_repo,
            project_repo,
            user_repo,
            brand_repo,
            notifications,
            quotas,
            pool,
        }
    }

    async fn authorize(
        &self,
        caller: &User,
        conversation_id: Uuid,
    ) -> Result<(Conversation, ConversationAccess), AppError> {
        let conversation = self
            .conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conversa não encontrada.".into()))?;

        let caller_share = self
            .conversation_repo
            .find_accepted_share(conversation_id, caller.id)
            .await?;

        let any_write = self
            .conversation_repo
            .has_accepted_write_share(conversation_id)
            .await?;

        let access = resolve_access(conversation.user_id, caller.id, caller_share.as_ref(), any_write)
            .ok_or_else(|| AppError::Forbidden("Você não tem acesso a esta conversa.".into()))?;

        Ok((conversation, access))
    }

    /// GET /api/collaborative-messages: mensagens enriquecidas com nome de
    /// exibição (resolvido uma vez por requisição) e flag isCurrentUser.
    pub async fn collaborative_messages(
        &self,
        caller: &User,
        conversation_id: Uuid,
    ) -> Result<CollaborativeMessagesResponse, AppError> {
        let (_, access) = self.authorize(caller, conversation_id).await?;

        let messages = self.conversation_repo.list_messages(conversation_id).await?;

        // Cache por requisição: um lookup só para todos os autores.
        let mut author_ids: Vec<Uuid> = messages.iter().filter_map(|m| m.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let names = self.user_repo.display_names_for(&author_ids).await?;

        let views = messages
            .into_iter()
            .map(|m| {
                let display_name = m.user_id.and_then(|id| names.get(&id).cloned());
                let is_current_user = m.user_id == Some(caller.id);
                MessageView {
                    id: m.id,
                    role: m.role,
                    content: m.content,
                    user_id: m.user_id,
                    display_name,
                    is_current_user,
                    created_at: m.created_at,
                }
            })
            .collect();

        Ok(CollaborativeMessagesResponse {
            messages: views,
            is_collaborative: access.is_collaborative,
            is_owner: access.is_owner,
        })
    }

    /// Publica uma mensagem do chamador na conversa. Exige escrita e
    /// consome cota de prompt_tokens ANTES de gravar.
    pub async fn post_message(
        &self,
        caller: &User,
        conversation_id: Uuid,
        content: &str,
    ) -> Result<Message, AppError> {
        let (conversation, access) = self.authorize(caller, conversation_id).await?;

        if !access.can_write {
            return Err(AppError::Forbidden(
                "Você tem acesso somente leitura a esta conversa.".into(),
            ));
        }

        self.quotas
            .consume(
                conversation.brand_id,
                QuotaKind::PromptTokens,
                estimate_prompt_tokens(content),
            )
            .await?;

        let mut tx = self.pool.begin().await?;
        let message = self
            .conversation_repo
            .insert_message(&mut *tx, conversation_id, "user", content, Some(caller.id))
            .await?;
        self.conversation_repo
            .touch_last_message(&mut *tx, conversation_id)
            .await?;
        tx.commit().await?;

        // Fan-out para os demais participantes (dono + shares aceitos).
        let participants = self
            .conversation_repo
            .list_participant_ids(conversation_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Falha ao listar participantes para fan-out: {:?}", e);
                Vec::new()
            });

        for participant in participants.into_iter().filter(|p| *p != caller.id) {
            self.notifications
                .notify(
                    participant,
                    Some(conversation.brand_id),
                    NotificationKind::MessagePosted,
                    "Nova mensagem em conversa compartilhada",
                    &format!(
                        "{} escreveu em '{}'.",
                        caller.display_name,
                        conversation.title
                    ),
                    json!({ "conversationId": conversation_id }),
                )
                .await;
        }

        Ok(message)
    }

    /// Compartilha uma conversa do chamador com outro usuário (por e-mail).
    pub async fn share_conversation(
        &self,
        caller: &User,
        conversation_id: Uuid,
        email: &str,
        permission_raw: &str,
    ) -> Result<ConversationShare, AppError> {
        let permission = SharePermission::parse(permission_raw).ok_or_else(|| {
            AppError::InvalidInput(format!("Permissão inválida: '{}'.", permission_raw))
        })?;

        let conversation = self
            .conversation_repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conversa não encontrada.".into()))?;

        // Compartilhar nunca transfere posse: só o dono concede acesso.
        if conversation.user_id != caller.id {
            return Err(AppError::Forbidden(
                "Apenas o dono da conversa pode compartilhá-la.".into(),
            ));
        }

        // E o papel do dono na marca precisa permitir compartilhamento.
        let caller_role = self
            .brand_repo
            .find_membership(conversation.brand_id, caller.id)
            .await?
            .and_then(|m| m.parsed_role());
        let allowed = caller_role
            .map(|r| rbac::has_permission(r, Permission::ShareConversations))
            .unwrap_or(false);
        if !allowed {
            return Err(AppError::Forbidden(
                "Seu papel na marca não permite compartilhar conversas.".into(),
            ));
        }

        let target = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

        if target.id == caller.id {
            return Err(AppError::InvalidInput(
                "Não é possível compartilhar uma conversa consigo mesmo.".into(),
            ));
        }

        let share = self
            .conversation_repo
            .upsert_share(&self.pool, conversation_id, target.id, permission.as_str())
            .await?;

        self.notifications
            .notify(
                target.id,
                Some(conversation.brand_id),
                NotificationKind::ConversationShared,
                "Conversa compartilhada com você",
                &format!(
                    "{} compartilhou a conversa '{}' com você ({}).",
                    caller.display_name,
                    conversation.title,
                    permission.as_str()
                ),
                json!({ "conversationId": conversation_id, "shareId": share.id }),
            )
            .await;

        Ok(share)
    }

    /// O destinatário aceita ou recusa o convite; o dono é notificado.
    pub async fn respond_share(
        &self,
        caller: &User,
        share_id: Uuid,
        accept: bool,
    ) -> Result<ConversationShare, AppError> {
        let share = self
            .conversation_repo
            .find_share_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Convite não encontrado.".into()))?;

        if share.shared_with != caller.id {
            return Err(AppError::Forbidden("Este convite não é para você.".into()));
        }

        let status = if accept { ShareStatus::Accepted } else { ShareStatus::Declined };
        let updated = self
            .conversation_repo
            .update_share_status(&self.pool, share_id, status.as_str())
            .await?;

        if let Some(conversation) = self.conversation_repo.find_by_id(share.conversation_id).await? {
            self.notifications
                .notify(
                    conversation.user_id,
                    Some(conversation.brand_id),
                    NotificationKind::ShareResponded,
                    "Resposta ao compartilhamento",
                    &format!(
                        "{} {} o convite para '{}'.",
                        caller.display_name,
                        if accept { "aceitou" } else { "recusou" },
                        conversation.title
                    ),
                    json!({ "conversationId": conversation.id, "accepted": accept }),
                )
                .await;
        }

        Ok(updated)
    }

    pub async fn share_project(
        &self,
        caller: &User,
        project_id: Uuid,
        email: &str,
        permission_raw: &str,
    ) -> Result<ProjectShare, AppError> {
        let permission = SharePermission::parse(permission_raw).ok_or_else(|| {
            AppError::InvalidInput(format!("Permissão inválida: '{}'.", permission_raw))
        })?;

        let project = self
            .project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Projeto não encontrado.".into()))?;

        if project.user_id != caller.id {
            return Err(AppError::Forbidden(
                "Apenas o dono do projeto pode compartilhá-lo.".into(),
            ));
        }

        let target = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário não encontrado.".into()))?;

        if target.id == caller.id {
            return Err(AppError::InvalidInput(
                "Não é possível compartilhar um projeto consigo mesmo.".into(),
            ));
        }

        let share = self
            .project_repo
            .upsert_share(&self.pool, project_id, target.id, permission.as_str())
            .await?;

        self.notifications
            .notify(
                target.id,
                Some(project.brand_id),
                NotificationKind::ProjectShared,
                "Projeto compartilhado com você",
                &format!(
                    "{} compartilhou o projeto '{}' com você ({}).",
                    caller.display_name,
                    project.name,
                    permission.as_str()
                ),
                json!({ "projectId": project_id, "shareId": share.id }),
            )
            .await;

        Ok(share)
    }

    pub async fn respond_project_share(
        &self,
        caller: &User,
        share_id: Uuid,
        accept: bool,
    ) -> Result<ProjectShare, AppError> {
        let share = self
            .project_repo
            .find_share_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Convite não encontrado.".into()))?;

        if share.shared_with != caller.id {
            return Err(AppError::Forbidden("Este convite não é para você.".into()));
        }

        let status = if accept { ShareStatus::Accepted } else { ShareStatus::Declined };
        let updated = self
            .project_repo
            .update_share_status(&self.pool, share_id, status.as_str())
            .await?;

        if let Some(project) = self.project_repo.find_by_id(share.project_id).await? {
            self.notifications
                .notify(
                    project.user_id,
                    Some(project.brand_id),
                    NotificationKind::ShareResponded,
                    "Resposta ao compartilhamento",
                    &format!(
                        "{} {} o convite para '{}'.",
                        caller.display_name,
                        if accept { "aceitou" } else { "recusou" },
                        project.name
                    ),
                    json!({ "projectId": project.id, "accepted": accept }),
                )
                .await;
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn share(permission: &str, status: &str) -> ConversationShare {
        ConversationShare {
            id: Uuid::new_v4(),
            conversation_id: Uuid::new_v4(),
            shared_with: Uuid::new_v4(),
            permission: permission.into(),
            status: status.into(),
            created_at: Utc::now(),
            responded_at: None,
        }
    }

    #[test]
    fn sem_posse_e_sem_share_aceito_nao_ha_acesso() {
        let owner = Uuid::new_v4();
        let caller = Uuid::new_v4();

        assert_eq!(resolve_access(owner, caller, None, false), None);
        // pending e declined não concedem nada
        let pending = share("write", "pending");
        assert_eq!(resolve_access(owner, caller, Some(&pending), false), None);
        let declined = share("write", "declined");
        assert_eq!(resolve_access(owner, caller, Some(&declined), false), None);
    }

    #[test]
    fn dono_sempre_acessa_e_escreve() {
        let owner = Uuid::new_v4();
        let access = resolve_access(owner, owner, None, false).unwrap();
        assert!(access.is_owner);
        assert!(access.can_write);
        assert!(!access.is_collaborative);
    }

    #[test]
    fn share_aceito_de_leitura_acessa_sem_escrever() {
        let owner = Uuid::new_v4();
        let caller = Uuid::new_v4();
        let read_share = share("read", "accepted");

        let access = resolve_access(owner, caller, Some(&read_share), false).unwrap();
        assert!(!access.is_owner);
        assert!(!access.can_write);
        assert!(!access.is_collaborative);
    }

    #[test]
    fn modo_colaborativo_independe_do_chamador() {
        let owner = Uuid::new_v4();
        let caller = Uuid::new_v4();

        // a visão do DONO também reflete o modo colaborativo assim que
        // existe escrita concedida a qualquer pessoa
        let owner_view = resolve_access(owner, owner, None, true).unwrap();
        assert!(owner_view.is_owner);
        assert!(owner_view.is_collaborative);

        // convidado de leitura numa conversa com escrita de terceiros
        let read_share = share("read", "accepted");
        let guest_view = resolve_access(owner, caller, Some(&read_share), true).unwrap();
        assert!(guest_view.is_collaborative);
        assert!(!guest_view.can_write);
    }

    #[test]
    fn share_aceito_de_escrita_torna_colaborativo() {
        let owner = Uuid::new_v4();
        let caller = Uuid::new_v4();
        let write_share = share("write", "accepted");

        let access = resolve_access(owner, caller, Some(&write_share), true).unwrap();
        assert!(!access.is_owner);
        assert!(access.can_write);
        assert!(access.is_collaborative);
    }

    #[test]
    fn permissao_desconhecida_no_share_nao_escreve() {
        let owner = Uuid::new_v4();
        let caller = Uuid::new_v4();
        let weird = share("superwrite", "accepted");

        // acesso existe (share aceito), mas escrita falha fechada
        let access = resolve_access(owner, caller, Some(&weird), false).unwrap();
        assert!(!access.can_write);
    }

    #[test]
    fn estimativa_de_tokens_tem_piso_de_um() {
        assert_eq!(estimate_prompt_tokens(""), 1);
        assert_eq!(estimate_prompt_tokens("abc"), 1);
        assert_eq!(estimate_prompt_tokens(&"x".repeat(400)), 100);
    }
}
