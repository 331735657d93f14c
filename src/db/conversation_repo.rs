// src/db/conversation_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::conversation::{
        Conversation, ConversationShare, Message, SharedConversationView,
    },
};

#[derive(Clone)]
pub struct ConversationRepository {
    pool: PgPool,
}

impl ConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        brand_id: Uuid,
        user_id: Uuid,
        project_id: Option<Uuid>,
        title: &str,
    ) -> Result<Conversation, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (brand_id, user_id, project_id, title)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(brand_id)
        .bind(user_id)
        .bind(project_id)
        .bind(title)
        .fetch_one(executor)
        .await?;

        Ok(conversation)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>, AppError> {
        let conversation =
            sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(conversation)
    }

    pub async fn list_for_owner(
        &self,
        brand_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<Conversation>, AppError> {
        let conversations = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT * FROM conversations
             WHERE brand_id = $1 AND user_id = $2 AND archived = FALSE
             ORDER BY COALESCE(last_message_at, created_at) DESC
            "#,
        )
        .bind(brand_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(conversations)
    }

    // Apenas o share ACEITO do chamador conta como acesso; pending e
    // declined são invisíveis para a autorização.
    pub async fn find_accepted_share(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<ConversationShare>, AppError> {
        let share = sqlx::query_as::<_, ConversationShare>(
            r#"
            SELECT * FROM conversation_shares
             WHERE conversation_id = $1 AND shared_with = $2 AND status = 'accepted'
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(share)
    }

    /// Existe QUALQUER share aceito com permissão de escrita nesta
    /// conversa? Independe de quem pergunta: o modo colaborativo é um
    /// estado da conversa, não do chamador.
    pub async fn has_accepted_write_share(&self, conversation_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM conversation_shares
                 WHERE conversation_id = $1 AND status = 'accepted' AND permission = 'write'
            )
            "#,
        )
        .bind(conversation_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn find_share_by_id(&self, share_id: Uuid) -> Result<Option<ConversationShare>, AppError> {
        let share =
            sqlx::query_as::<_, ConversationShare>("SELECT * FROM conversation_shares WHERE id = $1")
                .bind(share_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(share)
    }

    // Reenviar um convite reaproveita a linha existente e volta o status
    // para pending; um convite recusado pode ser reenviado.
    pub async fn upsert_share<'e, E>(
        &self,
        executor: E,
        conversation_id: Uuid,
        shared_with: Uuid,
        permission: &str,
    ) -> Result<ConversationShare, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let share = sqlx::query_as::<_, ConversationShare>(
            r#"
            INSERT INTO conversation_shares (conversation_id, shared_with, permission)
            VALUES ($1, $2, $3)
            ON CONFLICT (conversation_id, shared_with)
            DO UPDATE SET
                permission = EXCLUDED.permission,
                status = 'pending',
                responded_at = NULL
            RETURNING *
            "#,
        )
        .bind(conversation_id)
        .bind(shared_with)
        .bind(permission)
        .fetch_one(executor)
        .await?;

        Ok(share)
    }

    pub async fn update_share_status<'e, E>(
        &self,
        executor: E,
        share_id: Uuid,
        status: &str,
    ) -> Result<ConversationShare, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let share = sqlx::query_as::<_, ConversationShare>(
            r#"
            UPDATE conversation_shares
               SET status = $2, responded_at = now()
             WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(share_id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(share)
    }

    pub async fn list_shared_with(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SharedConversationView>, AppError> {
        let shared = sqlx::query_as::<_, SharedConversationView>(
            r#"
            SELECT c.id, c.title, u.display_name AS owner_name,
                   cs.permission, c.last_message_at, cs.created_at AS shared_at
              FROM conversation_shares cs
              JOIN conversations c ON c.id = cs.conversation_id
              JOIN users u ON u.id = c.user_id
             WHERE cs.shared_with = $1 AND cs.status = 'accepted' AND c.archived = FALSE
             ORDER BY COALESCE(c.last_message_at, c.created_at) DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(shared)
    }

    pub async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at",
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    pub async fn insert_message<'e, E>(
        &self,
        executor: E,
        conversation_id: Uuid,
        role: &str,
        content: &str,
        user_id: Option<Uuid>,
    ) -> Result<Message, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (conversation_id, role, content, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(conversation_id)
        .bind(role)
        .bind(content)
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(message)
    }

    pub async fn touch_last_message<'e, E>(
        &self,
        executor: E,
        conversation_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE conversations SET last_message_at = now() WHERE id = $1")
            .bind(conversation_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Dono + todos os shares aceitos: o conjunto que recebe o fan-out de
    /// notificação quando alguém escreve na conversa.
    pub async fn list_participant_ids(&self, conversation_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT user_id FROM conversations WHERE id = $1
            UNION
            SELECT shared_with FROM conversation_shares
             WHERE conversation_id = $1 AND status = 'accepted'
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
