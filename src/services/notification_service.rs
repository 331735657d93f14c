// src/services/notification_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{NotificationRepository, UserRepository},
    models::notification::NotificationKind,
    services::mailer::EmailSender,
};

// Fan-out de eventos que afetam outro usuário: uma linha de notificação
// in-app e um e-mail best-effort. Nada aqui participa da transação da
// mutação primária nem devolve erro para ela.
#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    user_repo: UserRepository,
    mailer: Arc<dyn EmailSender>,
}

impl NotificationService {
    pub fn new(
        repo: NotificationRepository,
        user_repo: UserRepository,
        mailer: Arc<dyn EmailSender>,
    ) -> Self {
        Self { repo, user_repo, mailer }
    }

    /// Dispara os dois canais. Chamar SEMPRE depois do commit da mutação
    /// primária: falha aqui é logada, nunca propagada.
    pub async fn notify(
        &self,
        recipient: Uuid,
        brand_id: Option<Uuid>,
        kind: NotificationKind,
        title: &str,
        message: &str,
        metadata: serde_json::Value,
    ) {
        if let Err(e) = self
            .repo
            .insert(recipient, brand_id, kind.as_str(), title, message, &metadata)
            .await
        {
            tracing::error!("Falha ao gravar notificação '{}': {:?}", kind.as_str(), e);
            return;
        }

        // E-mail em segundo plano: a resposta HTTP não espera o SMTP.
        let mailer = self.mailer.clone();
        let user_repo = self.user_repo.clone();
        let subject = title.to_string();
        let body = message.to_string();

        tokio::spawn(async move {
            match user_repo.find_by_id(recipient).await {
                Ok(Some(user)) => {
                    if let Err(e) = mailer.send(&user.email, &subject, body).await {
                        tracing::warn!("Falha ao enviar e-mail para {}: {:?}", user.email, e);
                    }
                }
                Ok(None) => {
                    tracing::warn!("Destinatário {} não existe mais; e-mail descartado.", recipient);
                }
                Err(e) => {
                    tracing::warn!("Falha ao resolver destinatário {}: {:?}", recipient, e);
                }
            }
        });
    }
}
