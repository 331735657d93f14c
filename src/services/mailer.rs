// src/services/mailer.rs

use std::{env, sync::Arc};

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::Mailbox,
};

use crate::common::error::AppError;

// A costura de e-mail do sistema. Tudo que envia e-mail fala com este
// trait; a implementação concreta depende só do ambiente.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: String) -> anyhow::Result<()>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

#[async_trait]
impl EmailSender for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: String) -> anyhow::Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .body(body)?;

        self.transport.send(email).await?;
        Ok(())
    }
}

// Sem SMTP configurado o recurso fica desligado: cada tentativa vira um
// warning no log em vez de um erro para o chamador.
pub struct DisabledMailer;

#[async_trait]
impl EmailSender for DisabledMailer {
    async fn send(&self, to: &str, subject: &str, _body: String) -> anyhow::Result<()> {
        tracing::warn!(
            "Envio de e-mail desabilitado (SMTP não configurado); descartando '{}' para {}",
            subject,
            to
        );
        Ok(())
    }
}

/// Monta o mailer a partir do ambiente. SMTP_URL/EMAIL_FROM ausentes não
/// derrubam o servidor: o recurso é desligado com um aviso.
pub fn mailer_from_env() -> anyhow::Result<Arc<dyn EmailSender>> {
    let smtp_url = env::var("SMTP_URL").ok();
    let email_from = env::var("EMAIL_FROM").ok();

    match (smtp_url, email_from) {
        (Some(url), Some(from)) => {
            let from: Mailbox = from.parse().map_err(|e| {
                AppError::ConfigError(format!("EMAIL_FROM inválido: {}", e))
            })?;
            let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(&url)?.build();

            tracing::info!("✉️  Transporte SMTP configurado.");
            Ok(Arc::new(SmtpMailer { transport, from }))
        }
        _ => {
            tracing::warn!("SMTP_URL/EMAIL_FROM ausentes; envio de e-mail desabilitado.");
            Ok(Arc::new(DisabledMailer))
        }
    }
}
