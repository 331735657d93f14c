// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante carrega a mensagem humana; o código de máquina sai em
// `error_code()` e vai no corpo JSON junto com ela.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("E-mail ou senha inválidos")]
    InvalidCredentials,

    #[error("Token de autenticação inválido ou ausente")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Nenhum arquivo foi enviado")]
    MissingFile,

    #[error("Tipo de arquivo não suportado: {0}")]
    InvalidFileType(String),

    #[error("O arquivo de {size} bytes excede o limite de {limit} bytes")]
    FileTooLarge { size: i64, limit: i64 },

    // Falha tipada, distinta de erros de transporte/banco: o cliente pode
    // mostrar a mensagem de upgrade em vez de um erro genérico.
    #[error("A cota de {kind} da marca foi esgotada")]
    QuotaExceeded { kind: String, remaining: i64 },

    #[error("Configuração ausente ou inválida: {0}")]
    ConfigError(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    // Código estável, legível por máquina, que acompanha toda resposta de erro.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::EmailAlreadyExists => "EMAIL_IN_USE",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::InvalidToken => "UNAUTHORIZED",
            AppError::UserNotFound => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::MissingFile => "MISSING_FILE",
            AppError::InvalidFileType(_) => "INVALID_FILE_TYPE",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            AppError::ConfigError(_) => "CONFIG_ERROR",
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::MissingFile
            | AppError::InvalidFileType(_)
            | AppError::FileTooLarge { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::QuotaExceeded { .. } => StatusCode::PAYMENT_REQUIRED,
            AppError::ConfigError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Erros de validação retornam todos os detalhes por campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "success": false,
                "error": self.error_code(),
                "message": "Um ou mais campos são inválidos.",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let status = self.status();

        // Falhas internas são logadas ANTES de serem condensadas para o
        // cliente; a causa detalhada nunca vaza na resposta.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro interno do servidor: {:?}", self);
            "Ocorreu um erro inesperado.".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "success": false,
            "error": self.error_code(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codigos_seguem_a_taxonomia() {
        assert_eq!(AppError::MissingFile.error_code(), "MISSING_FILE");
        assert_eq!(
            AppError::InvalidFileType("application/zip".into()).error_code(),
            "INVALID_FILE_TYPE"
        );
        assert_eq!(
            AppError::FileTooLarge { size: 1, limit: 0 }.error_code(),
            "FILE_TOO_LARGE"
        );
        assert_eq!(
            AppError::QuotaExceeded { kind: "prompt_tokens".into(), remaining: 0 }.error_code(),
            "QUOTA_EXCEEDED"
        );
        assert_eq!(AppError::ConfigError("SMTP_URL".into()).error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn status_http_por_classe_de_erro() {
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::MissingFile.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::QuotaExceeded { kind: "x".into(), remaining: 0 }.status(),
            StatusCode::PAYMENT_REQUIRED
        );
    }
}
