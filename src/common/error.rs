// src/common/error.rs

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

// Nosso tipo de erro de domínio, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Parâmetro inválido: {0}")]
    InvalidParam(String),

    #[error("Cozinha não encontrada")]
    KitchenNotFound,

    #[error("Anúncio de armazenamento não encontrado")]
    ListingNotFound,

    #[error("Acesso negado")]
    AccessDenied,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// Erro já em termos de HTTP, pronto para virar resposta.
// O corpo é sempre `{"error": ...}`, com `details` opcional para validação.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl AppError {
    // Converte o erro de domínio em erro HTTP. O `is_production` vem do
    // AppState (lido uma única vez na inicialização): em produção os erros
    // internos viram uma mensagem genérica, fora dela expomos a mensagem real.
    pub fn to_api_error(self, is_production: bool) -> ApiError {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: "Um ou mais campos são inválidos.".into(),
                    details: Some(details),
                }
            }
            AppError::InvalidParam(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            AppError::KitchenNotFound => {
                ApiError::new(StatusCode::NOT_FOUND, "Cozinha não encontrada.")
            }
            AppError::ListingNotFound => ApiError::new(
                StatusCode::NOT_FOUND,
                "Anúncio de armazenamento não encontrado.",
            ),
            AppError::AccessDenied => ApiError::new(
                StatusCode::FORBIDDEN,
                "Você não tem acesso a esta cozinha.",
            ),
            AppError::EmailAlreadyExists => {
                ApiError::new(StatusCode::CONFLICT, "Este e-mail já está em uso.")
            }
            AppError::InvalidCredentials => {
                ApiError::new(StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.")
            }
            AppError::InvalidToken => ApiError::new(
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::UserNotFound => {
                ApiError::new(StatusCode::NOT_FOUND, "Usuário não encontrado.")
            }

            // Todos os outros erros viram 500. Logamos a mensagem completa
            // no servidor e decidimos o que expor conforme o ambiente.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                let message = if is_production {
                    "Ocorreu um erro inesperado.".to_string()
                } else {
                    e.to_string()
                };
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }
}

// Corpo JSON que não casa com o payload esperado é erro do cliente: 400,
// nunca o 422 padrão do axum.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("Corpo JSON inválido: {}", rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.error, "details": details })),
            None => Json(json!({ "error": self.error })),
        };
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapeia_status_http_por_categoria() {
        assert_eq!(
            AppError::InvalidParam("x".into()).to_api_error(false).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::KitchenNotFound.to_api_error(false).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ListingNotFound.to_api_error(false).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::AccessDenied.to_api_error(false).status,
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn erro_interno_generico_em_producao() {
        let err = AppError::InternalServerError(anyhow::anyhow!("pool esgotado"));
        let api = err.to_api_error(true);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, "Ocorreu um erro inesperado.");
    }

    #[test]
    fn erro_interno_detalhado_fora_de_producao() {
        let err = AppError::InternalServerError(anyhow::anyhow!("pool esgotado"));
        let api = err.to_api_error(false);
        assert!(api.error.contains("pool esgotado"));
    }
}
