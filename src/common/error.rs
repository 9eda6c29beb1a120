// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // A normalização devolveu vazio: nem chegamos a chamar o Notion.
    #[error("WhatsApp inválido")]
    InvalidWhatsapp,

    #[error("Lead não encontrado")]
    LeadNotFound,

    // O Notion respondeu, mas com erro (auth, rate limit, schema...).
    // Guardamos o status e a mensagem originais para diagnóstico.
    #[error("Erro da API do Notion ({status}): {message}")]
    NotionApi { status: u16, message: String },

    #[error("Falha de comunicação com o Notion")]
    Http(#[from] reqwest::Error),

    #[error("Resposta do Notion em formato inesperado")]
    Decode(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidWhatsapp => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "WhatsApp inválido.".to_string(),
            ),
            AppError::LeadNotFound => (
                StatusCode::NOT_FOUND,
                "Lead não encontrado para o WhatsApp informado.".to_string(),
            ),
            AppError::NotionApi { status, ref message } => {
                tracing::error!("Erro da API do Notion ({}): {}", status, message);
                (
                    StatusCode::BAD_GATEWAY,
                    format!("Notion respondeu {}: {}", status, message),
                )
            }
            AppError::Http(ref e) => {
                tracing::error!("Falha de comunicação com o Notion: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Falha de comunicação com o Notion.".to_string(),
                )
            }

            // Todos os outros erros (Decode, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
