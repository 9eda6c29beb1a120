// src/handlers/webhooks.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::lead::{ZaiaLead, ZaiaMeeting},
};

// GET /
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Serviço no ar")
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// POST /webhooks/zaia/lead
#[utoipa::path(
    post,
    path = "/webhooks/zaia/lead",
    tag = "Webhooks",
    request_body = ZaiaLead,
    responses(
        (status = 200, description = "Lead criado ou atualizado"),
        (status = 400, description = "Dados inválidos"),
        (status = 422, description = "WhatsApp inválido"),
        (status = 502, description = "Erro da API do Notion")
    )
)]
pub async fn upsert_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<ZaiaLead>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let page_id = app_state
        .lead_service
        .upsert_lead(&payload)
        .await
        .map_err(|err| {
            log_failure(&payload, &err);
            err
        })?;

    Ok((
        StatusCode::OK,
        Json(json!({ "status": "success", "page_id": page_id })),
    ))
}

// POST /webhooks/zaia/lead/email
#[utoipa::path(
    post,
    path = "/webhooks/zaia/lead/email",
    tag = "Webhooks",
    request_body = ZaiaMeeting,
    responses(
        (status = 200, description = "Reunião registrada no lead"),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Lead não encontrado para o WhatsApp informado"),
        (status = 502, description = "Erro da API do Notion")
    )
)]
pub async fn schedule_meeting(
    State(app_state): State<AppState>,
    Json(payload): Json<ZaiaMeeting>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let page_id = app_state
        .lead_service
        .apply_meeting_update(&payload)
        .await
        .map_err(|err| {
            log_failure(&payload, &err);
            err
        })?;

    Ok((
        StatusCode::OK,
        Json(json!({ "status": "success", "page_id": page_id })),
    ))
}

// Falha inesperada leva o payload junto para o log; erro de cliente
// (validação, 404) não polui o log de erros.
fn log_failure<T: std::fmt::Debug>(payload: &T, err: &AppError) {
    match err {
        AppError::ValidationError(_) | AppError::InvalidWhatsapp | AppError::LeadNotFound => {}
        other => tracing::error!("Falha ao processar o payload {:?}: {}", payload, other),
    }
}
