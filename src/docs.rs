// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::webhooks::health,
        handlers::webhooks::upsert_lead,
        handlers::webhooks::schedule_meeting,
    ),
    components(
        schemas(
            models::lead::ZaiaLead,
            models::lead::ZaiaMeeting,
        )
    ),
    tags(
        (name = "Webhooks", description = "Entradas da Zaia (captura de lead e agendamento de reunião)"),
        (name = "Health", description = "Verificação de disponibilidade")
    )
)]
pub struct ApiDoc;
