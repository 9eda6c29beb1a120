// src/models/lead.rs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Payload que a Zaia dispara quando o agente captura um lead.
///
/// A Zaia monta as chaves com espaço ("data evento", "nome do cliente"),
/// então aceitamos tanto o alias dela quanto o nome em snake_case.
/// Chaves desconhecidas são ignoradas.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ZaiaLead {
    #[validate(length(min = 1, message = "O WhatsApp é obrigatório"))]
    #[schema(example = "+55 (11) 99999-9999")]
    pub whatsapp: String,

    #[serde(default, alias = "data evento")]
    #[schema(example = "12/10/2025")]
    pub data_evento: Option<String>,

    #[serde(default, alias = "local evento")]
    #[schema(example = "Belo Horizonte - MG")]
    pub local_evento: Option<String>,

    #[serde(default, alias = "tipo evento")]
    #[schema(example = "Casamento")]
    pub tipo_evento: Option<String>,

    #[serde(default, alias = "nome do cliente")]
    #[schema(example = "Maria")]
    pub nome_cliente: Option<String>,
}

/// Payload do agendamento de reunião (follow-up de um lead já captado).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ZaiaMeeting {
    #[validate(length(min = 1, message = "O WhatsApp é obrigatório"))]
    #[schema(example = "+55 (11) 99999-9999")]
    pub whatsapp: String,

    #[validate(email(message = "E-mail inválido"))]
    #[schema(example = "maria@exemplo.com.br")]
    pub email: String,

    #[serde(default, alias = "data reuniao")]
    #[schema(example = "27/09/2025")]
    pub data_reuniao: Option<String>,

    #[serde(default, alias = "hora reuniao")]
    #[schema(example = "05:00")]
    pub hora_reuniao: Option<String>,

    #[serde(default, alias = "link reuniao")]
    #[schema(example = "https://meet.google.com/abc-defg-hij")]
    pub link_reuniao: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{ZaiaLead, ZaiaMeeting};

    #[test]
    fn accepts_zaia_spaced_aliases() {
        let payload: ZaiaLead = serde_json::from_str(
            r#"{
                "whatsapp": "11 99999-9999",
                "data evento": "12/10/2025",
                "nome do cliente": "Maria",
                "campo desconhecido": "ignorado"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.whatsapp, "11 99999-9999");
        assert_eq!(payload.data_evento.as_deref(), Some("12/10/2025"));
        assert_eq!(payload.nome_cliente.as_deref(), Some("Maria"));
        assert!(payload.local_evento.is_none());
    }

    #[test]
    fn accepts_snake_case_names_too() {
        let payload: ZaiaMeeting = serde_json::from_str(
            r#"{
                "whatsapp": "11 99999-9999",
                "email": "maria@exemplo.com.br",
                "data_reuniao": "27/09/2025",
                "hora reuniao": "05:00"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.data_reuniao.as_deref(), Some("27/09/2025"));
        assert_eq!(payload.hora_reuniao.as_deref(), Some("05:00"));
        assert!(payload.link_reuniao.is_none());
    }
}
