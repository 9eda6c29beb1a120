// src/config.rs

use std::env;
use std::sync::Arc;

use crate::notion::{NotionClient, NotionDatabase};
use crate::services::LeadService;

/// Mapa de nomes das propriedades do database no Notion.
///
/// Cada workspace renomeia as colunas à vontade, então tudo é configurável
/// por variável de ambiente, com os nomes do database original como padrão.
/// Resolvido uma única vez na inicialização; depois disso ninguém mais
/// consulta o ambiente.
#[derive(Debug, Clone)]
pub struct FieldMap {
    pub whatsapp: String,
    pub data_evento: String,
    pub local_evento: String,
    pub tipo_servico: String,
    pub link_wpp: String,
    pub email: String,
    pub data_reuniao: String,
    pub link_reuniao: String,
    pub status: String,
    pub title: String,
}

impl FieldMap {
    fn from_env(title: String) -> Self {
        Self {
            whatsapp: prop("NOTION_PROP_WHATSAPP", "WhatsApp"),
            data_evento: prop("NOTION_PROP_DATA_EVENTO", "Data do Evento"),
            local_evento: prop("NOTION_PROP_LOCAL_EVENTO", "Local do Evento"),
            tipo_servico: prop("NOTION_PROP_TIPO_SERVICO", "Tipo Serviço"),
            link_wpp: prop("NOTION_PROP_LINK_WPP", "Link Rápido WhatsApp"),
            email: prop("NOTION_PROP_EMAIL", "Email"),
            data_reuniao: prop("NOTION_PROP_DATA_REUNIAO", "Data da Reunião"),
            link_reuniao: prop("NOTION_PROP_LINK_REUNIAO", "Link da Reunião"),
            status: prop("NOTION_PROP_STATUS", "Status"),
            title,
        }
    }
}

fn prop(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub lead_service: LeadService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = env::var("NOTION_API_KEY").expect("NOTION_API_KEY deve ser definida");
        let database_id =
            env::var("NOTION_DATABASE_ID").expect("NOTION_DATABASE_ID deve ser definida");

        let client = NotionClient::new(api_key)?;

        // A propriedade de título não tem nome fixo: ou vem do ambiente,
        // ou perguntamos ao próprio Notion qual coluna é o título.
        let title = match env::var("NOTION_PROP_TITLE") {
            Ok(name) => name,
            Err(_) => client
                .detect_title_property(&database_id)
                .await?
                .unwrap_or_else(|| "Name".to_string()),
        };
        tracing::info!("✅ Conectado ao database do Notion (título: '{}')", title);

        let fields = FieldMap::from_env(title);
        let scheduled_status = prop("NOTION_STATUS_REUNIAO", "Reunião Agendada");

        // --- Monta o gráfico de dependências ---
        let db: Arc<dyn NotionDatabase> = Arc::new(client);
        let lead_service = LeadService::new(db, database_id, fields, scheduled_status);

        Ok(Self { lead_service })
    }
}

pub fn get_port() -> u16 {
    env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000)
}
