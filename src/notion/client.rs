// src/notion/client.rs

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, header};
use serde_json::{Value, json};

use crate::common::error::AppError;

use super::types::{
    NotionDatabaseInfo, NotionPage, Properties, QueryResponse, properties_to_json,
};

const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// A interface que o resto da aplicação enxerga do banco externo.
/// Em produção é o `NotionClient`; nos testes, um mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotionDatabase: Send + Sync {
    /// Busca no máximo uma página cuja propriedade `field_name` seja
    /// exatamente igual a `equals_value`.
    async fn find_one_by_field(
        &self,
        database_id: &str,
        field_name: &str,
        equals_value: &str,
    ) -> Result<Option<NotionPage>, AppError>;

    async fn create_record(
        &self,
        database_id: &str,
        properties: Properties,
    ) -> Result<NotionPage, AppError>;

    async fn update_record(
        &self,
        page_id: &str,
        properties: Properties,
    ) -> Result<NotionPage, AppError>;
}

/// Cliente HTTP da API do Notion.
pub struct NotionClient {
    http: Client,
    token: String,
}

impl NotionClient {
    pub fn new(token: String) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );
        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self { http, token })
    }

    /// Descobre o nome da propriedade de título do database. A API exige
    /// gravar o título pelo nome real da coluna, que cada workspace
    /// renomeia à vontade.
    pub async fn detect_title_property(
        &self,
        database_id: &str,
    ) -> Result<Option<String>, AppError> {
        let url = format!("{}/databases/{}", NOTION_API_BASE, database_id);
        let body = self.send(self.http.get(&url)).await?;
        let info: NotionDatabaseInfo = serde_json::from_value(body)?;
        Ok(info
            .properties
            .into_iter()
            .find(|(_, meta)| meta.kind == "title")
            .map(|(name, _)| name))
    }

    /// Dispara a requisição e devolve o corpo como JSON. Resposta não-2xx
    /// vira `AppError::NotionApi` com o status e a mensagem do Notion.
    async fn send(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or(text);
            return Err(AppError::NotionApi {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl NotionDatabase for NotionClient {
    async fn find_one_by_field(
        &self,
        database_id: &str,
        field_name: &str,
        equals_value: &str,
    ) -> Result<Option<NotionPage>, AppError> {
        let url = format!("{}/databases/{}/query", NOTION_API_BASE, database_id);
        let filter = json!({
            "filter": {
                "property": field_name,
                "rich_text": { "equals": equals_value }
            },
            "page_size": 1
        });

        let body = self.send(self.http.post(&url).json(&filter)).await?;
        let mut query: QueryResponse = serde_json::from_value(body)?;

        if query.results.is_empty() {
            Ok(None)
        } else {
            Ok(Some(query.results.remove(0)))
        }
    }

    async fn create_record(
        &self,
        database_id: &str,
        properties: Properties,
    ) -> Result<NotionPage, AppError> {
        let url = format!("{}/pages", NOTION_API_BASE);
        let payload = json!({
            "parent": { "database_id": database_id },
            "properties": properties_to_json(&properties)
        });

        let body = self.send(self.http.post(&url).json(&payload)).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn update_record(
        &self,
        page_id: &str,
        properties: Properties,
    ) -> Result<NotionPage, AppError> {
        let url = format!("{}/pages/{}", NOTION_API_BASE, page_id);
        let payload = json!({ "properties": properties_to_json(&properties) });

        let body = self.send(self.http.patch(&url).json(&payload)).await?;
        Ok(serde_json::from_value(body)?)
    }
}
