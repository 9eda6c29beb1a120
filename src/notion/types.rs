// src/notion/types.rs

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Valor de uma propriedade do Notion, tipado pelo "kind" que a API espera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Texto simples ("rich_text").
    Text(String),
    /// O título da página. O Notion exige exatamente uma propriedade
    /// desse tipo por database.
    Title(String),
    Url(String),
    Email(String),
    /// Rótulo de status ("Reunião Agendada" etc).
    Status(String),
}

impl PropertyValue {
    /// Converte para o formato que a API de páginas espera.
    pub fn to_json(&self) -> Value {
        match self {
            PropertyValue::Text(content) => json!({
                "rich_text": [{ "type": "text", "text": { "content": content } }]
            }),
            PropertyValue::Title(content) => json!({
                "title": [{ "type": "text", "text": { "content": content } }]
            }),
            PropertyValue::Url(url) => json!({ "url": url }),
            PropertyValue::Email(email) => json!({ "email": email }),
            PropertyValue::Status(name) => json!({ "status": { "name": name } }),
        }
    }
}

/// Conjunto de propriedades a gravar em uma página
/// (nome externo da propriedade -> valor).
pub type Properties = BTreeMap<String, PropertyValue>;

pub fn properties_to_json(properties: &Properties) -> Value {
    let mut map = Map::new();
    for (name, value) in properties {
        map.insert(name.clone(), value.to_json());
    }
    Value::Object(map)
}

/// Página retornada pela API. Só carregamos o que o bridge usa.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionPage {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<NotionPage>,
}

/// Metadados do database, usados só para descobrir a propriedade de título.
#[derive(Debug, Deserialize)]
pub struct NotionDatabaseInfo {
    #[serde(default)]
    pub properties: HashMap<String, NotionPropertyMeta>,
}

#[derive(Debug, Deserialize)]
pub struct NotionPropertyMeta {
    #[serde(rename = "type")]
    pub kind: String,
}
