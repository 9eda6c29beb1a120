// src/services/lead_service.rs

use std::sync::Arc;

use crate::{
    common::{
        dates::combine_meeting_datetime,
        error::AppError,
        phone::{normalize_whatsapp, whatsapp_link},
    },
    config::FieldMap,
    models::lead::{ZaiaLead, ZaiaMeeting},
    notion::{NotionDatabase, Properties, PropertyValue},
};

/// O motor de upsert: decide entre criar e atualizar a página do lead no
/// Notion, sempre chaveado pelo WhatsApp normalizado.
#[derive(Clone)]
pub struct LeadService {
    db: Arc<dyn NotionDatabase>,
    database_id: String,
    fields: FieldMap,
    scheduled_status: String,
}

impl LeadService {
    pub fn new(
        db: Arc<dyn NotionDatabase>,
        database_id: String,
        fields: FieldMap,
        scheduled_status: String,
    ) -> Self {
        Self {
            db,
            database_id,
            fields,
            scheduled_status,
        }
    }

    /// Cria ou atualiza o lead identificado pelo WhatsApp.
    ///
    /// A busca + gravação não é transacional: duas requisições simultâneas
    /// para o mesmo número podem criar páginas duplicadas. Limitação aceita
    /// do modelo de consistência da API do Notion.
    pub async fn upsert_lead(&self, payload: &ZaiaLead) -> Result<String, AppError> {
        let norm = normalize_whatsapp(&payload.whatsapp);
        if norm.is_empty() {
            return Err(AppError::InvalidWhatsapp);
        }

        let existing = self
            .db
            .find_one_by_field(&self.database_id, &self.fields.whatsapp, &norm)
            .await?;

        let mut properties = self.build_common_properties(&norm, payload);

        if let Some(page) = existing {
            // Merge parcial: campos ausentes do payload ficam como estão
            // na página, e o status não é tocado aqui.
            tracing::info!("🔄 Atualizando lead existente para o WhatsApp {}", norm);
            let updated = self.db.update_record(&page.id, properties).await?;
            return Ok(updated.id);
        }

        // Página nova precisa de título; sem nome do cliente usamos o número.
        properties
            .entry(self.fields.title.clone())
            .or_insert_with(|| PropertyValue::Title(format!("Lead {}", norm)));

        tracing::info!("🆕 Criando lead para o WhatsApp {}", norm);
        let created = self.db.create_record(&self.database_id, properties).await?;
        Ok(created.id)
    }

    /// Marca a reunião agendada no lead existente. Nunca cria página nova:
    /// lead desconhecido vira `LeadNotFound` para o chamador decidir.
    pub async fn apply_meeting_update(&self, payload: &ZaiaMeeting) -> Result<String, AppError> {
        let norm = normalize_whatsapp(&payload.whatsapp);
        if norm.is_empty() {
            // Sem número não tem como buscar o lead
            return Err(AppError::LeadNotFound);
        }

        let Some(page) = self
            .db
            .find_one_by_field(&self.database_id, &self.fields.whatsapp, &norm)
            .await?
        else {
            return Err(AppError::LeadNotFound);
        };

        let mut properties = Properties::new();
        properties.insert(
            self.fields.email.clone(),
            PropertyValue::Email(payload.email.clone()),
        );

        if let (Some(data), Some(hora)) = (
            non_empty(&payload.data_reuniao),
            non_empty(&payload.hora_reuniao),
        ) {
            properties.insert(
                self.fields.data_reuniao.clone(),
                PropertyValue::Text(combine_meeting_datetime(data, hora)),
            );
        }

        if let Some(link) = non_empty(&payload.link_reuniao) {
            properties.insert(
                self.fields.link_reuniao.clone(),
                PropertyValue::Url(link.to_string()),
            );
        }

        // O status muda sempre que este webhook dispara, mesmo que a Zaia
        // não tenha mandado data nem link.
        properties.insert(
            self.fields.status.clone(),
            PropertyValue::Status(self.scheduled_status.clone()),
        );

        tracing::info!("📅 Reunião agendada para o lead {}", norm);
        let updated = self.db.update_record(&page.id, properties).await?;
        Ok(updated.id)
    }

    fn build_common_properties(&self, norm: &str, payload: &ZaiaLead) -> Properties {
        let mut properties = Properties::new();
        properties.insert(
            self.fields.whatsapp.clone(),
            PropertyValue::Text(norm.to_string()),
        );
        properties.insert(
            self.fields.link_wpp.clone(),
            PropertyValue::Url(whatsapp_link(norm)),
        );

        if let Some(data) = non_empty(&payload.data_evento) {
            properties.insert(
                self.fields.data_evento.clone(),
                PropertyValue::Text(data.to_string()),
            );
        }
        if let Some(local) = non_empty(&payload.local_evento) {
            properties.insert(
                self.fields.local_evento.clone(),
                PropertyValue::Text(local.to_string()),
            );
        }
        if let Some(tipo) = non_empty(&payload.tipo_evento) {
            properties.insert(
                self.fields.tipo_servico.clone(),
                PropertyValue::Text(format!("Lead deseja: {}", tipo)),
            );
        }
        if let Some(nome) = non_empty(&payload.nome_cliente) {
            properties.insert(
                self.fields.title.clone(),
                PropertyValue::Title(nome.to_string()),
            );
        }

        properties
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notion::{MockNotionDatabase, NotionPage};
    use mockall::predicate::eq;

    fn field_map() -> FieldMap {
        FieldMap {
            whatsapp: "WhatsApp".to_string(),
            data_evento: "Data do Evento".to_string(),
            local_evento: "Local do Evento".to_string(),
            tipo_servico: "Tipo Serviço".to_string(),
            link_wpp: "Link Rápido WhatsApp".to_string(),
            email: "Email".to_string(),
            data_reuniao: "Data da Reunião".to_string(),
            link_reuniao: "Link da Reunião".to_string(),
            status: "Status".to_string(),
            title: "Name".to_string(),
        }
    }

    fn service(mock: MockNotionDatabase) -> LeadService {
        LeadService::new(
            Arc::new(mock),
            "db-123".to_string(),
            field_map(),
            "Reunião Agendada".to_string(),
        )
    }

    fn lead(whatsapp: &str) -> ZaiaLead {
        ZaiaLead {
            whatsapp: whatsapp.to_string(),
            data_evento: None,
            local_evento: None,
            tipo_evento: None,
            nome_cliente: None,
        }
    }

    fn meeting(whatsapp: &str) -> ZaiaMeeting {
        ZaiaMeeting {
            whatsapp: whatsapp.to_string(),
            email: "maria@exemplo.com.br".to_string(),
            data_reuniao: None,
            hora_reuniao: None,
            link_reuniao: None,
        }
    }

    fn page(id: &str) -> NotionPage {
        NotionPage { id: id.to_string() }
    }

    #[tokio::test]
    async fn creates_new_lead_with_client_name_as_title() {
        let mut mock = MockNotionDatabase::new();
        mock.expect_find_one_by_field()
            .with(eq("db-123"), eq("WhatsApp"), eq("5511999999999"))
            .times(1)
            .returning(|_, _, _| Ok(None));
        mock.expect_create_record()
            .withf(|database_id, properties| {
                database_id == "db-123"
                    && properties.get("Name") == Some(&PropertyValue::Title("Maria".to_string()))
                    && properties.get("WhatsApp")
                        == Some(&PropertyValue::Text("5511999999999".to_string()))
                    && properties.get("Link Rápido WhatsApp")
                        == Some(&PropertyValue::Url(
                            "https://wa.me/5511999999999".to_string(),
                        ))
            })
            .times(1)
            .returning(|_, _| Ok(page("page-1")));

        let mut payload = lead("+55 (11) 99999-9999");
        payload.nome_cliente = Some("Maria".to_string());

        let page_id = service(mock).upsert_lead(&payload).await.unwrap();
        assert_eq!(page_id, "page-1");
    }

    #[tokio::test]
    async fn creates_new_lead_with_fallback_title() {
        let mut mock = MockNotionDatabase::new();
        mock.expect_find_one_by_field().returning(|_, _, _| Ok(None));
        mock.expect_create_record()
            .withf(|_, properties| {
                properties.get("Name")
                    == Some(&PropertyValue::Title("Lead 5511999999999".to_string()))
            })
            .times(1)
            .returning(|_, _| Ok(page("page-2")));

        let page_id = service(mock)
            .upsert_lead(&lead("11 99999-9999"))
            .await
            .unwrap();
        assert_eq!(page_id, "page-2");
    }

    #[tokio::test]
    async fn updates_existing_lead_without_touching_title() {
        let mut mock = MockNotionDatabase::new();
        mock.expect_find_one_by_field()
            .returning(|_, _, _| Ok(Some(page("page-7"))));
        mock.expect_update_record()
            .withf(|page_id, properties| {
                page_id == "page-7"
                    && !properties.contains_key("Name")
                    && !properties.contains_key("Status")
                    && properties.get("Data do Evento")
                        == Some(&PropertyValue::Text("12/10/2025".to_string()))
            })
            .times(1)
            .returning(|_, _| Ok(page("page-7")));

        let mut payload = lead("11 99999-9999");
        payload.data_evento = Some("12/10/2025".to_string());

        let page_id = service(mock).upsert_lead(&payload).await.unwrap();
        assert_eq!(page_id, "page-7");
    }

    #[tokio::test]
    async fn empty_optional_fields_stay_out_of_the_update_set() {
        let mut mock = MockNotionDatabase::new();
        mock.expect_find_one_by_field()
            .returning(|_, _, _| Ok(Some(page("page-3"))));
        mock.expect_update_record()
            .withf(|_, properties| {
                !properties.contains_key("Data do Evento")
                    && !properties.contains_key("Local do Evento")
                    && properties.get("Tipo Serviço")
                        == Some(&PropertyValue::Text("Lead deseja: Casamento".to_string()))
            })
            .times(1)
            .returning(|_, _| Ok(page("page-3")));

        let mut payload = lead("11 99999-9999");
        payload.data_evento = Some(String::new());
        payload.tipo_evento = Some("Casamento".to_string());

        service(mock).upsert_lead(&payload).await.unwrap();
    }

    #[tokio::test]
    async fn invalid_whatsapp_makes_no_notion_call() {
        // Mock sem expectativas: qualquer chamada derruba o teste
        let mock = MockNotionDatabase::new();

        let err = service(mock).upsert_lead(&lead("abc")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidWhatsapp));
    }

    #[tokio::test]
    async fn meeting_update_for_unknown_lead_is_not_found() {
        let mut mock = MockNotionDatabase::new();
        mock.expect_find_one_by_field().returning(|_, _, _| Ok(None));

        let err = service(mock)
            .apply_meeting_update(&meeting("11 99999-9999"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::LeadNotFound));
    }

    #[tokio::test]
    async fn meeting_update_with_only_email_still_sets_status() {
        let mut mock = MockNotionDatabase::new();
        mock.expect_find_one_by_field()
            .returning(|_, _, _| Ok(Some(page("page-9"))));
        mock.expect_update_record()
            .withf(|page_id, properties| {
                page_id == "page-9"
                    && properties.get("Email")
                        == Some(&PropertyValue::Email("maria@exemplo.com.br".to_string()))
                    && properties.get("Status")
                        == Some(&PropertyValue::Status("Reunião Agendada".to_string()))
                    && !properties.contains_key("Data da Reunião")
                    && !properties.contains_key("Link da Reunião")
            })
            .times(1)
            .returning(|_, _| Ok(page("page-9")));

        let page_id = service(mock)
            .apply_meeting_update(&meeting("11 99999-9999"))
            .await
            .unwrap();
        assert_eq!(page_id, "page-9");
    }

    #[tokio::test]
    async fn meeting_update_combines_date_and_time() {
        let mut mock = MockNotionDatabase::new();
        mock.expect_find_one_by_field()
            .returning(|_, _, _| Ok(Some(page("page-4"))));
        mock.expect_update_record()
            .withf(|_, properties| {
                properties.get("Data da Reunião")
                    == Some(&PropertyValue::Text("27/09/2025 às 05:00".to_string()))
                    && properties.get("Link da Reunião")
                        == Some(&PropertyValue::Url(
                            "https://meet.google.com/abc-defg-hij".to_string(),
                        ))
            })
            .times(1)
            .returning(|_, _| Ok(page("page-4")));

        let mut payload = meeting("11 99999-9999");
        payload.data_reuniao = Some("27/09/2025".to_string());
        payload.hora_reuniao = Some("05:00".to_string());
        payload.link_reuniao = Some("https://meet.google.com/abc-defg-hij".to_string());

        service(mock).apply_meeting_update(&payload).await.unwrap();
    }

    #[tokio::test]
    async fn meeting_date_needs_both_date_and_time() {
        let mut mock = MockNotionDatabase::new();
        mock.expect_find_one_by_field()
            .returning(|_, _, _| Ok(Some(page("page-5"))));
        mock.expect_update_record()
            .withf(|_, properties| !properties.contains_key("Data da Reunião"))
            .times(1)
            .returning(|_, _| Ok(page("page-5")));

        let mut payload = meeting("11 99999-9999");
        payload.data_reuniao = Some("27/09/2025".to_string());

        service(mock).apply_meeting_update(&payload).await.unwrap();
    }
}
