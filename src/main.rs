// src/main.rs

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod docs;
mod handlers;
mod models;
mod notion;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // As rotas que a Zaia chama
    let webhook_routes = Router::new()
        .route("/lead", post(handlers::webhooks::upsert_lead))
        .route("/lead/email", post(handlers::webhooks::schedule_meeting));

    // Combina tudo no router principal.
    // A Zaia dispara de origens variadas e o bridge não usa cookies,
    // então o CORS fica aberto.
    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .route("/", get(handlers::webhooks::health))
        .nest("/webhooks/zaia", webhook_routes)
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Inicia o servidor
    let addr = format!("0.0.0.0:{}", config::get_port());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
