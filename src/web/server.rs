// ============================================================
// Layer 1 — HTTP Server
// ============================================================
// actix-web app wiring for the form. Workers share one AppState:
// the session map and the load-once model cell.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};

use crate::application::serve_use_case::ServeConfig;
use crate::infra::model_cell::ModelCell;
use crate::web::session::SessionStore;

pub struct AppState {
    pub sessions: SessionStore,
    pub model:    Arc<ModelCell>,
}

impl AppState {
    pub fn new(model: Arc<ModelCell>) -> Self {
        Self { sessions: SessionStore::new(), model }
    }
}

pub async fn run(config: ServeConfig, model: Arc<ModelCell>) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(model));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(super::configure_routes)
    })
    .workers(config.workers.max(1))
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
