// ============================================================
// Layer 2 — ServeUseCase
// ============================================================
// Brings the form server up:
//
//   Step 1: Load the model once          (Layer 6 - infra)
//   Step 2: Start the HTTP form server   (Layer 1 - web)
//
// The model is loaded before the server binds. A missing or
// broken artifact stops startup with the load error; there is
// no fallback model.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::infra::{model_cell::ModelCell, model_store::ModelStore};

// ─── Server Configuration ────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    pub model_dir: String,
    pub host:      String,
    pub port:      u16,
    pub workers:   usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            model_dir: "models".to_string(),
            host:      "127.0.0.1".to_string(),
            port:      8501,
            workers:   2,
        }
    }
}

pub struct ServeUseCase {
    config: ServeConfig,
}

impl ServeUseCase {
    pub fn new(config: ServeConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        let model = Arc::new(ModelCell::from_store(ModelStore::new(&cfg.model_dir)));
        model
            .get_or_load()
            .with_context(|| format!("Cannot start without a model from '{}'", cfg.model_dir))?;

        tracing::info!("Serving attrition form on http://{}:{}", cfg.host, cfg.port);
        actix_web::rt::System::new()
            .block_on(crate::web::server::run(cfg.clone(), model))
            .context("HTTP server failed")?;

        tracing::info!("Server stopped.");
        Ok(())
    }
}
