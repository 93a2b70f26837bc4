//! objstudio HTTP server: model generation, label detection, normalization and export.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use shared::GeneratedModel;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::CorsLayer;

pub mod ai;
pub mod config;
pub mod routes;

use ai::TextGenerator;
use config::ServerConfig;

/// Shared server state.
pub struct AppState<G> {
    pub config: Arc<ServerConfig>,
    pub generator: Arc<G>,
    /// Current model, replaced wholesale on every generation
    pub current: Arc<RwLock<Option<Arc<GeneratedModel>>>>,
    /// Held while a generation is in flight
    pub generation_gate: Arc<Mutex<()>>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            generator: Arc::clone(&self.generator),
            current: Arc::clone(&self.current),
            generation_gate: Arc::clone(&self.generation_gate),
        }
    }
}

impl<G: TextGenerator> AppState<G> {
    pub fn new(config: ServerConfig, generator: G) -> Self {
        Self {
            config: Arc::new(config),
            generator: Arc::new(generator),
            current: Arc::new(RwLock::new(None)),
            generation_gate: Arc::new(Mutex::new(())),
        }
    }

    pub async fn current_model(&self) -> Option<Arc<GeneratedModel>> {
        self.current.read().await.clone()
    }

    pub async fn set_current_model(&self, model: GeneratedModel) {
        *self.current.write().await = Some(Arc::new(model));
    }
}

pub fn app<G: TextGenerator>(state: AppState<G>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/generate", post(routes::generate::<G>))
        .route("/api/detect", post(routes::detect))
        .route("/api/model", get(routes::current_model::<G>))
        .route("/api/normalize", post(routes::normalize))
        .route("/api/export/{format}", get(routes::export::<G>))
        .route("/api/export/{format}/save", post(routes::save::<G>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
