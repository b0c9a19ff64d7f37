use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::api::SakhiBackendApi;
use crate::config::Config;
use crate::db::ClinicStorage;
use crate::error::BindingError;
use crate::handlers::{chat, health, leads, users};
use crate::middleware::{cors, log_latency};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct BindingState {
    pub client: reqwest::Client,
    pub backend_url: Arc<Url>,
    pub upstream_timeout: Duration,
    pub storage: ClinicStorage,
}

impl BindingState {
    pub fn new(
        client: reqwest::Client,
        backend_url: Url,
        upstream_timeout: Duration,
        storage: ClinicStorage,
    ) -> Self {
        Self {
            client,
            backend_url: Arc::new(backend_url),
            upstream_timeout,
            storage,
        }
    }

    pub fn from_config(cfg: &Config, storage: ClinicStorage) -> Result<Self, BindingError> {
        let client = SakhiBackendApi::build_client(cfg)?;
        Ok(Self::new(
            client,
            cfg.backend_url.clone(),
            cfg.upstream_timeout(),
            storage,
        ))
    }
}

pub fn binding_router(state: BindingState) -> Router {
    Router::new()
        .route("/sakhi/chat", post(chat::sakhi_chat_handler))
        .route("/health", get(health::health_handler))
        .route("/api/health/db", get(health::db_health_handler))
        .route("/api/users", post(users::create_user_handler))
        .route("/api/users/{id}", get(users::get_user_handler))
        .route(
            "/api/users/by-username/{username}",
            get(users::get_user_by_username_handler),
        )
        .route(
            "/api/leads",
            get(leads::list_leads_handler).post(leads::create_lead_handler),
        )
        .route(
            "/api/leads/{lead_id}",
            get(leads::get_lead_handler).patch(leads::update_lead_handler),
        )
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(log_latency))
        .with_state(state)
}
