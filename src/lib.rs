use std::{sync::Arc, time::Duration};

#[macro_use]
extern crate lazy_static;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderName, Method},
    routing::{get, post},
    BoxError, Router,
};
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    app::{env::Envy, errors::DefaultApiError, util::reqwest::no_redirect_client},
    images::{controller::SESSION_HEADER, gate::GenerationGate, provider::ImageProvider},
};

pub mod app;
pub mod delivery;
pub mod downloads;
pub mod images;
pub mod replicate;

#[cfg(test)]
pub mod test_support;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub download_http: reqwest::Client,
    pub provider: Arc<dyn ImageProvider>,
    pub gate: GenerationGate,
}

impl AppState {
    pub fn new(envy: Envy, provider: Arc<dyn ImageProvider>) -> reqwest::Result<Self> {
        Ok(Self {
            envy: Arc::new(envy),
            download_http: no_redirect_client()?,
            provider,
            gate: GenerationGate::default(),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.envy.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn default_model_id(&self) -> &str {
        self.envy
            .default_model_id
            .as_deref()
            .unwrap_or(replicate::config::DEFAULT_MODEL_ID)
    }
}

pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(SESSION_HEADER)])
        .allow_methods([Method::POST, Method::GET]);

    Router::new()
        .route("/", get(app::controller::get_root))
        // images
        .route("/images/generate", post(images::controller::generate_images))
        .route(
            "/images/generate/form",
            post(images::controller::generate_images_from_form),
        )
        // downloads
        .route("/api/download", get(downloads::controller::download))
        .fallback(app::controller::not_found)
        // layers
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    tracing::error!("request failed in middleware: {}", err);
                    DefaultApiError::InternalServerError.value()
                }))
                .layer(BufferLayer::new(1024))
                .layer(RateLimitLayer::new(5, Duration::from_secs(1))),
        )
        .with_state(state)
}
