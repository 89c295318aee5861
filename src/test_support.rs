use std::net::TcpListener;

use async_trait::async_trait;
use axum::Router;
use serde_json::{Map, Value};

use crate::images::{
    errors::GenerationError, normalizer::ProviderOutput, provider::ImageProvider,
};

pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(router.into_make_service())
            .await
            .unwrap();
    });

    format!("http://{}", addr)
}

pub struct UnusedProvider;

#[async_trait]
impl ImageProvider for UnusedProvider {
    async fn generate(
        &self,
        _model_id: &str,
        _payload: &Map<String, Value>,
    ) -> Result<ProviderOutput, GenerationError> {
        Err(GenerationError::ProviderFailed {
            detail: "not available in this test".to_string(),
        })
    }
}
