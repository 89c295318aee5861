use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{errors::GenerationError, normalizer::ProviderOutput};

#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn generate(
        &self,
        model_id: &str,
        payload: &Map<String, Value>,
    ) -> Result<ProviderOutput, GenerationError>;
}
