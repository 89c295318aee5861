use serde::Deserialize;
use serde_json::Value;

use crate::replicate::enums::replicate_prediction_status::ReplicatePredictionStatus;

#[derive(Debug, Deserialize)]
pub struct ReplicatePredictionsResponse {
    pub id: String,
    pub urls: Option<ReplicateUrls>,
    pub status: String,
    pub output: Option<Value>,
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ReplicateUrls {
    pub get: Option<String>,
}

impl ReplicatePredictionsResponse {
    pub fn status(&self) -> Option<ReplicatePredictionStatus> {
        ReplicatePredictionStatus::parse(&self.status)
    }

    pub fn poll_url(&self, api_url: &str) -> String {
        match self.urls.as_ref().and_then(|urls| urls.get.as_ref()) {
            Some(url) => url.to_string(),
            None => format!("{}/predictions/{}", api_url, self.id),
        }
    }

    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(message)) => message.to_string(),
            Some(Value::Null) | None => format!("prediction {}", self.status),
            Some(other) => other.to_string(),
        }
    }
}
