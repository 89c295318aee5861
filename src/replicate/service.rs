use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{header, RequestBuilder, StatusCode};
use serde_json::{Map, Value};
use tokio::time::{sleep, Instant};
use tokio_retry::{strategy::FixedInterval, RetryIf};

use crate::{
    app::env::Envy,
    images::{errors::GenerationError, normalizer::ProviderOutput, provider::ImageProvider},
};

use super::{
    config::{
        API_URL, CREATE_RETRY_ATTEMPTS, CREATE_RETRY_INTERVAL_MILLIS, DEFAULT_POLL_TIMEOUT_SECS,
        POLL_INTERVAL_MILLIS,
    },
    enums::replicate_prediction_status::ReplicatePredictionStatus,
    models::replicate_model_ref::ReplicateModelRef,
    output::provider_output,
    structs::replicate_predictions_response::ReplicatePredictionsResponse,
};

#[derive(Debug)]
enum RequestFailure {
    Transport(String),
    Status { status: StatusCode, body: String },
    Decode(String),
}

impl RequestFailure {
    fn is_retryable_status(&self) -> bool {
        match self {
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Transport(_) | Self::Decode(_) => false,
        }
    }

    fn is_retryable_read(&self) -> bool {
        matches!(self, Self::Transport(_)) || self.is_retryable_status()
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "request failed: {}", e),
            Self::Status { status, body } => write!(f, "Replicate responded {}: {}", status, body),
            Self::Decode(e) => write!(f, "unexpected response: {}", e),
        }
    }
}

impl From<RequestFailure> for GenerationError {
    fn from(failure: RequestFailure) -> Self {
        GenerationError::ProviderFailed {
            detail: failure.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReplicateClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    poll_interval: Duration,
    poll_timeout: Duration,
    retry_interval: Duration,
}

impl ReplicateClient {
    pub fn new(client: reqwest::Client, api_key: &str) -> Self {
        Self {
            client,
            api_url: API_URL.to_string(),
            api_key: api_key.to_string(),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MILLIS),
            poll_timeout: Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
            retry_interval: Duration::from_millis(CREATE_RETRY_INTERVAL_MILLIS),
        }
    }

    pub fn from_envy(client: reqwest::Client, envy: &Envy) -> Self {
        let mut replicate = Self::new(client, &envy.replicate_api_key);
        if let Some(api_url) = &envy.replicate_api_url {
            replicate = replicate.with_api_url(api_url);
        }
        if let Some(secs) = envy.replicate_poll_timeout_secs {
            replicate = replicate.with_poll_timeout(Duration::from_secs(secs));
        }
        replicate
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    pub fn with_retry_interval(mut self, retry_interval: Duration) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    fn headers(&self) -> Result<header::HeaderMap, GenerationError> {
        let Ok(authorization) = format!("Bearer {}", self.api_key).parse() else {
            return Err(GenerationError::ProviderFailed {
                detail: "Replicate API key is not a valid header value.".to_string(),
            });
        };

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        Ok(headers)
    }

    async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<ReplicatePredictionsResponse, RequestFailure> {
        let res = request
            .send()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| RequestFailure::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(RequestFailure::Status { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("unexpected Replicate response: {:?}", text);
            RequestFailure::Decode(e.to_string())
        })
    }

    async fn create_prediction_with_retry(
        &self,
        model: &ReplicateModelRef,
        input: &Map<String, Value>,
        headers: &header::HeaderMap,
    ) -> Result<ReplicatePredictionsResponse, RequestFailure> {
        let retry_strategy = FixedInterval::new(self.retry_interval).take(CREATE_RETRY_ATTEMPTS);

        // Not retried on transport errors: the prediction may already exist.
        RetryIf::start(
            retry_strategy,
            || async { self.create_prediction(model, input, headers).await },
            |e: &RequestFailure| {
                let retry = e.is_retryable_status();
                if retry {
                    tracing::warn!("create_prediction failed, retrying: {}", e);
                }
                retry
            },
        )
        .await
    }

    async fn create_prediction(
        &self,
        model: &ReplicateModelRef,
        input: &Map<String, Value>,
        headers: &header::HeaderMap,
    ) -> Result<ReplicatePredictionsResponse, RequestFailure> {
        let url = model.predictions_url(&self.api_url);
        let request = self
            .client
            .post(url)
            .headers(headers.clone())
            .json(&model.input_spec(input));

        self.send(request).await
    }

    async fn get_prediction_with_retry(
        &self,
        url: &str,
        headers: &header::HeaderMap,
    ) -> Result<ReplicatePredictionsResponse, RequestFailure> {
        let retry_strategy = FixedInterval::new(self.retry_interval).take(CREATE_RETRY_ATTEMPTS);

        RetryIf::start(
            retry_strategy,
            || async {
                self.send(self.client.get(url).headers(headers.clone()))
                    .await
            },
            |e: &RequestFailure| e.is_retryable_read(),
        )
        .await
    }

    async fn await_prediction_completion(
        &self,
        created: ReplicatePredictionsResponse,
        headers: &header::HeaderMap,
    ) -> Result<ReplicatePredictionsResponse, GenerationError> {
        let started = Instant::now();
        let poll_url = created.poll_url(&self.api_url);
        let mut prediction = created;

        loop {
            let status = prediction.status();
            match status {
                Some(ReplicatePredictionStatus::Succeeded) => return Ok(prediction),
                Some(status) if status.is_terminal() => {
                    tracing::error!(id = %prediction.id, "prediction did not succeed: {}", prediction.error_message());
                    return Err(GenerationError::ProviderFailed {
                        detail: prediction.error_message(),
                    });
                }
                _ => {}
            }

            if started.elapsed() >= self.poll_timeout {
                tracing::error!(id = %prediction.id, "prediction ran out of time");
                return Err(GenerationError::ProviderFailed {
                    detail: format!(
                        "timed out after {}s waiting for prediction {}",
                        self.poll_timeout.as_secs(),
                        prediction.id
                    ),
                });
            }

            tracing::debug!(
                id = %prediction.id,
                status = status.map_or("unknown", |status| status.value()),
                "waiting for prediction"
            );
            sleep(self.poll_interval).await;

            prediction = self.get_prediction_with_retry(&poll_url, headers).await?;
        }
    }
}

#[async_trait]
impl ImageProvider for ReplicateClient {
    async fn generate(
        &self,
        model_id: &str,
        payload: &Map<String, Value>,
    ) -> Result<ProviderOutput, GenerationError> {
        let Some(model) = ReplicateModelRef::parse(model_id) else {
            return Err(GenerationError::ProviderFailed {
                detail: format!("unrecognized model id {:?}", model_id),
            });
        };

        let headers = self.headers()?;
        let created = match self.create_prediction_with_retry(&model, payload, &headers).await {
            Ok(created) => created,
            Err(e) => {
                tracing::error!("create_prediction failed: {}", e);
                return Err(e.into());
            }
        };
        tracing::debug!(id = %created.id, model = model_id, "prediction created");

        let prediction = self.await_prediction_completion(created, &headers).await?;

        let Some(output) = prediction.output else {
            return Err(GenerationError::ProviderFailed {
                detail: "Replicate generated no images.".to_string(),
            });
        };

        Ok(provider_output(output))
    }
}
