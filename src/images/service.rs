use crate::{app::models::api_error::ApiError, AppState};

use super::{
    compiler, dtos::raw_fields::RawFields, errors::ImagesApiError,
    models::generated_image::GeneratedImage, normalizer, payload,
};

pub async fn generate_images(
    raw: &RawFields,
    session_id: &str,
    state: &AppState,
) -> Result<Vec<GeneratedImage>, ApiError> {
    let params = match compiler::compile(raw, state.default_model_id()) {
        Ok(params) => params,
        Err(e) => {
            tracing::debug!("rejected submission: {}", e);
            return Err(e.value());
        }
    };

    let Some(_permit) = state.gate.try_acquire(session_id) else {
        tracing::debug!(session_id, "ignoring submission while a generation is pending");
        return Err(ImagesApiError::GenerationInProgress.value());
    };

    let input = payload::to_payload(&params);
    tracing::debug!(
        model = %params.provider_model_id,
        num_outputs = params.num_outputs,
        "submitting generation"
    );

    let output = match state.provider.generate(&params.provider_model_id, &input).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("generate_images failed: {}", e);
            return Err(e.value());
        }
    };

    match normalizer::normalize(output, &params) {
        Ok(images) => Ok(images),
        Err(e) => Err(e.value()),
    }
}
