use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Prompt is required.")]
    EmptyPrompt,
    #[error("A model id is required when the custom model is selected.")]
    MissingCustomModelId,
}

impl ValidationError {
    pub fn value(&self) -> ApiError {
        ApiError {
            code: StatusCode::BAD_REQUEST,
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Failed to resolve generated output at index {index}.")]
    OutputResolutionFailed { index: usize },
    #[error("Failed to download image: {detail}")]
    DownloadFailed { detail: String },
    #[error("Image generation failed: {detail}")]
    ProviderFailed { detail: String },
}

impl GenerationError {
    pub fn value(&self) -> ApiError {
        ApiError {
            code: StatusCode::BAD_GATEWAY,
            message: self.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ImagesApiError {
    GenerationInProgress,
}

impl ImagesApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::GenerationInProgress => ApiError {
                code: StatusCode::CONFLICT,
                message: "A generation is already in progress.".to_string(),
            },
        }
    }
}
