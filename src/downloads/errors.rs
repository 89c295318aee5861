use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum DownloadsApiError {
    UnsupportedScheme,
    HostNotAllowed,
}

impl DownloadsApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::UnsupportedScheme => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Only http and https URLs can be downloaded.".to_string(),
            },
            Self::HostNotAllowed => ApiError {
                code: StatusCode::FORBIDDEN,
                message: "Downloads from this host are not allowed.".to_string(),
            },
        }
    }
}
