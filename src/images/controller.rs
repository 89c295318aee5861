use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};

use crate::{
    app::{
        models::{api_error::ApiError, json_body::JsonBody},
        util::multipart::multipart::get_form,
    },
    AppState,
};

use super::{
    dtos::raw_fields::RawFields, gate::DEFAULT_SESSION, models::generated_image::GeneratedImage,
    service,
};

pub const SESSION_HEADER: &str = "x-session-id";

fn session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_SESSION)
        .to_string()
}

pub async fn generate_images(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(raw): JsonBody<RawFields>,
) -> Result<Json<Vec<GeneratedImage>>, ApiError> {
    match service::generate_images(&raw, &session_id(&headers), &state).await {
        Ok(images) => Ok(Json(images)),
        Err(e) => Err(e),
    }
}

pub async fn generate_images_from_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<Vec<GeneratedImage>>, ApiError> {
    let raw = RawFields::from_form(get_form(multipart).await?);

    match service::generate_images(&raw, &session_id(&headers), &state).await {
        Ok(images) => Ok(Json(images)),
        Err(e) => Err(e),
    }
}
