use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
};
use validator::Validate;

use crate::{app::models::api_error::ApiError, AppState};

use super::{dtos::download_query_dto::DownloadQueryDto, service};

pub async fn download(
    State(state): State<AppState>,
    Query(dto): Query<DownloadQueryDto>,
) -> Result<Response, ApiError> {
    if let Err(e) = dto.validate() {
        return Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        });
    }

    service::download(&dto, &state).await
}
