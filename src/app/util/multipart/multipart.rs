use axum::{extract::Multipart, http::StatusCode};

use crate::app::models::api_error::ApiError;

use super::models::file_properties::FileProperties;

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FileProperties>,
}

pub async fn get_form(mut multipart: Multipart) -> Result<MultipartForm, ApiError> {
    let mut form = MultipartForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(%e, "failed reading multipart field");
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: "Malformed form submission.".to_string(),
                });
            }
        };

        let field_name = field.name().unwrap_or("file").to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            let Ok(text) = field.text().await else {
                continue;
            };
            form.fields.push((field_name, text));
            continue;
        };

        let mime_type = field
            .content_type()
            .and_then(|content_type| content_type.parse().ok())
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        let Ok(data) = field.bytes().await else {
            continue;
        };
        if data.is_empty() {
            continue;
        }

        form.files.push(FileProperties {
            field_name,
            file_name,
            mime_type,
            data,
        });
    }

    Ok(form)
}
