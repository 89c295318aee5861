use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use regex::Regex;
use reqwest::Url;

use crate::{
    app::{models::api_error::ApiError, util::reqwest::get_bytes},
    images::enums::output_format::OutputFormat,
    AppState,
};

use super::{dtos::download_query_dto::DownloadQueryDto, errors::DownloadsApiError};

lazy_static! {
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r#"[/\\"\x00-\x1f\x7f]"#).unwrap();
}

const FALLBACK_FILENAME: &str = "download";

pub async fn download(dto: &DownloadQueryDto, state: &AppState) -> Result<Response, ApiError> {
    let allowed_hosts = state.envy.allowed_download_hosts();
    check_url(&dto.url, &allowed_hosts)?;

    let filename = sanitize_filename(&dto.filename);
    let fetched = get_bytes(
        &state.download_http,
        &dto.url,
        state.max_upload_bytes(),
        |url| check_target(url, &allowed_hosts),
    )
    .await?;
    let content_type = content_type_for(&filename, fetched.content_type.as_deref());

    tracing::debug!(
        url = %dto.url,
        filename = %filename,
        bytes = fetched.data.len(),
        "relaying download"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        fetched.data,
    )
        .into_response())
}

fn check_url(raw: &str, allowed_hosts: &[String]) -> Result<(), ApiError> {
    let Ok(url) = Url::parse(raw) else {
        return Err(DownloadsApiError::UnsupportedScheme.value());
    };

    check_target(&url, allowed_hosts)
}

fn check_target(url: &Url, allowed_hosts: &[String]) -> Result<(), ApiError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(DownloadsApiError::UnsupportedScheme.value());
    }

    if allowed_hosts.is_empty() {
        return Ok(());
    }

    let host = url.host_str().unwrap_or_default().to_lowercase();
    let allowed = allowed_hosts
        .iter()
        .any(|allowed| host == *allowed || host.ends_with(&format!(".{}", allowed)));

    if !allowed {
        tracing::warn!(host = %host, "download host not allowed");
        return Err(DownloadsApiError::HostNotAllowed.value());
    }

    Ok(())
}

pub fn sanitize_filename(raw: &str) -> String {
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(raw.trim(), "_");
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }
    cleaned.to_string()
}

pub fn content_type_for(filename: &str, upstream: Option<&str>) -> String {
    if let Some(upstream) = upstream {
        let upstream = upstream.trim();
        if !upstream.is_empty() && !upstream.starts_with(mime::APPLICATION_OCTET_STREAM.essence_str()) {
            return upstream.to_string();
        }
    }

    filename
        .rsplit_once('.')
        .and_then(|(_, extension)| OutputFormat::parse(extension))
        .map(|format| format.mime_type().to_string())
        .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, response::Redirect, routing::get, Router};

    use super::*;
    use crate::{
        app::env::Envy,
        test_support::{spawn_server, UnusedProvider},
    };

    fn state(allowed_hosts: Option<&str>, max_upload_bytes: Option<usize>) -> AppState {
        let envy = Envy {
            app_env: "test".to_string(),
            port: None,
            replicate_api_key: "key".to_string(),
            replicate_api_url: None,
            replicate_poll_timeout_secs: None,
            default_model_id: None,
            download_allowed_hosts: allowed_hosts.map(str::to_string),
            max_upload_bytes,
        };
        AppState::new(envy, Arc::new(UnusedProvider)).unwrap()
    }

    fn dto(url: String) -> DownloadQueryDto {
        DownloadQueryDto {
            url,
            filename: "generated-image-1.png".to_string(),
        }
    }

    async fn body(res: Response) -> Vec<u8> {
        hyper::body::to_bytes(res.into_body()).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn redirect_to_disallowed_host_is_forbidden() {
        let internal = spawn_server(
            Router::new().route("/secret", get(|| async { "internal-secret" })),
        )
        .await;
        let target = format!("{}/secret", internal.replace("127.0.0.1", "localhost"));
        let upstream = spawn_server(Router::new().route(
            "/img.png",
            get(move || async move { Redirect::temporary(&target) }),
        ))
        .await;

        let err = download(&dto(format!("{}/img.png", upstream)), &state(Some("127.0.0.1"), None))
            .await
            .unwrap_err();

        assert_eq!(err.code, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn redirect_within_allowed_hosts_is_followed() {
        let upstream = spawn_server(
            Router::new()
                .route("/hop", get(|| async { Redirect::temporary("/img.png") }))
                .route("/img.png", get(|| async { "png-bytes" })),
        )
        .await;

        let res = download(&dto(format!("{}/hop", upstream)), &state(Some("127.0.0.1"), None))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body(res).await, b"png-bytes");
    }

    #[tokio::test]
    async fn redirect_loops_are_cut_off() {
        let upstream = spawn_server(
            Router::new().route("/loop", get(|| async { Redirect::temporary("/loop") })),
        )
        .await;

        let err = download(&dto(format!("{}/loop", upstream)), &state(None, None))
            .await
            .unwrap_err();

        assert_eq!(err.code, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn oversized_upstream_body_is_rejected() {
        let upstream = spawn_server(
            Router::new().route("/big.png", get(|| async { "x".repeat(64) })),
        )
        .await;

        let err = download(&dto(format!("{}/big.png", upstream)), &state(None, Some(16)))
            .await
            .unwrap_err();

        assert_eq!(err.code, StatusCode::BAD_GATEWAY);
        assert_eq!(err.message, "Upstream body is too large.");
    }

    #[test]
    fn filenames_lose_path_and_header_breaking_characters() {
        assert_eq!(sanitize_filename("generated-image-1.webp"), "generated-image-1.webp");
        assert_eq!(sanitize_filename("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_filename("a\"b\r\n.png"), "a_b__.png");
        assert_eq!(sanitize_filename("  "), "download");
        assert_eq!(sanitize_filename("..."), "download");
    }

    #[test]
    fn content_type_prefers_upstream_then_extension() {
        assert_eq!(content_type_for("x.png", Some("image/webp")), "image/webp");
        assert_eq!(content_type_for("x.png", Some("application/octet-stream")), "image/png");
        assert_eq!(content_type_for("x.jpg", None), "image/jpeg");
        assert_eq!(content_type_for("x.webp", Some("")), "image/webp");
        assert_eq!(content_type_for("x", None), "application/octet-stream");
    }

    #[test]
    fn only_http_urls_are_relayed() {
        assert!(check_url("https://replicate.delivery/a.png", &[]).is_ok());
        assert!(check_url("http://localhost:3000/a.png", &[]).is_ok());

        let err = check_url("file:///etc/passwd", &[]).unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn allow_list_matches_hosts_and_subdomains() {
        let allowed = vec!["replicate.delivery".to_string()];
        assert!(check_url("https://replicate.delivery/a.png", &allowed).is_ok());
        assert!(check_url("https://pbxt.replicate.delivery/a.png", &allowed).is_ok());

        let err = check_url("https://evilreplicate.delivery/a.png", &allowed).unwrap_err();
        assert_eq!(err.code, StatusCode::FORBIDDEN);
        let err = check_url("http://169.254.169.254/latest", &allowed).unwrap_err();
        assert_eq!(err.code, StatusCode::FORBIDDEN);
    }
}
