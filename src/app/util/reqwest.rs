use bytes::{Bytes, BytesMut};
use reqwest::{
    header::{CONTENT_TYPE, LOCATION},
    redirect::Policy,
    StatusCode, Url,
};

use crate::app::models::api_error::ApiError;

pub const MAX_REDIRECTS: usize = 5;

#[derive(Debug)]
pub struct FetchedBytes {
    pub content_type: Option<String>,
    pub data: Bytes,
}

pub fn no_redirect_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().redirect(Policy::none()).build()
}

fn bad_gateway(message: &str) -> ApiError {
    ApiError {
        code: StatusCode::BAD_GATEWAY,
        message: message.to_string(),
    }
}

/// Fetches `url` and returns its body.
///
/// `check_hop` runs on the first URL and on every redirect target before it is
/// requested. Non-success statuses, empty bodies and bodies over `max_bytes`
/// are errors.
pub async fn get_bytes<F>(
    client: &reqwest::Client,
    url: &str,
    max_bytes: usize,
    check_hop: F,
) -> Result<FetchedBytes, ApiError>
where
    F: Fn(&Url) -> Result<(), ApiError>,
{
    let Ok(mut current) = Url::parse(url) else {
        return Err(bad_gateway("Invalid url."));
    };
    let mut redirects = 0;

    let mut res = loop {
        check_hop(&current)?;

        let res = match client.get(current.clone()).send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::error!(%e, url = %current, "failed to get url response");
                return Err(bad_gateway("Failed to get url response."));
            }
        };

        if !res.status().is_redirection() {
            break res;
        }
        if redirects == MAX_REDIRECTS {
            tracing::warn!(url, "too many redirects");
            return Err(bad_gateway("Upstream redirected too many times."));
        }

        let Some(next) = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|location| current.join(location).ok())
        else {
            return Err(bad_gateway("Upstream sent an invalid redirect."));
        };
        tracing::debug!(from = %current, to = %next, "following redirect");
        redirects += 1;
        current = next;
    };

    let status = res.status();
    if !status.is_success() {
        tracing::warn!(%status, url = %current, "upstream returned non-success status");
        return Err(bad_gateway(&format!(
            "Upstream responded with {}.",
            status.as_u16()
        )));
    }

    if res.content_length().map_or(false, |len| len > max_bytes as u64) {
        tracing::warn!(url = %current, max_bytes, "upstream body too large");
        return Err(bad_gateway("Upstream body is too large."));
    }

    let content_type = res
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let mut data = BytesMut::new();
    loop {
        let chunk = match res.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(%e, url = %current, "failed to get bytes from response");
                return Err(bad_gateway("Failed to get bytes from response."));
            }
        };

        if data.len() + chunk.len() > max_bytes {
            tracing::warn!(url = %current, max_bytes, "upstream body too large");
            return Err(bad_gateway("Upstream body is too large."));
        }
        data.extend_from_slice(&chunk);
    }

    if data.is_empty() {
        return Err(bad_gateway("Upstream returned an empty body."));
    }

    Ok(FetchedBytes {
        content_type,
        data: data.freeze(),
    })
}
