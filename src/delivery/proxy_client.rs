use async_trait::async_trait;
use bytes::Bytes;

use super::{capabilities::DownloadProxy, errors::FetchError};

pub struct HttpDownloadProxy {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDownloadProxy {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl DownloadProxy for HttpDownloadProxy {
    async fn fetch(&self, url: &str, file_name: &str) -> Result<Bytes, FetchError> {
        let res = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url), ("filename", file_name)])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let data = res
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if data.is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(data)
    }
}
