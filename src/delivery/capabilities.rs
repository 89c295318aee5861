use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;

use super::errors::{FetchError, ShareError};

/// A file handed to the native share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareableFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

/// A URL handed to the native share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLink {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Fetches image bytes through the download-proxy endpoint.
#[async_trait]
pub trait DownloadProxy: Send + Sync {
    async fn fetch(&self, url: &str, file_name: &str) -> Result<Bytes, FetchError>;
}

/// The environment's native share sheet. Support must be checked before use.
#[async_trait]
pub trait ShareTarget: Send + Sync {
    fn can_share_files(&self) -> bool;

    fn can_share_links(&self) -> bool;

    async fn share_files(&self, files: Vec<ShareableFile>, title: &str) -> Result<(), ShareError>;

    async fn share_link(&self, link: &SharedLink) -> Result<(), ShareError>;
}

#[async_trait]
pub trait ClipboardWriter: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), String>;
}

/// Local persistence for downloaded images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Saves `data` under `file_name` and returns where it landed.
    async fn save(&self, file_name: &str, data: Bytes) -> std::io::Result<PathBuf>;
}
