use std::{path::PathBuf, sync::Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use super::{
    capabilities::{ClipboardWriter, DownloadProxy, ImageStore, ShareTarget, ShareableFile, SharedLink},
    errors::{FetchError, ShareError},
};
use crate::images::{enums::output_format::OutputFormat, models::generated_image::GeneratedImage};

pub fn sample_image() -> GeneratedImage {
    image_at("https://cdn.example.com/out-0.webp")
}

pub fn image_at(url: &str) -> GeneratedImage {
    GeneratedImage {
        url: url.to_string(),
        output_format: OutputFormat::Webp,
        width: 1024,
        height: 1024,
    }
}

pub struct FakeEnvironment {
    pub files_supported: bool,
    pub links_supported: bool,
    pub fetch_result: Result<Bytes, FetchError>,
    pub failing_urls: Vec<String>,
    pub file_share_result: Result<(), ShareError>,
    pub link_share_result: Result<(), ShareError>,
    pub clipboard_result: Result<(), String>,
    pub store_fails: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeEnvironment {
    pub fn new() -> Self {
        Self {
            files_supported: true,
            links_supported: true,
            fetch_result: Ok(Bytes::from_static(b"image-bytes")),
            failing_urls: Vec::new(),
            file_share_result: Ok(()),
            link_share_result: Ok(()),
            clipboard_result: Ok(()),
            store_fails: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DownloadProxy for FakeEnvironment {
    async fn fetch(&self, url: &str, file_name: &str) -> Result<Bytes, FetchError> {
        self.record(format!("fetch {} {}", url, file_name));
        if self.failing_urls.iter().any(|failing| failing == url) {
            return Err(FetchError::Status(502));
        }
        self.fetch_result.clone()
    }
}

#[async_trait]
impl ShareTarget for FakeEnvironment {
    fn can_share_files(&self) -> bool {
        self.files_supported
    }

    fn can_share_links(&self) -> bool {
        self.links_supported
    }

    async fn share_files(&self, files: Vec<ShareableFile>, _title: &str) -> Result<(), ShareError> {
        for file in &files {
            self.record(format!("share_files {} {}", file.file_name, file.mime_type));
        }
        self.file_share_result.clone()
    }

    async fn share_link(&self, link: &SharedLink) -> Result<(), ShareError> {
        self.record(format!("share_link {}", link.url));
        self.link_share_result.clone()
    }
}

#[async_trait]
impl ClipboardWriter for FakeEnvironment {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        self.record(format!("write_text {}", text));
        self.clipboard_result.clone()
    }
}

#[async_trait]
impl ImageStore for FakeEnvironment {
    async fn save(&self, file_name: &str, data: Bytes) -> std::io::Result<PathBuf> {
        self.record(format!("save {} {}", file_name, data.len()));
        if self.store_fails {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        }
        Ok(PathBuf::from(file_name))
    }
}
