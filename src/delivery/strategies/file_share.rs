use std::sync::Arc;

use async_trait::async_trait;

use super::{ShareStrategy, SHARE_TITLE};
use crate::{
    delivery::{
        capabilities::{DownloadProxy, ShareTarget, ShareableFile},
        enums::{attempt_outcome::AttemptOutcome, strategy_kind::StrategyKind},
    },
    images::models::generated_image::GeneratedImage,
};

pub struct FileShareStrategy {
    proxy: Arc<dyn DownloadProxy>,
    target: Arc<dyn ShareTarget>,
}

impl FileShareStrategy {
    pub fn new(proxy: Arc<dyn DownloadProxy>, target: Arc<dyn ShareTarget>) -> Self {
        Self { proxy, target }
    }
}

#[async_trait]
impl ShareStrategy for FileShareStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FileShare
    }

    async fn attempt(&self, image: &GeneratedImage, index: usize) -> AttemptOutcome {
        if !self.target.can_share_files() {
            return AttemptOutcome::UnsupportedOrFailed("file sharing unsupported".to_string());
        }

        let file_name = image.file_name(index);
        let data = match self.proxy.fetch(&image.url, &file_name).await {
            Ok(data) if data.is_empty() => {
                return AttemptOutcome::UnsupportedOrFailed("fetched image was empty".to_string())
            }
            Ok(data) => data,
            Err(e) => return AttemptOutcome::UnsupportedOrFailed(e.to_string()),
        };

        let file = ShareableFile {
            file_name,
            mime_type: image.output_format.mime_type().to_string(),
            data,
        };

        match self.target.share_files(vec![file], SHARE_TITLE).await {
            Ok(()) => AttemptOutcome::Success,
            Err(e) => AttemptOutcome::UnsupportedOrFailed(e.to_string()),
        }
    }
}
