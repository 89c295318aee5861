use std::{path::PathBuf, sync::Arc, time::Duration};

use super::pipeline::DeliveryPipeline;
use crate::images::{errors::GenerationError, models::generated_image::GeneratedImage};

pub const DOWNLOAD_PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct BatchItem {
    pub index: usize,
    pub result: Result<PathBuf, GenerationError>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn saved(&self) -> impl Iterator<Item = &PathBuf> {
        self.items.iter().filter_map(|item| item.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (usize, &GenerationError)> {
        self.items
            .iter()
            .filter_map(|item| item.result.as_ref().err().map(|e| (item.index, e)))
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

pub struct BatchOrchestrator {
    pipeline: Arc<DeliveryPipeline>,
    pause: Duration,
}

impl BatchOrchestrator {
    pub fn new(pipeline: Arc<DeliveryPipeline>) -> Self {
        Self {
            pipeline,
            pause: DOWNLOAD_PAUSE,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub async fn download_all(&self, images: &[GeneratedImage]) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, image) in images.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.pause).await;
            }

            let result = self.pipeline.download(image, index).await;
            if let Err(e) = &result {
                tracing::warn!(index, "batch download failed: {}", e);
            }
            report.items.push(BatchItem { index, result });
        }

        tracing::debug!(
            total = images.len(),
            failed = report.failures().count(),
            "batch download finished"
        );
        report
    }
}
