use std::sync::Arc;

use async_trait::async_trait;

use super::ShareStrategy;
use crate::{
    delivery::{
        capabilities::ClipboardWriter,
        enums::{attempt_outcome::AttemptOutcome, strategy_kind::StrategyKind},
    },
    images::models::generated_image::GeneratedImage,
};

pub struct ClipboardCopyStrategy {
    clipboard: Arc<dyn ClipboardWriter>,
}

impl ClipboardCopyStrategy {
    pub fn new(clipboard: Arc<dyn ClipboardWriter>) -> Self {
        Self { clipboard }
    }
}

#[async_trait]
impl ShareStrategy for ClipboardCopyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Clipboard
    }

    async fn attempt(&self, image: &GeneratedImage, _index: usize) -> AttemptOutcome {
        match self.clipboard.write_text(&image.url).await {
            Ok(()) => AttemptOutcome::Success,
            Err(e) => AttemptOutcome::UnsupportedOrFailed(e),
        }
    }
}
