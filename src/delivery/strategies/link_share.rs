use std::sync::Arc;

use async_trait::async_trait;

use super::{ShareStrategy, SHARE_TEXT, SHARE_TITLE};
use crate::{
    delivery::{
        capabilities::{ShareTarget, SharedLink},
        enums::{attempt_outcome::AttemptOutcome, strategy_kind::StrategyKind},
        errors::ShareError,
    },
    images::models::generated_image::GeneratedImage,
};

pub struct LinkShareStrategy {
    target: Arc<dyn ShareTarget>,
}

impl LinkShareStrategy {
    pub fn new(target: Arc<dyn ShareTarget>) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ShareStrategy for LinkShareStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LinkShare
    }

    async fn attempt(&self, image: &GeneratedImage, _index: usize) -> AttemptOutcome {
        if !self.target.can_share_links() {
            return AttemptOutcome::UnsupportedOrFailed("link sharing unsupported".to_string());
        }

        let link = SharedLink {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
            url: image.url.clone(),
        };

        match self.target.share_link(&link).await {
            Ok(()) => AttemptOutcome::Success,
            Err(ShareError::Cancelled) => AttemptOutcome::Cancelled,
            Err(e) => AttemptOutcome::UnsupportedOrFailed(e.to_string()),
        }
    }
}
