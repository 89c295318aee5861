use async_trait::async_trait;

use super::enums::{attempt_outcome::AttemptOutcome, strategy_kind::StrategyKind};
use crate::images::models::generated_image::GeneratedImage;

pub mod clipboard_copy;
pub mod file_share;
pub mod link_share;

pub const SHARE_TITLE: &str = "AI Generated Image";
pub const SHARE_TEXT: &str = "Check out this AI generated image!";

#[async_trait]
pub trait ShareStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    async fn attempt(&self, image: &GeneratedImage, index: usize) -> AttemptOutcome;
}
