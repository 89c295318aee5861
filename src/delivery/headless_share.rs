use async_trait::async_trait;

use super::{
    capabilities::{ShareTarget, ShareableFile, SharedLink},
    errors::ShareError,
};

pub struct HeadlessShareTarget;

#[async_trait]
impl ShareTarget for HeadlessShareTarget {
    fn can_share_files(&self) -> bool {
        false
    }

    fn can_share_links(&self) -> bool {
        false
    }

    async fn share_files(&self, _files: Vec<ShareableFile>, _title: &str) -> Result<(), ShareError> {
        Err(ShareError::Failed("no share sheet available".to_string()))
    }

    async fn share_link(&self, _link: &SharedLink) -> Result<(), ShareError> {
        Err(ShareError::Failed("no share sheet available".to_string()))
    }
}
