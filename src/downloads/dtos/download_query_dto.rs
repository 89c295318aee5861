use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DownloadQueryDto {
    #[validate(url(message = "url must be a valid URL."))]
    pub url: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "filename must be between 1 and 255 characters."
    ))]
    pub filename: String,
}
