use serde::{Deserialize, Serialize};

use crate::images::enums::output_format::OutputFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    pub output_format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

impl GeneratedImage {
    pub fn file_name(&self, index: usize) -> String {
        format!("generated-image-{}.{}", index + 1, self.output_format.value())
    }
}
