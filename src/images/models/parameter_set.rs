use bytes::Bytes;
use mime::Mime;

use crate::images::enums::{
    aspect_ratio::AspectRatio, megapixels::Megapixels, model_variant::ModelVariant,
    output_format::OutputFormat,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ImageLocator {
    Url(String),
    Inline { mime_type: Mime, data: Bytes },
}

impl ImageLocator {
    pub fn to_input(&self) -> String {
        match self {
            Self::Url(url) => url.to_string(),
            Self::Inline { mime_type, data } => {
                format!("data:{};base64,{}", mime_type, base64::encode(data))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    pub prompt: String,
    pub model_variant: ModelVariant,
    pub aspect_ratio: AspectRatio,
    pub num_outputs: u8,
    pub output_format: OutputFormat,
    pub output_quality: u8,
    pub megapixels: Megapixels,
    pub guidance_scale: f64,
    pub inference_steps: u32,
    pub seed: Option<i64>,
    pub go_fast: bool,
    pub disable_safety_checker: bool,
    pub source_image: Option<ImageLocator>,
    pub mask: Option<ImageLocator>,
    pub prompt_strength: f64,
    pub extra_lora: Option<String>,
    pub lora_scale: f64,
    pub extra_lora_scale: f64,
    pub provider_model_id: String,
}
