pub mod aspect_ratio;
pub mod megapixels;
pub mod model_variant;
pub mod output_format;
