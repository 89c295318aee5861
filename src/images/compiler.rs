use super::{
    dtos::raw_fields::RawFields,
    enums::{
        aspect_ratio::{AspectRatio, CustomDimensions, CUSTOM_ASPECT_RATIO, DIMENSION_DEFAULT},
        megapixels::Megapixels,
        model_variant::ModelVariant,
        output_format::OutputFormat,
    },
    errors::ValidationError,
    models::parameter_set::{ImageLocator, ParameterSet},
};

pub const CUSTOM_MODEL_OPTION: &str = "custom";

const DEFAULT_NUM_OUTPUTS: i64 = 1;
const MAX_NUM_OUTPUTS: i64 = 4;
const DEFAULT_OUTPUT_QUALITY: i64 = 80;
const DEFAULT_GUIDANCE_SCALE: f64 = 3.0;
const MAX_GUIDANCE_SCALE: f64 = 10.0;
const DEFAULT_PROMPT_STRENGTH: f64 = 0.8;
const DEFAULT_LORA_SCALE: f64 = 1.0;
const MIN_LORA_SCALE: f64 = -1.0;
const MAX_LORA_SCALE: f64 = 3.0;

/// Builds a validated parameter set from raw form fields.
///
/// Only the prompt and the custom model override can fail; every other field
/// falls back to its default when it is missing or unparseable, then is
/// clamped into range.
pub fn compile(raw: &RawFields, default_model_id: &str) -> Result<ParameterSet, ValidationError> {
    let prompt = raw
        .non_empty_text("prompt")
        .ok_or(ValidationError::EmptyPrompt)?;
    let provider_model_id = resolve_provider_model_id(raw, default_model_id)?;

    let model_variant = raw
        .text("model")
        .and_then(|value| ModelVariant::parse(&value))
        .unwrap_or_default();

    let inference_steps = raw
        .integer("num_inference_steps")
        .unwrap_or(model_variant.default_inference_steps() as i64)
        .clamp(1, model_variant.max_inference_steps() as i64) as u32;

    Ok(ParameterSet {
        prompt,
        model_variant,
        aspect_ratio: parse_aspect_ratio(raw),
        num_outputs: raw
            .integer("num_outputs")
            .unwrap_or(DEFAULT_NUM_OUTPUTS)
            .clamp(1, MAX_NUM_OUTPUTS) as u8,
        output_format: raw
            .text("output_format")
            .and_then(|value| OutputFormat::parse(&value))
            .unwrap_or_default(),
        output_quality: raw
            .integer("output_quality")
            .unwrap_or(DEFAULT_OUTPUT_QUALITY)
            .clamp(0, 100) as u8,
        megapixels: raw
            .text("megapixels")
            .and_then(|value| Megapixels::parse(&value))
            .unwrap_or_default(),
        guidance_scale: raw
            .real("guidance_scale")
            .unwrap_or(DEFAULT_GUIDANCE_SCALE)
            .clamp(0.0, MAX_GUIDANCE_SCALE),
        inference_steps,
        seed: raw.integer("seed").filter(|seed| *seed != 0),
        go_fast: raw.flag("go_fast"),
        disable_safety_checker: raw.flag("disable_safety_checker"),
        source_image: image_locator(raw, "image"),
        mask: image_locator(raw, "mask"),
        prompt_strength: raw
            .real("prompt_strength")
            .unwrap_or(DEFAULT_PROMPT_STRENGTH)
            .clamp(0.0, 1.0),
        extra_lora: raw.non_empty_text("extra_lora"),
        lora_scale: lora_scale(raw, "lora_scale"),
        extra_lora_scale: lora_scale(raw, "extra_lora_scale"),
        provider_model_id,
    })
}

fn resolve_provider_model_id(
    raw: &RawFields,
    default_model_id: &str,
) -> Result<String, ValidationError> {
    match raw.non_empty_text("replicate_model_id") {
        Some(selected) if selected == CUSTOM_MODEL_OPTION => raw
            .non_empty_text("custom_model_id")
            .ok_or(ValidationError::MissingCustomModelId),
        Some(selected) => Ok(selected),
        None => Ok(default_model_id.to_string()),
    }
}

fn parse_aspect_ratio(raw: &RawFields) -> AspectRatio {
    let Some(value) = raw.text("aspect_ratio") else {
        return AspectRatio::default();
    };

    if value.trim() == CUSTOM_ASPECT_RATIO {
        let width = raw.integer("width").unwrap_or(DIMENSION_DEFAULT as i64);
        let height = raw.integer("height").unwrap_or(DIMENSION_DEFAULT as i64);
        return AspectRatio::Custom(CustomDimensions::new(width, height));
    }

    AspectRatio::parse_fixed(&value).unwrap_or_default()
}

// An uploaded image wins over URL text in the same field.
fn image_locator(raw: &RawFields, key: &str) -> Option<ImageLocator> {
    if let Some(file) = raw.attachment(key).filter(|file| file.is_image()) {
        return Some(ImageLocator::Inline {
            mime_type: file.mime_type.clone(),
            data: file.data.clone(),
        });
    }

    raw.non_empty_text(key).map(ImageLocator::Url)
}

fn lora_scale(raw: &RawFields, key: &str) -> f64 {
    raw.real(key)
        .unwrap_or(DEFAULT_LORA_SCALE)
        .clamp(MIN_LORA_SCALE, MAX_LORA_SCALE)
}
