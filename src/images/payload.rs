use serde_json::{json, Map, Value};

use super::models::parameter_set::ParameterSet;

pub struct ConditionalField {
    pub key: &'static str,
    pub include: fn(&ParameterSet) -> bool,
    pub value: fn(&ParameterSet) -> Value,
}

pub static CONDITIONAL_FIELDS: [ConditionalField; 8] = [
    ConditionalField {
        key: "width",
        include: |params| params.aspect_ratio.is_custom(),
        value: |params| {
            params
                .aspect_ratio
                .custom_dimensions()
                .map_or(Value::Null, |dimensions| json!(dimensions.width()))
        },
    },
    ConditionalField {
        key: "height",
        include: |params| params.aspect_ratio.is_custom(),
        value: |params| {
            params
                .aspect_ratio
                .custom_dimensions()
                .map_or(Value::Null, |dimensions| json!(dimensions.height()))
        },
    },
    ConditionalField {
        key: "seed",
        include: |params| params.seed.is_some(),
        value: |params| json!(params.seed),
    },
    ConditionalField {
        key: "go_fast",
        include: |params| params.go_fast,
        value: |_| Value::Bool(true),
    },
    ConditionalField {
        key: "disable_safety_checker",
        include: |params| params.disable_safety_checker,
        value: |_| Value::Bool(true),
    },
    ConditionalField {
        key: "image",
        include: |params| params.source_image.is_some(),
        value: |params| {
            params
                .source_image
                .as_ref()
                .map_or(Value::Null, |image| Value::String(image.to_input()))
        },
    },
    ConditionalField {
        key: "mask",
        include: |params| params.mask.is_some(),
        value: |params| {
            params
                .mask
                .as_ref()
                .map_or(Value::Null, |mask| Value::String(mask.to_input()))
        },
    },
    ConditionalField {
        key: "extra_lora",
        include: |params| params.extra_lora.is_some(),
        value: |params| json!(params.extra_lora),
    },
];

pub fn to_payload(params: &ParameterSet) -> Map<String, Value> {
    let mut payload = Map::new();

    payload.insert("prompt".to_string(), json!(params.prompt));
    payload.insert("model".to_string(), json!(params.model_variant.value()));
    payload.insert("aspect_ratio".to_string(), json!(params.aspect_ratio.value()));
    payload.insert("output_format".to_string(), json!(params.output_format.value()));
    payload.insert("num_outputs".to_string(), json!(params.num_outputs));
    payload.insert("megapixels".to_string(), json!(params.megapixels.value()));
    payload.insert("output_quality".to_string(), json!(params.output_quality));
    payload.insert("guidance_scale".to_string(), json!(params.guidance_scale));
    payload.insert("num_inference_steps".to_string(), json!(params.inference_steps));
    payload.insert("prompt_strength".to_string(), json!(params.prompt_strength));
    payload.insert("lora_scale".to_string(), json!(params.lora_scale));
    payload.insert("extra_lora_scale".to_string(), json!(params.extra_lora_scale));

    for field in CONDITIONAL_FIELDS.iter() {
        if (field.include)(params) {
            payload.insert(field.key.to_string(), (field.value)(params));
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::images::{
        enums::{
            aspect_ratio::{AspectRatio, CustomDimensions},
            megapixels::Megapixels,
            model_variant::ModelVariant,
            output_format::OutputFormat,
        },
        models::parameter_set::ImageLocator,
    };

    fn base_params() -> ParameterSet {
        ParameterSet {
            prompt: "a lighthouse at dusk".to_string(),
            model_variant: ModelVariant::Dev,
            aspect_ratio: AspectRatio::default(),
            num_outputs: 1,
            output_format: OutputFormat::Webp,
            output_quality: 80,
            megapixels: Megapixels::One,
            guidance_scale: 3.0,
            inference_steps: 28,
            seed: None,
            go_fast: false,
            disable_safety_checker: false,
            source_image: None,
            mask: None,
            prompt_strength: 0.8,
            extra_lora: None,
            lora_scale: 1.0,
            extra_lora_scale: 1.0,
            provider_model_id: "owner/model".to_string(),
        }
    }

    fn field(key: &str) -> &'static ConditionalField {
        CONDITIONAL_FIELDS
            .iter()
            .find(|field| field.key == key)
            .unwrap()
    }

    #[test]
    fn defaults_send_only_the_unconditional_keys() {
        let payload = to_payload(&base_params());

        let mut keys = payload.keys().cloned().collect::<Vec<String>>();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "aspect_ratio",
                "extra_lora_scale",
                "guidance_scale",
                "lora_scale",
                "megapixels",
                "model",
                "num_inference_steps",
                "num_outputs",
                "output_format",
                "output_quality",
                "prompt",
                "prompt_strength",
            ]
        );
        assert_eq!(payload["megapixels"], json!("1"));
        assert_eq!(payload["aspect_ratio"], json!("1:1"));
    }

    #[test]
    fn dimension_entries_follow_the_custom_ratio() {
        let mut params = base_params();
        assert!(!(field("width").include)(&params));
        assert!(!(field("height").include)(&params));

        params.aspect_ratio = AspectRatio::Custom(CustomDimensions::new(768, 1344));
        assert!((field("width").include)(&params));
        assert_eq!((field("width").value)(&params), json!(768));
        assert_eq!((field("height").value)(&params), json!(1344));
    }

    #[test]
    fn seed_entry_requires_a_value() {
        let mut params = base_params();
        assert!(!(field("seed").include)(&params));

        params.seed = Some(42);
        assert!((field("seed").include)(&params));
        assert_eq!((field("seed").value)(&params), json!(42));
    }

    #[test]
    fn switches_are_sent_only_when_on() {
        let mut params = base_params();
        let payload = to_payload(&params);
        assert!(!payload.contains_key("go_fast"));
        assert!(!payload.contains_key("disable_safety_checker"));

        params.go_fast = true;
        params.disable_safety_checker = true;
        let payload = to_payload(&params);
        assert_eq!(payload["go_fast"], json!(true));
        assert_eq!(payload["disable_safety_checker"], json!(true));
    }

    #[test]
    fn image_inputs_pass_through_urls_and_encode_uploads() {
        let mut params = base_params();
        params.source_image = Some(ImageLocator::Url("https://example.com/in.png".to_string()));
        params.mask = Some(ImageLocator::Inline {
            mime_type: mime::IMAGE_PNG,
            data: Bytes::from_static(b"png"),
        });
        params.extra_lora = Some("fofr/flux-pixar-cars".to_string());

        let payload = to_payload(&params);
        assert_eq!(payload["image"], json!("https://example.com/in.png"));
        assert_eq!(payload["mask"], json!("data:image/png;base64,cG5n"));
        assert_eq!(payload["extra_lora"], json!("fofr/flux-pixar-cars"));
    }
}
