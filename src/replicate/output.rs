use serde_json::Value;

use crate::images::normalizer::{OutputLocation, ProviderOutput};

#[derive(Debug, Clone)]
pub struct ReplicateFileOutput {
    raw: Value,
}

impl ReplicateFileOutput {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }
}

impl OutputLocation for ReplicateFileOutput {
    fn resolve_location(&self) -> Result<String, String> {
        let Value::String(raw) = &self.raw else {
            return Err(format!("expected a file URL, got {}", self.raw));
        };

        let url = reqwest::Url::parse(raw).map_err(|e| format!("invalid file URL {:?}: {}", raw, e))?;
        match url.scheme() {
            "http" | "https" | "data" => Ok(raw.to_string()),
            scheme => Err(format!("unsupported file URL scheme {:?}", scheme)),
        }
    }
}

pub fn provider_output(output: Value) -> ProviderOutput {
    match output {
        Value::Array(items) => ProviderOutput::Many(
            items
                .into_iter()
                .map(|raw| Box::new(ReplicateFileOutput::new(raw)) as Box<dyn OutputLocation>)
                .collect(),
        ),
        other => ProviderOutput::Single(Box::new(ReplicateFileOutput::new(other))),
    }
}
