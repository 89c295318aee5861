use serde::Deserialize;
use serde_json::{Map, Value};

use crate::app::util::multipart::{
    models::file_properties::FileProperties, multipart::MultipartForm,
};

#[derive(Debug, Default, Deserialize)]
pub struct RawFields {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(skip)]
    pub attachments: Vec<FileProperties>,
}

impl RawFields {
    pub fn from_form(form: MultipartForm) -> Self {
        let mut fields = Map::new();
        for (name, value) in form.fields {
            fields.insert(name, Value::String(value));
        }

        Self {
            fields,
            attachments: form.files,
        }
    }

    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(value) => Some(value.to_string()),
            Value::Number(value) => Some(value.to_string()),
            Value::Bool(value) => Some(value.to_string()),
            _ => None,
        }
    }

    pub fn non_empty_text(&self, key: &str) -> Option<String> {
        self.text(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        if let Some(Value::Number(number)) = self.fields.get(key) {
            if let Some(value) = number.as_i64() {
                return Some(value);
            }
        }

        let text = self.non_empty_text(key)?;
        if let Ok(value) = text.parse::<i64>() {
            return Some(value);
        }

        let real = text.parse::<f64>().ok().filter(|value| value.is_finite())?;
        if real.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(real.trunc() as i64)
    }

    pub fn real(&self, key: &str) -> Option<f64> {
        let value = match self.fields.get(key)? {
            Value::Number(number) => number.as_f64()?,
            _ => self.non_empty_text(key)?.parse::<f64>().ok()?,
        };

        value.is_finite().then_some(value)
    }

    pub fn flag(&self, key: &str) -> bool {
        match self.fields.get(key) {
            Some(Value::Bool(value)) => *value,
            Some(Value::Number(number)) => number.as_f64().map_or(false, |value| value != 0.0),
            Some(Value::String(value)) => matches!(
                value.trim().to_lowercase().as_str(),
                "on" | "true" | "1" | "yes"
            ),
            _ => false,
        }
    }

    pub fn attachment(&self, key: &str) -> Option<&FileProperties> {
        self.attachments.iter().find(|file| file.field_name == key)
    }
}
