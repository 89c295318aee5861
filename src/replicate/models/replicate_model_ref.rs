use regex::Regex;
use serde_json::{Map, Value};

use super::input_spec::InputSpec;

lazy_static! {
    static ref MODEL_NAME_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]*/[a-zA-Z0-9][a-zA-Z0-9_.-]*$").unwrap();
    static ref VERSION_REGEX: Regex = Regex::new(r"^[a-fA-F0-9]{64}$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicateModelRef {
    Version(String),
    Latest { owner: String, name: String },
}

impl ReplicateModelRef {
    pub fn parse(model_id: &str) -> Option<Self> {
        let model_id = model_id.trim();

        if let Some((model, version)) = model_id.split_once(':') {
            if !MODEL_NAME_REGEX.is_match(model) || version.is_empty() {
                return None;
            }
            return Some(Self::Version(version.to_string()));
        }

        if VERSION_REGEX.is_match(model_id) {
            return Some(Self::Version(model_id.to_string()));
        }

        if MODEL_NAME_REGEX.is_match(model_id) {
            let (owner, name) = model_id.split_once('/')?;
            return Some(Self::Latest {
                owner: owner.to_string(),
                name: name.to_string(),
            });
        }

        None
    }

    pub fn predictions_url(&self, api_url: &str) -> String {
        match self {
            Self::Version(_) => format!("{}/predictions", api_url),
            Self::Latest { owner, name } => {
                format!("{}/models/{}/{}/predictions", api_url, owner, name)
            }
        }
    }

    pub fn input_spec(&self, input: &Map<String, Value>) -> InputSpec {
        InputSpec {
            version: match self {
                Self::Version(version) => Some(version.to_string()),
                Self::Latest { .. } => None,
            },
            input: input.clone(),
        }
    }
}
