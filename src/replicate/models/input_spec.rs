use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Serialize)]
pub struct InputSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub input: Map<String, Value>,
}
