use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    pub app_env: String,
    pub port: Option<u16>,

    pub replicate_api_key: String,
    pub replicate_api_url: Option<String>,
    pub replicate_poll_timeout_secs: Option<u64>,
    pub default_model_id: Option<String>,

    pub download_allowed_hosts: Option<String>,
    pub max_upload_bytes: Option<usize>,
}

impl Envy {
    pub fn allowed_download_hosts(&self) -> Vec<String> {
        match &self.download_allowed_hosts {
            Some(hosts) => hosts
                .split(',')
                .map(|host| host.trim().to_lowercase())
                .filter(|host| !host.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}
