use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://special-education-platform.zeabur.app";

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_realtime_enabled() -> bool {
    true
}

/// Client configuration, stored as `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Realtime endpoint; defaults to `api_url` when absent.
    #[serde(default)]
    pub realtime_url: Option<String>,
    #[serde(default = "default_realtime_enabled")]
    pub realtime_enabled: bool,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Overrides the location of the persisted session file.
    #[serde(default)]
    pub session_file: Option<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            realtime_url: None,
            realtime_enabled: default_realtime_enabled(),
            request_timeout_secs: default_request_timeout_secs(),
            session_file: None,
        }
    }
}

impl PortalConfig {
    pub fn realtime_url(&self) -> &str {
        self.realtime_url.as_deref().unwrap_or(&self.api_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PortalConfig = toml::from_str("api_url = \"http://localhost:3000\"").unwrap();
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.realtime_url(), "http://localhost:3000");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.realtime_enabled);
    }
}
