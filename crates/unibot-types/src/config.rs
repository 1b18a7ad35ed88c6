use serde::{Deserialize, Serialize};

use crate::{ClientError, Result};

/// Used when neither the build environment nor the page URL names an API.
pub const FALLBACK_API_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let base_url = option_env!("UNIBOT_API_BASE_URL").unwrap_or(FALLBACK_API_BASE_URL);
        Self {
            base_url: normalize_base_url(base_url),
            request_timeout_ms: 30_000,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    /// Like `with_base_url`, for values from outside the build, e.g. the page URL.
    /// Accepts absolute http(s) URLs and same-origin paths.
    pub fn try_with_base_url(self, base_url: &str) -> Result<Self> {
        let url = normalize_base_url(base_url);
        let lower = url.to_ascii_lowercase();
        let absolute = ["http://", "https://"]
            .iter()
            .any(|scheme| lower.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
        let same_origin = url.starts_with('/') && !url.starts_with("//");
        if !absolute && !same_origin {
            return Err(ClientError::Config(format!("invalid API base URL {:?}", base_url)));
        }
        Ok(self.with_base_url(&url))
    }

    /// Join an endpoint path (with leading slash) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Strip surrounding whitespace and trailing slashes.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
