//! Launch parameters taken from the page URL.
//!
//! `?api=<base url>` overrides the configured API, `?session_id=<id>`
//! hands the chat view an existing session, and the `#/...` fragment
//! picks the initial screen.

use web_sys::UrlSearchParams;

use unibot_types::config::ClientConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    pub api_base_url: Option<String>,
    pub session_id: Option<String>,
    /// Location fragment including the leading `#`, or empty
    pub hash: String,
}

impl LaunchParams {
    /// Blank values count as absent.
    pub fn new(
        api_base_url: Option<String>,
        session_id: Option<String>,
        hash: impl Into<String>,
    ) -> Self {
        let present = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            api_base_url: present(api_base_url),
            session_id: present(session_id),
            hash: hash.into(),
        }
    }

    /// Read the current `window.location`.
    pub fn from_location() -> Self {
        let location = gloo_utils::window().location();
        let search = location.search().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();
        Self::parse(&search, &hash)
    }

    /// Parse a `?a=b&c=d` query string (percent-decoded by the browser).
    pub fn parse(search: &str, hash: &str) -> Self {
        match UrlSearchParams::new_with_str(search) {
            Ok(params) => Self::new(params.get("api"), params.get("session_id"), hash),
            Err(e) => {
                log::warn!("Ignoring malformed query string {:?}: {:?}", search, e);
                Self::new(None, None, hash)
            }
        }
    }

    /// An unusable `api` value is logged and the configured API kept.
    pub fn apply_to(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.api_base_url {
            match config.api.clone().try_with_base_url(url) {
                Ok(api) => config.api = api,
                Err(e) => log::warn!("Ignoring api launch parameter: {}", e),
            }
        }
        config
    }
}

/// Mirror the current screen in the address bar.
pub fn set_location_hash(hash: &str) {
    if let Err(e) = gloo_utils::window().location().set_hash(hash) {
        log::warn!("Failed to update location hash: {:?}", e);
    }
}

/// Current fragment, e.g. after the browser's back button.
pub fn current_location_hash() -> String {
    gloo_utils::window().location().hash().unwrap_or_default()
}
