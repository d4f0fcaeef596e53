use serde::Deserialize;
use std::num::NonZeroU64;
use std::time::Duration;
use url::Url;

/// Where and how to reach the remote post API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Api {
    /// Base URL every endpoint path is appended to. A path prefix
    /// (like `/api/v1`) is kept.
    ///
    /// **Environment variables**:
    /// - `FEEDVIEW_API_BASE_URL`
    pub base_url: Url,
    /// Per-request time limit. Requests wait indefinitely if unset.
    ///
    /// **Environment variables**:
    /// - `FEEDVIEW_API_TIMEOUT_SECS`
    pub timeout_secs: Option<NonZeroU64>,
}

impl Api {
    const DEFAULT_BASE_URL: &'static str = "https://dummyjson.com";

    // Required by serde
    fn default_base_url() -> Url {
        match Url::parse(Self::DEFAULT_BASE_URL) {
            Ok(url) => url,
            Err(..) => panic!("DEFAULT_BASE_URL is accidentally set to an invalid URL"),
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(|secs| Duration::from_secs(secs.get()))
    }
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: None,
        }
    }
}
