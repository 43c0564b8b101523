//! Backend location and client tuning.
//!
//! The backend base may be absolute (`http://localhost:8000`) or a path
//! prefix (`/api`) that is resolved against a separate origin, so the same
//! client works behind a reverse proxy and against a bare development server.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute URL or path prefix of the prediction service.
    pub base_url: String,
    /// Scheme and host used when `base_url` is a path prefix.
    pub origin: String,
    pub timeout: Duration,
    /// Seeds the chart offsets; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            seed: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// The absolute base every endpoint hangs off, without a trailing slash.
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        if is_absolute(base) {
            return base.to_string();
        }

        let origin = self.origin.trim().trim_end_matches('/');
        let prefix = base.trim_start_matches('/');
        if prefix.is_empty() {
            origin.to_string()
        } else {
            format!("{origin}/{prefix}")
        }
    }

    /// Full URL of `path` (e.g. `/predict`) on the configured backend.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_root(), path.trim_start_matches('/'))
    }
}

fn is_absolute(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
