//! API utilities for frontend-backend communication
//!
//! Holds the backend origin and builds endpoint URLs from it.

/// Port the KPI backend listens on
pub const BACKEND_PORT: u16 = 8000;

const FALLBACK_BASE: &str = "http://localhost:8000";

/// Backend origin, provided once at the app root via context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Derive the origin from the current window location, using the
    /// backend port.
    ///
    /// # Returns
    /// - API base URL like "http://localhost:8000"
    /// - `http://localhost:8000` if window is not available
    pub fn from_location() -> Self {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Self::new(FALLBACK_BASE),
        };
        let location = window.location();
        let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
        let hostname = location
            .hostname()
            .unwrap_or_else(|_| "localhost".to_string());
        Self::new(format!("{}//{}:{}", protocol, hostname, BACKEND_PORT))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full API URL from an endpoint path
    ///
    /// # Example
    /// ```ignore
    /// let url = config.url("/metrics/summary");
    /// ```
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
