//! Frontend configuration

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Page the browser is sent to when the session expires
    pub const LOGIN_PATH: &'static str = "/login";

    /// Farmacinha API base address
    pub const API_BASE_URL: &'static str = farmacinha_http::client::config::DEFAULT_BASE_URL;
}
