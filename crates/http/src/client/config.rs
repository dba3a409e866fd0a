//! Client configuration

use serde::{Deserialize, Serialize};

/// Base address of the Farmacinha API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Settings fixed when the client is constructed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API base URL, prepended to every request path
    pub base_url: String,
    /// User agent sent by native builds
    pub user_agent: String,
    /// Send cookies along with token authentication
    pub with_credentials: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("farmacinha-client/", env!("CARGO_PKG_VERSION")).to_string(),
            with_credentials: true,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ClientConfig {
    /// Load configuration from defaults and `FARMACINHA_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable cannot be parsed
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::defaults()?
            .add_source(config::Environment::with_prefix("FARMACINHA"))
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a file, with environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, config::ConfigError> {
        Self::defaults()?
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("FARMACINHA"))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError>
    {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("user_agent", defaults.user_agent)?
            .set_default("with_credentials", defaults.with_credentials)
    }
}
