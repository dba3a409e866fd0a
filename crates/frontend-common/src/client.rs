//! Client configuration and initialization

use crate::config::AuthConfig;
use crate::navigation::HardRedirect;
use crate::storage::BrowserLocalStorage;
pub use farmacinha_http::ClientError;
use farmacinha_http::{AuthenticatedHttpClient, ClientConfig, CredentialStore, SessionExpiredHandler};
use std::sync::Arc;

/// Create the API client used by the whole application
///
/// The client reads its token from `localStorage` and sends the browser to
/// the login page when the API answers 401. Create it once at startup and
/// share clones of it.
pub fn create_api_client() -> Result<AuthenticatedHttpClient, ClientError> {
    create_api_client_with(
        Arc::new(BrowserLocalStorage::new()),
        Arc::new(HardRedirect::default()),
    )
}

/// Create the API client with custom storage and session-expired handling
pub fn create_api_client_with(
    store: Arc<dyn CredentialStore>,
    on_session_expired: Arc<dyn SessionExpiredHandler>,
) -> Result<AuthenticatedHttpClient, ClientError> {
    let config = ClientConfig {
        base_url: AuthConfig::API_BASE_URL.to_string(),
        ..ClientConfig::default()
    };

    AuthenticatedHttpClient::from_config(&config, store, on_session_expired)
}
