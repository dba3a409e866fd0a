//! Browser wiring for the Farmacinha API client
//!
//! Supplies the browser implementations of the client's capabilities:
//! session storage in `localStorage`, a hard redirect to `/login` when the
//! session expires, and console logging.

pub mod client;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod storage;

pub use client::{create_api_client, create_api_client_with};
pub use config::AuthConfig;
pub use logging::init_logging;
pub use navigation::HardRedirect;
pub use storage::BrowserLocalStorage;
