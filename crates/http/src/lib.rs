//! Farmacinha HTTP client
//!
//! A `reqwest` client for the Farmacinha API that attaches the stored bearer
//! token to every request and tears the session down when the server answers
//! 401. Storage and navigation are injected through [`CredentialStore`] and
//! [`SessionExpiredHandler`], so the same client runs in the browser and in
//! native tests.

pub mod client;
pub mod types;

pub use client::config::ClientConfig;
pub use client::error::ClientError;
pub use client::interceptors::{
    LogSessionExpired, RequestAuthInjector, ResponseSessionGuard, SessionExpiredHandler,
};
pub use client::session::{CredentialStore, MemoryCredentialStore, SessionData, StorageError};
pub use client::{AuthenticatedHttpClient, AuthenticatedHttpClientBuilder};
