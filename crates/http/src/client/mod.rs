//! Authenticated client, its builder and the per-area API methods

pub mod auth;
pub mod config;
pub mod error;
pub mod interceptors;
pub mod medication;
pub mod notification;
pub mod session;
pub mod shopping;
pub mod user;

use config::ClientConfig;
use error::ClientError;
use interceptors::{
    LogSessionExpired, RequestAuthInjector, ResponseSessionGuard, SessionExpiredHandler,
};
use reqwest::{Client, ClientBuilder, Method, Request, RequestBuilder, Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use session::{CredentialStore, MemoryCredentialStore};
use std::sync::Arc;

/// API client that authenticates with the stored session token
///
/// Every request goes through [`RequestAuthInjector`] before it is sent and
/// through [`ResponseSessionGuard`] once it resolves.
#[derive(Clone)]
pub struct AuthenticatedHttpClient {
    client: Client,
    base_url: String,
    with_credentials: bool,
    store: Arc<dyn CredentialStore>,
    injector: RequestAuthInjector,
    guard: ResponseSessionGuard,
}

impl AuthenticatedHttpClient {
    /// Create a client for `base_url` with an in-memory session store
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client from loaded configuration
    pub fn from_config(
        config: &ClientConfig,
        store: Arc<dyn CredentialStore>,
        on_session_expired: Arc<dyn SessionExpiredHandler>,
    ) -> Result<Self, ClientError> {
        Self::builder()
            .base_url(config.base_url.clone())
            .user_agent(config.user_agent.clone())
            .with_credentials(config.with_credentials)
            .credential_store(store)
            .on_session_expired(on_session_expired)
            .build()
    }

    /// Create a new client builder
    pub fn builder() -> AuthenticatedHttpClientBuilder {
        AuthenticatedHttpClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether cookies are sent along with the bearer token
    pub fn with_credentials(&self) -> bool {
        self.with_credentials
    }

    /// Session store shared with the interceptors
    pub fn credential_store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Create a request builder for `path` below the base URL
    ///
    /// Authentication is not attached here; it is read from the store when
    /// the request is sent.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.request(method, url);

        #[cfg(target_arch = "wasm32")]
        let request = if self.with_credentials {
            request.fetch_credentials_include()
        } else {
            request
        };

        request
    }

    /// Send a request through the interceptors
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let request = self.injector.inject(request.build())?;
        self.guard.observe(self.dispatch(request).await)
    }

    /// Send a request without the stored token and without session teardown
    ///
    /// Used while signing in, where the current session must stay untouched
    /// until a new one replaces it.
    pub(crate) async fn send_detached(
        &self,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        self.dispatch(request.build()?).await
    }

    async fn dispatch(&self, request: Request) -> Result<Response, ClientError> {
        let method = request.method().clone();
        let url = request.url().clone();

        match self.client.execute(request).await {
            Ok(response) if response.status().is_success() => Ok(response),
            Ok(response) => {
                let status = response.status();
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                tracing::debug!(%method, %url, %status, "Request rejected");
                Err(ClientError::from_status(status, message))
            }
            Err(err) => {
                tracing::debug!(%method, %url, "Request did not complete");
                Err(ClientError::Request(err))
            }
        }
    }

    /// Send a request and decode the JSON response body
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        decode(self.send(request).await?).await
    }

    /// GET `path`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// POST a JSON body to `path`
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    /// PUT a JSON body to `path`
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    /// PATCH `path` with a JSON body
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.execute(self.request(Method::PATCH, path).json(body)).await
    }

    /// DELETE `path`
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::DELETE, path)).await
    }
}

/// Decode a JSON body, treating an empty body as `null`
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.bytes().await?;
    if body.is_empty() {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_slice(&body)?)
}

/// Builder for AuthenticatedHttpClient
pub struct AuthenticatedHttpClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    with_credentials: bool,
    store: Option<Arc<dyn CredentialStore>>,
    on_session_expired: Option<Arc<dyn SessionExpiredHandler>>,
}

impl Default for AuthenticatedHttpClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            with_credentials: true,
            store: None,
            on_session_expired: None,
        }
    }
}

impl AuthenticatedHttpClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Send cookies with every request (on by default)
    pub fn with_credentials(mut self, enabled: bool) -> Self {
        self.with_credentials = enabled;
        self
    }

    /// Set the store the session token is read from
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the reaction to a 401 response
    pub fn on_session_expired(mut self, handler: Arc<dyn SessionExpiredHandler>) -> Self {
        self.on_session_expired = Some(handler);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AuthenticatedHttpClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let user_agent = self.user_agent.unwrap_or_else(|| ClientConfig::default().user_agent);
        let mut client_builder = ClientBuilder::new()
            .default_headers(headers)
            .user_agent(user_agent);

        #[cfg(not(target_arch = "wasm32"))]
        if self.with_credentials {
            client_builder = client_builder.cookie_store(true);
        }

        let client = client_builder.build()?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new()));
        let on_session_expired = self
            .on_session_expired
            .unwrap_or_else(|| Arc::new(LogSessionExpired));

        Ok(AuthenticatedHttpClient {
            client,
            base_url,
            with_credentials: self.with_credentials,
            injector: RequestAuthInjector::new(store.clone()),
            guard: ResponseSessionGuard::new(store.clone(), on_session_expired),
            store,
        })
    }
}
