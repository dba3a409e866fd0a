//! Request and response hooks run around every dispatch

use super::error::ClientError;
use super::session::{self, CredentialStore};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Request, Response};
use std::sync::Arc;

/// Reaction to an expired or rejected session
pub trait SessionExpiredHandler: Send + Sync {
    /// Called once per 401 response, after the session has been cleared
    fn on_session_expired(&self);
}

/// Handler that only records the event in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSessionExpired;

impl SessionExpiredHandler for LogSessionExpired {
    fn on_session_expired(&self) {
        tracing::warn!("Session expired, sign-in required");
    }
}

/// Attaches the stored bearer token to outgoing requests
#[derive(Clone)]
pub struct RequestAuthInjector {
    store: Arc<dyn CredentialStore>,
}

impl RequestAuthInjector {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Set `Authorization: Bearer <token>` when a non-empty token is stored
    ///
    /// A failure to build the request is passed through untouched.
    pub fn inject(
        &self,
        request: Result<Request, reqwest::Error>,
    ) -> Result<Request, ClientError> {
        let mut request = request.map_err(|err| {
            tracing::error!(error = %err, "Request error");
            ClientError::Request(err)
        })?;

        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            "Request config"
        );

        if let Some(token) = session::read_token(self.store.as_ref()) {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ClientError::Configuration("stored token is not a valid header value".into())
            })?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        Ok(request)
    }
}

/// Tears the session down when the server answers 401
#[derive(Clone)]
pub struct ResponseSessionGuard {
    store: Arc<dyn CredentialStore>,
    on_expired: Arc<dyn SessionExpiredHandler>,
}

impl ResponseSessionGuard {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        on_expired: Arc<dyn SessionExpiredHandler>,
    ) -> Self {
        Self { store, on_expired }
    }

    /// Observe the outcome of a dispatch and hand it back unchanged
    pub fn observe(
        &self,
        outcome: Result<Response, ClientError>,
    ) -> Result<Response, ClientError> {
        let error = match outcome {
            Ok(response) => return Ok(response),
            Err(error) => error,
        };

        tracing::error!(status = ?error.status(), error = %error, "Response error");

        if error.is_unauthorized() {
            let failures = session::clear_session(self.store.as_ref());
            tracing::info!(failures, "Cleared session after 401");
            self.on_expired.on_session_expired();
        }

        Err(error)
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockSessionExpiredHandler;
    use super::*;
    use crate::client::session::{MemoryCredentialStore, NAME_KEY, TOKEN_KEY, USER_KEY};
    use reqwest::{Client, Method, StatusCode};

    fn build(client: &Client) -> Result<Request, reqwest::Error> {
        client
            .request(Method::GET, "http://localhost:8000/api/v1/orders")
            .build()
    }

    #[test]
    fn injects_bearer_token() {
        let store = Arc::new(MemoryCredentialStore::with_token("abc123"));
        let injector = RequestAuthInjector::new(store);

        let request = injector.inject(build(&Client::new())).unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer abc123"
        );
    }

    #[test]
    fn leaves_headers_alone_without_token() {
        let injector = RequestAuthInjector::new(Arc::new(MemoryCredentialStore::new()));

        let request = injector.inject(build(&Client::new())).unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn replaces_per_call_authorization() {
        let store = Arc::new(MemoryCredentialStore::with_token("fresh"));
        let injector = RequestAuthInjector::new(store);

        let request = Client::new()
            .get("http://localhost:8000/api/v1/orders")
            .header(AUTHORIZATION, "Bearer stale")
            .build();
        let request = injector.inject(request).unwrap();
        assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer fresh");
    }

    #[test]
    fn propagates_build_failure() {
        let injector = RequestAuthInjector::new(Arc::new(MemoryCredentialStore::new()));

        let request = Client::new().get("not a url").build();
        assert!(matches!(
            injector.inject(request),
            Err(ClientError::Request(_))
        ));
    }

    #[test]
    fn rejects_token_with_control_characters() {
        let store = Arc::new(MemoryCredentialStore::with_token("abc\n123"));
        let injector = RequestAuthInjector::new(store);

        assert!(matches!(
            injector.inject(build(&Client::new())),
            Err(ClientError::Configuration(_))
        ));
    }

    #[test]
    fn unauthorized_clears_session_and_notifies_once() {
        let store = Arc::new(MemoryCredentialStore::with_token("abc123"));
        store.set(USER_KEY, "7").unwrap();
        store.set(NAME_KEY, "maria").unwrap();

        let mut handler = MockSessionExpiredHandler::new();
        handler.expect_on_session_expired().times(1).return_const(());

        let guard = ResponseSessionGuard::new(store.clone(), Arc::new(handler));
        let outcome = guard.observe(Err(ClientError::from_status(
            StatusCode::UNAUTHORIZED,
            "expired".into(),
        )));

        assert!(matches!(outcome, Err(ClientError::AuthenticationFailed(_))));
        for key in [TOKEN_KEY, USER_KEY, NAME_KEY] {
            assert!(!store.contains(key));
        }
    }

    #[test]
    fn other_errors_pass_through_untouched() {
        let store = Arc::new(MemoryCredentialStore::with_token("abc123"));
        let mut handler = MockSessionExpiredHandler::new();
        handler.expect_on_session_expired().never();

        let guard = ResponseSessionGuard::new(store.clone(), Arc::new(handler));
        for status in [
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let outcome = guard.observe(Err(ClientError::from_status(status, String::new())));
            assert_eq!(outcome.unwrap_err().status(), Some(status.as_u16()));
        }
        assert!(store.contains(TOKEN_KEY));
    }
}
