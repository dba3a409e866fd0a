//! Authentication API client methods

use super::session::{self, SessionData};
use super::user::user_path;
use super::{AuthenticatedHttpClient, ClientError, decode};
use crate::types::{LoginRequest, TokenResponse, UserCreate, UserOut};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderValue};

impl AuthenticatedHttpClient {
    /// Create a new account
    pub async fn register(&self, user: &UserCreate) -> Result<UserOut, ClientError> {
        self.post("/auth/register", user).await
    }

    /// Sign in and persist the session
    ///
    /// The token, user id and user name are written to the credential store
    /// together once the profile has been fetched. Neither request carries the
    /// stored token, and a failure before that point leaves any previous
    /// session in place. A failed write discards both sessions.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserOut, ClientError> {
        let credentials = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .send_detached(self.request(Method::POST, "/auth/login").json(&credentials))
            .await?;
        let token: TokenResponse = decode(response).await?;

        let bearer = HeaderValue::from_str(&format!("Bearer {}", token.access_token))
            .map_err(|_| ClientError::Configuration("issued token is not a valid header".into()))?;
        let request = self
            .request(Method::GET, &user_path(username))
            .header(AUTHORIZATION, bearer);
        let user: UserOut = decode(self.send_detached(request).await?).await?;

        session::establish_session(
            self.credential_store().as_ref(),
            &SessionData {
                token: token.access_token,
                user: user.id.to_string(),
                name: user.username.clone(),
            },
        )?;

        tracing::info!(user_id = user.id, "Signed in");
        Ok(user)
    }

    /// Forget the persisted session
    pub fn logout(&self) {
        let failures = session::clear_session(self.credential_store().as_ref());
        tracing::info!(failures, "Signed out");
    }

    /// Whether a session token is currently stored
    pub fn is_authenticated(&self) -> bool {
        session::read_token(self.credential_store().as_ref()).is_some()
    }
}
