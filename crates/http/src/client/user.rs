//! User API client methods

use super::{AuthenticatedHttpClient, ClientError};
use crate::types::UserOut;

/// Path of a single user, with the identifier percent-encoded as one segment
pub(crate) fn user_path(identifier: &str) -> String {
    format!("/users/{}", urlencoding::encode(identifier))
}

impl AuthenticatedHttpClient {
    /// Look a user up by numeric id or username
    pub async fn get_user(&self, identifier: &str) -> Result<UserOut, ClientError> {
        self.get(&user_path(identifier)).await
    }
}
