//! Session-expired navigation

use crate::config::AuthConfig;
use farmacinha_http::SessionExpiredHandler;

/// Sends the browser to the login page with a full page load
///
/// Assigning `location.href` discards all in-memory application state, so
/// nothing from the expired session survives.
#[derive(Debug, Clone)]
pub struct HardRedirect {
    target: String,
}

impl HardRedirect {
    /// Redirect to `target`
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for HardRedirect {
    fn default() -> Self {
        Self::to(AuthConfig::LOGIN_PATH)
    }
}

impl SessionExpiredHandler for HardRedirect {
    fn on_session_expired(&self) {
        let Some(window) = web_sys::window() else {
            tracing::warn!("No window available, cannot redirect to login");
            return;
        };

        if let Err(err) = window.location().set_href(&self.target) {
            tracing::error!(location = %self.target, error = ?err, "Redirect to login failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_login_page() {
        assert_eq!(HardRedirect::default().target(), "/login");
        assert_eq!(HardRedirect::to("/entrar").target(), "/entrar");
    }
}
