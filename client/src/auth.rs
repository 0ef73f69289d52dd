//! Who is signed in, as far as this process is concerned.

use crate::api::{ApiClientError, HttpApi};
use crate::types::AuthUser;

#[derive(Debug, Default)]
pub struct AuthSession {
    pub user: Option<AuthUser>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the session from an existing cookie, if the server still
    /// honors it.
    pub async fn restore(api: &HttpApi) -> Self {
        Self {
            user: api.me().await.ok(),
        }
    }

    pub async fn sign_in(
        &mut self,
        api: &HttpApi,
        username: &str,
        password: &str,
    ) -> Result<AuthUser, ApiClientError> {
        let user = api.login(username, password).await?;
        self.user = Some(user.clone());
        Ok(user)
    }

    /// The server-side logout is best-effort: whatever it answers, the
    /// local session is gone.
    pub async fn sign_out(&mut self, api: &HttpApi) {
        if let Err(err) = api.logout().await {
            tracing::debug!(error = %err, "logout request failed; clearing local session anyway");
        }
        self.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
