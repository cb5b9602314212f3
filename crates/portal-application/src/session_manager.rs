//! Session lifecycle: restore, login, logout.

use crate::notices::CREDENTIALS_REQUIRED;
use portal_core::api::PortalApi;
use portal_core::session::{CredentialStore, SessionContext, load_session, save_session};
use portal_core::{PortalError, Result};
use std::sync::Arc;
use tracing::info;

pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    api: Arc<dyn PortalApi>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn CredentialStore>, api: Arc<dyn PortalApi>) -> Self {
        Self { store, api }
    }

    /// Reads a persisted session. Never touches the network.
    pub fn restore_session(&self) -> Result<Option<SessionContext>> {
        let restored = load_session(self.store.as_ref())?;
        if let Some(context) = &restored {
            info!(
                "Restored session for {} ({})",
                context.user.name, context.user.role
            );
        }
        Ok(restored)
    }

    /// Authenticates and persists the session.
    ///
    /// Blank credentials fail with a validation error before any request.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionContext> {
        let username = username.trim();
        let password = password.trim();
        if username.is_empty() || password.is_empty() {
            return Err(PortalError::validation(CREDENTIALS_REQUIRED));
        }

        let response = self.api.login(username, password).await?;
        let context = SessionContext::new(response.user, response.token);
        save_session(self.store.as_ref(), &context)?;

        info!("Logged in as {} ({})", context.user.name, context.user.role);
        Ok(context)
    }

    /// Drops both persisted entries. The token stays valid server-side
    /// until it expires.
    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }
}
