//! Session context and the persistent credential store contract.
//!
//! The client keeps exactly two entries in local persistent storage:
//! `token` (the opaque bearer credential) and `user` (the serialized
//! [`User`]). They are written together at login and cleared together at
//! logout.

use crate::error::Result;
use crate::user::User;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the serialized user.
pub const USER_KEY: &str = "user";

/// Opaque credential proving an authenticated identity to the server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// The identity of the logged-in user, passed explicitly to every
/// component that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user: User,
    pub token: SessionToken,
}

impl SessionContext {
    pub fn new(user: User, token: SessionToken) -> Self {
        Self { user, token }
    }
}

/// Key/value persistent storage, the local-storage analog.
///
/// Implementations must make `set` durable before returning and `clear`
/// must drop every entry at once.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn clear(&self) -> Result<()>;

    /// Reads the current token. Called fresh on every authorized request.
    fn token(&self) -> Result<Option<SessionToken>> {
        Ok(self
            .get(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(SessionToken::new))
    }
}

/// Reads a stored session. Both entries must be present; a `user` entry that
/// no longer parses is treated as absent.
pub fn load_session(store: &dyn CredentialStore) -> Result<Option<SessionContext>> {
    let Some(token) = store.token()? else {
        return Ok(None);
    };
    let Some(raw_user) = store.get(USER_KEY)? else {
        return Ok(None);
    };

    match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Ok(Some(SessionContext::new(user, token))),
        Err(e) => {
            warn!("Ignoring unreadable stored user: {}", e);
            Ok(None)
        }
    }
}

/// Persists both entries of a session.
pub fn save_session(store: &dyn CredentialStore, context: &SessionContext) -> Result<()> {
    store.set(TOKEN_KEY, context.token.as_str())?;
    store.set(USER_KEY, &serde_json::to_string(&context.user)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::EntityId;
    use crate::user::Role;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore(Mutex<HashMap<String, String>>);

    impl CredentialStore for MapStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            self.0.lock().unwrap().clear();
            Ok(())
        }
    }

    fn context() -> SessionContext {
        SessionContext::new(
            User {
                id: EntityId::Number(1),
                name: "A".to_string(),
                role: Role::Teacher,
            },
            SessionToken::new("t1"),
        )
    }

    #[test]
    fn test_save_then_load() {
        let store = MapStore::default();
        save_session(&store, &context()).unwrap();
        assert_eq!(load_session(&store).unwrap(), Some(context()));
    }

    #[test]
    fn test_token_without_user_is_no_session() {
        let store = MapStore::default();
        store.set(TOKEN_KEY, "t1").unwrap();
        assert_eq!(load_session(&store).unwrap(), None);
    }

    #[test]
    fn test_corrupt_user_is_no_session() {
        let store = MapStore::default();
        store.set(TOKEN_KEY, "t1").unwrap();
        store.set(USER_KEY, "{not json").unwrap();
        assert_eq!(load_session(&store).unwrap(), None);
    }

    #[test]
    fn test_token_debug_is_redacted() {
        assert_eq!(format!("{:?}", SessionToken::new("secret")), "SessionToken(***)");
    }
}
