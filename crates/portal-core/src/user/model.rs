//! User domain model.

use super::role::Role;
use crate::message::EntityId;
use serde::{Deserialize, Serialize};

/// The authenticated user, as returned by the login endpoint.
///
/// The role is fixed for the lifetime of a session; a role change on the
/// server only takes effect after the user logs in again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub role: Role,
}

impl User {
    /// Badge text shown in the navigation bar, e.g. `A 教師`.
    pub fn badge(&self) -> String {
        format!("{} {}", self.name, self.role.label())
    }

    /// Greeting shown after a successful login.
    pub fn greeting(&self) -> String {
        format!("歡迎回來，{} {}", self.role.label(), self.name)
    }
}
