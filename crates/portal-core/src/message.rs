//! Chat message model.

use crate::user::{Role, RoleTag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier. The API emits numbers for some entities and
/// strings for others, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{n}"),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl EntityId {
    /// Whether both ids name the same entity. A number and a string of the
    /// same digits match, since the server is not consistent about the type.
    pub fn same_as(&self, other: &EntityId) -> bool {
        match (self, other) {
            (EntityId::Number(a), EntityId::Number(b)) => a == b,
            (EntityId::Text(a), EntityId::Text(b)) => a == b,
            (EntityId::Number(n), EntityId::Text(t)) | (EntityId::Text(t), EntityId::Number(n)) => {
                *t == n.to_string()
            }
        }
    }
}

impl From<&str> for EntityId {
    fn from(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => EntityId::Number(n),
            Err(_) => EntityId::Text(raw.to_string()),
        }
    }
}

/// A single chat message. Messages are append-only and ordered by arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub role: RoleTag,
    pub user_name: String,
    pub message: String,
}

impl Message {
    pub fn new(role: Role, user_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: None,
            role: role.into(),
            user_name: user_name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_realtime_payload() {
        let msg: Message = serde_json::from_str(
            r#"{"id":7,"role":"parents","user_name":"Lin","message":"hi","created_at":"x"}"#,
        )
        .unwrap();
        assert_eq!(msg.id, Some(EntityId::Number(7)));
        assert_eq!(msg.role.known(), Some(Role::Parents));
    }

    #[test]
    fn test_entity_id_parsing() {
        assert_eq!(EntityId::from("12"), EntityId::Number(12));
        assert_eq!(EntityId::from("abc"), EntityId::Text("abc".to_string()));
        assert_eq!(EntityId::from("abc").to_string(), "abc");
    }

    #[test]
    fn test_numeric_text_id_matches_number() {
        let text = EntityId::Text("5".to_string());
        assert!(text.same_as(&EntityId::Number(5)));
        assert!(EntityId::Number(5).same_as(&text));
        assert!(!text.same_as(&EntityId::Number(50)));
        assert!(!EntityId::Text("05".to_string()).same_as(&EntityId::Number(5)));
    }
}
