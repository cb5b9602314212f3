//! Therapy record model and its reply workflow.

use crate::message::EntityId;
use crate::user::Role;
use serde::{Deserialize, Serialize};

/// A therapist-authored treatment note, optionally answered once by a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: EntityId,
    pub date: String,
    pub content: String,
    pub therapist_name: String,
    #[serde(default)]
    pub teacher_reply: Option<String>,
}

/// What the reply area of a record shows to a given viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyState<'a> {
    /// The record already carries a teacher reply.
    Replied(&'a str),
    /// No reply yet and the viewer may write one.
    CanReply,
    /// No reply yet and the viewer can only wait for it.
    Waiting,
}

impl Record {
    /// The stored reply, treating an empty string like no reply.
    pub fn reply(&self) -> Option<&str> {
        self.teacher_reply.as_deref().filter(|r| !r.is_empty())
    }

    pub fn reply_state(&self, viewer: Role) -> ReplyState<'_> {
        if let Some(reply) = self.reply() {
            return ReplyState::Replied(reply);
        }
        match viewer {
            Role::Teacher => ReplyState::CanReply,
            Role::Therapist | Role::Parents => ReplyState::Waiting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn record(reply: Option<&str>) -> Record {
        Record {
            id: EntityId::Number(1),
            date: "2024-05-01".to_string(),
            content: "Worked on fine motor skills".to_string(),
            therapist_name: "Chen".to_string(),
            teacher_reply: reply.map(str::to_string),
        }
    }

    #[test]
    fn test_replied_record_never_offers_reply() {
        let rec = record(Some("X"));
        for role in Role::iter() {
            assert_eq!(rec.reply_state(role), ReplyState::Replied("X"));
        }
    }

    #[test]
    fn test_unreplied_record_by_role() {
        let rec = record(None);
        assert_eq!(rec.reply_state(Role::Teacher), ReplyState::CanReply);
        assert_eq!(rec.reply_state(Role::Therapist), ReplyState::Waiting);
        assert_eq!(rec.reply_state(Role::Parents), ReplyState::Waiting);
    }

    #[test]
    fn test_empty_reply_counts_as_missing() {
        let rec = record(Some(""));
        assert_eq!(rec.reply_state(Role::Teacher), ReplyState::CanReply);
    }

    #[test]
    fn test_null_reply_deserializes() {
        let rec: Record = serde_json::from_str(
            r#"{"id":"r1","date":"2024-05-01","content":"c","therapist_name":"t","teacher_reply":null}"#,
        )
        .unwrap();
        assert_eq!(rec.teacher_reply, None);
    }
}
