use crate::message::{EntityId, Message};
use crate::user::{Role, role_label};

/// Style variant of a chat row, keyed by sender role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Teacher,
    Parents,
    Therapist,
}

impl MessageStyle {
    /// Unknown sender roles get teacher styling.
    pub fn for_sender(role: Option<Role>) -> Self {
        match role {
            Some(Role::Teacher) | None => MessageStyle::Teacher,
            Some(Role::Parents) => MessageStyle::Parents,
            Some(Role::Therapist) => MessageStyle::Therapist,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            MessageStyle::Teacher => "msg-teacher",
            MessageStyle::Parents => "msg-parents",
            MessageStyle::Therapist => "msg-therapist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub id: Option<EntityId>,
    pub style: MessageStyle,
    /// `{role label} - {user name}`
    pub header: String,
    pub body: String,
}

impl ChatLine {
    pub fn from_message(msg: &Message) -> Self {
        Self {
            id: msg.id.clone(),
            style: MessageStyle::for_sender(msg.role.known()),
            header: format!("{} - {}", role_label(&msg.role), msg.user_name),
            body: msg.message.clone(),
        }
    }
}

/// The chat box: an ordered list of rows plus a scroll position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatView {
    pub lines: Vec<ChatLine>,
    /// Index of the row scrolled into view, if any.
    pub scroll_anchor: Option<usize>,
}

impl ChatView {
    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll_anchor = None;
    }

    pub fn append(&mut self, msg: &Message) {
        self.lines.push(ChatLine::from_message(msg));
    }

    /// Whether a row for the message `id` is already shown.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.lines
            .iter()
            .any(|line| line.id.as_ref().is_some_and(|shown| shown.same_as(id)))
    }

    pub fn scroll_to_newest(&mut self) {
        self.scroll_anchor = self.lines.len().checked_sub(1);
    }

    pub fn is_scrolled_to_newest(&self) -> bool {
        self.scroll_anchor == self.lines.len().checked_sub(1)
    }
}
