//! Render model of the portal page.
//!
//! Views are plain data: the application layer mutates them and a
//! front-end draws them. Nothing here performs I/O.

mod chat;
mod records;

pub use chat::{ChatLine, ChatView, MessageStyle};
pub use records::{
    EMPTY_RECORDS_NOTICE, LOAD_FAILED_NOTICE, PERMISSION_DENIED_NOTICE, RecordItem,
    RecordListView, ReplyBlock, WAITING_NOTICE,
};

use crate::dashboard::UiElement;
use crate::user::User;

/// Navigation bar content shown once logged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub user_name: String,
    pub role_label: &'static str,
    /// Ids of the static elements left visible for the current role.
    pub visible_elements: Vec<&'static str>,
}

impl DashboardView {
    pub fn new(user: &User, visible: &[&UiElement]) -> Self {
        Self {
            user_name: user.name.clone(),
            role_label: user.role.label(),
            visible_elements: visible.iter().map(|el| el.id).collect(),
        }
    }

    pub fn shows(&self, element_id: &str) -> bool {
        self.visible_elements.contains(&element_id)
    }
}

/// The AI summary panel; hidden until a summary arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryPanel {
    pub visible: bool,
    pub content: String,
}

impl SummaryPanel {
    pub fn reveal(&mut self, content: impl Into<String>) {
        self.visible = true;
        self.content = content.into();
    }
}

/// The chat input box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBox {
    pub value: String,
}

impl InputBox {
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Trimmed text, or `None` for blank input.
    pub fn text(&self) -> Option<&str> {
        let trimmed = self.value.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Everything currently rendered on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalView {
    pub dashboard: Option<DashboardView>,
    pub chat: ChatView,
    pub records: RecordListView,
    pub summary: SummaryPanel,
    pub input: InputBox,
}
