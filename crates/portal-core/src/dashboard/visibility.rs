//! Advisory, client-side role gates. The server stays the authority.

use super::section::Section;
use crate::user::Role;

/// How an element reacts to the current role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityRule {
    Always,
    /// Hidden when the current role equals the denied role.
    DenyFor(Role),
    /// Hidden unless the current role equals the allowed role.
    AllowOnly(Role),
}

/// A static dashboard element carrying its visibility metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiElement {
    pub id: &'static str,
    pub label: &'static str,
    pub rule: VisibilityRule,
    /// Section the element navigates to, if it is a nav entry.
    pub target: Option<Section>,
}

pub fn is_visible(role: Role, rule: &VisibilityRule) -> bool {
    match rule {
        VisibilityRule::Always => true,
        VisibilityRule::DenyFor(denied) => *denied != role,
        VisibilityRule::AllowOnly(allowed) => *allowed == role,
    }
}

pub fn visible_elements(role: Role, elements: &[UiElement]) -> Vec<&UiElement> {
    elements
        .iter()
        .filter(|el| is_visible(role, &el.rule))
        .collect()
}

/// The element registry of the dashboard page.
pub fn default_elements() -> Vec<UiElement> {
    vec![
        UiElement {
            id: "nav-records",
            label: Section::Records.title(),
            rule: VisibilityRule::DenyFor(Role::Parents),
            target: Some(Section::Records),
        },
        UiElement {
            id: "nav-iep",
            label: Section::Iep.title(),
            rule: VisibilityRule::Always,
            target: Some(Section::Iep),
        },
        UiElement {
            id: "nav-messages",
            label: Section::Messages.title(),
            rule: VisibilityRule::Always,
            target: Some(Section::Messages),
        },
        UiElement {
            id: "nav-questions",
            label: Section::Questions.title(),
            rule: VisibilityRule::Always,
            target: Some(Section::Questions),
        },
        UiElement {
            id: "btn-new-record",
            label: "新增治療紀錄",
            rule: VisibilityRule::AllowOnly(Role::Therapist),
            target: None,
        },
        UiElement {
            id: "btn-ai-summary",
            label: "AI 摘要",
            rule: VisibilityRule::Always,
            target: None,
        },
    ]
}
