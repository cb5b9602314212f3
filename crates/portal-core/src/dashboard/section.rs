use crate::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The named dashboard sections. Exactly one is visible at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Section {
    Records,
    #[default]
    Iep,
    Messages,
    Questions,
}

impl Section {
    /// Element id of the section container, e.g. `section-messages`.
    pub fn element_id(self) -> String {
        format!("section-{self}")
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Records => "專業紀錄",
            Section::Iep => "IEP",
            Section::Messages => "留言板",
            Section::Questions => "常見問題",
        }
    }

    /// Whether entering this section re-fetches its content.
    pub fn reloads_on_entry(self) -> bool {
        matches!(self, Section::Records | Section::Messages)
    }
}

/// Global UI state. There are no other states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardState {
    #[default]
    LoggedOut,
    Dashboard { active: Section },
}

impl DashboardState {
    pub fn active_section(&self) -> Option<Section> {
        match self {
            DashboardState::LoggedOut => None,
            DashboardState::Dashboard { active } => Some(*active),
        }
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.active_section() == Some(section)
    }

    /// Successful login or restored session.
    pub fn enter_dashboard(&mut self) {
        *self = DashboardState::Dashboard {
            active: Section::default(),
        };
    }

    /// Section navigation, only valid while on the dashboard.
    pub fn navigate(&mut self, section: Section) -> Result<()> {
        match self {
            DashboardState::LoggedOut => Err(PortalError::NotLoggedIn),
            DashboardState::Dashboard { active } => {
                *active = section;
                Ok(())
            }
        }
    }

    pub fn log_out(&mut self) {
        *self = DashboardState::LoggedOut;
    }
}
