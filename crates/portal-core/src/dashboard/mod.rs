//! Dashboard navigation and role-based element visibility.
//!
//! # Module Structure
//!
//! - `section`: the fixed section set and the dashboard state machine
//! - `visibility`: pure role → visibility rules over static UI elements

mod section;
mod visibility;

pub use section::{DashboardState, Section};
pub use visibility::{UiElement, VisibilityRule, default_elements, is_visible, visible_elements};
