//! User domain module.
//!
//! # Module Structure
//!
//! - `role`: the closed role set and its localized labels
//! - `model`: the authenticated `User`
//!
//! # Usage
//!
//! ```ignore
//! use portal_core::user::{Role, RoleTag, User};
//! ```

mod model;
mod role;

pub use model::User;
pub use role::{Role, RoleTag, role_label};
