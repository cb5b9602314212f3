//! Domain layer of the portal client: roles, messages, therapy records,
//! dashboard navigation, the render model, and the contracts the outer
//! layers implement (`PortalApi`, `CredentialStore`, `Notifier`).

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod message;
pub mod notifier;
pub mod realtime;
pub mod record;
pub mod session;
pub mod user;
pub mod view;

// Re-export common error type
pub use error::{PortalError, Result};
