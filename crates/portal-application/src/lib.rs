//! Application layer for the education portal client.
//!
//! This crate provides the use cases that coordinate the domain model with
//! the API and storage contracts: session lifecycle, navigation, loads and
//! the outgoing actions.

pub mod gateway;
pub mod notices;
pub mod portal_usecase;
pub mod session_manager;
pub mod view_controller;

pub use gateway::Gateway;
pub use portal_usecase::PortalUseCase;
pub use session_manager::SessionManager;
pub use view_controller::{LoadTicket, ViewController};
