//! Realtime channel: socket.io over websocket.
//!
//! # Module Structure
//!
//! - `packet`: Engine.IO / Socket.IO frame codec
//! - `client`: websocket transport feeding a realtime event queue

mod client;
pub mod packet;

pub use client::{RealtimeClient, RealtimeConfig, RealtimeSubscription, socket_url};
