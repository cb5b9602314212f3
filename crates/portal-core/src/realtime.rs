//! Transport-agnostic realtime events.
//!
//! A realtime transport pushes events into a [`RealtimeSender`]; the view
//! side drains the paired receiver when it is ready to render.

use crate::message::Message;
use tokio::sync::mpsc;

/// Event name of the message push.
pub const MESSAGE_UPDATE_EVENT: &str = "message_update";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RealtimeEvent {
    Connected,
    MessageUpdate(Message),
    Disconnected { reason: String },
}

pub type RealtimeSender = mpsc::UnboundedSender<RealtimeEvent>;
pub type RealtimeReceiver = mpsc::UnboundedReceiver<RealtimeEvent>;

pub fn realtime_channel() -> (RealtimeSender, RealtimeReceiver) {
    mpsc::unbounded_channel()
}
