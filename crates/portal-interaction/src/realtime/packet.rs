//! Engine.IO v4 / Socket.IO v5 text framing.
//!
//! Only the subset the client needs is decoded: the handshake, heartbeats,
//! namespace connect/disconnect, and event packets. Binary attachments and
//! acknowledgements are not used by the portal server.

use portal_core::message::Message;
use portal_core::realtime::{MESSAGE_UPDATE_EVENT, RealtimeEvent};
use portal_core::{PortalError, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Frame sent to join the default namespace after the handshake.
pub const CONNECT_FRAME: &str = "40";
/// Heartbeat answer to a server ping.
pub const PONG_FRAME: &str = "3";

/// Engine.IO open handshake payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

/// Transport-level packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    /// Payload of a `4` frame, itself a socket.io packet.
    Message(String),
    Upgrade,
    Noop,
}

/// Socket.IO packet carried inside an Engine.IO message.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect,
    Disconnect,
    Event { name: String, args: Vec<Value> },
    Ack,
    ConnectError(String),
}

pub fn decode_engine(frame: &str) -> Result<EnginePacket> {
    let mut chars = frame.chars();
    let kind = chars
        .next()
        .ok_or_else(|| PortalError::realtime("empty frame"))?;
    let rest = chars.as_str();

    match kind {
        '0' => {
            let handshake: Handshake = serde_json::from_str(rest)
                .map_err(|e| PortalError::realtime(format!("bad open packet: {e}")))?;
            Ok(EnginePacket::Open(handshake))
        }
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping),
        '3' => Ok(EnginePacket::Pong),
        '4' => Ok(EnginePacket::Message(rest.to_string())),
        '5' => Ok(EnginePacket::Upgrade),
        '6' => Ok(EnginePacket::Noop),
        other => Err(PortalError::realtime(format!(
            "unknown engine packet type '{other}'"
        ))),
    }
}

pub fn decode_socket(payload: &str) -> Result<SocketPacket> {
    let mut chars = payload.chars();
    let kind = chars
        .next()
        .ok_or_else(|| PortalError::realtime("empty socket packet"))?;
    let body = skip_ack_id(skip_namespace(chars.as_str()));

    match kind {
        '0' => Ok(SocketPacket::Connect),
        '1' => Ok(SocketPacket::Disconnect),
        '2' => {
            let mut args: Vec<Value> = serde_json::from_str(body)
                .map_err(|e| PortalError::realtime(format!("bad event packet: {e}")))?;
            if args.is_empty() {
                return Err(PortalError::realtime("event packet without a name"));
            }
            let name = match args.remove(0) {
                Value::String(name) => name,
                other => {
                    return Err(PortalError::realtime(format!(
                        "event name is not a string: {other}"
                    )));
                }
            };
            Ok(SocketPacket::Event { name, args })
        }
        '3' => Ok(SocketPacket::Ack),
        '4' => Ok(SocketPacket::ConnectError(body.to_string())),
        other => Err(PortalError::realtime(format!(
            "unsupported socket packet type '{other}'"
        ))),
    }
}

/// `/admin,` prefix of a non-default namespace.
fn skip_namespace(body: &str) -> &str {
    if body.starts_with('/') {
        match body.find(',') {
            Some(idx) => &body[idx + 1..],
            None => "",
        }
    } else {
        body
    }
}

fn skip_ack_id(body: &str) -> &str {
    body.trim_start_matches(|c: char| c.is_ascii_digit())
}

/// Maps a socket.io packet onto the client's event vocabulary.
pub fn to_realtime_event(packet: SocketPacket) -> Result<Option<RealtimeEvent>> {
    match packet {
        SocketPacket::Connect => Ok(Some(RealtimeEvent::Connected)),
        SocketPacket::Disconnect => Ok(Some(RealtimeEvent::Disconnected {
            reason: "server disconnect".to_string(),
        })),
        SocketPacket::ConnectError(reason) => Ok(Some(RealtimeEvent::Disconnected { reason })),
        SocketPacket::Event { name, mut args } if name == MESSAGE_UPDATE_EVENT => {
            if args.is_empty() {
                return Err(PortalError::realtime("message_update without payload"));
            }
            let message: Message = serde_json::from_value(args.swap_remove(0))?;
            Ok(Some(RealtimeEvent::MessageUpdate(message)))
        }
        SocketPacket::Event { name, .. } => {
            debug!("Ignoring realtime event '{}'", name);
            Ok(None)
        }
        SocketPacket::Ack => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::user::Role;

    #[test]
    fn test_decode_open() {
        let packet =
            decode_engine(r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#)
                .unwrap();
        assert_eq!(
            packet,
            EnginePacket::Open(Handshake {
                sid: "abc".to_string(),
                ping_interval: 25000,
                ping_timeout: 20000,
            })
        );
    }

    #[test]
    fn test_decode_heartbeat_and_message() {
        assert_eq!(decode_engine("2").unwrap(), EnginePacket::Ping);
        assert_eq!(decode_engine("6").unwrap(), EnginePacket::Noop);
        assert_eq!(
            decode_engine("40").unwrap(),
            EnginePacket::Message("0".to_string())
        );
        assert!(decode_engine("").is_err());
        assert!(decode_engine("9").is_err());
    }

    #[test]
    fn test_message_update_event() {
        let packet = decode_socket(
            r#"2["message_update",{"id":5,"role":"therapist","user_name":"Wang","message":"今天表現很好"}]"#,
        )
        .unwrap();
        let event = to_realtime_event(packet).unwrap();
        match event {
            Some(RealtimeEvent::MessageUpdate(msg)) => {
                assert_eq!(msg.role.known(), Some(Role::Therapist));
                assert_eq!(msg.message, "今天表現很好");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_namespace_and_ack_id_are_skipped() {
        let packet = decode_socket(r#"2/portal,12["other",1]"#).unwrap();
        assert_eq!(
            packet,
            SocketPacket::Event {
                name: "other".to_string(),
                args: vec![Value::from(1)],
            }
        );
        assert_eq!(to_realtime_event(packet).unwrap(), None);
    }

    #[test]
    fn test_malformed_event_is_error() {
        assert!(decode_socket("2not json").is_err());
        assert!(decode_socket("2[]").is_err());
        assert!(decode_socket("2[42]").is_err());
        let packet = decode_socket(r#"2["message_update",{"role":"teacher"}]"#).unwrap();
        assert!(to_realtime_event(packet).is_err());
    }

    #[test]
    fn test_connect_maps_to_connected() {
        let packet = decode_socket(r#"0{"sid":"x"}"#).unwrap();
        assert_eq!(
            to_realtime_event(packet).unwrap(),
            Some(RealtimeEvent::Connected)
        );
    }
}
