//! Websocket transport for the realtime channel.
//!
//! Delivery is at-most-once and best effort: frames that fail to decode are
//! logged and skipped, and a dropped connection is reported once as
//! `RealtimeEvent::Disconnected` without reconnecting.

use super::packet::{
    CONNECT_FRAME, EnginePacket, PONG_FRAME, decode_engine, decode_socket, to_realtime_event,
};
use futures_util::{SinkExt, StreamExt};
use portal_core::realtime::{RealtimeEvent, RealtimeReceiver, RealtimeSender, realtime_channel};
use portal_core::{PortalError, Result};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use tracing::{debug, info, warn};
use url::Url;

/// Realtime connection configuration.
#[derive(Debug, Clone)]
pub struct RealtimeConfig {
    pub connect_timeout: Duration,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Builds the socket.io websocket endpoint from the server base URL.
///
/// `http://host` becomes `ws://host/socket.io/?EIO=4&transport=websocket`.
pub fn socket_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| PortalError::config(format!("Invalid realtime URL '{base}': {e}")))?;

    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(PortalError::config(format!(
                "Unsupported realtime URL scheme: {other}"
            )));
        }
    };
    url.set_scheme(scheme)
        .map_err(|_| PortalError::config(format!("Cannot use scheme {scheme} for {base}")))?;
    url.set_path("/socket.io/");
    url.set_query(Some("EIO=4&transport=websocket"));
    Ok(url)
}

/// Connects to the realtime channel.
pub struct RealtimeClient {
    url: Url,
    config: RealtimeConfig,
}

impl RealtimeClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, RealtimeConfig::default())
    }

    pub fn with_config(base_url: &str, config: RealtimeConfig) -> Result<Self> {
        Ok(Self {
            url: socket_url(base_url)?,
            config,
        })
    }

    /// Opens the websocket and starts the background receive loop.
    pub async fn connect(&self) -> Result<RealtimeSubscription> {
        let (stream, _response) = timeout(self.config.connect_timeout, connect_async(self.url.as_str()))
            .await
            .map_err(|_| {
                PortalError::connectivity(format!(
                    "realtime connection timeout after {:?}",
                    self.config.connect_timeout
                ))
            })?
            .map_err(|e| PortalError::connectivity(e.to_string()))?;

        info!("Realtime channel opened: {}", self.url);

        let (tx, rx) = realtime_channel();
        let task = tokio::spawn(receive_loop(stream, tx));
        Ok(RealtimeSubscription { events: rx, task })
    }
}

async fn receive_loop<S>(stream: tokio_tungstenite::WebSocketStream<S>, tx: RealtimeSender)
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (mut writer, mut reader) = stream.split();
    let mut reason = "connection closed".to_string();

    while let Some(frame) = reader.next().await {
        let text = match frame {
            Ok(WsMessage::Text(text)) => text,
            Ok(WsMessage::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                reason = e.to_string();
                break;
            }
        };

        let packet = match decode_engine(text.as_str()) {
            Ok(packet) => packet,
            Err(e) => {
                warn!("Skipping realtime frame: {}", e);
                continue;
            }
        };

        let reply = match packet {
            EnginePacket::Open(handshake) => {
                debug!("Realtime handshake sid={}", handshake.sid);
                Some(CONNECT_FRAME)
            }
            EnginePacket::Ping => Some(PONG_FRAME),
            EnginePacket::Close => break,
            EnginePacket::Message(payload) => {
                match decode_socket(&payload).and_then(to_realtime_event) {
                    Ok(Some(event)) => {
                        if tx.send(event).is_err() {
                            // Subscriber gone.
                            return;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Skipping realtime packet: {}", e),
                }
                None
            }
            EnginePacket::Pong | EnginePacket::Upgrade | EnginePacket::Noop => None,
        };

        if let Some(reply) = reply
            && let Err(e) = writer.send(WsMessage::Text(reply.into())).await
        {
            reason = e.to_string();
            break;
        }
    }

    info!("Realtime channel closed: {}", reason);
    let _ = tx.send(RealtimeEvent::Disconnected { reason });
}

/// A live subscription. Dropping it stops the receive loop.
pub struct RealtimeSubscription {
    events: RealtimeReceiver,
    task: JoinHandle<()>,
}

impl RealtimeSubscription {
    pub async fn recv(&mut self) -> Option<RealtimeEvent> {
        self.events.recv().await
    }
}

impl Drop for RealtimeSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_url_from_http() {
        let url = socket_url("http://special-education-platform.zeabur.app").unwrap();
        assert_eq!(
            url.as_str(),
            "ws://special-education-platform.zeabur.app/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_socket_url_from_https_with_path() {
        let url = socket_url("https://example.test/app/").unwrap();
        assert_eq!(url.scheme(), "wss");
        assert_eq!(url.path(), "/socket.io/");
    }

    #[test]
    fn test_socket_url_rejects_other_schemes() {
        assert!(socket_url("ftp://example.test").is_err());
        assert!(socket_url("not a url").is_err());
    }
}
