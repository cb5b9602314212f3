//! Remote collaborators of the portal client: the REST API over HTTP and
//! the socket.io realtime channel.

pub mod http_api;
pub mod realtime;

pub use http_api::HttpPortalApi;
pub use realtime::{RealtimeClient, RealtimeConfig, RealtimeSubscription};
