//! Remote portal API contract.
//!
//! Defines the operations the client performs against the REST API,
//! decoupling the application layer from the HTTP transport.

use crate::error::Result;
use crate::message::{EntityId, Message};
use crate::record::Record;
use crate::session::SessionToken;
use crate::user::User;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: SessionToken,
    pub user: User,
}

/// `{data: [...]}` list envelope. A missing or null `data` means no items.
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<Vec<T>>,
}

impl<T> DataEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMessage<'a> {
    pub message: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRecord<'a> {
    pub content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordReply<'a> {
    pub reply: &'a str,
}

/// The portal REST API.
///
/// Every method except `login` is an authorized call. Implementations map a
/// 401 to `PortalError::Unauthorized`, a 403 to `PortalError::Forbidden`,
/// other non-2xx statuses to `PortalError::Rejected` and transport failures
/// to `PortalError::Connectivity`.
#[async_trait]
pub trait PortalApi: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse>;

    /// `GET /api/messages`
    async fn list_messages(&self) -> Result<Vec<Message>>;

    /// `POST /api/messages`
    async fn post_message(&self, text: &str) -> Result<()>;

    /// `GET /api/messages/summary`
    async fn message_summary(&self) -> Result<String>;

    /// `GET /api/records`
    async fn list_records(&self) -> Result<Vec<Record>>;

    /// `POST /api/records`
    async fn create_record(&self, content: &str) -> Result<()>;

    /// `PUT /api/records/:id`
    async fn reply_record(&self, id: &EntityId, reply: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_data() {
        let env: DataEnvelope<Record> = serde_json::from_str("{}").unwrap();
        assert!(env.into_items().is_empty());
        let env: DataEnvelope<Record> = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(env.into_items().is_empty());
    }

    #[test]
    fn test_login_response() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"token":"abc","user":{"id":3,"name":"Wang","role":"therapist"}}"#,
        )
        .unwrap();
        assert_eq!(resp.token.as_str(), "abc");
        assert_eq!(resp.user.name, "Wang");
    }
}
