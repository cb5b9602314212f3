//! Outgoing actions against the portal API.

use portal_core::api::PortalApi;
use portal_core::message::{EntityId, Message};
use portal_core::record::Record;
use portal_core::view::InputBox;
use portal_core::Result;
use std::sync::Arc;
use tracing::debug;

pub struct Gateway {
    api: Arc<dyn PortalApi>,
}

impl Gateway {
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self { api }
    }

    /// Posts the input box content and clears the box.
    ///
    /// Blank input is a no-op: no request and the box is left as is. The
    /// posted message is not rendered here; it comes back through the
    /// realtime channel. Returns whether a message was sent.
    pub async fn send_message(&self, input: &mut InputBox) -> Result<bool> {
        let Some(text) = input.text().map(str::to_string) else {
            return Ok(false);
        };
        self.api.post_message(&text).await?;
        input.clear();
        debug!("Message posted ({} chars)", text.chars().count());
        Ok(true)
    }

    pub async fn fetch_messages(&self) -> Result<Vec<Message>> {
        self.api.list_messages().await
    }

    pub async fn fetch_records(&self) -> Result<Vec<Record>> {
        self.api.list_records().await
    }

    pub async fn fetch_summary(&self) -> Result<String> {
        self.api.message_summary().await
    }

    /// Blank content counts as a cancelled dialog.
    pub async fn create_record(&self, content: &str) -> Result<bool> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(false);
        }
        self.api.create_record(content).await?;
        Ok(true)
    }

    /// Blank reply counts as a cancelled dialog.
    pub async fn reply_record(&self, id: &EntityId, reply: &str) -> Result<bool> {
        let reply = reply.trim();
        if reply.is_empty() {
            return Ok(false);
        }
        self.api.reply_record(id, reply).await?;
        Ok(true)
    }
}
