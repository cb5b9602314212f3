//! Portal use case: the page-level flow tying the session, the gateway and
//! the view controller together.
//!
//! All methods take `&mut self`: the page runs on one logical thread, and
//! events (user input, responses, realtime pushes) are applied one at a
//! time. The session context is owned here and handed to the components
//! that need it; there is no global current user.

use crate::gateway::Gateway;
use crate::notices::{
    ERROR_TITLE, LOGIN_SUCCESS_TITLE, REPLY_NOT_OFFERED, SESSION_EXPIRED, SUMMARY_BUSY_TEXT,
    SUMMARY_BUSY_TITLE, SUMMARY_FAILED, SUMMARY_FAILED_TITLE, action_failure, login_failure,
};
use crate::session_manager::SessionManager;
use crate::view_controller::{LoadTicket, ViewController};
use portal_core::api::PortalApi;
use portal_core::dashboard::{DashboardState, Section};
use portal_core::message::EntityId;
use portal_core::notifier::{Notice, Notifier};
use portal_core::realtime::{RealtimeEvent, RealtimeReceiver};
use portal_core::session::{CredentialStore, SessionContext};
use portal_core::view::{PortalView, ReplyBlock};
use portal_core::{PortalError, Result};
use std::sync::Arc;
use tracing::{info, warn};

pub struct PortalUseCase {
    session: SessionManager,
    gateway: Gateway,
    view: ViewController,
    notifier: Arc<dyn Notifier>,
    context: Option<SessionContext>,
}

impl PortalUseCase {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        api: Arc<dyn PortalApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_controller(store, api, notifier, ViewController::default())
    }

    pub fn with_controller(
        store: Arc<dyn CredentialStore>,
        api: Arc<dyn PortalApi>,
        notifier: Arc<dyn Notifier>,
        view: ViewController,
    ) -> Self {
        Self {
            session: SessionManager::new(store, api.clone()),
            gateway: Gateway::new(api),
            view,
            notifier,
            context: None,
        }
    }

    pub fn context(&self) -> Option<&SessionContext> {
        self.context.as_ref()
    }

    pub fn state(&self) -> DashboardState {
        self.view.state()
    }

    pub fn view(&self) -> &PortalView {
        self.view.view()
    }

    pub fn controller(&self) -> &ViewController {
        &self.view
    }

    /// Types into the chat input box.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.view.view_mut().input.set(text);
    }

    // ============================================================================
    // Session
    // ============================================================================

    /// Page initialization: restores a persisted session without touching
    /// the network. Returns whether the dashboard was entered.
    pub fn init(&mut self) -> Result<bool> {
        match self.session.restore_session()? {
            Some(context) => {
                self.enter_dashboard(context);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        match self.session.login(username, password).await {
            Ok(context) => {
                self.notifier
                    .notify(Notice::success(LOGIN_SUCCESS_TITLE, context.user.greeting()));
                self.enter_dashboard(context);
                Ok(())
            }
            Err(e) => {
                warn!("Login failed: {}", e);
                self.notifier.notify(login_failure(&e));
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()?;
        self.context = None;
        self.view.reset();
        Ok(())
    }

    // ============================================================================
    // Navigation and loads
    // ============================================================================

    /// Switches the visible section, reloading messages or records on entry.
    pub async fn show_section(&mut self, section: Section) -> Result<()> {
        self.require_context()?;
        match self.view.show_section(section)? {
            Some(ticket) => self.run_load(ticket).await,
            None => Ok(()),
        }
    }

    pub async fn load_messages(&mut self) -> Result<()> {
        self.require_context()?;
        let ticket = self.view.begin_load(Section::Messages)?;
        self.run_load(ticket).await
    }

    pub async fn load_records(&mut self) -> Result<()> {
        self.require_context()?;
        let ticket = self.view.begin_load(Section::Records)?;
        self.run_load(ticket).await
    }

    async fn run_load(&mut self, ticket: LoadTicket) -> Result<()> {
        match ticket.section {
            Section::Messages => match self.gateway.fetch_messages().await {
                Ok(messages) => {
                    self.view.apply_messages(ticket, &messages);
                    Ok(())
                }
                Err(e) => Err(self.fail_quietly(e)),
            },
            Section::Records => {
                let context = self.require_context()?.clone();
                let result = self.gateway.fetch_records().await;
                if let Err(e) = &result
                    && e.is_session_expired()
                {
                    self.expire_session();
                    return Err(PortalError::Unauthorized);
                }
                // Forbidden and other failures render as notices in the list.
                self.view.apply_records(ticket, &context, &result);
                Ok(())
            }
            Section::Iep | Section::Questions => Ok(()),
        }
    }

    // ============================================================================
    // Messages
    // ============================================================================

    /// Sends the input box content. Blank input does nothing.
    pub async fn send_message(&mut self) -> Result<bool> {
        self.require_context()?;
        let input = &mut self.view.view_mut().input;
        match self.gateway.send_message(input).await {
            Ok(sent) => Ok(sent),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Requests the AI summary of the conversation behind a blocking
    /// indicator. No retry on failure.
    pub async fn get_ai_summary(&mut self) -> Result<()> {
        self.require_context()?;
        self.notifier.busy(SUMMARY_BUSY_TITLE, SUMMARY_BUSY_TEXT);

        let result = self.gateway.fetch_summary().await;
        self.notifier.close_busy();

        match result {
            Ok(summary) => {
                self.view.reveal_summary(&summary);
                Ok(())
            }
            Err(e) if e.is_session_expired() => {
                self.expire_session();
                Err(e)
            }
            Err(e) => {
                warn!("AI summary failed: {}", e);
                self.notifier
                    .notify(Notice::error(SUMMARY_FAILED_TITLE, SUMMARY_FAILED));
                Err(e)
            }
        }
    }

    // ============================================================================
    // Records
    // ============================================================================

    /// Adds a therapy record and refreshes the list if it is on screen.
    pub async fn create_record(&mut self, content: &str) -> Result<bool> {
        self.require_context()?;
        match self.gateway.create_record(content).await {
            Ok(true) => {
                self.refresh_records().await?;
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Attaches the teacher reply to a record.
    ///
    /// Only records currently rendered with the reply action accept a reply;
    /// a record that already has one never offers it again.
    pub async fn reply_record(&mut self, id: &EntityId, reply: &str) -> Result<bool> {
        self.require_context()?;
        let offered = self
            .view
            .view()
            .records
            .find(id)
            .is_some_and(|item| item.reply == ReplyBlock::ReplyAction);
        if !offered {
            return Err(self.fail(PortalError::validation(REPLY_NOT_OFFERED)));
        }

        match self.gateway.reply_record(id, reply).await {
            Ok(true) => {
                self.refresh_records().await?;
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => Err(self.fail(e)),
        }
    }

    async fn refresh_records(&mut self) -> Result<()> {
        if self.view.state().is_visible(Section::Records) {
            self.load_records().await
        } else {
            Ok(())
        }
    }

    // ============================================================================
    // Realtime
    // ============================================================================

    /// Applies one pushed event. Returns whether the view changed.
    pub fn handle_realtime(&mut self, event: &RealtimeEvent) -> bool {
        match event {
            RealtimeEvent::Connected => info!("Realtime channel connected"),
            RealtimeEvent::Disconnected { reason } => {
                warn!("Realtime channel disconnected: {}", reason)
            }
            RealtimeEvent::MessageUpdate(_) => {}
        }
        self.view.apply_realtime(event)
    }

    /// Applies every queued event without waiting. Returns the number of
    /// events that changed the view.
    pub fn drain_realtime(&mut self, events: &mut RealtimeReceiver) -> usize {
        let mut applied = 0;
        while let Ok(event) = events.try_recv() {
            if self.handle_realtime(&event) {
                applied += 1;
            }
        }
        applied
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    fn enter_dashboard(&mut self, context: SessionContext) {
        self.view.show_dashboard(&context);
        self.context = Some(context);
    }

    fn require_context(&self) -> Result<&SessionContext> {
        self.context.as_ref().ok_or(PortalError::NotLoggedIn)
    }

    /// A 401 means the stored token is dead: drop the session and return to
    /// the login view.
    fn expire_session(&mut self) {
        warn!("Session token rejected, logging out");
        if let Err(e) = self.session.logout() {
            warn!("Failed to clear stored session: {}", e);
        }
        self.context = None;
        self.view.reset();
        self.notifier
            .notify(Notice::warning(ERROR_TITLE, SESSION_EXPIRED));
    }

    /// Shows the failure to the user, expiring the session on a 401.
    fn fail(&mut self, err: PortalError) -> PortalError {
        if err.is_session_expired() {
            self.expire_session();
        } else {
            warn!("Action failed: {}", err);
            self.notifier.notify(action_failure(&err));
        }
        err
    }

    /// Logs the failure without a dialog, expiring the session on a 401.
    fn fail_quietly(&mut self, err: PortalError) -> PortalError {
        if err.is_session_expired() {
            self.expire_session();
        } else {
            warn!("Load failed: {}", err);
        }
        err
    }
}
