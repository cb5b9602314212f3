//! Page state: which section is visible and what each view renders.
//!
//! The controller never performs I/O. Loads are split in two: entering a
//! section hands out a [`LoadTicket`], and the fetched data is applied with
//! that ticket afterwards. A ticket goes stale as soon as the user navigates
//! again or logs out, so a late response can never render into a hidden or
//! replaced view.

use portal_core::dashboard::{DashboardState, Section, UiElement, default_elements, visible_elements};
use portal_core::message::Message;
use portal_core::realtime::RealtimeEvent;
use portal_core::record::Record;
use portal_core::session::SessionContext;
use portal_core::view::{DashboardView, PortalView, RecordListView};
use portal_core::{PortalError, Result};
use tracing::debug;

/// Proof that a load was started for `section` at a given navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub section: Section,
    generation: u64,
}

pub struct ViewController {
    state: DashboardState,
    elements: Vec<UiElement>,
    view: PortalView,
    generation: u64,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(default_elements())
    }
}

impl ViewController {
    pub fn new(elements: Vec<UiElement>) -> Self {
        Self {
            state: DashboardState::LoggedOut,
            elements,
            view: PortalView::default(),
            generation: 0,
        }
    }

    pub fn state(&self) -> DashboardState {
        self.state
    }

    pub fn view(&self) -> &PortalView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut PortalView {
        &mut self.view
    }

    pub fn elements(&self) -> &[UiElement] {
        &self.elements
    }

    /// Reveals the dashboard for the session's user and applies the role
    /// rules to the static elements.
    pub fn show_dashboard(&mut self, context: &SessionContext) -> &DashboardView {
        let visible = visible_elements(context.user.role, &self.elements);
        self.state.enter_dashboard();
        self.generation += 1;
        self.view
            .dashboard
            .insert(DashboardView::new(&context.user, &visible))
    }

    /// Makes `section` the only visible section. Returns a ticket when the
    /// section re-fetches its content on entry.
    pub fn show_section(&mut self, section: Section) -> Result<Option<LoadTicket>> {
        self.state.navigate(section)?;
        self.generation += 1;
        debug!("Showing {}", section.element_id());

        if section.reloads_on_entry() {
            Ok(Some(self.begin_load(section)?))
        } else {
            Ok(None)
        }
    }

    /// Starts a reload of the active section without navigating.
    pub fn begin_load(&mut self, section: Section) -> Result<LoadTicket> {
        if !self.state.is_visible(section) {
            return Err(PortalError::internal(format!(
                "cannot load hidden section {section}"
            )));
        }
        if section == Section::Records {
            self.view.records = RecordListView::Loading;
        }
        Ok(LoadTicket {
            section,
            generation: self.generation,
        })
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && self.state.is_visible(ticket.section)
    }

    /// Renders a fetched message list. Returns false when the ticket is stale.
    pub fn apply_messages(&mut self, ticket: LoadTicket, messages: &[Message]) -> bool {
        if !self.accept(&ticket) {
            return false;
        }
        self.view.chat.clear();
        for msg in messages {
            self.render_message(msg);
        }
        self.view.chat.scroll_to_newest();
        true
    }

    /// Renders the outcome of a record fetch. Returns false when the ticket
    /// is stale.
    pub fn apply_records(
        &mut self,
        ticket: LoadTicket,
        context: &SessionContext,
        result: &Result<Vec<Record>>,
    ) -> bool {
        if !self.accept(&ticket) {
            return false;
        }
        self.view.records = match result {
            Ok(records) => RecordListView::from_records(records, context.user.role),
            Err(PortalError::Forbidden) => RecordListView::PermissionDenied,
            Err(_) => RecordListView::Failed,
        };
        true
    }

    /// Appends one chat row. Scrolling is left to the caller.
    pub fn render_message(&mut self, msg: &Message) {
        self.view.chat.append(msg);
    }

    /// Applies a pushed event. A message update is rendered only while the
    /// messages section is visible; otherwise it is dropped from the view.
    /// A push for a message already rendered by a fetch is skipped.
    pub fn apply_realtime(&mut self, event: &RealtimeEvent) -> bool {
        match event {
            RealtimeEvent::MessageUpdate(Message { id: Some(id), .. })
                if self.view.chat.contains(id) =>
            {
                debug!("Skipping message update {}, already shown", id);
                false
            }
            RealtimeEvent::MessageUpdate(msg) if self.state.is_visible(Section::Messages) => {
                self.render_message(msg);
                self.view.chat.scroll_to_newest();
                true
            }
            RealtimeEvent::MessageUpdate(_) => {
                debug!("Dropping message update, messages section hidden");
                false
            }
            RealtimeEvent::Connected | RealtimeEvent::Disconnected { .. } => false,
        }
    }

    pub fn reveal_summary(&mut self, summary: &str) {
        self.view.summary.reveal(summary);
    }

    /// Back to the login view with nothing rendered.
    pub fn reset(&mut self) {
        self.state.log_out();
        self.view = PortalView::default();
        self.generation += 1;
    }

    fn accept(&self, ticket: &LoadTicket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            debug!("Discarding stale {} response", ticket.section);
        }
        current
    }
}
