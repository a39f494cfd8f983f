// ABOUTME: Application state for the quoteflow TUI
// Wraps the form controller with view concerns: field selection, edit
// buffers, dialogs, notifications, and queued async actions

use std::time::{Duration, Instant};

use crate::controller::FormController;
use crate::schema::{FieldId, FieldKind, ServiceType, ValidationErrors};
use crate::submit::SubmissionReceipt;
use crate::wizard;

const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Actions that need the async runtime; queued by the event handler and
/// drained by `App::tick`.
#[derive(Debug, Clone)]
pub enum AsyncAction {
    ParseAssist(String),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    pub level: NoticeLevel,
    pub shown_at: Instant,
}

/// Restore-vs-discard prompt shown when a draft exists at startup.
#[derive(Debug, Clone)]
pub struct RestoreDialog {
    /// true = "Resume", false = "Start fresh"
    pub selected_option: bool,
}

pub struct AppState {
    pub controller: FormController,

    /// Index into the current step's visible fields
    pub selected_field: usize,
    /// Text being edited for the selected field (display form)
    pub edit_buffer: String,

    /// Free-text input for the AI assist panel
    pub assist_input: String,
    /// Error banner under the assist input
    pub assist_error: Option<String>,

    pub restore_dialog: Option<RestoreDialog>,
    pub validation: Option<ValidationErrors>,
    pub last_receipt: Option<SubmissionReceipt>,
    pub notification: Option<Notification>,

    pub is_parsing: bool,
    pub is_submitting: bool,
    pub pending_async_action: Option<AsyncAction>,

    pub should_quit: bool,
}

impl AppState {
    pub fn new(controller: FormController) -> Self {
        let mut state = Self {
            controller,
            selected_field: 0,
            edit_buffer: String::new(),
            assist_input: String::new(),
            assist_error: None,
            restore_dialog: None,
            validation: None,
            last_receipt: None,
            notification: None,
            is_parsing: false,
            is_submitting: false,
            pending_async_action: None,
            should_quit: false,
        };
        state.sync_edit_buffer();
        state
    }

    /// Fields visible on the current step given live form values.
    pub fn visible_fields(&self) -> Vec<FieldId> {
        wizard::visible_fields(self.controller.step(), self.controller.values())
    }

    pub fn selected_field_id(&self) -> Option<FieldId> {
        self.visible_fields().get(self.selected_field).copied()
    }

    /// Refresh the edit buffer from the selected field's stored value.
    /// Called whenever selection or step changes.
    pub fn sync_edit_buffer(&mut self) {
        let fields = self.visible_fields();
        if self.selected_field >= fields.len() {
            self.selected_field = fields.len().saturating_sub(1);
        }
        self.edit_buffer = match fields.get(self.selected_field) {
            Some(field) => self.controller.values().get(*field).display(),
            None => String::new(),
        };
    }

    pub fn select_next_field(&mut self) {
        let count = self.visible_fields().len();
        if count > 0 {
            self.selected_field = (self.selected_field + 1) % count;
        }
        self.sync_edit_buffer();
    }

    pub fn select_previous_field(&mut self) {
        let count = self.visible_fields().len();
        if count > 0 {
            self.selected_field = (self.selected_field + count - 1) % count;
        }
        self.sync_edit_buffer();
    }

    /// Whether the selected field takes typed text.
    pub fn selected_field_is_text(&self) -> bool {
        matches!(
            self.selected_field_id().map(|f| f.kind()),
            Some(FieldKind::Text | FieldKind::List)
        )
    }

    /// The next service in cycle order for the service selector, given the
    /// current value. Wraps around.
    pub fn next_service(current: ServiceType, forward: bool) -> ServiceType {
        let all = ServiceType::all();
        let index = all.iter().position(|s| *s == current);
        match (index, forward) {
            (None, _) => if forward { all[0] } else { *all.last().unwrap_or(&all[0]) },
            (Some(i), true) => all[(i + 1) % all.len()],
            (Some(i), false) => all[(i + all.len() - 1) % all.len()],
        }
    }

    pub fn add_success_notification(&mut self, text: impl Into<String>) {
        self.notify(text, NoticeLevel::Success);
    }

    pub fn add_error_notification(&mut self, text: impl Into<String>) {
        self.notify(text, NoticeLevel::Error);
    }

    pub fn add_info_notification(&mut self, text: impl Into<String>) {
        self.notify(text, NoticeLevel::Info);
    }

    fn notify(&mut self, text: impl Into<String>, level: NoticeLevel) {
        self.notification = Some(Notification {
            text: text.into(),
            level,
            shown_at: Instant::now(),
        });
    }

    /// Drop the notification once it has been on screen long enough.
    pub fn expire_notification(&mut self, now: Instant) {
        if let Some(notification) = &self.notification {
            if now.duration_since(notification.shown_at) >= NOTIFICATION_TTL {
                self.notification = None;
            }
        }
    }

    /// A parse or submit is in flight (or queued); the triggering controls
    /// are disabled so stale results can't race newer edits.
    pub fn busy(&self) -> bool {
        self.is_parsing || self.is_submitting || self.pending_async_action.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::FormController;
    use crate::draft::{DraftStore, MemoryStorage};
    use crate::schema::{FieldValue, FormValues};
    use std::time::Duration;

    fn state() -> AppState {
        let drafts = DraftStore::new(Box::new(MemoryStorage::new()));
        AppState::new(FormController::new(drafts, Duration::from_millis(2000)))
    }

    #[test]
    fn test_field_selection_wraps() {
        let mut state = state();
        let count = state.visible_fields().len();
        assert!(count > 0);

        state.select_previous_field();
        assert_eq!(state.selected_field, count - 1);
        state.select_next_field();
        assert_eq!(state.selected_field, 0);
    }

    #[test]
    fn test_edit_buffer_tracks_selection() {
        let mut state = state();
        let now = Instant::now();
        state
            .controller
            .set_field(FieldId::OrgName, FieldValue::Text("Acme".into()), now);
        state.sync_edit_buffer();
        assert_eq!(state.edit_buffer, "Acme");
    }

    #[test]
    fn test_service_cycle_covers_all() {
        let mut service = ServiceType::Unselected;
        let mut seen = Vec::new();
        for _ in 0..3 {
            service = AppState::next_service(service, true);
            seen.push(service);
        }
        assert_eq!(seen, vec![ServiceType::Otp, ServiceType::Vri, ServiceType::Onsite]);
        assert_eq!(AppState::next_service(ServiceType::Otp, false), ServiceType::Onsite);
    }

    #[test]
    fn test_selection_clamps_when_fields_shrink() {
        let mut state = state();
        let now = Instant::now();
        // Move to Appointment with VRI selected: link fields visible
        state
            .controller
            .set_field(FieldId::ServiceType, FieldValue::Text("vri".into()), now);
        state.controller.advance(now);
        state.selected_field = state.visible_fields().len() - 1;

        // Switching service away hides the VRI fields; selection must clamp
        state
            .controller
            .set_field(FieldId::ServiceType, FieldValue::Text("otp".into()), now);
        state.sync_edit_buffer();
        assert!(state.selected_field < state.visible_fields().len());
    }

    #[test]
    fn test_notifications_expire() {
        let mut state = state();
        state.add_success_notification("saved");
        assert!(state.notification.is_some());
        state.expire_notification(Instant::now() + Duration::from_secs(5));
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_defaults_start_clean() {
        let state = state();
        assert_eq!(state.controller.values(), &FormValues::defaults());
        assert!(!state.busy());
        assert!(!state.should_quit);
    }
}
