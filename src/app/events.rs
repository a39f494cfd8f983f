// ABOUTME: Event handling for keyboard input and app actions
// Maps key events to AppEvents per mode, then applies them to AppState

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tracing::debug;

use super::state::{AppState, AsyncAction, RestoreDialog};
use crate::schema::{FieldId, FieldKind, FieldValue};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Quit,
    // Field navigation and editing
    NextField,
    PreviousField,
    InputChar(char),
    Backspace,
    ToggleFlag,
    CycleService { forward: bool },
    // Wizard navigation
    NextStep,
    PreviousStep,
    // Draft actions
    SaveDraft,
    RefreshForm,
    // AI assist
    ToggleAssist,
    AssistInputChar(char),
    AssistBackspace,
    ParseAssist,
    // Submission
    SubmitForm,
    // Restore dialog
    DialogToggle,
    DialogConfirm,
    DialogDismiss,
}

pub struct EventHandler;

impl EventHandler {
    /// Translate a key event in the current mode. Returns `None` for keys
    /// that mean nothing right now.
    pub fn handle_key_event(key: KeyEvent, state: &AppState) -> Option<AppEvent> {
        // Restore dialog captures everything while open
        if state.restore_dialog.is_some() {
            return match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => Some(AppEvent::DialogToggle),
                KeyCode::Enter => Some(AppEvent::DialogConfirm),
                KeyCode::Esc => Some(AppEvent::DialogDismiss),
                _ => None,
            };
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => Some(AppEvent::Quit),
                KeyCode::Char('s') => Some(AppEvent::SaveDraft),
                KeyCode::Char('e') => Some(AppEvent::ToggleAssist),
                KeyCode::Char('r') => Some(AppEvent::RefreshForm),
                KeyCode::Char('n') => Some(AppEvent::NextStep),
                KeyCode::Char('b') => Some(AppEvent::PreviousStep),
                _ => None,
            };
        }

        if state.controller.assist_mode() {
            return match key.code {
                KeyCode::Esc => Some(AppEvent::ToggleAssist),
                KeyCode::Enter => Some(AppEvent::ParseAssist),
                KeyCode::Backspace => Some(AppEvent::AssistBackspace),
                KeyCode::Char(c) => Some(AppEvent::AssistInputChar(c)),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Down | KeyCode::Tab => Some(AppEvent::NextField),
            KeyCode::Up | KeyCode::BackTab => Some(AppEvent::PreviousField),
            KeyCode::Enter => {
                if state.controller.can_submit() {
                    Some(AppEvent::SubmitForm)
                } else {
                    Some(AppEvent::NextField)
                }
            }
            KeyCode::Left => Some(AppEvent::CycleService { forward: false }),
            KeyCode::Right => Some(AppEvent::CycleService { forward: true }),
            KeyCode::Backspace => Some(AppEvent::Backspace),
            KeyCode::Char(' ') => {
                if matches!(state.selected_field_id().map(|f| f.kind()), Some(FieldKind::Flag)) {
                    Some(AppEvent::ToggleFlag)
                } else {
                    Some(AppEvent::InputChar(' '))
                }
            }
            KeyCode::Char(c) => Some(AppEvent::InputChar(c)),
            _ => None,
        }
    }

    /// Apply an event to the state. Async work is queued, not run here.
    pub fn process_event(event: AppEvent, state: &mut AppState) {
        let now = Instant::now();
        match event {
            AppEvent::Quit => {
                // Flush edits still inside the debounce window
                if state.controller.is_dirty() {
                    state.controller.save_now();
                }
                state.should_quit = true;
            }

            AppEvent::NextField => state.select_next_field(),
            AppEvent::PreviousField => state.select_previous_field(),

            AppEvent::InputChar(c) => {
                if state.selected_field_is_text() {
                    state.edit_buffer.push(c);
                    Self::commit_edit_buffer(state, now);
                }
            }
            AppEvent::Backspace => {
                if state.selected_field_is_text() && state.edit_buffer.pop().is_some() {
                    Self::commit_edit_buffer(state, now);
                }
            }
            AppEvent::ToggleFlag => {
                if let Some(field) = state.selected_field_id() {
                    let current = state.controller.values().get(field);
                    if let FieldValue::Flag(current) = current {
                        state.controller.set_field(field, FieldValue::Flag(!current), now);
                        state.sync_edit_buffer();
                    }
                }
            }
            AppEvent::CycleService { forward } => {
                if state.selected_field_id() == Some(FieldId::ServiceType) {
                    let current = state.controller.values().service_type;
                    let next = AppState::next_service(current, forward);
                    state.controller.set_field(
                        FieldId::ServiceType,
                        FieldValue::Text(next.as_wire().to_string()),
                        now,
                    );
                    state.sync_edit_buffer();
                }
            }

            AppEvent::NextStep => {
                state.controller.advance(now);
                state.selected_field = 0;
                state.sync_edit_buffer();
            }
            AppEvent::PreviousStep => {
                state.controller.go_back(now);
                state.selected_field = 0;
                state.sync_edit_buffer();
            }

            AppEvent::SaveDraft => {
                state.controller.save_now();
                state.add_success_notification("Draft saved locally");
            }
            AppEvent::RefreshForm => {
                state.controller.refresh();
                state.selected_field = 0;
                state.validation = None;
                state.assist_error = None;
                state.sync_edit_buffer();
                state.add_info_notification("Form reset - all fields cleared and draft removed");
            }

            AppEvent::ToggleAssist => {
                state.controller.toggle_assist(now);
                state.assist_error = None;
            }
            AppEvent::AssistInputChar(c) => state.assist_input.push(c),
            AppEvent::AssistBackspace => {
                state.assist_input.pop();
            }
            AppEvent::ParseAssist => {
                if state.busy() {
                    debug!("Ignoring parse request while busy");
                } else if state.assist_input.trim().is_empty() {
                    state.assist_error =
                        Some("Paste details so the assistant can parse them.".to_string());
                } else {
                    state.pending_async_action =
                        Some(AsyncAction::ParseAssist(state.assist_input.clone()));
                }
            }

            AppEvent::SubmitForm => {
                if state.busy() {
                    debug!("Ignoring submit request while busy");
                } else if state.controller.can_submit() {
                    state.pending_async_action = Some(AsyncAction::Submit);
                }
            }

            AppEvent::DialogToggle => {
                if let Some(dialog) = &mut state.restore_dialog {
                    dialog.selected_option = !dialog.selected_option;
                }
            }
            AppEvent::DialogConfirm => {
                if let Some(dialog) = state.restore_dialog.take() {
                    if dialog.selected_option {
                        if state.controller.restore_draft() {
                            state.add_success_notification("Draft restored");
                        } else {
                            state.add_error_notification("Saved draft could not be read");
                        }
                    } else {
                        state.controller.discard_draft();
                        state.add_info_notification("Starting fresh");
                    }
                    state.selected_field = 0;
                    state.sync_edit_buffer();
                }
            }
            AppEvent::DialogDismiss => {
                // Keep the draft on disk, start fresh in memory
                state.restore_dialog = None;
                state.sync_edit_buffer();
            }
        }
    }

    fn commit_edit_buffer(state: &mut AppState, now: Instant) {
        if let Some(field) = state.selected_field_id() {
            state
                .controller
                .set_field(field, FieldValue::Text(state.edit_buffer.clone()), now);
            // Editing invalidates previous submit errors for this session
            state.validation = None;
            state.assist_error = None;
        }
    }
}

/// Open the restore prompt with "Resume" preselected.
pub fn open_restore_dialog(state: &mut AppState) {
    state.restore_dialog = Some(RestoreDialog { selected_option: true });
}
