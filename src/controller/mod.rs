// ABOUTME: Form controller - top-level orchestration of schema, wizard,
// draft store, and AI assist merge for one editing session

use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod autosave;

pub use autosave::Debouncer;

use crate::assist::{coerce_fields, AiParseResult};
use crate::config::RestorePolicy;
use crate::draft::DraftStore;
use crate::schema::{validate, FieldId, FieldValue, FormValues, ValidationErrors};
use crate::submit::{SubmissionClient, SubmissionReceipt};
use crate::wizard::{WizardPosition, WizardStep};

/// What `initialize` decided about an existing draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// No draft, or policy says ignore it - starting from defaults
    Fresh,
    /// Draft restored silently
    Restored,
    /// A draft exists and the user must choose restore-vs-discard
    PromptNeeded,
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; the draft is kept and the errors map to fields
    Invalid(ValidationErrors),
    /// Accepted by the quote desk; state has been reset
    Submitted(SubmissionReceipt),
}

/// Owns the form values, wizard position, and AI-assist flag for one
/// editing session. All mutation funnels through `set_field` and the
/// declared transitions; view code never touches the state directly.
pub struct FormController {
    values: FormValues,
    position: WizardPosition,
    assist_mode: bool,
    drafts: DraftStore,
    autosave: Debouncer,
    dirty: bool,
}

impl FormController {
    pub fn new(drafts: DraftStore, debounce: Duration) -> Self {
        Self {
            values: FormValues::defaults(),
            position: WizardPosition::new(),
            assist_mode: false,
            drafts,
            autosave: Debouncer::new(debounce),
            dirty: false,
        }
    }

    /// Startup: decide what to do about a persisted draft.
    pub fn initialize(&mut self, policy: RestorePolicy) -> InitOutcome {
        if !self.drafts.has_draft() {
            return InitOutcome::Fresh;
        }
        match policy {
            RestorePolicy::Never => InitOutcome::Fresh,
            RestorePolicy::Prompt => InitOutcome::PromptNeeded,
            RestorePolicy::Auto => {
                if self.restore_draft() {
                    InitOutcome::Restored
                } else {
                    InitOutcome::Fresh
                }
            }
        }
    }

    /// Adopt the most recent draft. Fields the draft predates keep their
    /// defaults (the snapshot deserializer merges over defaults), so a
    /// draft from an older build restores instead of crashing.
    pub fn restore_draft(&mut self) -> bool {
        let Some(snapshot) = self.drafts.load() else {
            return false;
        };
        info!(
            "Restoring draft from {} (page {})",
            snapshot.updated_at, snapshot.current_page
        );
        self.values = snapshot.values;
        self.position.goto(snapshot.current_page);
        self.assist_mode = snapshot.ai_assist_mode;
        self.dirty = false;
        true
    }

    /// Throw away the persisted draft but keep in-memory state.
    pub fn discard_draft(&mut self) {
        self.drafts.clear();
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn step(&self) -> WizardStep {
        self.position.step()
    }

    pub fn assist_mode(&self) -> bool {
        self.assist_mode
    }

    pub fn has_saved_draft(&self) -> bool {
        self.drafts.has_draft()
    }

    /// Mutations since the last save (or since startup).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The single mutation entrypoint. Both the wizard UI and the AI merge
    /// go through here; every call re-arms the autosave window.
    pub fn set_field(&mut self, field: FieldId, value: FieldValue, now: Instant) {
        self.values.set(field, value);
        self.mark_dirty(now);
    }

    pub fn advance(&mut self, now: Instant) {
        self.position.advance();
        self.mark_dirty(now);
    }

    pub fn go_back(&mut self, now: Instant) {
        self.position.go_back();
        self.mark_dirty(now);
    }

    /// Flip AI assist mode. The flag rides along in the draft snapshot so a
    /// restart mid-assist-session comes back in the same mode.
    pub fn toggle_assist(&mut self, now: Instant) {
        self.assist_mode = !self.assist_mode;
        self.mark_dirty(now);
    }

    /// Merge a parse result into the form. Only successful results apply;
    /// afterwards assist mode ends and the wizard returns to the first page
    /// so the user reviews everything. Returns how many fields were set.
    pub fn apply_parse(&mut self, result: &AiParseResult, now: Instant) -> usize {
        if !result.success {
            return 0;
        }
        let assignments = coerce_fields(&result.fields);
        let applied = assignments.len();
        for (field, value) in assignments {
            self.set_field(field, value, now);
        }
        self.assist_mode = false;
        self.position.goto(1);
        if applied > 0 {
            self.mark_dirty(now);
        }
        debug!("AI assist applied {} fields", applied);
        applied
    }

    /// Poll the autosave debouncer. Returns true when a save fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.autosave.fire_due(now) && self.dirty {
            self.persist();
            return true;
        }
        false
    }

    /// Manual "Save draft": bypasses the debounce and saves immediately.
    pub fn save_now(&mut self) {
        self.persist();
        self.autosave.cancel();
    }

    /// Submit is only offered on the final step and never mid-assist.
    pub fn can_submit(&self) -> bool {
        self.step().is_final() && !self.assist_mode
    }

    /// Validate and hand off to the quote desk. Invalid forms keep their
    /// draft; accepted ones clear it and reset the session.
    pub async fn submit(&mut self, client: &SubmissionClient) -> anyhow::Result<SubmitOutcome> {
        let errors = validate(&self.values);
        if !errors.is_valid() {
            debug!("Submit blocked by {} validation errors", errors.len());
            return Ok(SubmitOutcome::Invalid(errors));
        }

        let receipt = client.submit(&self.values).await?;

        self.drafts.clear();
        self.reset_session();
        Ok(SubmitOutcome::Submitted(receipt))
    }

    /// Explicit user reset: drop memory and the persisted draft, back to
    /// step 1. Always available, always clears.
    pub fn refresh(&mut self) {
        self.drafts.clear();
        self.reset_session();
        info!("Form reset - fields cleared and draft removed");
    }

    fn reset_session(&mut self) {
        self.values = FormValues::defaults();
        self.position = WizardPosition::new();
        self.assist_mode = false;
        self.autosave.cancel();
        self.dirty = false;
    }

    fn mark_dirty(&mut self, now: Instant) {
        self.dirty = true;
        self.autosave.touch(now);
    }

    fn persist(&mut self) {
        self.drafts.save(&self.values, self.step().number(), self.assist_mode);
        self.dirty = false;
    }
}
