// ABOUTME: TUI application wiring - builds the controller from config and
// drains queued async actions (AI parse, submission) each tick

use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

pub mod events;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use state::{AppState, AsyncAction};

use crate::assist::AssistClient;
use crate::config::AppConfig;
use crate::controller::{FormController, InitOutcome, SubmitOutcome};
use crate::draft::{DraftStore, FileStorage};
use crate::submit::SubmissionClient;

pub struct App {
    pub state: AppState,
    assist: AssistClient,
    submission: SubmissionClient,
}

impl App {
    /// Build the app from loaded config: file-backed draft store, form
    /// controller, AI assist client, submission stub.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let storage_path = config.draft_storage_path()?;
        let drafts = DraftStore::new(Box::new(FileStorage::open(storage_path)));
        let debounce = std::time::Duration::from_millis(config.autosave.debounce_ms);
        let mut controller = FormController::new(drafts, debounce);

        let mut state = match controller.initialize(config.drafts.restore) {
            InitOutcome::Restored => {
                info!("Draft restored on startup");
                let mut state = AppState::new(controller);
                state.add_success_notification("Restored your saved draft");
                state
            }
            InitOutcome::PromptNeeded => {
                let mut state = AppState::new(controller);
                events::open_restore_dialog(&mut state);
                state
            }
            InitOutcome::Fresh => AppState::new(controller),
        };
        state.sync_edit_buffer();

        Ok(Self {
            state,
            assist: AssistClient::new(&config.assist)?,
            submission: SubmissionClient::new(),
        })
    }

    /// Periodic work: autosave polling, notification expiry, and any queued
    /// async action. Called from the main loop on every tick.
    pub async fn tick(&mut self) -> Result<()> {
        let now = Instant::now();
        if self.state.controller.tick(now) {
            info!("Draft autosaved");
        }
        self.state.expire_notification(now);

        if let Some(action) = self.state.pending_async_action.take() {
            match action {
                AsyncAction::ParseAssist(input) => self.run_parse(&input).await,
                AsyncAction::Submit => self.run_submit().await,
            }
        }

        Ok(())
    }

    async fn run_parse(&mut self, input: &str) {
        self.state.is_parsing = true;
        self.state.assist_error = None;

        let result = self.assist.parse(input).await;

        if result.success {
            let applied = self.state.controller.apply_parse(&result, Instant::now());
            self.state.assist_input.clear();
            self.state.selected_field = 0;
            self.state.sync_edit_buffer();
            self.state.add_success_notification(format!(
                "AI assist filled {} field{} - review each page before submitting",
                applied,
                if applied == 1 { "" } else { "s" }
            ));
        } else {
            let message = result
                .first_error()
                .unwrap_or("AI assist could not parse the details.")
                .to_string();
            warn!("AI parse failed: {}", message);
            self.state.assist_error = Some(message);
        }

        self.state.is_parsing = false;
    }

    async fn run_submit(&mut self) {
        self.state.is_submitting = true;

        match self.state.controller.submit(&self.submission).await {
            Ok(SubmitOutcome::Submitted(receipt)) => {
                self.state.validation = None;
                self.state.selected_field = 0;
                self.state.sync_edit_buffer();
                self.state.add_success_notification(format!(
                    "Request submitted! Reference {}. We will follow up with scheduling details.",
                    receipt.reference
                ));
                self.state.last_receipt = Some(receipt);
            }
            Ok(SubmitOutcome::Invalid(errors)) => {
                self.state
                    .add_error_notification(format!("{} field(s) need attention", errors.len()));
                self.state.validation = Some(errors);
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                self.state
                    .add_error_notification("Submission failed. Your draft is preserved.");
            }
        }

        self.state.is_submitting = false;
    }
}
