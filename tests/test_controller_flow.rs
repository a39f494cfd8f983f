// ABOUTME: End-to-end tests for the form controller - draft restore across
// sessions, AI assist merge, and submit lifecycle

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use quoteflow::assist::AiParseResult;
use quoteflow::config::RestorePolicy;
use quoteflow::controller::{FormController, InitOutcome, SubmitOutcome};
use quoteflow::draft::{DraftStore, FileStorage};
use quoteflow::schema::{FieldId, FieldValue, FormValues, ServiceType};
use quoteflow::submit::SubmissionClient;
use quoteflow::wizard::WizardStep;

const DEBOUNCE: Duration = Duration::from_millis(2000);

fn controller_at(dir: &TempDir) -> FormController {
    let storage = FileStorage::open(dir.path().join("drafts.json"));
    FormController::new(DraftStore::new(Box::new(storage)), DEBOUNCE)
}

#[test]
fn test_draft_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let now = Instant::now();

    // First session: fill step 1, advance, choose onsite, "close the tab"
    {
        let mut controller = controller_at(&dir);
        controller.set_field(FieldId::OrgName, FieldValue::Text("Acme".into()), now);
        controller.set_field(FieldId::RequestorName, FieldValue::Text("Bob".into()), now);
        controller.advance(now);
        controller.set_field(FieldId::ServiceType, FieldValue::Text("onsite".into()), now);
        controller.save_now();
    }

    // Second session: restore must land on step 2 with everything intact
    let mut controller = controller_at(&dir);
    assert_eq!(controller.initialize(RestorePolicy::Auto), InitOutcome::Restored);
    assert_eq!(controller.step(), WizardStep::Appointment);
    assert_eq!(controller.values().service_type, ServiceType::Onsite);
    assert_eq!(controller.values().org_name, "Acme");
    assert_eq!(controller.values().requestor_name, "Bob");
}

#[test]
fn test_restore_prompt_policy_defers_to_the_user() {
    let dir = TempDir::new().unwrap();
    let now = Instant::now();

    {
        let mut controller = controller_at(&dir);
        controller.set_field(FieldId::OrgName, FieldValue::Text("Acme".into()), now);
        controller.save_now();
    }

    let mut controller = controller_at(&dir);
    assert_eq!(controller.initialize(RestorePolicy::Prompt), InitOutcome::PromptNeeded);
    // Nothing restored until the user decides
    assert_eq!(controller.values(), &FormValues::defaults());

    assert!(controller.restore_draft());
    assert_eq!(controller.values().org_name, "Acme");
}

#[test]
fn test_restore_never_policy_ignores_draft() {
    let dir = TempDir::new().unwrap();
    let now = Instant::now();

    {
        let mut controller = controller_at(&dir);
        controller.set_field(FieldId::OrgName, FieldValue::Text("Acme".into()), now);
        controller.save_now();
    }

    let mut controller = controller_at(&dir);
    assert_eq!(controller.initialize(RestorePolicy::Never), InitOutcome::Fresh);
    assert_eq!(controller.values(), &FormValues::defaults());
    // Draft is left on disk
    assert!(controller.has_saved_draft());
}

#[test]
fn test_assist_session_survives_a_restart() {
    let dir = TempDir::new().unwrap();
    let now = Instant::now();

    {
        let mut controller = controller_at(&dir);
        controller.toggle_assist(now);
        controller.save_now();
    }

    let mut controller = controller_at(&dir);
    controller.initialize(RestorePolicy::Auto);
    assert!(controller.assist_mode(), "reload mid-assist restores assist mode");
}

#[test]
fn test_stub_backend_parse_fills_the_form() {
    let dir = TempDir::new().unwrap();
    let now = Instant::now();
    let mut controller = controller_at(&dir);
    controller.toggle_assist(now);

    // What the backend returns for "Need Spanish interpreter, onsite,
    // 2025-03-01 14:00 America/New_York"
    let response = AiParseResult {
        success: true,
        fields: json!({
            "serviceType": "onsite",
            "languages": "Spanish",
            "date": "2025-03-01",
            "time": "14:00",
            "timezone": "America/New_York"
        })
        .as_object()
        .unwrap()
        .clone(),
        errors: vec![],
    };

    let applied = controller.apply_parse(&response, now);

    assert_eq!(applied, 5);
    assert_eq!(controller.values().service_type, ServiceType::Onsite);
    assert_eq!(controller.values().languages, vec!["Spanish"]);
    assert_eq!(controller.values().date, "2025-03-01");
    assert_eq!(controller.values().time, "14:00");
    assert_eq!(controller.values().timezone, "America/New_York");
    assert!(!controller.assist_mode(), "assist mode turns off after a successful parse");
    assert_eq!(controller.step(), WizardStep::Basics, "wizard returns to page 1 for review");
}

#[tokio::test]
async fn test_submit_lifecycle_clears_everything() {
    let dir = TempDir::new().unwrap();
    let now = Instant::now();
    let mut controller = controller_at(&dir);

    controller.set_field(FieldId::OrgName, FieldValue::Text("Acme".into()), now);
    controller.set_field(FieldId::RequestorName, FieldValue::Text("Bob".into()), now);
    controller.set_field(FieldId::ServiceType, FieldValue::Text("vri".into()), now);
    controller.save_now();
    assert!(controller.has_saved_draft());

    let outcome = controller.submit(&SubmissionClient::immediate()).await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Submitted(_)));

    // A later session starts clean
    let mut next = controller_at(&dir);
    assert_eq!(next.initialize(RestorePolicy::Auto), InitOutcome::Fresh);
}

#[tokio::test]
async fn test_failed_validation_preserves_draft_on_disk() {
    let dir = TempDir::new().unwrap();
    let now = Instant::now();
    let mut controller = controller_at(&dir);

    controller.set_field(FieldId::RequestorName, FieldValue::Text("Bob".into()), now);
    controller.set_field(FieldId::ServiceType, FieldValue::Text("vri".into()), now);
    controller.save_now();

    let outcome = controller.submit(&SubmissionClient::immediate()).await.unwrap();
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            assert!(errors.message_for(FieldId::OrgName).is_some());
        }
        SubmitOutcome::Submitted(_) => panic!("submit must be rejected"),
    }

    let next = controller_at(&dir);
    assert!(next.has_saved_draft(), "rejected submit must not clear the draft");
}

#[test]
fn test_autosave_fires_once_after_idle_window() {
    let dir = TempDir::new().unwrap();
    let start = Instant::now();
    let mut controller = controller_at(&dir);

    controller.set_field(FieldId::OrgName, FieldValue::Text("A".into()), start);
    controller.set_field(
        FieldId::OrgName,
        FieldValue::Text("Acme".into()),
        start + Duration::from_millis(1000),
    );

    assert!(!controller.tick(start + Duration::from_millis(2999)));
    assert!(controller.tick(start + Duration::from_millis(3000)));
    assert!(!controller.tick(start + Duration::from_millis(9000)));

    let next = controller_at(&dir);
    assert!(next.has_saved_draft());
}
