use super::common::*;
use serde_json::json;
use std::sync::Arc;

use crate::workflows::intake::ports::{
    ARTIFACT_KEY, BASELINE_SCORE, CONFIDENCE, PLAN_READY, PRIMARY_GAP, SCAN_STATUS, SCAN_STOPPED,
    STOP_REASONS, SUB_DIAGNOSIS,
};
use crate::workflows::intake::{GapScanService, QuizSubmission, ServiceError};
use crate::workflows::scan::{ScanOutcome, StopRuleId};
use crate::workflows::{EngineThresholds, InputError, Pillar};

#[test]
fn diagnose_records_the_contact_under_a_normalized_email() {
    let (service, contacts, _, _) = build_service();

    let outcome = service
        .diagnose_value(&quiz_payload())
        .expect("payload accepted");

    assert_eq!(outcome.scoring.primary_gap, Pillar::Acquisition);
    let updates = contacts.updates();
    assert_eq!(updates.len(), 1);
    let update = &updates[0];
    assert_eq!(update.email, "dana@northside.example");
    assert_eq!(update.fields[PRIMARY_GAP], "Acquisition");
    assert_eq!(update.fields[BASELINE_SCORE], "100");
    assert_eq!(update.fields[SUB_DIAGNOSIS], "Channel concentration risk");
}

#[test]
fn anonymous_quiz_skips_the_contact_store() {
    let (service, contacts, _, _) = build_service();
    let submission = QuizSubmission {
        email: Some("   ".to_string()),
        answers: Default::default(),
    };

    let outcome = service.diagnose(&submission);

    assert!(!outcome.eligibility.eligible);
    assert!(contacts.updates().is_empty());
}

#[test]
fn quiz_payload_must_carry_an_answer_object() {
    let (service, _, _, _) = build_service();

    let missing = service.diagnose_value(&json!({"email": "a@b.example"}));
    assert!(matches!(
        missing,
        Err(ServiceError::Input(InputError::Missing { what: "answer set" }))
    ));

    let listed = service.diagnose_value(&json!({"answers": ["0-10"]}));
    assert!(matches!(
        listed,
        Err(ServiceError::Input(InputError::NotAnObject { what: "answer set" }))
    ));
}

#[test]
fn ready_plan_is_stored_recorded_and_announced() {
    let (service, contacts, artifacts, notifier) = build_service();

    let receipt = service
        .plan_value(&scan_payload())
        .expect("payload accepted");

    assert!(matches!(receipt.outcome, ScanOutcome::Ready { .. }));
    let key = receipt.artifact_key.expect("plan stored");
    assert_eq!(artifacts.keys(), vec![key.clone()]);
    assert!(key.starts_with("plans/retention-dana@northside.example"));

    let updates = contacts.updates();
    assert_eq!(updates[0].fields[SCAN_STATUS], "plan_ready");
    assert_eq!(updates[0].fields[CONFIDENCE], "High");
    assert_eq!(updates[0].fields[ARTIFACT_KEY], key);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].template, PLAN_READY);
    assert_eq!(sent[0].details[ARTIFACT_KEY], key);
}

#[test]
fn stopped_scan_is_recorded_and_announced_without_a_plan() {
    let (service, contacts, artifacts, notifier) = build_service();
    let mut payload = scan_payload();
    payload["sub_path"] = json!("Other (manual)");

    let receipt = service.plan_value(&payload).expect("payload accepted");

    assert!(receipt.artifact_key.is_none());
    assert_eq!(receipt.outcome.stop().rules(), vec![StopRuleId::SubPathOther]);
    assert!(artifacts.keys().is_empty());
    assert_eq!(contacts.updates()[0].fields[SCAN_STATUS], "stopped");

    let sent = notifier.sent();
    assert_eq!(sent[0].template, SCAN_STOPPED);
    assert_eq!(sent[0].details[STOP_REASONS], receipt.outcome.stop().reasons[0]);
}

#[test]
fn collaborator_outages_do_not_change_the_outcome() {
    let service = GapScanService::new(
        Arc::new(DownContacts),
        Arc::new(DownArtifacts),
        Arc::new(DownNotifier),
        EngineThresholds::default(),
    );

    let quiz = service
        .diagnose_value(&quiz_payload())
        .expect("payload accepted");
    assert_eq!(quiz.scoring.primary_gap, Pillar::Acquisition);

    let receipt = service
        .plan_value(&scan_payload())
        .expect("payload accepted");
    assert!(receipt.outcome.plan().is_some());
    assert!(receipt.artifact_key.is_none());
}

#[test]
fn scan_payload_must_be_an_object() {
    let (service, _, _, notifier) = build_service();

    let result = service.plan_value(&json!("Retention"));

    assert!(matches!(
        result,
        Err(ServiceError::Input(InputError::NotAnObject { .. }))
    ));
    assert!(notifier.sent().is_empty());
}
