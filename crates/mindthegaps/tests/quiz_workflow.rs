use mindthegaps::workflows::quiz::questions::{
    CLIENT_TREND, CLOSE_RATE, LEAD_SOURCES, LEAD_VOLUME, LOST_LEAD_REASON, POST_SERVICE_CONTACT,
    QUOTE_FOLLOW_UP, REFERRAL_FREQUENCY, REPEAT_REVENUE, RESPONSE_TIME,
};
use mindthegaps::workflows::quiz::{AnswerSet, QuizEngine, TieBreakRule};
use mindthegaps::workflows::Pillar;
use serde_json::json;

fn calm_business() -> AnswerSet {
    AnswerSet::new()
        .with(LEAD_VOLUME, "26-50")
        .with(LEAD_SOURCES, "three or more")
        .with(CLIENT_TREND, "growing")
        .with(RESPONSE_TIME, "same day")
        .with(CLOSE_RATE, "6+ of 10")
        .with(QUOTE_FOLLOW_UP, "a set sequence")
        .with(REPEAT_REVENUE, "over 40%")
        .with(REFERRAL_FREQUENCY, "often")
        .with(POST_SERVICE_CONTACT, "on a schedule")
        .with(LOST_LEAD_REASON, "not sure")
}

#[test]
fn acquisition_heavy_quiz_runs_end_to_end() {
    let answers = calm_business()
        .with(LEAD_VOLUME, "0-10")
        .with(LEAD_SOURCES, "one source")
        .with(CLIENT_TREND, "shrinking")
        .with(LOST_LEAD_REASON, "not the right fit");

    let outcome = QuizEngine::default().run(&answers);

    assert_eq!(outcome.scoring.primary_gap, Pillar::Acquisition);
    assert_eq!(outcome.scoring.baseline_score, 100);
    assert_eq!(outcome.scoring.tie_break_used, None);
    assert!(outcome.eligibility.eligible);
    assert_eq!(
        outcome.diagnosis.sub_diagnosis.as_ref().map(|sub| sub.name),
        Some("Channel concentration risk")
    );
}

#[test]
fn tied_quiz_records_the_rule_that_decided_it() {
    let answers = calm_business()
        .with(LEAD_VOLUME, "0-10")
        .with(LEAD_SOURCES, "one source")
        .with(REPEAT_REVENUE, "under 20%")
        .with(REFERRAL_FREQUENCY, "rarely");

    let outcome = QuizEngine::default().run(&answers);

    assert_eq!(outcome.scoring.primary_gap, Pillar::Acquisition);
    assert_eq!(
        outcome.scoring.tie_break_used,
        Some(TieBreakRule::AcquisitionSignals)
    );
}

#[test]
fn outcome_serializes_for_adapters() {
    let outcome = QuizEngine::default()
        .run_value(&json!({
            "lead_volume": "0-10",
            "response_time": "2+ days",
            "close_rate": "0-2 of 10"
        }))
        .expect("object accepted");

    let value = serde_json::to_value(&outcome).expect("serializable");

    assert_eq!(value["scoring"]["primary_gap"], "Conversion");
    assert_eq!(value["scoring"]["totals"]["conversion"], 4);
    assert_eq!(value["eligibility"]["eligible"], false);
    assert_eq!(value["eligibility"]["failed_checks"][0]["check"], "numbers");
    assert_eq!(
        value["diagnosis"]["signal_sentence"],
        "Based on your answers: first replies to new leads take 2+ days, and only 0-2 of 10 \
         qualified leads become customers."
    );
}
