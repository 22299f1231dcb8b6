use chrono::NaiveDate;

use crate::workflows::scan::{
    ActionSlot, BaselineAnswers, ContactDetails, ScanEngine, ScanRecord,
};

pub(super) fn engine() -> ScanEngine {
    ScanEngine::default()
}

pub(super) fn six_actions() -> Vec<ActionSlot> {
    vec![
        ActionSlot::new("List every customer served in the last 6 months"),
        ActionSlot {
            description: "Write a two-line rebook script".to_string(),
            owner: Some("Dana".to_string()),
            due: Some("2026-03-06".to_string()),
        },
        ActionSlot::new("Add a rebook prompt to the job close-out checklist"),
        ActionSlot::new("Call the ten most recent one-time customers"),
        ActionSlot::new("Set a weekly 20-minute rebook review"),
        ActionSlot::new("Report rebook count in the Friday huddle"),
    ]
}

/// Every retention field answered one step above its worst band.
pub(super) fn retention_baseline() -> BaselineAnswers {
    BaselineAnswers::new()
        .with("ret_pct_revenue_repeat", "21-40%")
        .with("ret_pct_revenue_referrals", "11-20%")
        .with("ret_rebook_scheduling", "Sometimes")
        .with("ret_reviews_per_month", "1-2")
        .with("ret_follow_up_time", "3-7 days")
        .with("ret_check_in_rhythm", "Yes (ad hoc)")
}

/// A worksheet that clears every stop rule.
pub(super) fn retention_record() -> ScanRecord {
    ScanRecord {
        confirmed_pillar: Some("Retention".to_string()),
        quiz_pillar: Some("Retention".to_string()),
        gap_change_reason: None,
        sub_path: Some("Rebook/recall gap".to_string()),
        lever: Some("Rebook/recall system (prompt + script + schedule)".to_string()),
        lever_sentence: Some("Every finished job leaves with the next visit booked.".to_string()),
        baseline: retention_baseline(),
        actions: six_actions(),
        metrics: vec!["Rebook rate (or count)".to_string(), "Reviews/week".to_string()],
        constraints: vec!["Owner is on site most days".to_string()],
        contact: ContactDetails {
            email: Some("dana@northside.example".to_string()),
            first_name: Some("Dana".to_string()),
            business_name: Some("Northside Plumbing".to_string()),
            prepared_on: NaiveDate::from_ymd_opt(2026, 3, 2),
        },
    }
}
