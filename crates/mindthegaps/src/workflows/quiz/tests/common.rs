use crate::workflows::quiz::questions::{
    CLIENT_TREND, CLOSE_RATE, LEAD_SOURCES, LEAD_VOLUME, LOST_LEAD_REASON, POST_SERVICE_CONTACT,
    QUOTE_FOLLOW_UP, REFERRAL_FREQUENCY, REPEAT_REVENUE, RESPONSE_TIME,
};
use crate::workflows::quiz::{AnswerSet, QuizEngine};

pub(super) fn engine() -> QuizEngine {
    QuizEngine::default()
}

/// Every data question answered with its zero-point option.
pub(super) fn quiet_answers() -> AnswerSet {
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

/// Acquisition 7, Conversion 0, Retention 0 with the fit answer routed to Acquisition.
pub(super) fn acquisition_heavy() -> AnswerSet {
    quiet_answers()
        .with(LEAD_VOLUME, "0-10")
        .with(LEAD_SOURCES, "one source")
        .with(CLIENT_TREND, "shrinking")
        .with(LOST_LEAD_REASON, "not the right fit")
}

/// Acquisition and Retention tied at 4 with both acquisition signals present.
pub(super) fn acquisition_retention_tie() -> AnswerSet {
    quiet_answers()
        .with(LEAD_VOLUME, "0-10")
        .with(LEAD_SOURCES, "one source")
        .with(REPEAT_REVENUE, "under 20%")
        .with(REFERRAL_FREQUENCY, "rarely")
}
