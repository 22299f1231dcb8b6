//! Quiz question keys and point tables.
//!
//! Keys are the normalized names the form adapter emits. Answer text is matched
//! exactly; anything not listed here scores nothing.

use super::super::pillar::Pillar;

pub const LEAD_VOLUME: &str = "lead_volume";
pub const LEAD_SOURCES: &str = "lead_sources";
pub const CLIENT_TREND: &str = "client_trend";
pub const RESPONSE_TIME: &str = "response_time";
pub const CLOSE_RATE: &str = "close_rate";
pub const QUOTE_FOLLOW_UP: &str = "quote_follow_up";
pub const REPEAT_REVENUE: &str = "repeat_revenue";
pub const REFERRAL_FREQUENCY: &str = "referral_frequency";
pub const POST_SERVICE_CONTACT: &str = "post_service_contact";
pub const LOST_LEAD_REASON: &str = "lost_lead_reason";

pub const FOCUS: &str = "focus";
pub const FOLLOW_UP_OWNER: &str = "follow_up_owner";
pub const BUSINESS_STAGE: &str = "business_stage";

/// Points a single answer can earn; key signals only fire at this value.
pub const MAX_ANSWER_POINTS: u32 = 2;

/// Questions whose answers are numbers about the business, as opposed to the
/// focus, ownership and situational questions.
pub const DATA_QUESTIONS: [&str; 10] = [
    LEAD_VOLUME,
    LEAD_SOURCES,
    CLIENT_TREND,
    RESPONSE_TIME,
    CLOSE_RATE,
    QUOTE_FOLLOW_UP,
    REPEAT_REVENUE,
    REFERRAL_FREQUENCY,
    POST_SERVICE_CONTACT,
    LOST_LEAD_REASON,
];

#[derive(Debug)]
pub struct QuestionRule {
    pub key: &'static str,
    pub pillar: Pillar,
    pub points: &'static [(&'static str, u32)],
}

impl QuestionRule {
    pub fn points_for(&self, answer: Option<&str>) -> u32 {
        answer
            .and_then(|answer| {
                self.points
                    .iter()
                    .find(|(text, _)| *text == answer)
                    .map(|(_, points)| *points)
            })
            .unwrap_or(0)
    }

    pub fn max_points(&self) -> u32 {
        self.points.iter().map(|(_, points)| *points).max().unwrap_or(0)
    }
}

pub const SCORED_QUESTIONS: &[QuestionRule] = &[
    QuestionRule {
        key: LEAD_VOLUME,
        pillar: Pillar::Acquisition,
        points: &[("0-10", 2), ("11-25", 1), ("26-50", 0), ("51+", 0)],
    },
    QuestionRule {
        key: LEAD_SOURCES,
        pillar: Pillar::Acquisition,
        points: &[("one source", 2), ("two sources", 1), ("three or more", 0)],
    },
    QuestionRule {
        key: CLIENT_TREND,
        pillar: Pillar::Acquisition,
        points: &[("shrinking", 2), ("flat", 1), ("growing", 0)],
    },
    QuestionRule {
        key: RESPONSE_TIME,
        pillar: Pillar::Conversion,
        points: &[("2+ days", 2), ("next day", 1), ("same day", 0)],
    },
    QuestionRule {
        key: CLOSE_RATE,
        pillar: Pillar::Conversion,
        points: &[("0-2 of 10", 2), ("3-5 of 10", 1), ("6+ of 10", 0)],
    },
    QuestionRule {
        key: QUOTE_FOLLOW_UP,
        pillar: Pillar::Conversion,
        points: &[("we don't", 2), ("once", 1), ("a set sequence", 0)],
    },
    QuestionRule {
        key: REPEAT_REVENUE,
        pillar: Pillar::Retention,
        points: &[("under 20%", 2), ("20-40%", 1), ("over 40%", 0)],
    },
    QuestionRule {
        key: REFERRAL_FREQUENCY,
        pillar: Pillar::Retention,
        points: &[("rarely", 2), ("sometimes", 1), ("often", 0)],
    },
    QuestionRule {
        key: POST_SERVICE_CONTACT,
        pillar: Pillar::Retention,
        points: &[("we don't", 2), ("occasionally", 1), ("on a schedule", 0)],
    },
];

/// One answer to the routing question: where its points land, if anywhere.
#[derive(Debug)]
pub struct RoutedAnswer {
    pub answer: &'static str,
    pub pillar: Option<Pillar>,
    pub points: u32,
}

pub const ROUTED_ANSWERS: &[RoutedAnswer] = &[
    RoutedAnswer {
        answer: "they went quiet after first contact",
        pillar: Some(Pillar::Conversion),
        points: 2,
    },
    RoutedAnswer {
        answer: "they chose someone cheaper",
        pillar: Some(Pillar::Conversion),
        points: 1,
    },
    RoutedAnswer {
        answer: "not the right fit",
        pillar: Some(Pillar::Acquisition),
        points: 1,
    },
    RoutedAnswer {
        answer: "they bought once and never returned",
        pillar: Some(Pillar::Retention),
        points: 2,
    },
    RoutedAnswer {
        answer: "not sure",
        pillar: None,
        points: 0,
    },
];

pub fn routed_answer(answer: Option<&str>) -> Option<&'static RoutedAnswer> {
    let answer = answer?;
    ROUTED_ANSWERS.iter().find(|routed| routed.answer == answer)
}

/// Points a pillar can reach before the routing question is considered.
pub fn base_max_points(pillar: Pillar) -> u32 {
    SCORED_QUESTIONS
        .iter()
        .filter(|rule| rule.pillar == pillar)
        .map(QuestionRule::max_points)
        .sum()
}

pub fn question_rule(key: &str) -> Option<&'static QuestionRule> {
    SCORED_QUESTIONS.iter().find(|rule| rule.key == key)
}

pub const FOCUS_MAP: &[(&str, Pillar)] = &[
    ("more leads", Pillar::Acquisition),
    ("turning leads into customers", Pillar::Conversion),
    ("keeping customers coming back", Pillar::Retention),
];

pub fn focus_pillar(answer: Option<&str>) -> Option<Pillar> {
    let answer = answer?;
    FOCUS_MAP
        .iter()
        .find(|(text, _)| *text == answer)
        .map(|(_, pillar)| *pillar)
}

// Tie-break signal subsets.
pub const SLOW_RESPONSE: &[&str] = &["2+ days", "next day"];
pub const LOW_CLOSE_RATE: &[&str] = &["0-2 of 10"];
pub const LOW_LEAD_VOLUME: &[&str] = &["0-10", "11-25"];
pub const CONCENTRATED_SOURCES: &[&str] = &["one source"];
pub const LOW_REPEAT_REVENUE: &[&str] = &["under 20%"];
pub const WEAK_POST_SERVICE: &[&str] = &["we don't", "occasionally"];

pub(crate) fn answer_in(answer: Option<&str>, subset: &[&str]) -> bool {
    matches!(answer, Some(answer) if subset.contains(&answer))
}
