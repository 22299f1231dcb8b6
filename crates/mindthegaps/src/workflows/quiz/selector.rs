use super::super::pillar::Pillar;
use super::content::{cost_of_leak, next_steps, primary_narrative};
use super::domain::{AnswerSet, DiagnosisResult, ScoringResult, SubDiagnosis};
use super::questions::{
    answer_in, BUSINESS_STAGE, CLIENT_TREND, CLOSE_RATE, FOLLOW_UP_OWNER, LEAD_SOURCES,
    LEAD_VOLUME, LOST_LEAD_REASON, MAX_ANSWER_POINTS, POST_SERVICE_CONTACT, QUOTE_FOLLOW_UP,
    REFERRAL_FREQUENCY, REPEAT_REVENUE, RESPONSE_TIME,
};
use super::scoring::contributed_points;

const MAX_KEY_SIGNALS: usize = 2;

type AnswerCheck = fn(&AnswerSet) -> bool;

struct SubDiagnosisRule {
    name: &'static str,
    narrative: &'static str,
    question: &'static str,
    triggered: AnswerCheck,
}

struct KeySignal {
    question: &'static str,
    template: &'static str,
    condition: Option<AnswerCheck>,
}

pub(crate) fn diagnose(scoring: &ScoringResult, answers: &AnswerSet) -> DiagnosisResult {
    let pillar = scoring.primary_gap;
    let key_signals = key_signals(pillar, answers);

    DiagnosisResult {
        primary_gap: pillar,
        narrative: primary_narrative(pillar, scoring.baseline_score),
        sub_diagnosis: select_sub_diagnosis(pillar, answers),
        signal_sentence: signal_sentence(&key_signals),
        key_signals,
        cost_of_leak: cost_of_leak(pillar),
        next_steps: next_steps(pillar),
    }
}

fn select_sub_diagnosis(pillar: Pillar, answers: &AnswerSet) -> Option<SubDiagnosis> {
    let mut triggered: Vec<(&SubDiagnosisRule, u32)> = sub_diagnoses(pillar)
        .iter()
        .filter(|rule| (rule.triggered)(answers))
        .map(|rule| (rule, contributed_points(answers, rule.question)))
        .collect();

    // Stable sort keeps declaration order among equal backing points.
    triggered.sort_by(|(_, left), (_, right)| right.cmp(left));

    triggered.first().map(|(rule, _)| SubDiagnosis {
        name: rule.name,
        narrative: rule.narrative,
        question: rule.question,
    })
}

fn key_signals(pillar: Pillar, answers: &AnswerSet) -> Vec<String> {
    signal_table(pillar)
        .iter()
        .filter(|signal| contributed_points(answers, signal.question) == MAX_ANSWER_POINTS)
        .filter(|signal| signal.condition.map_or(true, |check| check(answers)))
        .take(MAX_KEY_SIGNALS)
        .map(|signal| {
            let answer = answers.get(signal.question).unwrap_or_default();
            signal.template.replace("{answer}", answer)
        })
        .collect()
}

pub(crate) fn signal_sentence(signals: &[String]) -> String {
    match signals {
        [] => String::new(),
        [only] => format!("Based on your answers: {only}."),
        [first, second, ..] => format!("Based on your answers: {first}, and {second}."),
    }
}

fn sub_diagnoses(pillar: Pillar) -> &'static [SubDiagnosisRule] {
    match pillar {
        Pillar::Acquisition => ACQUISITION_SUB_DIAGNOSES,
        Pillar::Conversion => CONVERSION_SUB_DIAGNOSES,
        Pillar::Retention => RETENTION_SUB_DIAGNOSES,
    }
}

fn signal_table(pillar: Pillar) -> &'static [KeySignal] {
    match pillar {
        Pillar::Acquisition => ACQUISITION_SIGNALS,
        Pillar::Conversion => CONVERSION_SIGNALS,
        Pillar::Retention => RETENTION_SIGNALS,
    }
}

const ACQUISITION_SUB_DIAGNOSES: &[SubDiagnosisRule] = &[
    SubDiagnosisRule {
        name: "Channel concentration risk",
        narrative: "Most of your new business arrives through one channel. If it slows down, \
                    the whole pipeline slows with it.",
        question: LEAD_SOURCES,
        triggered: |answers| answers.get(LEAD_SOURCES) == Some("one source"),
    },
    SubDiagnosisRule {
        name: "Demand capture / local visibility",
        narrative: "Too few people who need what you do are finding you at the moment \
                    they're ready to buy.",
        question: LEAD_VOLUME,
        triggered: |answers| answer_in(answers.get(LEAD_VOLUME), &["0-10", "11-25"]),
    },
    SubDiagnosisRule {
        name: "Fit mismatch",
        narrative: "Leads are arriving, but many aren't the customers you're built to serve.",
        question: LOST_LEAD_REASON,
        triggered: |answers| answers.get(LOST_LEAD_REASON) == Some("not the right fit"),
    },
    SubDiagnosisRule {
        name: "Referral / partner flow is not intentional",
        narrative: "Word of mouth happens by accident rather than by design, so it can't \
                    carry growth when the client base stalls.",
        question: CLIENT_TREND,
        triggered: |answers| {
            answer_in(answers.get(CLIENT_TREND), &["flat", "shrinking"])
                && answer_in(answers.get(REFERRAL_FREQUENCY), &["rarely", "sometimes"])
        },
    },
];

const CONVERSION_SUB_DIAGNOSES: &[SubDiagnosisRule] = &[
    SubDiagnosisRule {
        name: "Speed-to-lead",
        narrative: "New inquiries wait too long for a first reply, and the fastest competitor \
                    usually wins the job.",
        question: RESPONSE_TIME,
        triggered: |answers| answer_in(answers.get(RESPONSE_TIME), &["next day", "2+ days"]),
    },
    SubDiagnosisRule {
        name: "Booking friction",
        narrative: "You reply quickly, yet few inquiries turn into booked work. Something \
                    between the first reply and the booking is losing people.",
        question: CLOSE_RATE,
        triggered: |answers| {
            answers.get(RESPONSE_TIME) == Some("same day")
                && answer_in(answers.get(CLOSE_RATE), &["0-2 of 10", "3-5 of 10"])
        },
    },
    SubDiagnosisRule {
        name: "Quote follow-up / decision drop-off",
        narrative: "Quotes go out and then go quiet. Buyers who were undecided drift to \
                    whoever follows up.",
        question: QUOTE_FOLLOW_UP,
        triggered: |answers| {
            answer_in(answers.get(QUOTE_FOLLOW_UP), &["we don't", "once"])
                || answers.get(LOST_LEAD_REASON) == Some("they chose someone cheaper")
        },
    },
];

const RETENTION_SUB_DIAGNOSES: &[SubDiagnosisRule] = &[
    SubDiagnosisRule {
        name: "Rebook/recall gap",
        narrative: "Customers finish a job with no next visit on the calendar, so repeat \
                    revenue depends on them remembering you.",
        question: REPEAT_REVENUE,
        triggered: |answers| answer_in(answers.get(REPEAT_REVENUE), &["under 20%", "20-40%"]),
    },
    SubDiagnosisRule {
        name: "Referral ask gap",
        narrative: "Happy customers aren't being asked to introduce you, so referrals stay \
                    rare.",
        question: REFERRAL_FREQUENCY,
        triggered: |answers| answer_in(answers.get(REFERRAL_FREQUENCY), &["rarely", "sometimes"]),
    },
    SubDiagnosisRule {
        name: "Post-service follow-up gap",
        narrative: "Once the work is done, contact stops. Customers forget you before they \
                    need you again.",
        question: POST_SERVICE_CONTACT,
        triggered: |answers| {
            answer_in(answers.get(POST_SERVICE_CONTACT), &["we don't", "occasionally"])
                || answers.get(BUSINESS_STAGE) == Some("declining")
        },
    },
];

const ACQUISITION_SIGNALS: &[KeySignal] = &[
    KeySignal {
        question: LEAD_VOLUME,
        template: "you're seeing {answer} new leads a month",
        condition: None,
    },
    KeySignal {
        question: LEAD_SOURCES,
        template: "most of your leads come from {answer}",
        condition: None,
    },
    KeySignal {
        question: CLIENT_TREND,
        template: "your client base is {answer}",
        condition: None,
    },
];

const CONVERSION_SIGNALS: &[KeySignal] = &[
    KeySignal {
        question: RESPONSE_TIME,
        template: "first replies to new leads take {answer}",
        condition: None,
    },
    KeySignal {
        question: LOST_LEAD_REASON,
        template: "leads often go quiet after first contact",
        condition: Some(|answers| {
            answers.get(LOST_LEAD_REASON) == Some("they went quiet after first contact")
        }),
    },
    KeySignal {
        question: QUOTE_FOLLOW_UP,
        template: "no one owns follow-up after a quote goes out",
        condition: Some(|answers| answers.get(FOLLOW_UP_OWNER) == Some("nobody in particular")),
    },
    KeySignal {
        question: CLOSE_RATE,
        template: "only {answer} qualified leads become customers",
        condition: None,
    },
];

const RETENTION_SIGNALS: &[KeySignal] = &[
    KeySignal {
        question: REPEAT_REVENUE,
        template: "repeat customers bring in {answer} of revenue",
        condition: None,
    },
    KeySignal {
        question: LOST_LEAD_REASON,
        template: "customers often buy once and never return",
        condition: Some(|answers| {
            answers.get(LOST_LEAD_REASON) == Some("they bought once and never returned")
        }),
    },
    KeySignal {
        question: REFERRAL_FREQUENCY,
        template: "new customers {answer} come from referrals",
        condition: None,
    },
    KeySignal {
        question: POST_SERVICE_CONTACT,
        template: "contact stops once the job is done",
        condition: None,
    },
];
