//! Scan worksheet tables: baseline fields per pillar, metric resolution and
//! the sub-path and lever catalogues.
//!
//! Progressions run worst to best. Every table here is read-only and shared
//! across calls.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::super::pillar::Pillar;

#[derive(Debug, PartialEq, Eq)]
pub struct BaselineField {
    pub key: &'static str,
    pub label: &'static str,
    pub progression: &'static [&'static str],
}

impl BaselineField {
    /// Position of `value` in the progression, matched case-insensitively.
    pub fn rank(&self, value: &str) -> Option<usize> {
        let value = value.trim();
        self.progression
            .iter()
            .position(|step| step.eq_ignore_ascii_case(value))
    }

    pub fn best(&self) -> Option<&'static str> {
        self.progression.last().copied()
    }

    pub fn is_worst(&self, value: &str) -> bool {
        self.rank(value) == Some(0)
    }
}

const INBOUND_LEADS: &[&str] = &["0-10", "11-25", "26-50", "51-100", "100+"];
const MONTHLY_COUNTS: &[&str] = &["0", "1-2", "3-5", "6+"];

pub const CONVERSION_FIELDS: &[BaselineField] = &[
    BaselineField {
        key: "conv_inbound_leads",
        label: "Inbound leads per month",
        progression: INBOUND_LEADS,
    },
    BaselineField {
        key: "conv_first_response_time",
        label: "Typical first response time",
        progression: &["3+ days", "1-2 days", "Same day", "<1 hour"],
    },
    BaselineField {
        key: "conv_lead_to_booked",
        label: "Lead to booked %",
        progression: &["0-20%", "21-40%", "41-60%", "61%+"],
    },
    BaselineField {
        key: "conv_booked_to_show",
        label: "Booked to show %",
        progression: &["0-40%", "41-60%", "61-80%", "81%+"],
    },
    BaselineField {
        key: "conv_time_to_first_appt",
        label: "Time to first appointment",
        progression: &["15+ days", "8-14 days", "4-7 days", "1-3 days", "Same day"],
    },
    BaselineField {
        key: "conv_quote_sent_timeline",
        label: "Quote sent timeline",
        progression: &["7+ days", "3-5 days", "48 hours", "Same day"],
    },
    BaselineField {
        key: "conv_quote_to_close",
        label: "Quote to close %",
        progression: &["0-10%", "11-20%", "21-30%", "31-50%", "51%+"],
    },
];

pub const ACQUISITION_FIELDS: &[BaselineField] = &[
    BaselineField {
        key: "acq_inbound_leads",
        label: "Inbound leads per month",
        progression: INBOUND_LEADS,
    },
    BaselineField {
        key: "acq_top_source_dep",
        label: "Top lead source dependence",
        progression: &["1 source", "2 sources", "3-4 sources", "5+ sources"],
    },
    BaselineField {
        key: "acq_pct_from_top_source",
        label: "% of leads from top source",
        progression: &["81%+", "61-80%", "41-60%", "0-40%"],
    },
    BaselineField {
        key: "acq_calls_answered_live",
        label: "Calls answered live",
        progression: &["Rarely", "Sometimes", "Often", "Always"],
    },
    BaselineField {
        key: "acq_website_capture_friction",
        label: "Website lead capture friction",
        progression: &["High", "Medium", "Low"],
    },
    BaselineField {
        key: "acq_reviews_per_month",
        label: "Reviews per month",
        progression: MONTHLY_COUNTS,
    },
    BaselineField {
        key: "acq_referral_intros_per_month",
        label: "Referral intros per month",
        progression: MONTHLY_COUNTS,
    },
];

pub const RETENTION_FIELDS: &[BaselineField] = &[
    BaselineField {
        key: "ret_pct_revenue_repeat",
        label: "% revenue from repeat",
        progression: &["0-20%", "21-40%", "41-60%", "61%+"],
    },
    BaselineField {
        key: "ret_pct_revenue_referrals",
        label: "% revenue from referrals",
        progression: &["0-10%", "11-20%", "21-30%", "31%+"],
    },
    BaselineField {
        key: "ret_rebook_scheduling",
        label: "Rebook/next-step scheduling",
        progression: &["Rarely", "Sometimes", "Often", "Always scheduled"],
    },
    BaselineField {
        key: "ret_reviews_per_month",
        label: "Reviews per month",
        progression: MONTHLY_COUNTS,
    },
    BaselineField {
        key: "ret_follow_up_time",
        label: "Time to follow-up after service",
        progression: &["8+ days", "3-7 days", "1-2 days", "Same day"],
    },
    BaselineField {
        key: "ret_check_in_rhythm",
        label: "Customer check-in rhythm",
        progression: &["No", "Yes (ad hoc)", "Yes (scheduled)"],
    },
];

/// Baseline fields for a pillar, in worksheet order.
pub fn fields_for(pillar: Pillar) -> &'static [BaselineField] {
    match pillar {
        Pillar::Acquisition => ACQUISITION_FIELDS,
        Pillar::Conversion => CONVERSION_FIELDS,
        Pillar::Retention => RETENTION_FIELDS,
    }
}

pub fn field(key: &str) -> Option<&'static BaselineField> {
    Pillar::ALL
        .into_iter()
        .flat_map(fields_for)
        .find(|field| field.key == key)
}

pub fn label_for(key: &str) -> Option<&'static str> {
    field(key).map(|field| field.label)
}

/// Values that mean the business leans on one source of revenue.
pub const HIGH_DEPENDENCE: &[(&str, &[&str])] = &[
    ("acq_top_source_dep", &["1 source", "2 sources"]),
    ("acq_pct_from_top_source", &["61-80%", "81%+"]),
    // No referral engine: repeat business rides entirely on existing clients.
    ("ret_pct_revenue_referrals", &["0-10%"]),
];

pub fn is_high_dependence(key: &str, value: &str) -> bool {
    let value = value.trim();
    HIGH_DEPENDENCE
        .iter()
        .filter(|(field, _)| *field == key)
        .any(|(_, triggers)| triggers.iter().any(|hit| hit.eq_ignore_ascii_case(value)))
}

static DEFAULT_METRIC_FIELDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Median response time", "conv_first_response_time"),
        ("Lead to booked %", "conv_lead_to_booked"),
        ("Show rate %", "conv_booked_to_show"),
        ("Quote sent within 48h %", "conv_quote_sent_timeline"),
        ("Leads/week", "acq_inbound_leads"),
        ("% leads from top source", "acq_pct_from_top_source"),
        ("Calls answered live %", "acq_calls_answered_live"),
        ("Reviews/week", "acq_reviews_per_month"),
        ("Referral intros/week", "acq_referral_intros_per_month"),
        ("Rebook rate (or count)", "ret_rebook_scheduling"),
        ("30-day follow-up completion %", "ret_follow_up_time"),
        ("Repeat revenue band", "ret_pct_revenue_repeat"),
    ])
});

static PILLAR_METRIC_FIELDS: Lazy<HashMap<Pillar, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        HashMap::from([
            (
                Pillar::Acquisition,
                HashMap::from([
                    ("Median response time", "acq_calls_answered_live"),
                    ("Leads/week", "acq_inbound_leads"),
                ]),
            ),
            (
                Pillar::Conversion,
                HashMap::from([("Leads/week", "conv_inbound_leads")]),
            ),
            (
                Pillar::Retention,
                HashMap::from([
                    ("Reviews/week", "ret_reviews_per_month"),
                    ("Referral intros/week", "ret_pct_revenue_referrals"),
                ]),
            ),
        ])
    });

/// Baseline field a scorecard metric reads from: pillar override first, then
/// the shared default.
pub fn resolve_metric(pillar: Pillar, metric: &str) -> Option<&'static str> {
    let metric = metric.trim();
    PILLAR_METRIC_FIELDS
        .get(&pillar)
        .and_then(|overrides| overrides.get(metric))
        .or_else(|| DEFAULT_METRIC_FIELDS.get(metric))
        .copied()
}

pub const MANUAL_OPTION: &str = "Other (manual)";

const CONVERSION_SUB_PATHS: &[&str] = &[
    "Speed-to-lead",
    "Booking friction",
    "Show rate",
    "Quote follow-up / decision drop-off",
    MANUAL_OPTION,
];

const ACQUISITION_SUB_PATHS: &[&str] = &[
    "Channel concentration risk",
    "Demand capture / local visibility",
    "Lead capture friction",
    "Fit mismatch",
    "Referral / partner flow is not intentional",
    MANUAL_OPTION,
];

const RETENTION_SUB_PATHS: &[&str] = &[
    "Rebook/recall gap",
    "Review rhythm gap",
    "Referral ask gap",
    "Post-service follow-up gap",
    MANUAL_OPTION,
];

pub fn sub_paths_for(pillar: Pillar) -> &'static [&'static str] {
    match pillar {
        Pillar::Acquisition => ACQUISITION_SUB_PATHS,
        Pillar::Conversion => CONVERSION_SUB_PATHS,
        Pillar::Retention => RETENTION_SUB_PATHS,
    }
}

const CONVERSION_LEVERS: &[&str] = &[
    "Response ownership + SLA + follow-up sequence",
    "Booking standardization (one path) + confirmations/reminders",
    "Show-rate lift package (what to expect + reminders + prep)",
    "Quote turnaround + after-quote follow-up package",
    MANUAL_OPTION,
];

const ACQUISITION_LEVERS: &[&str] = &[
    "Add a secondary warm channel + weekly cadence",
    "Fix lead capture path (one page, one CTA, one follow-up path)",
    "Call handling + response ownership + SLA",
    "Qualification gate (2-3 questions) to improve fit",
    "Review generation rhythm (simple ask + timing)",
    MANUAL_OPTION,
];

const RETENTION_LEVERS: &[&str] = &[
    "Rebook/recall system (prompt + script + schedule)",
    "Review + referral moment (timing + script + 2-step ask)",
    "Post-service check-in (30-day touch + simple template)",
    "Win-back for dormant clients (light touch sequence)",
    MANUAL_OPTION,
];

pub fn levers_for(pillar: Pillar) -> &'static [&'static str] {
    match pillar {
        Pillar::Acquisition => ACQUISITION_LEVERS,
        Pillar::Conversion => CONVERSION_LEVERS,
        Pillar::Retention => RETENTION_LEVERS,
    }
}

/// Scorecard metrics offered for a pillar on the worksheet.
pub fn metrics_for(pillar: Pillar) -> &'static [&'static str] {
    match pillar {
        Pillar::Acquisition => &[
            "Leads/week",
            "% leads from top source",
            "Calls answered live %",
            "Median response time",
            "Reviews/week",
            "Referral intros/week",
        ],
        Pillar::Conversion => &[
            "Median response time",
            "Lead to booked %",
            "Show rate %",
            "Quote sent within 48h %",
        ],
        Pillar::Retention => &[
            "Rebook rate (or count)",
            "Reviews/week",
            "Referral intros/week",
            "30-day follow-up completion %",
            "Repeat revenue band",
        ],
    }
}
