use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::super::pillar::{non_blank, Pillar};
use super::super::InputError;

/// Quiz answers keyed by normalized question key.
///
/// Absent answers are simply not present; JSON `null` values are dropped on
/// the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Option<String>>")]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, question: impl Into<String>, answer: impl Into<String>) -> Self {
        self.insert(question, answer);
        self
    }

    pub fn insert(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.0.insert(question.into(), answer.into());
    }

    pub fn remove(&mut self, question: &str) -> Option<String> {
        self.0.remove(question)
    }

    /// Raw answer text, exactly as submitted.
    pub fn get(&self, question: &str) -> Option<&str> {
        self.0.get(question).map(String::as_str)
    }

    /// Answer text when it is present and non-blank.
    pub fn provided(&self, question: &str) -> Option<&str> {
        non_blank(self.get(question))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lenient conversion from an adapter payload.
    ///
    /// Strings are kept verbatim, numbers and booleans are stringified, and
    /// `null`, arrays and nested objects are treated as unanswered.
    pub fn from_value(value: &Value) -> Result<Self, InputError> {
        let map = match value {
            Value::Null => return Err(InputError::Missing { what: "answer set" }),
            Value::Object(map) => map,
            _ => return Err(InputError::NotAnObject { what: "answer set" }),
        };

        let answers = map
            .iter()
            .filter_map(|(question, answer)| {
                let text = match answer {
                    Value::String(text) => text.clone(),
                    Value::Number(number) => number.to_string(),
                    Value::Bool(flag) => flag.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((question.clone(), text))
            })
            .collect();

        Ok(Self(answers))
    }
}

impl From<BTreeMap<String, Option<String>>> for AnswerSet {
    fn from(raw: BTreeMap<String, Option<String>>) -> Self {
        Self(
            raw.into_iter()
                .filter_map(|(question, answer)| answer.map(|answer| (question, answer)))
                .collect(),
        )
    }
}

impl<Q: Into<String>, A: Into<String>> FromIterator<(Q, A)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (Q, A)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(question, answer)| (question.into(), answer.into()))
                .collect(),
        )
    }
}

/// Per-pillar point tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarPoints {
    pub acquisition: u32,
    pub conversion: u32,
    pub retention: u32,
}

impl PillarPoints {
    pub fn get(&self, pillar: Pillar) -> u32 {
        match pillar {
            Pillar::Acquisition => self.acquisition,
            Pillar::Conversion => self.conversion,
            Pillar::Retention => self.retention,
        }
    }

    pub fn add(&mut self, pillar: Pillar, points: u32) {
        match pillar {
            Pillar::Acquisition => self.acquisition += points,
            Pillar::Conversion => self.conversion += points,
            Pillar::Retention => self.retention += points,
        }
    }

    /// Pillars sharing the highest total, in alphabetical order.
    pub fn leaders(&self) -> Vec<Pillar> {
        let top = Pillar::ALL
            .iter()
            .map(|pillar| self.get(*pillar))
            .max()
            .unwrap_or(0);
        Pillar::ALL
            .into_iter()
            .filter(|pillar| self.get(*pillar) == top)
            .collect()
    }
}

/// Where the routing question sent its points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingOutcome {
    pub answer: Option<String>,
    pub pillar: Option<Pillar>,
    pub points: u32,
}

/// Tie-break rules in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakRule {
    ConversionSignals,
    AcquisitionSignals,
    RetentionSignals,
    SelfReportedFocus,
    Alphabetical,
}

impl TieBreakRule {
    pub const fn label(self) -> &'static str {
        match self {
            TieBreakRule::ConversionSignals => "conversion_signals",
            TieBreakRule::AcquisitionSignals => "acquisition_signals",
            TieBreakRule::RetentionSignals => "retention_signals",
            TieBreakRule::SelfReportedFocus => "self_reported_focus",
            TieBreakRule::Alphabetical => "alphabetical",
        }
    }
}

/// Output of the score engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub totals: PillarPoints,
    pub primary_gap: Pillar,
    /// `round(100 * totals[primary_gap] / max_possible[primary_gap])`, 0 when the max is 0.
    pub baseline_score: u8,
    pub tie_break_used: Option<TieBreakRule>,
    pub routing: RoutingOutcome,
    pub max_possible: PillarPoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubDiagnosis {
    pub name: &'static str,
    pub narrative: &'static str,
    pub question: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostOfLeak {
    pub narrative: &'static str,
    pub advice: &'static str,
}

/// Human-readable diagnosis assembled from a scoring result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosisResult {
    pub primary_gap: Pillar,
    pub narrative: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_diagnosis: Option<SubDiagnosis>,
    pub key_signals: Vec<String>,
    pub signal_sentence: String,
    pub cost_of_leak: CostOfLeak,
    pub next_steps: [&'static str; 2],
}

/// Eligibility checks in the order their reasons are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityCheck {
    Numbers,
    Demand,
    Clarity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCheck {
    pub check: EligibilityCheck,
    pub reason: &'static str,
    pub advice: &'static str,
}

/// Whether the paid scan should be offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<&'static str>,
    pub failed_checks: Vec<FailedCheck>,
}

impl EligibilityResult {
    pub(crate) fn from_failures(failed_checks: Vec<FailedCheck>) -> Self {
        let primary = failed_checks.first();
        Self {
            eligible: failed_checks.is_empty(),
            reason: primary.map(|failed| failed.reason),
            advice: primary.map(|failed| failed.advice),
            failed_checks,
        }
    }

    pub fn all_reasons(&self) -> Vec<&'static str> {
        self.failed_checks.iter().map(|failed| failed.reason).collect()
    }
}
