use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::super::pillar::{is_answered, non_blank, Pillar};
use super::super::InputError;

/// Slots every plan carries in its action table.
pub const ACTION_SLOTS: usize = 6;

/// Consultant worksheet for the paid scan, keyed by normalized field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanRecord {
    pub confirmed_pillar: Option<String>,
    pub quiz_pillar: Option<String>,
    pub gap_change_reason: Option<String>,
    pub sub_path: Option<String>,
    pub lever: Option<String>,
    pub lever_sentence: Option<String>,
    pub baseline: BaselineAnswers,
    #[serde(deserialize_with = "null_as_empty")]
    pub actions: Vec<ActionSlot>,
    #[serde(deserialize_with = "present_strings")]
    pub metrics: Vec<String>,
    #[serde(deserialize_with = "present_strings")]
    pub constraints: Vec<String>,
    pub contact: ContactDetails,
}

impl ScanRecord {
    pub fn from_value(value: &Value) -> Result<Self, InputError> {
        match value {
            Value::Null => Err(InputError::Missing {
                what: "scan record",
            }),
            Value::Object(_) => {
                serde_json::from_value(value.clone()).map_err(|source| InputError::Malformed {
                    what: "scan record",
                    source,
                })
            }
            _ => Err(InputError::NotAnObject {
                what: "scan record",
            }),
        }
    }

    /// Confirmed pillar, if it names one of the three pillars.
    pub fn confirmed(&self) -> Option<Pillar> {
        self.confirmed_pillar.as_deref().and_then(Pillar::parse)
    }

    pub fn filled_actions(&self) -> usize {
        self.actions.iter().filter(|slot| slot.is_filled()).count()
    }

    /// Non-blank metric names, trimmed, in submission order.
    pub fn selected_metrics(&self) -> impl Iterator<Item = &str> {
        self.metrics
            .iter()
            .filter_map(|metric| non_blank(Some(metric.as_str())))
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Worksheet lists with `null` slots for the options left unpicked.
fn present_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let slots: Vec<Option<String>> = null_as_empty(deserializer)?;
    Ok(slots.into_iter().flatten().collect())
}

/// Baseline worksheet answers keyed by field key.
///
/// Form adapters send counts such as `0` reviews as JSON numbers; scalars are
/// kept as text and anything else is treated as unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<BTreeMap<String, BaselineInput>>")]
pub struct BaselineAnswers(BTreeMap<String, String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum BaselineInput {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    Unanswered(IgnoredAny),
}

impl BaselineInput {
    fn into_text(self) -> Option<String> {
        match self {
            BaselineInput::Text(text) => Some(text),
            BaselineInput::Number(number) => Some(number.to_string()),
            BaselineInput::Flag(flag) => Some(flag.to_string()),
            BaselineInput::Unanswered(_) => None,
        }
    }
}

impl BaselineAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Trimmed value when present, non-blank and not "Not sure".
    pub fn answered(&self, field: &str) -> Option<&str> {
        let value = self.get(field);
        if is_answered(value) {
            non_blank(value)
        } else {
            None
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, InputError> {
        let map = match value {
            Value::Null => {
                return Err(InputError::Missing {
                    what: "baseline answers",
                })
            }
            Value::Object(map) => map,
            _ => {
                return Err(InputError::NotAnObject {
                    what: "baseline answers",
                })
            }
        };
        Ok(Self(
            map.iter()
                .filter_map(|(field, value)| {
                    let text = match value {
                        Value::String(text) => text.clone(),
                        Value::Number(number) => number.to_string(),
                        Value::Bool(flag) => flag.to_string(),
                        _ => return None,
                    };
                    Some((field.clone(), text))
                })
                .collect(),
        ))
    }
}

impl From<Option<BTreeMap<String, BaselineInput>>> for BaselineAnswers {
    fn from(raw: Option<BTreeMap<String, BaselineInput>>) -> Self {
        Self(
            raw.unwrap_or_default()
                .into_iter()
                .filter_map(|(field, value)| Some((field, value.into_text()?)))
                .collect(),
        )
    }
}

impl<F: Into<String>, V: Into<String>> FromIterator<(F, V)> for BaselineAnswers {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

/// One of the six 30-day actions.
///
/// Accepts either a bare description string or a `{description, owner, due}`
/// object; `null` becomes an empty slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ActionInput")]
pub struct ActionSlot {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
}

impl ActionSlot {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            owner: None,
            due: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ActionInput {
    Text(String),
    Detailed {
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        owner: Option<String>,
        #[serde(default)]
        due: Option<String>,
    },
    Blank(()),
}

impl From<ActionInput> for ActionSlot {
    fn from(input: ActionInput) -> Self {
        match input {
            ActionInput::Text(description) => ActionSlot::new(description),
            ActionInput::Detailed {
                description,
                owner,
                due,
            } => ActionSlot {
                description: description.unwrap_or_default(),
                owner,
                due,
            },
            ActionInput::Blank(()) => ActionSlot::default(),
        }
    }
}

/// Submitter details; only used to personalize plan wording.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub business_name: Option<String>,
    pub prepared_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopRuleId {
    SubPathUncertain,
    SubPathOther,
    GapChangeUnjustified,
    MissingFields,
    InvalidRecord,
}

impl StopRuleId {
    pub const fn label(self) -> &'static str {
        match self {
            StopRuleId::SubPathUncertain => "sub_path_uncertain",
            StopRuleId::SubPathOther => "sub_path_other",
            StopRuleId::GapChangeUnjustified => "gap_change_unjustified",
            StopRuleId::MissingFields => "missing_fields",
            StopRuleId::InvalidRecord => "invalid_record",
        }
    }
}

/// Structured side of one stop reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopDetail {
    pub rule: StopRuleId,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StopFailure {
    pub(crate) reason: String,
    pub(crate) detail: StopDetail,
}

impl StopFailure {
    pub(crate) fn new(rule: StopRuleId, reason: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            reason: reason.into(),
            detail: StopDetail { rule, items },
        }
    }
}

/// Outcome of the stop-rule gate. `reasons[i]` always describes `details[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopResult {
    pub stopped: bool,
    pub reasons: Vec<String>,
    pub details: Vec<StopDetail>,
}

impl StopResult {
    pub(crate) fn from_failures(failures: Vec<StopFailure>) -> Self {
        let (reasons, details): (Vec<_>, Vec<_>) = failures
            .into_iter()
            .map(|failure| (failure.reason, failure.detail))
            .unzip();
        Self {
            stopped: !reasons.is_empty(),
            reasons,
            details,
        }
    }

    pub fn rules(&self) -> Vec<StopRuleId> {
        self.details.iter().map(|detail| detail.rule).collect()
    }

    pub fn fired(&self, rule: StopRuleId) -> bool {
        self.details.iter().any(|detail| detail.rule == rule)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceGrade {
    High,
    Med,
    Low,
}

impl ConfidenceGrade {
    pub const fn label(self) -> &'static str {
        match self {
            ConfidenceGrade::High => "High",
            ConfidenceGrade::Med => "Med",
            ConfidenceGrade::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfidenceResult {
    pub grade: ConfidenceGrade,
    /// Fields missing, blank or "Not sure".
    pub missing_count: usize,
    pub total_fields: usize,
    pub include_constraints: bool,
    pub include_data_gaps: bool,
}

/// Everything the document renderer needs for one 30-day plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanContent {
    pub pillar: Pillar,
    pub found_summary: FoundSummary,
    pub baseline_table: Vec<BaselineRow>,
    pub lever: LeverSection,
    pub actions: Vec<ActionSlot>,
    pub scorecard: Vec<ScorecardRow>,
    pub constraints_and_gaps: ConstraintsAndGaps,
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundSummary {
    pub greeting: String,
    pub headline: String,
    pub sub_path: String,
    pub confidence: ConfidenceGrade,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaselineRow {
    pub field: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeverSection {
    pub name: String,
    pub sentence: String,
    pub done_looks_like: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorecardRow {
    pub metric: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
    pub current: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintsAndGaps {
    /// Whether the renderer shows this section at all.
    pub shown: bool,
    pub constraints: Vec<String>,
    /// Shown without a single constraint; Med and Low plans need one.
    pub constraints_missing: bool,
    pub data_gaps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightPattern {
    SignalToAction,
    RiskCallout,
    StabilityTarget,
}

/// Plan section an insight is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSection {
    Lever,
    ConstraintsAndGaps,
    Scorecard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub pattern: InsightPattern,
    pub section: PlanSection,
    pub text: String,
}
