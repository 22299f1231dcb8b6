use super::super::cascade::{CollectAll, Rule};
use super::super::pillar::{is_uncertain, non_blank, Pillar};
use super::super::thresholds::EngineThresholds;
use super::baseline::fields_for;
use super::domain::{ScanRecord, StopFailure, StopResult, StopRuleId, ACTION_SLOTS};

struct StopContext<'a> {
    record: &'a ScanRecord,
    pillar: Option<Pillar>,
    thresholds: &'a EngineThresholds,
}

pub(crate) fn evaluate(record: &ScanRecord, thresholds: &EngineThresholds) -> StopResult {
    let context = StopContext {
        record,
        pillar: record.confirmed(),
        thresholds,
    };
    let rules: [Rule<StopContext<'_>, StopFailure>; 3] = [
        sub_path_rule as Rule<_, _>,
        gap_change_rule as Rule<_, _>,
        missing_fields_rule as Rule<_, _>,
    ];

    StopResult::from_failures(CollectAll::new(&rules).evaluate(&context))
}

/// Stop result for input that never became a record.
pub(crate) fn invalid_record(problem: String) -> StopResult {
    StopResult::from_failures(vec![StopFailure::new(
        StopRuleId::InvalidRecord,
        "The scan record is missing or unreadable, so no plan can be generated.",
        vec![problem],
    )])
}

fn sub_path_rule(context: &StopContext<'_>) -> Option<StopFailure> {
    let sub_path = non_blank(context.record.sub_path.as_deref());
    match sub_path {
        None => Some(StopFailure::new(
            StopRuleId::SubPathUncertain,
            "Sub-path is missing; confirm which sub-path applies before the plan is built.",
            Vec::new(),
        )),
        Some(value) if is_uncertain(value) => Some(StopFailure::new(
            StopRuleId::SubPathUncertain,
            "Sub-path is marked uncertain; confirm which sub-path applies before the plan \
             is built.",
            vec![value.to_string()],
        )),
        Some(value) if value.to_ascii_lowercase().starts_with("other") => {
            Some(StopFailure::new(
                StopRuleId::SubPathOther,
                "Sub-path is a manual entry; this plan needs to be written by a consultant.",
                vec![value.to_string()],
            ))
        }
        Some(_) => None,
    }
}

fn gap_change_rule(context: &StopContext<'_>) -> Option<StopFailure> {
    let record = context.record;
    let confirmed = non_blank(record.confirmed_pillar.as_deref())?;
    let quizzed = non_blank(record.quiz_pillar.as_deref())?;
    if confirmed.eq_ignore_ascii_case(quizzed)
        || non_blank(record.gap_change_reason.as_deref()).is_some()
    {
        return None;
    }
    Some(StopFailure::new(
        StopRuleId::GapChangeUnjustified,
        format!(
            "Confirmed gap ({confirmed}) differs from the quiz result ({quizzed}) and no reason \
             was recorded."
        ),
        vec![quizzed.to_string(), confirmed.to_string()],
    ))
}

fn missing_fields_rule(context: &StopContext<'_>) -> Option<StopFailure> {
    let record = context.record;
    let thresholds = context.thresholds;
    let mut missing = Vec::new();

    if context.pillar.is_none() {
        missing.push("confirmed pillar".to_string());
    }
    if non_blank(record.sub_path.as_deref()).is_none() {
        missing.push("sub-path".to_string());
    }
    if non_blank(record.lever.as_deref()).is_none() {
        missing.push("lever".to_string());
    }

    let answered = context.pillar.map_or(0, |pillar| {
        fields_for(pillar)
            .iter()
            .filter(|field| record.baseline.answered(field.key).is_some())
            .count()
    });
    if answered < thresholds.min_baseline_answers {
        missing.push(format!(
            "baseline answers ({answered} of {})",
            thresholds.min_baseline_answers
        ));
    }

    let filled = record.filled_actions();
    if filled < ACTION_SLOTS {
        missing.push(format!("actions ({filled} of {ACTION_SLOTS})"));
    }

    let metrics = record.selected_metrics().count();
    if metrics < thresholds.min_metrics {
        missing.push(format!(
            "scorecard metrics ({metrics} of {})",
            thresholds.min_metrics
        ));
    }

    if missing.is_empty() {
        return None;
    }
    Some(StopFailure::new(
        StopRuleId::MissingFields,
        format!("Missing required fields: {}.", missing.join(", ")),
        missing,
    ))
}
