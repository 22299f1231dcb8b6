use chrono::Days;

use super::super::pillar::{non_blank, Pillar};
use super::super::thresholds::EngineThresholds;
use super::baseline::{fields_for, resolve_metric};
use super::domain::{
    ActionSlot, BaselineRow, ConfidenceResult, ConstraintsAndGaps, FoundSummary, LeverSection,
    PlanContent, ScanRecord, ScorecardRow, ACTION_SLOTS,
};
use super::insights::personalize;
use super::targets::{target_for, Target};

const MAX_CONSTRAINTS: usize = 3;
const REVIEW_AFTER_DAYS: u64 = 30;
const UNKNOWN_CURRENT: &str = "TBD";

pub(crate) fn assemble(
    record: &ScanRecord,
    pillar: Pillar,
    confidence: &ConfidenceResult,
    thresholds: &EngineThresholds,
) -> PlanContent {
    let scorecard = scorecard(record, pillar);

    PlanContent {
        pillar,
        found_summary: found_summary(record, pillar, confidence),
        baseline_table: baseline_table(record, pillar),
        lever: lever_section(record, scorecard.first()),
        actions: action_table(&record.actions),
        scorecard,
        constraints_and_gaps: constraints_and_gaps(record, pillar, confidence),
        insights: personalize(record, pillar, thresholds),
    }
}

fn found_summary(
    record: &ScanRecord,
    pillar: Pillar,
    confidence: &ConfidenceResult,
) -> FoundSummary {
    let contact = &record.contact;
    let greeting = match non_blank(contact.first_name.as_deref()) {
        Some(name) => format!("Hi {name},"),
        None => "Hi there,".to_string(),
    };
    let business = non_blank(contact.business_name.as_deref()).unwrap_or("your business");
    let prepared_on = contact.prepared_on;

    FoundSummary {
        greeting,
        headline: format!(
            "What we found: the biggest growth gap for {business} is {}.",
            pillar.label()
        ),
        sub_path: non_blank(record.sub_path.as_deref())
            .unwrap_or_default()
            .to_string(),
        confidence: confidence.grade,
        prepared_on,
        review_on: prepared_on
            .and_then(|date| date.checked_add_days(Days::new(REVIEW_AFTER_DAYS))),
    }
}

fn baseline_table(record: &ScanRecord, pillar: Pillar) -> Vec<BaselineRow> {
    fields_for(pillar)
        .iter()
        .filter_map(|field| {
            let value = record.baseline.answered(field.key)?;
            Some(BaselineRow {
                field: field.key,
                label: field.label,
                value: value.to_string(),
            })
        })
        .collect()
}

fn lever_section(record: &ScanRecord, first_metric: Option<&ScorecardRow>) -> LeverSection {
    let done_looks_like = match first_metric {
        Some(row) => format!(
            "{}: {} within {REVIEW_AFTER_DAYS} days (currently {}).",
            row.metric, row.target, row.current
        ),
        None => format!("The lever is running every week for {REVIEW_AFTER_DAYS} days."),
    };

    LeverSection {
        name: non_blank(record.lever.as_deref())
            .unwrap_or_default()
            .to_string(),
        sentence: non_blank(record.lever_sentence.as_deref())
            .unwrap_or_default()
            .to_string(),
        done_looks_like,
    }
}

/// Provided actions verbatim, padded with blank slots to exactly six.
fn action_table(actions: &[ActionSlot]) -> Vec<ActionSlot> {
    let mut table: Vec<ActionSlot> = actions.iter().take(ACTION_SLOTS).cloned().collect();
    table.resize_with(ACTION_SLOTS, ActionSlot::default);
    table
}

fn scorecard(record: &ScanRecord, pillar: Pillar) -> Vec<ScorecardRow> {
    record
        .selected_metrics()
        .map(|metric| {
            let field = resolve_metric(pillar, metric);
            let value = field.and_then(|key| record.baseline.answered(key));
            let target = match field {
                Some(key) => target_for(key, value),
                None => Target::EstablishBaseline,
            };
            ScorecardRow {
                metric: metric.to_string(),
                field,
                current: value.unwrap_or(UNKNOWN_CURRENT).to_string(),
                target: target.to_string(),
            }
        })
        .collect()
}

fn constraints_and_gaps(
    record: &ScanRecord,
    pillar: Pillar,
    confidence: &ConfidenceResult,
) -> ConstraintsAndGaps {
    let constraints: Vec<String> = record
        .constraints
        .iter()
        .filter_map(|constraint| non_blank(Some(constraint.as_str())))
        .take(MAX_CONSTRAINTS)
        .map(str::to_string)
        .collect();

    let data_gaps = if confidence.include_data_gaps {
        fields_for(pillar)
            .iter()
            .filter(|field| record.baseline.answered(field.key).is_none())
            .map(|field| format!("Track: {}", field.label))
            .collect()
    } else {
        Vec::new()
    };

    ConstraintsAndGaps {
        shown: confidence.include_constraints,
        constraints_missing: confidence.include_constraints && constraints.is_empty(),
        constraints,
        data_gaps,
    }
}
