use super::super::pillar::Pillar;
use super::super::thresholds::EngineThresholds;
use super::baseline::fields_for;
use super::domain::{BaselineAnswers, ConfidenceGrade, ConfidenceResult};

pub(crate) fn grade(
    baseline: &BaselineAnswers,
    pillar: Option<Pillar>,
    thresholds: &EngineThresholds,
) -> ConfidenceResult {
    let fields = pillar.map(fields_for).unwrap_or_default();
    let missing_count = fields
        .iter()
        .filter(|field| baseline.answered(field.key).is_none())
        .count();

    let grade = if missing_count >= thresholds.confidence_low_min {
        ConfidenceGrade::Low
    } else if missing_count >= thresholds.confidence_med_min {
        ConfidenceGrade::Med
    } else {
        ConfidenceGrade::High
    };

    ConfidenceResult {
        grade,
        missing_count,
        total_fields: fields.len(),
        include_constraints: grade != ConfidenceGrade::High,
        include_data_gaps: grade == ConfidenceGrade::Low,
    }
}
