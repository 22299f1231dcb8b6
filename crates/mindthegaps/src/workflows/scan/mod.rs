//! Scan pipeline: consultant worksheet to stop gate, confidence grade and the
//! 30-day plan content.

mod assembler;
pub mod baseline;
mod confidence;
pub mod domain;
mod insights;
mod stop_rules;
pub mod targets;

#[cfg(test)]
mod tests;

pub use baseline::{levers_for, metrics_for, resolve_metric, sub_paths_for};
pub use domain::{
    ActionSlot, BaselineAnswers, BaselineRow, ConfidenceGrade, ConfidenceResult,
    ConstraintsAndGaps, ContactDetails, FoundSummary, Insight, InsightPattern, LeverSection,
    PlanContent, PlanSection, ScanRecord, ScorecardRow, StopDetail, StopResult, StopRuleId,
    ACTION_SLOTS,
};
pub use targets::{target_for, Target};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::pillar::Pillar;
use super::thresholds::EngineThresholds;
use super::InputError;

/// Stateless evaluator for scan worksheets.
#[derive(Debug, Clone, Default)]
pub struct ScanEngine {
    thresholds: EngineThresholds,
}

impl ScanEngine {
    pub fn new(thresholds: EngineThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &EngineThresholds {
        &self.thresholds
    }

    pub fn evaluate_stop(&self, record: &ScanRecord) -> StopResult {
        let result = stop_rules::evaluate(record, &self.thresholds);
        info!(
            stopped = result.stopped,
            rules = ?result.rules(),
            "stop rules evaluated"
        );
        result
    }

    /// Gate a raw payload. Input that is not a readable record stops the scan
    /// instead of failing.
    pub fn evaluate_value(&self, value: &Value) -> StopResult {
        match ScanRecord::from_value(value) {
            Ok(record) => self.evaluate_stop(&record),
            Err(error) => {
                info!(%error, "scan record rejected");
                stop_rules::invalid_record(error.to_string())
            }
        }
    }

    pub fn grade_confidence(
        &self,
        baseline: &BaselineAnswers,
        pillar: Option<Pillar>,
    ) -> ConfidenceResult {
        let result = confidence::grade(baseline, pillar, &self.thresholds);
        debug!(
            grade = result.grade.label(),
            missing = result.missing_count,
            total = result.total_fields,
            "confidence graded"
        );
        result
    }

    /// Grade a raw baseline mapping for a pillar name. Unknown pillar names
    /// grade High over zero fields.
    pub fn grade_value(
        &self,
        baseline: &Value,
        pillar: &str,
    ) -> Result<ConfidenceResult, InputError> {
        let baseline = BaselineAnswers::from_value(baseline)?;
        Ok(self.grade_confidence(&baseline, Pillar::parse(pillar)))
    }

    /// Build the plan for a record whose confirmed pillar is known.
    pub fn assemble(
        &self,
        record: &ScanRecord,
        confidence: &ConfidenceResult,
    ) -> Result<PlanContent, InputError> {
        let pillar = record.confirmed().ok_or(InputError::Missing {
            what: "confirmed pillar",
        })?;
        let plan = assembler::assemble(record, pillar, confidence, &self.thresholds);
        debug!(
            pillar = %plan.pillar,
            scorecard = plan.scorecard.len(),
            insights = plan.insights.len(),
            "plan assembled"
        );
        Ok(plan)
    }

    /// Run the whole scan pipeline.
    pub fn run(&self, record: &ScanRecord) -> ScanOutcome {
        let stop = self.evaluate_stop(record);
        if stop.stopped {
            return ScanOutcome::Stopped { stop };
        }
        let confidence = self.grade_confidence(&record.baseline, record.confirmed());
        match self.assemble(record, &confidence) {
            Ok(plan) => ScanOutcome::Ready {
                stop,
                confidence,
                plan: Box::new(plan),
            },
            // Unreachable while the missing-fields rule guards the pillar.
            Err(error) => ScanOutcome::Stopped {
                stop: stop_rules::invalid_record(error.to_string()),
            },
        }
    }

    pub fn run_value(&self, value: &Value) -> ScanOutcome {
        match ScanRecord::from_value(value) {
            Ok(record) => self.run(&record),
            Err(error) => {
                info!(%error, "scan record rejected");
                ScanOutcome::Stopped {
                    stop: stop_rules::invalid_record(error.to_string()),
                }
            }
        }
    }
}

/// Result of the scan pipeline. A stopped scan never carries a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Stopped {
        stop: StopResult,
    },
    Ready {
        stop: StopResult,
        confidence: ConfidenceResult,
        plan: Box<PlanContent>,
    },
}

impl ScanOutcome {
    pub fn stop(&self) -> &StopResult {
        match self {
            ScanOutcome::Stopped { stop } | ScanOutcome::Ready { stop, .. } => stop,
        }
    }

    pub fn plan(&self) -> Option<&PlanContent> {
        match self {
            ScanOutcome::Ready { plan, .. } => Some(plan.as_ref()),
            ScanOutcome::Stopped { .. } => None,
        }
    }
}
