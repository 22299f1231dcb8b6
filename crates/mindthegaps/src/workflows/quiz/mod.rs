//! Quiz pipeline: answers to scored gap, diagnosis, and scan eligibility.

mod content;
pub mod domain;
mod eligibility;
pub mod questions;
mod scoring;
mod selector;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerSet, CostOfLeak, DiagnosisResult, EligibilityCheck, EligibilityResult, FailedCheck,
    PillarPoints, RoutingOutcome, ScoringResult, SubDiagnosis, TieBreakRule,
};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::thresholds::EngineThresholds;
use super::InputError;

/// Stateless evaluator for quiz submissions.
#[derive(Debug, Clone, Default)]
pub struct QuizEngine {
    thresholds: EngineThresholds,
}

impl QuizEngine {
    pub fn new(thresholds: EngineThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &EngineThresholds {
        &self.thresholds
    }

    pub fn score(&self, answers: &AnswerSet) -> ScoringResult {
        let result = scoring::score_answers(answers);
        debug!(
            primary_gap = %result.primary_gap,
            baseline_score = result.baseline_score,
            tie_break = result.tie_break_used.map(TieBreakRule::label),
            "quiz scored"
        );
        result
    }

    /// Score an adapter payload, rejecting anything that is not a JSON object.
    pub fn score_value(&self, value: &Value) -> Result<ScoringResult, InputError> {
        let answers = AnswerSet::from_value(value)?;
        Ok(self.score(&answers))
    }

    pub fn diagnose(&self, scoring: &ScoringResult, answers: &AnswerSet) -> DiagnosisResult {
        let diagnosis = selector::diagnose(scoring, answers);
        debug!(
            sub_diagnosis = diagnosis.sub_diagnosis.as_ref().map(|sub| sub.name),
            key_signals = diagnosis.key_signals.len(),
            "diagnosis selected"
        );
        diagnosis
    }

    pub fn check_eligibility(
        &self,
        scoring: &ScoringResult,
        answers: &AnswerSet,
    ) -> EligibilityResult {
        let result = eligibility::check_eligibility(scoring, answers, &self.thresholds);
        debug!(
            eligible = result.eligible,
            failed = result.failed_checks.len(),
            "eligibility checked"
        );
        result
    }

    /// Gate an adapter payload against an existing scoring result.
    pub fn check_value(
        &self,
        scoring: &ScoringResult,
        answers: &Value,
    ) -> Result<EligibilityResult, InputError> {
        let answers = AnswerSet::from_value(answers)?;
        Ok(self.check_eligibility(scoring, &answers))
    }

    /// Run the whole quiz pipeline.
    pub fn run(&self, answers: &AnswerSet) -> QuizOutcome {
        let scoring = self.score(answers);
        let diagnosis = self.diagnose(&scoring, answers);
        let eligibility = self.check_eligibility(&scoring, answers);
        QuizOutcome {
            scoring,
            diagnosis,
            eligibility,
        }
    }

    pub fn run_value(&self, value: &Value) -> Result<QuizOutcome, InputError> {
        let answers = AnswerSet::from_value(value)?;
        Ok(self.run(&answers))
    }
}

/// Everything the quiz pipeline derives from one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    pub scoring: ScoringResult,
    pub diagnosis: DiagnosisResult,
    pub eligibility: EligibilityResult,
}
