use serde::{Deserialize, Serialize};

/// Domain-tuned counts the gates compare against.
///
/// The defaults are the production values; they carry no derivation and must
/// not be re-tuned without the consultants who own them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineThresholds {
    /// Missing or uncertain data answers (out of 10) that fail the numbers check.
    pub numbers_unanswered_min: usize,
    /// Missing or uncertain data answers that, with a zero pillar total, fail the clarity check.
    pub clarity_unanswered_min: usize,
    /// Missing or uncertain baseline answers that drop confidence to Med.
    pub confidence_med_min: usize,
    /// Missing or uncertain baseline answers that drop confidence to Low.
    pub confidence_low_min: usize,
    /// Non-uncertain baseline answers a scan needs before a plan is generated.
    pub min_baseline_answers: usize,
    /// Non-blank scorecard metrics a scan needs.
    pub min_metrics: usize,
    /// Non-uncertain baseline answers the signal-to-action insight needs.
    pub signal_min_answers: usize,
    pub insight_cap: usize,
}

impl Default for EngineThresholds {
    fn default() -> Self {
        Self {
            numbers_unanswered_min: 5,
            clarity_unanswered_min: 8,
            confidence_med_min: 2,
            confidence_low_min: 4,
            min_baseline_answers: 5,
            min_metrics: 2,
            signal_min_answers: 4,
            insight_cap: 2,
        }
    }
}
