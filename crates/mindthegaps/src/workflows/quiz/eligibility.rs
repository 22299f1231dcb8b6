use super::super::cascade::{CollectAll, Rule};
use super::super::pillar::is_answered;
use super::super::thresholds::EngineThresholds;
use super::domain::{AnswerSet, EligibilityCheck, EligibilityResult, FailedCheck, ScoringResult};
use super::questions::{CLIENT_TREND, DATA_QUESTIONS, LEAD_VOLUME};

struct EligibilityContext<'a> {
    scoring: &'a ScoringResult,
    answers: &'a AnswerSet,
    thresholds: &'a EngineThresholds,
    unanswered: usize,
}

pub(crate) fn check_eligibility(
    scoring: &ScoringResult,
    answers: &AnswerSet,
    thresholds: &EngineThresholds,
) -> EligibilityResult {
    let context = EligibilityContext {
        scoring,
        answers,
        thresholds,
        unanswered: unanswered_data_questions(answers),
    };
    let rules: [Rule<EligibilityContext<'_>, FailedCheck>; 3] = [
        numbers_check as Rule<_, _>,
        demand_check as Rule<_, _>,
        clarity_check as Rule<_, _>,
    ];

    EligibilityResult::from_failures(CollectAll::new(&rules).evaluate(&context))
}

/// Data questions left blank, missing, or answered "Not sure".
pub(crate) fn unanswered_data_questions(answers: &AnswerSet) -> usize {
    DATA_QUESTIONS
        .iter()
        .filter(|question| !is_answered(answers.get(question)))
        .count()
}

fn numbers_check(context: &EligibilityContext<'_>) -> Option<FailedCheck> {
    (context.unanswered >= context.thresholds.numbers_unanswered_min).then_some(FailedCheck {
        check: EligibilityCheck::Numbers,
        reason: "Too many of the business questions were skipped or answered \"Not sure\" \
                 to build a reliable scan.",
        advice: "Spend a week noting leads, replies and repeat customers, then retake the quiz \
                 with real numbers.",
    })
}

fn demand_check(context: &EligibilityContext<'_>) -> Option<FailedCheck> {
    // "Not sure" still counts as engaging with the question here.
    let silent = context.answers.provided(LEAD_VOLUME).is_none()
        && context.answers.provided(CLIENT_TREND).is_none();
    silent.then_some(FailedCheck {
        check: EligibilityCheck::Demand,
        reason: "We couldn't see any evidence of current demand: both the lead volume and \
                 client trend questions were left empty.",
        advice: "Tell us roughly how many inquiries you get and whether your client base is \
                 growing; a best guess is fine.",
    })
}

fn clarity_check(context: &EligibilityContext<'_>) -> Option<FailedCheck> {
    let total = context.scoring.totals.get(context.scoring.primary_gap);
    (total == 0 && context.unanswered >= context.thresholds.clarity_unanswered_min).then_some(
        FailedCheck {
            check: EligibilityCheck::Clarity,
            reason: "Your answers don't point to a clear gap yet, so a scan would be guesswork.",
            advice: "Start with the free checklist for your industry and revisit the quiz once \
                     one area feels stuck.",
        },
    )
}
