use super::super::cascade::{FirstMatch, Rule};
use super::super::pillar::Pillar;
use super::domain::{AnswerSet, PillarPoints, RoutingOutcome, ScoringResult, TieBreakRule};
use super::questions::{
    answer_in, base_max_points, focus_pillar, question_rule, routed_answer, CLOSE_RATE,
    CONCENTRATED_SOURCES, FOCUS, LEAD_SOURCES, LEAD_VOLUME, LOST_LEAD_REASON, LOW_CLOSE_RATE,
    LOW_LEAD_VOLUME, LOW_REPEAT_REVENUE, POST_SERVICE_CONTACT, REPEAT_REVENUE, RESPONSE_TIME,
    SCORED_QUESTIONS, SLOW_RESPONSE, WEAK_POST_SERVICE,
};

pub(crate) fn score_answers(answers: &AnswerSet) -> ScoringResult {
    let mut totals = PillarPoints::default();
    for rule in SCORED_QUESTIONS {
        totals.add(rule.pillar, rule.points_for(answers.get(rule.key)));
    }

    let routing = route(answers);
    let mut max_possible = PillarPoints::default();
    for pillar in Pillar::ALL {
        max_possible.add(pillar, base_max_points(pillar));
    }
    if let Some(pillar) = routing.pillar {
        totals.add(pillar, routing.points);
        max_possible.add(pillar, routing.points);
    }

    let tied = totals.leaders();
    let (primary_gap, tie_break_used) = match tied.as_slice() {
        [single] => (*single, None),
        _ => {
            let decision = break_tie(answers, &tied);
            (decision.winner, Some(decision.rule))
        }
    };

    let baseline_score = baseline_score(totals.get(primary_gap), max_possible.get(primary_gap));

    ScoringResult {
        totals,
        primary_gap,
        baseline_score,
        tie_break_used,
        routing,
        max_possible,
    }
}

/// Points one question actually contributed, including the routing question.
pub(crate) fn contributed_points(answers: &AnswerSet, question: &str) -> u32 {
    if question == LOST_LEAD_REASON {
        return route(answers).points;
    }
    question_rule(question)
        .map(|rule| rule.points_for(answers.get(question)))
        .unwrap_or(0)
}

fn route(answers: &AnswerSet) -> RoutingOutcome {
    let answer = answers.get(LOST_LEAD_REASON);
    match routed_answer(answer) {
        Some(routed) => RoutingOutcome {
            answer: answer.map(str::to_string),
            pillar: routed.pillar,
            points: routed.points,
        },
        None => RoutingOutcome {
            answer: answer.map(str::to_string),
            pillar: None,
            points: 0,
        },
    }
}

pub(crate) fn baseline_score(total: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let score = (100.0 * f64::from(total) / f64::from(max)).round();
    score.clamp(0.0, 100.0) as u8
}

struct TieContext<'a> {
    answers: &'a AnswerSet,
    tied: &'a [Pillar],
}

impl TieContext<'_> {
    fn award(&self, pillar: Pillar, rule: TieBreakRule) -> Option<TieDecision> {
        self.tied.contains(&pillar).then_some(TieDecision {
            winner: pillar,
            rule,
        })
    }
}

struct TieDecision {
    winner: Pillar,
    rule: TieBreakRule,
}

fn break_tie(answers: &AnswerSet, tied: &[Pillar]) -> TieDecision {
    let rules: [Rule<TieContext<'_>, TieDecision>; 5] = [
        conversion_signals as Rule<_, _>,
        acquisition_signals as Rule<_, _>,
        retention_signals as Rule<_, _>,
        self_reported_focus as Rule<_, _>,
        alphabetical as Rule<_, _>,
    ];
    let context = TieContext { answers, tied };

    FirstMatch::new(&rules)
        .evaluate(&context)
        .unwrap_or(TieDecision {
            winner: Pillar::Acquisition,
            rule: TieBreakRule::Alphabetical,
        })
}

fn conversion_signals(context: &TieContext<'_>) -> Option<TieDecision> {
    let answers = context.answers;
    let slow_or_low = answer_in(answers.get(RESPONSE_TIME), SLOW_RESPONSE)
        || answer_in(answers.get(CLOSE_RATE), LOW_CLOSE_RATE);
    if !slow_or_low {
        return None;
    }
    context.award(Pillar::Conversion, TieBreakRule::ConversionSignals)
}

fn acquisition_signals(context: &TieContext<'_>) -> Option<TieDecision> {
    let answers = context.answers;
    let both = answer_in(answers.get(LEAD_VOLUME), LOW_LEAD_VOLUME)
        && answer_in(answers.get(LEAD_SOURCES), CONCENTRATED_SOURCES);
    if !both {
        return None;
    }
    context.award(Pillar::Acquisition, TieBreakRule::AcquisitionSignals)
}

fn retention_signals(context: &TieContext<'_>) -> Option<TieDecision> {
    let answers = context.answers;
    let both = answer_in(answers.get(REPEAT_REVENUE), LOW_REPEAT_REVENUE)
        && answer_in(answers.get(POST_SERVICE_CONTACT), WEAK_POST_SERVICE);
    if !both {
        return None;
    }
    context.award(Pillar::Retention, TieBreakRule::RetentionSignals)
}

fn self_reported_focus(context: &TieContext<'_>) -> Option<TieDecision> {
    let pillar = focus_pillar(context.answers.get(FOCUS))?;
    context.award(pillar, TieBreakRule::SelfReportedFocus)
}

fn alphabetical(context: &TieContext<'_>) -> Option<TieDecision> {
    let winner = context.tied.iter().min().copied()?;
    Some(TieDecision {
        winner,
        rule: TieBreakRule::Alphabetical,
    })
}
