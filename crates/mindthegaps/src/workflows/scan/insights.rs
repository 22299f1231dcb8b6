use super::super::cascade::{CollectAll, Rule};
use super::super::pillar::{non_blank, Pillar};
use super::super::thresholds::EngineThresholds;
use super::baseline::{fields_for, is_high_dependence, BaselineField};
use super::domain::{Insight, InsightPattern, PlanSection, ScanRecord};
use super::targets::target_for;

struct InsightContext<'a> {
    record: &'a ScanRecord,
    pillar: Pillar,
    thresholds: &'a EngineThresholds,
    fields: &'static [BaselineField],
}

impl InsightContext<'_> {
    fn answered(&self) -> impl Iterator<Item = (&'static BaselineField, &str)> + '_ {
        self.fields
            .iter()
            .filter_map(|field| Some((field, self.record.baseline.answered(field.key)?)))
    }
}

/// Insights in priority order, capped. Later patterns are dropped, never
/// promoted over earlier ones.
pub(crate) fn personalize(
    record: &ScanRecord,
    pillar: Pillar,
    thresholds: &EngineThresholds,
) -> Vec<Insight> {
    let context = InsightContext {
        record,
        pillar,
        thresholds,
        fields: fields_for(pillar),
    };
    let rules: [Rule<InsightContext<'_>, Insight>; 3] = [
        signal_to_action as Rule<_, _>,
        risk_callout as Rule<_, _>,
        stability_target as Rule<_, _>,
    ];

    let mut insights = CollectAll::new(&rules).evaluate(&context);
    insights.truncate(thresholds.insight_cap);
    insights
}

fn signal_to_action(context: &InsightContext<'_>) -> Option<Insight> {
    let sub_path = non_blank(context.record.sub_path.as_deref())?;
    let lever = non_blank(context.record.lever.as_deref())?;
    if context.answered().count() < context.thresholds.signal_min_answers {
        return None;
    }

    let text = match weakest_field(context) {
        Some((field, value)) => format!(
            "{} at {} is the weakest number on your sheet. Fixing {} first goes straight at \
             {}: {}.",
            field.label,
            value,
            context.pillar.label().to_ascii_lowercase(),
            sub_path,
            lever
        ),
        None => format!(
            "Your numbers point to {sub_path}, so the first 30 days go into one lever: {lever}."
        ),
    };

    Some(Insight {
        pattern: InsightPattern::SignalToAction,
        section: PlanSection::Lever,
        text,
    })
}

/// Answered field sitting lowest on its own progression. Fields are compared by
/// `rank / (len - 1)`; the earliest declared field wins ties.
fn weakest_field<'a>(context: &'a InsightContext<'_>) -> Option<(&'static BaselineField, &'a str)> {
    let mut weakest: Option<(&'static BaselineField, &'a str, usize, usize)> = None;
    for (field, value) in context.answered() {
        let Some(rank) = field.rank(value) else {
            continue;
        };
        let span = field.progression.len().saturating_sub(1).max(1);
        let lower = match weakest {
            Some((_, _, best_rank, best_span)) => rank * best_span < best_rank * span,
            None => true,
        };
        if lower {
            weakest = Some((field, value, rank, span));
        }
    }
    weakest.map(|(field, value, _, _)| (field, value))
}

fn risk_callout(context: &InsightContext<'_>) -> Option<Insight> {
    let worst = context.answered().find(|(field, value)| field.is_worst(value));
    let unknown = context.fields.len() - context.answered().count();

    let text = match worst {
        Some((field, value)) => format!(
            "{} is at {}, the weakest band we track. Treat it as the main risk to this plan \
             and check it every week.",
            field.label, value
        ),
        None if unknown >= 2 => format!(
            "{unknown} of your {} baseline numbers are unknown. Until they are tracked, \
             progress on this plan will be hard to prove.",
            context.fields.len()
        ),
        None => return None,
    };

    Some(Insight {
        pattern: InsightPattern::RiskCallout,
        section: PlanSection::ConstraintsAndGaps,
        text,
    })
}

fn stability_target(context: &InsightContext<'_>) -> Option<Insight> {
    let (field, value) = context
        .answered()
        .find(|(field, value)| is_high_dependence(field.key, value))?;
    let target = target_for(field.key, Some(value));

    Some(Insight {
        pattern: InsightPattern::StabilityTarget,
        section: PlanSection::Scorecard,
        text: format!(
            "{} is at {}, so one source carries too much of the business. A steadier \
             30-day target: {}.",
            field.label, value, target
        ),
    })
}
