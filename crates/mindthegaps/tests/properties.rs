use mindthegaps::workflows::quiz::questions::{LOST_LEAD_REASON, ROUTED_ANSWERS, SCORED_QUESTIONS};
use mindthegaps::workflows::quiz::{AnswerSet, QuizEngine};
use mindthegaps::workflows::scan::baseline::fields_for;
use mindthegaps::workflows::scan::{target_for, BaselineAnswers, ConfidenceGrade, ScanEngine};
use mindthegaps::workflows::{Pillar, UNCERTAIN};
use proptest::prelude::*;

/// Each slot picks an option index; indexes past the option list mean
/// "Not sure" or no answer at all.
fn answer_set(picks: &[usize], routed: usize) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for (rule, pick) in SCORED_QUESTIONS.iter().zip(picks) {
        match rule.points.get(*pick) {
            Some((text, _)) => answers.insert(rule.key, *text),
            None if *pick == rule.points.len() => answers.insert(rule.key, UNCERTAIN),
            None => {}
        }
    }
    if let Some(answer) = ROUTED_ANSWERS.get(routed) {
        answers.insert(LOST_LEAD_REASON, answer.answer);
    }
    answers
}

fn any_pillar() -> impl Strategy<Value = Pillar> {
    prop_oneof![
        Just(Pillar::Acquisition),
        Just(Pillar::Conversion),
        Just(Pillar::Retention),
    ]
}

proptest! {
    #[test]
    fn baseline_score_matches_its_formula(
        picks in prop::collection::vec(0usize..5, SCORED_QUESTIONS.len()),
        routed in 0usize..6,
    ) {
        let scoring = QuizEngine::default().score(&answer_set(&picks, routed));
        let total = scoring.totals.get(scoring.primary_gap);
        let max = scoring.max_possible.get(scoring.primary_gap);

        prop_assert!(scoring.baseline_score <= 100);
        let expected = if max == 0 {
            0
        } else {
            (100.0 * f64::from(total) / f64::from(max)).round() as u8
        };
        prop_assert_eq!(scoring.baseline_score, expected);
    }

    #[test]
    fn eligibility_matches_its_reasons(
        picks in prop::collection::vec(0usize..6, SCORED_QUESTIONS.len()),
        routed in 0usize..7,
    ) {
        let outcome = QuizEngine::default().run(&answer_set(&picks, routed));

        prop_assert_eq!(
            outcome.eligibility.eligible,
            outcome.eligibility.all_reasons().is_empty()
        );
    }

    #[test]
    fn rescoring_is_stable(
        picks in prop::collection::vec(0usize..5, SCORED_QUESTIONS.len()),
        routed in 0usize..6,
    ) {
        let answers = answer_set(&picks, routed);
        let engine = QuizEngine::default();

        prop_assert_eq!(engine.run(&answers), engine.run(&answers));
    }

    #[test]
    fn confidence_depends_only_on_the_missing_count(
        pillar in any_pillar(),
        seed in prop::collection::vec(any::<bool>(), 7),
    ) {
        let fields = fields_for(pillar);
        let baseline: BaselineAnswers = fields
            .iter()
            .zip(&seed)
            .map(|(field, uncertain)| {
                let value = if *uncertain { UNCERTAIN } else { field.progression[0] };
                (field.key, value)
            })
            .collect();
        let missing = seed.iter().take(fields.len()).filter(|flag| **flag).count();

        let result = ScanEngine::default().grade_confidence(&baseline, Some(pillar));

        let expected = match missing {
            0 | 1 => ConfidenceGrade::High,
            2 | 3 => ConfidenceGrade::Med,
            _ => ConfidenceGrade::Low,
        };
        prop_assert_eq!(result.missing_count, missing);
        prop_assert_eq!(result.grade, expected);
    }

    #[test]
    fn target_steps_one_place_up_the_progression(pillar in any_pillar(), index in 0usize..7) {
        for field in fields_for(pillar) {
            let rank = index % field.progression.len();
            let target = target_for(field.key, Some(field.progression[rank])).to_string();
            let expected = match field.progression.get(rank + 1) {
                Some(next) => next.to_string(),
                None => format!("Maintain {}", field.progression[rank]),
            };
            prop_assert_eq!(target, expected);
        }
    }
}
