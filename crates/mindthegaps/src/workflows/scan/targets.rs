use std::fmt;

use serde::{Serialize, Serializer};

use super::super::pillar::is_answered;
use super::baseline::field;

/// Next-step goal for one baseline value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Value is unknown, so the goal is to start measuring it.
    EstablishBaseline,
    /// Value is outside the field's progression.
    Improve,
    Maintain(&'static str),
    Reach(&'static str),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::EstablishBaseline => f.write_str("Establish baseline"),
            Target::Improve => f.write_str("Improve"),
            Target::Maintain(best) => write!(f, "Maintain {best}"),
            Target::Reach(next) => f.write_str(next),
        }
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Look up the goal for `value` on `field_key`'s worst-to-best progression.
pub fn target_for(field_key: &str, value: Option<&str>) -> Target {
    let Some(value) = value.filter(|value| is_answered(Some(*value))) else {
        return Target::EstablishBaseline;
    };
    let Some(field) = field(field_key) else {
        return Target::Improve;
    };
    let Some(rank) = field.rank(value) else {
        return Target::Improve;
    };
    match field.progression.get(rank + 1).copied() {
        Some(next) => Target::Reach(next),
        None => Target::Maintain(field.progression[rank]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::pillar::Pillar;
    use crate::workflows::scan::baseline::fields_for;

    #[test]
    fn next_better_value_is_the_target() {
        assert_eq!(
            target_for("conv_first_response_time", Some("1-2 days")).to_string(),
            "Same day"
        );
        assert_eq!(
            target_for("acq_pct_from_top_source", Some("81%+")).to_string(),
            "61-80%"
        );
    }

    #[test]
    fn unknown_values_degrade_gracefully() {
        assert_eq!(
            target_for("conv_lead_to_booked", Some("Not sure")),
            Target::EstablishBaseline
        );
        assert_eq!(target_for("conv_lead_to_booked", None), Target::EstablishBaseline);
        assert_eq!(target_for("conv_lead_to_booked", Some("about half")), Target::Improve);
        assert_eq!(target_for("favourite_colour", Some("blue")), Target::Improve);
    }

    #[test]
    fn best_value_is_maintained_for_every_field() {
        for pillar in Pillar::ALL {
            for field in fields_for(pillar) {
                let best = field.best().expect("progression is non-empty");
                assert_eq!(
                    target_for(field.key, Some(best)).to_string(),
                    format!("Maintain {best}"),
                    "{}",
                    field.key
                );
            }
        }
    }

    #[test]
    fn matching_ignores_case_but_reports_the_declared_label() {
        assert_eq!(
            target_for("ret_rebook_scheduling", Some("always SCHEDULED")).to_string(),
            "Maintain Always scheduled"
        );
    }
}
