use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized answer text for "I don't know".
pub const UNCERTAIN: &str = "Not sure";

/// The three growth-gap categories every table is keyed by.
///
/// Declaration order is alphabetical, so `Ord` doubles as the fallback
/// tie-break order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Pillar {
    Acquisition,
    Conversion,
    Retention,
}

impl Pillar {
    pub const ALL: [Pillar; 3] = [Pillar::Acquisition, Pillar::Conversion, Pillar::Retention];

    pub const fn label(self) -> &'static str {
        match self {
            Pillar::Acquisition => "Acquisition",
            Pillar::Conversion => "Conversion",
            Pillar::Retention => "Retention",
        }
    }

    /// Case-insensitive parse; anything unrecognized is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "acquisition" => Some(Pillar::Acquisition),
            "conversion" => Some(Pillar::Conversion),
            "retention" => Some(Pillar::Retention),
            _ => None,
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn is_uncertain(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(UNCERTAIN)
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Present, non-blank and not "Not sure".
pub fn is_answered(value: Option<&str>) -> bool {
    matches!(value, Some(raw) if !is_blank(raw) && !is_uncertain(raw))
}

/// Present and non-blank; "Not sure" still counts.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|raw| !raw.is_empty())
}
