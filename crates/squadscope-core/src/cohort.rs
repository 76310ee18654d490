// Age and position cohorts: the two axes every player is grouped on.
//
// Both classifiers are total. Any age lands in exactly one age band and any
// position description lands in exactly one position group, falling back to
// `PositionCohort::Other`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Age cohorts
// ---------------------------------------------------------------------------

/// Age band a player belongs to. Each band is inclusive at its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeCohort {
    /// 21 and under.
    U21,
    /// 22 to 28.
    Peak,
    /// 29 to 32.
    PostPeak,
    /// 33 and over.
    Veteran,
}

impl AgeCohort {
    /// All age cohorts in display (column) order.
    pub const ALL: [AgeCohort; 4] = [
        AgeCohort::U21,
        AgeCohort::Peak,
        AgeCohort::PostPeak,
        AgeCohort::Veteran,
    ];

    /// Column header used by the squad grid.
    pub fn label(&self) -> &'static str {
        match self {
            AgeCohort::U21 => "U21",
            AgeCohort::Peak => "Peak (21-28)",
            AgeCohort::PostPeak => "Post-Peak (28-32)",
            AgeCohort::Veteran => "Veteran",
        }
    }
}

impl fmt::Display for AgeCohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Place an age into its cohort.
///
/// Anything that fails every upper bound (including NaN) is a veteran, so the
/// function never fails.
pub fn classify_age(age: f64) -> AgeCohort {
    if age <= 21.0 {
        AgeCohort::U21
    } else if age <= 28.0 {
        AgeCohort::Peak
    } else if age <= 32.0 {
        AgeCohort::PostPeak
    } else {
        AgeCohort::Veteran
    }
}

// ---------------------------------------------------------------------------
// Position cohorts
// ---------------------------------------------------------------------------

/// Positional group derived from a free-text position description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PositionCohort {
    Goalkeeper,
    CentreBack,
    /// Full-backs, wing-backs and wide midfielders.
    FullBack,
    /// Defensive and central midfielders.
    CentralMidfield,
    /// Attacking midfielders and wingers.
    AttackingMidfield,
    Forward,
    Other,
}

impl PositionCohort {
    /// All position cohorts in display (row) order.
    pub const ALL: [PositionCohort; 7] = [
        PositionCohort::Goalkeeper,
        PositionCohort::CentreBack,
        PositionCohort::FullBack,
        PositionCohort::CentralMidfield,
        PositionCohort::AttackingMidfield,
        PositionCohort::Forward,
        PositionCohort::Other,
    ];

    /// Short label used as the grid row header.
    pub fn label(&self) -> &'static str {
        match self {
            PositionCohort::Goalkeeper => "GK",
            PositionCohort::CentreBack => "CB",
            PositionCohort::FullBack => "FB/WB",
            PositionCohort::CentralMidfield => "DM/CM",
            PositionCohort::AttackingMidfield => "AM/Winger",
            PositionCohort::Forward => "FW",
            PositionCohort::Other => "Other",
        }
    }
}

impl fmt::Display for PositionCohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single first-match rule: if `matches` accepts the description, the
/// player belongs to `cohort`.
struct PositionRule {
    matches: fn(&str) -> bool,
    cohort: PositionCohort,
}

/// Evaluated top to bottom; the first matching rule wins. Order matters:
/// "Centre-Back" must hit the CB rule before the generic "Back" rule, and
/// any "Back" must win over the midfield rules.
const POSITION_RULES: &[PositionRule] = &[
    PositionRule {
        matches: |p| p.contains("Goalkeeper"),
        cohort: PositionCohort::Goalkeeper,
    },
    PositionRule {
        matches: |p| p.contains("Back") && p.contains("Centre"),
        cohort: PositionCohort::CentreBack,
    },
    PositionRule {
        matches: |p| p.contains("Back"),
        cohort: PositionCohort::FullBack,
    },
    PositionRule {
        matches: |p| p.contains("Defensive Midfield") || p.contains("Central Midfield"),
        cohort: PositionCohort::CentralMidfield,
    },
    PositionRule {
        matches: |p| p.contains("Right Midfield") || p.contains("Left Midfield"),
        cohort: PositionCohort::FullBack,
    },
    PositionRule {
        matches: |p| p.contains("Attacking Midfield") || p.contains("Winger"),
        cohort: PositionCohort::AttackingMidfield,
    },
    PositionRule {
        matches: |p| p.contains("Forward"),
        cohort: PositionCohort::Forward,
    },
];

/// Map a position description (e.g. "Defender - Centre-Back") to its cohort.
///
/// Matching is case-sensitive substring matching. Empty or unrecognized
/// descriptions yield `PositionCohort::Other`.
pub fn classify_position(description: &str) -> PositionCohort {
    POSITION_RULES
        .iter()
        .find(|rule| (rule.matches)(description))
        .map(|rule| rule.cohort)
        .unwrap_or(PositionCohort::Other)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
