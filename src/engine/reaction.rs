//! Reaction scale: nine canonical percentages and their labels.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Reaction {
    Immune,
    Tanked,
    Resist,
    Ineffective,
    Neutral,
    Effective,
    Weak,
    Suffer,
    Obliterate,
}

/// Ascending; snapping scans in this order.
pub const REACTION_SCALE: [(i32, Reaction); 9] = [
    (-100, Reaction::Immune),
    (-75, Reaction::Tanked),
    (-50, Reaction::Resist),
    (-25, Reaction::Ineffective),
    (0, Reaction::Neutral),
    (25, Reaction::Effective),
    (50, Reaction::Weak),
    (75, Reaction::Suffer),
    (100, Reaction::Obliterate),
];

impl Reaction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Immune => "Immune",
            Self::Tanked => "Tanked",
            Self::Resist => "Resist",
            Self::Ineffective => "Ineffective",
            Self::Neutral => "Neutral",
            Self::Effective => "Effective",
            Self::Weak => "Weak",
            Self::Suffer => "Suffer",
            Self::Obliterate => "Obliterate",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical scale value nearest to `total`; on an exact tie the lower value wins.
pub fn snap(total: i32) -> (i32, Reaction) {
    let mut best = REACTION_SCALE[0];
    let mut best_distance = (i64::from(total) - i64::from(best.0)).abs();
    for step in REACTION_SCALE.iter().skip(1) {
        let distance = (i64::from(total) - i64::from(step.0)).abs();
        if distance < best_distance {
            best = *step;
            best_distance = distance;
        }
    }
    best
}

/// Reaction for a raw total.
pub fn reaction_for(total: i32) -> Reaction {
    snap(total).1
}
