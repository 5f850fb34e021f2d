use std::fmt;

use serde::{Serialize, Serializer};

/// One cell of the WRNX interaction matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Symbol {
    Weak,
    Resist,
    #[default]
    Neutral,
    /// Immune trigger; only honoured in the active slot.
    Exception,
}

pub const WEAK_WEIGHT: i32 = 50;
pub const RESIST_WEIGHT: i32 = -50;
pub const EXCEPTION_WEIGHT: i32 = -100;

impl Symbol {
    pub const ALL: [Symbol; 4] = [Self::Weak, Self::Resist, Self::Neutral, Self::Exception];

    /// Total parse: anything that is not W/R/N/X (case-insensitive, trimmed) is Neutral.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "W" => Self::Weak,
            "R" => Self::Resist,
            "X" => Self::Exception,
            _ => Self::Neutral,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Self::Weak => 'W',
            Self::Resist => 'R',
            Self::Neutral => 'N',
            Self::Exception => 'X',
        }
    }

    /// Symbol as seen from a secondary slot: X counts as R there.
    pub const fn as_secondary(self) -> Self {
        match self {
            Self::Exception => Self::Resist,
            other => other,
        }
    }

    /// Unit score used by the additive formula.
    pub const fn score(self) -> i32 {
        match self {
            Self::Weak => 1,
            Self::Resist | Self::Exception => -1,
            Self::Neutral => 0,
        }
    }

    /// Flat per-attacker contribution used for pure-type baselines.
    pub const fn base_weight(self) -> i32 {
        match self {
            Self::Weak => WEAK_WEIGHT,
            Self::Resist => RESIST_WEIGHT,
            Self::Exception => EXCEPTION_WEIGHT,
            Self::Neutral => 0,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.letter())
    }
}
