//! Discrete difficulty tiers for matchup scores.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tiers ordered from "target heavily favoured" to "attacker heavily favoured".
/// The derived ordering follows declaration order and matches [MatchClass::ordinal].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchClass {
    Overmatched,
    Unfavored,
    Even,
    Favored,
    Overpowered,
}

/// Lower bound a score must clear to land in a tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreFloor {
    Unbounded,
    Exclusive(f64),
    Inclusive(f64),
}

impl ScoreFloor {
    pub fn admits(self, score: f64) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Exclusive(floor) => score > floor,
            Self::Inclusive(floor) => score >= floor,
        }
    }
}

pub const OVERPOWERED_FLOOR: f64 = 0.5;
pub const FAVORED_FLOOR: f64 = 0.2;
pub const EVEN_FLOOR: f64 = -0.2;
pub const UNFAVORED_FLOOR: f64 = -0.5;

impl MatchClass {
    pub const ALL: [MatchClass; 5] = [
        Self::Overmatched,
        Self::Unfavored,
        Self::Even,
        Self::Favored,
        Self::Overpowered,
    ];

    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Overmatched => 0,
            Self::Unfavored => 1,
            Self::Even => 2,
            Self::Favored => 3,
            Self::Overpowered => 4,
        }
    }

    pub const fn floor(self) -> ScoreFloor {
        match self {
            Self::Overmatched => ScoreFloor::Unbounded,
            Self::Unfavored => ScoreFloor::Exclusive(UNFAVORED_FLOOR),
            Self::Even => ScoreFloor::Inclusive(EVEN_FLOOR),
            Self::Favored => ScoreFloor::Inclusive(FAVORED_FLOOR),
            Self::Overpowered => ScoreFloor::Inclusive(OVERPOWERED_FLOOR),
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Overmatched => "overmatched",
            Self::Unfavored => "unfavored",
            Self::Even => "even",
            Self::Favored => "favored",
            Self::Overpowered => "overpowered",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overmatched => "Avoid",
            Self::Unfavored => "High Risk",
            Self::Even => "Even Match",
            Self::Favored => "Likely Win",
            Self::Overpowered => "Easy Win",
        }
    }

    /// Display colour token for presentation layers.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Overmatched => "red-600",
            Self::Unfavored => "orange-500",
            Self::Even => "yellow-500",
            Self::Favored => "green-500",
            Self::Overpowered => "green-700",
        }
    }

    /// Accepts a key (`"favored"`) or a label (`"Likely Win"`), any case.
    pub fn from_key(raw: &str) -> Option<Self> {
        let wanted = raw.trim();
        Self::ALL.into_iter().find(|class| {
            class.key().eq_ignore_ascii_case(wanted) || class.label().eq_ignore_ascii_case(wanted)
        })
    }
}

impl fmt::Display for MatchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn compare(a: MatchClass, b: MatchClass) -> Ordering {
    a.ordinal().cmp(&b.ordinal())
}

/// Strongest tier whose floor admits `score`. NaN falls through to
/// [MatchClass::Overmatched].
pub fn classify(score: f64) -> MatchClass {
    MatchClass::ALL
        .into_iter()
        .rev()
        .find(|class| class.floor().admits(score))
        .unwrap_or(MatchClass::Overmatched)
}
