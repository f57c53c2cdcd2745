//! Attacker-vs-target matchup heuristic over the four battle stats.
//!
//! Each stat pairing is compared as a log10 ratio, which flattens large
//! disparities the way the game's hit and damage curves saturate: a 10x edge
//! adds the same amount whether it is 10 vs 1 or 1000 vs 100. The weighted sum
//! favours offence because the score drives target selection, not a full
//! fight simulation. Equipment, drugs and perks are not modelled.

use serde::Serialize;

use crate::roster::BattleStats;

/// Ratio used when the denominator is zero and the numerator positive.
pub const ZERO_DENOMINATOR_RATIO: f64 = 10.0;
/// A zero (or negative) numerator against a positive denominator scores as
/// `ZERO_NUMERATOR_SCALE / denominator`. Stats are whole numbers, so `1 / d` is
/// the smallest ratio a positive numerator can reach and a zero stays below it.
pub const ZERO_NUMERATOR_SCALE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringWeights {
    pub hit: f64,
    pub power: f64,
    pub dodge: f64,
    pub guard: f64,
}

pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    hit: 0.4,
    power: 0.4,
    dodge: 0.1,
    guard: 0.1,
};

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Per-pairing components of a matchup score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchupBreakdown {
    /// Attacker speed vs target dexterity.
    pub hit: f64,
    /// Attacker strength vs target defense.
    pub power: f64,
    /// Attacker dexterity vs target speed.
    pub dodge: f64,
    /// Attacker defense vs target strength.
    pub guard: f64,
    pub score: f64,
}

/// n / d with neutral or capped fallbacks, so the log below never sees
/// zero, a negative value or a non-finite operand. The result is kept inside
/// the finite positive range.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if !numerator.is_finite() || !denominator.is_finite() {
        return 1.0;
    }
    let numerator = numerator.max(0.0);
    let denominator = denominator.max(0.0);
    if denominator == 0.0 {
        return if numerator > 0.0 {
            ZERO_DENOMINATOR_RATIO
        } else {
            1.0
        };
    }
    let ratio = if numerator == 0.0 {
        ZERO_NUMERATOR_SCALE / denominator
    } else {
        numerator / denominator
    };
    ratio.clamp(f64::MIN_POSITIVE, f64::MAX)
}

pub fn log_ratio(numerator: f64, denominator: f64) -> f64 {
    safe_ratio(numerator, denominator).log10()
}

pub fn evaluate_breakdown_with(
    attacker: &BattleStats,
    target: &BattleStats,
    weights: ScoringWeights,
) -> MatchupBreakdown {
    let hit = log_ratio(attacker.speed, target.dexterity);
    let power = log_ratio(attacker.strength, target.defense);
    let dodge = log_ratio(attacker.dexterity, target.speed);
    let guard = log_ratio(attacker.defense, target.strength);

    let score = weights.hit * hit
        + weights.power * power
        + weights.dodge * dodge
        + weights.guard * guard;

    MatchupBreakdown {
        hit,
        power,
        dodge,
        guard,
        score,
    }
}

pub fn evaluate_breakdown(attacker: &BattleStats, target: &BattleStats) -> MatchupBreakdown {
    evaluate_breakdown_with(attacker, target, DEFAULT_WEIGHTS)
}

/// Positive favours the attacker, negative the target, zero is dead even.
pub fn evaluate_matchup(attacker: &BattleStats, target: &BattleStats) -> f64 {
    evaluate_breakdown(attacker, target).score
}
