//! Attacker x target match matrix: construction, ordering and filtering.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::matcher::class::{classify, compare, MatchClass};
use crate::matcher::score::evaluate_matchup;
use crate::roster::{BattleStats, Combatant};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEntry {
    pub attacker_name: String,
    pub score: f64,
    pub match_class: MatchClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchGroup {
    pub target: Combatant,
    pub attackers: Vec<MatchEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MatchMatrix {
    pub groups: Vec<MatchGroup>,
}

impl MatchMatrix {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchGroup> {
        self.groups.iter()
    }

    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.attackers.len()).sum()
    }

    pub fn group(&self, target_name: &str) -> Option<&MatchGroup> {
        self.groups.iter().find(|g| g.target.name == target_name)
    }
}

impl<'a> IntoIterator for &'a MatchMatrix {
    type Item = &'a MatchGroup;
    type IntoIter = std::slice::Iter<'a, MatchGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

struct Eligible<'a> {
    combatant: &'a Combatant,
    stats: BattleStats,
    total: u64,
}

/// Keep only combatants whose four stats all parsed, in input order.
fn eligible(roster: &[Combatant]) -> Vec<Eligible<'_>> {
    roster
        .iter()
        .filter_map(|combatant| {
            let bundle = combatant.stats();
            bundle.complete().map(|stats| Eligible {
                combatant,
                stats,
                total: bundle.total(),
            })
        })
        .collect()
}

fn score_target(target: &Eligible<'_>, attackers: &[Eligible<'_>]) -> MatchGroup {
    let mut entries: Vec<MatchEntry> = attackers
        .iter()
        .map(|attacker| {
            let score = evaluate_matchup(&attacker.stats, &target.stats);
            MatchEntry {
                attacker_name: attacker.combatant.name.clone(),
                score,
                match_class: classify(score),
            }
        })
        .collect();

    // sort_by is stable: equal scores keep attacker input order.
    entries.sort_by(|left, right| right.score.total_cmp(&left.score));

    MatchGroup {
        target: target.combatant.clone(),
        attackers: entries,
    }
}

/// Score every complete attacker against every complete target.
///
/// Combatants with any missing stat are left out on both sides. Groups are
/// ordered by descending target stat total and attackers by descending score;
/// both sorts are stable so ties keep input order. A target with no eligible
/// attackers still gets a group with an empty list.
pub fn build_matrix(attackers: &[Combatant], targets: &[Combatant]) -> MatchMatrix {
    let attackers = eligible(attackers);
    let mut targets = eligible(targets);

    targets.sort_by(|left, right| right.total.cmp(&left.total));

    // par_iter().collect() keeps target order, so results match a sequential run.
    let groups: Vec<MatchGroup> = targets
        .par_iter()
        .map(|target| score_target(target, &attackers))
        .collect();

    debug!(
        attackers = attackers.len(),
        targets = groups.len(),
        "built match matrix"
    );
    MatchMatrix { groups }
}

fn roster_from_value(value: &Value, role: &str) -> Result<Vec<Combatant>, MatchError> {
    let Some(items) = value.as_array() else {
        return Err(MatchError::InvalidInput(format!(
            "{role} must be an array of combatants"
        )));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Combatant::deserialize(item).map_err(|err| {
                MatchError::InvalidInput(format!("{role}[{index}] is not a combatant: {err}"))
            })
        })
        .collect()
}

/// Checked entry point for untyped input (JSON request bodies and the like).
/// Fails with [MatchError::InvalidInput] unless both rosters are arrays of
/// combatant records.
pub fn build_matrix_from_value(
    attackers: &Value,
    targets: &Value,
) -> Result<MatchMatrix, MatchError> {
    let attackers = roster_from_value(attackers, "attackers")?;
    let targets = roster_from_value(targets, "targets")?;
    Ok(build_matrix(&attackers, &targets))
}

fn retain_groups<F>(matrix: &MatchMatrix, include_unmatched_targets: bool, keep: F) -> MatchMatrix
where
    F: Fn(&MatchEntry) -> bool,
{
    let groups = matrix
        .groups
        .iter()
        .filter_map(|group| {
            let attackers: Vec<MatchEntry> =
                group.attackers.iter().filter(|e| keep(e)).cloned().collect();
            if attackers.is_empty() && !include_unmatched_targets {
                return None;
            }
            Some(MatchGroup {
                target: group.target.clone(),
                attackers,
            })
        })
        .collect();
    MatchMatrix { groups }
}

/// Keep entries at or above `min_class`. Groups left empty are dropped unless
/// `include_unmatched_targets` is set.
pub fn filter_matrix(
    matrix: &MatchMatrix,
    min_class: MatchClass,
    include_unmatched_targets: bool,
) -> MatchMatrix {
    retain_groups(matrix, include_unmatched_targets, |entry| {
        compare(entry.match_class, min_class).is_ge()
    })
}

/// Keep entries whose class is one of `classes`. An empty set keeps everything.
pub fn filter_matrix_by_classes(
    matrix: &MatchMatrix,
    classes: &[MatchClass],
    include_unmatched_targets: bool,
) -> MatchMatrix {
    if classes.is_empty() {
        return matrix.clone();
    }
    retain_groups(matrix, include_unmatched_targets, |entry| {
        classes.contains(&entry.match_class)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even(name: &str) -> Combatant {
        Combatant::new(name, "1000", "1000", "1000", "1000")
    }

    #[test]
    fn entry_count_sums_groups() {
        let matrix = build_matrix(&[even("a"), even("b")], &[even("t1"), even("t2")]);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.entry_count(), 4);
        assert!(matrix.group("t1").is_some());
        assert!(matrix.group("missing").is_none());
    }

    #[test]
    fn empty_class_set_keeps_matrix() {
        let matrix = build_matrix(&[even("a")], &[even("t")]);
        assert_eq!(filter_matrix_by_classes(&matrix, &[], false), matrix);
    }

    #[test]
    fn element_errors_name_the_index() {
        let attackers = serde_json::json!([{"name": "ok"}, 5]);
        let err = build_matrix_from_value(&attackers, &serde_json::json!([]))
            .expect_err("number is not a combatant");
        let MatchError::InvalidInput(message) = err;
        assert!(message.contains("attackers[1]"), "{message}");
    }
}
