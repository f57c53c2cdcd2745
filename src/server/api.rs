use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::matcher::{
    build_matrix_from_value, classify, evaluate_breakdown, filter_matrix,
    filter_matrix_by_classes, MatchClass, MatchError, MatchGroup, MatchMatrix, MatchupBreakdown,
};
use crate::roster::{parse_spy_text, Combatant};
use crate::storage::{save_stamped, AppState, StateStore, StorageError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Match(#[from] MatchError),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Storage(#[from] StorageError),
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "spyglass-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseResponse {
    pub combatants: Vec<Combatant>,
    pub incomplete: usize,
}

pub fn parse_payload(body: &str) -> Result<String, ApiError> {
    let req: ParseRequest = serde_json::from_str(body)?;
    let combatants = parse_spy_text(&req.text);
    let incomplete = combatants
        .iter()
        .filter(|c| !c.stats().is_complete())
        .count();
    Ok(serde_json::to_string_pretty(&ParseResponse {
        combatants,
        incomplete,
    })?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub attackers: Value,
    #[serde(default)]
    pub targets: Value,
    /// Lowest tier to keep. Absent keeps every tier.
    #[serde(default)]
    pub min_class: Option<String>,
    #[serde(default)]
    pub include_unmatched: bool,
    /// Optional explicit set of tiers to keep, applied after `min_class`.
    #[serde(default)]
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetView {
    pub name: String,
    pub level: String,
    pub total: u64,
    pub total_formatted: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub name: String,
    pub score: f64,
    pub class: MatchClass,
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupView {
    pub target: TargetView,
    pub attackers: Vec<EntryView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub status: &'static str,
    pub min_class: MatchClass,
    pub include_unmatched: bool,
    pub groups: Vec<GroupView>,
}

fn parse_class(raw: &str, field: &str) -> Result<MatchClass, ApiError> {
    MatchClass::from_key(raw)
        .ok_or_else(|| ApiError::Validation(format!("{field}: unknown match class '{raw}'")))
}

fn group_view(group: &MatchGroup) -> GroupView {
    let stats = group.target.stats();
    GroupView {
        target: TargetView {
            name: group.target.name.clone(),
            level: group.target.level.clone(),
            total: stats.total(),
            total_formatted: stats.formatted_total(),
        },
        attackers: group
            .attackers
            .iter()
            .map(|entry| EntryView {
                name: entry.attacker_name.clone(),
                score: entry.score,
                class: entry.match_class,
                label: entry.match_class.label(),
                color: entry.match_class.color(),
            })
            .collect(),
    }
}

pub fn matrix_view(matrix: &MatchMatrix) -> Vec<GroupView> {
    matrix.iter().map(group_view).collect()
}

pub fn matches_payload(body: &str) -> Result<String, ApiError> {
    let req: MatchRequest = serde_json::from_str(body)?;
    let min_class = match req.min_class.as_deref() {
        Some(raw) => parse_class(raw, "min_class")?,
        None => MatchClass::Overmatched,
    };
    let classes = req
        .classes
        .iter()
        .map(|raw| parse_class(raw, "classes"))
        .collect::<Result<Vec<_>, _>>()?;

    let matrix = build_matrix_from_value(&req.attackers, &req.targets)?;
    let matrix = filter_matrix(&matrix, min_class, req.include_unmatched);
    let matrix = filter_matrix_by_classes(&matrix, &classes, req.include_unmatched);

    Ok(serde_json::to_string_pretty(&MatchResponse {
        status: "ok",
        min_class,
        include_unmatched: req.include_unmatched,
        groups: matrix_view(&matrix),
    })?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchupRequest {
    pub attacker: Combatant,
    pub target: Combatant,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchupResponse {
    pub attacker: String,
    pub target: String,
    pub breakdown: MatchupBreakdown,
    pub class: MatchClass,
    pub label: &'static str,
}

/// Score one pairing and show its components.
pub fn matchup_payload(body: &str) -> Result<String, ApiError> {
    let req: MatchupRequest = serde_json::from_str(body)?;
    let attacker = req.attacker.stats().complete().ok_or_else(|| {
        ApiError::Validation(format!("attacker '{}' has missing stats", req.attacker.name))
    })?;
    let target = req.target.stats().complete().ok_or_else(|| {
        ApiError::Validation(format!("target '{}' has missing stats", req.target.name))
    })?;

    let breakdown = evaluate_breakdown(&attacker, &target);
    let class = classify(breakdown.score);
    Ok(serde_json::to_string_pretty(&MatchupResponse {
        attacker: req.attacker.name,
        target: req.target.name,
        breakdown,
        class,
        label: class.label(),
    })?)
}

pub fn state_get_payload(store: &dyn StateStore) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "state": store.load()
    }))?)
}

pub fn state_put_payload(body: &str, store: &dyn StateStore) -> Result<String, ApiError> {
    let state: AppState = serde_json::from_str(body)?;
    let saved = save_stamped(store, state)?;
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "state": saved
    }))?)
}

pub fn state_delete_payload(store: &dyn StateStore) -> Result<String, ApiError> {
    store.clear()?;
    Ok(serde_json::to_string_pretty(&serde_json::json!({ "status": "ok" }))?)
}
