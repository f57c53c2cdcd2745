//! Raw combatant records and their normalized stat bundles.
//!
//! A [Combatant] carries stats exactly as they were pasted or imported: text
//! that may hold comma thousands separators, an "N/A" style sentinel, or
//! nothing at all. [normalize] turns that into a [StatBundle] without ever
//! failing; anything unparseable becomes `None` and the bundle is simply
//! incomplete.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown for totals of incomplete bundles.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    #[serde(default, deserialize_with = "stat_text")]
    pub name: String,
    #[serde(default, deserialize_with = "stat_text")]
    pub level: String,
    #[serde(default, deserialize_with = "stat_text")]
    pub speed: String,
    #[serde(default, deserialize_with = "stat_text")]
    pub strength: String,
    #[serde(default, deserialize_with = "stat_text")]
    pub defense: String,
    #[serde(default, deserialize_with = "stat_text")]
    pub dexterity: String,
}

/// Accept strings, bare numbers and null for any raw field. Numbers keep
/// their decimal text so they go through the same parsing path as pasted text.
/// Non-negative floats are cut down to whole stats (saturating at `u64::MAX`,
/// which also covers integers too large for `u64`).
fn stat_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawField {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    let raw = Option::<RawField>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawField::Text(text)) => text,
        Some(RawField::Unsigned(value)) => value.to_string(),
        Some(RawField::Signed(value)) => value.to_string(),
        Some(RawField::Float(value)) if value.is_finite() && value >= 0.0 => {
            (value.trunc() as u64).to_string()
        }
        Some(RawField::Float(value)) => value.to_string(),
        None => String::new(),
    })
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        speed: impl Into<String>,
        strength: impl Into<String>,
        defense: impl Into<String>,
        dexterity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            level: String::new(),
            speed: speed.into(),
            strength: strength.into(),
            defense: defense.into(),
            dexterity: dexterity.into(),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn stats(&self) -> StatBundle {
        normalize(self)
    }
}

/// Normalized numeric stats. `Some(0)` is a real value; `None` means missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBundle {
    pub speed: Option<u64>,
    pub strength: Option<u64>,
    pub defense: Option<u64>,
    pub dexterity: Option<u64>,
}

/// Numeric scoring input. Only obtainable from a complete [StatBundle] via
/// [StatBundle::complete], or built directly when the caller already holds
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattleStats {
    pub speed: f64,
    pub strength: f64,
    pub defense: f64,
    pub dexterity: f64,
}

impl BattleStats {
    pub const fn new(speed: f64, strength: f64, defense: f64, dexterity: f64) -> Self {
        Self {
            speed,
            strength,
            defense,
            dexterity,
        }
    }
}

impl StatBundle {
    fn fields(&self) -> [Option<u64>; 4] {
        [self.speed, self.strength, self.defense, self.dexterity]
    }

    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(Option::is_some)
    }

    /// Sum of the four stats with missing values counted as zero. Only used to
    /// rank targets; scores never see incomplete bundles.
    pub fn total(&self) -> u64 {
        self.fields()
            .iter()
            .fold(0_u64, |total, value| total.saturating_add(value.unwrap_or(0)))
    }

    pub fn complete(&self) -> Option<BattleStats> {
        Some(BattleStats {
            speed: self.speed? as f64,
            strength: self.strength? as f64,
            defense: self.defense? as f64,
            dexterity: self.dexterity? as f64,
        })
    }

    /// Total with thousands separators, or [NOT_AVAILABLE] when any stat is missing.
    pub fn formatted_total(&self) -> String {
        if self.is_complete() {
            format_thousands(self.total())
        } else {
            NOT_AVAILABLE.to_string()
        }
    }
}

/// Parse one raw stat field: trim, drop comma separators, read an unsigned integer.
pub fn parse_stat(raw: &str) -> Option<u64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<u64>().ok()
}

pub fn normalize(raw: &Combatant) -> StatBundle {
    StatBundle {
        speed: parse_stat(&raw.speed),
        strength: parse_stat(&raw.strength),
        defense: parse_stat(&raw.defense),
        dexterity: parse_stat(&raw.dexterity),
    }
}

pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
