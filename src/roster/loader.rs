//! Load a roster from disk. `.json` and `.yaml`/`.yml` files hold a list of
//! combatant records; anything else is treated as pasted spy-report text.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::roster::{parse_spy_text, Combatant};

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("could not read roster '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON roster '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid YAML roster '{path}': {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Json,
    Yaml,
    SpyText,
}

impl RosterFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::SpyText,
        }
    }
}

pub fn parse_roster(
    raw: &str,
    format: RosterFormat,
    origin: &str,
) -> Result<Vec<Combatant>, RosterError> {
    match format {
        RosterFormat::Json => serde_json::from_str(raw).map_err(|source| RosterError::Json {
            path: origin.to_string(),
            source,
        }),
        RosterFormat::Yaml => serde_yaml::from_str(raw).map_err(|source| RosterError::Yaml {
            path: origin.to_string(),
            source,
        }),
        RosterFormat::SpyText => Ok(parse_spy_text(raw)),
    }
}

pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Combatant>, RosterError> {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: origin.clone(),
        source,
    })?;

    let format = RosterFormat::from_path(path);
    let roster = parse_roster(&raw, format, &origin)?;

    let incomplete = roster.iter().filter(|c| !c.stats().is_complete()).count();
    if incomplete > 0 {
        warn!(
            path = %origin,
            incomplete,
            "roster has combatants with missing stats; they will not be matched"
        );
    }
    debug!(path = %origin, ?format, count = roster.len(), "loaded roster");
    Ok(roster)
}
