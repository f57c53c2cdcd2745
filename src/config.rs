//! Runtime settings read from the environment. CLI flags override these per command.

use std::env;

use tracing::warn;

use crate::matcher::MatchClass;
use crate::storage::DEFAULT_STATE_PATH;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

pub const ENV_BIND: &str = "SPYGLASS_BIND";
pub const ENV_STATE: &str = "SPYGLASS_STATE";
pub const ENV_MIN_CLASS: &str = "SPYGLASS_MIN_CLASS";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: String,
    pub state_path: String,
    pub min_class: MatchClass,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            state_path: DEFAULT_STATE_PATH.to_string(),
            min_class: MatchClass::Even,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; unset or blank keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let min_class = match value(ENV_MIN_CLASS) {
            Some(raw) => MatchClass::from_key(&raw).unwrap_or_else(|| {
                warn!(
                    value = %raw,
                    "unknown {ENV_MIN_CLASS}, defaulting to {}",
                    defaults.min_class.key()
                );
                defaults.min_class
            }),
            None => defaults.min_class,
        };

        Self {
            bind_addr: value(ENV_BIND).unwrap_or(defaults.bind_addr),
            state_path: value(ENV_STATE).unwrap_or(defaults.state_path),
            min_class,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
    }

    #[test]
    fn reads_overrides_and_ignores_blank_values() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_BIND, "0.0.0.0:8080"),
            (ENV_STATE, "   "),
            (ENV_MIN_CLASS, "favored"),
        ]));
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.state_path, DEFAULT_STATE_PATH);
        assert_eq!(settings.min_class, MatchClass::Favored);
    }

    #[test]
    fn unknown_min_class_falls_back() {
        let settings = Settings::from_lookup(lookup(&[(ENV_MIN_CLASS, "trivial")]));
        assert_eq!(settings.min_class, MatchClass::Even);
    }
}
