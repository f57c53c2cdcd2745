pub mod combatant;
pub mod loader;
pub mod spy_parser;

pub use combatant::{
    format_thousands, normalize, parse_stat, BattleStats, Combatant, StatBundle, NOT_AVAILABLE,
};
pub use loader::{load_roster, parse_roster, RosterError, RosterFormat};
pub use spy_parser::parse_spy_text;
