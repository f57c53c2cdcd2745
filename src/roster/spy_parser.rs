//! Parses pasted spy reports into raw [Combatant] records.
//!
//! A report is a sequence of blocks, each starting at a `Name:` line:
//!
//! ```text
//! Name: Alpha [123]
//! Level: 42
//!
//! You managed to get the following results:
//! Strength: 10,000
//! Defense: 5,000
//! Speed: 7,500
//! Dexterity: 2,500
//! ```
//!
//! Values are kept as text; [crate::roster::normalize] does the numeric work.

use tracing::debug;

use crate::roster::Combatant;

fn label_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let trimmed = line.trim_start();
    let head = trimmed.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    trimmed[label.len()..]
        .strip_prefix(':')
        .map(str::trim)
}

/// First value for `label` in the block, or empty when the block lacks it.
fn field(block: &[&str], label: &str) -> String {
    block
        .iter()
        .find_map(|line| label_value(line, label))
        .unwrap_or_default()
        .to_string()
}

/// Drop a trailing ` [12345]` player id from a name line.
fn strip_player_id(name_line: &str) -> &str {
    let mut search_end = name_line.len();
    while let Some(open) = name_line[..search_end].rfind(" [") {
        let rest = &name_line[open + 2..];
        if let Some(close) = rest.find(']') {
            let id = &rest[..close];
            if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
                return &name_line[..open];
            }
        }
        search_end = open;
    }
    name_line
}

fn parse_block(block: &[&str]) -> Combatant {
    let name_line = field(block, "Name");
    Combatant {
        name: strip_player_id(&name_line).to_string(),
        level: field(block, "Level"),
        speed: field(block, "Speed"),
        strength: field(block, "Strength"),
        defense: field(block, "Defense"),
        dexterity: field(block, "Dexterity"),
    }
}

pub fn parse_spy_text(text: &str) -> Vec<Combatant> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut preamble = 0_usize;

    for line in text.lines() {
        if label_value(line, "Name").is_some() {
            blocks.push(vec![line]);
        } else if let Some(current) = blocks.last_mut() {
            current.push(line);
        } else if !line.trim().is_empty() {
            preamble += 1;
        }
    }

    if preamble > 0 {
        debug!(lines = preamble, "ignored text before the first Name: line");
    }

    blocks.iter().map(|block| parse_block(block)).collect()
}
