//! Flatten a [MatchMatrix] into CSV, one row per attacker entry.
//!
//! Columns: `target,target_total,attacker,score,class`. A group with no
//! entries still emits one row with the attacker columns left blank, so
//! unmatched targets stay visible in spreadsheets.

use serde::Serialize;

use crate::matcher::matrix::MatchMatrix;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    target: &'a str,
    target_total: String,
    attacker: &'a str,
    score: String,
    class: &'a str,
}

pub fn matrix_to_csv_writer<W: std::io::Write>(
    matrix: &MatchMatrix,
    writer: W,
) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    for group in matrix {
        let target_total = group.target.stats().formatted_total();
        if group.attackers.is_empty() {
            out.serialize(CsvRow {
                target: &group.target.name,
                target_total: target_total.clone(),
                attacker: "",
                score: String::new(),
                class: "",
            })?;
            continue;
        }
        for entry in &group.attackers {
            out.serialize(CsvRow {
                target: &group.target.name,
                target_total: target_total.clone(),
                attacker: &entry.attacker_name,
                score: format!("{:.4}", entry.score),
                class: entry.match_class.key(),
            })?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn matrix_to_csv(matrix: &MatchMatrix) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    matrix_to_csv_writer(matrix, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::build_matrix;
    use crate::roster::Combatant;

    #[test]
    fn header_then_one_row_per_entry() {
        let attackers = vec![Combatant::new("Alpha", "1000", "1000", "1000", "1000")];
        let targets = vec![Combatant::new("Target", "1000", "1000", "1000", "1000")];
        let csv = matrix_to_csv(&build_matrix(&attackers, &targets)).expect("csv export");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "target,target_total,attacker,score,class");
        assert_eq!(lines[1], "Target,\"4,000\",Alpha,0.0000,even");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn unmatched_target_gets_blank_attacker_row() {
        let targets = vec![Combatant::new("Lonely", "1", "2", "3", "4")];
        let csv = matrix_to_csv(&build_matrix(&[], &targets)).expect("csv export");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Lonely,10,,,");
    }
}
