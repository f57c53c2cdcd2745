use std::fs;
use std::path::Path;
use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_spyglass")
}

fn write_rosters(dir: &Path) -> (String, String) {
    let attackers = dir.join("attackers.txt");
    fs::write(
        &attackers,
        "Name: Alpha [1]\nStrength: 10,000,000\nDefense: 5,000,000\nSpeed: 8,000,000\nDexterity: 6,000,000\n\
         Name: Bravo [2]\nStrength: 2,000,000\nDefense: 3,000,000\nSpeed: 2,000,000\nDexterity: 2,000,000\n",
    )
    .expect("write attackers");

    let targets = dir.join("targets.json");
    fs::write(
        &targets,
        r#"[
            {"name": "Target1", "speed": "2,000,000", "strength": "3,000,000", "defense": "2,000,000", "dexterity": "2,000,000"},
            {"name": "Target2", "speed": "10,000,000", "strength": "10,000,000", "defense": "10,000,000", "dexterity": "10,000,000"}
        ]"#,
    )
    .expect("write targets");

    (
        attackers.to_string_lossy().into_owned(),
        targets.to_string_lossy().into_owned(),
    )
}

#[test]
fn match_command_emits_json_groups() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (attackers, targets) = write_rosters(dir.path());

    let output = Command::new(bin())
        .args(["match", "--attackers", &attackers, "--targets", &targets])
        .args(["--min-class", "overmatched"])
        .output()
        .expect("match should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("match should emit json");
    let groups = payload.as_array().expect("array of groups");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["target"]["name"], "Target2");
}

#[test]
fn match_command_writes_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (attackers, targets) = write_rosters(dir.path());

    let output = Command::new(bin())
        .args(["match", "--attackers", &attackers, "--targets", &targets])
        .args(["--min-class", "favored", "--format", "csv"])
        .output()
        .expect("match should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "target,target_total,attacker,score,class");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Target1,"));
    assert!(lines[1].ends_with(",overpowered"));
}

#[test]
fn match_command_rejects_unknown_class() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (attackers, targets) = write_rosters(dir.path());

    let output = Command::new(bin())
        .args(["match", "--attackers", &attackers, "--targets", &targets])
        .args(["--min-class", "trivial"])
        .output()
        .expect("match should run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn match_command_fails_on_missing_roster() {
    let output = Command::new(bin())
        .args(["match", "--attackers", "/definitely/not/here.txt", "--targets", "x.json"])
        .output()
        .expect("match should run");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not read roster"));
}

#[test]
fn parse_command_prints_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (attackers, _) = write_rosters(dir.path());

    let output = Command::new(bin())
        .args(["parse", &attackers])
        .output()
        .expect("parse should run");
    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("parse should emit json");
    assert_eq!(payload[0]["name"], "Alpha");
    assert_eq!(payload[1]["strength"], "2,000,000");
}

#[test]
fn missing_subcommand_prints_usage() {
    let output = Command::new(bin()).output().expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}
