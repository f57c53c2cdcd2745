use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Settings;
use crate::matcher::{build_matrix, filter_matrix, matrix_to_csv, MatchClass, MatchMatrix};
use crate::roster::load_roster;
use crate::server;
use crate::server::api::matrix_view;
use crate::storage::JsonFileStore;

#[derive(Debug, Parser)]
#[command(name = "spyglass", about = "Rank attackers against spied targets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score an attacker roster against a target roster.
    Match {
        #[arg(long)]
        attackers: String,
        #[arg(long)]
        targets: String,
        /// Lowest tier to show (overmatched, unfavored, even, favored, overpowered).
        #[arg(long)]
        min_class: Option<String>,
        /// Keep targets that end up with no attackers.
        #[arg(long)]
        include_unmatched: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Parse a roster file and print the records as JSON.
    Parse { path: String },
    /// Run the HTTP API.
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        state: Option<String>,
    },
}

pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 2 } else { 0 };
            let _ = err.print();
            return code;
        }
    };
    let settings = Settings::from_env();

    match cli.command {
        Command::Match {
            attackers,
            targets,
            min_class,
            include_unmatched,
            format,
        } => handle_match(
            &settings,
            &attackers,
            &targets,
            min_class.as_deref(),
            include_unmatched,
            format,
        ),
        Command::Parse { path } => handle_parse(&path),
        Command::Serve { bind, state } => handle_serve(&settings, bind, state),
    }
}

fn handle_serve(settings: &Settings, bind: Option<String>, state: Option<String>) -> i32 {
    let bind_addr = bind.unwrap_or_else(|| settings.bind_addr.clone());
    let state_path = state.unwrap_or_else(|| settings.state_path.clone());
    let store = Arc::new(JsonFileStore::new(state_path));
    match server::run_server(&bind_addr, store) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_parse(path: &str) -> i32 {
    let roster = match load_roster(path) {
        Ok(roster) => roster,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    match serde_json::to_string_pretty(&roster) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize roster: {err}");
            1
        }
    }
}

fn handle_match(
    settings: &Settings,
    attackers_path: &str,
    targets_path: &str,
    min_class: Option<&str>,
    include_unmatched: bool,
    format: OutputFormat,
) -> i32 {
    let min_class = match min_class {
        Some(raw) => match MatchClass::from_key(raw) {
            Some(class) => class,
            None => {
                eprintln!("unknown match class '{raw}'");
                return 2;
            }
        },
        None => settings.min_class,
    };

    let rosters = load_roster(attackers_path)
        .and_then(|attackers| load_roster(targets_path).map(|targets| (attackers, targets)));
    let (attackers, targets) = match rosters {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let matrix = filter_matrix(&build_matrix(&attackers, &targets), min_class, include_unmatched);

    let rendered = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&matrix_view(&matrix)).map_err(|err| err.to_string())
        }
        OutputFormat::Csv => matrix_to_csv(&matrix).map_err(|err| err.to_string()),
        OutputFormat::Table => Ok(render_table(&matrix)),
    };
    match rendered {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            0
        }
        Err(err) => {
            eprintln!("failed to render matches: {err}");
            1
        }
    }
}

fn render_table(matrix: &MatchMatrix) -> String {
    let mut out = String::from("target\ttotal\tattacker\tscore\tclass\n");
    for group in matrix {
        let total = group.target.stats().formatted_total();
        if group.attackers.is_empty() {
            out.push_str(&format!("{}\t{}\t-\t-\t-\n", group.target.name, total));
        }
        for entry in &group.attackers {
            out.push_str(&format!(
                "{}\t{}\t{}\t{:.4}\t{}\n",
                group.target.name,
                total,
                entry.attacker_name,
                entry.score,
                entry.match_class.label()
            ));
        }
    }
    out
}
