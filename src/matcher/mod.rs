pub mod class;
pub mod export_csv;
pub mod matrix;
pub mod score;

pub use class::{
    classify, compare, MatchClass, ScoreFloor, EVEN_FLOOR, FAVORED_FLOOR, OVERPOWERED_FLOOR,
    UNFAVORED_FLOOR,
};
pub use export_csv::{matrix_to_csv, matrix_to_csv_writer};
pub use matrix::{
    build_matrix, build_matrix_from_value, filter_matrix, filter_matrix_by_classes, MatchEntry,
    MatchError, MatchGroup, MatchMatrix,
};
pub use score::{
    evaluate_breakdown, evaluate_breakdown_with, evaluate_matchup, log_ratio, safe_ratio,
    MatchupBreakdown, ScoringWeights, DEFAULT_WEIGHTS,
};
