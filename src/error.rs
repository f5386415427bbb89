use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TowerError {
    #[error("unexpected jet character {character:?} at position {position}")]
    InvalidJet { character: char, position: usize },

    #[error("jet pattern is empty")]
    EmptyJets,

    #[error("malformed shape mask: {0}")]
    InvalidMask(String),

    #[error("no falling shape is active")]
    NoFallingShape,

    #[error("a shape is already falling")]
    ShapeAlreadyFalling,

    #[error("settling would overwrite rock at row {row}, column {column}")]
    OccupancyConflict { row: i64, column: i64 },

    #[error("no cycle found within {cutoff} dropped shapes")]
    CycleNotFound { cutoff: u64 },

    #[error("height history has {recorded} entries but entry {needed} is required")]
    HistoryTooShort { needed: u64, recorded: u64 },
}
