//! Error types for grid editing and search

use thiserror::Error;

use crate::pathfinding::SearchState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfBounds { x: i32, y: i32, cols: i32, rows: i32 },

    #[error("cannot pathfind: both a start and an end tile need to exist (start: {has_start}, end: {has_end})")]
    MissingNavigationPoints { has_start: bool, has_end: bool },

    #[error("search engine is {0:?}, reset before searching again")]
    SearchNotIdle(SearchState),

    #[error("grid cannot be modified until it is reset")]
    GridLocked,
}

pub type Result<T> = std::result::Result<T, GridError>;
