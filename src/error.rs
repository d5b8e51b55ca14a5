//! Errors that can be produced while building or querying a grid.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A configuration could not be turned into a grid.  These are only ever produced while loading or constructing a
/// simulation, never in the middle of a step.
#[derive(Debug, Error)]
pub enum ConfError {
    #[error("required parameter `{0}` is missing")]
    MissingParameter(String),
    #[error("parameter `{name}` has non-numeric value `{value}`")]
    NonNumericParameter { name: String, value: String },
    #[error("parameter `{name}` {reason}")]
    InvalidParameter { name: String, reason: &'static str },
    #[error("`{0}` is not a valid cell state for this grid type")]
    UnknownState(String),
    #[error("layout places `{state}` at ({row}, {col}), outside of the {rows}x{columns} grid")]
    PlacementOutOfBounds {
        state: String,
        row: usize,
        col: usize,
        rows: usize,
        columns: usize,
    },
    #[error("grid must have at least one row and one column (got {rows}x{columns})")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("a {rows}x{columns} grid exceeds the limit of {max} cells")]
    GridTooLarge { rows: usize, columns: usize, max: usize },
    #[error("unable to read configuration file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed configuration")]
    Parse(#[from] serde_json::Error),
}

/// A position lookup fell outside of the grid.  The sweep never produces these; seeing one means the caller asked
/// for a coordinate that doesn't exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("({row}, {col}) is outside of the {rows}x{columns} grid")]
pub struct OutOfBounds {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub columns: usize,
}
