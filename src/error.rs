use core::fmt;
use thiserror::Error;

use crate::coordinate::Coordinate;

/// Which end of a query a [MazeError::EndpointBlocked] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    OutOfBounds,
    Wall,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BlockReason::OutOfBounds => write!(f, "is out of bounds"),
            BlockReason::Wall => write!(f, "is a wall"),
        }
    }
}

/// Failures of maze construction and path search. All of them are terminal for the request.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("invalid grid dimensions {rows}x{cols}: both must be positive")]
    InvalidDimensions { rows: i32, cols: i32 },
    #[error("grid of {rows}x{cols} cells exceeds the supported size")]
    GridTooLarge { rows: i32, cols: i32 },
    #[error("{endpoint} {coordinate} {reason}")]
    EndpointBlocked {
        endpoint: Endpoint,
        coordinate: Coordinate,
        reason: BlockReason,
    },
    #[error("no path found from {start} to {end}")]
    NoPathFound { start: Coordinate, end: Coordinate },
}

/// Failures while reading a query from line-oriented text.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input line: expected {0}")]
    MissingLine(&'static str),
    #[error("expected {expected} values on the {line} line, found {found}")]
    FieldCount {
        line: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("could not parse {value:?} as an integer: {source}")]
    ParseInt {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
