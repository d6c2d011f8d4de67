use thiserror::Error;

use crate::types::ChunkId;

/// Caller bugs surfaced by the engine. User-reachable input problems are
/// clamped or reported through [`SplitRejection`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("boundary positions must strictly increase (index {index}: {previous} then {position})")]
    UnorderedBoundaries {
        index: usize,
        previous: usize,
        position: usize,
    },

    #[error("boundary score {score} at index {index} is outside 0..=10")]
    ScoreOutOfRange { index: usize, score: f32 },

    #[error("boundary at {position} is outside the text interior (length {text_len}) or not on a char boundary")]
    BoundaryOutOfRange { position: usize, text_len: usize },

    #[error("chunk {0} not found")]
    UnknownChunk(ChunkId),

    #[error("chunks {0} and {1} are not adjacent")]
    NotAdjacent(ChunkId, ChunkId),

    #[error("unknown {kind} '{value}'")]
    UnknownOption { kind: &'static str, value: String },
}

/// Why a manual split was refused. The chunk list is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRejection {
    #[error("chunk {0} not found")]
    UnknownChunk(ChunkId),

    #[error("position {position} is not strictly inside chunk span {start}..{end}")]
    OutsideSpan {
        position: usize,
        start: usize,
        end: usize,
    },

    #[error("position {0} or the chunk's span edges do not fall on a character boundary")]
    NotCharBoundary(usize),

    #[error("splitting at {0} would leave an empty side")]
    EmptySide(usize),
}

pub type Result<T> = std::result::Result<T, EngineError>;
