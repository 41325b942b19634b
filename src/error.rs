//! Error types for the face-turn animator

use glam::Vec3;
use thiserror::Error;

use crate::moves::Move;

/// Result type for animator operations
pub type TurnResult<T> = Result<T, TurnError>;

/// Errors that can occur when requesting or configuring turns
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TurnError {
    #[error("move {mv} overlaps blocks still turning: {blocks:?}")]
    Overlap { mv: Move, blocks: Vec<String> },

    #[error("move {0} never reported completion")]
    Stalled(Move),

    #[error("block {block} would rest off the grid at {position}")]
    OffGrid { block: String, position: Vec3 },

    #[error("blocks {0:?} would land on cells their turn does not free")]
    Displaced(Vec<String>),

    #[error("cube invariant broken: {0}")]
    Invariant(String),

    #[error("invalid move notation: {0:?}")]
    Notation(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
