//! Face-Turn Animator Library
//!
//! Animates face turns of a 3x3x3 cube of 27 independently tracked blocks:
//! per-block rotation curves about the face pivot, a cache of generated
//! curves, and a commit step that snaps every block back onto the grid.

pub mod animator;
pub mod cache;
pub mod config;
pub mod cube;
pub mod curve;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod moves;
pub mod persistence;
pub mod player;
pub mod scramble;

pub use animator::{CompletedTurn, FaceTurnAnimator};
pub use config::AnimatorConfig;
pub use error::{TurnError, TurnResult};
pub use moves::{Direction, Face, Move};
pub use scramble::{Scramble, ScrambleRunner};
