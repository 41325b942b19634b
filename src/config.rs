//! Animator settings.
//!
//! Two presets exist: the regular turn speed and the slower intro speed used
//! for the opening scramble. The CLI can override any field.

use crate::curve::TurnProfile;
use crate::error::{TurnError, TurnResult};

/// Distance between neighbouring block centers.
///
/// The cube builder and the animator must agree on it exactly, otherwise the
/// snap after each turn lands on the wrong grid cell.
pub const DEFAULT_SPACING: f32 = 1.1;

/// Keyframe spacing in frames.
pub const DEFAULT_FRAME_STEP: u32 = 8;

/// Frames for one quarter turn at regular speed.
pub const DEFAULT_TURN_FRAMES: u32 = 16;

/// Frames for one quarter turn during the intro.
pub const INTRO_TURN_FRAMES: u32 = 24;

/// Playback rate of the animation clock.
pub const DEFAULT_FRAME_RATE: f32 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorConfig {
    pub spacing: f32,
    pub frame_step: u32,
    pub turn_frames: u32,
    /// Animation frames per second of wall-clock time.
    pub frame_rate: f32,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            frame_step: DEFAULT_FRAME_STEP,
            turn_frames: DEFAULT_TURN_FRAMES,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

impl AnimatorConfig {
    /// The slower preset used for the opening scramble.
    pub fn intro() -> Self {
        Self {
            turn_frames: INTRO_TURN_FRAMES,
            ..Self::default()
        }
    }

    /// Rejects settings that cannot produce a usable turn animation.
    pub fn validate(&self) -> TurnResult<()> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(TurnError::Config(format!(
                "spacing must be positive, got {}",
                self.spacing
            )));
        }
        if self.frame_step == 0 || self.turn_frames == 0 {
            return Err(TurnError::Config(
                "frame step and turn frames must be non-zero".to_string(),
            ));
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(TurnError::Config(format!(
                "frame rate must be positive, got {}",
                self.frame_rate
            )));
        }
        Ok(())
    }

    pub fn profile(&self) -> TurnProfile {
        TurnProfile {
            frame_step: self.frame_step,
            turn_frames: self.turn_frames,
        }
    }

    /// Wall-clock duration of one quarter turn.
    pub fn turn_seconds(&self) -> f32 {
        self.turn_frames as f32 / self.frame_rate
    }
}
