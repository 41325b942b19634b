//! Keyframed curves and the quarter-turn curve builder.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

/// Keyframe layout of one quarter turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnProfile {
    /// Frames between consecutive keyframes.
    pub frame_step: u32,
    /// Frame at which the turn reaches 90 degrees.
    pub turn_frames: u32,
}

impl TurnProfile {
    /// Keyframe positions: every `frame_step` from 0, always ending exactly on
    /// `turn_frames` even when the step does not divide it.
    pub fn frames(&self) -> Vec<u32> {
        let step = self.frame_step.max(1) as usize;
        let mut frames: Vec<u32> = (0..self.turn_frames).step_by(step).collect();
        frames.push(self.turn_frames);
        frames
    }
}

/// A value at a given animation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe<T> {
    pub frame: u32,
    pub value: T,
}

/// Values that can be blended between two keyframes.
pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f32) -> Self;
}

impl Interpolate for Vec3 {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

impl Interpolate for Quat {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self.slerp(to, t)
    }
}

/// Keyframes in ascending frame order, starting at frame 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve<T> {
    keys: Vec<Keyframe<T>>,
}

impl<T: Interpolate> Curve<T> {
    /// Builds a curve; returns `None` unless the keys are non-empty, strictly
    /// ascending and start at frame 0.
    pub fn from_keys(keys: Vec<Keyframe<T>>) -> Option<Self> {
        let starts_at_zero = keys.first().is_some_and(|key| key.frame == 0);
        let ascending = keys.windows(2).all(|pair| pair[0].frame < pair[1].frame);
        (starts_at_zero && ascending).then_some(Self { keys })
    }

    pub fn keys(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    pub fn last_frame(&self) -> u32 {
        self.keys.last().map_or(0, |key| key.frame)
    }

    pub fn first_value(&self) -> T {
        self.keys[0].value
    }

    pub fn last_value(&self) -> T {
        self.keys[self.keys.len() - 1].value
    }

    /// Samples the curve, clamping outside the keyed range.
    pub fn sample(&self, frame: f32) -> T {
        let next = self.keys.partition_point(|key| (key.frame as f32) <= frame);
        if next == 0 {
            return self.first_value();
        }
        if next == self.keys.len() {
            return self.last_value();
        }
        let from = &self.keys[next - 1];
        let to = &self.keys[next];
        let t = (frame - from.frame as f32) / (to.frame - from.frame) as f32;
        from.value.interpolate(to.value, t)
    }
}

/// Position and orientation curves of one block during one turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnCurves {
    pub position: Curve<Vec3>,
    pub orientation: Curve<Quat>,
}

impl TurnCurves {
    pub fn last_frame(&self) -> u32 {
        self.position.last_frame().max(self.orientation.last_frame())
    }

    pub fn sample(&self, frame: f32) -> (Vec3, Quat) {
        (self.position.sample(frame), self.orientation.sample(frame))
    }

    /// Transform at the end of the turn.
    pub fn final_transform(&self) -> (Vec3, Quat) {
        (self.position.last_value(), self.orientation.last_value())
    }
}

/// Samples a quarter turn of a block about `axis` through `pivot`.
///
/// At each keyframe the incremental rotation is `angle` about `axis`, with
/// `angle = sign * 90deg * frame / turn_frames`; the block's position is
/// rotated about the pivot and its orientation is the incremental rotation
/// applied on top of `baseline`. The last key is exactly 90 degrees.
pub fn build_turn_curves(
    start: Vec3,
    baseline: Quat,
    pivot: Vec3,
    axis: Vec3,
    sign: f32,
    profile: TurnProfile,
) -> TurnCurves {
    let axis = axis.normalize();
    let offset = start - pivot;
    let frames = profile.frames();

    let mut position_keys = Vec::with_capacity(frames.len());
    let mut orientation_keys = Vec::with_capacity(frames.len());
    for frame in frames {
        let progress = frame as f32 / profile.turn_frames as f32;
        let turn = Quat::from_axis_angle(axis, sign * FRAC_PI_2 * progress);
        position_keys.push(Keyframe {
            frame,
            value: pivot + turn * offset,
        });
        orientation_keys.push(Keyframe {
            frame,
            value: (turn * baseline).normalize(),
        });
    }

    TurnCurves {
        position: Curve { keys: position_keys },
        orientation: Curve {
            keys: orientation_keys,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: TurnProfile = TurnProfile {
        frame_step: 8,
        turn_frames: 16,
    };

    #[test]
    fn test_frames_end_exactly_on_turn() {
        assert_eq!(PROFILE.frames(), vec![0, 8, 16]);
        let intro = TurnProfile {
            frame_step: 8,
            turn_frames: 24,
        };
        assert_eq!(intro.frames(), vec![0, 8, 16, 24]);
        let uneven = TurnProfile {
            frame_step: 5,
            turn_frames: 12,
        };
        assert_eq!(uneven.frames(), vec![0, 5, 10, 12]);
    }

    #[test]
    fn test_from_keys_requires_frame_zero_and_order() {
        let key = |frame| Keyframe {
            frame,
            value: Vec3::ZERO,
        };
        assert!(Curve::from_keys(vec![key(0), key(4)]).is_some());
        assert!(Curve::<Vec3>::from_keys(vec![]).is_none());
        assert!(Curve::from_keys(vec![key(2), key(4)]).is_none());
        assert!(Curve::from_keys(vec![key(0), key(4), key(4)]).is_none());
    }

    #[test]
    fn test_sample_clamps_and_interpolates() {
        let curve = Curve::from_keys(vec![
            Keyframe {
                frame: 0,
                value: Vec3::ZERO,
            },
            Keyframe {
                frame: 10,
                value: Vec3::new(10.0, 0.0, 0.0),
            },
        ])
        .unwrap();
        assert_eq!(curve.sample(-3.0), Vec3::ZERO);
        assert_eq!(curve.sample(5.0), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(curve.sample(99.0), Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_turn_curves_rotate_about_pivot() {
        let pivot = Vec3::new(1.1, 0.0, 0.0);
        let start = Vec3::new(1.1, 1.1, 0.0);
        let curves = build_turn_curves(start, Quat::IDENTITY, pivot, Vec3::X, 1.0, PROFILE);

        assert_eq!(curves.position.keys()[0].value, start);
        assert_eq!(curves.orientation.keys()[0].value, Quat::IDENTITY);
        let (end, rotation) = curves.final_transform();
        assert!(end.abs_diff_eq(Vec3::new(1.1, 0.0, 1.1), 1e-5));
        assert!(rotation.abs_diff_eq(Quat::from_rotation_x(FRAC_PI_2), 1e-6));
        // every key keeps its distance to the pivot
        for key in curves.position.keys() {
            assert!(((key.value - pivot).length() - 1.1).abs() < 1e-5);
        }
    }

    #[test]
    fn test_turn_curves_compose_on_baseline() {
        let baseline = Quat::from_rotation_y(FRAC_PI_2);
        let curves =
            build_turn_curves(Vec3::ZERO, baseline, Vec3::ZERO, Vec3::Z, -1.0, PROFILE);
        let (_, rotation) = curves.final_transform();
        let expected = Quat::from_rotation_z(-FRAC_PI_2) * baseline;
        assert!(rotation.abs_diff_eq(expected, 1e-6));
        assert_eq!(curves.last_frame(), 16);
    }
}
