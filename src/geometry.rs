//! Discrete rotations of the cube.
//!
//! A cube has 24 possible orientations in 3D space (the rotation group of a cube).
//! These are the 6 ways to choose which face points up, times 4 rotations around
//! the vertical axis. Every block's orientation at rest is one of them, so a
//! block's rotation is stored as an index into [`ROTATIONS`] and only turned
//! into a quaternion while it animates.

use std::cmp::Ordering;

use glam::{Mat3, Quat, Vec3};

use crate::moves::{Axis, Move};

/// A grid coordinate; each component is in `0..=2` for a block at rest.
pub type Coord = (i32, i32, i32);

/// Number of distinct cube orientations.
pub const NUM_ROTATIONS: usize = 24;

/// All 24 rotation functions for a cube, acting on coordinates centered on
/// the middle block.
///
/// Organized as 6 face-up choices x 4 rotations around vertical:
/// - Rotations 0-3: +Z face up
/// - Rotations 4-7: +Y face up
/// - Rotations 8-11: -Z face up
/// - Rotations 12-15: -Y face up
/// - Rotations 16-19: +X face up
/// - Rotations 20-23: -X face up
pub const ROTATIONS: [fn(Coord) -> Coord; NUM_ROTATIONS] = [
    // +Z face up (identity orientation), rotate around Z axis
    |(x, y, z)| (x, y, z),      // 0 degrees
    |(x, y, z)| (-y, x, z),     // 90 degrees
    |(x, y, z)| (-x, -y, z),    // 180 degrees
    |(x, y, z)| (y, -x, z),     // 270 degrees
    // +Y face up, rotate around Y axis
    |(x, y, z)| (x, -z, y),
    |(x, y, z)| (z, x, y),
    |(x, y, z)| (-x, z, y),
    |(x, y, z)| (-z, -x, y),
    // -Z face up, rotate around Z axis
    |(x, y, z)| (x, -y, -z),
    |(x, y, z)| (y, x, -z),
    |(x, y, z)| (-x, y, -z),
    |(x, y, z)| (-y, -x, -z),
    // -Y face up, rotate around Y axis
    |(x, y, z)| (x, z, -y),
    |(x, y, z)| (-z, x, -y),
    |(x, y, z)| (-x, -z, -y),
    |(x, y, z)| (z, -x, -y),
    // +X face up, rotate around X axis
    |(x, y, z)| (z, y, -x),
    |(x, y, z)| (-y, z, -x),
    |(x, y, z)| (-z, -y, -x),
    |(x, y, z)| (y, -z, -x),
    // -X face up, rotate around X axis
    |(x, y, z)| (-z, y, x),
    |(x, y, z)| (-y, -z, x),
    |(x, y, z)| (z, -y, x),
    |(x, y, z)| (y, z, x),
];

/// Images of the three basis vectors under a rotation; the columns of its matrix.
fn basis_images(rotate: fn(Coord) -> Coord) -> [Coord; 3] {
    [rotate((1, 0, 0)), rotate((0, 1, 0)), rotate((0, 0, 1))]
}

/// Orientation class of a block: one of the 24 cube rotations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Orientation(u8);

impl Orientation {
    pub const IDENTITY: Self = Self(0);

    /// Returns the orientation at `index` in [`ROTATIONS`], if it exists.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < NUM_ROTATIONS).then_some(Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Applies the rotation to a centered coordinate.
    pub fn apply(self, coord: Coord) -> Coord {
        ROTATIONS[self.index()](coord)
    }

    /// The exact rotation matrix of this orientation.
    pub fn to_mat3(self) -> Mat3 {
        let [x, y, z] = basis_images(ROTATIONS[self.index()]);
        let column = |(a, b, c): Coord| Vec3::new(a as f32, b as f32, c as f32);
        Mat3::from_cols(column(x), column(y), column(z))
    }

    /// The canonical quaternion of this orientation.
    pub fn to_quat(self) -> Quat {
        Quat::from_mat3(&self.to_mat3()).normalize()
    }

    /// Finds the orientation whose basis images match `images`.
    fn from_basis_images(images: [Coord; 3]) -> Option<Self> {
        ROTATIONS
            .iter()
            .position(|&rotate| basis_images(rotate) == images)
            .map(|index| Self(index as u8))
    }

    /// Snaps an arbitrary rotation to the closest of the 24 orientations.
    ///
    /// This is the canonicalization applied after every turn: whatever
    /// floating point error the animated quaternion picked up is discarded.
    pub fn nearest(rotation: Quat) -> Self {
        let rotation = rotation.normalize();
        (0..NUM_ROTATIONS)
            .map(|index| {
                let candidate = Self(index as u8);
                (candidate, rotation.dot(candidate.to_quat()).abs())
            })
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(candidate, _)| candidate)
            .unwrap_or(Self::IDENTITY)
    }

    /// The orientation reached by applying `self` first and then `next`.
    pub fn then(self, next: Orientation) -> Self {
        let images = basis_images(ROTATIONS[self.index()]).map(|image| next.apply(image));
        // the rotation group is closed, so the lookup always succeeds
        Self::from_basis_images(images).unwrap_or(Self::IDENTITY)
    }

    /// The orientation class of a single quarter turn.
    pub fn of_move(mv: Move) -> Self {
        let images = [(1, 0, 0), (0, 1, 0), (0, 0, 1)].map(|basis| rotate_centered(basis, mv));
        Self::from_basis_images(images).unwrap_or(Self::IDENTITY)
    }
}

/// Rotates a centered coordinate by a quarter turn of `mv`.
fn rotate_centered((x, y, z): Coord, mv: Move) -> Coord {
    let normal_sign = if mv.face.layer() == 0 { -1.0 } else { 1.0 };
    // right-hand quarter turn about the positive axis when true
    let positive = mv.direction.sign() * normal_sign > 0.0;

    match (mv.face.axis(), positive) {
        (Axis::X, true) => (x, -z, y),
        (Axis::X, false) => (x, z, -y),
        (Axis::Y, true) => (z, y, -x),
        (Axis::Y, false) => (-z, y, x),
        (Axis::Z, true) => (-y, x, z),
        (Axis::Z, false) => (y, -x, z),
    }
}

/// Exact integer model of a face turn on a grid coordinate.
///
/// Coordinates outside the turned layer are returned unchanged.
pub fn quarter_turn(coord: Coord, mv: Move) -> Coord {
    let components = [coord.0, coord.1, coord.2];
    if components[mv.face.axis().index()] != mv.face.layer() {
        return coord;
    }
    let (x, y, z) = rotate_centered((coord.0 - 1, coord.1 - 1, coord.2 - 1), mv);
    (x + 1, y + 1, z + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{Direction, Face};

    #[test]
    fn test_rotations_are_distinct_proper_rotations() {
        let mut seen = Vec::new();
        for index in 0..NUM_ROTATIONS {
            let orientation = Orientation::from_index(index).unwrap();
            let matrix = orientation.to_mat3();
            assert!((matrix.determinant() - 1.0).abs() < 1e-6, "Rotation {index} is not proper");
            let images = basis_images(ROTATIONS[index]);
            assert!(!seen.contains(&images), "Rotation {index} is a duplicate");
            seen.push(images);
        }
    }

    #[test]
    fn test_quaternion_matches_table() {
        for index in 0..NUM_ROTATIONS {
            let orientation = Orientation::from_index(index).unwrap();
            let q = orientation.to_quat();
            for basis in [(1, 0, 0), (0, 1, 0), (0, 0, 1)] {
                let (x, y, z) = orientation.apply(basis);
                let rotated = q * Vec3::new(basis.0 as f32, basis.1 as f32, basis.2 as f32);
                assert!(rotated.abs_diff_eq(Vec3::new(x as f32, y as f32, z as f32), 1e-5));
            }
        }
    }

    #[test]
    fn test_nearest_recovers_every_class_with_noise() {
        let wobble = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0).normalize(), 0.05);
        for index in 0..NUM_ROTATIONS {
            let orientation = Orientation::from_index(index).unwrap();
            assert_eq!(Orientation::nearest(wobble * orientation.to_quat()), orientation);
            assert_eq!(Orientation::nearest(-orientation.to_quat()), orientation);
        }
    }

    #[test]
    fn test_move_orientation_matches_quaternion_turn() {
        for mv in Move::all() {
            let turn = Quat::from_axis_angle(
                mv.face.normal(),
                mv.direction.sign() * std::f32::consts::FRAC_PI_2,
            );
            assert_eq!(Orientation::nearest(turn), Orientation::of_move(mv), "{mv}");
        }
    }

    #[test]
    fn test_four_quarter_turns_compose_to_identity() {
        for mv in Move::all() {
            let turn = Orientation::of_move(mv);
            let mut orientation = Orientation::IDENTITY;
            for _ in 0..4 {
                orientation = orientation.then(turn);
            }
            assert_eq!(orientation, Orientation::IDENTITY);
            assert_eq!(turn.then(Orientation::of_move(mv.inverse())), Orientation::IDENTITY);
        }
    }

    #[test]
    fn test_quarter_turn_keeps_layer_and_leaves_others() {
        let mv = Move::new(Face::Right, Direction::Clockwise);
        assert_eq!(quarter_turn((0, 2, 2), mv), (0, 2, 2));
        assert_eq!(quarter_turn((2, 1, 1), mv), (2, 1, 1));
        // clockwise seen from +X carries the top edge onto the front layer
        assert_eq!(quarter_turn((2, 2, 1), mv), (2, 1, 0));
    }
}
