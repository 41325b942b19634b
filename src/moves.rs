//! Face-turn identifiers and move notation.
//!
//! A move is one of six faces plus a turn direction. Each face fixes one grid
//! axis at an extreme layer (0 or 2) and rotates the 9 blocks on that layer
//! about the face's outward normal.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::error::TurnError;

/// One of the three cube axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along the positive axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Position of this axis in a `(x, y, z)` tuple or a 3-digit name.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// The six turnable faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Left,
    Right,
    Up,
    Down,
    Front,
    Back,
}

/// All faces in notation order.
pub const FACES: [Face; 6] = [
    Face::Left,
    Face::Right,
    Face::Up,
    Face::Down,
    Face::Front,
    Face::Back,
];

impl Face {
    /// The axis held fixed by this face (also the rotation axis).
    pub fn axis(self) -> Axis {
        match self {
            Face::Left | Face::Right => Axis::X,
            Face::Up | Face::Down => Axis::Y,
            Face::Front | Face::Back => Axis::Z,
        }
    }

    /// Grid value (0 or 2) of the fixed axis.
    pub fn layer(self) -> i32 {
        match self {
            Face::Left | Face::Down | Face::Front => 0,
            Face::Right | Face::Up | Face::Back => 2,
        }
    }

    /// Outward normal of the face.
    pub fn normal(self) -> Vec3 {
        let axis = self.axis().unit();
        if self.layer() == 0 {
            -axis
        } else {
            axis
        }
    }

    /// Selection pattern over the three name digits, e.g. `"0xx"` for Left.
    pub fn pattern(self) -> String {
        let mut pattern = ['x'; 3];
        pattern[self.axis().index()] = char::from(b'0' + self.layer() as u8);
        pattern.iter().collect()
    }

    pub fn symbol(self) -> char {
        match self {
            Face::Left => 'L',
            Face::Right => 'R',
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        FACES
            .iter()
            .copied()
            .find(|face| face.symbol() == symbol.to_ascii_uppercase())
    }
}

/// Turn direction, as seen when looking at the face from outside the cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Sign of the right-hand rotation angle about the face's outward normal.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Clockwise => -1.0,
            Direction::CounterClockwise => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// A single quarter turn of one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub face: Face,
    pub direction: Direction,
}

impl Move {
    pub const fn new(face: Face, direction: Direction) -> Self {
        Self { face, direction }
    }

    pub const fn clockwise(face: Face) -> Self {
        Self::new(face, Direction::Clockwise)
    }

    pub const fn counter_clockwise(face: Face) -> Self {
        Self::new(face, Direction::CounterClockwise)
    }

    /// The move that undoes this one.
    pub fn inverse(self) -> Self {
        Self::new(self.face, self.direction.reversed())
    }

    /// All twelve moves, clockwise before counter-clockwise for each face.
    pub fn all() -> impl Iterator<Item = Move> {
        FACES
            .into_iter()
            .flat_map(|face| [Move::clockwise(face), Move::counter_clockwise(face)])
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face.symbol())?;
        if self.direction == Direction::CounterClockwise {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = TurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let moves = parse_sequence(s)?;
        match moves.as_slice() {
            [single] => Ok(*single),
            _ => Err(TurnError::Notation(s.to_string())),
        }
    }
}

/// Parses a run of moves such as `"L'R'UDFBL'R'"` or `"L' R' U"`.
///
/// A prime (`'`) applies to the face letter directly before it.
pub fn parse_sequence(notation: &str) -> Result<Vec<Move>, TurnError> {
    let mut moves: Vec<Move> = Vec::new();
    let mut primed_last = false;

    for symbol in notation.chars() {
        if symbol.is_whitespace() || symbol == ',' {
            primed_last = true;
            continue;
        }
        if symbol == '\'' {
            match moves.last_mut() {
                Some(last) if !primed_last => {
                    last.direction = Direction::CounterClockwise;
                    primed_last = true;
                }
                _ => return Err(TurnError::Notation(notation.to_string())),
            }
            continue;
        }
        let face =
            Face::from_symbol(symbol).ok_or_else(|| TurnError::Notation(notation.to_string()))?;
        moves.push(Move::clockwise(face));
        primed_last = false;
    }

    Ok(moves)
}

/// Formats moves back into compact notation.
pub fn format_sequence(moves: &[Move]) -> String {
    moves.iter().map(Move::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_patterns_match_layout() {
        let patterns: Vec<String> = FACES.iter().map(|face| face.pattern()).collect();
        assert_eq!(patterns, ["0xx", "2xx", "x2x", "x0x", "xx0", "xx2"]);
    }

    #[test]
    fn test_normals_point_outward() {
        assert_eq!(Face::Left.normal(), Vec3::NEG_X);
        assert_eq!(Face::Right.normal(), Vec3::X);
        assert_eq!(Face::Up.normal(), Vec3::Y);
        assert_eq!(Face::Down.normal(), Vec3::NEG_Y);
        assert_eq!(Face::Front.normal(), Vec3::NEG_Z);
        assert_eq!(Face::Back.normal(), Vec3::Z);
    }

    #[test]
    fn test_parse_intro_sequence() {
        let moves = parse_sequence("L'R'UDFBL'R'").unwrap();
        assert_eq!(moves.len(), 8);
        assert_eq!(moves[0], Move::counter_clockwise(Face::Left));
        assert_eq!(moves[2], Move::clockwise(Face::Up));
        assert_eq!(format_sequence(&moves), "L'R'UDFBL'R'");
    }

    #[test]
    fn test_parse_accepts_spaces_and_lowercase() {
        let moves = parse_sequence("r u' f").unwrap();
        assert_eq!(
            moves,
            vec![
                Move::clockwise(Face::Right),
                Move::counter_clockwise(Face::Up),
                Move::clockwise(Face::Front),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_bad_notation() {
        assert!(parse_sequence("LX").is_err());
        assert!(parse_sequence("'L").is_err());
        assert!(parse_sequence("L''").is_err());
        assert!("LR".parse::<Move>().is_err());
    }

    #[test]
    fn test_single_move_roundtrip_through_display() {
        for mv in Move::all() {
            assert_eq!(mv.to_string().parse::<Move>().unwrap(), mv);
        }
    }

    #[test]
    fn test_inverse_flips_direction_only() {
        let mv = Move::clockwise(Face::Back);
        assert_eq!(mv.inverse(), Move::counter_clockwise(Face::Back));
        assert_eq!(mv.inverse().inverse(), mv);
    }
}
