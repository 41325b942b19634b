//! The 27 blocks of the cube and their grid bookkeeping.

use glam::{Quat, Vec3};

use crate::error::{TurnError, TurnResult};
use crate::geometry::{Coord, Orientation};
use crate::grid::{self, BlockId, BlockIndex, GRID_SIZE};
use crate::player::NodeStore;

/// One unit cell of the cube.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Grid coordinate the block was created at.
    pub home: Coord,
    /// Grid coordinate the block currently rests at.
    pub coord: Coord,
    /// World position; exactly `(coord - 1) * spacing` while at rest.
    pub position: Vec3,
    /// Live rotation, animated while a turn is in flight.
    pub rotation: Quat,
    /// Canonical orientation class at rest.
    pub orientation: Orientation,
}

impl Block {
    /// Display label derived from the current coordinate.
    pub fn name(&self) -> String {
        grid::block_name(self.coord)
    }
}

/// A block's coordinate change during one committed turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockMove {
    pub block: BlockId,
    pub from: Coord,
    pub to: Coord,
}

/// The full 3x3x3 cube: blocks plus the coordinate index.
#[derive(Clone, Debug)]
pub struct Cube {
    spacing: f32,
    blocks: Vec<Block>,
    index: BlockIndex,
}

impl Cube {
    /// Builds a solved cube with blocks `spacing` apart, centered on the origin.
    pub fn new(spacing: f32) -> Self {
        let blocks = (0..GRID_SIZE)
            .map(|cell| {
                let coord = grid::idx_to_coord(cell);
                Block {
                    id: BlockId(cell as u8),
                    home: coord,
                    coord,
                    position: grid_position(coord, spacing),
                    rotation: Quat::IDENTITY,
                    orientation: Orientation::IDENTITY,
                }
            })
            .collect();

        Self {
            spacing,
            blocks,
            index: BlockIndex::solved(),
        }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    pub fn index(&self) -> &BlockIndex {
        &self.index
    }

    /// World position of a grid coordinate.
    pub fn grid_position(&self, coord: Coord) -> Vec3 {
        grid_position(coord, self.spacing)
    }

    /// Rounds a world position to the nearest grid coordinate, or `None`
    /// when that coordinate lies outside the cube.
    pub fn snap(&self, position: Vec3) -> Option<Coord> {
        let scaled = (position / self.spacing).round();
        let coord = (
            scaled.x as i32 + 1,
            scaled.y as i32 + 1,
            scaled.z as i32 + 1,
        );
        grid::in_bounds(coord).then_some(coord)
    }

    /// Commits the final animated transforms of one turn as the new rest state.
    ///
    /// Positions are snapped to the grid and rotations to their orientation
    /// class, so no floating point drift survives from one turn to the next.
    /// The landing cells must be exactly the cells the blocks leave; otherwise
    /// nothing is changed and the turn is refused.
    pub(crate) fn settle(
        &mut self,
        landings: &[(BlockId, Vec3, Quat)],
    ) -> TurnResult<Vec<BlockMove>> {
        let mut moves = Vec::with_capacity(landings.len());
        for &(id, position, _) in landings {
            let block = self.block(id);
            let to = self.snap(position).ok_or_else(|| TurnError::OffGrid {
                block: block.name(),
                position,
            })?;
            moves.push(BlockMove {
                block: id,
                from: block.coord,
                to,
            });
        }

        let mut freed: Vec<Coord> = moves.iter().map(|m| m.from).collect();
        let mut taken: Vec<Coord> = moves.iter().map(|m| m.to).collect();
        freed.sort_unstable();
        taken.sort_unstable();
        if freed != taken {
            let displaced = moves
                .iter()
                .filter(|m| {
                    freed.binary_search(&m.to).is_err()
                        || taken.iter().filter(|&&to| to == m.to).count() > 1
                })
                .map(|m| self.block(m.block).name())
                .collect();
            return Err(TurnError::Displaced(displaced));
        }

        for (&(id, _, rotation), block_move) in landings.iter().zip(&moves) {
            let orientation = Orientation::nearest(rotation);
            let rest_position = self.grid_position(block_move.to);

            let block = &mut self.blocks[id.index()];
            block.coord = block_move.to;
            block.position = rest_position;
            block.orientation = orientation;
            block.rotation = orientation.to_quat();
            self.index.set(block_move.to, id);
        }

        Ok(moves)
    }

    /// Puts a block's live transform back on its rest state.
    pub(crate) fn rest(&mut self, id: BlockId) {
        let position = self.grid_position(self.block(id).coord);
        let block = &mut self.blocks[id.index()];
        block.position = position;
        block.rotation = block.orientation.to_quat();
    }

    /// Returns true if every block is back home with its original orientation.
    pub fn is_solved(&self) -> bool {
        self.blocks
            .iter()
            .all(|block| block.coord == block.home && block.orientation == Orientation::IDENTITY)
    }

    /// Lists every violated rest-state invariant; empty when the cube is consistent.
    pub fn check_invariants(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if !self.index.is_bijection() {
            violations.push("index is not a bijection".to_string());
        }
        for block in &self.blocks {
            if !grid::in_bounds(block.coord) {
                violations.push(format!("block {:?} is off the grid at {:?}", block.id, block.coord));
                continue;
            }
            if block.position != self.grid_position(block.coord) {
                violations.push(format!(
                    "block {} rests at {} instead of its grid position",
                    block.name(),
                    block.position
                ));
            }
            if self.index.get(block.coord) != block.id {
                violations.push(format!("index disagrees about block {}", block.name()));
            }
            if block.rotation != block.orientation.to_quat() {
                violations.push(format!("block {} has a non-canonical rotation", block.name()));
            }
        }

        violations
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SPACING)
    }
}

impl NodeStore for Cube {
    fn find_by_name(&self, name: &str) -> Option<BlockId> {
        grid::parse_name(name).map(|coord| self.index.get(coord))
    }

    fn set_transform(&mut self, id: BlockId, position: Vec3, rotation: Quat) {
        if let Some(block) = self.blocks.get_mut(id.index()) {
            block.position = position;
            block.rotation = rotation;
        }
    }
}

fn grid_position((x, y, z): Coord, spacing: f32) -> Vec3 {
    Vec3::new((x - 1) as f32, (y - 1) as f32, (z - 1) as f32) * spacing
}
