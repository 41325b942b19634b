//! Grid indexing for the 3x3x3 cube.
//!
//! The cube is a flat array of 27 cells, one per grid coordinate, each
//! holding the id of the block that currently sits there. Face selection goes
//! through this index; block names are only derived labels.

use crate::cube::Cube;
use crate::geometry::Coord;
use crate::moves::Face;

/// Grid dimension per axis.
pub const DIM: usize = 3;

/// Number of cells in the grid.
pub const GRID_SIZE: usize = DIM * DIM * DIM;

/// Number of blocks on one face layer.
pub const LAYER_SIZE: usize = DIM * DIM;

/// Identity of a block; stable for the whole life of the cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u8);

impl BlockId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Converts (x, y, z) coordinates to a linear cell index.
///
/// Index order is x-major: `idx = x * DIM * DIM + y * DIM + z`.
#[inline(always)]
pub const fn coord_to_idx(x: i32, y: i32, z: i32) -> usize {
    (x as usize) * DIM * DIM + (y as usize) * DIM + (z as usize)
}

/// Converts a linear cell index to (x, y, z) coordinates.
#[inline(always)]
pub const fn idx_to_coord(cell_index: usize) -> Coord {
    (
        (cell_index / (DIM * DIM)) as i32,
        ((cell_index / DIM) % DIM) as i32,
        (cell_index % DIM) as i32,
    )
}

/// Returns true if every component lies on the grid.
pub fn in_bounds((x, y, z): Coord) -> bool {
    let range = 0..DIM as i32;
    range.contains(&x) && range.contains(&y) && range.contains(&z)
}

/// The 3-digit label of a grid coordinate, e.g. `"021"`.
pub fn block_name((x, y, z): Coord) -> String {
    format!("{x}{y}{z}")
}

/// Parses a 3-digit label back into a coordinate.
pub fn parse_name(name: &str) -> Option<Coord> {
    let digits: Vec<i32> = name
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as i32))
        .collect::<Option<_>>()?;
    match digits.as_slice() {
        &[x, y, z] if in_bounds((x, y, z)) => Some((x, y, z)),
        _ => None,
    }
}

/// The 9 coordinates of a face layer, in selection-pattern order.
///
/// The fixed axis takes the face's layer value; the two free axes run over
/// `0..DIM`, the first free axis varying slowest.
pub fn layer(face: Face) -> [Coord; LAYER_SIZE] {
    let fixed_axis = face.axis().index();
    let mut coords = [(0, 0, 0); LAYER_SIZE];

    for a in 0..DIM as i32 {
        for b in 0..DIM as i32 {
            let mut components = [0; 3];
            let mut free = [a, b].into_iter();
            for (axis, component) in components.iter_mut().enumerate() {
                *component = if axis == fixed_axis {
                    face.layer()
                } else {
                    free.next().unwrap_or(0)
                };
            }
            coords[(a as usize) * DIM + b as usize] = (components[0], components[1], components[2]);
        }
    }

    coords
}

/// Center of a face layer in grid coordinates.
pub fn layer_center(face: Face) -> Coord {
    let mut components = [1; 3];
    components[face.axis().index()] = face.layer();
    (components[0], components[1], components[2])
}

/// Mapping from grid coordinate to the block occupying it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockIndex {
    cells: [BlockId; GRID_SIZE],
}

impl BlockIndex {
    /// Index of a freshly built cube: block `i` sits in cell `i`.
    pub fn solved() -> Self {
        let mut cells = [BlockId(0); GRID_SIZE];
        for (cell, id) in cells.iter_mut().enumerate() {
            *id = BlockId(cell as u8);
        }
        Self { cells }
    }

    pub fn get(&self, (x, y, z): Coord) -> BlockId {
        self.cells[coord_to_idx(x, y, z)]
    }

    pub fn set(&mut self, (x, y, z): Coord, id: BlockId) {
        self.cells[coord_to_idx(x, y, z)] = id;
    }

    /// The blocks currently on a face, in [`layer`] order.
    pub fn select(&self, face: Face) -> Vec<BlockId> {
        layer(face).iter().map(|&coord| self.get(coord)).collect()
    }

    /// Iterates `(coord, block)` pairs in cell order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, BlockId)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(cell, &id)| (idx_to_coord(cell), id))
    }

    /// Returns true if every block appears in exactly one cell.
    pub fn is_bijection(&self) -> bool {
        let mut seen = [false; GRID_SIZE];
        for id in &self.cells {
            if id.index() >= GRID_SIZE || seen[id.index()] {
                return false;
            }
            seen[id.index()] = true;
        }
        true
    }
}

/// Formats the cube layout as a human-readable string.
///
/// Displays the three z-slices side by side, rows from top (y=2) to bottom,
/// x left to right. Each cell shows the home name of the block occupying it.
pub fn format_cube(cube: &Cube) -> String {
    /// Width of one rendered slice: three names plus two separating spaces.
    const SLICE_WIDTH: usize = DIM * 3 + DIM - 1;

    let mut output = String::new();
    let mut header = String::new();
    for z in 0..DIM {
        if z > 0 {
            header.push_str("  ");
        }
        header.push_str(&format!("{:<width$}", format!("z={z}"), width = SLICE_WIDTH));
    }
    output.push_str(header.trim_end());
    output.push('\n');

    for y in (0..DIM as i32).rev() {
        let mut row = String::new();
        for z in 0..DIM as i32 {
            if z > 0 {
                row.push_str("  ");
            }
            for x in 0..DIM as i32 {
                if x > 0 {
                    row.push(' ');
                }
                let block = cube.block(cube.index().get((x, y, z)));
                row.push_str(&block_name(block.home));
            }
        }
        output.push_str(&row);
        output.push('\n');
    }

    output
}
