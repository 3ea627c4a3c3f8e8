//! Corner detection on partition label grids
//!
//! A corner is a grid position whose 8-neighborhood sees more than two
//! distinct identifiers. Off-grid neighbors contribute one of two boundary
//! sentinels: a neighbor outside the x range is [`NeighborId::OutsideX`],
//! otherwise a neighbor outside the y range is [`NeighborId::OutsideY`].
//! The x check takes priority, so a diagonal neighbor outside both ranges
//! always reads as `OutsideX`.

use itertools::iproduct;
use morsemesh_core::{GridIndex, PartitionGrid};
use rayon::prelude::*;

/// Neighbor offsets in visitation order
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Identifier contributed by one neighbor of a grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeighborId {
    /// Neighbor lies outside the x range
    OutsideX,
    /// Neighbor lies inside the x range but outside the y range
    OutsideY,
    /// Neighbor lies on the grid and carries this label
    Label(u32),
}

/// Identifier for the neighbor at signed position `(x, y)`
fn neighbor_id(grid: &PartitionGrid, x: isize, y: isize) -> NeighborId {
    if x < 0 || x >= grid.width() as isize {
        return NeighborId::OutsideX;
    }
    match grid.label_at(x, y) {
        Some(label) => NeighborId::Label(label),
        None => NeighborId::OutsideY,
    }
}

/// Distinct identifiers around `position`, in first-seen order
pub fn neighbor_identifiers(grid: &PartitionGrid, (x, y): GridIndex) -> Vec<NeighborId> {
    let mut seen = Vec::with_capacity(NEIGHBOR_OFFSETS.len());
    for &(dx, dy) in &NEIGHBOR_OFFSETS {
        let id = neighbor_id(grid, x as isize + dx, y as isize + dy);
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// Check whether `position` is a corner
pub fn is_corner(grid: &PartitionGrid, position: GridIndex) -> bool {
    neighbor_identifiers(grid, position).len() > 2
}

/// Detect all corners in scan order (x outer, y inner).
///
/// The returned order drives corner grouping and must not be changed.
pub fn detect_corners(grid: &PartitionGrid) -> Vec<GridIndex> {
    let (width, height) = grid.dim();
    iproduct!(0..width, 0..height)
        .filter(|&position| is_corner(grid, position))
        .collect()
}

/// Parallel variant of [`detect_corners`].
///
/// Rows of constant x are scanned concurrently and concatenated back in
/// x order, so the output is identical to the serial scan.
pub fn detect_corners_parallel(grid: &PartitionGrid) -> Vec<GridIndex> {
    let (width, height) = grid.dim();
    (0..width)
        .into_par_iter()
        .flat_map_iter(move |x| {
            (0..height)
                .map(move |y| (x, y))
                .filter(move |&position| is_corner(grid, position))
        })
        .collect()
}
