//! Fan triangulation of partition faces
//!
//! Each face's vertices are ordered counter-clockwise around their centroid
//! and fanned out from the face's maximum-value vertex.

use crate::compactor::CompactedVertices;
use morsemesh_core::{centroid, Point2d};
use std::cmp::Ordering;

/// Triangles emitted for a set of faces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanTriangulation {
    pub triangles: Vec<[usize; 3]>,
    /// Faces that produced triangles
    pub triangulated_faces: usize,
    /// Faces dropped for having fewer than three vertices
    pub dropped_faces: usize,
}

impl FanTriangulation {
    /// At least one face was dropped
    pub fn has_degenerate_faces(&self) -> bool {
        self.dropped_faces > 0
    }
}

/// Order `face` counter-clockwise by polar angle about the centroid of its
/// vertices. Ties keep their input order; `-0.0` and `0.0` count as tied.
pub fn order_ccw(face: &[usize], positions: &[Point2d]) -> Vec<usize> {
    let center = match centroid(face.iter().map(|&v| &positions[v])) {
        Some(center) => center,
        None => return Vec::new(),
    };

    let mut keyed: Vec<(f64, usize)> = face
        .iter()
        .map(|&v| {
            let offset = positions[v] - center;
            (offset.y.atan2(offset.x), v)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(_, v)| v).collect()
}

/// The maximum-value vertex of `face`; on ties, the first in `face` order
pub fn apex_vertex(face: &[usize], values: &[f64]) -> Option<usize> {
    let (&first, rest) = face.split_first()?;
    Some(rest.iter().fold(first, |best, &v| {
        if values[v] > values[best] {
            v
        } else {
            best
        }
    }))
}

/// Fan-triangulate one face, or `None` if it has fewer than three vertices.
///
/// Emits `n - 2` triangles `(apex, ring[i], ring[i + 1])` walking the CCW
/// ring from the vertex after the apex.
pub fn triangulate_face(
    face: &[usize],
    positions: &[Point2d],
    values: &[f64],
) -> Option<Vec<[usize; 3]>> {
    let n = face.len();
    if n < 3 {
        return None;
    }

    let ring = order_ccw(face, positions);
    let apex = apex_vertex(face, values)?;
    let apex_pos = ring.iter().position(|&v| v == apex)?;

    Some(
        (0..n - 2)
            .map(|offset| {
                [
                    apex,
                    ring[(apex_pos + 1 + offset) % n],
                    ring[(apex_pos + 2 + offset) % n],
                ]
            })
            .collect(),
    )
}

/// Triangulate every face in ascending label order
pub fn triangulate_faces(compacted: &CompactedVertices) -> FanTriangulation {
    let mut result = FanTriangulation::default();

    for (label, face) in &compacted.faces {
        match triangulate_face(face, &compacted.positions, &compacted.values) {
            Some(triangles) => {
                result.triangles.extend(triangles);
                result.triangulated_faces += 1;
            }
            None => {
                log::trace!("Dropping face {} with {} vertices", label, face.len());
                result.dropped_faces += 1;
            }
        }
    }

    result
}
