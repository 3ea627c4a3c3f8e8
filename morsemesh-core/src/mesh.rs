//! Mesh data structures produced from partition grids

use crate::point::Point2d;
use serde::{Deserialize, Serialize};

/// Bytes used per triangle index and per vertex value in the compact encoding
pub const BYTES_PER_SCALAR: usize = 4;

/// A 2D triangle mesh carrying one scalar value per vertex
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionMesh {
    pub vertices: Vec<Point2d>,
    pub values: Vec<f64>,
    pub triangles: Vec<[usize; 3]>,
}

impl PartitionMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from parallel vertex/value lists and triangles
    pub fn from_parts(
        vertices: Vec<Point2d>,
        values: Vec<f64>,
        triangles: Vec<[usize; 3]>,
    ) -> Self {
        Self {
            vertices,
            values,
            triangles,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// Add a vertex with its value, returning its index
    pub fn add_vertex(&mut self, position: Point2d, value: f64) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        self.values.push(value);
        index
    }

    /// Corner positions of triangle `index`
    pub fn triangle_positions(&self, index: usize) -> [Point2d; 3] {
        let [a, b, c] = self.triangles[index];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// Twice the signed area of triangle `index`; positive when CCW
    pub fn signed_double_area(&self, index: usize) -> f64 {
        let [a, b, c] = self.triangle_positions(index);
        let ab = b - a;
        let ac = c - a;
        ab.x * ac.y - ab.y * ac.x
    }

    /// Size of the compact encoding: 3 four-byte indices per triangle plus
    /// one four-byte value per vertex
    pub fn byte_size(&self) -> usize {
        self.triangles.len() * 3 * BYTES_PER_SCALAR + self.values.len() * BYTES_PER_SCALAR
    }

    /// Compact encoding: little-endian `u32` triangle indices followed by
    /// `f32` vertex values. Exactly [`byte_size`](Self::byte_size) bytes long.
    pub fn to_bytes(&self) -> Vec<u8> {
        let indices: Vec<u32> = self
            .triangles
            .iter()
            .flat_map(|t| t.iter().map(|&i| (i as u32).to_le()))
            .collect();
        let values: Vec<u32> = self
            .values
            .iter()
            .map(|&v| (v as f32).to_bits().to_le())
            .collect();

        let mut bytes = Vec::with_capacity(self.byte_size());
        bytes.extend_from_slice(bytemuck::cast_slice(&indices));
        bytes.extend_from_slice(bytemuck::cast_slice(&values));
        bytes
    }

    /// Axis-aligned bounds of the vertices, `None` if there are none
    pub fn bounds(&self) -> Option<(Point2d, Point2d)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(min, max), p| {
            (
                Point2d::new(min.x.min(p.x), min.y.min(p.y)),
                Point2d::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }
}
