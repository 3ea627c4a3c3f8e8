//! Delaunay triangulation of critical points
//!
//! Baseline mesh for comparing against partition triangulation: the local
//! maxima and minima reported by the segmentation step, Delaunay
//! triangulated in the plane with their scalar values as vertex values.

use morsemesh_core::{Error, Extrema, PartitionGrid, PartitionMesh, Point2d, Result, ValueRange};
use spade::{DelaunayTriangulation, Point2, Triangulation};

/// 2D Delaunay triangulation using spade.
///
/// Triangles index into `points` and are counter-clockwise. Fewer than
/// three points, or a collinear set, yields no triangles. Repeated
/// positions are merged onto their first occurrence.
pub fn delaunay_triangulation_2d(points: &[Point2d]) -> Result<Vec<[usize; 3]>> {
    if points.len() < 3 {
        return Ok(Vec::new());
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    // Input index of each spade vertex, in spade's vertex order
    let mut origin: Vec<usize> = Vec::with_capacity(points.len());

    for (index, point) in points.iter().enumerate() {
        let handle = triangulation
            .insert(Point2::new(point.x, point.y))
            .map_err(|e| {
                Error::Algorithm(format!(
                    "Failed to insert point in Delaunay triangulation: {:?}",
                    e
                ))
            })?;
        if handle.index() == origin.len() {
            origin.push(index);
        }
    }

    let lookup = |i: usize| {
        origin.get(i).copied().ok_or_else(|| {
            Error::Algorithm("Failed to match triangle vertex to input point".to_string())
        })
    };

    let mut triangles = Vec::with_capacity(triangulation.num_inner_faces());
    for face in triangulation.inner_faces() {
        let [a, b, c] = face.vertices().map(|v| v.fix().index());
        triangles.push([lookup(a)?, lookup(b)?, lookup(c)?]);
    }

    Ok(triangles)
}

/// Delaunay mesh over the extrema of a segmentation.
///
/// Vertices are the maxima followed by the minima, positioned with the same
/// per-axis rescale the partition triangulation uses.
pub fn critical_point_delaunay(
    grid: &PartitionGrid,
    extrema: &Extrema,
    x_range: &ValueRange,
    y_range: &ValueRange,
) -> Result<PartitionMesh> {
    x_range.validate()?;
    y_range.validate()?;

    let (width, height) = grid.dim();
    let source_x = ValueRange::grid_axis(width);
    let source_y = ValueRange::grid_axis(height);

    let mut mesh = PartitionMesh::new();
    for &(x, y) in extrema.iter() {
        if x >= width || y >= height {
            return Err(Error::InvalidData(format!(
                "Extremum ({}, {}) lies outside a {}x{} grid",
                x, y, width, height
            )));
        }
        let position = Point2d::new(
            source_x.rescale_to(x as f64, x_range),
            source_y.rescale_to(y as f64, y_range),
        );
        mesh.add_vertex(position, grid.value((x, y)));
    }

    mesh.triangles = delaunay_triangulation_2d(&mesh.vertices)?;
    log::debug!(
        "Critical point Delaunay: {} extrema, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
