//! Collapsing vertex groups into output vertices and face buckets

use crate::grouping::VertexGroup;
use morsemesh_core::{Error, PartitionGrid, Point2d, Result, ValueRange};
use std::collections::BTreeMap;

/// Vertices produced from vertex groups, plus the vertex list of each face
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompactedVertices {
    pub positions: Vec<Point2d>,
    pub values: Vec<f64>,
    /// Vertex ids per partition label, in ascending vertex id
    pub faces: BTreeMap<u32, Vec<usize>>,
}

impl CompactedVertices {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Reduce each group to one vertex.
///
/// The vertex position is the mean grid coordinate of the group, rescaled
/// per axis from `[0, extent - 1]` onto `x_range`/`y_range`; the vertex
/// value is the mean scalar value. Every partition label of the grid gets
/// a face bucket, and each vertex is appended to the bucket of every label
/// its group touches.
pub fn compact_groups(
    grid: &PartitionGrid,
    groups: &[VertexGroup],
    x_range: &ValueRange,
    y_range: &ValueRange,
) -> Result<CompactedVertices> {
    let source_x = ValueRange::grid_axis(grid.width());
    let source_y = ValueRange::grid_axis(grid.height());

    let mut faces: BTreeMap<u32, Vec<usize>> =
        grid.labels().into_iter().map(|label| (label, Vec::new())).collect();
    let mut positions = Vec::with_capacity(groups.len());
    let mut values = Vec::with_capacity(groups.len());

    for (index, group) in groups.iter().enumerate() {
        if group.is_empty() {
            return Err(Error::Algorithm(format!("Vertex group {} has no corners", index)));
        }

        let count = group.len() as f64;
        let (sum_x, sum_y, sum_value) =
            group
                .corners
                .iter()
                .fold((0.0, 0.0, 0.0), |(sx, sy, sv), &position| {
                    (
                        sx + position.0 as f64,
                        sy + position.1 as f64,
                        sv + grid.value(position),
                    )
                });

        positions.push(Point2d::new(
            source_x.rescale_to(sum_x / count, x_range),
            source_y.rescale_to(sum_y / count, y_range),
        ));
        values.push(sum_value / count);

        for &label in &group.labels {
            faces
                .get_mut(&label)
                .ok_or(Error::MissingFace(label))?
                .push(index);
        }
    }

    Ok(CompactedVertices {
        positions,
        values,
        faces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};
    use std::collections::BTreeSet;

    fn group(corners: Vec<(usize, usize)>, labels: &[u32]) -> VertexGroup {
        VertexGroup {
            corners,
            labels: labels.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn test_vertex_is_mean_of_group() {
        let values = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let partitions = array![[0, 0, 1], [0, 0, 1], [2, 2, 2]];
        let grid = PartitionGrid::new(values, partitions).unwrap();

        let groups = vec![group(vec![(1, 1), (1, 2), (2, 1)], &[0, 1, 2])];
        let range = ValueRange::new(0.0, 1.0);
        let compacted = compact_groups(&grid, &groups, &range, &range).unwrap();

        assert_eq!(compacted.vertex_count(), 1);
        assert_relative_eq!(compacted.positions[0].x, (4.0 / 3.0) / 2.0);
        assert_relative_eq!(compacted.positions[0].y, (4.0 / 3.0) / 2.0);
        assert_relative_eq!(compacted.values[0], (5.0 + 6.0 + 8.0) / 3.0);
    }

    #[test]
    fn test_uniform_group_value_is_preserved() {
        let values = Array2::from_elem((4, 4), 2.5);
        let partitions = Array2::from_shape_fn((4, 4), |(x, y)| (x + y) as u32 % 3);
        let grid = PartitionGrid::new(values, partitions).unwrap();

        let groups = vec![group(vec![(0, 0), (0, 1), (1, 0), (3, 3)], &[0, 1])];
        let range = ValueRange::unit();
        let compacted = compact_groups(&grid, &groups, &range, &range).unwrap();

        assert_eq!(compacted.values[0], 2.5);
    }

    #[test]
    fn test_rescale_to_target_ranges() {
        let grid = PartitionGrid::new(Array2::zeros((5, 3)), Array2::zeros((5, 3))).unwrap();

        let groups = vec![group(vec![(4, 0)], &[0]), group(vec![(2, 2)], &[0])];
        let compacted = compact_groups(
            &grid,
            &groups,
            &ValueRange::new(0.0, 100.0),
            &ValueRange::new(-1.0, 1.0),
        )
        .unwrap();

        assert_relative_eq!(compacted.positions[0].x, 100.0);
        assert_relative_eq!(compacted.positions[0].y, -1.0);
        assert_relative_eq!(compacted.positions[1].x, 50.0);
        assert_relative_eq!(compacted.positions[1].y, 1.0);
    }

    #[test]
    fn test_face_buckets_cover_every_label() {
        let partitions = array![[0, 0, 1], [0, 3, 1], [2, 2, 1]];
        let grid = PartitionGrid::new(Array2::zeros((3, 3)), partitions).unwrap();

        let groups = vec![
            group(vec![(0, 0)], &[0]),
            group(vec![(1, 1)], &[0, 1, 2, 3]),
            group(vec![(2, 2)], &[1, 2]),
        ];
        let range = ValueRange::unit();
        let compacted = compact_groups(&grid, &groups, &range, &range).unwrap();

        assert_eq!(compacted.face_count(), 4);
        assert_eq!(compacted.faces[&0], vec![0, 1]);
        assert_eq!(compacted.faces[&1], vec![1, 2]);
        assert_eq!(compacted.faces[&2], vec![1, 2]);
        assert_eq!(compacted.faces[&3], vec![1]);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let grid = PartitionGrid::new(Array2::zeros((2, 2)), Array2::zeros((2, 2))).unwrap();

        let groups = vec![group(vec![(0, 0)], &[0, 9])];
        let range = ValueRange::unit();
        let result = compact_groups(&grid, &groups, &range, &range);

        assert_eq!(result, Err(Error::MissingFace(9)));
    }
}
