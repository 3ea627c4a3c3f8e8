//! Partition triangulation pipeline
//!
//! Runs corner detection, corner grouping, vertex compaction and face
//! triangulation in sequence over one partition grid.

use crate::compactor::compact_groups;
use crate::corners::{detect_corners, detect_corners_parallel};
use crate::faces::triangulate_faces;
use crate::grouping::group_corners;
use morsemesh_core::{Error, PartitionGrid, PartitionMesh, Result, ValueRange};
use ndarray::ArrayView2;

/// Configuration for partition triangulation
#[derive(Debug, Clone, PartialEq)]
pub struct TriangulationConfig {
    /// Target range for vertex x coordinates
    pub x_range: ValueRange,
    /// Target range for vertex y coordinates
    pub y_range: ValueRange,
    /// Scan rows for corners in parallel (grouping always runs serially)
    pub parallel_detection: bool,
    /// Reject grids with more than `fraction * sample_count` distinct labels
    pub partition_limit: Option<f64>,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            x_range: ValueRange::unit(),
            y_range: ValueRange::unit(),
            parallel_detection: false,
            partition_limit: None,
        }
    }
}

impl TriangulationConfig {
    /// Set both target ranges
    pub fn with_ranges(mut self, x_range: ValueRange, y_range: ValueRange) -> Self {
        self.x_range = x_range;
        self.y_range = y_range;
        self
    }

    /// Enable or disable parallel corner detection
    pub fn with_parallel_detection(mut self, enabled: bool) -> Self {
        self.parallel_detection = enabled;
        self
    }

    /// Set the partition limit as a fraction of the sample count
    pub fn with_partition_limit(mut self, fraction: f64) -> Self {
        self.partition_limit = Some(fraction);
        self
    }

    /// Target ranges matching the grid's own pixel extent, `[0, width]` by
    /// `[0, height]`
    pub fn pixel_ranges(width: usize, height: usize) -> Self {
        Self::default().with_ranges(
            ValueRange::new(0.0, width as f64),
            ValueRange::new(0.0, height as f64),
        )
    }

    fn validate(&self) -> Result<()> {
        self.x_range.validate()?;
        self.y_range.validate()?;
        if let Some(fraction) = self.partition_limit {
            if !(fraction.is_finite() && fraction > 0.0) {
                return Err(Error::InvalidData(format!(
                    "Partition limit must be a positive fraction, got {}",
                    fraction
                )));
            }
        }
        Ok(())
    }
}

/// Counts collected while triangulating
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriangulationStats {
    pub corner_count: usize,
    pub group_count: usize,
    pub face_count: usize,
    pub dropped_face_count: usize,
    pub triangle_count: usize,
}

/// Output of one triangulation call
#[derive(Debug, Clone, PartialEq)]
pub struct TriangulationResult {
    pub mesh: PartitionMesh,
    /// At least one face had fewer than three vertices and was dropped
    pub degenerate_faces: bool,
    pub stats: TriangulationStats,
}

/// Converts partition grids into fan-triangulated meshes
#[derive(Debug, Clone, Default)]
pub struct PartitionTriangulator {
    config: TriangulationConfig,
}

impl PartitionTriangulator {
    /// Create a triangulator with the given configuration
    pub fn new(config: TriangulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TriangulationConfig {
        &self.config
    }

    /// Triangulate one partition grid.
    ///
    /// A grid without corners yields an empty mesh and no degenerate-face
    /// flag. Faces with fewer than three vertices are dropped; when any are,
    /// one warning is logged and `degenerate_faces` is set.
    pub fn triangulate(&self, grid: &PartitionGrid) -> Result<TriangulationResult> {
        self.config.validate()?;
        grid.validate_finite()?;
        self.check_partition_limit(grid)?;

        let corners = if self.config.parallel_detection {
            detect_corners_parallel(grid)
        } else {
            detect_corners(grid)
        };
        log::debug!("Detected {} corners on a {:?} grid", corners.len(), grid.dim());

        let mut stats = TriangulationStats {
            corner_count: corners.len(),
            ..TriangulationStats::default()
        };

        if corners.is_empty() {
            return Ok(TriangulationResult {
                mesh: PartitionMesh::new(),
                degenerate_faces: false,
                stats,
            });
        }

        let groups = group_corners(grid, &corners).into_groups();
        stats.group_count = groups.len();
        log::debug!("Merged {} corners into {} vertex groups", corners.len(), groups.len());

        let compacted = compact_groups(grid, &groups, &self.config.x_range, &self.config.y_range)?;
        stats.face_count = compacted.face_count();

        let fan = triangulate_faces(&compacted);
        stats.dropped_face_count = fan.dropped_faces;
        stats.triangle_count = fan.triangles.len();
        log::debug!(
            "Triangulated {} of {} faces into {} triangles",
            fan.triangulated_faces,
            stats.face_count,
            stats.triangle_count
        );

        let degenerate_faces = fan.has_degenerate_faces();
        if degenerate_faces {
            log::warn!(
                "At least one face without at least three vertices ({} of {} dropped)",
                fan.dropped_faces,
                stats.face_count
            );
        }

        Ok(TriangulationResult {
            mesh: PartitionMesh::from_parts(compacted.positions, compacted.values, fan.triangles),
            degenerate_faces,
            stats,
        })
    }

    fn check_partition_limit(&self, grid: &PartitionGrid) -> Result<()> {
        let Some(fraction) = self.config.partition_limit else {
            return Ok(());
        };

        let partitions = grid.partition_count();
        let limit = fraction * grid.len() as f64;
        if partitions as f64 > limit {
            return Err(Error::TooManyPartitions {
                partitions,
                limit: limit.floor() as usize,
            });
        }
        Ok(())
    }
}

/// Triangulate a scalar grid and its congruent label grid.
///
/// Returns the mesh and whether any face was dropped as degenerate.
pub fn triangulate_partitions(
    values: ArrayView2<'_, f64>,
    partitions: ArrayView2<'_, u32>,
    x_range: ValueRange,
    y_range: ValueRange,
) -> Result<(PartitionMesh, bool)> {
    let grid = PartitionGrid::new(values.to_owned(), partitions.to_owned())?;
    let config = TriangulationConfig::default().with_ranges(x_range, y_range);
    let result = PartitionTriangulator::new(config).triangulate(&grid)?;
    Ok((result.mesh, result.degenerate_faces))
}
