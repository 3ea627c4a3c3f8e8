//! Partition grids: a scalar raster paired with a congruent label raster

use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};
use std::collections::BTreeSet;

/// A position on the grid, indexed `(x, y)` in the grid's native order
pub type GridIndex = (usize, usize);

/// Scalar samples and per-sample partition labels over the same raster.
///
/// Both arrays are indexed `[x, y]`; the first axis is the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionGrid {
    values: Array2<f64>,
    partitions: Array2<u32>,
}

impl PartitionGrid {
    /// Pair a scalar grid with its label grid.
    ///
    /// Fails with [`Error::ShapeMismatch`] when the dimensions differ.
    pub fn new(values: Array2<f64>, partitions: Array2<u32>) -> Result<Self> {
        if values.dim() != partitions.dim() {
            return Err(Error::ShapeMismatch {
                values: values.dim(),
                partitions: partitions.dim(),
            });
        }

        Ok(Self { values, partitions })
    }

    /// Build a grid from row-major (x outer, y inner) buffers
    pub fn from_shape_vec(
        width: usize,
        height: usize,
        values: Vec<f64>,
        partitions: Vec<u32>,
    ) -> Result<Self> {
        let values = Array2::from_shape_vec((width, height), values)
            .map_err(|e| Error::InvalidData(format!("Scalar buffer: {}", e)))?;
        let partitions = Array2::from_shape_vec((width, height), partitions)
            .map_err(|e| Error::InvalidData(format!("Partition buffer: {}", e)))?;
        Self::new(values, partitions)
    }

    /// Extent of the x axis
    pub fn width(&self) -> usize {
        self.values.nrows()
    }

    /// Extent of the y axis
    pub fn height(&self) -> usize {
        self.values.ncols()
    }

    /// `(width, height)`
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the grid has no samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Scalar value at `(x, y)`
    pub fn value(&self, (x, y): GridIndex) -> f64 {
        self.values[[x, y]]
    }

    /// Partition label at `(x, y)`
    pub fn label(&self, (x, y): GridIndex) -> u32 {
        self.partitions[[x, y]]
    }

    /// Partition label at a signed position, or `None` off the grid
    pub fn label_at(&self, x: isize, y: isize) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        self.partitions.get([x as usize, y as usize]).copied()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn partitions(&self) -> ArrayView2<'_, u32> {
        self.partitions.view()
    }

    /// Distinct partition labels, ascending
    pub fn labels(&self) -> BTreeSet<u32> {
        self.partitions.iter().copied().collect()
    }

    /// Number of distinct partition labels
    pub fn partition_count(&self) -> usize {
        self.labels().len()
    }

    /// Reject grids containing NaN or infinite samples
    pub fn validate_finite(&self) -> Result<()> {
        match self.values.indexed_iter().find(|(_, v)| !v.is_finite()) {
            Some(((x, y), _)) => Err(Error::NonFiniteValue { x, y }),
            None => Ok(()),
        }
    }
}
