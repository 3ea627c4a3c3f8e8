//! Interface to the external scalar-field segmentation step
//!
//! morsemesh does not compute Morse-Smale segmentations itself. A segmenter
//! is supplied by the caller and produces a label grid plus the grid
//! positions of the local extrema it found.

use crate::error::{Error, Result};
use crate::grid::{GridIndex, PartitionGrid};
use ndarray::{Array2, ArrayView2};

/// Grid positions of local maxima and minima
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extrema {
    pub maxima: Vec<GridIndex>,
    pub minima: Vec<GridIndex>,
}

impl Extrema {
    pub fn new(maxima: Vec<GridIndex>, minima: Vec<GridIndex>) -> Self {
        Self { maxima, minima }
    }

    /// Total number of extrema
    pub fn len(&self) -> usize {
        self.maxima.len() + self.minima.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maxima.is_empty() && self.minima.is_empty()
    }

    /// Maxima followed by minima
    pub fn iter(&self) -> impl Iterator<Item = &GridIndex> {
        self.maxima.iter().chain(self.minima.iter())
    }
}

/// Output of a segmentation run
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// One label per grid sample, same shape as the scalar grid
    pub partitions: Array2<u32>,
    pub extrema: Extrema,
}

impl Segmentation {
    /// Pair the labels with the scalar grid they were computed from
    pub fn into_grid(self, values: Array2<f64>) -> Result<(PartitionGrid, Extrema)> {
        let (width, height) = values.dim();
        if let Some(&(x, y)) = self.extrema.iter().find(|&&(x, y)| x >= width || y >= height) {
            return Err(Error::InvalidData(format!(
                "Extremum ({}, {}) lies outside a {}x{} grid",
                x, y, width, height
            )));
        }
        let grid = PartitionGrid::new(values, self.partitions)?;
        Ok((grid, self.extrema))
    }
}

/// A scalar-field segmentation collaborator
pub trait Segmenter {
    /// Label every sample of `values`, considering `k_neighbors` neighbors
    /// per sample
    fn segment(&self, values: ArrayView2<'_, f64>, k_neighbors: usize) -> Result<Segmentation>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Labels each sample by its sign
    struct SignSegmenter;

    impl Segmenter for SignSegmenter {
        fn segment(
            &self,
            values: ArrayView2<'_, f64>,
            _k_neighbors: usize,
        ) -> Result<Segmentation> {
            let partitions = values.mapv(|v| u32::from(v >= 0.0));
            Ok(Segmentation {
                partitions,
                extrema: Extrema::new(vec![(0, 0)], vec![(1, 1)]),
            })
        }
    }

    #[test]
    fn test_segmenter_output_forms_grid() {
        let values = array![[1.0, -1.0], [2.0, -2.0]];
        let segmentation = SignSegmenter.segment(values.view(), 8).unwrap();
        let (grid, extrema) = segmentation.into_grid(values).unwrap();

        assert_eq!(grid.label((0, 0)), 1);
        assert_eq!(grid.label((1, 1)), 0);
        assert_eq!(extrema.len(), 2);
        assert_eq!(extrema.iter().copied().collect::<Vec<_>>(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_extremum_outside_grid_rejected() {
        let segmentation = Segmentation {
            partitions: Array2::zeros((2, 2)),
            extrema: Extrema::new(vec![(2, 0)], vec![]),
        };
        let result = segmentation.into_grid(Array2::zeros((2, 2)));
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}
