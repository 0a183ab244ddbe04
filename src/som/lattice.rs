//! The weight lattice and per-node assignment grid.

use crate::error::{Result, TopomapError};
use crate::som::metric;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Node count above which the trainer switches to the parallel BMU search.
pub(crate) const PARALLEL_BMU_THRESHOLD: usize = 4096;

/// A 2-D lattice of prototype vectors.
///
/// Weights live in one contiguous arena of `height * width * dimension`
/// values, addressed by `(row * width + col) * dimension + k`. The hot
/// loops (BMU search, weight update) scan it sequentially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    height: usize,
    width: usize,
    dimension: usize,
    weights: Vec<f64>,
}

impl Lattice {
    /// Creates a lattice of `height * width` zeroed prototype vectors.
    ///
    /// Fails with `InvalidDimension` if any argument is zero.
    pub fn zeros(height: usize, width: usize, dimension: usize) -> Result<Self> {
        if height == 0 {
            return Err(TopomapError::InvalidDimension { name: "height" });
        }
        if width == 0 {
            return Err(TopomapError::InvalidDimension { name: "width" });
        }
        if dimension == 0 {
            return Err(TopomapError::InvalidDimension { name: "dimension" });
        }

        Ok(Self {
            height,
            width,
            dimension,
            weights: vec![0.0; height * width * dimension],
        })
    }

    /// Lattice height (rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Lattice width (columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Prototype vector dimensionality.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Total number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.height * self.width
    }

    /// Read-only view of the whole weight arena, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        (row * self.width + col) * self.dimension
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Err(TopomapError::IndexOutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(())
    }

    /// Fills every weight with an independent uniform draw in `[low, high]`.
    ///
    /// The algorithm assumes small initial weights relative to normalized
    /// inputs, so the bounds must satisfy `0 <= low <= high <= 1`; fails
    /// with `InvalidRange` otherwise.
    pub fn initialize<R: Rng>(&mut self, low: f64, high: f64, rng: &mut R) -> Result<()> {
        if !(0.0 <= low && low <= high && high <= 1.0) {
            return Err(TopomapError::InvalidRange { low, high });
        }

        let uniform = Uniform::new_inclusive(low, high);
        for w in &mut self.weights {
            *w = uniform.sample(rng);
        }
        Ok(())
    }

    /// Returns the prototype vector at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<&[f64]> {
        self.check_bounds(row, col)?;
        let start = self.offset(row, col);
        Ok(&self.weights[start..start + self.dimension])
    }

    /// Overwrites the prototype vector at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, vector: &[f64]) -> Result<()> {
        self.check_bounds(row, col)?;
        if vector.len() != self.dimension {
            return Err(TopomapError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }
        let start = self.offset(row, col);
        self.weights[start..start + self.dimension].copy_from_slice(vector);
        Ok(())
    }

    /// Finds the Best Matching Unit for an input vector.
    ///
    /// Scans every node in row-major order and returns the coordinates of
    /// the minimum Euclidean distance. Ties keep the earliest-scanned node.
    pub fn find_bmu(&self, input: &[f64]) -> Result<(usize, usize)> {
        if input.len() != self.dimension {
            return Err(TopomapError::DimensionMismatch {
                expected: self.dimension,
                actual: input.len(),
            });
        }

        let mut best = (0, 0);
        let mut best_dist = f64::INFINITY;
        for row in 0..self.height {
            for col in 0..self.width {
                let dist = metric::distance(input, self.get(row, col)?)?;
                if dist < best_dist {
                    best_dist = dist;
                    best = (row, col);
                }
            }
        }
        Ok(best)
    }

    /// Finds the Best Matching Unit using a parallel reduction over nodes.
    ///
    /// Returns the same node as [`find_bmu`](Self::find_bmu): ties resolve
    /// to the lowest row-major index regardless of how rayon splits the
    /// work. Worth it for large maps only.
    pub fn find_bmu_parallel(&self, input: &[f64]) -> Result<(usize, usize)> {
        if input.len() != self.dimension {
            return Err(TopomapError::DimensionMismatch {
                expected: self.dimension,
                actual: input.len(),
            });
        }

        let (best_idx, _) = (0..self.node_count())
            .into_par_iter()
            .map(|idx| (idx, self.node_distance(idx, input)))
            .reduce(
                || (usize::MAX, f64::INFINITY),
                |best, cand| {
                    if cand.1 < best.1 || (cand.1 == best.1 && cand.0 < best.0) {
                        cand
                    } else {
                        best
                    }
                },
            );

        Ok((best_idx / self.width, best_idx % self.width))
    }

    /// Euclidean distance from the node at flat index `idx` to `input`.
    ///
    /// Hot-path variant working directly on the arena; `input` must
    /// already be validated against `dimension`.
    #[inline]
    fn node_distance(&self, idx: usize, input: &[f64]) -> f64 {
        let start = idx * self.dimension;
        let mut sum = 0.0;
        for (k, x) in input.iter().enumerate() {
            let diff = x - self.weights[start + k];
            sum += diff * diff;
        }
        sum.sqrt()
    }

    /// Applies one Gaussian-neighborhood update step centered at `bmu`.
    ///
    /// For every node: `theta = exp(-d2 / (2 * radius^2))` with `d2` the
    /// squared grid distance to the BMU, then
    /// `w_k += rate * theta * (input_k - w_k)`. Every node is updated;
    /// influence on distant nodes decays smoothly through `theta` rather
    /// than through an explicit cutoff.
    pub fn update_toward(&mut self, input: &[f64], bmu: (usize, usize), rate: f64, radius: f64) {
        debug_assert_eq!(input.len(), self.dimension);

        let sigma_sq = radius * radius;
        for row in 0..self.height {
            for col in 0..self.width {
                let dr = bmu.0 as f64 - row as f64;
                let dc = bmu.1 as f64 - col as f64;
                let d2 = dr * dr + dc * dc;
                let theta = (-d2 / (2.0 * sigma_sq)).exp();

                let influence = rate * theta;
                let start = self.offset(row, col);
                for (k, x) in input.iter().enumerate() {
                    let w = &mut self.weights[start + k];
                    *w += influence * (x - *w);
                }
            }
        }
    }
}

/// Per-node record of which training samples best-matched each node.
///
/// Same `height * width` shape as the lattice; each cell holds the set of
/// training-set indices that were BMU-matched to that node at some point
/// during the run. Indices accumulate over the whole run and are never
/// cleared. Because sampling is with replacement, one index may appear at
/// several nodes, or nowhere if never drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentGrid {
    height: usize,
    width: usize,
    cells: Vec<BTreeSet<usize>>,
}

impl AssignmentGrid {
    /// Creates an empty grid with the same shape as the lattice.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![BTreeSet::new(); height * width],
        }
    }

    /// Grid height (rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid width (columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Records that `sample_index` was BMU-matched to node `(row, col)`.
    pub(crate) fn record(&mut self, row: usize, col: usize, sample_index: usize) {
        debug_assert!(row < self.height && col < self.width);
        self.cells[row * self.width + col].insert(sample_index);
    }

    /// Returns the set of sample indices assigned to node `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<&BTreeSet<usize>> {
        if row >= self.height || col >= self.width {
            return Err(TopomapError::IndexOutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(&self.cells[row * self.width + col])
    }

    /// Iterates over all cells as `((row, col), indices)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &BTreeSet<usize>)> {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, set)| ((i / self.width, i % self.width), set))
    }
}
