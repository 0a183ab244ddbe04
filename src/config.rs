//! Configuration for the topomap engine.

use serde::{Deserialize, Serialize};

/// Self-Organizing Map configuration.
///
/// Bundles the lattice shape and training hyperparameters. The random
/// source is not part of the configuration; it is passed explicitly to
/// [`initialize_weights`](crate::SomTrainer::initialize_weights) and
/// [`train`](crate::SomTrainer::train) so runs stay reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomConfig {
    /// Lattice height (rows).
    /// Default: 8.
    pub height: usize,

    /// Lattice width (columns).
    /// Default: 8.
    pub width: usize,

    /// Dimensionality of the input vectors and prototype vectors.
    /// Default: 4.
    pub dimension: usize,

    /// Number of training iterations (one random sample draw each).
    /// Default: 10,000.
    pub epochs: usize,

    /// Initial learning rate, in `(0, 1]`.
    /// Default: 0.1.
    pub initial_learning_rate: f64,

    /// Lower bound for uniform weight initialization, in `[0, 1]`.
    /// Default: 0.0.
    pub weight_low: f64,

    /// Upper bound for uniform weight initialization, in `[0, 1]`.
    /// Default: 1.0.
    pub weight_high: f64,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            dimension: 4,
            epochs: 10_000,
            initial_learning_rate: 0.1,
            weight_low: 0.0,
            weight_high: 1.0,
        }
    }
}

impl SomConfig {
    /// Returns the total number of nodes in the lattice.
    #[inline]
    pub fn total_nodes(&self) -> usize {
        self.height * self.width
    }
}
