//! Error types for the topomap engine.

use thiserror::Error;

/// The main error type for topomap operations.
///
/// Every failure is a precondition violation detected synchronously at the
/// call that triggers it; the engine has no transient failure modes and
/// never retries or swallows an error.
#[derive(Error, Debug)]
pub enum TopomapError {
    /// A lattice or input dimension was zero at construction.
    #[error("invalid dimension: {name} must be positive")]
    InvalidDimension {
        /// Which constructor argument was zero.
        name: &'static str,
    },

    /// The lattice is too small for a well-defined decay schedule.
    ///
    /// The initial neighborhood radius is half the larger grid side; at
    /// one or below, the time constant `epochs / ln(sigma0)` is undefined
    /// or non-positive.
    #[error("lattice {height}x{width} yields initial radius {sigma0}, schedule requires > 1")]
    InvalidLatticeSize {
        /// Lattice height.
        height: usize,
        /// Lattice width.
        width: usize,
        /// The degenerate initial radius.
        sigma0: f64,
    },

    /// Weight initialization bounds outside `0 <= low <= high <= 1`.
    #[error("initialization range [{low}, {high}] must satisfy 0 <= low <= high <= 1")]
    InvalidRange {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// A vector's length does not match the engine's input dimension.
    #[error("vector length {actual} does not match dimension {expected}")]
    DimensionMismatch {
        /// The expected length.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// Training was invoked with no pushed samples.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Training was invoked with zero epochs.
    #[error("epoch count must be positive")]
    InvalidEpochCount,

    /// Learning rate outside `(0, 1]`.
    #[error("learning rate {0} is outside (0, 1]")]
    InvalidLearningRate(f64),

    /// Node coordinates outside the lattice.
    #[error("node ({row}, {col}) out of bounds for {height}x{width} lattice")]
    IndexOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Lattice height.
        height: usize,
        /// Lattice width.
        width: usize,
    },

    /// The trainer already completed a run.
    ///
    /// Re-training would re-derive the time constant against a lattice
    /// that already reflects prior training; create a new trainer instead.
    #[error("training already completed; create a new trainer to retrain")]
    AlreadyTrained,
}

/// Result type alias for topomap operations.
pub type Result<T> = std::result::Result<T, TopomapError>;
