//! The training loop: stochastic sampling, BMU lookup, weight updates.

use crate::config::SomConfig;
use crate::error::{Result, TopomapError};
use crate::som::lattice::{AssignmentGrid, Lattice, PARALLEL_BMU_THRESHOLD};
use crate::som::schedule::DecaySchedule;
use log::info;
use rand::Rng;

/// Outcome of a training run.
#[derive(Debug, Clone, Copy)]
pub struct TrainingSummary {
    /// Epochs requested by the caller.
    pub epochs_requested: usize,
    /// Epochs actually completed before the run ended.
    pub epochs_completed: usize,
}

impl TrainingSummary {
    /// True if the run was stopped before completing all requested epochs.
    pub fn cancelled(&self) -> bool {
        self.epochs_completed < self.epochs_requested
    }
}

/// A Self-Organizing Map trainer.
///
/// Owns the weight lattice, the assignment grid, and the training set.
/// Samples are pushed one at a time, weights initialized to small uniform
/// random values, then a single [`train`](Self::train) call runs the whole
/// stochastic loop. After that the trainer is terminal: the lattice and
/// assignments stay readable, but further training or mutation is rejected
/// with `AlreadyTrained`.
///
/// The random source is passed explicitly wherever randomness is consumed,
/// so a seeded generator makes entire runs reproducible.
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use topomap::SomTrainer;
///
/// # fn main() -> topomap::Result<()> {
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let mut trainer = SomTrainer::new(3, 3, 2)?;
/// trainer.initialize_weights(0.0, 0.5, &mut rng)?;
/// trainer.push_sample(vec![0.9, 0.1])?;
/// trainer.push_sample(vec![0.1, 0.9])?;
/// trainer.train(500, 0.1, &mut rng)?;
///
/// let bmu = trainer.lattice().find_bmu(&[0.9, 0.1])?;
/// assert!(!trainer.assignments().get(bmu.0, bmu.1)?.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct SomTrainer {
    lattice: Lattice,
    assignments: AssignmentGrid,
    samples: Vec<Vec<f64>>,
    sigma0: f64,
    trained: bool,
}

impl SomTrainer {
    /// Creates a trainer for a `height x width` lattice of
    /// `dimension`-element prototype vectors.
    ///
    /// Fails with `InvalidDimension` if any argument is zero, and with
    /// `InvalidLatticeSize` if the initial neighborhood radius (half the
    /// larger grid side) does not exceed one, which would make the decay
    /// schedule's time constant undefined or non-positive.
    pub fn new(height: usize, width: usize, dimension: usize) -> Result<Self> {
        let lattice = Lattice::zeros(height, width, dimension)?;

        let sigma0 = height.max(width) as f64 / 2.0;
        if sigma0 <= 1.0 {
            return Err(TopomapError::InvalidLatticeSize {
                height,
                width,
                sigma0,
            });
        }

        Ok(Self {
            lattice,
            assignments: AssignmentGrid::new(height, width),
            samples: Vec::new(),
            sigma0,
            trained: false,
        })
    }

    /// Creates a trainer from a configuration's lattice shape.
    pub fn from_config(config: &SomConfig) -> Result<Self> {
        Self::new(config.height, config.width, config.dimension)
    }

    /// Initializes every lattice weight uniformly in `[low, high]`.
    ///
    /// See [`Lattice::initialize`] for the range contract. Rejected with
    /// `AlreadyTrained` once a run has completed.
    pub fn initialize_weights<R: Rng>(&mut self, low: f64, high: f64, rng: &mut R) -> Result<()> {
        if self.trained {
            return Err(TopomapError::AlreadyTrained);
        }
        self.lattice.initialize(low, high, rng)
    }

    /// Appends one sample to the training set.
    ///
    /// The vector's length must equal the trainer's dimension exactly;
    /// on `DimensionMismatch` the training set is left unchanged. Rejected
    /// with `AlreadyTrained` once a run has completed.
    pub fn push_sample(&mut self, sample: Vec<f64>) -> Result<()> {
        if self.trained {
            return Err(TopomapError::AlreadyTrained);
        }
        if sample.len() != self.lattice.dimension() {
            return Err(TopomapError::DimensionMismatch {
                expected: self.lattice.dimension(),
                actual: sample.len(),
            });
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Runs the full training loop.
    ///
    /// Each of the `epochs` iterations draws a sample index uniformly with
    /// replacement, finds its BMU, records the index on the assignment
    /// grid, and applies the Gaussian-neighborhood update at the
    /// iteration's decayed learning rate and radius.
    ///
    /// All parameters are validated before the lattice is touched:
    /// `InvalidEpochCount` for zero epochs, `InvalidLearningRate` unless
    /// `0 < learning_step <= 1`, `EmptyTrainingSet` with no samples, and
    /// `AlreadyTrained` after a completed run.
    pub fn train<R: Rng>(
        &mut self,
        epochs: usize,
        learning_step: f64,
        rng: &mut R,
    ) -> Result<TrainingSummary> {
        self.train_until(epochs, learning_step, rng, || false)
    }

    /// Like [`train`](Self::train), with a cooperative stop check.
    ///
    /// `stop` is evaluated between iterations, never mid-iteration, so the
    /// worst-case stop latency is one iteration's cost. A stopped run
    /// still transitions the trainer to its terminal state; the summary
    /// reports how many epochs actually ran.
    pub fn train_until<R: Rng, F: FnMut() -> bool>(
        &mut self,
        epochs: usize,
        learning_step: f64,
        rng: &mut R,
        mut stop: F,
    ) -> Result<TrainingSummary> {
        if self.trained {
            return Err(TopomapError::AlreadyTrained);
        }
        if epochs == 0 {
            return Err(TopomapError::InvalidEpochCount);
        }
        if !(learning_step > 0.0 && learning_step <= 1.0) {
            return Err(TopomapError::InvalidLearningRate(learning_step));
        }
        if self.samples.is_empty() {
            return Err(TopomapError::EmptyTrainingSet);
        }

        let schedule = DecaySchedule::new(epochs, learning_step, self.sigma0);
        let parallel_bmu = self.lattice.node_count() >= PARALLEL_BMU_THRESHOLD;

        info!(
            "training SOM: {} epochs, {} samples, {}x{} lattice, dim {}",
            epochs,
            self.samples.len(),
            self.lattice.height(),
            self.lattice.width(),
            self.lattice.dimension()
        );

        let mut completed = 0;
        for t in 0..epochs {
            if stop() {
                break;
            }

            let j = rng.gen_range(0..self.samples.len());
            let sample = &self.samples[j];

            let bmu = if parallel_bmu {
                self.lattice.find_bmu_parallel(sample)?
            } else {
                self.lattice.find_bmu(sample)?
            };
            self.assignments.record(bmu.0, bmu.1, j);

            self.lattice
                .update_toward(sample, bmu, schedule.learning_rate(t), schedule.radius(t));
            completed = t + 1;

            if t % 10_000 == 0 {
                info!(
                    "iteration {}/{}: rate={:.4}, radius={:.2}",
                    t,
                    epochs,
                    schedule.learning_rate(t),
                    schedule.radius(t)
                );
            }
        }

        self.trained = true;
        info!("SOM training completed ({completed}/{epochs} epochs)");

        Ok(TrainingSummary {
            epochs_requested: epochs,
            epochs_completed: completed,
        })
    }

    /// Initializes weights and trains in one call, per the configuration.
    pub fn run<R: Rng>(&mut self, config: &SomConfig, rng: &mut R) -> Result<TrainingSummary> {
        self.initialize_weights(config.weight_low, config.weight_high, rng)?;
        self.train(config.epochs, config.initial_learning_rate, rng)
    }

    /// Read-only view of the weight lattice.
    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Read-only view of the per-node assignment grid.
    #[inline]
    pub fn assignments(&self) -> &AssignmentGrid {
        &self.assignments
    }

    /// Number of pushed training samples.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Input and prototype vector dimensionality.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.lattice.dimension()
    }

    /// True once a training run has completed.
    #[inline]
    pub fn is_trained(&self) -> bool {
        self.trained
    }
}
