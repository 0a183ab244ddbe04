//! # Topomap - Self-Organizing Map Engine
//!
//! Topomap trains a classic Self-Organizing Map: an unsupervised neural
//! lattice that projects high-dimensional input vectors onto a 2-D grid of
//! prototype vectors so that topologically similar inputs land on nearby
//! nodes.
//!
//! ## Overview
//!
//! A training run draws samples at random (with replacement), finds each
//! draw's Best Matching Unit by exhaustive Euclidean search, records the
//! draw on a per-node assignment grid, and pulls every prototype vector
//! toward the sample with a Gaussian neighborhood influence. Both the
//! neighborhood radius and the learning rate decay exponentially over the
//! run.
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use topomap::SomTrainer;
//!
//! # fn main() -> topomap::Result<()> {
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//!
//! let mut trainer = SomTrainer::new(8, 8, 3)?;
//! trainer.initialize_weights(0.0, 1.0, &mut rng)?;
//! for sample in [[0.9, 0.1, 0.1], [0.1, 0.9, 0.1], [0.1, 0.1, 0.9]] {
//!     trainer.push_sample(sample.to_vec())?;
//! }
//! trainer.train(1_000, 0.1, &mut rng)?;
//!
//! // The trained lattice and the per-node sample assignments are readable.
//! let prototype = trainer.lattice().get(0, 0)?;
//! assert_eq!(prototype.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`som`] - the lattice, metric, decay schedules, and trainer
//! - [`config`] - hyperparameter bundle with defaults
//! - [`error`] - error kinds for every precondition violation
//!
//! Randomness is never ambient: weight initialization and sample draws
//! consume an explicitly passed [`rand::Rng`], so a seeded generator makes
//! runs bit-for-bit reproducible.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod som;

// Re-export commonly used types
pub use config::SomConfig;
pub use error::{Result, TopomapError};
pub use som::metric::distance;
pub use som::{AssignmentGrid, DecaySchedule, Lattice, SomTrainer, TrainingSummary};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
