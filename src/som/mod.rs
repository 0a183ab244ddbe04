//! Self-Organizing Map engine.
//!
//! The pieces compose bottom-up:
//!
//! - **Metric** (metric.rs): Euclidean distance between vectors
//! - **Lattice** (lattice.rs): the weight arena, BMU search, weight updates,
//!   and the per-node assignment record
//! - **Schedule** (schedule.rs): radius and learning-rate decay
//! - **Trainer** (trainer.rs): the stochastic training loop

mod lattice;
pub mod metric;
mod schedule;
mod trainer;

pub use lattice::{AssignmentGrid, Lattice};
pub use schedule::DecaySchedule;
pub use trainer::{SomTrainer, TrainingSummary};
