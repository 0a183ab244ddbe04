//! Decay schedules for the neighborhood radius and learning rate.

/// Exponential decay schedule fixed at the start of a training run.
///
/// Both curves share the time constant `lambda = epochs / ln(sigma0)`,
/// so the neighborhood radius decays from `sigma0` towards one node over
/// the course of the run while the learning rate decays in proportion.
/// Requires `sigma0 > 1`; the trainer rejects lattices that would violate
/// this before a schedule is ever built.
#[derive(Debug, Clone, Copy)]
pub struct DecaySchedule {
    sigma0: f64,
    initial_rate: f64,
    lambda: f64,
}

impl DecaySchedule {
    /// Creates a schedule for a run of `epochs` iterations.
    pub fn new(epochs: usize, initial_rate: f64, sigma0: f64) -> Self {
        debug_assert!(sigma0 > 1.0, "sigma0 must exceed 1 for a positive lambda");
        debug_assert!(epochs > 0, "epochs must be positive");

        Self {
            sigma0,
            initial_rate,
            lambda: epochs as f64 / sigma0.ln(),
        }
    }

    /// The neighborhood radius at iteration `t`: `sigma0 * exp(-t / lambda)`.
    ///
    /// Strictly decreasing in `t`, approaching but never reaching zero.
    #[inline]
    pub fn radius(&self, t: usize) -> f64 {
        self.sigma0 * (-(t as f64) / self.lambda).exp()
    }

    /// The learning rate at iteration `t`: `rate0 * exp(-t / lambda)`.
    ///
    /// Strictly decreasing in `t`, approaching but never reaching zero.
    #[inline]
    pub fn learning_rate(&self, t: usize) -> f64 {
        self.initial_rate * (-(t as f64) / self.lambda).exp()
    }

    /// The initial neighborhood radius.
    #[inline]
    pub fn sigma0(&self) -> f64 {
        self.sigma0
    }
}
