//! Numerical integration of the circulation model.
//!
//! The right-hand side is smooth (tanh-gated valves), so a classic
//! fixed-step fourth-order Runge-Kutta scheme is adequate and keeps runs
//! bit-for-bit reproducible. [`integrate`] provides the guarded single
//! step; [`simulator`] drives it over whole cardiac cycles and watches for
//! convergence to a steady periodic cycle.

mod integrate;
mod simulator;

pub use integrate::rk4_step;
pub use simulator::{
    default_initial_state, run_pair, CycleSimulator, Sample, SimulationOutcome, Trajectory,
};

/// Outcome of the cycle-to-cycle convergence check.
///
/// Non-convergence is a reported condition, not an error: the last
/// attempted cycle is still returned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvergenceStatus {
    /// The cycle-boundary state settled within tolerance.
    Converged { cycles: usize },
    /// The configured maximum cycle count was reached first. `residual` is
    /// the last cycle-boundary relative change.
    MaxCyclesReached { cycles: usize, residual: f64 },
}

impl ConvergenceStatus {
    /// True when the run settled within tolerance.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Number of full cycles integrated.
    pub fn cycles(&self) -> usize {
        match *self {
            Self::Converged { cycles } => cycles,
            Self::MaxCyclesReached { cycles, .. } => cycles,
        }
    }
}
