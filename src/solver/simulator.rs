//! Multi-cycle simulation driver.
//!
//! [`CycleSimulator`] integrates the model cycle by cycle, comparing the
//! state at each cycle boundary against the previous boundary. Once all
//! three components settle within the configured tolerance the run stops
//! and the final cycle's trajectory is returned; hitting the maximum cycle
//! count instead is a reported, non-fatal condition.

use super::{rk4_step, ConvergenceStatus};
use crate::error::Result;
use crate::model::{AuxiliarySignals, StateVector};
use crate::params::{ParameterSet, SimConfig};

/// One recorded point of a simulation.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Absolute simulation time [s].
    pub t: f64,
    pub state: StateVector,
    pub aux: AuxiliarySignals,
}

/// Ordered time series of one (or more) cardiac cycles.
///
/// Append-only while the simulator owns it; immutable once returned.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    fn with_capacity(n: usize) -> Self {
        Self {
            samples: Vec::with_capacity(n),
        }
    }

    fn clear(&mut self) {
        self.samples.clear();
    }

    fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Recorded samples, in time order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Extract one column of the series as `(t, value)` pairs.
    pub fn column(&self, f: impl Fn(&Sample) -> f64) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.t, f(s))).collect()
    }
}

/// Default initial state: ventricle at atrial pressure, a typical diastolic
/// arterial pressure, no peripheral flow.
///
/// This is a warm start for the transient, not a physiological baseline;
/// the first cycles are expected to drift before the periodic steady cycle
/// is reached.
pub fn default_initial_state(params: &ParameterSet) -> StateVector {
    StateVector::new(params.p_la, 80.0, 0.0)
}

/// Result of a multi-cycle run: the final cycle plus convergence status.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Time series of the final (converged or last-attempted) cycle.
    pub trajectory: Trajectory,
    pub status: ConvergenceStatus,
    /// State at the final cycle boundary; useful for warm-starting.
    pub final_state: StateVector,
}

/// Integrates the model over repeated cardiac cycles until the boundary
/// state settles.
pub struct CycleSimulator {
    params: ParameterSet,
    config: SimConfig,
}

impl CycleSimulator {
    /// Create a simulator for one parameter set.
    pub fn new(params: ParameterSet, config: SimConfig) -> Self {
        Self { params, config }
    }

    /// Run until convergence or until `max_cycles` is exhausted.
    ///
    /// `initial` defaults to [`default_initial_state`]. Configuration and
    /// numerical failures abort with an error; non-convergence does not.
    pub fn run(&self, initial: Option<StateVector>) -> Result<SimulationOutcome> {
        self.params.validate()?;
        self.config.validate()?;

        let dt = self.params.t_cc / self.config.steps_per_cycle as f64;
        let mut state = initial.unwrap_or_else(|| default_initial_state(&self.params));
        let mut boundary = state;

        let mut cycle = Trajectory::with_capacity(self.config.steps_per_cycle + 1);
        let mut residual = f64::INFINITY;

        for cycle_idx in 0..self.config.max_cycles {
            let t_start = cycle_idx as f64 * self.params.t_cc;
            cycle.clear();
            cycle.push(Sample {
                t: t_start,
                state,
                aux: AuxiliarySignals::compute(t_start, &state, &self.params),
            });

            for step in 0..self.config.steps_per_cycle {
                let t = t_start + step as f64 * dt;
                state = rk4_step(t, &state, dt, &self.params)?;
                let t_next = t_start + (step + 1) as f64 * dt;
                cycle.push(Sample {
                    t: t_next,
                    state,
                    aux: AuxiliarySignals::compute(t_next, &state, &self.params),
                });
            }

            residual = state.relative_distance(&boundary);
            if residual <= self.config.convergence_tol {
                return Ok(SimulationOutcome {
                    trajectory: cycle,
                    status: ConvergenceStatus::Converged {
                        cycles: cycle_idx + 1,
                    },
                    final_state: state,
                });
            }
            boundary = state;
        }

        Ok(SimulationOutcome {
            trajectory: cycle,
            status: ConvergenceStatus::MaxCyclesReached {
                cycles: self.config.max_cycles,
                residual,
            },
            final_state: state,
        })
    }
}

/// Run a healthy/pathological pair under one configuration, warm-starting
/// the pathological run from the healthy end state so its transient is
/// short.
pub fn run_pair(
    healthy: &ParameterSet,
    pathological: &ParameterSet,
    config: &SimConfig,
) -> Result<(SimulationOutcome, SimulationOutcome)> {
    let base = CycleSimulator::new(healthy.clone(), config.clone()).run(None)?;
    let warm = base.final_state;
    let path = CycleSimulator::new(pathological.clone(), config.clone()).run(Some(warm))?;
    Ok((base, path))
}
