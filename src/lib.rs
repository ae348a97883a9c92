//! # Cardio Core
//!
//! A lumped-parameter (0D) simulator for systemic circulation hemodynamics.
//!
//! This library provides:
//! - A time-varying-elastance left ventricle coupled through smoothed
//!   (differentiable) mitral and aortic valves to a two-element arterial
//!   Windkessel network
//! - Multi-cycle numerical integration with steady-cycle convergence detection
//! - Linearization of the arterial subsystem and classical linear-systems
//!   diagnostics (poles/zeros, observability, parameter identifiability)
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`params`] - Validated parameter sets, simulation configuration, presets
//! - [`model`] - Ventricular activation, valve models, and the ODE right-hand side
//! - [`solver`] - Fixed-step integration and the multi-cycle simulator
//! - [`analysis`] - Arterial linearization, observability, identifiability, metrics
//!
//! ## Usage
//!
//! ```no_run
//! use cardio_core::analysis::{LinearModel, OperatingPoint};
//! use cardio_core::{params, CycleSimulator, SimConfig};
//!
//! let p = params::healthy();
//! let outcome = CycleSimulator::new(p.clone(), SimConfig::default()).run(None)?;
//! let op = OperatingPoint::from_trajectory(&outcome.trajectory, &p)?;
//! let lti = LinearModel::build(&op, &p)?;
//! println!("poles: {:?}", lti.poles());
//! # Ok::<(), cardio_core::CardioError>(())
//! ```
//!
//! ## Simulation Method
//!
//! The three coupled state equations (ventricular pressure, arterial pressure,
//! peripheral flow) are advanced with a classic fixed-step fourth-order
//! Runge-Kutta scheme. Valve switching is smoothed with a tanh step so the
//! right-hand side stays Lipschitz-continuous; no zero-crossing event handling
//! is required. After each cardiac cycle the cycle-boundary state is compared
//! to the previous boundary and the run stops once the relative change in all
//! three components falls below the configured tolerance.

pub mod analysis;
pub mod error;
pub mod model;
pub mod params;
pub mod solver;

// Re-export main types for convenience
pub use error::{CardioError, Result};
pub use model::{AuxiliarySignals, StateVector};
pub use params::{ParameterSet, SimConfig};
pub use solver::{ConvergenceStatus, CycleSimulator, SimulationOutcome, Trajectory};

/// Reference cardiac cycle duration in seconds (6/7 s, about 70 bpm).
///
/// Contraction and relaxation durations are scaled against this reference
/// when the configured cycle period differs from it.
pub const REFERENCE_CYCLE_PERIOD: f64 = 6.0 / 7.0;

/// Default valve smoothing sharpness (slope of the tanh step, per mmHg).
pub const DEFAULT_VALVE_SHARPNESS: f64 = 50.0;
