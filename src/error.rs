//! Error types for the cardio simulator.
//!
//! This module provides a unified error type [`CardioError`] that covers
//! all fatal conditions: misconfigured parameters and numerical failures
//! during integration or analysis.
//!
//! Non-fatal diagnostics (non-convergence of the multi-cycle loop,
//! observability rank deficiency) are *not* errors; they are reported as
//! data on the corresponding result structs.

use thiserror::Error;

/// Result type alias using [`CardioError`].
pub type Result<T> = std::result::Result<T, CardioError>;

/// Unified error type for all cardio operations.
#[derive(Error, Debug)]
pub enum CardioError {
    // ============ Configuration Errors ============
    /// A physical parameter violates its invariant (e.g. non-positive).
    #[error("Invalid parameter '{name}' = {value}: {message}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        message: String,
    },

    /// A simulation configuration value is unusable.
    #[error("Invalid simulation config: {message}")]
    InvalidConfig { message: String },

    // ============ Numerical Failures ============
    /// The right-hand side produced a non-finite derivative.
    #[error(
        "Non-finite derivative at t = {t:.6} s (state: p_lv = {p_lv:.3}, p1 = {p1:.3}, q2 = {q2:.3})"
    )]
    NonFiniteDerivative {
        t: f64,
        p_lv: f64,
        p1: f64,
        q2: f64,
    },

    /// An integration step produced a non-finite state.
    #[error(
        "Non-finite state after step at t = {t:.6} s (state: p_lv = {p_lv:.3}, p1 = {p1:.3}, q2 = {q2:.3})"
    )]
    NonFiniteState {
        t: f64,
        p_lv: f64,
        p1: f64,
        q2: f64,
    },

    /// A trajectory was too short for the requested derivation.
    #[error("Empty trajectory: {message}")]
    EmptyTrajectory { message: String },
}

impl CardioError {
    /// Create an invalid-parameter error.
    pub fn invalid_parameter(name: &'static str, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            message: message.into(),
        }
    }

    /// Create an invalid-config error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a non-finite derivative error from a failing time and state.
    pub fn non_finite_derivative(t: f64, state: crate::model::StateVector) -> Self {
        Self::NonFiniteDerivative {
            t,
            p_lv: state.p_lv,
            p1: state.p1,
            q2: state.q2,
        }
    }

    /// Create a non-finite state error from a failing time and state.
    pub fn non_finite_state(t: f64, state: crate::model::StateVector) -> Self {
        Self::NonFiniteState {
            t,
            p_lv: state.p_lv,
            p1: state.p1,
            q2: state.q2,
        }
    }
}
