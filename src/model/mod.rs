//! The nonlinear circulation model.
//!
//! Three building blocks, all pure functions of their explicit arguments:
//!
//! - [`activation`] - the time-varying ventricular compliance drive
//! - [`valve`] - smoothed mitral/aortic valve flow
//! - [`rhs`] - the coupled 3-state ODE right-hand side

pub mod activation;
pub mod rhs;
pub mod valve;

pub use activation::Activation;
pub use rhs::{derivative, AuxiliarySignals};
pub use valve::Valve;

/// Instantaneous state of the circulation.
///
/// - `p_lv`: left ventricular pressure [mmHg]
/// - `p1`: aortic/arterial pressure [mmHg]
/// - `q2`: peripheral arterial outflow [mL/s]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub p_lv: f64,
    pub p1: f64,
    pub q2: f64,
}

impl StateVector {
    /// Build a state vector from its components.
    pub fn new(p_lv: f64, p1: f64, q2: f64) -> Self {
        Self { p_lv, p1, q2 }
    }

    /// Zero state.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.p_lv.is_finite() && self.p1.is_finite() && self.q2.is_finite()
    }

    /// Component-wise `self + rhs * scale` (RK stage arithmetic).
    pub fn add_scaled(&self, rhs: &StateVector, scale: f64) -> Self {
        Self {
            p_lv: self.p_lv + rhs.p_lv * scale,
            p1: self.p1 + rhs.p1 * scale,
            q2: self.q2 + rhs.q2 * scale,
        }
    }

    /// Largest component-wise deviation from `other`, each scaled by
    /// `1 + |other|` (mixed absolute/relative measure).
    pub fn relative_distance(&self, other: &StateVector) -> f64 {
        let d = |a: f64, b: f64| (a - b).abs() / (1.0 + b.abs());
        d(self.p_lv, other.p_lv)
            .max(d(self.p1, other.p1))
            .max(d(self.q2, other.q2))
    }
}
