//! Linear-systems analysis of the converged operating point.
//!
//! - [`linearization`] - reduced state-space / transfer-function model of
//!   the arterial subsystem
//! - [`observability`] - observability matrix and numerical rank
//! - [`identifiability`] - parameter sensitivity and structural roundtrip
//! - [`metrics`] - waveform metrics on a simulated cycle

mod identifiability;
mod linearization;
pub mod metrics;
mod observability;

pub use identifiability::{
    identifiability, roundtrip, IdentifiabilityReport, ParameterSensitivity,
    RoundtripReconstruction, DEFAULT_PERTURBATION,
};
pub use linearization::{LinearModel, OperatingPoint, TfCoefficients};
pub use metrics::{CycleMetrics, ValveTiming};
pub use observability::{observability, observability_matrix, ObservabilityReport};

use nalgebra::Complex;

use crate::error::Result;
use crate::params::ParameterSet;

/// Bundle of all linear diagnostics for one model.
///
/// Pure function output of a [`LinearModel`] and its [`ParameterSet`];
/// rank deficiency and sensitivities are data, never errors.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub poles: [Complex<f64>; 2],
    pub zero: f64,
    pub natural_frequency: f64,
    pub damping_ratio: f64,
    pub observability: ObservabilityReport,
    pub identifiability: IdentifiabilityReport,
}

impl AnalysisResult {
    /// Run every diagnostic on a built model.
    pub fn compute(model: &LinearModel, params: &ParameterSet) -> Result<Self> {
        Ok(Self {
            poles: model.poles(),
            zero: model.zero(),
            natural_frequency: model.natural_frequency(),
            damping_ratio: model.damping_ratio(),
            observability: observability(model, None),
            identifiability: identifiability(&model.operating_point, params, None)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StateVector;
    use crate::params::healthy;

    #[test]
    fn full_analysis_of_the_healthy_model() {
        let p = healthy();
        let op = OperatingPoint {
            state: StateVector::new(12.0, 95.0, 85.0),
            q_aortic: 85.0,
        };
        let model = LinearModel::build(&op, &p).unwrap();
        let result = AnalysisResult::compute(&model, &p).unwrap();

        assert!(result.observability.is_observable());
        assert!(result.poles.iter().all(|pole| pole.re < 0.0));
        assert!(result.zero < 0.0);
        assert!(result.natural_frequency > 0.0);
        assert!(result.damping_ratio > 0.0);
        assert!(result.identifiability.roundtrip.rel_err_c.abs() < 1e-12);
    }
}
