//! Model parameters and simulation configuration.
//!
//! [`ParameterSet`] is an immutable record of every physical constant in the
//! model. Healthy and pathological variants share the structure and differ
//! only in values; see [`presets`] for the baseline set and pathology
//! transforms.
//!
//! Units follow clinical convention throughout the crate:
//! pressure in mmHg, volume in mL, flow in mL/s, time in s,
//! resistance in mmHg·s/mL, compliance in mL/mmHg, inertance in mmHg·s²/mL.

mod presets;

pub use presets::{
    combined, healthy, increased_afterload, reduced_compliance, stiffening_combo,
};

use crate::error::{CardioError, Result};

/// Physical parameters of the 0D systemic circulation model.
///
/// All magnitudes must be strictly positive; [`ParameterSet::validate`]
/// enforces this and names the offending field on failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    /// Cardiac cycle duration [s].
    pub t_cc: f64,

    /// Maximal (diastolic) ventricular compliance [mL/mmHg].
    pub c_max: f64,
    /// Minimal (end-systolic) ventricular compliance [mL/mmHg].
    pub c_min: f64,

    /// Left atrial pressure [mmHg].
    pub p_la: f64,
    /// Right atrial (venous return reference) pressure [mmHg].
    pub p_ra: f64,

    /// Mitral valve resistance [mmHg·s/mL].
    pub r_mv: f64,
    /// Aortic valve resistance [mmHg·s/mL].
    pub r_av: f64,

    /// Arterial compliance [mL/mmHg].
    pub c_art: f64,
    /// Arterial inertance [mmHg·s²/mL].
    pub i_art: f64,
    /// Arterial resistance [mmHg·s/mL].
    pub r_art: f64,
    /// Capillary resistance [mmHg·s/mL].
    pub r_cap: f64,

    /// Residual (unstressed) ventricular volume [mL].
    pub v_rest: f64,

    /// Valve smoothing sharpness: slope of the tanh step [1/mmHg].
    /// Larger values approach an ideal on/off valve but stiffen the ODE;
    /// this stays finite and explicitly configured.
    pub k_valve: f64,

    /// Human-readable label ("healthy", "reduced_compliance", ...).
    pub label: String,
}

impl ParameterSet {
    /// Total peripheral resistance seen by the arterial outflow branch.
    pub fn r_total(&self) -> f64 {
        self.r_art + self.r_cap
    }

    /// Check every physical invariant, naming the first violated field.
    pub fn validate(&self) -> Result<()> {
        let positive: [(&'static str, f64); 10] = [
            ("t_cc", self.t_cc),
            ("c_max", self.c_max),
            ("c_min", self.c_min),
            ("r_mv", self.r_mv),
            ("r_av", self.r_av),
            ("c_art", self.c_art),
            ("i_art", self.i_art),
            ("r_art", self.r_art),
            ("r_cap", self.r_cap),
            ("k_valve", self.k_valve),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CardioError::invalid_parameter(
                    name,
                    value,
                    "must be strictly positive and finite",
                ));
            }
        }
        if self.c_min >= self.c_max {
            return Err(CardioError::invalid_parameter(
                "c_min",
                self.c_min,
                format!("must be below c_max = {}", self.c_max),
            ));
        }
        if !self.p_la.is_finite() {
            return Err(CardioError::invalid_parameter(
                "p_la",
                self.p_la,
                "must be finite",
            ));
        }
        if !self.p_ra.is_finite() {
            return Err(CardioError::invalid_parameter(
                "p_ra",
                self.p_ra,
                "must be finite",
            ));
        }
        if self.v_rest < 0.0 || !self.v_rest.is_finite() {
            return Err(CardioError::invalid_parameter(
                "v_rest",
                self.v_rest,
                "must be non-negative and finite",
            ));
        }
        Ok(())
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        presets::healthy()
    }
}

/// Default maximum number of cardiac cycles before giving up on convergence.
pub const DEFAULT_MAX_CYCLES: usize = 50;

/// Default number of integration steps per cardiac cycle.
///
/// The fixed RK4 step has to resolve the fast inertance time constant
/// (i_art / r_total, about 0.1 ms for healthy parameters); 8000 steps over
/// a 0.8 s cycle keeps the scheme well inside its stability region.
pub const DEFAULT_STEPS_PER_CYCLE: usize = 8000;

/// Default cycle-to-cycle convergence tolerance (relative, with unit
/// absolute floor).
pub const DEFAULT_CONVERGENCE_TOL: f64 = 1e-3;

/// Configuration for the multi-cycle simulator, independent of physiology.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Maximum number of cardiac cycles to integrate.
    pub max_cycles: usize,
    /// Fixed integration steps per cycle (RK4 step is `t_cc / steps_per_cycle`).
    pub steps_per_cycle: usize,
    /// Cycle-boundary convergence tolerance. The run is converged once
    /// `|x_k - x_{k-1}| <= tol * (1 + |x_{k-1}|)` holds for all three
    /// state components at a cycle boundary.
    pub convergence_tol: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_cycles: DEFAULT_MAX_CYCLES,
            steps_per_cycle: DEFAULT_STEPS_PER_CYCLE,
            convergence_tol: DEFAULT_CONVERGENCE_TOL,
        }
    }
}

impl SimConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_cycles == 0 {
            return Err(CardioError::invalid_config("max_cycles must be >= 1"));
        }
        if self.steps_per_cycle < 2 {
            return Err(CardioError::invalid_config("steps_per_cycle must be >= 2"));
        }
        if !(self.convergence_tol > 0.0) || !self.convergence_tol.is_finite() {
            return Err(CardioError::invalid_config(
                "convergence_tol must be strictly positive and finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_params_validate() {
        assert!(healthy().validate().is_ok());
    }

    #[test]
    fn rejects_nonpositive_compliance() {
        let mut p = healthy();
        p.c_art = 0.0;
        let err = p.validate().unwrap_err();
        match err {
            CardioError::InvalidParameter { name, .. } => assert_eq!(name, "c_art"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_zero_inertance() {
        let mut p = healthy();
        p.i_art = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_zero_cycle_period() {
        let mut p = healthy();
        p.t_cc = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_inverted_compliance_envelope() {
        let mut p = healthy();
        p.c_min = p.c_max + 1.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn r_total_sums_arterial_and_capillary() {
        let p = healthy();
        assert_eq!(p.r_total(), p.r_art + p.r_cap);
    }

    #[test]
    fn config_rejects_zero_cycles() {
        let cfg = SimConfig {
            max_cycles: 0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
