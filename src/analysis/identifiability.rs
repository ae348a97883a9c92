//! Parameter identifiability diagnostics.
//!
//! Two complementary sensitivity metrics are exposed (rather than a single
//! conflated score): how much a relative parameter perturbation moves the
//! pole locations, and how much it moves the steady-state gain. A third,
//! structural check reconstructs (C, I, R) back from the transfer-function
//! coefficients and reports the relative errors.

use super::{LinearModel, OperatingPoint};
use crate::error::{CardioError, Result};
use crate::params::ParameterSet;

/// Default relative perturbation applied to each parameter.
pub const DEFAULT_PERTURBATION: f64 = 1e-2;

/// Sensitivity of one derived quantity to one named parameter.
///
/// Values are normalized elasticities: relative change in the quantity per
/// relative change in the parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParameterSensitivity {
    pub name: &'static str,
    pub sensitivity: f64,
}

/// Reconstruction of the physical parameters from the transfer-function
/// coefficients:
///
///   C = 1/b1,  I = b1/a0,  R = a1 b1 / a0
///
/// Near-zero relative errors confirm the arterial triple is structurally
/// identifiable from the pressure output.
#[derive(Debug, Clone, Copy)]
pub struct RoundtripReconstruction {
    pub c_hat: f64,
    pub i_hat: f64,
    pub r_hat: f64,
    pub rel_err_c: f64,
    pub rel_err_i: f64,
    pub rel_err_r: f64,
}

/// Identifiability diagnostics for the arterial parameters.
#[derive(Debug, Clone)]
pub struct IdentifiabilityReport {
    /// Pole-displacement elasticity per parameter.
    pub pole_sensitivity: Vec<ParameterSensitivity>,
    /// DC-gain elasticity per parameter.
    pub gain_sensitivity: Vec<ParameterSensitivity>,
    /// Structural roundtrip through the TF coefficients.
    pub roundtrip: RoundtripReconstruction,
    /// Relative perturbation used for the sensitivities.
    pub perturbation: f64,
}

const ARTERIAL_PARAMETERS: [&str; 4] = ["c_art", "i_art", "r_art", "r_cap"];

fn perturbed(params: &ParameterSet, name: &str, delta: f64) -> ParameterSet {
    let mut p = params.clone();
    match name {
        "c_art" => p.c_art *= 1.0 + delta,
        "i_art" => p.i_art *= 1.0 + delta,
        "r_art" => p.r_art *= 1.0 + delta,
        "r_cap" => p.r_cap *= 1.0 + delta,
        _ => unreachable!("unknown arterial parameter {name}"),
    }
    p
}

/// Largest relative pole displacement between two models.
fn pole_shift(base: &LinearModel, varied: &LinearModel) -> f64 {
    let p0 = base.poles();
    let p1 = varied.poles();
    // Pair poles by minimal total displacement (two candidates for n = 2).
    let direct = (p1[0] - p0[0]).norm().max((p1[1] - p0[1]).norm());
    let swapped = (p1[1] - p0[0]).norm().max((p1[0] - p0[1]).norm());
    let shift = direct.min(swapped);
    let scale = p0[0].norm().max(p0[1].norm());
    if scale > 0.0 {
        shift / scale
    } else {
        f64::INFINITY
    }
}

/// Reconstruct (C, I, R) from a model's TF coefficients and compare to the
/// true parameters.
pub fn roundtrip(model: &LinearModel, params: &ParameterSet) -> Result<RoundtripReconstruction> {
    let tf = &model.tf;
    if tf.b1 == 0.0 {
        return Err(CardioError::invalid_parameter(
            "c_art",
            params.c_art,
            "b1 = 1/C vanished; cannot reconstruct compliance",
        ));
    }
    if tf.a0 == 0.0 {
        return Err(CardioError::invalid_parameter(
            "i_art",
            params.i_art,
            "a0 = 1/(C I) vanished; cannot reconstruct inertance",
        ));
    }

    let c_hat = 1.0 / tf.b1;
    let i_hat = tf.b1 / tf.a0;
    let r_hat = tf.a1 * tf.b1 / tf.a0;

    let rel = |hat: f64, truth: f64| (hat - truth) / truth;
    Ok(RoundtripReconstruction {
        c_hat,
        i_hat,
        r_hat,
        rel_err_c: rel(c_hat, params.c_art),
        rel_err_i: rel(i_hat, params.i_art),
        rel_err_r: rel(r_hat, params.r_total()),
    })
}

/// Compute the full identifiability report for a linearized model.
///
/// Each arterial parameter is perturbed by the relative `delta`
/// (default [`DEFAULT_PERTURBATION`] when `None`); the model is rebuilt at
/// the same operating point and the pole and DC-gain displacements are
/// normalized into elasticities.
pub fn identifiability(
    op: &OperatingPoint,
    params: &ParameterSet,
    delta: Option<f64>,
) -> Result<IdentifiabilityReport> {
    let delta = delta.unwrap_or(DEFAULT_PERTURBATION);
    if !(delta > 0.0) || !delta.is_finite() {
        return Err(CardioError::invalid_config(
            "identifiability perturbation must be strictly positive and finite",
        ));
    }

    let base = LinearModel::build(op, params)?;
    let base_gain = base.dc_gain();

    let mut pole_sensitivity = Vec::with_capacity(ARTERIAL_PARAMETERS.len());
    let mut gain_sensitivity = Vec::with_capacity(ARTERIAL_PARAMETERS.len());

    for name in ARTERIAL_PARAMETERS {
        let varied = LinearModel::build(op, &perturbed(params, name, delta))?;
        pole_sensitivity.push(ParameterSensitivity {
            name,
            sensitivity: pole_shift(&base, &varied) / delta,
        });
        gain_sensitivity.push(ParameterSensitivity {
            name,
            sensitivity: ((varied.dc_gain() - base_gain) / base_gain).abs() / delta,
        });
    }

    Ok(IdentifiabilityReport {
        pole_sensitivity,
        gain_sensitivity,
        roundtrip: roundtrip(&base, params)?,
        perturbation: delta,
    })
}
