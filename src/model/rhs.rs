//! The coupled ODE right-hand side and derived auxiliary signals.
//!
//! State equations (ventricle + two-element arterial Windkessel):
//!
//!   C_LV(t) * dp_lv/dt = -p_lv * dC_LV/dt + q_mitral - q_aortic
//!   C_art   * dp1/dt   = q_aortic - q2
//!   I_art   * dq2/dt   = p1 - p_ra - R_total * q2
//!
//! Both functions here are stateless: everything is derived from the
//! explicit `(t, state, params)` arguments, so any-order integrators can
//! call them at arbitrary points.

use super::activation::Activation;
use super::valve::{aortic_flow, mitral_flow, Valve};
use super::StateVector;
use crate::params::ParameterSet;

/// Non-integrated quantities derived from a state and time.
///
/// Recomputed on demand; never part of the integration state.
#[derive(Debug, Clone, Copy)]
pub struct AuxiliarySignals {
    /// Ventricular compliance C_LV(t) [mL/mmHg].
    pub c_lv: f64,
    /// dC_LV/dt [mL/(mmHg·s)].
    pub dc_lv_dt: f64,
    /// Ventricular elastance E_LV(t) = 1/C_LV(t) [mmHg/mL].
    pub e_lv: f64,
    /// Mitral inflow [mL/s].
    pub q_mitral: f64,
    /// Aortic outflow [mL/s].
    pub q_aortic: f64,
    /// Ventricular volume V_LV = v_rest + C_LV * p_lv [mL].
    pub v_lv: f64,
}

impl AuxiliarySignals {
    /// Compute all derived signals at `(t, state)`.
    pub fn compute(t: f64, state: &StateVector, params: &ParameterSet) -> Self {
        let act = Activation::new(params);
        let mitral = Valve::new(params.r_mv, params.k_valve);
        let aortic = Valve::new(params.r_av, params.k_valve);

        let c_lv = act.compliance(t);
        Self {
            c_lv,
            dc_lv_dt: act.compliance_rate(t),
            e_lv: act.elastance(t),
            q_mitral: mitral_flow(&mitral, params.p_la, state.p_lv),
            q_aortic: aortic_flow(&aortic, state.p_lv, state.p1),
            v_lv: params.v_rest + c_lv * state.p_lv,
        }
    }
}

/// Evaluate d/dt of the state vector at `(t, state)`.
pub fn derivative(t: f64, state: &StateVector, params: &ParameterSet) -> StateVector {
    let aux = AuxiliarySignals::compute(t, state, params);

    let dp_lv = (-state.p_lv * aux.dc_lv_dt + aux.q_mitral - aux.q_aortic) / aux.c_lv;
    let dp1 = (aux.q_aortic - state.q2) / params.c_art;
    let dq2 = (state.p1 - params.p_ra - params.r_total() * state.q2) / params.i_art;

    StateVector::new(dp_lv, dp1, dq2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::healthy;
    use approx::assert_relative_eq;

    #[test]
    fn derivative_is_finite_on_a_state_grid() {
        let p = healthy();
        let pressures = [-50.0, 0.0, 8.0, 80.0, 200.0];
        let flows = [-100.0, 0.0, 70.0, 500.0];
        for &p_lv in &pressures {
            for &p1 in &pressures {
                for &q2 in &flows {
                    for &t in &[0.0, 0.1, 0.3, 0.79] {
                        let d = derivative(t, &StateVector::new(p_lv, p1, q2), &p);
                        assert!(d.is_finite(), "non-finite at ({p_lv}, {p1}, {q2}, {t})");
                    }
                }
            }
        }
    }

    #[test]
    fn diastolic_filling_raises_ventricular_pressure() {
        let p = healthy();
        // Rest phase, ventricle below atrial pressure: mitral inflow fills it.
        let state = StateVector::new(2.0, 80.0, 70.0);
        let d = derivative(0.7, &state, &p);
        assert!(d.p_lv > 0.0);
    }

    #[test]
    fn ejection_charges_arterial_compliance() {
        let p = healthy();
        // Peak systole, ventricle above arterial pressure, no outflow yet.
        let act = Activation::new(&p);
        let state = StateVector::new(120.0, 90.0, 0.0);
        let d = derivative(act.t_vc, &state, &p);
        assert!(d.p1 > 0.0);
    }

    #[test]
    fn volume_reconstruction_uses_compliance_relation() {
        let p = healthy();
        let state = StateVector::new(10.0, 80.0, 50.0);
        let aux = AuxiliarySignals::compute(0.0, &state, &p);
        assert_relative_eq!(aux.v_lv, p.v_rest + aux.c_lv * state.p_lv, epsilon = 1e-12);
        assert_relative_eq!(aux.e_lv * aux.c_lv, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn derivative_is_stateless() {
        let p = healthy();
        let state = StateVector::new(15.0, 85.0, 60.0);
        let a = derivative(0.2, &state, &p);
        // Interleave other evaluations; repeat must be bit-identical.
        let _ = derivative(0.5, &StateVector::new(1.0, 2.0, 3.0), &p);
        let b = derivative(0.2, &state, &p);
        assert_eq!(a, b);
    }
}
