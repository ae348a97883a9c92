//! Guarded fixed-step RK4 integration step.

use crate::error::{CardioError, Result};
use crate::model::{derivative, StateVector};
use crate::params::ParameterSet;

/// Advance the state by one RK4 step of size `dt` from time `t`.
///
/// Every stage derivative and the resulting state are checked finite; a
/// violation aborts with the failing time and state rather than being
/// clamped.
pub fn rk4_step(t: f64, state: &StateVector, dt: f64, params: &ParameterSet) -> Result<StateVector> {
    let eval = |t_stage: f64, x: &StateVector| -> Result<StateVector> {
        let d = derivative(t_stage, x, params);
        if !d.is_finite() {
            return Err(CardioError::non_finite_derivative(t_stage, *x));
        }
        Ok(d)
    };

    let k1 = eval(t, state)?;
    let k2 = eval(t + 0.5 * dt, &state.add_scaled(&k1, 0.5 * dt))?;
    let k3 = eval(t + 0.5 * dt, &state.add_scaled(&k2, 0.5 * dt))?;
    let k4 = eval(t + dt, &state.add_scaled(&k3, dt))?;

    let next = StateVector::new(
        state.p_lv + dt / 6.0 * (k1.p_lv + 2.0 * k2.p_lv + 2.0 * k3.p_lv + k4.p_lv),
        state.p1 + dt / 6.0 * (k1.p1 + 2.0 * k2.p1 + 2.0 * k3.p1 + k4.p1),
        state.q2 + dt / 6.0 * (k1.q2 + 2.0 * k2.q2 + 2.0 * k3.q2 + k4.q2),
    );

    if !next.is_finite() {
        return Err(CardioError::non_finite_state(t + dt, *state));
    }
    Ok(next)
}
