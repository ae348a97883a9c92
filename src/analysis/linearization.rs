//! Linearization of the arterial subsystem.
//!
//! The arterial Windkessel pair (p1, q2) is linearized in deviation
//! variables about an operating point taken from a converged cycle. The
//! aortic valve flow acts as the external input perturbation; ventricular
//! dynamics sit upstream of the valve and are excluded from this reduced
//! model.
//!
//!   d/dt [Δp1 ] = [ 0      -1/C ] [Δp1 ]   [ 1/C ]
//!        [Δq2 ]   [ 1/I    -R/I ] [Δq2 ] + [ 0   ] Δq_in
//!
//!   y = Δp1
//!
//! Equivalently H(s) = (b1 s + b0) / (s^2 + a1 s + a0) with b1 = 1/C,
//! b0 = R/(C I), a1 = R/I, a0 = 1/(C I), where R is the total peripheral
//! resistance.

use nalgebra::{Complex, Matrix2, RowVector2, Vector2};

use crate::error::{CardioError, Result};
use crate::model::{StateVector, Valve};
use crate::params::ParameterSet;
use crate::solver::Trajectory;

/// Linearization center: cycle-mean state and cycle-mean aortic inflow.
///
/// For the linear arterial equations the time average of the right-hand
/// side over a closed cycle vanishes, so centering on cycle means makes
/// the deviation model exact to first order with (near) zero residual.
#[derive(Debug, Clone, Copy)]
pub struct OperatingPoint {
    /// Cycle-mean state.
    pub state: StateVector,
    /// Cycle-mean aortic valve flow, the input level [mL/s].
    pub q_aortic: f64,
}

impl OperatingPoint {
    /// Derive the operating point from a (final, converged) cycle.
    pub fn from_trajectory(trajectory: &Trajectory, _params: &ParameterSet) -> Result<Self> {
        if trajectory.len() < 2 {
            return Err(CardioError::EmptyTrajectory {
                message: "operating point needs at least one integrated cycle".to_string(),
            });
        }
        let mean = |col: &[(f64, f64)]| super::metrics::trapezoid_mean(col);
        Ok(Self {
            state: StateVector::new(
                mean(&trajectory.column(|s| s.state.p_lv)),
                mean(&trajectory.column(|s| s.state.p1)),
                mean(&trajectory.column(|s| s.state.q2)),
            ),
            q_aortic: mean(&trajectory.column(|s| s.aux.q_aortic)),
        })
    }
}

/// Transfer-function coefficients of the arterial subsystem,
/// H(s) = (b1 s + b0) / (s^2 + a1 s + a0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TfCoefficients {
    pub a0: f64,
    pub a1: f64,
    pub b0: f64,
    pub b1: f64,
}

impl TfCoefficients {
    fn from_params(params: &ParameterSet) -> Self {
        let c = params.c_art;
        let i = params.i_art;
        let r = params.r_total();
        Self {
            a0: 1.0 / (c * i),
            a1: r / i,
            b0: r / (c * i),
            b1: 1.0 / c,
        }
    }
}

/// Second-order linear state-space model of the arterial subsystem.
///
/// Immutable once built; all diagnostics are derived views.
#[derive(Debug, Clone)]
pub struct LinearModel {
    /// State matrix over (Δp1, Δq2).
    pub a: Matrix2<f64>,
    /// Input matrix (input: Δq_aortic).
    pub b: Vector2<f64>,
    /// Output matrix (output: Δp1).
    pub c: RowVector2<f64>,
    /// Direct feedthrough.
    pub d: f64,
    /// Equivalent transfer-function coefficients.
    pub tf: TfCoefficients,
    /// Linearization center.
    pub operating_point: OperatingPoint,
    /// Exact aortic valve conductance dq/d(Δp) at the operating point,
    /// from the closed-form valve gradient (input-path sensitivity).
    pub input_conductance: f64,
}

impl LinearModel {
    /// Build the reduced model for an operating point and parameter set.
    pub fn build(op: &OperatingPoint, params: &ParameterSet) -> Result<Self> {
        params.validate()?;

        let c_art = params.c_art;
        let i_art = params.i_art;
        let r = params.r_total();

        let a = Matrix2::new(0.0, -1.0 / c_art, 1.0 / i_art, -r / i_art);
        let b = Vector2::new(1.0 / c_art, 0.0);
        let c = RowVector2::new(1.0, 0.0);

        let aortic = Valve::new(params.r_av, params.k_valve);
        let input_conductance = aortic.flow_gradient(op.state.p_lv - op.state.p1);

        Ok(Self {
            a,
            b,
            c,
            d: 0.0,
            tf: TfCoefficients::from_params(params),
            operating_point: *op,
            input_conductance,
        })
    }

    /// Poles: eigenvalues of the state matrix.
    pub fn poles(&self) -> [Complex<f64>; 2] {
        let eigs = self.a.complex_eigenvalues();
        [eigs[0], eigs[1]]
    }

    /// The single transmission zero, at -b0/b1.
    pub fn zero(&self) -> f64 {
        -self.tf.b0 / self.tf.b1
    }

    /// Undamped natural frequency [rad/s].
    pub fn natural_frequency(&self) -> f64 {
        self.tf.a0.sqrt()
    }

    /// Damping ratio.
    pub fn damping_ratio(&self) -> f64 {
        self.tf.a1 / (2.0 * self.natural_frequency())
    }

    /// Steady-state (DC) gain H(0) = b0/a0, which equals the total
    /// peripheral resistance.
    pub fn dc_gain(&self) -> f64 {
        self.tf.b0 / self.tf.a0
    }

    /// Nonlinear arterial right-hand side evaluated at the operating point
    /// with the operating input. Near zero when the model is centered on a
    /// converged cycle's means.
    pub fn centering_residual(&self, params: &ParameterSet) -> Vector2<f64> {
        let op = &self.operating_point;
        Vector2::new(
            (op.q_aortic - op.state.q2) / params.c_art,
            (op.state.p1 - params.p_ra - params.r_total() * op.state.q2) / params.i_art,
        )
    }
}
