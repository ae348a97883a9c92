//! Smoothed heart valve model.
//!
//! A valve passes flow proportional to the pressure gradient when open and
//! (near-)zero flow when the gradient is adverse:
//!
//!   q(dp) = dp / r * H(dp),    H(x) = (1 + tanh(k x)) / 2
//!
//! The tanh step replaces the hard Heaviside so the ODE right-hand side
//! stays differentiable; integrators need no zero-crossing events. As the
//! sharpness k grows the behavior approaches the ideal valve, at the cost
//! of stiffness near the transition, so k stays finite and configured.
//!
//! A finite-k valve admits a vanishing regurgitant leak just below the
//! threshold: |q| is bounded by about 0.14 / (k r) for dp < 0, so the flow
//! is non-decreasing up to that leak scale and strictly so for dp >= 0.
//!
//! The flow gradient dq/d(dp) is available in closed form:
//!
//!   dq/d(dp) = H(dp)/r + dp * k / (2 r) * sech^2(k dp)

/// A smoothed valve with fixed resistance and sharpness.
#[derive(Debug, Clone, Copy)]
pub struct Valve {
    /// Valve resistance [mmHg·s/mL].
    pub resistance: f64,
    /// Smoothing sharpness [1/mmHg].
    pub sharpness: f64,
}

impl Valve {
    /// Create a valve. Resistance and sharpness come from a validated
    /// [`crate::ParameterSet`], so both are strictly positive.
    pub fn new(resistance: f64, sharpness: f64) -> Self {
        Self {
            resistance,
            sharpness,
        }
    }

    /// Smooth step H(x) = (1 + tanh(k x)) / 2 in [0, 1].
    pub fn smooth_step(&self, x: f64) -> f64 {
        0.5 * (1.0 + (self.sharpness * x).tanh())
    }

    /// Volumetric flow [mL/s] for a transvalvular gradient `dp` [mmHg].
    pub fn flow(&self, dp: f64) -> f64 {
        dp / self.resistance * self.smooth_step(dp)
    }

    /// Closed-form flow gradient dq/d(dp) [mL/(s·mmHg)].
    pub fn flow_gradient(&self, dp: f64) -> f64 {
        let k = self.sharpness;
        let h = self.smooth_step(dp);
        let sech2 = {
            let c = (k * dp).cosh();
            1.0 / (c * c)
        };
        h / self.resistance + dp * k * sech2 / (2.0 * self.resistance)
    }
}

/// Mitral inflow: gradient is atrial minus ventricular pressure.
pub fn mitral_flow(valve: &Valve, p_la: f64, p_lv: f64) -> f64 {
    valve.flow(p_la - p_lv)
}

/// Aortic outflow: gradient is ventricular minus arterial pressure.
pub fn aortic_flow(valve: &Valve, p_lv: f64, p1: f64) -> f64 {
    valve.flow(p_lv - p1)
}
