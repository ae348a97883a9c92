//! Time-varying ventricular activation and compliance.
//!
//! The ventricle is driven by a normalized activation waveform e(tau) over
//! one cardiac cycle: a raised-cosine upstroke during contraction, a
//! raised-cosine downstroke during relaxation, then rest at zero. The
//! instantaneous compliance follows
//!
//!   C_LV(t) = 1 / (a * e(tau) + b),   a = 1/c_min - 1/c_max,  b = 1/c_max
//!
//! so C_LV sweeps continuously from c_max (diastole) down to c_min (peak
//! systole) and back. Both e and C_LV have closed-form time derivatives.

use crate::params::ParameterSet;
use crate::REFERENCE_CYCLE_PERIOD;

/// Map absolute time to cycle time tau in [0, t_cc).
pub fn cycle_phase(t: f64, t_cc: f64) -> f64 {
    t.rem_euclid(t_cc)
}

/// Ventricular activation drive for one parameter set.
///
/// Precomputes the contraction/relaxation durations, which scale with the
/// cycle period against the 70 bpm reference.
#[derive(Debug, Clone, Copy)]
pub struct Activation {
    /// Cardiac cycle duration [s].
    pub t_cc: f64,
    /// Contraction duration [s].
    pub t_vc: f64,
    /// Relaxation duration [s].
    pub t_vr: f64,
    /// 1/c_min - 1/c_max [mmHg/mL].
    a: f64,
    /// 1/c_max [mmHg/mL].
    b: f64,
}

impl Activation {
    /// Build the activation drive from a (validated) parameter set.
    pub fn new(params: &ParameterSet) -> Self {
        let scale = params.t_cc / REFERENCE_CYCLE_PERIOD;
        Self {
            t_cc: params.t_cc,
            t_vc: 0.3 * scale,
            t_vr: 0.15 * scale,
            a: 1.0 / params.c_min - 1.0 / params.c_max,
            b: 1.0 / params.c_max,
        }
    }

    /// Normalized activation e(tau) in [0, 1] at absolute time `t`.
    pub fn waveform(&self, t: f64) -> f64 {
        let tau = cycle_phase(t, self.t_cc);
        if tau <= self.t_vc {
            0.5 * (1.0 - (std::f64::consts::PI * tau / self.t_vc).cos())
        } else if tau <= self.t_vc + self.t_vr {
            0.5 * (1.0 + (std::f64::consts::PI * (tau - self.t_vc) / self.t_vr).cos())
        } else {
            0.0
        }
    }

    /// Time derivative de/dt at absolute time `t`.
    pub fn waveform_rate(&self, t: f64) -> f64 {
        let tau = cycle_phase(t, self.t_cc);
        let pi = std::f64::consts::PI;
        if tau <= self.t_vc {
            (pi / (2.0 * self.t_vc)) * (pi * tau / self.t_vc).sin()
        } else if tau <= self.t_vc + self.t_vr {
            -(pi / (2.0 * self.t_vr)) * (pi * (tau - self.t_vc) / self.t_vr).sin()
        } else {
            0.0
        }
    }

    /// Instantaneous ventricular compliance C_LV(t) [mL/mmHg].
    ///
    /// Strictly positive for any validated parameter set: the denominator
    /// lies in [1/c_max, 1/c_min].
    pub fn compliance(&self, t: f64) -> f64 {
        1.0 / (self.a * self.waveform(t) + self.b)
    }

    /// Time derivative dC_LV/dt [mL/(mmHg·s)].
    pub fn compliance_rate(&self, t: f64) -> f64 {
        let denom = self.a * self.waveform(t) + self.b;
        -(self.a * self.waveform_rate(t)) / (denom * denom)
    }

    /// Instantaneous elastance E_LV(t) = 1 / C_LV(t) [mmHg/mL].
    pub fn elastance(&self, t: f64) -> f64 {
        self.a * self.waveform(t) + self.b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::healthy;
    use approx::assert_relative_eq;

    #[test]
    fn waveform_spans_zero_to_one() {
        let act = Activation::new(&healthy());
        // Peak at end of contraction.
        assert_relative_eq!(act.waveform(act.t_vc), 1.0, epsilon = 1e-12);
        assert_relative_eq!(act.waveform(0.0), 0.0, epsilon = 1e-12);
        // Rest phase is fully relaxed.
        assert_eq!(act.waveform(act.t_vc + act.t_vr + 0.01), 0.0);
    }

    #[test]
    fn waveform_is_periodic() {
        let act = Activation::new(&healthy());
        for &t in &[0.0, 0.1, 0.37, 0.79] {
            assert_relative_eq!(
                act.waveform(t),
                act.waveform(t + act.t_cc),
                epsilon = 1e-12
            );
            assert_relative_eq!(
                act.compliance(t),
                act.compliance(t + 3.0 * act.t_cc),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn waveform_continuous_at_segment_joints() {
        let act = Activation::new(&healthy());
        let eps = 1e-9;
        for &joint in &[act.t_vc, act.t_vc + act.t_vr] {
            let left = act.waveform(joint - eps);
            let right = act.waveform(joint + eps);
            assert!((left - right).abs() < 1e-6, "jump at {joint}");
        }
    }

    #[test]
    fn compliance_stays_within_envelope() {
        let p = healthy();
        let act = Activation::new(&p);
        let n = 1000;
        for i in 0..n {
            let t = p.t_cc * i as f64 / n as f64;
            let c = act.compliance(t);
            assert!(c > 0.0);
            assert!(c >= p.c_min - 1e-12 && c <= p.c_max + 1e-12, "c = {c} at t = {t}");
        }
    }

    #[test]
    fn compliance_rate_matches_finite_difference() {
        let act = Activation::new(&healthy());
        let h = 1e-7;
        for &t in &[0.05, 0.15, 0.33, 0.41, 0.7] {
            let fd = (act.compliance(t + h) - act.compliance(t - h)) / (2.0 * h);
            assert_relative_eq!(act.compliance_rate(t), fd, epsilon = 1e-4, max_relative = 1e-4);
        }
    }

    #[test]
    fn timings_scale_with_cycle_period() {
        let mut p = healthy();
        p.t_cc = 2.0 * REFERENCE_CYCLE_PERIOD;
        let act = Activation::new(&p);
        assert_relative_eq!(act.t_vc, 0.6, epsilon = 1e-12);
        assert_relative_eq!(act.t_vr, 0.3, epsilon = 1e-12);
    }
}
