//! Waveform metrics on a simulated cycle.
//!
//! Operates on a returned [`Trajectory`] as plain read-only data; the
//! simulator never depends on this module.

use crate::solver::Trajectory;

/// Time-average of `(t, y)` samples by trapezoidal integration.
///
/// Returns 0 for series shorter than two samples or of zero duration.
pub fn trapezoid_mean(series: &[(f64, f64)]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let duration = series[series.len() - 1].0 - series[0].0;
    if duration <= 0.0 {
        return 0.0;
    }
    let mut area = 0.0;
    for pair in series.windows(2) {
        let (t0, y0) = pair[0];
        let (t1, y1) = pair[1];
        area += 0.5 * (y0 + y1) * (t1 - t0);
    }
    area / duration
}

fn min_max(series: &[(f64, f64)]) -> (f64, f64) {
    series.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &(_, y)| {
        (lo.min(y), hi.max(y))
    })
}

/// Opening behavior of one valve over a cycle, judged from its flow
/// waveform. "Open" means flow above a relative threshold of the peak,
/// which is the pragmatic definition for smoothed valves.
#[derive(Debug, Clone, Copy)]
pub struct ValveTiming {
    /// Peak flow [mL/s].
    pub peak: f64,
    /// Time of peak flow [s].
    pub t_peak: f64,
    /// Total open time [s].
    pub open_duration: f64,
    /// Fraction of the cycle the valve is open.
    pub open_fraction: f64,
}

impl ValveTiming {
    /// Compute timing from a flow waveform. `rel_threshold` is the open
    /// cutoff relative to the peak (default caller value: 0.01).
    pub fn from_flow(series: &[(f64, f64)], rel_threshold: f64) -> Self {
        let peak = series.iter().map(|&(_, q)| q).fold(f64::MIN, f64::max);
        if series.len() < 2 || peak <= 0.0 {
            let t0 = series.first().map_or(0.0, |&(t, _)| t);
            return Self {
                peak: peak.max(0.0),
                t_peak: t0,
                open_duration: 0.0,
                open_fraction: 0.0,
            };
        }

        let threshold = rel_threshold * peak;
        let mut open_duration = 0.0;
        for pair in series.windows(2) {
            let (t0, q0) = pair[0];
            let (t1, q1) = pair[1];
            if q0 > threshold && q1 > threshold {
                open_duration += t1 - t0;
            }
        }
        let cycle = series[series.len() - 1].0 - series[0].0;
        let t_peak = series
            .iter()
            .find(|&&(_, q)| q == peak)
            .map_or(series[0].0, |&(t, _)| t);

        Self {
            peak,
            t_peak,
            open_duration,
            open_fraction: if cycle > 0.0 { open_duration / cycle } else { 0.0 },
        }
    }
}

/// Consolidated metrics over one cardiac cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleMetrics {
    /// Systolic (peak) arterial pressure [mmHg].
    pub sbp: f64,
    /// Diastolic (trough) arterial pressure [mmHg].
    pub dbp: f64,
    /// Pulse pressure [mmHg].
    pub pulse_pressure: f64,
    /// Mean arterial pressure [mmHg].
    pub map: f64,

    /// Peak ventricular pressure [mmHg].
    pub p_lv_max: f64,
    /// Trough ventricular pressure [mmHg].
    pub p_lv_min: f64,
    /// Mean ventricular pressure [mmHg].
    pub p_lv_mean: f64,

    /// Stroke volume (V_max - V_min) [mL].
    pub stroke_volume: f64,
    pub v_lv_max: f64,
    pub v_lv_min: f64,

    /// Mean peripheral flow [mL/s].
    pub q2_mean: f64,
    pub q2_max: f64,
    pub q2_min: f64,

    pub mitral: ValveTiming,
    pub aortic: ValveTiming,
}

impl CycleMetrics {
    /// Default valve-open cutoff relative to peak flow.
    pub const VALVE_THRESHOLD: f64 = 0.01;

    /// Compute all metrics from a trajectory (typically the final cycle).
    pub fn compute(trajectory: &Trajectory) -> Self {
        let p1 = trajectory.column(|s| s.state.p1);
        let p_lv = trajectory.column(|s| s.state.p_lv);
        let q2 = trajectory.column(|s| s.state.q2);
        let v_lv = trajectory.column(|s| s.aux.v_lv);
        let q_mv = trajectory.column(|s| s.aux.q_mitral);
        let q_av = trajectory.column(|s| s.aux.q_aortic);

        let (dbp, sbp) = min_max(&p1);
        let (p_lv_min, p_lv_max) = min_max(&p_lv);
        let (q2_min, q2_max) = min_max(&q2);
        let (v_lv_min, v_lv_max) = min_max(&v_lv);

        Self {
            sbp,
            dbp,
            pulse_pressure: sbp - dbp,
            map: trapezoid_mean(&p1),
            p_lv_max,
            p_lv_min,
            p_lv_mean: trapezoid_mean(&p_lv),
            stroke_volume: v_lv_max - v_lv_min,
            v_lv_max,
            v_lv_min,
            q2_mean: trapezoid_mean(&q2),
            q2_max,
            q2_min,
            mitral: ValveTiming::from_flow(&q_mv, Self::VALVE_THRESHOLD),
            aortic: ValveTiming::from_flow(&q_av, Self::VALVE_THRESHOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::healthy;
    use crate::solver::CycleSimulator;
    use crate::SimConfig;
    use approx::assert_relative_eq;

    #[test]
    fn trapezoid_mean_of_constant_is_the_constant() {
        let series: Vec<(f64, f64)> = (0..10).map(|i| (i as f64 * 0.1, 42.0)).collect();
        assert_relative_eq!(trapezoid_mean(&series), 42.0, epsilon = 1e-12);
    }

    #[test]
    fn trapezoid_mean_of_ramp_is_midpoint() {
        let series: Vec<(f64, f64)> = (0..=100).map(|i| (i as f64 * 0.01, i as f64 * 0.01)).collect();
        assert_relative_eq!(trapezoid_mean(&series), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn valve_timing_of_never_open_valve_is_zero() {
        let series: Vec<(f64, f64)> = (0..10).map(|i| (i as f64 * 0.1, -1.0)).collect();
        let vt = ValveTiming::from_flow(&series, 0.01);
        assert_eq!(vt.open_duration, 0.0);
        assert_eq!(vt.open_fraction, 0.0);
    }

    #[test]
    fn healthy_cycle_metrics_are_consistent() {
        let p = healthy();
        let out = CycleSimulator::new(p, SimConfig::default()).run(None).unwrap();
        let m = CycleMetrics::compute(&out.trajectory);

        assert!(m.sbp > m.dbp);
        assert!(m.pulse_pressure > 0.0);
        assert!(m.dbp <= m.map && m.map <= m.sbp);
        assert!(m.stroke_volume > 0.0);
        assert!(m.q2_mean > 0.0);

        // Both valves open during part of the cycle, neither all of it.
        for vt in [m.mitral, m.aortic] {
            assert!(vt.peak > 0.0);
            assert!(vt.open_fraction > 0.0 && vt.open_fraction < 1.0);
        }
        // Filling and ejection alternate rather than overlap.
        assert!(m.mitral.open_fraction + m.aortic.open_fraction < 1.2);
    }
}
