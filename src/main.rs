//! Cardio - systemic circulation simulator
//!
//! Runs the healthy baseline and a pathological variant to a steady cycle,
//! then prints waveform metrics and the linear diagnostics of the arterial
//! subsystem. All output is plain numbers; plotting and export live
//! elsewhere.

use clap::Parser;

use cardio_core::analysis::{AnalysisResult, CycleMetrics, LinearModel, OperatingPoint};
use cardio_core::error::Result;
use cardio_core::params::{self, ParameterSet};
use cardio_core::solver::{run_pair, SimulationOutcome};
use cardio_core::SimConfig;

/// Lumped-parameter hemodynamics simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Arterial compliance scaling for the pathology run (< 1 stiffens)
    #[arg(long, default_value_t = 0.5)]
    compliance_factor: f64,

    /// Peripheral resistance scaling for the pathology run (> 1 loads)
    #[arg(long, default_value_t = 1.5)]
    resistance_factor: f64,

    /// Maximum cardiac cycles before reporting non-convergence
    #[arg(long, default_value_t = cardio_core::params::DEFAULT_MAX_CYCLES)]
    max_cycles: usize,

    /// Integration steps per cycle
    #[arg(long, default_value_t = cardio_core::params::DEFAULT_STEPS_PER_CYCLE)]
    steps_per_cycle: usize,

    /// Cycle-to-cycle convergence tolerance
    #[arg(long, default_value_t = cardio_core::params::DEFAULT_CONVERGENCE_TOL)]
    tolerance: f64,
}

fn report(label: &str, params: &ParameterSet, outcome: &SimulationOutcome) -> Result<()> {
    println!("== {label} ({}) ==", params.label);
    println!("convergence: {:?}", outcome.status);

    let metrics = CycleMetrics::compute(&outcome.trajectory);
    println!(
        "pressure [mmHg]: SBP {:.1}  DBP {:.1}  PP {:.1}  MAP {:.1}",
        metrics.sbp, metrics.dbp, metrics.pulse_pressure, metrics.map
    );
    println!(
        "volume [mL]: SV {:.1}  ({:.1} .. {:.1})",
        metrics.stroke_volume, metrics.v_lv_min, metrics.v_lv_max
    );
    println!(
        "flow [mL/s]: q2 mean {:.1}  aortic open fraction {:.2}",
        metrics.q2_mean, metrics.aortic.open_fraction
    );

    let op = OperatingPoint::from_trajectory(&outcome.trajectory, params)?;
    let model = LinearModel::build(&op, params)?;
    let analysis = AnalysisResult::compute(&model, params)?;

    println!(
        "poles [1/s]: {:.3} {:+.3}i, {:.3} {:+.3}i  zero {:.3}",
        analysis.poles[0].re,
        analysis.poles[0].im,
        analysis.poles[1].re,
        analysis.poles[1].im,
        analysis.zero
    );
    println!(
        "wn {:.1} rad/s  zeta {:.3}  observability rank {}/{} (cond {:.2e})",
        analysis.natural_frequency,
        analysis.damping_ratio,
        analysis.observability.rank,
        analysis.observability.state_dim,
        analysis.observability.condition
    );
    println!("identifiability (elasticity per parameter):");
    for (pole, gain) in analysis
        .identifiability
        .pole_sensitivity
        .iter()
        .zip(&analysis.identifiability.gain_sensitivity)
    {
        println!(
            "  {:<6} pole {:.3e}  gain {:.3e}",
            pole.name, pole.sensitivity, gain.sensitivity
        );
    }
    let rt = analysis.identifiability.roundtrip;
    println!(
        "roundtrip rel. errors: C {:.1e}  I {:.1e}  R {:.1e}",
        rt.rel_err_c, rt.rel_err_i, rt.rel_err_r
    );
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = SimConfig {
        max_cycles: args.max_cycles,
        steps_per_cycle: args.steps_per_cycle,
        convergence_tol: args.tolerance,
    };

    let healthy = params::healthy();
    let pathology = params::combined(&healthy, args.compliance_factor, args.resistance_factor)?;

    let (base, path) = run_pair(&healthy, &pathology, &config)?;

    report("baseline", &healthy, &base)?;
    report("pathology", &pathology, &path)?;

    Ok(())
}
