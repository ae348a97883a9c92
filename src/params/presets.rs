//! Parameter presets: the healthy baseline and pathology transforms.
//!
//! Pathology variants are produced by transforming the healthy set rather
//! than duplicating it, so the two always differ only in the intended
//! fields (compliance, resistance, label).

use super::ParameterSet;
use crate::error::{CardioError, Result};
use crate::DEFAULT_VALVE_SHARPNESS;

/// Baseline (healthy) parameter set.
///
/// Values correspond to a resting adult at about 75 bpm: a 0.8 s cycle,
/// ventricular compliance swinging between 0.4 and 15 mL/mmHg, a 2 mL/mmHg
/// arterial compliance and a total peripheral resistance of 1.1 mmHg·s/mL.
pub fn healthy() -> ParameterSet {
    ParameterSet {
        t_cc: 0.8,
        c_max: 15.0,
        c_min: 0.4,
        p_la: 8.0,
        p_ra: 3.0,
        r_mv: 1e-2,
        r_av: 0.1,
        c_art: 2.0,
        i_art: 1e-4,
        r_art: 0.1,
        r_cap: 1.0,
        v_rest: 5.0,
        k_valve: DEFAULT_VALVE_SHARPNESS,
        label: "healthy".to_string(),
    }
}

/// Arterial stiffening: scale arterial compliance down by `factor`.
///
/// Typical factors: 0.5 mild, 0.3 moderate, 0.2 severe. Targets pulsatility
/// (pulse pressure) rather than mean pressure since total resistance is
/// unchanged.
pub fn reduced_compliance(base: &ParameterSet, factor: f64) -> Result<ParameterSet> {
    if !(factor > 0.0) {
        return Err(CardioError::invalid_parameter(
            "factor",
            factor,
            "compliance scaling factor must be > 0",
        ));
    }
    Ok(ParameterSet {
        c_art: base.c_art * factor,
        label: "reduced_compliance".to_string(),
        ..base.clone()
    })
}

/// Increased afterload: scale both arterial and capillary resistance up by
/// `factor`, raising the total peripheral resistance the ventricle ejects
/// against.
pub fn increased_afterload(base: &ParameterSet, factor: f64) -> Result<ParameterSet> {
    if !(factor > 0.0) {
        return Err(CardioError::invalid_parameter(
            "factor",
            factor,
            "resistance scaling factor must be > 0",
        ));
    }
    Ok(ParameterSet {
        r_art: base.r_art * factor,
        r_cap: base.r_cap * factor,
        label: "increased_afterload".to_string(),
        ..base.clone()
    })
}

/// Full stiffening combination: compliance down, resistance up, and the
/// arterial inertance scaled as well. An `inertance_factor` above 1
/// sharpens the pressure upstroke; keep it modest (1.0 to 1.5) or the
/// arterial pair turns oscillatory.
pub fn stiffening_combo(
    base: &ParameterSet,
    compliance_factor: f64,
    resistance_factor: f64,
    inertance_factor: f64,
) -> Result<ParameterSet> {
    if !(inertance_factor > 0.0) {
        return Err(CardioError::invalid_parameter(
            "factor",
            inertance_factor,
            "inertance scaling factor must be > 0",
        ));
    }
    let stiffened = combined(base, compliance_factor, resistance_factor)?;
    Ok(ParameterSet {
        i_art: base.i_art * inertance_factor,
        label: "stiffening_combo".to_string(),
        ..stiffened
    })
}

/// Combined stiffening and afterload: compliance down, resistance up.
pub fn combined(
    base: &ParameterSet,
    compliance_factor: f64,
    resistance_factor: f64,
) -> Result<ParameterSet> {
    let stiffened = reduced_compliance(base, compliance_factor)?;
    let mut out = increased_afterload(&stiffened, resistance_factor)?;
    out.label = "combined_stiffness_afterload".to_string();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pathology_variants_validate() {
        let base = healthy();
        assert!(reduced_compliance(&base, 0.3).unwrap().validate().is_ok());
        assert!(increased_afterload(&base, 1.5).unwrap().validate().is_ok());
        assert!(combined(&base, 0.5, 1.5).unwrap().validate().is_ok());
        assert!(stiffening_combo(&base, 0.3, 2.5, 1.5)
            .unwrap()
            .validate()
            .is_ok());
    }

    #[test]
    fn stiffening_combo_scales_all_three_elements() {
        let base = healthy();
        let path = stiffening_combo(&base, 0.3, 2.5, 1.5).unwrap();
        assert_eq!(path.c_art, base.c_art * 0.3);
        assert_eq!(path.r_total(), base.r_total() * 2.5);
        assert_eq!(path.i_art, base.i_art * 1.5);
        assert_eq!(path.label, "stiffening_combo");
    }

    #[test]
    fn reduced_compliance_only_touches_compliance_and_label() {
        let base = healthy();
        let path = reduced_compliance(&base, 0.5).unwrap();
        assert_eq!(path.c_art, base.c_art * 0.5);
        assert_eq!(path.r_art, base.r_art);
        assert_eq!(path.t_cc, base.t_cc);
        assert_eq!(path.label, "reduced_compliance");
    }

    #[test]
    fn afterload_scales_both_resistances() {
        let base = healthy();
        let path = increased_afterload(&base, 2.0).unwrap();
        assert_eq!(path.r_total(), base.r_total() * 2.0);
    }

    #[test]
    fn rejects_nonpositive_factor() {
        let base = healthy();
        assert!(reduced_compliance(&base, 0.0).is_err());
        assert!(increased_afterload(&base, -1.0).is_err());
        assert!(stiffening_combo(&base, 0.5, 1.5, 0.0).is_err());
    }
}
