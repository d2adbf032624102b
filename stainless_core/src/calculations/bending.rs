//! # Flexural Strength (ASCE-8 3.3.1)
//!
//! Two strengths are checked for strong-axis bending and the smaller governs.
//!
//! ## Nominal Section Strength (3.3.1.1)
//!
//! ```text
//! Mn = Se·FY        Se at compression fibre stress FY
//! φb = 0.90 stiffened or edge-stiffened compression flange
//! φb = 0.85 unstiffened compression flange
//! ```
//!
//! ## Lateral Buckling Strength (3.3.1.2)
//!
//! The elastic critical moment per unit η is turned into a stress at the
//! gross extreme fibre, `FF = (Mc/η)/Sf`, solved for plasticity, and the
//! effective section is recomputed at that stress:
//!
//! ```text
//! Fc = min(s*, FY)      s* = FF·η(s*), η = Et/E0
//! Mn = Sc·Fc            Sc = Se at Fc
//! φb = 0.85
//! ```
//!
//! | Section                | Mc/η                          |
//! |------------------------|-------------------------------|
//! | Built-up I             | π²·E0·Cb·d·Iyc/L²              |
//! | Channel, symmetry axis | Cb·r0·A·√(σey·σt)             |
//!
//! Channels bent about the axis perpendicular to their symmetry axis are
//! not covered and return `NotSupported`.

use serde::{Deserialize, Serialize};

use crate::effective_section::EffectiveSection;
use crate::equations::{asce8_ref, buckling};
use crate::errors::{CalcError, CalcResult, ConvergenceWarning};
use crate::materials::PlasticityFactor;
use crate::member::Member;
use crate::solver::CriticalStress;

/// Resistance factor, nominal strength with a stiffened compression flange
pub const PHI_STIFFENED_FLANGE: f64 = 0.90;

/// Resistance factor, nominal strength with an unstiffened compression flange
pub const PHI_UNSTIFFENED_FLANGE: f64 = 0.85;

/// Resistance factor, lateral buckling strength
pub const PHI_LATERAL: f64 = 0.85;

/// Bending axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BendingAxis {
    /// Strong axis, the symmetry axis of a channel
    #[default]
    X,
    /// Weak axis, perpendicular to the symmetry axis of a channel
    Y,
}

/// Nominal section strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalBending {
    pub fy: f64,
    pub section: EffectiveSection,
    /// Se at FY
    pub se: f64,
    pub mn: f64,
    pub phi: f64,
    pub phi_mn: f64,
    pub code_ref: String,
}

/// Lateral buckling strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LateralBending {
    /// Elastic critical moment per unit η
    pub mc_eta: f64,
    /// Gross section modulus of the extreme compression fibre
    pub sf: f64,
    pub critical: CriticalStress,
    /// Fc = min(s*, FY)
    pub fc: f64,
    pub section: EffectiveSection,
    /// Sc = Se at Fc
    pub sc: f64,
    pub mn: f64,
    pub phi: f64,
    pub phi_mn: f64,
    pub code_ref: String,
}

/// Governing flexural strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendingResult {
    pub nominal: NominalBending,
    pub lateral: LateralBending,
    /// min(φMn nominal, φMn lateral)
    pub phi_mn: f64,
    /// Whether lateral buckling governs
    pub lateral_governs: bool,
    pub warnings: Vec<ConvergenceWarning>,
}

impl BendingResult {
    /// Design moment check
    pub fn passes(&self, mu: f64) -> bool {
        mu <= self.phi_mn
    }

    /// Code reference of the governing strength
    pub fn code_ref(&self) -> &str {
        if self.lateral_governs {
            &self.lateral.code_ref
        } else {
            &self.nominal.code_ref
        }
    }
}

/// Nominal section strength about the strong axis.
///
/// # Example
///
/// ```rust
/// use stainless_core::calculations::bending;
/// use stainless_core::materials::catalog;
/// use stainless_core::member::{DesignParameters, Member};
/// use stainless_core::section::{Profile, ProfileShape};
/// use stainless_core::units::UnitSystem;
///
/// let shape = ProfileShape::LippedChannel { h: 6.0, b: 1.625, d: 0.45, t: 0.06, r_out: 0.15375 };
/// let member = Member::new(
///     Profile::new("C6", shape)?,
///     catalog::lookup("SA301_1_4Hard")?,
///     DesignParameters::default(),
///     48.0,
///     UnitSystem::Imperial,
/// )?;
/// let r = bending::nominal_strength(&member)?;
/// assert_eq!(r.phi, 0.90);
/// assert!(r.mn < member.profile.properties().sx * 50.0);
/// # Ok::<(), stainless_core::errors::CalcError>(())
/// ```
pub fn nominal_strength(member: &Member) -> CalcResult<NominalBending> {
    let fy = member.fy();
    let section = member.effective_section(fy)?;
    let phi = if member.profile.has_stiffened_flange() {
        PHI_STIFFENED_FLANGE
    } else {
        PHI_UNSTIFFENED_FLANGE
    };
    let mn = section.se * fy;
    Ok(NominalBending {
        fy,
        se: section.se,
        section,
        mn,
        phi,
        phi_mn: phi * mn,
        code_ref: asce8_ref::BENDING_NOMINAL.to_string(),
    })
}

/// Elastic critical lateral buckling moment per unit η
pub fn lateral_moment_per_eta(member: &Member, axis: BendingAxis) -> CalcResult<f64> {
    let props = member.profile.properties();
    let p = &member.params;

    if axis == BendingAxis::Y {
        return Err(CalcError::not_supported(
            asce8_ref::BENDING_LATERAL_PERPENDICULAR,
            "Lateral buckling about the axis perpendicular to the symmetry axis",
        ));
    }

    if member.profile.is_built_up() {
        let iyc = props.iy / 2.0;
        Ok(buckling::lateral_moment_i(member.steel.e0, p.cb, member.profile.shape.h(), iyc, p.ly))
    } else {
        let e0 = member.steel.e0;
        let r0 = buckling::polar_radius_of_gyration(props.rx, props.ry, props.x0);
        let sigma_ey = buckling::flexural(e0, p.ky * p.ly, props.ry);
        let sigma_t = buckling::torsional(props.area, r0, member.steel.g0(), props.j, e0, props.cw, p.kz * p.lz);
        Ok(buckling::lateral_moment_singly_symmetric(p.cb, r0, props.area, sigma_ey, sigma_t))
    }
}

/// Lateral buckling strength about `axis`.
///
/// # Errors
/// `NotSupported` for bending about the weak axis.
pub fn lateral_strength(member: &Member, axis: BendingAxis) -> CalcResult<LateralBending> {
    let mc_eta = lateral_moment_per_eta(member, axis)?;
    let sf = member.profile.properties().sx;
    let critical = member.critical_stress(mc_eta / sf, PlasticityFactor::Tangent)?;
    let fc = critical.clamped(member.fy());
    let section = member.effective_section(fc)?;
    let mn = section.se * fc;

    log::debug!(
        "lateral buckling of {}: Mc/η = {:.4}, Fc = {:.4}, Sc = {:.5}",
        member.profile.name,
        mc_eta,
        fc,
        section.se
    );

    Ok(LateralBending {
        mc_eta,
        sf,
        critical,
        fc,
        sc: section.se,
        section,
        mn,
        phi: PHI_LATERAL,
        phi_mn: PHI_LATERAL * mn,
        code_ref: asce8_ref::BENDING_LATERAL.to_string(),
    })
}

/// Governing strong-axis flexural strength.
pub fn calculate(member: &Member) -> CalcResult<BendingResult> {
    let nominal = nominal_strength(member)?;
    let lateral = lateral_strength(member, BendingAxis::X)?;

    let lateral_governs = lateral.phi_mn < nominal.phi_mn;
    let phi_mn = nominal.phi_mn.min(lateral.phi_mn);

    let warnings = [
        (nominal.section.warning.clone(), "Se @ FY"),
        (lateral.critical.warning.clone(), "lateral buckling stress"),
        (lateral.section.warning.clone(), "Sc @ Fc"),
    ]
    .into_iter()
    .filter_map(|(w, label)| w.map(|w| w.with_context(format!("{}: {}", member.profile.name, label))))
    .collect();

    Ok(BendingResult {
        nominal,
        lateral,
        phi_mn,
        lateral_governs,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::tests::lipped_c6;
    use crate::member::DesignParameters;
    use crate::section::{Profile, ProfileShape};
    use crate::units::UnitSystem;
    use approx::assert_relative_eq;

    #[test]
    fn test_nominal_uses_se_at_yield() {
        let member = lipped_c6(48.0, DesignParameters::default());
        let r = nominal_strength(&member).unwrap();
        assert_relative_eq!(r.mn, r.se * 50.0);
        assert_relative_eq!(r.se, 0.98599, epsilon = 1e-3);
        assert_eq!(r.phi, PHI_STIFFENED_FLANGE);
    }

    #[test]
    fn test_unstiffened_flange_factor() {
        let mut member = lipped_c6(48.0, DesignParameters::default());
        member.profile =
            Profile::new("C6 plain", ProfileShape::Channel { h: 6.0, b: 1.625, t: 0.06, r_out: 0.15375 }).unwrap();
        let r = nominal_strength(&member).unwrap();
        assert_eq!(r.phi, PHI_UNSTIFFENED_FLANGE);
    }

    #[test]
    fn test_short_span_nominal_governs() {
        let member = lipped_c6(12.0, DesignParameters::default());
        let r = calculate(&member).unwrap();
        assert!(!r.lateral_governs);
        assert_eq!(r.code_ref(), asce8_ref::BENDING_NOMINAL);
        assert_relative_eq!(r.phi_mn, r.nominal.phi_mn);
        assert_eq!(r.lateral.fc, 50.0);
    }

    #[test]
    fn test_long_span_lateral_governs() {
        let member = lipped_c6(240.0, DesignParameters::default());
        let r = calculate(&member).unwrap();
        assert!(r.lateral_governs);
        assert_eq!(r.code_ref(), asce8_ref::BENDING_LATERAL);
        assert!(r.lateral.fc < 50.0);
        assert!(r.lateral.sc >= r.nominal.se);
        assert_relative_eq!(r.lateral.mn, r.lateral.sc * r.lateral.fc);
    }

    #[test]
    fn test_lateral_strength_decreases_with_length() {
        let mut prev = f64::INFINITY;
        for l in [24.0, 48.0, 96.0, 192.0, 384.0] {
            let r = lateral_strength(&lipped_c6(l, DesignParameters::default()), BendingAxis::X).unwrap();
            assert!(r.mn <= prev + 1e-9);
            prev = r.mn;
        }
    }

    #[test]
    fn test_built_up_i_lateral_moment() {
        let steel = crate::materials::Steel::new("SA301", 50.0, 27000.0, 0.3, 4.58, 0.002).unwrap();
        let shape = ProfileShape::LippedBuiltUpI { h: 6.0, b: 1.625, d: 0.45, t: 0.06, r_out: 0.15375 };
        let params = DesignParameters {
            cb: 1.75,
            ..DesignParameters::default()
        };
        let member = Member::new(Profile::new("I6", shape).unwrap(), steel, params, 48.0, UnitSystem::Imperial).unwrap();
        let mc = lateral_moment_per_eta(&member, BendingAxis::X).unwrap();
        let iyc = member.profile.properties().iy / 2.0;
        assert_relative_eq!(mc, buckling::lateral_moment_i(27000.0, 1.75, 6.0, iyc, 48.0), max_relative = 1e-12);
    }

    #[test]
    fn test_weak_axis_lateral_not_supported() {
        let member = lipped_c6(48.0, DesignParameters::default());
        let err = lateral_strength(&member, BendingAxis::Y).unwrap_err();
        assert_eq!(err.error_code(), "NOT_SUPPORTED");
    }
}
