//! # Shear Strength of Webs (ASCE-8 3.3.2)
//!
//! ```text
//! τ/η = 4.84·E0·(t/h)²       η = Es/E0
//! τ   = min(s*, FY/√3)
//! Vn  = τ·h·t per web
//! φv  = 0.85
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::{asce8_ref, buckling};
use crate::errors::{CalcResult, ConvergenceWarning};
use crate::materials::PlasticityFactor;
use crate::member::Member;
use crate::solver::CriticalStress;

/// Resistance factor for shear
pub const PHI_SHEAR: f64 = 0.85;

/// Web shear strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearResult {
    /// Flat web depth
    pub h: f64,
    pub t: f64,
    /// Number of webs resisting shear
    pub webs: usize,
    pub critical: CriticalStress,
    /// Shear yield limit FY/√3
    pub tau_yield: f64,
    /// Governing shear stress
    pub tau: f64,
    pub vn: f64,
    pub phi: f64,
    pub phi_vn: f64,
    pub code_ref: String,
    pub warnings: Vec<ConvergenceWarning>,
}

impl ShearResult {
    pub fn passes(&self, vu: f64) -> bool {
        vu <= self.phi_vn
    }
}

/// Shear strength of the member's web(s).
pub fn calculate(member: &Member) -> CalcResult<ShearResult> {
    let web = member.profile.web()?;
    let (h, t) = (web.w, web.t);

    let ff = buckling::shear(member.steel.e0, t, h);
    let critical = member.critical_stress(ff, PlasticityFactor::Secant)?;
    let tau_yield = member.fy() / 3f64.sqrt();
    let tau = critical.clamped(member.fy()).min(tau_yield);
    let vn = tau * h * t * web.count as f64;

    let warnings = critical
        .warning
        .clone()
        .map(|w| w.with_context(format!("{}: shear buckling stress", member.profile.name)))
        .into_iter()
        .collect();

    Ok(ShearResult {
        h,
        t,
        webs: web.count,
        critical,
        tau_yield,
        tau,
        vn,
        phi: PHI_SHEAR,
        phi_vn: PHI_SHEAR * vn,
        code_ref: asce8_ref::SHEAR.to_string(),
        warnings,
    })
}
