//! # Tension Members (ASCE-8 3.2)
//!
//! ```text
//! Tn = An·FY
//! φt = 0.85
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::asce8_ref;
use crate::errors::{CalcError, CalcResult};
use crate::member::Member;

/// Resistance factor for tension
pub const PHI_TENSION: f64 = 0.85;

/// Tension strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionResult {
    /// Net area
    pub an: f64,
    pub fy: f64,
    /// Nominal strength Tn
    pub tn: f64,
    pub phi: f64,
    /// Design strength φt·Tn
    pub phi_tn: f64,
    pub code_ref: String,
}

/// Tension strength of `member`.
///
/// # Arguments
/// * `net_area` - Net area at holes, gross area when `None`
pub fn calculate(member: &Member, net_area: Option<f64>) -> CalcResult<TensionResult> {
    let gross = member.profile.properties().area;
    let an = net_area.unwrap_or(gross);
    if !(an > 0.0) || an > gross {
        return Err(CalcError::invalid_input(
            "net_area",
            an.to_string(),
            format!("Net area must be positive and not exceed the gross area {:.4}", gross),
        ));
    }

    let tn = an * member.fy();
    Ok(TensionResult {
        an,
        fy: member.fy(),
        tn,
        phi: PHI_TENSION,
        phi_tn: PHI_TENSION * tn,
        code_ref: asce8_ref::TENSION.to_string(),
    })
}
