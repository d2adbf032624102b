//! # Combined Actions
//!
//! Interaction checks that take design strengths from the single-action
//! checks and the factored demands:
//!
//! - Bending and shear (ASCE-8 3.3.3)
//! - Bending and web crippling (ASCE-8 3.3.5)
//! - Axial compression and bending (ASCE-8 3.5)
//!
//! Each returns the interaction value, its limit and `ratio = value/limit`.

use serde::{Deserialize, Serialize};

use crate::equations::asce8_ref;
use crate::errors::{CalcError, CalcResult};
use crate::member::WebReinforcement;

/// Axial load ratio at or below which the simplified axial-bending sum applies
pub const SMALL_AXIAL_RATIO: f64 = 0.15;

/// Result of an interaction equation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResult {
    /// Equation label
    pub equation: String,
    /// Left-hand side
    pub value: f64,
    /// Right-hand side
    pub limit: f64,
    /// value / limit
    pub ratio: f64,
    pub code_ref: String,
}

impl InteractionResult {
    fn new(equation: impl Into<String>, value: f64, limit: f64, code_ref: &str) -> Self {
        InteractionResult {
            equation: equation.into(),
            value,
            limit,
            ratio: value / limit,
            code_ref: code_ref.to_string(),
        }
    }

    pub fn passes(&self) -> bool {
        self.value <= self.limit
    }
}

fn check_demand(field: &str, value: f64) -> CalcResult<()> {
    if !(value >= 0.0) || !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Demand must be non-negative"));
    }
    Ok(())
}

fn check_capacity(field: &str, value: f64) -> CalcResult<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Design strength must be positive"));
    }
    Ok(())
}

// =============================================================================
// BENDING AND SHEAR
// =============================================================================

/// Combined bending and shear (ASCE-8 3.3.3)
///
/// # Formula
/// ```text
/// unreinforced webs:          (Mu/φMn)² + (Vu/φVn)² ≤ 1.0
/// transverse web stiffeners:  0.6·Mu/φMn + Vu/φVn ≤ 1.3
/// ```
///
/// `phi_mn` is the nominal section strength excluding lateral buckling.
pub fn bending_shear(mu: f64, vu: f64, phi_mn: f64, phi_vn: f64, web: WebReinforcement) -> CalcResult<InteractionResult> {
    check_demand("Mu", mu)?;
    check_demand("Vu", vu)?;
    check_capacity("phi_Mn", phi_mn)?;
    check_capacity("phi_Vn", phi_vn)?;

    let (m, v) = (mu / phi_mn, vu / phi_vn);
    Ok(match web {
        WebReinforcement::TransverseStiffeners => {
            InteractionResult::new("0.6·M/φMn + V/φVn", 0.6 * m + v, 1.3, asce8_ref::BENDING_SHEAR)
        }
        WebReinforcement::None | WebReinforcement::BearingStiffeners => {
            InteractionResult::new("(M/φMn)² + (V/φVn)²", m * m + v * v, 1.0, asce8_ref::BENDING_SHEAR)
        }
    })
}

// =============================================================================
// BENDING AND WEB CRIPPLING
// =============================================================================

/// Combined bending and web crippling (ASCE-8 3.3.5)
///
/// # Formula
/// ```text
/// single web: 1.07·Pu/φPn + Mu/φMn ≤ 1.42
/// I-section:  0.82·Pu/φPn + Mu/φMn ≤ 1.32
/// ```
pub fn bending_crippling(pu: f64, mu: f64, phi_pn: f64, phi_mn: f64, i_section: bool) -> CalcResult<InteractionResult> {
    check_demand("Pu", pu)?;
    check_demand("Mu", mu)?;
    check_capacity("phi_Pn", phi_pn)?;
    check_capacity("phi_Mn", phi_mn)?;

    let (p, m) = (pu / phi_pn, mu / phi_mn);
    Ok(if i_section {
        InteractionResult::new("0.82·P/φPn + M/φMn", 0.82 * p + m, 1.32, asce8_ref::BENDING_CRIPPLING)
    } else {
        InteractionResult::new("1.07·P/φPn + M/φMn", 1.07 * p + m, 1.42, asce8_ref::BENDING_CRIPPLING)
    })
}

// =============================================================================
// AXIAL COMPRESSION AND BENDING
// =============================================================================

/// Factored demands for the axial-bending check
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxialBendingDemand {
    pub pu: f64,
    pub mux: f64,
    pub muy: f64,
}

/// Design strengths and amplification inputs for the axial-bending check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxialBendingCapacity {
    /// φc·Pn, member buckling
    pub phi_pn: f64,
    /// φc·Pno, Pn with Fn = FY
    pub phi_pno: f64,
    /// φb·Mnx
    pub phi_mnx: f64,
    /// φb·Mny, when weak-axis bending has been checked
    pub phi_mny: Option<f64>,
    /// Resistance factor applied inside αn
    pub phi_c: f64,
    /// Elastic buckling loads PEx, PEy
    pub pex: f64,
    pub pey: f64,
    pub cm_x: f64,
    pub cm_y: f64,
}

/// Axial-bending check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxialBendingResult {
    /// Pu/φcPn
    pub axial_ratio: f64,
    /// αnx = 1 − Pu/(φc·PEx)
    pub alpha_nx: f64,
    pub alpha_ny: f64,
    /// Eq. 3.5-1 (or the simplified sum for small axial load)
    pub stability: InteractionResult,
    /// Eq. 3.5-2, absent when the simplified sum applies
    pub strength: Option<InteractionResult>,
}

impl AxialBendingResult {
    /// Governing interaction
    pub fn governing(&self) -> &InteractionResult {
        match &self.strength {
            Some(s) if s.ratio > self.stability.ratio => s,
            _ => &self.stability,
        }
    }

    pub fn passes(&self) -> bool {
        self.governing().passes()
    }
}

/// Combined axial compression and bending (ASCE-8 3.5)
///
/// # Formula
/// ```text
/// Pu/φcPn ≤ 0.15:   Pu/φcPn + Mux/φbMnx + Muy/φbMny ≤ 1.0
/// otherwise:
///   3.5-1  Pu/φcPn + Cmx·Mux/(φbMnx·αnx) + Cmy·Muy/(φbMny·αny) ≤ 1.0
///   3.5-2  Pu/φcPno + Mux/φbMnx + Muy/φbMny ≤ 1.0
/// αn = 1 − Pu/(φc·PE)
/// ```
///
/// # Errors
/// * `NotSupported` - Weak-axis moment without a weak-axis strength
/// * `InvalidInput` - Axial load at or above φc·PE
pub fn axial_bending(demand: &AxialBendingDemand, capacity: &AxialBendingCapacity) -> CalcResult<AxialBendingResult> {
    check_demand("Pu", demand.pu)?;
    check_demand("Mux", demand.mux)?;
    check_demand("Muy", demand.muy)?;
    check_capacity("phi_Pn", capacity.phi_pn)?;
    check_capacity("phi_Pno", capacity.phi_pno)?;
    check_capacity("phi_Mnx", capacity.phi_mnx)?;

    let muy_term = |mu: f64, factor: f64| -> CalcResult<f64> {
        if mu == 0.0 {
            return Ok(0.0);
        }
        match capacity.phi_mny {
            Some(phi_mny) => {
                check_capacity("phi_Mny", phi_mny)?;
                Ok(factor * mu / phi_mny)
            }
            None => Err(CalcError::not_supported(
                asce8_ref::AXIAL_BENDING,
                "Weak-axis moment given but no weak-axis flexural strength is available",
            )),
        }
    };

    let axial_ratio = demand.pu / capacity.phi_pn;
    let alpha = |pe: f64| 1.0 - demand.pu / (capacity.phi_c * pe);
    let (alpha_nx, alpha_ny) = (alpha(capacity.pex), alpha(capacity.pey));

    if axial_ratio <= SMALL_AXIAL_RATIO {
        let value = axial_ratio + demand.mux / capacity.phi_mnx + muy_term(demand.muy, 1.0)?;
        return Ok(AxialBendingResult {
            axial_ratio,
            alpha_nx,
            alpha_ny,
            stability: InteractionResult::new("P/φcPn + Mx/φbMnx + My/φbMny", value, 1.0, asce8_ref::AXIAL_BENDING),
            strength: None,
        });
    }

    for (field, a) in [("alpha_nx", alpha_nx), ("alpha_ny", alpha_ny)] {
        if !(a > 0.0) {
            return Err(CalcError::invalid_input(
                field,
                format!("{:.4}", a),
                "Axial load reaches the elastic buckling load φc·PE",
            ));
        }
    }

    let stability = axial_ratio
        + capacity.cm_x * demand.mux / (capacity.phi_mnx * alpha_nx)
        + muy_term(demand.muy, capacity.cm_y / alpha_ny)?;
    let strength =
        demand.pu / capacity.phi_pno + demand.mux / capacity.phi_mnx + muy_term(demand.muy, 1.0)?;

    Ok(AxialBendingResult {
        axial_ratio,
        alpha_nx,
        alpha_ny,
        stability: InteractionResult::new("Eq. 3.5-1", stability, 1.0, asce8_ref::AXIAL_BENDING),
        strength: Some(InteractionResult::new("Eq. 3.5-2", strength, 1.0, asce8_ref::AXIAL_BENDING)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn capacity() -> AxialBendingCapacity {
        AxialBendingCapacity {
            phi_pn: 10.0,
            phi_pno: 15.0,
            phi_mnx: 40.0,
            phi_mny: None,
            phi_c: 0.85,
            pex: 100.0,
            pey: 30.0,
            cm_x: 0.85,
            cm_y: 0.85,
        }
    }

    #[test]
    fn test_bending_shear_quadratic() {
        let r = bending_shear(30.0, 3.0, 40.0, 5.0, WebReinforcement::None).unwrap();
        assert_relative_eq!(r.value, 0.75f64.powi(2) + 0.6f64.powi(2));
        assert_eq!(r.limit, 1.0);
        assert!(r.passes());
    }

    #[test]
    fn test_bending_shear_stiffened_web() {
        let r = bending_shear(40.0, 5.0, 40.0, 5.0, WebReinforcement::TransverseStiffeners).unwrap();
        assert_relative_eq!(r.value, 1.6);
        assert_relative_eq!(r.ratio, 1.6 / 1.3);
        assert!(!r.passes());
    }

    #[test]
    fn test_bending_crippling_forms() {
        let single = bending_crippling(1.0, 20.0, 2.0, 40.0, false).unwrap();
        assert_relative_eq!(single.value, 1.07 * 0.5 + 0.5);
        assert_eq!(single.limit, 1.42);
        let i = bending_crippling(1.0, 20.0, 2.0, 40.0, true).unwrap();
        assert_relative_eq!(i.value, 0.82 * 0.5 + 0.5);
        assert_eq!(i.limit, 1.32);
    }

    #[test]
    fn test_rejects_negative_demand_and_zero_capacity() {
        assert!(bending_shear(-1.0, 0.0, 1.0, 1.0, WebReinforcement::None).is_err());
        assert!(bending_crippling(1.0, 1.0, 0.0, 1.0, false).is_err());
    }

    #[test]
    fn test_axial_bending_small_axial_load() {
        let demand = AxialBendingDemand {
            pu: 1.0,
            mux: 20.0,
            muy: 0.0,
        };
        let r = axial_bending(&demand, &capacity()).unwrap();
        assert!(r.strength.is_none());
        assert_relative_eq!(r.stability.value, 0.1 + 0.5);
        assert!(r.passes());
    }

    #[test]
    fn test_axial_bending_full_equations() {
        let demand = AxialBendingDemand {
            pu: 5.0,
            mux: 10.0,
            muy: 0.0,
        };
        let r = axial_bending(&demand, &capacity()).unwrap();
        let alpha_nx = 1.0 - 5.0 / 85.0;
        assert_relative_eq!(r.alpha_nx, alpha_nx);
        assert_relative_eq!(r.stability.value, 0.5 + 0.85 * 10.0 / (40.0 * alpha_nx));
        let strength = r.strength.clone().unwrap();
        assert_relative_eq!(strength.value, 5.0 / 15.0 + 0.25);
        assert_eq!(r.governing().equation, "Eq. 3.5-1");
    }

    #[test]
    fn test_weak_axis_moment_needs_strength() {
        let demand = AxialBendingDemand {
            pu: 5.0,
            mux: 10.0,
            muy: 1.0,
        };
        let err = axial_bending(&demand, &capacity()).unwrap_err();
        assert_eq!(err.error_code(), "NOT_SUPPORTED");

        let with_y = AxialBendingCapacity {
            phi_mny: Some(8.0),
            ..capacity()
        };
        let r = axial_bending(&demand, &with_y).unwrap();
        assert!(r.stability.value > 0.5 + 0.85 * 10.0 / 40.0);
    }

    #[test]
    fn test_axial_load_above_euler_rejected() {
        let demand = AxialBendingDemand {
            pu: 9.0,
            mux: 1.0,
            muy: 0.0,
        };
        let low_pe = AxialBendingCapacity {
            pey: 10.0,
            ..capacity()
        };
        assert_eq!(axial_bending(&demand, &low_pe).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
