//! # Dimensional Limits (ASCE-8 2.1)
//!
//! ## Flat-width ratios (2.1.1)
//!
//! | Compression element                                  | max w/t |
//! |------------------------------------------------------|---------|
//! | Flange stiffened by a simple lip on the free edge    | 50      |
//! | Flange stiffened by any other kind of stiffener      | 90      |
//! | Flange stiffened along both edges                    | 400     |
//! | Unstiffened flange                                   | 50      |
//!
//! ## Web depth ratios (2.1.2)
//!
//! | Web                                                  | max h/t |
//! |------------------------------------------------------|---------|
//! | Unreinforced                                         | 200     |
//! | Bearing stiffeners only                              | 260     |
//! | Bearing and intermediate stiffeners                  | 300     |
//!
//! ## Shear lag (2.1.1(2))
//!
//! Short, wide flanges of beams carrying concentrated loads are limited to
//! `factor·wf`, with the factor interpolated on L/wf from Table 1.
//!
//! Exceeding a limit is reported, not treated as an error.

use serde::{Deserialize, Serialize};

use crate::equations::asce8_ref;
use crate::errors::{CalcError, CalcResult};
use crate::member::{Member, WebReinforcement};
use crate::section::{ElementClass, ElementName};

/// ASCE-8 Table 1: (L/wf, effective width ratio), descending L/wf
const SHEAR_LAG_TABLE: [(f64, f64); 10] = [
    (30.0, 1.00),
    (25.0, 0.96),
    (20.0, 0.91),
    (18.0, 0.89),
    (16.0, 0.86),
    (14.0, 0.82),
    (12.0, 0.78),
    (10.0, 0.73),
    (8.0, 0.67),
    (6.0, 0.55),
];

/// One ratio against its limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioCheck {
    pub element: ElementName,
    pub ratio: f64,
    pub limit: f64,
    pub code_ref: String,
}

impl RatioCheck {
    pub fn passes(&self) -> bool {
        self.ratio <= self.limit
    }
}

/// Shear lag reduction of one flange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearLag {
    /// Flange projection beyond the web
    pub wf: f64,
    /// L/wf
    pub l_wf: f64,
    /// Effective width over actual width
    pub factor: f64,
    pub effective_width: f64,
}

/// Dimensional limit report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionalLimits {
    pub checks: Vec<RatioCheck>,
    /// Absent when L/wf is below the table range
    pub shear_lag: Option<ShearLag>,
    pub notes: Vec<String>,
}

impl DimensionalLimits {
    pub fn passes(&self) -> bool {
        self.checks.iter().all(RatioCheck::passes)
    }
}

/// Shear lag effective width factor (ASCE-8 Table 1)
///
/// # Example
/// ```rust
/// use stainless_core::calculations::dimensional_limits::shear_lag_factor;
///
/// assert!((shear_lag_factor(170.0, 10.0)? - 0.875).abs() < 1e-12);
/// assert_eq!(shear_lag_factor(400.0, 10.0)?, 1.0);
/// # Ok::<(), stainless_core::errors::CalcError>(())
/// ```
pub fn shear_lag_factor(l: f64, wf: f64) -> CalcResult<f64> {
    if !(l > 0.0) || !(wf > 0.0) {
        return Err(CalcError::invalid_input("L/wf", format!("{}/{}", l, wf), "Span and flange width must be positive"));
    }
    let ratio = l / wf;
    let (last_ratio, _) = SHEAR_LAG_TABLE[SHEAR_LAG_TABLE.len() - 1];
    if ratio < last_ratio {
        return Err(CalcError::invalid_input(
            "L/wf",
            format!("{:.2}", ratio),
            "Below the range of the shear lag table (6)",
        ));
    }
    if ratio >= SHEAR_LAG_TABLE[0].0 {
        return Ok(1.0);
    }
    for pair in SHEAR_LAG_TABLE.windows(2) {
        let ((r_hi, f_hi), (r_lo, f_lo)) = (pair[0], pair[1]);
        if ratio >= r_lo {
            return Ok(f_lo + (f_hi - f_lo) * (ratio - r_lo) / (r_hi - r_lo));
        }
    }
    Ok(SHEAR_LAG_TABLE[SHEAR_LAG_TABLE.len() - 1].1)
}

fn flange_limit(class: ElementClass, simple_lip: bool) -> f64 {
    match class {
        ElementClass::Stiffened => 400.0,
        ElementClass::EdgeStiffened if simple_lip => 50.0,
        ElementClass::EdgeStiffened => 90.0,
        ElementClass::Unstiffened => 50.0,
    }
}

fn web_limit(reinforcement: WebReinforcement) -> f64 {
    match reinforcement {
        WebReinforcement::None => 200.0,
        WebReinforcement::BearingStiffeners => 260.0,
        WebReinforcement::TransverseStiffeners => 300.0,
    }
}

/// Check the member's elements against the ASCE-8 2.1 limits.
pub fn calculate(member: &Member) -> CalcResult<DimensionalLimits> {
    let profile = &member.profile;
    let simple_lip = profile.element(ElementName::Lip).is_some();
    let mut checks = Vec::new();

    for element in profile.elements() {
        match element.name {
            ElementName::Flange => checks.push(RatioCheck {
                element: element.name,
                ratio: element.slenderness(),
                limit: flange_limit(element.class, simple_lip),
                code_ref: asce8_ref::WIDTH_LIMITS.to_string(),
            }),
            ElementName::Web => checks.push(RatioCheck {
                element: element.name,
                ratio: element.slenderness(),
                limit: web_limit(member.params.web_reinforcement),
                code_ref: asce8_ref::WEB_LIMITS.to_string(),
            }),
            ElementName::Lip => {}
        }
    }

    let mut notes = Vec::new();
    for c in checks.iter().filter(|c| !c.passes()) {
        let note = format!("{:?} ratio {:.1} exceeds {:.0} ({})", c.element, c.ratio, c.limit, c.code_ref);
        log::warn!("{}: {}", profile.name, note);
        notes.push(note);
    }

    let shape = &profile.shape;
    let wf = shape.b() - shape.t() / 2.0;
    let shear_lag = match shear_lag_factor(member.length, wf) {
        Ok(factor) => Some(ShearLag {
            wf,
            l_wf: member.length / wf,
            factor,
            effective_width: factor * wf,
        }),
        Err(_) => {
            notes.push(format!(
                "L/wf = {:.2} is below the shear lag table ({})",
                member.length / wf,
                asce8_ref::SHEAR_LAG
            ));
            None
        }
    };

    Ok(DimensionalLimits {
        checks,
        shear_lag,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::tests::lipped_c6;
    use crate::member::DesignParameters;
    use approx::assert_relative_eq;

    #[test]
    fn test_shear_lag_interpolation() {
        assert_relative_eq!(shear_lag_factor(170.0, 10.0).unwrap(), 0.875, epsilon = 1e-12);
        assert_relative_eq!(shear_lag_factor(60.0, 10.0).unwrap(), 0.55);
        assert_relative_eq!(shear_lag_factor(250.0, 10.0).unwrap(), 0.96);
        assert!(shear_lag_factor(50.0, 10.0).is_err());
    }

    #[test]
    fn test_shear_lag_non_decreasing() {
        let mut prev = 0.0;
        for i in 60..=400 {
            let f = shear_lag_factor(i as f64, 10.0).unwrap();
            assert!(f >= prev);
            prev = f;
        }
    }

    #[test]
    fn test_c6_within_limits() {
        let r = calculate(&lipped_c6(48.0, DesignParameters::default())).unwrap();
        assert!(r.passes());
        assert_eq!(r.checks.len(), 2);
        let web = r.checks.iter().find(|c| c.element == ElementName::Web).unwrap();
        assert_eq!(web.limit, 200.0);
        let flange = r.checks.iter().find(|c| c.element == ElementName::Flange).unwrap();
        assert_eq!(flange.limit, 50.0);
        assert!(r.shear_lag.is_some());
    }

    #[test]
    fn test_slender_web_reported() {
        let mut member = lipped_c6(48.0, DesignParameters::default());
        member.profile = crate::section::Profile::new(
            "C15",
            crate::section::ProfileShape::LippedChannel { h: 15.0, b: 1.625, d: 0.45, t: 0.06, r_out: 0.15375 },
        )
        .unwrap();
        let r = calculate(&member).unwrap();
        assert!(!r.passes());
        assert_eq!(r.notes.len(), 1);

        member.params.web_reinforcement = WebReinforcement::BearingStiffeners;
        assert!(calculate(&member).unwrap().passes());
    }

    #[test]
    fn test_short_span_has_no_shear_lag_entry() {
        let r = calculate(&lipped_c6(6.0, DesignParameters::default())).unwrap();
        assert!(r.shear_lag.is_none());
        assert!(!r.notes.is_empty());
    }
}
