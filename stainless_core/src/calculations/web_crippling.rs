//! # Web Crippling (ASCE-8 3.3.4)
//!
//! Concentrated loads and reactions on webs without bearing stiffeners. The
//! nominal strengths follow the AISI 1986 expressions adopted by ASCE-8:
//!
//! ## Shapes with a single web
//!
//! | Flanges     | Location | Pn                                                        |
//! |-------------|----------|-----------------------------------------------------------|
//! | stiffened   | end      | t²·k·C3·C4·C9·Cθ·(331 − 0.61·h/t)·(1 + 0.01·N/t)          |
//! | stiffened   | interior | t²·k·C1·C2·C9·Cθ·(538 − 0.74·h/t)·(1 + 0.007·N/t)         |
//! | unstiffened | end      | t²·k·C3·C4·C9·Cθ·(217 − 0.28·h/t)·(1 + 0.01·N/t)          |
//! | unstiffened | interior | t²·k·C1·C2·C9·Cθ·(538 − 0.74·h/t)·(1 + 0.007·N/t)         |
//!
//! For unstiffened flanges with N/t > 60 the bearing terms become
//! (0.71 + 0.015·N/t) and (0.75 + 0.011·N/t).
//!
//! ## I-sections
//!
//! ```text
//! end:      t²·FY·C6·(10 + 1.25·√(N/t))
//! interior: t²·FY·C5·(0.88 + 0.12·m)·(15 + 3.25·√(N/t))
//! ```
//!
//! ## Factors
//!
//! ```text
//! k  = 894·FY/E0
//! C1 = 1.22 − 0.22k          C2 = 1.06 − 0.06·R/t ≤ 1.0
//! C3 = 1.33 − 0.33k          C4 = 1.15 − 0.15·R/t, 0.50 ≤ C4 ≤ 1.0
//! C5 = 1.49 − 0.53k ≥ 0.6    C6 = 1 + (h/t)/750 for h/t ≤ 150, else 1.20
//! Cθ = 0.7 + 0.3·(θ/90)²     m  = t/0.075 in (t/1.91 mm)
//! C9 = 1.0 (in, kip), 6.9 (mm, N)
//! φw = 0.70
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::asce8_ref;
use crate::errors::CalcResult;
use crate::member::Member;

/// Resistance factor for web crippling
pub const PHI_CRIPPLING: f64 = 0.70;

/// Where the concentrated load acts along the member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadLocation {
    /// End reaction or load near the end
    End,
    /// Interior load or reaction
    #[default]
    Interior,
}

/// Which family of crippling expressions applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CripplingShape {
    SingleWebStiffenedFlanges,
    SingleWebUnstiffenedFlanges,
    ISection,
}

/// Web crippling strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebCripplingResult {
    pub shape: CripplingShape,
    pub location: LoadLocation,
    /// h/t
    pub h_t: f64,
    /// N/t
    pub n_t: f64,
    /// Inside bend radius over thickness
    pub r_t: f64,
    pub k: f64,
    /// Product of the C factors applied
    pub c_factor: f64,
    pub pn: f64,
    pub phi: f64,
    pub phi_pn: f64,
    /// Parameters outside the tested range of the expressions
    pub notes: Vec<String>,
    pub code_ref: String,
}

impl WebCripplingResult {
    pub fn passes(&self, pu: f64) -> bool {
        pu <= self.phi_pn
    }
}

/// Web crippling strength for a bearing load at `location`.
pub fn calculate(member: &Member, location: LoadLocation) -> CalcResult<WebCripplingResult> {
    let web = member.profile.web()?;
    let t = web.t;
    let fy = member.fy();
    let params = &member.params;

    let h_t = web.w / t;
    let n_t = params.bearing_length / t;
    let r_t = (member.profile.shape.r_out() - t) / t;
    let k = 894.0 * fy / member.steel.e0;
    let c9 = member.units.web_crippling_c9();
    let c_theta = 0.7 + 0.3 * (params.web_angle / 90.0).powi(2);

    let c1 = 1.22 - 0.22 * k;
    let c2 = (1.06 - 0.06 * r_t).min(1.0);
    let c3 = 1.33 - 0.33 * k;
    let c4 = (1.15 - 0.15 * r_t).clamp(0.5, 1.0);

    let shape = if member.profile.is_built_up() {
        CripplingShape::ISection
    } else if member.profile.has_stiffened_flange() {
        CripplingShape::SingleWebStiffenedFlanges
    } else {
        CripplingShape::SingleWebUnstiffenedFlanges
    };

    let (c_factor, pn) = match (shape, location) {
        (CripplingShape::SingleWebStiffenedFlanges, LoadLocation::End) => {
            let c = k * c3 * c4 * c9 * c_theta;
            (c, t * t * c * (331.0 - 0.61 * h_t) * (1.0 + 0.01 * n_t))
        }
        (CripplingShape::SingleWebStiffenedFlanges, LoadLocation::Interior) => {
            let c = k * c1 * c2 * c9 * c_theta;
            (c, t * t * c * (538.0 - 0.74 * h_t) * (1.0 + 0.007 * n_t))
        }
        (CripplingShape::SingleWebUnstiffenedFlanges, LoadLocation::End) => {
            let c = k * c3 * c4 * c9 * c_theta;
            let bearing = if n_t > 60.0 { 0.71 + 0.015 * n_t } else { 1.0 + 0.01 * n_t };
            (c, t * t * c * (217.0 - 0.28 * h_t) * bearing)
        }
        (CripplingShape::SingleWebUnstiffenedFlanges, LoadLocation::Interior) => {
            let c = k * c1 * c2 * c9 * c_theta;
            let bearing = if n_t > 60.0 { 0.75 + 0.011 * n_t } else { 1.0 + 0.007 * n_t };
            (c, t * t * c * (538.0 - 0.74 * h_t) * bearing)
        }
        (CripplingShape::ISection, LoadLocation::End) => {
            let c6 = if h_t <= 150.0 { 1.0 + h_t / 750.0 } else { 1.20 };
            (c6, t * t * fy * c6 * (10.0 + 1.25 * n_t.sqrt()))
        }
        (CripplingShape::ISection, LoadLocation::Interior) => {
            let c5 = (1.49 - 0.53 * k).max(0.6);
            let m = t / member.units.reference_thickness();
            let c = c5 * (0.88 + 0.12 * m);
            (c, t * t * fy * c * (15.0 + 3.25 * n_t.sqrt()))
        }
    };

    let mut notes = Vec::new();
    if h_t > 200.0 {
        notes.push(format!("h/t = {:.1} exceeds 200", h_t));
    }
    if n_t > 210.0 {
        notes.push(format!("N/t = {:.1} exceeds 210", n_t));
    }
    if params.bearing_length / web.w > 3.5 {
        notes.push(format!("N/h = {:.2} exceeds 3.5", params.bearing_length / web.w));
    }
    if r_t > 6.0 {
        notes.push(format!("R/t = {:.2} exceeds 6", r_t));
    }
    for note in &notes {
        log::warn!("web crippling of {}: {}", member.profile.name, note);
    }

    Ok(WebCripplingResult {
        shape,
        location,
        h_t,
        n_t,
        r_t,
        k,
        c_factor,
        pn,
        phi: PHI_CRIPPLING,
        phi_pn: PHI_CRIPPLING * pn,
        notes,
        code_ref: asce8_ref::WEB_CRIPPLING.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Steel;
    use crate::member::tests::lipped_c6;
    use crate::member::DesignParameters;
    use crate::section::{Profile, ProfileShape};
    use crate::units::UnitSystem;
    use approx::assert_relative_eq;

    fn params(n: f64) -> DesignParameters {
        DesignParameters {
            bearing_length: n,
            ..DesignParameters::default()
        }
    }

    #[test]
    fn test_interior_stiffened_flanges() {
        let member = lipped_c6(48.0, params(3.0));
        let r = calculate(&member, LoadLocation::Interior).unwrap();
        assert_eq!(r.shape, CripplingShape::SingleWebStiffenedFlanges);

        let t: f64 = 0.06;
        let k = 894.0 * 50.0 / 27000.0;
        let r_t = (0.15375 - t) / t;
        let h_t = (6.0 - 2.0 * 0.15375) / t;
        let expected = t * t * k * (1.22 - 0.22 * k) * (1.06 - 0.06 * r_t).min(1.0) * (538.0 - 0.74 * h_t) * (1.0 + 0.007 * 50.0);
        assert_relative_eq!(r.pn, expected, max_relative = 1e-12);
        assert_relative_eq!(r.phi_pn, 0.70 * expected, max_relative = 1e-12);
        assert!(r.notes.is_empty());
    }

    #[test]
    fn test_end_is_weaker_than_interior() {
        let member = lipped_c6(48.0, params(3.0));
        let end = calculate(&member, LoadLocation::End).unwrap();
        let interior = calculate(&member, LoadLocation::Interior).unwrap();
        assert!(end.pn < interior.pn);
    }

    #[test]
    fn test_web_angle_reduces_strength() {
        let upright = calculate(&lipped_c6(48.0, params(3.0)), LoadLocation::End).unwrap();
        let inclined = calculate(
            &lipped_c6(
                48.0,
                DesignParameters {
                    web_angle: 60.0,
                    ..params(3.0)
                },
            ),
            LoadLocation::End,
        )
        .unwrap();
        assert!(inclined.pn < upright.pn);
    }

    #[test]
    fn test_i_section_uses_yield_forms() {
        let steel = Steel::new("SA301", 50.0, 27000.0, 0.3, 4.58, 0.002).unwrap();
        let shape = ProfileShape::LippedBuiltUpI { h: 6.0, b: 1.625, d: 0.45, t: 0.06, r_out: 0.15375 };
        let member = Member::new(Profile::new("I6", shape).unwrap(), steel, params(3.0), 48.0, UnitSystem::Imperial).unwrap();

        let end = calculate(&member, LoadLocation::End).unwrap();
        assert_eq!(end.shape, CripplingShape::ISection);
        let h_t = (6.0 - 2.0 * 0.15375) / 0.06;
        let expected = 0.0036 * 50.0 * (1.0 + h_t / 750.0) * (10.0 + 1.25 * 50f64.sqrt());
        assert_relative_eq!(end.pn, expected, max_relative = 1e-12);

        let interior = calculate(&member, LoadLocation::Interior).unwrap();
        assert!(interior.pn > end.pn);
    }

    #[test]
    fn test_out_of_range_parameters_are_noted() {
        let member = lipped_c6(48.0, params(13.0));
        let r = calculate(&member, LoadLocation::End).unwrap();
        assert!(r.notes.iter().any(|n| n.starts_with("N/t")));
    }
}
