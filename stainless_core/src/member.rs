//! # Members
//!
//! A [`Member`] bundles everything a limit-state check needs: the profile,
//! the material, the effective-length and loading parameters, the member
//! length, and the solver settings. It is plain immutable data; every check
//! reads it and returns a fresh result.
//!
//! ## Example
//!
//! ```rust
//! use stainless_core::materials::catalog;
//! use stainless_core::member::{DesignParameters, Member};
//! use stainless_core::section::{Profile, ProfileShape};
//! use stainless_core::units::UnitSystem;
//!
//! let shape = ProfileShape::LippedChannel { h: 6.0, b: 1.625, d: 0.45, t: 0.06, r_out: 0.15375 };
//! let member = Member::new(
//!     Profile::new("C6", shape)?,
//!     catalog::lookup("SA301_1_4Hard")?,
//!     DesignParameters::default(),
//!     96.0,
//!     UnitSystem::Imperial,
//! )?;
//! assert_eq!(member.params.ly, 96.0);
//! # Ok::<(), stainless_core::errors::CalcError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::effective_section::{solve_effective_section, EffectiveSection, SectionSolverSettings};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{PlasticityFactor, Steel};
use crate::section::Profile;
use crate::solver::{solve_critical_stress, CriticalStress, SolverSettings};
use crate::units::UnitSystem;

/// Web reinforcement, selecting the h/t limit and the bending-shear interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebReinforcement {
    /// Unreinforced web
    #[default]
    None,
    /// Bearing stiffeners only
    BearingStiffeners,
    /// Bearing and intermediate transverse stiffeners
    TransverseStiffeners,
}

/// Effective-length, moment-gradient and bearing parameters.
///
/// Lengths left at 0 take the member length when the member is built.
///
/// ## JSON Example
///
/// ```json
/// {
///   "kx": 1.0, "ky": 1.0, "kz": 1.0,
///   "lx": 0.0, "ly": 48.0, "lz": 48.0,
///   "cb": 1.75,
///   "cm_x": 0.85, "cm_y": 0.85,
///   "bearing_length": 3.0,
///   "web_angle": 90.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    /// Effective length factor, buckling about x
    pub kx: f64,
    /// Effective length factor, buckling about y
    pub ky: f64,
    /// Effective length factor, twisting
    pub kz: f64,
    /// Unbraced length, buckling about x
    pub lx: f64,
    /// Unbraced length, buckling about y (also the lateral bracing spacing)
    pub ly: f64,
    /// Unbraced length, twisting
    pub lz: f64,
    /// Moment gradient coefficient
    pub cb: f64,
    /// End moment coefficient, bending about x
    pub cm_x: f64,
    /// End moment coefficient, bending about y
    pub cm_y: f64,
    /// Bearing length N
    #[serde(alias = "N")]
    pub bearing_length: f64,
    /// Angle between web and bearing surface (degrees)
    #[serde(alias = "N_theta")]
    pub web_angle: f64,
    #[serde(default)]
    pub web_reinforcement: WebReinforcement,
    /// Longitudinal spacing of the connectors joining a built-up I
    #[serde(default)]
    pub connector_spacing: Option<f64>,
}

impl Default for DesignParameters {
    fn default() -> Self {
        DesignParameters {
            kx: 1.0,
            ky: 1.0,
            kz: 1.0,
            lx: 0.0,
            ly: 0.0,
            lz: 0.0,
            cb: 1.0,
            cm_x: 0.85,
            cm_y: 0.85,
            bearing_length: 1.0,
            web_angle: 90.0,
            web_reinforcement: WebReinforcement::None,
            connector_spacing: None,
        }
    }
}

impl DesignParameters {
    /// Validate parameters. Zero lengths are allowed until defaulted.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("kx", self.kx),
            ("ky", self.ky),
            ("kz", self.kz),
            ("cb", self.cb),
            ("cm_x", self.cm_x),
            ("cm_y", self.cm_y),
            ("bearing_length", self.bearing_length),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Parameter must be positive"));
            }
        }
        for (field, value) in [("lx", self.lx), ("ly", self.ly), ("lz", self.lz)] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Unbraced length cannot be negative"));
            }
        }
        if !(45.0..=90.0).contains(&self.web_angle) {
            return Err(CalcError::invalid_input(
                "web_angle",
                self.web_angle.to_string(),
                "Web angle must be between 45 and 90 degrees",
            ));
        }
        if let Some(a) = self.connector_spacing {
            if !(a > 0.0) {
                return Err(CalcError::invalid_input("connector_spacing", a.to_string(), "Spacing must be positive"));
            }
        }
        Ok(())
    }

    /// Copy with every unset (0) unbraced length replaced by `length`
    pub fn with_default_lengths(mut self, length: f64) -> Self {
        for l in [&mut self.lx, &mut self.ly, &mut self.lz] {
            if *l == 0.0 {
                *l = length;
            }
        }
        self
    }
}

/// Member under design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub profile: Profile,
    pub steel: Steel,
    pub params: DesignParameters,
    /// Member length
    pub length: f64,
    pub units: UnitSystem,
    #[serde(default)]
    pub solver: SolverSettings,
    #[serde(default)]
    pub section_solver: SectionSolverSettings,
}

impl Member {
    /// Build a member, defaulting unset unbraced lengths to `length`.
    pub fn new(
        profile: Profile,
        steel: Steel,
        params: DesignParameters,
        length: f64,
        units: UnitSystem,
    ) -> CalcResult<Self> {
        if !(length > 0.0) || !length.is_finite() {
            return Err(CalcError::invalid_input("L", length.to_string(), "Member length must be positive"));
        }
        steel.validate()?;
        params.validate()?;
        Ok(Member {
            profile,
            steel,
            params: params.with_default_lengths(length),
            length,
            units,
            solver: SolverSettings::default(),
            section_solver: SectionSolverSettings::default(),
        })
    }

    /// Replace the critical stress solver settings
    pub fn with_solver(mut self, solver: SolverSettings) -> CalcResult<Self> {
        solver.validate()?;
        self.solver = solver;
        Ok(self)
    }

    /// Replace the effective section solver settings
    pub fn with_section_solver(mut self, section_solver: SectionSolverSettings) -> Self {
        self.section_solver = section_solver;
        self
    }

    /// Solve `s = FF·η(s)` with this member's material and settings
    pub fn critical_stress(&self, ff: f64, factor: PlasticityFactor) -> CalcResult<CriticalStress> {
        solve_critical_stress(ff, &self.steel, factor, &self.solver)
    }

    /// Effective section in strong-axis bending at compression fibre stress `f`
    pub fn effective_section(&self, f: f64) -> CalcResult<EffectiveSection> {
        solve_effective_section(&self.profile, &self.steel, f, &self.section_solver)
    }

    pub fn fy(&self) -> f64 {
        self.steel.fy
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::section::ProfileShape;

    pub(crate) fn lipped_c6(length: f64, params: DesignParameters) -> Member {
        let shape = ProfileShape::LippedChannel { h: 6.0, b: 1.625, d: 0.45, t: 0.06, r_out: 0.15375 };
        let steel = Steel::new("SA301_1_4Hard", 50.0, 27000.0, 0.3, 4.58, 0.002).unwrap();
        Member::new(Profile::new("C6", shape).unwrap(), steel, params, length, UnitSystem::Imperial).unwrap()
    }

    #[test]
    fn test_lengths_default_once() {
        let params = DesignParameters {
            lx: 120.0,
            ..DesignParameters::default()
        };
        let member = lipped_c6(96.0, params);
        assert_eq!(member.params.lx, 120.0);
        assert_eq!(member.params.ly, 96.0);
        assert_eq!(member.params.lz, 96.0);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let bad_k = DesignParameters {
            ky: 0.0,
            ..DesignParameters::default()
        };
        assert_eq!(bad_k.validate().unwrap_err().error_code(), "INVALID_INPUT");

        let bad_angle = DesignParameters {
            web_angle: 30.0,
            ..DesignParameters::default()
        };
        assert!(bad_angle.validate().is_err());

        let negative = DesignParameters {
            lz: -1.0,
            ..DesignParameters::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_length() {
        let shape = ProfileShape::Channel { h: 6.0, b: 1.625, t: 0.06, r_out: 0.15375 };
        let steel = Steel::new("SA301", 50.0, 27000.0, 0.3, 4.58, 0.002).unwrap();
        let err = Member::new(
            Profile::new("C6", shape).unwrap(),
            steel,
            DesignParameters::default(),
            0.0,
            UnitSystem::Imperial,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_parameters_json_aliases() {
        let json = r#"{"kx":1,"ky":0.5,"kz":0.5,"lx":0,"ly":0,"lz":0,"cb":1.75,"cm_x":0.85,"cm_y":0.85,"N":3.0,"N_theta":90}"#;
        let params: DesignParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.bearing_length, 3.0);
        assert_eq!(params.web_reinforcement, WebReinforcement::None);
        assert!(params.connector_spacing.is_none());
    }

    #[test]
    fn test_member_is_plain_data() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Member>();
    }
}
