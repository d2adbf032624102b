//! # Ramberg-Osgood Stainless Steel
//!
//! Stainless steel has no sharp yield plateau. ASCE-8 models its stress-strain
//! curve with the Ramberg-Osgood relation
//!
//! ```text
//! ε = s/E0 + offset·(s/FY)^n
//! ```
//!
//! where FY is the stress at the given permanent-set `offset` (0.2%). The
//! moduli that follow from it reduce elastic buckling stresses through the
//! plasticity factor η.
//!
//! ## Reference
//!
//! ASCE-8 Appendix B, Eq. B-1 to B-5

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Which modulus ratio reduces an elastic buckling stress.
///
/// Flexural, torsional and lateral buckling use the tangent modulus; shear
/// buckling uses the secant modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlasticityFactor {
    /// η = Et/E0 (Eq. B-5)
    #[default]
    Tangent,
    /// η = Es/E0 (Eq. B-4)
    Secant,
    /// η = √(Et/E0) (Eq. B-3)
    SqrtTangent,
}

impl PlasticityFactor {
    /// Equation reference
    pub fn code_ref(&self) -> &'static str {
        match self {
            PlasticityFactor::Tangent => "ASCE-8 Eq. B-5",
            PlasticityFactor::Secant => "ASCE-8 Eq. B-4",
            PlasticityFactor::SqrtTangent => "ASCE-8 Eq. B-3",
        }
    }
}

/// Stainless steel grade with Ramberg-Osgood parameters.
///
/// All stresses share the unit of `fy` and `e0`; the struct itself is unit
/// agnostic.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "SA304_1_4Hard",
///   "fy": 344.8,
///   "e0": 186200.0,
///   "nu": 0.3,
///   "n": 4.58,
///   "offset": 0.002
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Steel {
    /// Grade label
    pub name: String,
    /// Yield stress at `offset` permanent strain
    pub fy: f64,
    /// Initial modulus of elasticity
    pub e0: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Ramberg-Osgood exponent
    pub n: f64,
    /// Permanent-set strain defining `fy`
    pub offset: f64,
}

impl Steel {
    /// Create and validate a material.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stainless_core::materials::Steel;
    ///
    /// let steel = Steel::new("SA304", 344.8, 186200.0, 0.3, 4.58, 0.002)?;
    /// assert!((steel.g0() - 71615.4).abs() < 0.1);
    /// # Ok::<(), stainless_core::errors::CalcError>(())
    /// ```
    pub fn new(name: impl Into<String>, fy: f64, e0: f64, nu: f64, n: f64, offset: f64) -> CalcResult<Self> {
        let steel = Steel {
            name: name.into(),
            fy,
            e0,
            nu,
            n,
            offset,
        };
        steel.validate()?;
        Ok(steel)
    }

    /// Validate the Ramberg-Osgood parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.fy > 0.0) || !self.fy.is_finite() {
            return Err(CalcError::invalid_input("fy", self.fy.to_string(), "Yield stress must be positive"));
        }
        if !(self.e0 > 0.0) || !self.e0.is_finite() {
            return Err(CalcError::invalid_input("e0", self.e0.to_string(), "Initial modulus must be positive"));
        }
        if !(self.n >= 1.0) {
            return Err(CalcError::invalid_input("n", self.n.to_string(), "Ramberg-Osgood exponent must be at least 1"));
        }
        if !(0.0..0.5).contains(&self.nu) {
            return Err(CalcError::invalid_input("nu", self.nu.to_string(), "Poisson's ratio must be in [0, 0.5)"));
        }
        if !(self.offset > 0.0) {
            return Err(CalcError::invalid_input("offset", self.offset.to_string(), "Offset strain must be positive"));
        }
        Ok(())
    }

    /// Initial shear modulus G0 = E0 / (2(1 + ν))
    pub fn g0(&self) -> f64 {
        self.e0 / (2.0 * (1.0 + self.nu))
    }

    /// Secant modulus at stress `s` (Eq. B-1)
    ///
    /// # Formula
    /// Es = E0 / (1 + offset·E0·|s|^(n−1) / FY^n)
    pub fn secant_modulus(&self, s: f64) -> f64 {
        let s = s.abs();
        self.e0 / (1.0 + self.offset * self.e0 * s.powf(self.n - 1.0) / self.fy.powf(self.n))
    }

    /// Tangent modulus at stress `s` (Eq. B-2)
    ///
    /// # Formula
    /// Et = E0·FY / (FY + offset·n·E0·(|s|/FY)^(n−1))
    pub fn tangent_modulus(&self, s: f64) -> f64 {
        let s = s.abs();
        self.e0 * self.fy / (self.fy + self.offset * self.n * self.e0 * (s / self.fy).powf(self.n - 1.0))
    }

    /// Plasticity reduction factor η at stress `s`.
    ///
    /// Always in (0, 1], equal to 1 at zero stress and non-increasing in |s|.
    pub fn eta(&self, s: f64, factor: PlasticityFactor) -> f64 {
        match factor {
            PlasticityFactor::Tangent => self.tangent_modulus(s) / self.e0,
            PlasticityFactor::Secant => self.secant_modulus(s) / self.e0,
            PlasticityFactor::SqrtTangent => (self.tangent_modulus(s) / self.e0).sqrt(),
        }
    }

    /// Total strain at stress `s` from the Ramberg-Osgood relation
    pub fn strain(&self, s: f64) -> f64 {
        s / self.e0 + s.signum() * self.offset * (s.abs() / self.fy).powf(self.n)
    }
}
