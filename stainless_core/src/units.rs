//! # Unit Systems
//!
//! The design equations are dimensionally consistent, so every calculation
//! runs in whatever coherent unit set the inputs are given in. A handful of
//! ASCE-8 constants are *not* dimensionless, though, and those depend on
//! which system is in use:
//!
//! - Web crippling factor C9 (1.0 for in/kip, 6.9 for mm/N)
//! - Reference thickness in the I-section web crippling factor m (0.075 in / 1.91 mm)
//!
//! ## Supported Systems
//!
//! | System   | Length | Force | Stress | Moment  |
//! |----------|--------|-------|--------|---------|
//! | Imperial | in     | kip   | ksi    | kip-in  |
//! | Metric   | mm     | N     | MPa    | N-mm    |
//!
//! ## Example
//!
//! ```rust
//! use stainless_core::units::UnitSystem;
//!
//! let units = UnitSystem::Metric;
//! assert_eq!(units.web_crippling_c9(), 6.9);
//! assert_eq!(units.stress_label(), "MPa");
//! ```

use serde::{Deserialize, Serialize};

/// MPa per ksi
pub const MPA_PER_KSI: f64 = 6.894_757;

/// Coherent unit set the inputs are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// in, kip, ksi
    #[default]
    Imperial,
    /// mm, N, MPa
    Metric,
}

impl UnitSystem {
    /// Web crippling factor C9 (ASCE-8 Section 3.3.4)
    pub fn web_crippling_c9(&self) -> f64 {
        match self {
            UnitSystem::Imperial => 1.0,
            UnitSystem::Metric => 6.9,
        }
    }

    /// Reference thickness in the I-section web crippling term `m = t/0.075`
    pub fn reference_thickness(&self) -> f64 {
        match self {
            UnitSystem::Imperial => 0.075,
            UnitSystem::Metric => 1.91,
        }
    }

    /// Length unit label
    pub fn length_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "in",
            UnitSystem::Metric => "mm",
        }
    }

    /// Force unit label
    pub fn force_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "kip",
            UnitSystem::Metric => "N",
        }
    }

    /// Stress unit label
    pub fn stress_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ksi",
            UnitSystem::Metric => "MPa",
        }
    }

    /// Moment unit label
    pub fn moment_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "kip-in",
            UnitSystem::Metric => "N-mm",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Imperial => write!(f, "Imperial (in, kip, ksi)"),
            UnitSystem::Metric => write!(f, "Metric (mm, N, MPa)"),
        }
    }
}

/// Convert a stress from ksi to MPa
#[inline]
pub fn ksi_to_mpa(ksi: f64) -> f64 {
    ksi * MPA_PER_KSI
}

/// Convert a stress from MPa to ksi
#[inline]
pub fn mpa_to_ksi(mpa: f64) -> f64 {
    mpa / MPA_PER_KSI
}
