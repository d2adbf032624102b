//! # ASCE-8 Equations
//!
//! Closed-form equations of ASCE-8 used by the limit-state calculations.
//! Keeping them in one place allows checking each one against the code text
//! and makes the per-unit-η convention explicit.
//!
//! ## Modules
//!
//! - [`effective_width`] - Section 2 effective widths (stiffened, unstiffened,
//!   stress gradient, edge stiffened)
//! - [`buckling`] - Section 3 elastic buckling coefficients
//!
//! ## Sign Conventions
//!
//! - **Stress**: compression positive
//! - **x0**: negative when the shear centre lies on the web side opposite the
//!   centroid (channels)
//!
//! ## References
//!
//! - ASCE-8-02: Specification for the Design of Cold-Formed Stainless Steel
//!   Structural Members
//! - AISI Cold-Formed Steel Design Manual, 1986 edition (web crippling)

pub mod buckling;
pub mod effective_width;

pub use effective_width::{
    edge_stiffened,
    reduction_factor,
    slenderness,
    stiffened,
    stress_gradient,
    unstiffened,
    EdgeStiffenedWidth,
    EdgeStiffener,
    EdgeStiffenerCase,
    EffectiveWidthResult,
    GradientWidth,
    UniformWidth,
};

/// ASCE-8 section references attached to results for traceability.
pub mod asce8_ref {
    /// Maximum flat-width-to-thickness ratios
    pub const WIDTH_LIMITS: &str = "ASCE-8 2.1.1";
    /// Shear lag, short wide flanges
    pub const SHEAR_LAG: &str = "ASCE-8 2.1.1(2)";
    /// Maximum web depth-to-thickness ratios
    pub const WEB_LIMITS: &str = "ASCE-8 2.1.2";
    /// Tension members
    pub const TENSION: &str = "ASCE-8 3.2";
    /// Nominal section strength in bending
    pub const BENDING_NOMINAL: &str = "ASCE-8 3.3.1.1";
    /// Lateral buckling strength
    pub const BENDING_LATERAL: &str = "ASCE-8 3.3.1.2";
    /// Channel bent about the axis perpendicular to its symmetry axis
    pub const BENDING_LATERAL_PERPENDICULAR: &str = "ASCE-8 3.3.1.2.3(ii)";
    /// Shear strength of webs
    pub const SHEAR: &str = "ASCE-8 3.3.2";
    /// Combined bending and shear
    pub const BENDING_SHEAR: &str = "ASCE-8 3.3.3";
    /// Web crippling
    pub const WEB_CRIPPLING: &str = "ASCE-8 3.3.4";
    /// Combined bending and web crippling
    pub const BENDING_CRIPPLING: &str = "ASCE-8 3.3.5";
    /// Concentrically loaded compression members
    pub const COMPRESSION: &str = "ASCE-8 3.4";
    /// Flexural buckling
    pub const FLEXURAL_BUCKLING: &str = "ASCE-8 3.4.2";
    /// Torsional and flexural-torsional buckling
    pub const TORSIONAL_BUCKLING: &str = "ASCE-8 3.4.3";
    /// Combined axial load and bending
    pub const AXIAL_BENDING: &str = "ASCE-8 3.5";
    /// I-sections built from two channels
    pub const BUILT_UP: &str = "ASCE-8 4.1.1";
}
