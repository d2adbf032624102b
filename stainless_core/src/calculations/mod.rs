//! # Limit-State Calculations
//!
//! One module per ASCE-8 check. Each follows the same pattern:
//!
//! - `calculate(member, ...) -> CalcResult<*Result>` - Pure calculation
//! - `*Result` - Nominal and design strengths with every intermediate value,
//!   the ASCE-8 reference and any convergence warnings (JSON-serializable)
//! - `passes(demand)` - Design check against a factored demand
//!
//! Interaction equations that combine strengths live in [`combined`].
//!
//! ## Available Calculations
//!
//! - [`dimensional_limits`] - Width and depth ratios, shear lag (2.1)
//! - [`tension`] - Tension members (3.2)
//! - [`bending`] - Nominal and lateral buckling strength (3.3.1)
//! - [`shear`] - Web shear (3.3.2)
//! - [`web_crippling`] - Concentrated loads on webs (3.3.4)
//! - [`compression`] - Flexural, torsional and flexural-torsional buckling (3.4)
//! - [`combined`] - Bending + shear, bending + crippling, axial + bending
//! - [`builtup`] - Connector spacing of built-up I-sections (4.1.1)

pub mod bending;
pub mod builtup;
pub mod combined;
pub mod compression;
pub mod dimensional_limits;
pub mod shear;
pub mod tension;
pub mod web_crippling;

pub use bending::{BendingAxis, BendingResult};
pub use builtup::{BuiltUpResult, Connection};
pub use combined::{AxialBendingCapacity, AxialBendingDemand, AxialBendingResult, InteractionResult};
pub use compression::{BucklingMode, CompressionResult, ModeLoad};
pub use dimensional_limits::DimensionalLimits;
pub use shear::ShearResult;
pub use tension::TensionResult;
pub use web_crippling::{LoadLocation, WebCripplingResult};
