//! # Materials
//!
//! Nonlinear stainless steel material model and a catalog of common grades.
//!
//! ## Example
//!
//! ```rust
//! use stainless_core::materials::{PlasticityFactor, Steel};
//!
//! let steel = Steel::new("SA304_1_4Hard", 344.8, 186200.0, 0.3, 4.58, 0.002)?;
//! let eta = steel.eta(159.3, PlasticityFactor::Tangent);
//! assert!((eta - 0.7624).abs() < 1e-4);
//! # Ok::<(), stainless_core::errors::CalcError>(())
//! ```

pub mod catalog;
pub mod stainless;

pub use stainless::{PlasticityFactor, Steel};
