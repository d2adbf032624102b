//! # stainless_core - Cold-Formed Stainless Steel Member Design
//!
//! `stainless_core` designs cold-formed stainless steel channels and
//! built-up I-sections to ASCE-8. Stainless steel has no sharp yield point,
//! so buckling stresses are found on the Ramberg-Osgood curve through the
//! plasticity reduction factor η, and effective section properties are
//! re-solved at every stress level.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Profiles are immutable; every check returns fresh results
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Fatal errors are typed; non-converged iterations are
//!   carried as warnings next to the value they affect
//!
//! ## Quick Start
//!
//! ```rust
//! use stainless_core::analysis::{Analysis, Demands};
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
//!     48.0,
//!     UnitSystem::Imperial,
//! )?;
//!
//! let report = Analysis::new(&member).run(&Demands { pu: 2.0, ..Demands::default() })?;
//! assert!(report.limit_state("Compression").is_some());
//! # Ok::<(), stainless_core::errors::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Ramberg-Osgood stainless steels and the named catalog
//! - [`section`] - Parametric profiles, element tables, section properties
//! - [`solver`] - Inelastic critical stress `s = FF·η(s)`
//! - [`equations`] - Effective widths and elastic buckling stresses
//! - [`neutral_axis`] - Neutral axis shift of a partially effective section
//! - [`effective_section`] - Effective section modulus at a stress level
//! - [`member`] - Member, design parameters
//! - [`calculations`] - ASCE-8 limit states and interactions
//! - [`analysis`] - All checks on one member, with a text report
//! - [`project`] - Project container of designed members
//! - [`file_io`] - Atomic saves, locking, profile batches
//! - [`units`] - Unit systems and unit-dependent constants
//! - [`errors`] - Structured error and warning types

pub mod analysis;
pub mod calculations;
pub mod effective_section;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod member;
pub mod neutral_axis;
pub mod project;
pub mod section;
pub mod solver;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use analysis::{Analysis, AnalysisReport, Demands};
pub use errors::{CalcError, CalcResult, ConvergenceWarning};
pub use file_io::{load_profile_batch, load_project, save_members, save_project, FileLock, ProfileSpec};
pub use materials::Steel;
pub use member::{DesignParameters, Member};
pub use project::{DesignMember, Project};
pub use section::{Profile, ProfileShape};
pub use units::UnitSystem;
