//! Named stainless grades from ASCE-8 Table A2/A4, ready to use.
//!
//! Values are stored in the unit system of the source table (ksi for the
//! US grades, MPa for the metric ones). `Steel` is unit agnostic; keep the
//! rest of the member in the same system.

use once_cell::sync::Lazy;

use super::Steel;
use crate::errors::{CalcError, CalcResult};
use crate::units::{ksi_to_mpa, mpa_to_ksi, UnitSystem};

/// Catalog entry
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub steel: Steel,
    pub units: UnitSystem,
    pub description: &'static str,
}

fn entry(name: &str, fy: f64, e0: f64, n: f64, units: UnitSystem, description: &'static str) -> CatalogEntry {
    CatalogEntry {
        steel: Steel {
            name: name.to_string(),
            fy,
            e0,
            nu: 0.3,
            n,
            offset: 0.002,
        },
        units,
        description,
    }
}

static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    vec![
        entry("SA301_1_4Hard", 50.0, 27000.0, 4.58, UnitSystem::Imperial, "Type 301, 1/4 hard, longitudinal compression"),
        entry("SA304_1_4Hard", 344.8, 186200.0, 4.58, UnitSystem::Metric, "Type 304, 1/4 hard, longitudinal compression"),
        entry("SA304_1_4Hard_L", 337.0, 180510.0, 13.5, UnitSystem::Metric, "Type 304, 1/4 hard, longitudinal tension"),
        entry("SA409_longitudinal", 30.0, 27000.0, 9.7, UnitSystem::Imperial, "Type 409, annealed, longitudinal compression"),
    ]
});

/// Look up a grade by name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use stainless_core::materials::catalog;
///
/// let steel = catalog::lookup("sa301_1_4hard")?;
/// assert_eq!(steel.fy, 50.0);
/// # Ok::<(), stainless_core::errors::CalcError>(())
/// ```
pub fn lookup(name: &str) -> CalcResult<Steel> {
    lookup_entry(name).map(|e| e.steel.clone())
}

/// Look up a grade together with its catalog unit system
pub fn lookup_entry(name: &str) -> CalcResult<&'static CatalogEntry> {
    CATALOG
        .iter()
        .find(|e| e.steel.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CalcError::material_not_found(name))
}

/// Look up a grade with FY and E0 expressed in `units`.
///
/// # Example
///
/// ```rust
/// use stainless_core::materials::catalog;
/// use stainless_core::units::UnitSystem;
///
/// let steel = catalog::lookup_in("SA301_1_4Hard", UnitSystem::Metric)?;
/// assert!((steel.fy - 344.74).abs() < 0.01);
/// # Ok::<(), stainless_core::errors::CalcError>(())
/// ```
pub fn lookup_in(name: &str, units: UnitSystem) -> CalcResult<Steel> {
    let entry = lookup_entry(name)?;
    let mut steel = entry.steel.clone();
    let convert: fn(f64) -> f64 = match (entry.units, units) {
        (UnitSystem::Imperial, UnitSystem::Metric) => ksi_to_mpa,
        (UnitSystem::Metric, UnitSystem::Imperial) => mpa_to_ksi,
        _ => return Ok(steel),
    };
    steel.fy = convert(steel.fy);
    steel.e0 = convert(steel.e0);
    Ok(steel)
}

/// All catalog entries
pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}
