//! # Neutral Axis Adjustment
//!
//! When parts of a section are structurally ineffective, the remaining area
//! has a different centroid and a smaller second moment of area. This module
//! recombines the gross properties with a list of removed strips.
//!
//! ## Sign Convention
//!
//! `cy` of a removed strip is measured from the gross centroidal axis,
//! positive towards the compression fibre. A positive `dcy` means the
//! neutral axis moved away from the compression fibre.
//!
//! ```text
//!   compression ─┬─────────────  ← removed strip at +cy
//!                │
//!   gross axis ──┼─────────────
//!                │  dcy
//!   new axis  ───┼─────────────
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::section::ElementName;

/// Orientation of a removed strip relative to the bending axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Long side parallel to the bending axis (flanges), own I = t³·b/12
    Parallel,
    /// Long side perpendicular to the bending axis (webs, lips), own I = t·b³/12
    Perpendicular,
}

/// A strip of the section treated as ineffective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IneffectiveRegion {
    /// Element the strip was removed from
    pub element: ElementName,
    /// Thickness
    pub t: f64,
    /// Removed width
    pub width: f64,
    /// Distance from the gross centroidal axis to the strip centroid
    pub cy: f64,
    pub orientation: Orientation,
}

impl IneffectiveRegion {
    /// Removed area
    pub fn area(&self) -> f64 {
        self.t * self.width
    }

    /// Second moment of area of the strip about its own centroid
    pub fn own_inertia(&self) -> f64 {
        match self.orientation {
            Orientation::Parallel => self.t.powi(3) * self.width / 12.0,
            Orientation::Perpendicular => self.t * self.width.powi(3) / 12.0,
        }
    }
}

/// Neutral axis shift and reduced inertia
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralAxisShift {
    /// Shift of the neutral axis away from the compression fibre
    pub dcy: f64,
    /// Second moment of area of the effective section about the new axis
    pub ixx: f64,
    /// Effective area
    pub area: f64,
}

/// Recompute neutral axis and inertia after removing ineffective strips.
///
/// # Formula
/// ```text
/// dcy = Σ(A_·cy_) / (A − ΣA_)
/// Ixx = Ix + A·dcy² − Σ(I_own + A_·(cy_ + dcy)²)
/// ```
///
/// # Arguments
/// * `ix` - Gross second moment of area about the gross centroidal axis
/// * `area` - Gross area
/// * `regions` - Strips to remove
///
/// # Example
/// ```rust
/// use stainless_core::neutral_axis::{adjust_neutral_axis, IneffectiveRegion, Orientation};
/// use stainless_core::section::ElementName;
///
/// let flange = IneffectiveRegion {
///     element: ElementName::Flange,
///     t: 0.06,
///     width: 0.665,
///     cy: 2.97,
///     orientation: Orientation::Parallel,
/// };
/// let shift = adjust_neutral_axis(2.68, 0.541, &[flange])?;
/// assert!((shift.dcy - 0.236).abs() < 1e-3);
/// assert!((shift.ixx - 2.300).abs() < 1e-3);
/// # Ok::<(), stainless_core::errors::CalcError>(())
/// ```
pub fn adjust_neutral_axis(ix: f64, area: f64, regions: &[IneffectiveRegion]) -> CalcResult<NeutralAxisShift> {
    if !(area > 0.0) {
        return Err(CalcError::invalid_input("A", area.to_string(), "Gross area must be positive"));
    }
    if !(ix > 0.0) {
        return Err(CalcError::invalid_input("Ix", ix.to_string(), "Gross inertia must be positive"));
    }
    for r in regions {
        if !(r.t >= 0.0) || !(r.width >= 0.0) || !r.cy.is_finite() {
            return Err(CalcError::invalid_input(
                "region",
                format!("{:?}", r),
                "Removed strips need non-negative size and a finite position",
            ));
        }
    }

    let removed: f64 = regions.iter().map(IneffectiveRegion::area).sum();
    let first_moment: f64 = regions.iter().map(|r| r.area() * r.cy).sum();
    let remaining = area - removed;
    if !(remaining > 0.0) {
        return Err(CalcError::invalid_input(
            "regions",
            format!("{:.4}", removed),
            "Removed area must be smaller than the gross area",
        ));
    }

    let dcy = first_moment / remaining;
    let ixx = ix + area * dcy * dcy
        - regions
            .iter()
            .map(|r| r.own_inertia() + r.area() * (r.cy + dcy).powi(2))
            .sum::<f64>();

    Ok(NeutralAxisShift {
        dcy,
        ixx,
        area: remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn strip(width: f64, cy: f64, orientation: Orientation) -> IneffectiveRegion {
        IneffectiveRegion {
            element: ElementName::Flange,
            t: 0.06,
            width,
            cy,
            orientation,
        }
    }

    #[test]
    fn test_reference_example() {
        let shift = adjust_neutral_axis(2.68, 0.541, &[strip(0.665, 2.97, Orientation::Parallel)]).unwrap();
        assert_relative_eq!(shift.dcy, 0.236, epsilon = 1e-3);
        assert_relative_eq!(shift.ixx, 2.300, epsilon = 1e-3);
        assert_relative_eq!(shift.area, 0.541 - 0.0399, epsilon = 1e-9);
    }

    #[test]
    fn test_no_regions_is_identity() {
        let shift = adjust_neutral_axis(2.68, 0.541, &[]).unwrap();
        assert_eq!(shift.dcy, 0.0);
        assert_eq!(shift.ixx, 2.68);
    }

    #[test]
    fn test_symmetric_removal_keeps_axis() {
        let regions = [strip(0.3, 2.0, Orientation::Perpendicular), strip(0.3, -2.0, Orientation::Perpendicular)];
        let shift = adjust_neutral_axis(2.68, 0.541, &regions).unwrap();
        assert_relative_eq!(shift.dcy, 0.0, epsilon = 1e-15);
        let expected = 2.68 - 2.0 * (0.06 * 0.3f64.powi(3) / 12.0 + 0.018 * 4.0);
        assert_relative_eq!(shift.ixx, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_orientation_changes_own_term() {
        let par = strip(0.5, 1.0, Orientation::Parallel);
        let perp = strip(0.5, 1.0, Orientation::Perpendicular);
        assert!(perp.own_inertia() > par.own_inertia());
        let a = adjust_neutral_axis(2.68, 0.541, &[par]).unwrap();
        let b = adjust_neutral_axis(2.68, 0.541, &[perp]).unwrap();
        assert_relative_eq!(a.dcy, b.dcy);
        assert!(b.ixx < a.ixx);
    }

    #[test]
    fn test_removing_everything_is_rejected() {
        let err = adjust_neutral_axis(2.68, 0.05, &[strip(1.0, 1.0, Orientation::Parallel)]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
