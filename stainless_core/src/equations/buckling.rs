//! # Elastic Buckling Coefficients
//!
//! Critical stresses of ASCE-8 Section 3 written per unit plasticity factor.
//! Each function returns the value the code equation gives with η = 1, i.e.
//! the `FF` coefficient handed to
//! [`solve_critical_stress`](crate::solver::solve_critical_stress).
//!
//! ## Notation
//!
//! - `E0`, `G0` = initial Young's and shear moduli
//! - `K·L` = effective length for the relevant buckling axis
//! - `r0` = polar radius of gyration about the shear centre
//! - `x0` = distance from shear centre to centroid along the symmetry axis
//! - `Cw` = warping constant, `J` = St. Venant torsion constant
//!
//! ## References
//!
//! - ASCE-8 Section 3.4.2: Flexural buckling
//! - ASCE-8 Section 3.4.3: Torsional and flexural-torsional buckling
//! - ASCE-8 Section 3.3.1.2: Lateral buckling strength
//! - ASCE-8 Section 3.3.2: Shear buckling

use std::f64::consts::PI;

// =============================================================================
// SECTION GEOMETRY HELPERS
// =============================================================================

/// Polar radius of gyration about the shear centre
///
/// # Formula
/// r0 = √(rx² + ry² + x0²)
#[inline]
pub fn polar_radius_of_gyration(rx: f64, ry: f64, x0: f64) -> f64 {
    (rx * rx + ry * ry + x0 * x0).sqrt()
}

/// Interaction factor for flexural-torsional buckling
///
/// # Formula
/// β = 1 − (x0/r0)²
#[inline]
pub fn ftb_beta(x0: f64, r0: f64) -> f64 {
    1.0 - (x0 / r0).powi(2)
}

// =============================================================================
// COLUMN BUCKLING
// =============================================================================

/// Euler flexural buckling stress per unit η (ASCE-8 Eq. 3.4.2-1)
///
/// # Formula
/// σe/η = π²·E0 / (KL/r)²
///
/// # Example
/// ```rust
/// use stainless_core::equations::buckling::flexural;
///
/// // KL/r = 100
/// let ff = flexural(27000.0, 100.0, 1.0);
/// assert!((ff - 26.65).abs() < 0.01);
/// ```
#[inline]
pub fn flexural(e0: f64, kl: f64, r: f64) -> f64 {
    PI * PI * e0 / (kl / r).powi(2)
}

/// Torsional buckling stress per unit η (ASCE-8 Eq. 3.4.3-3)
///
/// # Formula
/// σt/η = (1/(A·r0²))·(G0·J + π²·E0·Cw/(Kt·Lt)²)
#[inline]
pub fn torsional(area: f64, r0: f64, g0: f64, j: f64, e0: f64, cw: f64, kt_lt: f64) -> f64 {
    (g0 * j + PI * PI * e0 * cw / kt_lt.powi(2)) / (area * r0 * r0)
}

/// Flexural-torsional buckling stress per unit η (ASCE-8 Eq. 3.4.3-1)
///
/// Both `sigma_ex` and `sigma_t` must already be per unit η.
///
/// # Formula
/// F/η = (1/2β)·[(σex + σt) − √((σex + σt)² − 4β·σex·σt)]
#[inline]
pub fn flexural_torsional(sigma_ex: f64, sigma_t: f64, beta: f64) -> f64 {
    let sum = sigma_ex + sigma_t;
    let disc = (sum * sum - 4.0 * beta * sigma_ex * sigma_t).max(0.0);
    (sum - disc.sqrt()) / (2.0 * beta)
}

/// Elastic buckling load per unit η for the axial-bending amplification
///
/// # Formula
/// PE/η = π²·E0·I / (KL)²
#[inline]
pub fn euler_load(e0: f64, i: f64, kl: f64) -> f64 {
    PI * PI * e0 * i / kl.powi(2)
}

// =============================================================================
// LATERAL BUCKLING
// =============================================================================

/// Lateral buckling moment per unit η of a doubly-symmetric I (ASCE-8 Eq. 3.3.1.2-8)
///
/// # Formula
/// Mc/η = π²·E0·Cb·d·Iyc / L²
///
/// # Arguments
/// * `d` - Depth of section
/// * `iyc` - Moment of inertia of the compression portion about the web axis (Iy/2)
/// * `l` - Unbraced length
#[inline]
pub fn lateral_moment_i(e0: f64, cb: f64, d: f64, iyc: f64, l: f64) -> f64 {
    PI * PI * e0 * cb * d * iyc / (l * l)
}

/// Lateral buckling moment per unit η of a singly-symmetric section bent
/// about the symmetry axis (ASCE-8 Eq. 3.3.1.2-9)
///
/// # Formula
/// Mc/η = Cb·r0·A·√(σey·σt)
#[inline]
pub fn lateral_moment_singly_symmetric(cb: f64, r0: f64, area: f64, sigma_ey: f64, sigma_t: f64) -> f64 {
    cb * r0 * area * (sigma_ey * sigma_t).sqrt()
}

// =============================================================================
// SHEAR BUCKLING
// =============================================================================

/// Shear buckling stress per unit η of an unreinforced web (ASCE-8 Eq. 3.3.2-1)
///
/// The code gives `Vn/η = 4.84·E0·t³/h`; dividing by the web area `h·t`
/// leaves a stress.
///
/// # Formula
/// τ/η = 4.84·E0·(t/h)²
#[inline]
pub fn shear(e0: f64, t: f64, h: f64) -> f64 {
    4.84 * e0 * (t / h).powi(2)
}
