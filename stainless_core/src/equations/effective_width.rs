//! # Effective Width of Compression Elements
//!
//! Thin plate elements in compression buckle locally well before the section
//! fails. ASCE-8 Section 2 accounts for this by replacing the flat width `w`
//! with a reduced effective width `b`:
//!
//! ```text
//! λ = (1.052/√k)·(w/t)·√(f/E)
//! ρ = 1                      for λ ≤ 0.673
//! ρ = (1 − 0.22/λ)/λ ≤ 1     for λ > 0.673
//! b = ρ·w
//! ```
//!
//! The four element families differ only in how the plate buckling
//! coefficient `k` is found and how the width is distributed:
//!
//! | Family            | Section  | k                                  |
//! |-------------------|----------|------------------------------------|
//! | Stiffened         | 2.2.1    | 4.0                                |
//! | Unstiffened       | 2.3.1    | 0.5                                |
//! | Stress gradient   | 2.2.2    | 4 + 2(1−ψ)³ + 2(1−ψ)               |
//! | Edge stiffened    | 2.4.2    | C2ⁿ(ka − 0.43) + 0.43              |
//!
//! Every function returns its intermediate values so results can be traced
//! and tested, see [`EffectiveWidthResult`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Slenderness below which an element is fully effective
pub const LAMBDA_LIMIT: f64 = 0.673;

/// Plate buckling coefficient for elements stiffened on both edges
pub const K_STIFFENED: f64 = 4.0;

/// Plate buckling coefficient for unstiffened elements (stainless value)
pub const K_UNSTIFFENED: f64 = 0.5;

/// Stress ratio at or below which the compression portion is split evenly
pub const PSI_SPLIT: f64 = -0.236;

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Uniformly compressed element (stiffened or unstiffened)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformWidth {
    /// Flat width
    pub w: f64,
    /// Compressive stress used
    pub f: f64,
    /// Plate buckling coefficient
    pub k: f64,
    /// Slenderness factor λ
    pub lambda: f64,
    /// Reduction factor ρ
    pub rho: f64,
    /// Effective width b
    pub b: f64,
}

/// Stiffened element under a linear stress gradient (typically a web)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientWidth {
    /// Flat width
    pub w: f64,
    /// Compressive stress at the more compressed edge
    pub f1: f64,
    /// Stress at the other edge (negative for tension)
    pub f2: f64,
    /// ψ = f2/f1
    pub psi: f64,
    pub k: f64,
    pub lambda: f64,
    pub rho: f64,
    /// Effective width of the whole element computed at f1
    pub be: f64,
    /// Effective portion adjacent to the compression edge
    pub b1: f64,
    /// Effective portion adjacent to the neutral axis side
    pub b2: f64,
}

/// Regime of an edge-stiffened element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeStiffenerCase {
    /// w/t ≤ S/3: stiffener not needed, flange fully effective
    I,
    /// S/3 < w/t < S
    II,
    /// w/t ≥ S
    III,
}

/// Geometry of the stiffener along the free edge of a flange
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EdgeStiffener {
    /// Simple lip bent at `theta_deg` from the flange
    SimpleLip {
        /// Flat width of the lip
        d: f64,
        /// Outside bend radius between flange and lip
        r_out: f64,
        /// Lip angle (degrees), 90 for a right-angle lip
        theta_deg: f64,
    },
    /// Any other stiffener with known properties
    Other {
        /// Overall stiffener depth D
        depth: f64,
        /// Moment of inertia of the full stiffener about its own centroid
        is: f64,
        /// Effective area of the stiffener As'
        area: f64,
    },
}

/// Edge-stiffened element (lipped flange)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeStiffenedWidth {
    pub case: EdgeStiffenerCase,
    /// S = 1.28·√(E/f)
    pub s_limit: f64,
    /// Overall stiffener depth D
    pub depth: f64,
    /// Actual stiffener moment of inertia
    pub is: f64,
    /// Required stiffener moment of inertia
    pub ia: f64,
    /// C2 = min(1, Is/Ia)
    pub c2: f64,
    /// Edge-stiffened buckling coefficient before blending
    pub ka: f64,
    /// Flange result with the blended k
    pub flange: UniformWidth,
    /// Lip effective width as an unstiffened element (simple lips only)
    pub ds_prime: f64,
    /// Reduced lip width ds = C2·ds' (simple lips only)
    pub ds: f64,
    /// Reduced stiffener area As = C2·As'
    pub area: f64,
}

/// Tagged result of an effective width calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum EffectiveWidthResult {
    Stiffened(UniformWidth),
    Unstiffened(UniformWidth),
    Gradient(GradientWidth),
    EdgeStiffened(EdgeStiffenedWidth),
}

impl EffectiveWidthResult {
    /// Flat width the calculation started from
    pub fn flat_width(&self) -> f64 {
        match self {
            EffectiveWidthResult::Stiffened(r) | EffectiveWidthResult::Unstiffened(r) => r.w,
            EffectiveWidthResult::Gradient(r) => r.w,
            EffectiveWidthResult::EdgeStiffened(r) => r.flange.w,
        }
    }

    /// Total effective width (b1 + b2 for gradient elements)
    pub fn effective_width(&self) -> f64 {
        match self {
            EffectiveWidthResult::Stiffened(r) | EffectiveWidthResult::Unstiffened(r) => r.b,
            EffectiveWidthResult::Gradient(r) => r.b1 + r.b2,
            EffectiveWidthResult::EdgeStiffened(r) => r.flange.b,
        }
    }

    pub fn lambda(&self) -> f64 {
        match self {
            EffectiveWidthResult::Stiffened(r) | EffectiveWidthResult::Unstiffened(r) => r.lambda,
            EffectiveWidthResult::Gradient(r) => r.lambda,
            EffectiveWidthResult::EdgeStiffened(r) => r.flange.lambda,
        }
    }

    pub fn rho(&self) -> f64 {
        match self {
            EffectiveWidthResult::Stiffened(r) | EffectiveWidthResult::Unstiffened(r) => r.rho,
            EffectiveWidthResult::Gradient(r) => r.rho,
            EffectiveWidthResult::EdgeStiffened(r) => r.flange.rho,
        }
    }
}

// =============================================================================
// SLENDERNESS AND REDUCTION FACTOR
// =============================================================================

/// Slenderness factor λ (ASCE-8 Eq. 2.2.1-4)
///
/// # Formula
/// λ = (1.052/√k)·(w/t)·√(f/E)
#[inline]
pub fn slenderness(w: f64, t: f64, f: f64, e: f64, k: f64) -> f64 {
    1.052 / k.sqrt() * (w / t) * (f / e).sqrt()
}

/// Reduction factor ρ (ASCE-8 Eq. 2.2.1-3)
///
/// The closed form slightly exceeds 1 just above λ = 0.673, so it is capped
/// to keep ρ continuous across the limit.
///
/// # Example
/// ```rust
/// use stainless_core::equations::effective_width::reduction_factor;
///
/// assert_eq!(reduction_factor(0.5), 1.0);
/// assert!((reduction_factor(0.83) - 0.885).abs() < 1e-3);
/// ```
#[inline]
pub fn reduction_factor(lambda: f64) -> f64 {
    if lambda <= LAMBDA_LIMIT {
        1.0
    } else {
        ((1.0 - 0.22 / lambda) / lambda).min(1.0)
    }
}

fn check_plate(w: f64, t: f64, f: f64, e: f64) -> CalcResult<()> {
    if !(w > 0.0) {
        return Err(CalcError::invalid_input("w", w.to_string(), "Flat width must be positive"));
    }
    if !(t > 0.0) {
        return Err(CalcError::invalid_input("t", t.to_string(), "Thickness must be positive"));
    }
    if !(e > 0.0) {
        return Err(CalcError::invalid_input("E", e.to_string(), "Modulus must be positive"));
    }
    if !(f >= 0.0) || !f.is_finite() {
        return Err(CalcError::invalid_input("f", f.to_string(), "Compressive stress must be non-negative"));
    }
    Ok(())
}

fn uniform(w: f64, t: f64, f: f64, e: f64, k: f64) -> CalcResult<UniformWidth> {
    check_plate(w, t, f, e)?;
    if !(k > 0.0) {
        return Err(CalcError::invalid_input("k", k.to_string(), "Plate buckling coefficient must be positive"));
    }
    let lambda = slenderness(w, t, f, e, k);
    let rho = reduction_factor(lambda);
    Ok(UniformWidth {
        w,
        f,
        k,
        lambda,
        rho,
        b: rho * w,
    })
}

// =============================================================================
// ELEMENT FAMILIES
// =============================================================================

/// Uniformly compressed stiffened element (ASCE-8 2.2.1)
///
/// # Arguments
/// * `w` - Flat width
/// * `t` - Thickness
/// * `f` - Compressive stress in the element
/// * `e` - Initial modulus E0
/// * `k` - Plate buckling coefficient (4.0 unless a gradient or stiffener applies)
///
/// # Example
/// ```rust
/// use stainless_core::equations::effective_width::stiffened;
///
/// let r = stiffened(50.0, 1.0, 200.0, 200000.0, 4.0)?;
/// assert!((r.b - 44.22).abs() < 0.01);
/// # Ok::<(), stainless_core::errors::CalcError>(())
/// ```
pub fn stiffened(w: f64, t: f64, f: f64, e: f64, k: f64) -> CalcResult<UniformWidth> {
    uniform(w, t, f, e, k)
}

/// Uniformly compressed unstiffened element (ASCE-8 2.3.1)
pub fn unstiffened(w: f64, t: f64, f: f64, e: f64, k: f64) -> CalcResult<UniformWidth> {
    uniform(w, t, f, e, k)
}

/// Stiffened element with a stress gradient (ASCE-8 2.2.2)
///
/// # Formula
/// ```text
/// ψ  = f2/f1
/// k  = 4 + 2(1−ψ)³ + 2(1−ψ)
/// b1 = be/(3−ψ)
/// b2 = be/2          for ψ ≤ −0.236
/// b2 = be − b1       for ψ > −0.236
/// ```
///
/// # Arguments
/// * `f1` - Compressive stress at the more compressed edge (> 0)
/// * `f2` - Stress at the other edge, negative in tension, `f2 ≤ f1`
pub fn stress_gradient(w: f64, t: f64, f1: f64, f2: f64, e: f64) -> CalcResult<GradientWidth> {
    check_plate(w, t, f1, e)?;
    if !(f1 > 0.0) {
        return Err(CalcError::invalid_input("f1", f1.to_string(), "Edge stress f1 must be compressive"));
    }
    if !(f2 <= f1) {
        return Err(CalcError::invalid_input("f2", f2.to_string(), "f2 must not exceed f1"));
    }

    let psi = f2 / f1;
    let k = 4.0 + 2.0 * (1.0 - psi).powi(3) + 2.0 * (1.0 - psi);
    let lambda = slenderness(w, t, f1, e, k);
    let rho = reduction_factor(lambda);
    let be = rho * w;

    let b1 = be / (3.0 - psi);
    let b2 = if psi <= PSI_SPLIT { be / 2.0 } else { be - b1 };

    Ok(GradientWidth {
        w,
        f1,
        f2,
        psi,
        k,
        lambda,
        rho,
        be,
        b1,
        b2,
    })
}

/// Uniformly compressed element with an edge stiffener (ASCE-8 2.4.2)
///
/// # Formula
/// ```text
/// S  = 1.28·√(E/f)
/// Case I   (w/t ≤ S/3):   Ia = 0, b = w
/// Case II  (S/3 < w/t < S): n = 1/2, Ia = 399·t⁴·(w/t/S − √(0.43/4))³
/// Case III (w/t ≥ S):     n = 1/3, Ia = t⁴·(115·(w/t)/S + 5)
/// C2 = min(1, Is/Ia)
/// k  = C2ⁿ·(ka − 0.43) + 0.43
/// ```
///
/// With a simple lip `ka = min(4, 5.25 − 5·D/w)`, `Is = d³·t·sinθ/12` and the
/// lip is reduced to `ds = C2·ds'`, where `ds'` is the lip's own unstiffened
/// effective width.
///
/// # Errors
/// `InvalidInput` when `D/w > 0.8`, or a simple lip angle is outside 40°–140°.
pub fn edge_stiffened(w: f64, t: f64, f: f64, e: f64, stiffener: &EdgeStiffener) -> CalcResult<EdgeStiffenedWidth> {
    check_plate(w, t, f, e)?;

    let (depth, is, area_prime, ds_prime, ka) = match *stiffener {
        EdgeStiffener::SimpleLip { d, r_out, theta_deg } => {
            if !(40.0..=140.0).contains(&theta_deg) {
                return Err(CalcError::invalid_input(
                    "theta",
                    theta_deg.to_string(),
                    "Simple lip angle must be between 40 and 140 degrees",
                ));
            }
            if !(d > 0.0) {
                return Err(CalcError::invalid_input("d", d.to_string(), "Lip flat width must be positive"));
            }
            let theta = theta_deg.to_radians();
            let depth = d + r_out * (1.0 - theta.cos()) / theta.sin();
            let is = d.powi(3) * t * theta.sin() / 12.0;
            let lip = unstiffened(d, t, f, e, K_UNSTIFFENED)?;
            let ka = (5.25 - 5.0 * depth / w).min(4.0);
            (depth, is, lip.b * t, lip.b, ka)
        }
        EdgeStiffener::Other { depth, is, area } => (depth, is, area, 0.0, 4.0),
    };

    if depth / w > 0.8 {
        return Err(CalcError::invalid_input(
            "D/w",
            format!("{:.3}", depth / w),
            "Edge stiffener depth ratio D/w exceeds 0.8",
        ));
    }

    let s_limit = 1.28 * (e / f.max(f64::MIN_POSITIVE)).sqrt();
    let slender = w / t;

    if slender <= s_limit / 3.0 {
        let lambda = slenderness(w, t, f, e, K_STIFFENED);
        return Ok(EdgeStiffenedWidth {
            case: EdgeStiffenerCase::I,
            s_limit,
            depth,
            is,
            ia: 0.0,
            c2: 1.0,
            ka,
            flange: UniformWidth {
                w,
                f,
                k: K_STIFFENED,
                lambda,
                rho: 1.0,
                b: w,
            },
            ds_prime,
            ds: ds_prime,
            area: area_prime,
        });
    }

    let (case, n, ia) = if slender < s_limit {
        let ia = 399.0 * t.powi(4) * (slender / s_limit - (0.43f64 / 4.0).sqrt()).powi(3);
        (EdgeStiffenerCase::II, 0.5, ia)
    } else {
        let ia = t.powi(4) * (115.0 * slender / s_limit + 5.0);
        (EdgeStiffenerCase::III, 1.0 / 3.0, ia)
    };

    let c2 = if ia > 0.0 { (is / ia).min(1.0) } else { 1.0 };
    let k = c2.powf(n) * (ka - 0.43) + 0.43;
    let flange = stiffened(w, t, f, e, k)?;

    Ok(EdgeStiffenedWidth {
        case,
        s_limit,
        depth,
        is,
        ia,
        c2,
        ka,
        flange,
        ds_prime,
        ds: c2 * ds_prime,
        area: c2 * area_prime,
    })
}
