//! # Plasticity-Coupled Critical Stress Solver
//!
//! Elastic buckling stresses for stainless steel are reduced by a plasticity
//! factor η that depends on the buckling stress itself. Every buckling
//! formula in [`crate::equations::buckling`] is written "per unit η", giving
//! a coefficient `FF` such that the true critical stress `s*` satisfies
//!
//! ```text
//! s* = FF · η(s*)
//! ```
//!
//! This module solves that fixed point once, for every limit state, by
//! Newton-Raphson on `f(s) = s − FF·η(s)` with a forward-difference
//! derivative. Since η is non-increasing, `f` is strictly increasing with
//! `f(0) < 0 ≤ f(FF)`, so the root is always bracketed by `[0, FF]`. Newton
//! steps that leave the current bracket fall back to bisection, which keeps
//! steep materials (large n) from oscillating.
//!
//! ## Convergence
//!
//! - Start at `initial_guess_ratio · FY` (0.75·FY)
//! - Derivative step `ds = step_fraction · FY`, so the step scales with the
//!   stress units in use
//! - Converged when `|f(s)/s| < tolerance`
//! - After `max_iterations` updates the last iterate is returned together
//!   with a [`ConvergenceWarning`]
//!
//! The solver never clamps its answer. Callers apply `min(s, FY)` uniformly
//! through [`CriticalStress::clamped`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult, ConvergenceWarning, IterationKind};
use crate::materials::{PlasticityFactor, Steel};

/// Newton-Raphson settings for [`solve_critical_stress`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Relative residual |f(s)/s| accepted as converged
    pub tolerance: f64,
    /// Maximum Newton updates
    pub max_iterations: usize,
    /// Forward-difference step as a fraction of FY
    pub step_fraction: f64,
    /// Starting stress as a fraction of FY
    pub initial_guess_ratio: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            tolerance: 1e-3,
            max_iterations: 100,
            step_fraction: 1.0 / 5000.0,
            initial_guess_ratio: 0.75,
        }
    }
}

impl SolverSettings {
    /// Validate settings.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.tolerance > 0.0) {
            return Err(CalcError::invalid_input("tolerance", self.tolerance.to_string(), "Tolerance must be positive"));
        }
        if !(self.step_fraction > 0.0) {
            return Err(CalcError::invalid_input(
                "step_fraction",
                self.step_fraction.to_string(),
                "Derivative step must be positive",
            ));
        }
        if !(self.initial_guess_ratio > 0.0) {
            return Err(CalcError::invalid_input(
                "initial_guess_ratio",
                self.initial_guess_ratio.to_string(),
                "Initial guess must be positive",
            ));
        }
        Ok(())
    }
}

/// Self-consistent buckling stress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalStress {
    /// Elastic coefficient at η = 1
    pub ff: f64,
    /// Solved stress s* (unclamped)
    pub stress: f64,
    /// η(s*)
    pub eta: f64,
    /// Newton updates performed
    pub iterations: usize,
    /// Set when the iteration cap was reached
    pub warning: Option<ConvergenceWarning>,
}

impl CriticalStress {
    /// Whether the fixed point met the tolerance
    pub fn converged(&self) -> bool {
        self.warning.is_none()
    }

    /// Solved stress limited to the yield stress
    pub fn clamped(&self, fy: f64) -> f64 {
        self.stress.min(fy)
    }
}

/// Solve `s = FF·η(s)` for the given material and plasticity factor.
///
/// # Arguments
///
/// * `ff` - Elastic buckling stress evaluated with η = 1
/// * `steel` - Material supplying η(s)
/// * `factor` - Which modulus ratio defines η
/// * `settings` - Convergence settings
///
/// # Returns
///
/// * `Ok(CriticalStress)` - Best estimate, with `warning` set if not converged
/// * `Err(CalcError::InvalidInput)` - If `ff` is not a positive finite number
///
/// # Example
///
/// ```rust
/// use stainless_core::materials::{PlasticityFactor, Steel};
/// use stainless_core::solver::{solve_critical_stress, SolverSettings};
///
/// let steel = Steel::new("SA304", 337.0, 180510.0, 0.3, 13.5, 0.002)?;
/// let sol = solve_critical_stress(142.038, &steel, PlasticityFactor::Tangent, &SolverSettings::default())?;
/// assert!(sol.converged());
/// assert!((sol.stress - 142.0).abs() < 0.1);
/// # Ok::<(), stainless_core::errors::CalcError>(())
/// ```
pub fn solve_critical_stress(
    ff: f64,
    steel: &Steel,
    factor: PlasticityFactor,
    settings: &SolverSettings,
) -> CalcResult<CriticalStress> {
    if !(ff > 0.0) || !ff.is_finite() {
        return Err(CalcError::invalid_input(
            "FF",
            ff.to_string(),
            "Elastic buckling coefficient must be positive and finite",
        ));
    }
    settings.validate()?;

    let residual = |s: f64| s - ff * steel.eta(s, factor);
    let ds = steel.fy * settings.step_fraction;

    let mut s = settings.initial_guess_ratio * steel.fy;
    let mut iterations = 0;
    let (mut lo, mut hi) = (0.0, ff);

    loop {
        let f = residual(s);
        let rel = (f / s).abs();

        if rel < settings.tolerance {
            log::debug!("critical stress converged: FF = {:.4}, s = {:.4} after {} iterations", ff, s, iterations);
            return Ok(CriticalStress {
                ff,
                stress: s,
                eta: steel.eta(s, factor),
                iterations,
                warning: None,
            });
        }

        if iterations >= settings.max_iterations {
            let warning = ConvergenceWarning {
                kind: IterationKind::CriticalStress,
                context: String::new(),
                iterations,
                residual: rel,
                tolerance: settings.tolerance,
            };
            log::warn!("{}", warning);
            return Ok(CriticalStress {
                ff,
                stress: s,
                eta: steel.eta(s, factor),
                iterations,
                warning: Some(warning),
            });
        }

        if f < 0.0 {
            lo = f64::max(lo, s);
        } else {
            hi = f64::min(hi, s);
        }

        let slope = (residual(s + ds) - f) / ds;
        let next = s - f / slope;
        s = if next > lo && next < hi { next } else { 0.5 * (lo + hi) };
        iterations += 1;
        log::trace!("iteration {}: s = {:.6}, residual = {:.3e}", iterations, s, rel);
    }
}
