//! # Member Analysis
//!
//! [`Analysis`] runs every applicable ASCE-8 check on a [`Member`] against
//! a set of factored [`Demands`] and collects the outcome in an
//! [`AnalysisReport`]: one [`LimitStateReport`] per check, the convergence
//! warnings raised along the way, and the dimensional-limit notes.
//!
//! Checks are independent; running the analysis twice gives the same report.
//! A fatal error in any check aborts the whole analysis.
//!
//! ## Example
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
//! let demands = Demands { mux: 20.0, vu: 1.0, ..Demands::default() };
//! let report = Analysis::new(&member).run(&demands)?;
//! assert!(report.limit_state("Bending").is_some());
//! println!("{}", report.to_text());
//! # Ok::<(), stainless_core::errors::CalcError>(())
//! ```

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::calculations::bending::{self, BendingResult};
use crate::calculations::builtup::{self, BuiltUpResult, Connection};
use crate::calculations::combined::{self, AxialBendingCapacity, AxialBendingDemand, InteractionResult};
use crate::calculations::compression::{self, CompressionResult, ModeLoad};
use crate::calculations::dimensional_limits::{self, DimensionalLimits};
use crate::calculations::shear::{self, ShearResult};
use crate::calculations::tension::{self, TensionResult};
use crate::calculations::web_crippling::{self, LoadLocation, WebCripplingResult};
use crate::equations::buckling;
use crate::errors::{CalcResult, ConvergenceWarning};
use crate::member::Member;

/// Factored demands on a member. Zero means "not loaded that way".
///
/// ## JSON Example
///
/// ```json
/// { "pu": 5.0, "mux": 20.0, "vu": 1.2, "bearing_load": 1.5, "bearing_location": "end" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Demands {
    /// Axial compression
    pub pu: f64,
    /// Axial tension
    pub tu: f64,
    /// Strong-axis moment
    pub mux: f64,
    /// Weak-axis moment
    pub muy: f64,
    /// Shear
    pub vu: f64,
    /// Concentrated load or reaction on the web
    pub bearing_load: f64,
    pub bearing_location: LoadLocation,
    /// Net area for tension, gross area when absent
    pub net_area: Option<f64>,
    /// Weak-axis design flexural strength, needed when `muy > 0`
    pub phi_mny: Option<f64>,
    /// Connection of a built-up I
    pub connection: Option<Connection>,
}

/// Labelled intermediate value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intermediate {
    pub label: String,
    pub value: f64,
}

/// One checked limit state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitStateReport {
    pub name: String,
    pub code_ref: String,
    /// Design strength, or the interaction limit
    pub capacity: f64,
    /// Factored demand, or the interaction value
    pub demand: f64,
    /// demand / capacity
    pub ratio: f64,
    /// Unit label of capacity and demand
    pub unit: String,
    pub intermediates: Vec<Intermediate>,
}

impl LimitStateReport {
    fn new(name: &str, code_ref: &str, capacity: f64, demand: f64, unit: &str) -> Self {
        LimitStateReport {
            name: name.to_string(),
            code_ref: code_ref.to_string(),
            capacity,
            demand,
            ratio: demand / capacity,
            unit: unit.to_string(),
            intermediates: Vec::new(),
        }
    }

    fn from_interaction(name: &str, r: &InteractionResult) -> Self {
        LimitStateReport::new(name, &r.code_ref, r.limit, r.value, "-")
    }

    fn with(mut self, label: &str, value: f64) -> Self {
        self.intermediates.push(Intermediate {
            label: label.to_string(),
            value,
        });
        self
    }

    pub fn passes(&self) -> bool {
        self.ratio <= 1.0
    }
}

/// Outcome of a member analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub member: String,
    pub profile_type: String,
    pub material: String,
    pub length: f64,
    pub length_unit: String,
    pub limit_states: Vec<LimitStateReport>,
    pub warnings: Vec<ConvergenceWarning>,
    pub notes: Vec<String>,
}

impl AnalysisReport {
    pub fn limit_state(&self, name: &str) -> Option<&LimitStateReport> {
        self.limit_states.iter().find(|l| l.name == name)
    }

    /// Limit state with the highest ratio
    pub fn governing(&self) -> Option<&LimitStateReport> {
        self.limit_states.iter().max_by(|a, b| a.ratio.total_cmp(&b.ratio))
    }

    pub fn passes(&self) -> bool {
        self.limit_states.iter().all(LimitStateReport::passes)
    }

    /// Plain-text report
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Member {} ({}), {}, L = {} {}",
            self.member, self.profile_type, self.material, self.length, self.length_unit
        );
        let _ = writeln!(out, "{}", "=".repeat(88));
        let _ = writeln!(
            out,
            "{:<28} {:>14} {:>14} {:>8} {:>7}  {}",
            "Limit state", "Capacity", "Demand", "Ratio", "Unit", "Reference"
        );
        let _ = writeln!(out, "{}", "-".repeat(88));
        for ls in &self.limit_states {
            let _ = writeln!(
                out,
                "{:<28} {:>14.4} {:>14.4} {:>8.3} {:>7}  {}{}",
                ls.name,
                ls.capacity,
                ls.demand,
                ls.ratio,
                ls.unit,
                ls.code_ref,
                if ls.passes() { "" } else { "  FAIL" }
            );
            for i in &ls.intermediates {
                let _ = writeln!(out, "    {:<24} {:>14.5}", i.label, i.value);
            }
        }
        let _ = writeln!(out, "{}", "-".repeat(88));
        if let Some(g) = self.governing() {
            let _ = writeln!(
                out,
                "Governing: {} (ratio {:.3}) - {}",
                g.name,
                g.ratio,
                if self.passes() { "OK" } else { "NOT OK" }
            );
        }
        for w in &self.warnings {
            let _ = writeln!(out, "Warning: {}", w);
        }
        for n in &self.notes {
            let _ = writeln!(out, "Note: {}", n);
        }
        out
    }
}

/// Analysis façade over one member
#[derive(Debug, Clone, Copy)]
pub struct Analysis<'a> {
    member: &'a Member,
}

impl<'a> Analysis<'a> {
    pub fn new(member: &'a Member) -> Self {
        Analysis { member }
    }

    pub fn member(&self) -> &Member {
        self.member
    }

    pub fn dimensional_limits(&self) -> CalcResult<DimensionalLimits> {
        dimensional_limits::calculate(self.member)
    }

    pub fn tension(&self, net_area: Option<f64>) -> CalcResult<TensionResult> {
        tension::calculate(self.member, net_area)
    }

    pub fn bending(&self) -> CalcResult<BendingResult> {
        bending::calculate(self.member)
    }

    pub fn shear(&self) -> CalcResult<ShearResult> {
        shear::calculate(self.member)
    }

    pub fn web_crippling(&self, location: LoadLocation) -> CalcResult<WebCripplingResult> {
        web_crippling::calculate(self.member, location)
    }

    pub fn compression(&self) -> CalcResult<CompressionResult> {
        compression::calculate(self.member)
    }

    pub fn compression_modes(&self) -> CalcResult<Vec<ModeLoad>> {
        compression::compression_modes(self.member)
    }

    pub fn builtup(&self, connection: &Connection) -> CalcResult<BuiltUpResult> {
        builtup::calculate(self.member, connection)
    }

    /// Run every check that applies to the member and demands.
    pub fn run(&self, demands: &Demands) -> CalcResult<AnalysisReport> {
        let member = self.member;
        let units = member.units;
        let (force, moment) = (units.force_label(), units.moment_label());
        let mut limit_states = Vec::new();
        let mut warnings = Vec::new();

        let limits = self.dimensional_limits()?;
        let mut notes = limits.notes.clone();

        let t = self.tension(demands.net_area)?;
        limit_states.push(
            LimitStateReport::new("Tension", &t.code_ref, t.phi_tn, demands.tu, force)
                .with("An", t.an)
                .with("Tn", t.tn),
        );

        let b = self.bending()?;
        warnings.extend(b.warnings.iter().cloned());
        limit_states.push(
            LimitStateReport::new("Bending", b.code_ref(), b.phi_mn, demands.mux, moment)
                .with("Se @ FY", b.nominal.se)
                .with("Mn nominal", b.nominal.mn)
                .with("phi nominal", b.nominal.phi)
                .with("Mc/eta", b.lateral.mc_eta)
                .with("Fc", b.lateral.fc)
                .with("Sc", b.lateral.sc)
                .with("Mn lateral", b.lateral.mn),
        );

        let v = self.shear()?;
        warnings.extend(v.warnings.iter().cloned());
        limit_states.push(
            LimitStateReport::new("Shear", &v.code_ref, v.phi_vn, demands.vu, force)
                .with("h/t", v.h / v.t)
                .with("tau", v.tau)
                .with("Vn", v.vn),
        );

        let c = self.compression()?;
        warnings.extend(c.warnings.iter().cloned());
        let mut axial = LimitStateReport::new("Compression", &c.code_ref, c.phi_pn, demands.pu, force);
        for m in &c.modes {
            axial = axial.with(&format!("Fn {}", m.mode.label()), m.fn_);
        }
        limit_states.push(axial.with("Ae", c.effective.area).with("Pn", c.pn));

        if demands.bearing_load > 0.0 {
            let w = self.web_crippling(demands.bearing_location)?;
            notes.extend(w.notes.iter().cloned());
            limit_states.push(
                LimitStateReport::new("Web crippling", &w.code_ref, w.phi_pn, demands.bearing_load, force)
                    .with("h/t", w.h_t)
                    .with("N/t", w.n_t)
                    .with("Pn", w.pn),
            );

            if demands.mux > 0.0 {
                let r = combined::bending_crippling(
                    demands.bearing_load,
                    demands.mux,
                    w.phi_pn,
                    b.nominal.phi_mn,
                    member.profile.is_built_up(),
                )?;
                limit_states.push(LimitStateReport::from_interaction("Bending + crippling", &r));
            }
        }

        if demands.mux > 0.0 && demands.vu > 0.0 {
            let r = combined::bending_shear(
                demands.mux,
                demands.vu,
                b.nominal.phi_mn,
                v.phi_vn,
                member.params.web_reinforcement,
            )?;
            limit_states.push(LimitStateReport::from_interaction("Bending + shear", &r));
        }

        if demands.pu > 0.0 && (demands.mux > 0.0 || demands.muy > 0.0) {
            let props = member.profile.properties();
            let p = &member.params;
            let capacity = AxialBendingCapacity {
                phi_pn: c.phi_pn,
                phi_pno: compression::PHI_COMPRESSION * compression::squash_strength(member)?,
                phi_mnx: b.phi_mn,
                phi_mny: demands.phi_mny,
                phi_c: compression::PHI_COMPRESSION,
                pex: buckling::euler_load(member.steel.e0, props.ix, p.kx * p.lx),
                pey: buckling::euler_load(member.steel.e0, props.iy, p.ky * p.ly),
                cm_x: p.cm_x,
                cm_y: p.cm_y,
            };
            let demand = AxialBendingDemand {
                pu: demands.pu,
                mux: demands.mux,
                muy: demands.muy,
            };
            let r = combined::axial_bending(&demand, &capacity)?;
            limit_states.push(
                LimitStateReport::from_interaction("Axial + bending", r.governing())
                    .with("P/phiPn", r.axial_ratio)
                    .with("alpha_nx", r.alpha_nx)
                    .with("alpha_ny", r.alpha_ny),
            );
        }

        if let (true, Some(conn)) = (member.profile.is_built_up(), demands.connection.as_ref()) {
            let r = self.builtup(conn)?;
            let spacing = r.spacing.unwrap_or(0.0);
            let mut ls = LimitStateReport::new("Connector spacing", &r.code_ref, r.s_max, spacing, units.length_label())
                .with("m", r.m)
                .with("s_max compression", r.s_max_compression);
            if let Some(s) = r.s_max_flexure {
                ls = ls.with("s_max flexure", s);
            }
            limit_states.push(ls);
            if let Some(ts_required) = r.ts_required {
                limit_states.push(LimitStateReport::new(
                    "Connection strength",
                    &r.code_ref,
                    conn.ts,
                    ts_required,
                    force,
                ));
            }
        }

        let report = AnalysisReport {
            member: member.profile.name.clone(),
            profile_type: member.profile.shape.type_name().to_string(),
            material: member.steel.name.clone(),
            length: member.length,
            length_unit: units.length_label().to_string(),
            limit_states,
            warnings,
            notes,
        };

        if let Some(g) = report.governing() {
            log::info!(
                "{}: governing {} (ratio {:.3}, {})",
                report.member,
                g.name,
                g.ratio,
                if report.passes() { "ok" } else { "fails" }
            );
        }
        Ok(report)
    }
}
