//! # stainless CLI
//!
//! Command line front end for `stainless_core`. Checks one member, every
//! profile of a batch file, or every member of a saved project, and prints a
//! text or JSON report.
//!
//! ```text
//! stainless member --type c_profile_w_lps --h 6 --b 1.625 --d 0.45 --t 0.06 --r-out 0.15375 \
//!     --material SA301_1_4Hard --length 48 --mux 20 --vu 1
//! stainless batch profiles.json --material SA304_1_4Hard --length 3200 --pu 20000 --format json
//! stainless batch profiles.json --material SA304_1_4Hard --length 3200 --pu 20000 --save job.sdp
//! stainless project job.sdp
//! stainless materials
//! ```
//!
//! Set `RUST_LOG=debug` to trace the solvers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use stainless_core::analysis::{Analysis, AnalysisReport, Demands};
use stainless_core::calculations::web_crippling::LoadLocation;
use stainless_core::file_io::{load_profile_batch, load_project_with_lock_check, save_members};
use stainless_core::materials::catalog;
use stainless_core::member::{DesignParameters, Member};
use stainless_core::project::DesignMember;
use stainless_core::section::{Profile, ProfileShape};
use stainless_core::units::UnitSystem;

#[derive(Debug, Parser)]
#[command(name = "stainless", version, about = "ASCE-8 cold-formed stainless steel member checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a single member
    Member {
        #[command(flatten)]
        shape: ShapeArgs,
        #[command(flatten)]
        design: DesignArgs,
    },
    /// Check every profile of a batch file
    Batch {
        /// Batch-profile JSON file
        file: PathBuf,
        #[command(flatten)]
        design: DesignArgs,
    },
    /// Check every member of a saved project
    Project {
        /// Project file (.sdp)
        file: PathBuf,
    },
    /// List the material catalog
    Materials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShapeType {
    #[value(name = "c_profile")]
    Channel,
    #[value(name = "c_profile_w_lps")]
    LippedChannel,
    #[value(name = "i_profile")]
    BuiltUpI,
    #[value(name = "i_profile_w_lps")]
    LippedBuiltUpI,
}

#[derive(Debug, Args)]
struct ShapeArgs {
    /// Profile name used in the report
    #[arg(long, default_value = "member")]
    name: String,
    #[arg(long = "type", value_enum)]
    shape_type: ShapeType,
    /// Overall depth H
    #[arg(long)]
    h: f64,
    /// Overall flange width B
    #[arg(long)]
    b: f64,
    /// Overall lip depth D
    #[arg(long)]
    d: Option<f64>,
    /// Thickness
    #[arg(long)]
    t: f64,
    /// Outside bend radius
    #[arg(long)]
    r_out: f64,
}

impl ShapeArgs {
    fn shape(&self) -> Result<ProfileShape> {
        let (h, b, t, r_out) = (self.h, self.b, self.t, self.r_out);
        let lip = || self.d.context("--d is required for lipped profiles");
        Ok(match self.shape_type {
            ShapeType::Channel => ProfileShape::Channel { h, b, t, r_out },
            ShapeType::LippedChannel => ProfileShape::LippedChannel { h, b, d: lip()?, t, r_out },
            ShapeType::BuiltUpI => ProfileShape::BuiltUpI { h, b, t, r_out },
            ShapeType::LippedBuiltUpI => ProfileShape::LippedBuiltUpI { h, b, d: lip()?, t, r_out },
        })
    }
}

#[derive(Debug, Args)]
struct DesignArgs {
    /// Catalog material name
    #[arg(long, default_value = "SA301_1_4Hard")]
    material: String,
    /// Unit system, defaults to the material's; catalog stresses are converted
    #[arg(long, value_enum)]
    units: Option<UnitArg>,
    /// Member length
    #[arg(long)]
    length: f64,
    /// Design parameters JSON file; overrides --k and --cb
    #[arg(long)]
    params: Option<PathBuf>,
    /// Effective length factor for all buckling modes
    #[arg(long, default_value_t = 1.0)]
    k: f64,
    /// Moment gradient coefficient
    #[arg(long, default_value_t = 1.0)]
    cb: f64,
    /// Demands JSON file; overrides the demand flags
    #[arg(long)]
    demands: Option<PathBuf>,
    #[arg(long, default_value_t = 0.0)]
    pu: f64,
    #[arg(long, default_value_t = 0.0)]
    tu: f64,
    #[arg(long, default_value_t = 0.0)]
    mux: f64,
    #[arg(long, default_value_t = 0.0)]
    vu: f64,
    /// Concentrated load on the web
    #[arg(long, default_value_t = 0.0)]
    bearing_load: f64,
    /// Concentrated load at the member end
    #[arg(long)]
    at_end: bool,
    /// Add the checked members to this project file (.sdp)
    #[arg(long)]
    save: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum UnitArg {
    Imperial,
    Metric,
}

impl DesignArgs {
    fn units(&self) -> Result<UnitSystem> {
        Ok(match self.units {
            Some(UnitArg::Imperial) => UnitSystem::Imperial,
            Some(UnitArg::Metric) => UnitSystem::Metric,
            None => catalog::lookup_entry(&self.material)?.units,
        })
    }

    fn params(&self) -> Result<DesignParameters> {
        match &self.params {
            Some(path) => read_json(path),
            None => Ok(DesignParameters {
                kx: self.k,
                ky: self.k,
                kz: self.k,
                cb: self.cb,
                ..DesignParameters::default()
            }),
        }
    }

    fn demands(&self) -> Result<Demands> {
        match &self.demands {
            Some(path) => read_json(path),
            None => Ok(Demands {
                pu: self.pu,
                tu: self.tu,
                mux: self.mux,
                vu: self.vu,
                bearing_load: self.bearing_load,
                bearing_location: if self.at_end { LoadLocation::End } else { LoadLocation::Interior },
                ..Demands::default()
            }),
        }
    }

    fn member(&self, profile: Profile) -> Result<Member> {
        let units = self.units()?;
        let steel = catalog::lookup_in(&self.material, units)?;
        let member = Member::new(profile, steel, self.params()?, self.length, units)?;
        Ok(member)
    }
}

/// Lock holder name written to `.sdp.lock`
fn user_id() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "stainless".to_string())
}

fn save(path: Option<&Path>, members: Vec<DesignMember>) -> Result<()> {
    if let Some(path) = path {
        let project = save_members(path, &user_id(), members).with_context(|| format!("saving {}", path.display()))?;
        log::info!("{} now holds {} members", path.display(), project.member_count());
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

#[derive(Debug, Serialize)]
struct Labelled {
    id: String,
    report: AnalysisReport,
}

fn print_reports(reports: &[Labelled], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        Format::Text => {
            for r in reports {
                println!("[{}]", r.id);
                println!("{}", r.report.to_text());
            }
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<bool> {
    let reports = match cli.command {
        Command::Member { shape, design } => {
            let profile = Profile::new(shape.name.clone(), shape.shape()?)?;
            let member = design.member(profile)?;
            let demands = design.demands()?;
            let report = Analysis::new(&member).run(&demands)?;
            save(design.save.as_deref(), vec![DesignMember::new(shape.name.clone(), member, demands)])?;
            vec![Labelled { id: shape.name, report }]
        }
        Command::Batch { file, design } => {
            let batch = load_profile_batch(&file)?;
            let demands = design.demands()?;
            let mut reports = Vec::with_capacity(batch.len());
            let mut members = Vec::with_capacity(batch.len());
            for (id, spec) in &batch {
                let member = design.member(spec.to_profile()?)?;
                let report = Analysis::new(&member)
                    .run(&demands)
                    .with_context(|| format!("profile {} ({})", id, spec.name))?;
                members.push(DesignMember::new(format!("{}: {}", id, spec.name), member, demands));
                reports.push(Labelled { id: id.clone(), report });
            }
            save(design.save.as_deref(), members)?;
            reports
        }
        Command::Project { file } => {
            let (project, lock) = load_project_with_lock_check(&file)?;
            if let Some(lock) = lock {
                log::warn!("{} is open by {} on {}", file.display(), lock.user_id, lock.machine);
            }
            let mut reports = Vec::with_capacity(project.member_count());
            for (id, report) in project.analyze_all()? {
                let label = project.get_member(&id).map_or_else(|| id.to_string(), |m| m.label.clone());
                reports.push(Labelled { id: label, report });
            }
            reports
        }
        Command::Materials => {
            for e in catalog::entries() {
                let s = &e.steel;
                println!(
                    "{:<20} FY = {:>7} E0 = {:>8} n = {:>5} {:<8} {}",
                    s.name,
                    s.fy,
                    s.e0,
                    s.n,
                    e.units.stress_label(),
                    e.description
                );
            }
            return Ok(true);
        }
    };

    if reports.is_empty() {
        bail!("nothing to check");
    }
    print_reports(&reports, cli.format)?;
    Ok(reports.iter().all(|r| r.report.passes()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    if !run(cli)? {
        std::process::exit(1);
    }
    Ok(())
}
