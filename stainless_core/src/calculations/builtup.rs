//! # I-Sections Built From Two Channels (ASCE-8 4.1.1)
//!
//! Maximum longitudinal spacing of the welds or fasteners joining the two
//! channels:
//!
//! ```text
//! compression members:  s_max = L·r_cy/(2·r_I)
//! flexural members:     s_max = min(L/6, 2g·Ts/(m·q))
//! concentrated load P:  Ts ≥ P·m/(2g)
//! ```
//!
//! - `r_I` = minimum radius of gyration of one channel
//! - `r_cy` = radius of gyration of the I about the axis perpendicular to the web
//! - `g` = vertical distance between the connector rows nearest the flanges
//! - `m` = distance from the shear centre of one channel to its web mid-plane
//! - `q` = design load per unit length
//!
//! The connected I behaves as one member in compression only if the
//! channels themselves do not buckle between connectors; the y-axis
//! slenderness is raised to
//!
//! ```text
//! (KL/r)m = √((KL/r)o² + (a/r_I)²)
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::asce8_ref;
use crate::errors::{CalcError, CalcResult};
use crate::member::Member;
use crate::section::{GeometryProvider, ProfileShape, ThinWallProvider};

/// Modified slenderness of a built-up member with connectors at spacing `a`
///
/// # Example
/// ```rust
/// use stainless_core::calculations::builtup::modified_slenderness;
///
/// let kl_r = modified_slenderness(60.0, 16.0, 0.2)?;
/// assert!((kl_r - 100.0).abs() < 1e-9);
/// # Ok::<(), stainless_core::errors::CalcError>(())
/// ```
pub fn modified_slenderness(kl_r: f64, a: f64, ri: f64) -> CalcResult<f64> {
    if !(ri > 0.0) {
        return Err(CalcError::invalid_input("r_I", ri.to_string(), "Channel radius of gyration must be positive"));
    }
    if !(a > 0.0) {
        return Err(CalcError::invalid_input("a", a.to_string(), "Connector spacing must be positive"));
    }
    Ok((kl_r * kl_r + (a / ri).powi(2)).sqrt())
}

/// Distance from the shear centre of one channel to the mid-plane of its web
pub fn channel_shear_centre_distance(shape: &ProfileShape) -> CalcResult<f64> {
    let channel = ThinWallProvider.section_properties(&shape.channel())?;
    Ok(channel.sc_x.abs())
}

/// Connection strength needed under a concentrated load `p`
#[inline]
pub fn required_connection_strength(p: f64, m: f64, g: f64) -> f64 {
    p * m / (2.0 * g)
}

/// Connection between the two channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Vertical distance between the connector rows nearest the flanges
    pub g: f64,
    /// Design tension strength of one connector
    pub ts: f64,
    /// Design load per unit length (flexural members)
    pub q: Option<f64>,
    /// Largest concentrated load or reaction
    pub concentrated: Option<f64>,
}

/// Spacing limits of a built-up I
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltUpResult {
    /// Shear centre distance m
    pub m: f64,
    pub s_max_compression: f64,
    pub s_max_flexure: Option<f64>,
    /// Governing maximum spacing
    pub s_max: f64,
    /// Connection strength needed for the concentrated load
    pub ts_required: Option<f64>,
    /// Spacing actually used, from the design parameters
    pub spacing: Option<f64>,
    pub code_ref: String,
}

impl BuiltUpResult {
    pub fn passes(&self) -> bool {
        self.spacing.map_or(true, |s| s <= self.s_max)
    }

    /// Connector strength over the strength needed for the concentrated load
    pub fn connection_ratio(&self, ts: f64) -> Option<f64> {
        self.ts_required.map(|req| req / ts)
    }
}

/// Connector spacing limits of a built-up I member.
pub fn calculate(member: &Member, connection: &Connection) -> CalcResult<BuiltUpResult> {
    if !member.profile.is_built_up() {
        return Err(CalcError::invalid_input(
            "profile",
            member.profile.shape.type_name(),
            "Connection spacing applies to I-sections built from two channels",
        ));
    }
    if !(connection.g > 0.0) {
        return Err(CalcError::invalid_input("g", connection.g.to_string(), "Row distance must be positive"));
    }
    if !(connection.ts > 0.0) {
        return Err(CalcError::invalid_input("Ts", connection.ts.to_string(), "Connection strength must be positive"));
    }

    let props = member.profile.properties();
    let ri = props
        .ri
        .ok_or_else(|| CalcError::invalid_input("r_I", "None", "Built-up section needs the channel radius of gyration"))?;

    let m = channel_shear_centre_distance(&member.profile.shape)?;
    let l = member.length;
    let s_max_compression = l * props.ry / (2.0 * ri);

    let s_max_flexure = match connection.q {
        Some(q) if q > 0.0 => Some(f64::min(l / 6.0, 2.0 * connection.g * connection.ts / (m * q))),
        Some(q) if q < 0.0 => {
            return Err(CalcError::invalid_input("q", q.to_string(), "Load intensity cannot be negative"));
        }
        _ => None,
    };

    let s_max = s_max_flexure.map_or(s_max_compression, |s| s.min(s_max_compression));
    let ts_required = connection
        .concentrated
        .map(|p| required_connection_strength(p, m, connection.g));

    Ok(BuiltUpResult {
        m,
        s_max_compression,
        s_max_flexure,
        s_max,
        ts_required,
        spacing: member.params.connector_spacing,
        code_ref: asce8_ref::BUILT_UP.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Steel;
    use crate::member::DesignParameters;
    use crate::section::Profile;
    use crate::units::UnitSystem;
    use approx::assert_relative_eq;

    fn member(spacing: Option<f64>) -> Member {
        let shape = ProfileShape::BuiltUpI { h: 6.0, b: 1.625, t: 0.06, r_out: 0.15375 };
        let steel = Steel::new("SA301", 50.0, 27000.0, 0.3, 4.58, 0.002).unwrap();
        let params = DesignParameters {
            connector_spacing: spacing,
            ..DesignParameters::default()
        };
        Member::new(Profile::new("I6", shape).unwrap(), steel, params, 120.0, UnitSystem::Imperial).unwrap()
    }

    fn connection(q: Option<f64>) -> Connection {
        Connection {
            g: 4.0,
            ts: 1.2,
            q,
            concentrated: Some(2.0),
        }
    }

    #[test]
    fn test_plain_channel_shear_centre_distance() {
        // wf²/(2wf + d/3) with centreline dimensions
        let (a, b) = (6.0 - 0.06, 1.625 - 0.06);
        let expected = 3.0 * b * b / (6.0 * b + a);
        let m = channel_shear_centre_distance(&ProfileShape::BuiltUpI { h: 6.0, b: 1.625, t: 0.06, r_out: 0.15375 }).unwrap();
        assert_relative_eq!(m, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_compression_spacing() {
        let member = member(Some(12.0));
        let r = calculate(&member, &connection(None)).unwrap();
        let props = member.profile.properties();
        assert_relative_eq!(r.s_max_compression, 120.0 * props.ry / (2.0 * props.ri.unwrap()));
        assert!(r.s_max_flexure.is_none());
        assert_eq!(r.s_max, r.s_max_compression);
        assert!(r.passes());
    }

    #[test]
    fn test_flexure_spacing_and_required_strength() {
        let member = member(Some(200.0));
        let r = calculate(&member, &connection(Some(0.05))).unwrap();
        let expected = f64::min(20.0, 2.0 * 4.0 * 1.2 / (r.m * 0.05));
        assert_relative_eq!(r.s_max_flexure.unwrap(), expected);
        assert_relative_eq!(r.ts_required.unwrap(), 2.0 * r.m / 8.0);
        assert!(!r.passes());
    }

    #[test]
    fn test_rejects_channel() {
        let mut m = member(None);
        m.profile = Profile::new("C6", ProfileShape::Channel { h: 6.0, b: 1.625, t: 0.06, r_out: 0.15375 }).unwrap();
        assert_eq!(calculate(&m, &connection(None)).unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_modified_slenderness_rejects_bad_input() {
        assert!(modified_slenderness(50.0, 0.0, 0.3).is_err());
        assert!(modified_slenderness(50.0, 10.0, 0.0).is_err());
    }
}
