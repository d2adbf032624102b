//! Thin-wall centreline properties of channels and built-up I sections.
//!
//! Corners are taken as square and every element is represented by its
//! centreline, which is the usual hand-calculation model for cold-formed
//! sections (AISI Manual Part I, "linear method" with r = 0).
//!
//! Centreline dimensions of one channel:
//!
//! ```text
//! a = H − t        web
//! b = B − t        flange
//! c = D − t/2      lip (0 without lips)
//! ```

use super::{GeometryProvider, ProfileShape, SectionProperties};
use crate::errors::CalcResult;

/// Centreline thin-wall section property provider
#[derive(Debug, Clone, Copy, Default)]
pub struct ThinWallProvider;

impl GeometryProvider for ThinWallProvider {
    fn section_properties(&self, shape: &ProfileShape) -> CalcResult<SectionProperties> {
        shape.validate()?;
        let single = channel_properties(shape.h(), shape.b(), shape.d(), shape.t());
        if shape.is_built_up() {
            Ok(built_up_properties(&single, shape.h(), shape.b(), shape.t()))
        } else {
            Ok(single)
        }
    }
}

/// Channel (with or without lips) about its centroidal axes.
fn channel_properties(h: f64, b_out: f64, d_out: f64, t: f64) -> SectionProperties {
    let a = h - t;
    let b = b_out - t;
    let c = if d_out > 0.0 { d_out - t / 2.0 } else { 0.0 };

    let area = t * (a + 2.0 * b + 2.0 * c);
    let ix = 2.0 * t * (a.powi(3) / 24.0 + b * (a / 2.0).powi(2) + c.powi(3) / 12.0 + c * (a / 2.0 - c / 2.0).powi(2));

    // centroid from the web centreline
    let x_bar = t * (b * b + 2.0 * b * c) / area;
    let iy = 2.0 * t * (b.powi(3) / 12.0 + b * (b / 2.0 - x_bar).powi(2))
        + a * t * x_bar * x_bar
        + 2.0 * c * t * (b - x_bar).powi(2);

    let j = t.powi(3) / 3.0 * (a + 2.0 * b + 2.0 * c);

    // shear centre from the web centreline, on the side away from the flanges
    let m = b * t / (12.0 * ix) * (6.0 * c * a * a + 3.0 * b * a * a - 8.0 * c.powi(3));

    let cw = a * a * b * b * t / 12.0
        * (2.0 * a.powi(3) * b
            + 3.0 * a * a * b * b
            + 48.0 * c.powi(4)
            + 112.0 * b * c.powi(3)
            + 8.0 * a * c.powi(3)
            + 48.0 * a * b * c * c
            + 12.0 * a * a * c * c
            + 12.0 * a * a * b * c
            + 6.0 * a.powi(3) * c)
        / (6.0 * a * a * b + (a + 2.0 * c).powi(3) - 24.0 * a * c * c);

    let y_max = h / 2.0;
    let x_max = f64::max(x_bar + t / 2.0, b_out - t / 2.0 - x_bar);

    SectionProperties {
        area,
        ix,
        iy,
        j,
        cw,
        sx: ix / y_max,
        sy: iy / x_max,
        rx: (ix / area).sqrt(),
        ry: (iy / area).sqrt(),
        c_x: x_bar,
        sc_x: -m,
        x0: -(x_bar + m),
        y_max,
        x_max,
        ri: None,
    }
}

/// Two channels connected back to back through their webs.
fn built_up_properties(channel: &SectionProperties, h: f64, b_out: f64, t: f64) -> SectionProperties {
    let a = h - t;
    let area = 2.0 * channel.area;
    let ix = 2.0 * channel.ix;
    let offset = channel.c_x + t / 2.0;
    let iy = 2.0 * (channel.iy + channel.area * offset * offset);
    let x_max = b_out;

    SectionProperties {
        area,
        ix,
        iy,
        j: 2.0 * channel.j,
        cw: iy * a * a / 4.0,
        sx: ix / channel.y_max,
        sy: iy / x_max,
        rx: (ix / area).sqrt(),
        ry: (iy / area).sqrt(),
        c_x: 0.0,
        sc_x: 0.0,
        x0: 0.0,
        y_max: channel.y_max,
        x_max,
        ri: Some(channel.ry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn props(shape: ProfileShape) -> SectionProperties {
        ThinWallProvider.section_properties(&shape).unwrap()
    }

    #[test]
    fn test_plain_channel() {
        let p = props(ProfileShape::Channel { h: 6.0, b: 1.625, t: 0.06, r_out: 0.15375 });
        assert_relative_eq!(p.area, 0.5442, epsilon = 1e-9);
        assert_relative_eq!(p.ix, 2.704488, epsilon = 1e-5);
        assert_relative_eq!(p.iy, 0.113639, epsilon = 1e-5);
        assert_relative_eq!(p.x0, -0.749336, epsilon = 1e-5);
        assert_relative_eq!(p.cw, 0.731135, epsilon = 1e-5);
        assert!(p.ri.is_none());
    }

    #[test]
    fn test_plain_channel_warping_closed_form() {
        // c = 0 reduces to Cw = a²·b³·t·(2a + 3b) / (12·(6b + a))
        let (h, b_out, t) = (6.0, 1.625, 0.06);
        let (a, b) = (h - t, b_out - t);
        let p = props(ProfileShape::Channel { h, b: b_out, t, r_out: 0.15 });
        let expected = a * a * b.powi(3) * t * (2.0 * a + 3.0 * b) / (12.0 * (6.0 * b + a));
        assert_relative_eq!(p.cw, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_lipped_channel() {
        let p = props(ProfileShape::LippedChannel { h: 100.0, b: 50.0, d: 12.0, t: 1.5, r_out: 3.75 });
        assert_relative_eq!(p.area, 327.0, epsilon = 1e-9);
        assert_relative_eq!(p.rx, 40.5228, epsilon = 1e-3);
        assert_relative_eq!(p.ry, 18.4973, epsilon = 1e-3);
        assert_relative_eq!(p.x0, -39.0, epsilon = 0.01);
        assert_relative_eq!(p.cw, 2.27507e8, max_relative = 1e-4);
        assert_relative_eq!(p.j, 245.25, epsilon = 1e-9);
        assert_relative_eq!(p.sx, p.ix / 50.0);
    }

    #[test]
    fn test_built_up_i() {
        let channel = props(ProfileShape::LippedChannel { h: 6.0, b: 1.625, d: 0.45, t: 0.06, r_out: 0.15375 });
        let p = props(ProfileShape::LippedBuiltUpI { h: 6.0, b: 1.625, d: 0.45, t: 0.06, r_out: 0.15375 });
        assert_relative_eq!(p.area, 2.0 * channel.area);
        assert_relative_eq!(p.ix, 6.178312, epsilon = 1e-5);
        assert_relative_eq!(p.iy, 0.581695, epsilon = 1e-5);
        assert_relative_eq!(p.cw, 5.131071, epsilon = 1e-5);
        assert_eq!(p.x0, 0.0);
        assert_relative_eq!(p.ri.unwrap(), channel.ry);
        assert_relative_eq!(p.rx, channel.rx, max_relative = 1e-12);
    }
}
