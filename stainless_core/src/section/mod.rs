//! # Cold-Formed Profiles
//!
//! A [`Profile`] is an immutable cross-section: the nominal dimensions, the
//! table of flat plate elements used for effective widths, and the gross
//! section properties. Properties come from a [`GeometryProvider`]; the
//! bundled [`ThinWallProvider`] uses centreline thin-wall formulas, and
//! externally computed values can be attached with
//! [`Profile::with_properties`].
//!
//! ## Supported Shapes
//!
//! ```text
//!   c_profile      c_profile_w_lps     i_profile       i_profile_w_lps
//!   ┌────           ┌────┐             ────┬────       ┌────┬────┐
//!   │               │                      │               │
//!   │               │                      │               │
//!   └────           └────┘             ────┴────       └────┴────┘
//! ```
//!
//! I-profiles are two channels connected back to back through their webs.
//!
//! ## Element Table
//!
//! | Shape      | Flange                    | Web                 | Lip              |
//! |------------|---------------------------|---------------------|------------------|
//! | plain      | unstiffened, B − r_out    | stiffened, H − 2r   | -                |
//! | lipped     | edge stiffened, B − 2r    | stiffened, H − 2r   | unstiffened, D − r |

pub mod thin_wall;

pub use thin_wall::ThinWallProvider;

use serde::{Deserialize, Serialize};

use crate::equations::EdgeStiffener;
use crate::errors::{CalcError, CalcResult};

// =============================================================================
// ELEMENTS
// =============================================================================

/// Role of a flat element in the section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementName {
    Flange,
    Web,
    Lip,
}

/// Support condition of a flat element, selecting its effective width rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementClass {
    /// Supported along both longitudinal edges by webs
    Stiffened,
    /// Supported along one edge only
    Unstiffened,
    /// Supported by a web on one edge and an edge stiffener on the other
    EdgeStiffened,
}

/// Flat plate element of a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: ElementName,
    pub class: ElementClass,
    /// Flat width
    pub w: f64,
    /// Thickness
    pub t: f64,
    /// Number of identical elements in the whole section
    pub count: usize,
}

impl Element {
    /// Elements of this kind on the compression side in strong-axis bending
    pub fn compression_count(&self) -> usize {
        match self.name {
            ElementName::Web => self.count,
            ElementName::Flange | ElementName::Lip => self.count / 2,
        }
    }

    /// Flat width to thickness ratio
    pub fn slenderness(&self) -> f64 {
        self.w / self.t
    }
}

// =============================================================================
// SHAPES
// =============================================================================

/// Parametric profile dimensions.
///
/// Dimensions are outside-to-outside; `r_out` is the outside bend radius.
/// The JSON form matches the batch profile file:
///
/// ```json
/// { "type": "c_profile_w_lps", "H": 70, "B": 50, "D": 12, "t": 1.5, "r_out": 3.75 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProfileShape {
    /// Plain channel
    #[serde(rename = "c_profile")]
    Channel {
        #[serde(rename = "H")]
        h: f64,
        #[serde(rename = "B")]
        b: f64,
        t: f64,
        r_out: f64,
    },
    /// Channel with edge-stiffening lips
    #[serde(rename = "c_profile_w_lps")]
    LippedChannel {
        #[serde(rename = "H")]
        h: f64,
        #[serde(rename = "B")]
        b: f64,
        #[serde(rename = "D")]
        d: f64,
        t: f64,
        r_out: f64,
    },
    /// I built from two plain channels
    #[serde(rename = "i_profile")]
    BuiltUpI {
        #[serde(rename = "H")]
        h: f64,
        #[serde(rename = "B")]
        b: f64,
        t: f64,
        r_out: f64,
    },
    /// I built from two lipped channels
    #[serde(rename = "i_profile_w_lps")]
    LippedBuiltUpI {
        #[serde(rename = "H")]
        h: f64,
        #[serde(rename = "B")]
        b: f64,
        #[serde(rename = "D")]
        d: f64,
        t: f64,
        r_out: f64,
    },
}

impl ProfileShape {
    /// Overall depth H
    pub fn h(&self) -> f64 {
        match *self {
            ProfileShape::Channel { h, .. }
            | ProfileShape::LippedChannel { h, .. }
            | ProfileShape::BuiltUpI { h, .. }
            | ProfileShape::LippedBuiltUpI { h, .. } => h,
        }
    }

    /// Overall flange width B of one channel
    pub fn b(&self) -> f64 {
        match *self {
            ProfileShape::Channel { b, .. }
            | ProfileShape::LippedChannel { b, .. }
            | ProfileShape::BuiltUpI { b, .. }
            | ProfileShape::LippedBuiltUpI { b, .. } => b,
        }
    }

    /// Overall lip depth D (0 without lips)
    pub fn d(&self) -> f64 {
        match *self {
            ProfileShape::LippedChannel { d, .. } | ProfileShape::LippedBuiltUpI { d, .. } => d,
            _ => 0.0,
        }
    }

    /// Thickness
    pub fn t(&self) -> f64 {
        match *self {
            ProfileShape::Channel { t, .. }
            | ProfileShape::LippedChannel { t, .. }
            | ProfileShape::BuiltUpI { t, .. }
            | ProfileShape::LippedBuiltUpI { t, .. } => t,
        }
    }

    /// Outside bend radius
    pub fn r_out(&self) -> f64 {
        match *self {
            ProfileShape::Channel { r_out, .. }
            | ProfileShape::LippedChannel { r_out, .. }
            | ProfileShape::BuiltUpI { r_out, .. }
            | ProfileShape::LippedBuiltUpI { r_out, .. } => r_out,
        }
    }

    pub fn has_lips(&self) -> bool {
        matches!(self, ProfileShape::LippedChannel { .. } | ProfileShape::LippedBuiltUpI { .. })
    }

    pub fn is_built_up(&self) -> bool {
        matches!(self, ProfileShape::BuiltUpI { .. } | ProfileShape::LippedBuiltUpI { .. })
    }

    /// The single channel a built-up I is made of (itself for channels)
    pub fn channel(&self) -> ProfileShape {
        match *self {
            ProfileShape::BuiltUpI { h, b, t, r_out } => ProfileShape::Channel { h, b, t, r_out },
            ProfileShape::LippedBuiltUpI { h, b, d, t, r_out } => ProfileShape::LippedChannel { h, b, d, t, r_out },
            other => other,
        }
    }

    /// Type tag used in batch files
    pub fn type_name(&self) -> &'static str {
        match self {
            ProfileShape::Channel { .. } => "c_profile",
            ProfileShape::LippedChannel { .. } => "c_profile_w_lps",
            ProfileShape::BuiltUpI { .. } => "i_profile",
            ProfileShape::LippedBuiltUpI { .. } => "i_profile_w_lps",
        }
    }

    /// Validate dimensions.
    pub fn validate(&self) -> CalcResult<()> {
        let (h, b, d, t, r) = (self.h(), self.b(), self.d(), self.t(), self.r_out());
        for (field, value) in [("H", h), ("B", b), ("t", t), ("r_out", r)] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Dimension must be positive"));
            }
        }
        if r < t {
            return Err(CalcError::invalid_input(
                "r_out",
                r.to_string(),
                format!("Outside radius must be at least the thickness t = {}", t),
            ));
        }
        if h <= 2.0 * r {
            return Err(CalcError::invalid_input("H", h.to_string(), "Depth leaves no flat web between bends"));
        }
        let corners = if self.has_lips() { 2.0 } else { 1.0 };
        if b <= corners * r {
            return Err(CalcError::invalid_input("B", b.to_string(), "Width leaves no flat flange between bends"));
        }
        if self.has_lips() && d <= r {
            return Err(CalcError::invalid_input("D", d.to_string(), "Lip depth must exceed the outside radius"));
        }
        Ok(())
    }

    /// Flat element table
    pub fn elements(&self) -> Vec<Element> {
        let (h, b, d, t, r) = (self.h(), self.b(), self.d(), self.t(), self.r_out());
        let channels = if self.is_built_up() { 2 } else { 1 };

        let web = Element {
            name: ElementName::Web,
            class: ElementClass::Stiffened,
            w: h - 2.0 * r,
            t,
            count: channels,
        };

        if self.has_lips() {
            vec![
                Element {
                    name: ElementName::Flange,
                    class: ElementClass::EdgeStiffened,
                    w: b - 2.0 * r,
                    t,
                    count: 2 * channels,
                },
                web,
                Element {
                    name: ElementName::Lip,
                    class: ElementClass::Unstiffened,
                    w: d - r,
                    t,
                    count: 2 * channels,
                },
            ]
        } else {
            vec![
                Element {
                    name: ElementName::Flange,
                    class: ElementClass::Unstiffened,
                    w: b - r,
                    t,
                    count: 2 * channels,
                },
                web,
            ]
        }
    }
}

// =============================================================================
// SECTION PROPERTIES
// =============================================================================

/// Gross section properties.
///
/// Coordinates `c_x` and `sc_x` are measured from the web centreline of the
/// channel, positive towards the flange tips.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    pub area: f64,
    pub ix: f64,
    pub iy: f64,
    pub j: f64,
    pub cw: f64,
    pub sx: f64,
    pub sy: f64,
    pub rx: f64,
    pub ry: f64,
    /// Centroid position
    pub c_x: f64,
    /// Shear centre position
    pub sc_x: f64,
    /// Distance from centroid to shear centre, x0 = sc_x − c_x
    pub x0: f64,
    /// Extreme fibre distance for strong-axis bending
    pub y_max: f64,
    /// Extreme fibre distance for weak-axis bending
    pub x_max: f64,
    /// Minimum radius of gyration of one component channel (built-up I only)
    pub ri: Option<f64>,
}

impl SectionProperties {
    /// Validate properties supplied from outside.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("A", self.area),
            ("Ix", self.ix),
            ("Iy", self.iy),
            ("J", self.j),
            ("Cw", self.cw),
            ("Sx", self.sx),
            ("rx", self.rx),
            ("ry", self.ry),
            ("y_max", self.y_max),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Section property must be positive"));
            }
        }
        if !self.x0.is_finite() {
            return Err(CalcError::invalid_input("x0", self.x0.to_string(), "Shear centre offset must be finite"));
        }
        Ok(())
    }
}

/// Source of gross section properties for a parametric shape.
///
/// Implement this to plug in a meshing-based section analysis.
pub trait GeometryProvider {
    fn section_properties(&self, shape: &ProfileShape) -> CalcResult<SectionProperties>;
}

// =============================================================================
// PROFILE
// =============================================================================

/// Immutable cross-section.
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "Cee70_w_lps",
///   "shape": { "type": "c_profile_w_lps", "H": 70, "B": 50, "D": 12, "t": 1.5, "r_out": 3.75 },
///   "elements": [ ... ],
///   "properties": { "area": 252.0, ... }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub shape: ProfileShape,
    elements: Vec<Element>,
    properties: SectionProperties,
}

impl Profile {
    /// Build a profile with thin-wall centreline properties.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stainless_core::section::{Profile, ProfileShape};
    ///
    /// let shape = ProfileShape::LippedChannel { h: 100.0, b: 50.0, d: 12.0, t: 1.5, r_out: 3.75 };
    /// let profile = Profile::new("C100", shape)?;
    /// assert!((profile.properties().area - 327.0).abs() < 1e-9);
    /// # Ok::<(), stainless_core::errors::CalcError>(())
    /// ```
    pub fn new(name: impl Into<String>, shape: ProfileShape) -> CalcResult<Self> {
        Profile::with_provider(name, shape, &ThinWallProvider)
    }

    /// Build a profile with properties from any provider.
    pub fn with_provider(name: impl Into<String>, shape: ProfileShape, provider: &dyn GeometryProvider) -> CalcResult<Self> {
        shape.validate()?;
        let properties = provider.section_properties(&shape)?;
        Profile::with_properties(name, shape, properties)
    }

    /// Build a profile from precomputed section properties.
    pub fn with_properties(name: impl Into<String>, shape: ProfileShape, properties: SectionProperties) -> CalcResult<Self> {
        shape.validate()?;
        properties.validate()?;
        Ok(Profile {
            name: name.into(),
            elements: shape.elements(),
            shape,
            properties,
        })
    }

    /// Build a profile with a custom element table.
    ///
    /// Element classes are checked when a limit state needs them, so a table
    /// without a rule for some element only fails at that point.
    pub fn with_elements(
        name: impl Into<String>,
        shape: ProfileShape,
        elements: Vec<Element>,
        properties: SectionProperties,
    ) -> CalcResult<Self> {
        shape.validate()?;
        properties.validate()?;
        if elements.is_empty() {
            return Err(CalcError::invalid_input("elements", "[]", "Element table must not be empty"));
        }
        for e in &elements {
            if !(e.w > 0.0) || !(e.t > 0.0) || e.count == 0 {
                return Err(CalcError::invalid_input(
                    "elements",
                    format!("{:?}", e),
                    "Elements need positive width, thickness and count",
                ));
            }
        }
        Ok(Profile {
            name: name.into(),
            shape,
            elements,
            properties,
        })
    }

    pub fn properties(&self) -> &SectionProperties {
        &self.properties
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// First element with the given role
    pub fn element(&self, name: ElementName) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// The web element (always present)
    pub fn web(&self) -> CalcResult<&Element> {
        self.element(ElementName::Web)
            .ok_or_else(|| CalcError::unclassified_element("web", "missing"))
    }

    /// The flange element (always present)
    pub fn flange(&self) -> CalcResult<&Element> {
        self.element(ElementName::Flange)
            .ok_or_else(|| CalcError::unclassified_element("flange", "missing"))
    }

    /// Stiffener geometry for an edge-stiffened flange, if the profile has lips
    pub fn edge_stiffener(&self) -> Option<EdgeStiffener> {
        self.element(ElementName::Lip).map(|lip| EdgeStiffener::SimpleLip {
            d: lip.w,
            r_out: self.shape.r_out(),
            theta_deg: 90.0,
        })
    }

    pub fn is_built_up(&self) -> bool {
        self.shape.is_built_up()
    }

    /// Whether the compression flange is supported on both edges
    pub fn has_stiffened_flange(&self) -> bool {
        self.element(ElementName::Flange)
            .map(|f| f.class != ElementClass::Unstiffened)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_table_plain_channel() {
        let shape = ProfileShape::Channel { h: 6.0, b: 1.625, t: 0.06, r_out: 0.15375 };
        let elements = shape.elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].class, ElementClass::Unstiffened);
        assert!((elements[0].w - (1.625 - 0.15375)).abs() < 1e-12);
        assert!((elements[1].w - (6.0 - 2.0 * 0.15375)).abs() < 1e-12);
        assert_eq!(elements[0].compression_count(), 1);
    }

    #[test]
    fn test_element_table_lipped_built_up() {
        let shape = ProfileShape::LippedBuiltUpI { h: 6.0, b: 1.625, d: 0.45, t: 0.06, r_out: 0.15375 };
        let elements = shape.elements();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].class, ElementClass::EdgeStiffened);
        assert_eq!(elements[0].count, 4);
        assert_eq!(elements[0].compression_count(), 2);
        assert_eq!(elements[1].compression_count(), 2);
        assert!((elements[2].w - (0.45 - 0.15375)).abs() < 1e-12);
    }

    #[test]
    fn test_batch_json_shape() {
        let json = r#"{"type": "c_profile_w_lps", "H": 70, "B": 50, "D": 12, "t": 1.5, "r_out": 3.75}"#;
        let shape: ProfileShape = serde_json::from_str(json).unwrap();
        assert_eq!(shape, ProfileShape::LippedChannel { h: 70.0, b: 50.0, d: 12.0, t: 1.5, r_out: 3.75 });
        assert_eq!(shape.type_name(), "c_profile_w_lps");
    }

    #[test]
    fn test_invalid_dimensions() {
        let thin_radius = ProfileShape::Channel { h: 6.0, b: 1.6, t: 0.06, r_out: 0.03 };
        assert!(thin_radius.validate().is_err());
        let no_lip = ProfileShape::LippedChannel { h: 6.0, b: 1.6, d: 0.1, t: 0.06, r_out: 0.15 };
        assert!(no_lip.validate().is_err());
        let negative = ProfileShape::Channel { h: -6.0, b: 1.6, t: 0.06, r_out: 0.15 };
        assert_eq!(negative.validate().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_profile_accessors() {
        let shape = ProfileShape::LippedChannel { h: 6.0, b: 1.625, d: 0.45, t: 0.06, r_out: 0.15375 };
        let profile = Profile::new("C6", shape).unwrap();
        assert!(profile.has_stiffened_flange());
        match profile.edge_stiffener() {
            Some(EdgeStiffener::SimpleLip { d, theta_deg, .. }) => {
                assert!((d - 0.29625).abs() < 1e-12);
                assert_eq!(theta_deg, 90.0);
            }
            other => panic!("unexpected stiffener {:?}", other),
        }
        assert_eq!(shape.channel(), shape);

        let plain = Profile::new("C6", ProfileShape::Channel { h: 6.0, b: 1.625, t: 0.06, r_out: 0.15375 }).unwrap();
        assert!(plain.edge_stiffener().is_none());
        assert!(!plain.has_stiffened_flange());

        let built_up = ProfileShape::BuiltUpI { h: 6.0, b: 1.625, t: 0.06, r_out: 0.15375 };
        assert_eq!(built_up.channel().type_name(), "c_profile");
    }
}
