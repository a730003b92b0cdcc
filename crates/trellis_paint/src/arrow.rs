//! Arrow placement and arrow geometry
//!
//! A callout's arrow tail attaches to one of twelve positions: the middle of
//! each edge, or near either end of an edge. Every position resolves to one of
//! four pointing directions, which decides the edge the tail interrupts and
//! the side the content area is inset on.
//!
//! ```text
//!          TopEdgeAlignedLeft   Top   TopEdgeAlignedRight
//!                      ╭───────────────────╮
//!  LeftEdgeAlignedTop  │                   │  RightEdgeAlignedTop
//!                Left  │                   │  Right
//! LeftEdgeAlignedBottom│                   │  RightEdgeAlignedBottom
//!                      ╰───────────────────╯
//!       BottomEdgeAlignedLeft   Bottom   BottomEdgeAlignedRight
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use trellis_core::{Result, Thickness, TrellisError};

// =============================================================================
// Placement
// =============================================================================

/// Where along which edge the arrow tail attaches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum ArrowPlacement {
    #[default]
    Left = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
    LeftEdgeAlignedTop = 4,
    LeftEdgeAlignedBottom = 5,
    TopEdgeAlignedLeft = 6,
    TopEdgeAlignedRight = 7,
    RightEdgeAlignedTop = 8,
    RightEdgeAlignedBottom = 9,
    BottomEdgeAlignedLeft = 10,
    BottomEdgeAlignedRight = 11,
}

impl ArrowPlacement {
    /// Every placement, in discriminant order
    pub const ALL: [ArrowPlacement; 12] = [
        ArrowPlacement::Left,
        ArrowPlacement::Top,
        ArrowPlacement::Right,
        ArrowPlacement::Bottom,
        ArrowPlacement::LeftEdgeAlignedTop,
        ArrowPlacement::LeftEdgeAlignedBottom,
        ArrowPlacement::TopEdgeAlignedLeft,
        ArrowPlacement::TopEdgeAlignedRight,
        ArrowPlacement::RightEdgeAlignedTop,
        ArrowPlacement::RightEdgeAlignedBottom,
        ArrowPlacement::BottomEdgeAlignedLeft,
        ArrowPlacement::BottomEdgeAlignedRight,
    ];

    /// Direction the arrow tail points for this placement
    pub const fn pointing(self) -> ArrowPointing {
        match self {
            ArrowPlacement::Left
            | ArrowPlacement::LeftEdgeAlignedTop
            | ArrowPlacement::LeftEdgeAlignedBottom => ArrowPointing::Left,
            ArrowPlacement::Top
            | ArrowPlacement::TopEdgeAlignedLeft
            | ArrowPlacement::TopEdgeAlignedRight => ArrowPointing::Top,
            ArrowPlacement::Right
            | ArrowPlacement::RightEdgeAlignedTop
            | ArrowPlacement::RightEdgeAlignedBottom => ArrowPointing::Right,
            ArrowPlacement::Bottom
            | ArrowPlacement::BottomEdgeAlignedLeft
            | ArrowPlacement::BottomEdgeAlignedRight => ArrowPointing::Bottom,
        }
    }

    /// True for the four placements centered on an edge
    pub const fn is_centered(self) -> bool {
        matches!(
            self,
            ArrowPlacement::Left
                | ArrowPlacement::Top
                | ArrowPlacement::Right
                | ArrowPlacement::Bottom
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            ArrowPlacement::Left => "Left",
            ArrowPlacement::Top => "Top",
            ArrowPlacement::Right => "Right",
            ArrowPlacement::Bottom => "Bottom",
            ArrowPlacement::LeftEdgeAlignedTop => "LeftEdgeAlignedTop",
            ArrowPlacement::LeftEdgeAlignedBottom => "LeftEdgeAlignedBottom",
            ArrowPlacement::TopEdgeAlignedLeft => "TopEdgeAlignedLeft",
            ArrowPlacement::TopEdgeAlignedRight => "TopEdgeAlignedRight",
            ArrowPlacement::RightEdgeAlignedTop => "RightEdgeAlignedTop",
            ArrowPlacement::RightEdgeAlignedBottom => "RightEdgeAlignedBottom",
            ArrowPlacement::BottomEdgeAlignedLeft => "BottomEdgeAlignedLeft",
            ArrowPlacement::BottomEdgeAlignedRight => "BottomEdgeAlignedRight",
        }
    }
}

impl fmt::Display for ArrowPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ArrowPlacement {
    type Error = TrellisError;

    fn try_from(value: u8) -> Result<Self> {
        ArrowPlacement::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| TrellisError::unsupported("ArrowPlacement", value))
    }
}

/// Accepts `BottomEdgeAlignedLeft`, `bottom-edge-aligned-left` and
/// `bottom_edge_aligned_left`, case-insensitively.
impl FromStr for ArrowPlacement {
    type Err = TrellisError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_name(s);
        ArrowPlacement::ALL
            .into_iter()
            .find(|p| normalize_name(p.name()) == wanted)
            .ok_or_else(|| TrellisError::unsupported("ArrowPlacement", s))
    }
}

impl TryFrom<String> for ArrowPlacement {
    type Error = TrellisError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ArrowPlacement> for String {
    fn from(value: ArrowPlacement) -> Self {
        value.name().to_string()
    }
}

fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Pointing
// =============================================================================

/// Direction the arrow tail points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrowPointing {
    Left,
    Top,
    Right,
    Bottom,
}

impl ArrowPointing {
    pub const ALL: [ArrowPointing; 4] = [
        ArrowPointing::Left,
        ArrowPointing::Top,
        ArrowPointing::Right,
        ArrowPointing::Bottom,
    ];

    /// A thickness with `amount` on the side this direction points to
    pub fn edge_thickness(self, amount: f64) -> Thickness {
        match self {
            ArrowPointing::Left => Thickness::new(amount, 0.0, 0.0, 0.0),
            ArrowPointing::Top => Thickness::new(0.0, amount, 0.0, 0.0),
            ArrowPointing::Right => Thickness::new(0.0, 0.0, amount, 0.0),
            ArrowPointing::Bottom => Thickness::new(0.0, 0.0, 0.0, amount),
        }
    }
}

impl fmt::Display for ArrowPointing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArrowPointing::Left => "Left",
            ArrowPointing::Top => "Top",
            ArrowPointing::Right => "Right",
            ArrowPointing::Bottom => "Bottom",
        })
    }
}

// =============================================================================
// Geometry parameters
// =============================================================================

/// Arrow and outline parameters for a callout shape.
///
/// ```text
///        ╰----   -------------╯            size
///          /  \◡/                           \   /   tail height = size * ratio
///   offset                                   \◡/
///                                        corner_radius
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowGeometry {
    /// Width of the arrow tail where it meets the edge
    pub size: f64,
    /// Tail height relative to its width
    pub ratio: f64,
    /// Rounding of the tail tip
    pub corner_radius: f64,
    /// Distance from the near corner for edge-aligned placements
    pub offset: f64,
    /// Horizontal radius of the rectangle corners
    pub radius_x: f64,
    /// Vertical radius of the rectangle corners
    pub radius_y: f64,
    /// Stroke width of the outline
    pub stroke_thickness: f64,
    pub show_arrow: bool,
}

impl Default for ArrowGeometry {
    fn default() -> Self {
        Self {
            size: 10.0,
            ratio: 0.6,
            corner_radius: 2.0,
            offset: 20.0,
            radius_x: 0.0,
            radius_y: 0.0,
            stroke_thickness: 0.0,
            show_arrow: true,
        }
    }
}

impl ArrowGeometry {
    /// Default parameters with the arrow hidden
    pub fn hidden() -> Self {
        Self {
            show_arrow: false,
            ..Self::default()
        }
    }

    /// Same radius on both axes
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius_x = radius;
        self.radius_y = radius;
        self
    }

    /// Check the parameters against their documented domain.
    ///
    /// `corner_radius` above `size / 2` is accepted: it only clamps the
    /// shoulder width to zero.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("size", self.size),
            ("corner_radius", self.corner_radius),
            ("offset", self.offset),
            ("radius_x", self.radius_x),
            ("radius_y", self.radius_y),
            ("stroke_thickness", self.stroke_thickness),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TrellisError::InvalidGeometry(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(TrellisError::InvalidGeometry(format!(
                "ratio must be a finite positive number, got {}",
                self.ratio
            )));
        }
        Ok(())
    }

    /// Derived arrow dimensions
    pub fn metrics(&self) -> ArrowMetrics {
        ArrowMetrics::new(self)
    }

    /// Distance the arrow extends beyond the outline rectangle.
    ///
    /// Zero when the arrow is hidden.
    pub fn protrusion(&self) -> f64 {
        if self.show_arrow {
            self.metrics().protrusion
        } else {
            0.0
        }
    }
}

/// Dimensions derived from [`ArrowGeometry`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowMetrics {
    /// Width of the flat shoulder next to the rounded tip
    pub edge_width: f64,
    /// Outward offset consumed by the shoulder
    pub edge_height: f64,
    /// Distance from the base center to the tip control point
    pub tail_height: f64,
    /// Total distance the arrow extends beyond the rectangle edge
    pub protrusion: f64,
}

impl ArrowMetrics {
    pub fn new(geometry: &ArrowGeometry) -> Self {
        let edge_width = (geometry.size / 2.0 - geometry.corner_radius).max(0.0);
        let edge_height = edge_width * geometry.ratio * 2.0;
        let tail_height = geometry.size * geometry.ratio;
        Self {
            edge_width,
            edge_height,
            tail_height,
            protrusion: (tail_height + edge_height) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_every_placement_points_somewhere() {
        for placement in ArrowPlacement::ALL {
            let pointing = placement.pointing();
            assert!(ArrowPointing::ALL.contains(&pointing));
            assert_eq!(pointing, placement.pointing());
        }
    }

    #[test]
    fn test_three_placements_per_direction() {
        for pointing in ArrowPointing::ALL {
            let count = ArrowPlacement::ALL
                .iter()
                .filter(|p| p.pointing() == pointing)
                .count();
            assert_eq!(count, 3, "{pointing}");
        }
    }

    #[test]
    fn test_pointing_table() {
        assert_eq!(
            ArrowPlacement::LeftEdgeAlignedBottom.pointing(),
            ArrowPointing::Left
        );
        assert_eq!(
            ArrowPlacement::TopEdgeAlignedRight.pointing(),
            ArrowPointing::Top
        );
        assert_eq!(
            ArrowPlacement::RightEdgeAlignedTop.pointing(),
            ArrowPointing::Right
        );
        assert_eq!(
            ArrowPlacement::BottomEdgeAlignedLeft.pointing(),
            ArrowPointing::Bottom
        );
    }

    #[test]
    fn test_try_from_u8() {
        for placement in ArrowPlacement::ALL {
            assert_eq!(ArrowPlacement::try_from(placement as u8), Ok(placement));
        }
        assert_eq!(
            ArrowPlacement::try_from(12),
            Err(TrellisError::unsupported("ArrowPlacement", 12))
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "BottomEdgeAlignedLeft".parse::<ArrowPlacement>(),
            Ok(ArrowPlacement::BottomEdgeAlignedLeft)
        );
        assert_eq!(
            "top-edge-aligned-right".parse::<ArrowPlacement>(),
            Ok(ArrowPlacement::TopEdgeAlignedRight)
        );
        assert_eq!("left".parse::<ArrowPlacement>(), Ok(ArrowPlacement::Left));
        assert!("diagonal".parse::<ArrowPlacement>().is_err());
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&ArrowPlacement::RightEdgeAlignedBottom).unwrap();
        assert_eq!(json, "\"RightEdgeAlignedBottom\"");
        let back: ArrowPlacement = serde_json::from_str("\"right_edge_aligned_bottom\"").unwrap();
        assert_eq!(back, ArrowPlacement::RightEdgeAlignedBottom);
        assert!(serde_json::from_str::<ArrowPlacement>("\"nowhere\"").is_err());
    }

    #[test]
    fn test_default_metrics() {
        let m = ArrowGeometry::default().metrics();
        assert!(close(m.edge_width, 3.0));
        assert!(close(m.edge_height, 3.6));
        assert!(close(m.tail_height, 6.0));
        assert!(close(m.protrusion, 4.8));
    }

    #[test]
    fn test_large_corner_radius_clamps_shoulder() {
        let geometry = ArrowGeometry {
            corner_radius: 50.0,
            ..ArrowGeometry::default()
        };
        let m = geometry.metrics();
        assert_eq!(m.edge_width, 0.0);
        assert_eq!(m.edge_height, 0.0);
        assert!(close(m.protrusion, 3.0));
    }

    #[test]
    fn test_protrusion_zero_cases() {
        assert_eq!(ArrowGeometry::hidden().protrusion(), 0.0);
        let no_size = ArrowGeometry {
            size: 0.0,
            ..ArrowGeometry::default()
        };
        assert_eq!(no_size.protrusion(), 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(ArrowGeometry::default().validate().is_ok());
        let bad_ratio = ArrowGeometry {
            ratio: 0.0,
            ..ArrowGeometry::default()
        };
        assert!(matches!(
            bad_ratio.validate(),
            Err(TrellisError::InvalidGeometry(_))
        ));
        let bad_size = ArrowGeometry {
            size: -1.0,
            ..ArrowGeometry::default()
        };
        assert!(bad_size.validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let g: ArrowGeometry = serde_json::from_str(r#"{"size": 16.0}"#).unwrap();
        assert_eq!(g.size, 16.0);
        assert_eq!(g.ratio, 0.6);
        assert!(g.show_arrow);
    }

    #[test]
    fn test_edge_thickness() {
        assert_eq!(
            ArrowPointing::Bottom.edge_thickness(4.8),
            Thickness::new(0.0, 0.0, 0.0, 4.8)
        );
        assert_eq!(
            ArrowPointing::Left.edge_thickness(2.0),
            Thickness::new(2.0, 0.0, 0.0, 0.0)
        );
    }
}
