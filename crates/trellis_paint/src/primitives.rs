//! Shape primitives
//!
//! Core types are re-exported from trellis_core for a unified type system.
//! Shapes here produce their defining geometry as a [`Path`].

// Re-export core types
pub use trellis_core::{Point, Rect, Size, Thickness, Vec2};

use trellis_core::{GeometrySink, Path, Result};

use crate::arrow::{ArrowGeometry, ArrowPlacement, ArrowPointing};
use crate::callout::draw_arrow_rectangle;

/// A rectangle with elliptical corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius_x: f64,
    pub radius_y: f64,
}

impl RoundedRect {
    pub fn new(rect: Rect, radius_x: f64, radius_y: f64) -> Self {
        Self {
            rect,
            radius_x,
            radius_y,
        }
    }

    pub fn uniform(rect: Rect, radius: f64) -> Self {
        Self::new(rect, radius, radius)
    }

    /// Stream the outline: four edges and four clockwise quarter arcs
    pub fn draw<S: GeometrySink + ?Sized>(&self, sink: &mut S) {
        let geometry = ArrowGeometry {
            radius_x: self.radius_x,
            radius_y: self.radius_y,
            ..ArrowGeometry::hidden()
        };
        draw_arrow_rectangle(sink, self.rect, ArrowPlacement::default(), &geometry);
    }

    pub fn to_path(&self) -> Path {
        let mut path = Path::new();
        self.draw(&mut path);
        path
    }
}

/// A rounded rectangle shape carrying an arrow tail.
///
/// The outline is traced inside `size`, inset by half the stroke so the
/// stroke stays within the shape's bounds.
///
/// ```rust
/// use trellis_paint::{ArrowGeometry, ArrowPlacement, ArrowedRectangle};
/// use trellis_core::Size;
///
/// let shape = ArrowedRectangle::new(Size::new(100.0, 100.0))
///     .placement(ArrowPlacement::BottomEdgeAlignedLeft)
///     .geometry(ArrowGeometry::default());
///
/// let path = shape.defining_geometry();
/// assert_eq!(path.quad_count(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArrowedRectangle {
    size: Size,
    placement: ArrowPlacement,
    geometry: ArrowGeometry,
}

impl ArrowedRectangle {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            placement: ArrowPlacement::default(),
            geometry: ArrowGeometry::default(),
        }
    }

    pub fn placement(mut self, placement: ArrowPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn geometry(mut self, geometry: ArrowGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_placement(&mut self, placement: ArrowPlacement) {
        self.placement = placement;
    }

    pub fn set_geometry(&mut self, geometry: ArrowGeometry) {
        self.geometry = geometry;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn arrow_placement(&self) -> ArrowPlacement {
        self.placement
    }

    pub fn arrow_geometry(&self) -> &ArrowGeometry {
        &self.geometry
    }

    pub fn pointing(&self) -> ArrowPointing {
        self.placement.pointing()
    }

    /// Rectangle the outline is traced in
    pub fn outline_bounds(&self) -> Rect {
        self.size
            .to_rect()
            .deflate(Thickness::uniform(self.geometry.stroke_thickness / 2.0))
    }

    /// Validate the parameters, then build the outline
    pub fn try_defining_geometry(&self) -> Result<Path> {
        self.geometry.validate()?;
        Ok(self.defining_geometry())
    }

    /// The closed, filled outline for the current parameters
    pub fn defining_geometry(&self) -> Path {
        let bounds = self.outline_bounds();
        if !self.geometry.show_arrow {
            return RoundedRect::new(bounds, self.geometry.radius_x, self.geometry.radius_y)
                .to_path();
        }
        let mut path = Path::new();
        draw_arrow_rectangle(&mut path, bounds, self.placement, &self.geometry);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::{PathCommand, TrellisError};

    #[test]
    fn test_rounded_rect_path() {
        let path = RoundedRect::uniform(Rect::new(10.0, 10.0, 50.0, 30.0), 5.0).to_path();
        assert_eq!(path.line_count(), 4);
        assert_eq!(path.arc_count(), 4);
        assert_eq!(path.quad_count(), 0);
        assert_eq!(path.bounds(), Rect::new(10.0, 10.0, 50.0, 30.0));
        assert!(path.is_filled());
    }

    #[test]
    fn test_stroke_inset() {
        let shape = ArrowedRectangle::new(Size::new(100.0, 50.0)).geometry(ArrowGeometry {
            stroke_thickness: 2.0,
            ..ArrowGeometry::default()
        });
        assert_eq!(shape.outline_bounds(), Rect::new(1.0, 1.0, 98.0, 48.0));
    }

    #[test]
    fn test_hidden_arrow_matches_rounded_rect() {
        let geometry = ArrowGeometry::hidden().with_radius(4.0);
        let shape = ArrowedRectangle::new(Size::new(80.0, 40.0))
            .placement(ArrowPlacement::TopEdgeAlignedRight)
            .geometry(geometry);
        let expected = RoundedRect::uniform(Rect::new(0.0, 0.0, 80.0, 40.0), 4.0).to_path();
        assert_eq!(shape.defining_geometry(), expected);
    }

    #[test]
    fn test_arrow_tip_touches_bounds() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inside = |p: Point| {
            p.x >= -1e-9 && p.y >= -1e-9 && p.x <= 100.0 + 1e-9 && p.y <= 100.0 + 1e-9
        };
        for placement in ArrowPlacement::ALL {
            let shape = ArrowedRectangle::new(bounds.size).placement(placement);
            let path = shape.defining_geometry();
            let mut pen = Point::ZERO;
            for cmd in path.commands() {
                if let PathCommand::QuadTo { control, end } = *cmd {
                    // The symmetric tip curve peaks at t = 0.5.
                    let apex = Point::new(
                        0.25 * pen.x + 0.5 * control.x + 0.25 * end.x,
                        0.25 * pen.y + 0.5 * control.y + 0.25 * end.y,
                    );
                    assert!(inside(apex), "{placement}: apex {apex:?}");
                    let on_edge = match placement.pointing() {
                        ArrowPointing::Left => apex.x,
                        ArrowPointing::Top => apex.y,
                        ArrowPointing::Right => apex.x - 100.0,
                        ArrowPointing::Bottom => apex.y - 100.0,
                    };
                    assert!(on_edge.abs() < 1e-9, "{placement}: apex {apex:?}");
                }
                if let Some(p) = cmd.end_point() {
                    assert!(inside(p), "{placement}: {p:?}");
                    pen = p;
                }
            }
        }
    }

    #[test]
    fn test_invalid_geometry_is_rejected() {
        let shape = ArrowedRectangle::new(Size::new(10.0, 10.0)).geometry(ArrowGeometry {
            ratio: -1.0,
            ..ArrowGeometry::default()
        });
        assert!(matches!(
            shape.try_defining_geometry(),
            Err(TrellisError::InvalidGeometry(_))
        ));
    }
}
