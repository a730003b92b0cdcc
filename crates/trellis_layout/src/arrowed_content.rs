//! Arrowed content host
//!
//! Wraps content in an [`ArrowedRectangle`] and keeps the content clear of the
//! arrow tail: the side the arrow points to is inset by the arrow's
//! protrusion. The margin is recomputed whenever a setter changes one of the
//! arrow parameters.

use trellis_core::{Path, Rect, Result, Size, Thickness};
use trellis_paint::{ArrowGeometry, ArrowPlacement, ArrowPointing, ArrowedRectangle};

/// A content host framed by a callout outline.
///
/// # Example
///
/// ```rust
/// use trellis_layout::ArrowedContent;
/// use trellis_paint::ArrowPlacement;
/// use trellis_core::Rect;
///
/// let host = ArrowedContent::new().placement(ArrowPlacement::Top);
/// let content = host.content_rect(Rect::new(0.0, 0.0, 200.0, 80.0));
///
/// assert_eq!(content.y(), host.content_margin().top);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowedContent {
    placement: ArrowPlacement,
    geometry: ArrowGeometry,
    margin: Thickness,
}

impl Default for ArrowedContent {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrowedContent {
    pub fn new() -> Self {
        let mut host = Self {
            placement: ArrowPlacement::default(),
            geometry: ArrowGeometry::default(),
            margin: Thickness::ZERO,
        };
        host.update_content_margin();
        host
    }

    /// Host with explicit arrow parameters. Fails if `geometry` is out of
    /// its domain.
    pub fn with_geometry(placement: ArrowPlacement, geometry: ArrowGeometry) -> Result<Self> {
        Self::new().placement(placement).geometry(geometry)
    }

    pub fn placement(mut self, placement: ArrowPlacement) -> Self {
        self.set_placement(placement);
        self
    }

    pub fn geometry(mut self, geometry: ArrowGeometry) -> Result<Self> {
        self.set_geometry(geometry)?;
        Ok(self)
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

    // =========================================================================
    // Setters
    //
    // Parameter setters validate the resulting geometry. On error the host
    // keeps its previous parameters and margin.
    // =========================================================================

    pub fn set_placement(&mut self, placement: ArrowPlacement) {
        self.placement = placement;
        self.update_content_margin();
    }

    pub fn set_geometry(&mut self, geometry: ArrowGeometry) -> Result<()> {
        geometry.validate()?;
        self.geometry = geometry;
        self.update_content_margin();
        Ok(())
    }

    fn update_geometry(&mut self, apply: impl FnOnce(&mut ArrowGeometry)) -> Result<()> {
        let mut geometry = self.geometry;
        apply(&mut geometry);
        self.set_geometry(geometry)
    }

    pub fn set_arrow_size(&mut self, size: f64) -> Result<()> {
        self.update_geometry(|g| g.size = size)
    }

    pub fn set_arrow_ratio(&mut self, ratio: f64) -> Result<()> {
        self.update_geometry(|g| g.ratio = ratio)
    }

    pub fn set_arrow_radius(&mut self, corner_radius: f64) -> Result<()> {
        self.update_geometry(|g| g.corner_radius = corner_radius)
    }

    pub fn set_arrow_offset(&mut self, offset: f64) -> Result<()> {
        self.update_geometry(|g| g.offset = offset)
    }

    pub fn set_show_arrow(&mut self, show_arrow: bool) {
        self.geometry.show_arrow = show_arrow;
        self.update_content_margin();
    }

    /// Corner radii and stroke only affect the outline, never the margin.
    pub fn set_corner_radii(&mut self, radius_x: f64, radius_y: f64) -> Result<()> {
        self.update_geometry(|g| {
            g.radius_x = radius_x;
            g.radius_y = radius_y;
        })
    }

    pub fn set_stroke_thickness(&mut self, stroke_thickness: f64) -> Result<()> {
        self.update_geometry(|g| g.stroke_thickness = stroke_thickness)
    }

    fn update_content_margin(&mut self) {
        let protrusion = self.geometry.protrusion();
        self.margin = self.pointing().edge_thickness(protrusion);
        tracing::trace!(
            "arrowed content: {} margin {:?}",
            self.placement,
            self.margin
        );
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Inset applied to content: the protrusion on the pointing side, zero
    /// elsewhere.
    pub fn content_margin(&self) -> Thickness {
        self.margin
    }

    /// Area available to content inside `bounds`
    pub fn content_rect(&self, bounds: Rect) -> Rect {
        bounds.deflate(self.margin)
    }

    /// Smallest host size that fits content of `content` size
    pub fn desired_size(&self, content: Size) -> Size {
        Size::new(
            content.width + self.margin.horizontal(),
            content.height + self.margin.vertical(),
        )
    }

    /// Shape framing content of the given host size
    pub fn shape(&self, size: Size) -> ArrowedRectangle {
        ArrowedRectangle::new(size)
            .placement(self.placement)
            .geometry(self.geometry)
    }

    /// Callout outline for the given host size
    pub fn outline(&self, size: Size) -> Path {
        self.shape(size).defining_geometry()
    }
}
