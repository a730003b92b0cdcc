//! Callout outline tracer
//!
//! Traces a rounded rectangle whose edge is interrupted by an arrow tail.
//!
//! ```text
//!   (origin)
//!   Corner 4                    Corner 1
//!   Top/Left      Edge 1        Top/Right
//!      \_  ╭-------------------╮  _/
//!          |                   |
//!   Edge 4 |                   | Edge 2
//!          |                   |
//!       _  ╰-------------------╯  _
//!      /          Edge 3           \
//!   Corner 3                    Corner 2
//!   Bottom/Left                 Bottom/Right
//! ```
//!
//! The figure starts where edge 1 meets corner 4 and walks clockwise. Edges 1
//! and 3 are inset by `radius_x`, edges 2 and 4 by `radius_y`, and every
//! corner is a quarter elliptical arc. Before the edge the arrow points
//! across, the tail is spliced in:
//!
//! ```text
//!   entrance ──╮        ╭── exit
//!    arc entrance \    / arc exit
//!                  \◡/
//!              control point (tip)
//! ```

use std::f64::consts::FRAC_PI_2;

use trellis_core::{GeometrySink, Path, Point, Rect, SweepDirection, Vec2};

use crate::arrow::{ArrowGeometry, ArrowMetrics, ArrowPlacement, ArrowPointing};

/// Rotation of every corner arc, in radians
pub const CORNER_ARC_ROTATION: f64 = FRAC_PI_2;

/// The five points that make up an arrow tail splice
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowAnchors {
    /// Point on the edge where the tail begins
    pub entrance: Point,
    /// Shoulder corner on the entrance side
    pub arc_entrance: Point,
    /// Quadratic control point at the tip
    pub control: Point,
    /// Shoulder corner on the exit side
    pub arc_exit: Point,
    /// Point on the edge where the tail ends
    pub exit: Point,
}

impl ArrowAnchors {
    /// Compute the splice points for `placement` on an already deflated
    /// rectangle
    pub fn new(rect: Rect, placement: ArrowPlacement, geometry: &ArrowGeometry) -> Self {
        let ArrowMetrics {
            edge_width,
            edge_height,
            tail_height,
            ..
        } = geometry.metrics();
        let half = geometry.size / 2.0;
        let c = base_center(rect, placement, geometry);

        match placement.pointing() {
            ArrowPointing::Left => {
                let entrance = Point::new(rect.left(), c.y + half);
                let exit = Point::new(rect.left(), c.y - half);
                Self {
                    entrance,
                    arc_entrance: entrance.offset(-edge_height, -edge_width),
                    control: c.offset(-tail_height, 0.0),
                    arc_exit: exit.offset(-edge_height, edge_width),
                    exit,
                }
            }
            ArrowPointing::Top => {
                let entrance = Point::new(c.x - half, rect.top());
                let exit = Point::new(c.x + half, rect.top());
                Self {
                    entrance,
                    arc_entrance: entrance.offset(edge_width, -edge_height),
                    control: c.offset(0.0, -tail_height),
                    arc_exit: exit.offset(-edge_width, -edge_height),
                    exit,
                }
            }
            ArrowPointing::Right => {
                let entrance = Point::new(rect.right(), c.y - half);
                let exit = Point::new(rect.right(), c.y + half);
                Self {
                    entrance,
                    arc_entrance: entrance.offset(edge_height, edge_width),
                    control: c.offset(tail_height, 0.0),
                    arc_exit: exit.offset(edge_height, -edge_width),
                    exit,
                }
            }
            ArrowPointing::Bottom => {
                let entrance = Point::new(c.x + half, rect.bottom());
                let exit = Point::new(c.x - half, rect.bottom());
                Self {
                    entrance,
                    arc_entrance: entrance.offset(-edge_width, edge_height),
                    control: c.offset(0.0, tail_height),
                    arc_exit: exit.offset(edge_width, edge_height),
                    exit,
                }
            }
        }
    }

    fn splice<S: GeometrySink + ?Sized>(&self, sink: &mut S) {
        sink.line_to(self.entrance);
        sink.line_to(self.arc_entrance);
        sink.quadratic_bezier_to(self.control, self.arc_exit);
        sink.line_to(self.exit);
    }
}

/// Center of the arrow base on the rectangle edge.
///
/// Centered placements use the edge midpoint; edge-aligned placements sit
/// `offset + size / 2` from the near corner.
pub fn base_center(rect: Rect, placement: ArrowPlacement, geometry: &ArrowGeometry) -> Point {
    let inset = geometry.offset + geometry.size / 2.0;
    let mid_x = (rect.left() + rect.right()) / 2.0;
    let mid_y = (rect.top() + rect.bottom()) / 2.0;
    match placement {
        ArrowPlacement::Left => Point::new(rect.left(), mid_y),
        ArrowPlacement::LeftEdgeAlignedTop => Point::new(rect.left(), rect.top() + inset),
        ArrowPlacement::LeftEdgeAlignedBottom => Point::new(rect.left(), rect.bottom() - inset),
        ArrowPlacement::Top => Point::new(mid_x, rect.top()),
        ArrowPlacement::TopEdgeAlignedLeft => Point::new(rect.left() + inset, rect.top()),
        ArrowPlacement::TopEdgeAlignedRight => Point::new(rect.right() - inset, rect.top()),
        ArrowPlacement::Right => Point::new(rect.right(), mid_y),
        ArrowPlacement::RightEdgeAlignedTop => Point::new(rect.right(), rect.top() + inset),
        ArrowPlacement::RightEdgeAlignedBottom => Point::new(rect.right(), rect.bottom() - inset),
        ArrowPlacement::Bottom => Point::new(mid_x, rect.bottom()),
        ArrowPlacement::BottomEdgeAlignedLeft => Point::new(rect.left() + inset, rect.bottom()),
        ArrowPlacement::BottomEdgeAlignedRight => {
            Point::new(rect.right() - inset, rect.bottom())
        }
    }
}

/// The rectangle the rounded body is traced on: `bounds` deflated by the
/// arrow protrusion on the pointing side.
pub fn body_rect(bounds: Rect, placement: ArrowPlacement, geometry: &ArrowGeometry) -> Rect {
    bounds.deflate(placement.pointing().edge_thickness(geometry.protrusion()))
}

/// Stream a callout outline into `sink`.
///
/// Exactly one edge carries the arrow, picked by the placement's pointing
/// direction. With `show_arrow` unset the result is a plain rounded
/// rectangle: four lines and four arcs on the undeflated bounds.
pub fn draw_arrow_rectangle<S: GeometrySink + ?Sized>(
    sink: &mut S,
    bounds: Rect,
    placement: ArrowPlacement,
    geometry: &ArrowGeometry,
) {
    let rect = body_rect(bounds, placement, geometry);
    let pointing = placement.pointing();
    let anchors = geometry
        .show_arrow
        .then(|| ArrowAnchors::new(rect, placement, geometry));

    tracing::trace!(
        %placement,
        %pointing,
        protrusion = geometry.protrusion(),
        show_arrow = geometry.show_arrow,
        "tracing callout outline"
    );

    let rx = geometry.radius_x;
    let ry = geometry.radius_y;
    let radii = Vec2::new(rx, ry);
    // Clockwise: (edge the arrow may interrupt, edge end, corner arc end)
    let edges = [
        // Edge 1 + Corner 1
        (
            ArrowPointing::Top,
            Point::new(rect.right() - rx, rect.top()),
            Point::new(rect.right(), rect.top() + ry),
        ),
        // Edge 2 + Corner 2
        (
            ArrowPointing::Right,
            Point::new(rect.right(), rect.bottom() - ry),
            Point::new(rect.right() - rx, rect.bottom()),
        ),
        // Edge 3 + Corner 3
        (
            ArrowPointing::Bottom,
            Point::new(rect.left() + rx, rect.bottom()),
            Point::new(rect.left(), rect.bottom() - ry),
        ),
        // Edge 4 + Corner 4
        (
            ArrowPointing::Left,
            Point::new(rect.left(), rect.top() + ry),
            Point::new(rect.left() + rx, rect.top()),
        ),
    ];

    sink.begin_figure(Point::new(rect.left() + rx, rect.top()), true);

    for (side, edge_end, corner_end) in edges {
        if let Some(anchors) = anchors.filter(|_| pointing == side) {
            anchors.splice(sink);
        }
        sink.line_to(edge_end);
        sink.arc_to(
            corner_end,
            radii,
            CORNER_ARC_ROTATION,
            false,
            SweepDirection::Clockwise,
        );
    }

    sink.end_figure(true);
}

/// Trace a callout outline into a new [`Path`]
pub fn arrow_rectangle_path(
    bounds: Rect,
    placement: ArrowPlacement,
    geometry: &ArrowGeometry,
) -> Path {
    let mut path = Path::new();
    draw_arrow_rectangle(&mut path, bounds, placement, geometry);
    path
}
