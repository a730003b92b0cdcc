//! Path commands and the geometry sink seam
//!
//! Shape builders never talk to a renderer directly. They stream figure
//! operations into a [`GeometrySink`], the same way a toolkit's stream
//! geometry context is fed. [`Path`] is the in-memory sink: it records the
//! operations as [`PathCommand`]s that can be inspected, measured, or
//! serialized to SVG path data.
//!
//! # Example
//!
//! ```rust
//! use trellis_core::{GeometrySink, Path, Point, SweepDirection, Vec2};
//!
//! let mut path = Path::new();
//! path.begin_figure(Point::new(0.0, 0.0), true);
//! path.line_to(Point::new(10.0, 0.0));
//! path.arc_to(
//!     Point::new(20.0, 10.0),
//!     Vec2::new(10.0, 10.0),
//!     std::f64::consts::FRAC_PI_2,
//!     false,
//!     SweepDirection::Clockwise,
//! );
//! path.end_figure(true);
//!
//! assert_eq!(path.commands().len(), 4);
//! ```

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// Path Types
// ─────────────────────────────────────────────────────────────────────────────

/// Direction an elliptical arc is swept
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SweepDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl SweepDirection {
    /// SVG `sweep-flag` value
    pub fn svg_flag(self) -> u8 {
        match self {
            SweepDirection::Clockwise => 1,
            SweepDirection::CounterClockwise => 0,
        }
    }
}

/// Path command for building vector paths
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Move to a point, starting a new figure
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Quadratic Bézier curve
    QuadTo { control: Point, end: Point },
    /// Elliptical arc to a point
    ArcTo {
        end: Point,
        radii: Vec2,
        /// Rotation of the ellipse in radians
        rotation: f64,
        large_arc: bool,
        sweep: SweepDirection,
    },
    /// Close the current figure
    Close,
}

impl PathCommand {
    /// The point the pen rests on after this command, if any
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
            PathCommand::QuadTo { end, .. } | PathCommand::ArcTo { end, .. } => Some(end),
            PathCommand::Close => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Geometry Sink
// ─────────────────────────────────────────────────────────────────────────────

/// Consumer of figure operations.
///
/// Operations arrive in strict order: one `begin_figure`, any number of
/// segments, then `end_figure`. Implementors are free to render, record or
/// transform the stream.
pub trait GeometrySink {
    /// Start a new figure at `start`
    fn begin_figure(&mut self, start: Point, filled: bool);

    /// Straight segment to `point`
    fn line_to(&mut self, point: Point);

    /// Elliptical arc segment to `end`
    ///
    /// `rotation` is the ellipse rotation in radians.
    fn arc_to(
        &mut self,
        end: Point,
        radii: Vec2,
        rotation: f64,
        large_arc: bool,
        sweep: SweepDirection,
    );

    /// Quadratic Bézier segment through `control` to `end`
    fn quadratic_bezier_to(&mut self, control: Point, end: Point);

    /// Finish the current figure, optionally closing it
    fn end_figure(&mut self, closed: bool);
}

impl<S: GeometrySink + ?Sized> GeometrySink for &mut S {
    fn begin_figure(&mut self, start: Point, filled: bool) {
        (**self).begin_figure(start, filled);
    }

    fn line_to(&mut self, point: Point) {
        (**self).line_to(point);
    }

    fn arc_to(
        &mut self,
        end: Point,
        radii: Vec2,
        rotation: f64,
        large_arc: bool,
        sweep: SweepDirection,
    ) {
        (**self).arc_to(end, radii, rotation, large_arc, sweep);
    }

    fn quadratic_bezier_to(&mut self, control: Point, end: Point) {
        (**self).quadratic_bezier_to(control, end);
    }

    fn end_figure(&mut self, closed: bool) {
        (**self).end_figure(closed);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path
// ─────────────────────────────────────────────────────────────────────────────

/// A recorded vector path
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
    filled: bool,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            filled: false,
        }
    }

    /// Create a path from a vector of commands
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self {
            commands,
            filled: false,
        }
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands
    pub fn into_commands(self) -> Vec<PathCommand> {
        self.commands
    }

    /// Whether the last figure was begun as a filled figure
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of straight segments
    pub fn line_count(&self) -> usize {
        self.count(|c| matches!(c, PathCommand::LineTo(_)))
    }

    /// Number of elliptical arc segments
    pub fn arc_count(&self) -> usize {
        self.count(|c| matches!(c, PathCommand::ArcTo { .. }))
    }

    /// Number of quadratic Bézier segments
    pub fn quad_count(&self) -> usize {
        self.count(|c| matches!(c, PathCommand::QuadTo { .. }))
    }

    fn count(&self, pred: impl Fn(&PathCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// Calculate the bounding rectangle of this path
    ///
    /// Control points are included, so curves yield a conservative box.
    /// Arcs contribute their end points only.
    pub fn bounds(&self) -> Rect {
        let mut points = self.commands.iter().flat_map(|cmd| match *cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => [Some(p), None],
            PathCommand::QuadTo { control, end } => [Some(control), Some(end)],
            PathCommand::ArcTo { end, .. } => [Some(end), None],
            PathCommand::Close => [None, None],
        });

        let Some(first) = points.by_ref().flatten().next() else {
            return Rect::ZERO;
        };

        points
            .flatten()
            .fold(Rect::from_origin_size(first, Default::default()), |r, p| {
                r.expand_to_include(p)
            })
    }

    /// Serialize to SVG path data (`d` attribute syntax).
    ///
    /// Arc rotation is converted from radians to degrees, as SVG expects.
    pub fn to_svg_data(&self) -> String {
        let mut out = String::new();
        for cmd in &self.commands {
            if !out.is_empty() {
                out.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match *cmd {
                PathCommand::MoveTo(p) => write!(out, "M {} {}", p.x, p.y),
                PathCommand::LineTo(p) => write!(out, "L {} {}", p.x, p.y),
                PathCommand::QuadTo { control, end } => {
                    write!(out, "Q {} {} {} {}", control.x, control.y, end.x, end.y)
                }
                PathCommand::ArcTo {
                    end,
                    radii,
                    rotation,
                    large_arc,
                    sweep,
                } => write!(
                    out,
                    "A {} {} {} {} {} {} {}",
                    radii.x,
                    radii.y,
                    rotation.to_degrees(),
                    u8::from(large_arc),
                    sweep.svg_flag(),
                    end.x,
                    end.y
                ),
                PathCommand::Close => write!(out, "Z"),
            };
        }
        out
    }
}

impl GeometrySink for Path {
    fn begin_figure(&mut self, start: Point, filled: bool) {
        self.filled = filled;
        self.commands.push(PathCommand::MoveTo(start));
    }

    fn line_to(&mut self, point: Point) {
        self.commands.push(PathCommand::LineTo(point));
    }

    fn arc_to(
        &mut self,
        end: Point,
        radii: Vec2,
        rotation: f64,
        large_arc: bool,
        sweep: SweepDirection,
    ) {
        self.commands.push(PathCommand::ArcTo {
            end,
            radii,
            rotation,
            large_arc,
            sweep,
        });
    }

    fn quadratic_bezier_to(&mut self, control: Point, end: Point) {
        self.commands.push(PathCommand::QuadTo { control, end });
    }

    fn end_figure(&mut self, closed: bool) {
        if closed {
            self.commands.push(PathCommand::Close);
        }
    }
}
