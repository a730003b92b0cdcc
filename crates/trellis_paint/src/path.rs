//! Path building
//!
//! Core types are re-exported from trellis_core for a unified type system.
//! [`PathBuilder`] is a [`GeometrySink`] that records into a [`Path`] while
//! tracking the pen position and whether a figure is open.

// Re-export core types
pub use trellis_core::{GeometrySink, Path, PathCommand, Point, SweepDirection, Vec2};

/// Cursor-tracking sink for constructing paths
///
/// Segments issued outside an open figure are still recorded, but reported
/// through `tracing` since most consumers would drop or misdraw them.
pub struct PathBuilder {
    path: Path,
    current: Point,
    figure_open: bool,
    figures: usize,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            path: Path::new(),
            current: Point::ZERO,
            figure_open: false,
            figures: 0,
        }
    }

    pub fn build(self) -> Path {
        if self.figure_open {
            tracing::warn!("PathBuilder finished with an open figure");
        }
        self.path
    }

    /// Get the current cursor position
    pub fn current_position(&self) -> Point {
        self.current
    }

    /// True between `begin_figure` and `end_figure`
    pub fn is_figure_open(&self) -> bool {
        self.figure_open
    }

    /// Number of figures begun so far
    pub fn figure_count(&self) -> usize {
        self.figures
    }

    fn check_open(&self, op: &'static str) {
        if !self.figure_open {
            tracing::warn!(op, "path segment issued outside an open figure");
        }
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometrySink for PathBuilder {
    fn begin_figure(&mut self, start: Point, filled: bool) {
        if self.figure_open {
            tracing::warn!("begin_figure while previous figure is still open");
        }
        self.path.begin_figure(start, filled);
        self.current = start;
        self.figure_open = true;
        self.figures += 1;
    }

    fn line_to(&mut self, point: Point) {
        self.check_open("line_to");
        self.path.line_to(point);
        self.current = point;
    }

    fn arc_to(
        &mut self,
        end: Point,
        radii: Vec2,
        rotation: f64,
        large_arc: bool,
        sweep: SweepDirection,
    ) {
        self.check_open("arc_to");
        self.path.arc_to(end, radii, rotation, large_arc, sweep);
        self.current = end;
    }

    fn quadratic_bezier_to(&mut self, control: Point, end: Point) {
        self.check_open("quadratic_bezier_to");
        self.path.quadratic_bezier_to(control, end);
        self.current = end;
    }

    fn end_figure(&mut self, closed: bool) {
        self.check_open("end_figure");
        self.path.end_figure(closed);
        self.figure_open = false;
    }
}
