//! Trellis Paint
//!
//! Outline construction for callout shapes: rounded rectangles whose edge is
//! interrupted by an arrow tail at one of twelve placements. All core types
//! are unified with trellis_core, and every outline is streamed through the
//! [`GeometrySink`] trait so hosts can feed their own geometry contexts.
//!
//! # Features
//!
//! - Arrow placement and pointing resolution
//! - Arrow metrics (shoulder, tail height, protrusion)
//! - Callout outline tracing into any geometry sink
//! - Rounded rectangle and arrowed rectangle shapes
//! - Cursor-tracking path builder
//!
//! # Example
//!
//! ```rust
//! use trellis_paint::{arrow_rectangle_path, ArrowGeometry, ArrowPlacement};
//! use trellis_core::Rect;
//!
//! let geometry = ArrowGeometry::default().with_radius(6.0);
//! let path = arrow_rectangle_path(
//!     Rect::new(0.0, 0.0, 160.0, 90.0),
//!     ArrowPlacement::TopEdgeAlignedLeft,
//!     &geometry,
//! );
//!
//! println!("{}", path.to_svg_data());
//! ```

pub mod arrow;
pub mod callout;
pub mod path;
pub mod primitives;

// ─────────────────────────────────────────────────────────────────────────────
// Core type re-exports from trellis_core (unified type system)
// ─────────────────────────────────────────────────────────────────────────────

pub use trellis_core::{
    GeometrySink, Path, PathCommand, Point, Rect, Size, SweepDirection, Thickness, Vec2,
};

// ─────────────────────────────────────────────────────────────────────────────
// trellis_paint specific exports
// ─────────────────────────────────────────────────────────────────────────────

pub use arrow::{ArrowGeometry, ArrowMetrics, ArrowPlacement, ArrowPointing};
pub use callout::{
    arrow_rectangle_path, base_center, body_rect, draw_arrow_rectangle, ArrowAnchors,
    CORNER_ARC_ROTATION,
};
pub use path::PathBuilder;
pub use primitives::{ArrowedRectangle, RoundedRect};
