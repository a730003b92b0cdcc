//! Trellis Core
//!
//! This crate provides the foundational primitives shared by the Trellis
//! widget crates:
//!
//! - **Geometry**: `f64` points, sizes, rectangles and per-side thickness
//! - **Path Model**: recorded path commands and the [`GeometrySink`] seam that
//!   shape builders stream into
//! - **Fuzzy Comparison**: epsilon-tolerant float comparison that keeps layout
//!   decisions stable across repeated passes
//! - **Errors**: the [`TrellisError`] contract-violation type
//!
//! # Example
//!
//! ```rust
//! use trellis_core::{fuzzy, Rect, Thickness};
//!
//! let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let content = bounds.deflate(Thickness::new(0.0, 0.0, 0.0, 4.8));
//!
//! assert!(fuzzy::are_close(content.bottom(), 95.2));
//! ```

pub mod draw;
pub mod error;
pub mod fuzzy;
pub mod geometry;

pub use draw::{GeometrySink, Path, PathCommand, SweepDirection};
pub use error::{Result, TrellisError};
pub use geometry::{Point, Rect, Size, Thickness, Vec2};
