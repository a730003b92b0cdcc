//! Trellis Layout
//!
//! Layout hosts built on the trellis geometry and callout outlines:
//!
//! - [`WaterfallPanel`]: packs items into the currently shortest of a fixed
//!   number of columns, vertically or horizontally
//! - [`ArrowedContent`]: frames content in a callout and insets it by the
//!   arrow's protrusion
//!
//! Both hosts recompute explicitly. Changing a panel's column count or
//! orientation drops the previous column assignments; changing an arrow
//! parameter refreshes the content margin immediately.

pub mod arrowed_content;
pub mod waterfall;

pub use arrowed_content::ArrowedContent;
pub use waterfall::{
    arrange_sizes, measure_sizes, ArrangeOutput, ArrangedItem, Column, FixedChild, LayoutChild,
    Orientation, WaterfallConfig, WaterfallPanel,
};

pub use trellis_core::{Rect, Result, Size, Thickness, TrellisError};
