//! Waterfall panel - shortest-column packing
//!
//! Items are placed one at a time, in order, into whichever column is
//! currently shortest along the main axis. Columns then grow by the item's
//! main extent, and each column is as wide as its widest item.
//!
//! ```text
//!   Vertical (main axis = height)     Horizontal (main axis = width)
//!
//!   ┌────┐┌──────┐                    ┌──────┐┌───┐┌────────┐
//!   │ 0  ││  1   │                    │  0   ││ 2 ││   3    │  ← column 0
//!   ├────┤│      │                    └──────┘└───┘└────────┘
//!   │ 2  ││      │                    ┌─────────┐┌──────┐
//!   ├────┤├──────┤                    │    1    ││  4   │      ← column 1
//!   │ 3  ││  4   │                    └─────────┘└──────┘
//! ```
//!
//! The panel keeps only the column chosen for each item in the last arrange
//! pass. Every measure and arrange rebuilds column state from scratch, so the
//! same input always produces the same output.
//!
//! All column comparisons go through [`trellis_core::fuzzy`]: two columns
//! whose extents differ only by rounding noise count as equal, and the lower
//! index wins.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use trellis_core::fuzzy::{first_min_index, greater_than, max_extent};
use trellis_core::{Rect, Result, Size, TrellisError};

/// Column state fits on the stack for typical column counts.
type ColumnBuf = SmallVec<[f64; 8]>;

// =============================================================================
// Orientation
// =============================================================================

/// Direction columns grow in.
///
/// `Vertical` stacks items top to bottom inside columns laid out left to
/// right. `Horizontal` is the transpose: rows grow left to right and are
/// stacked top to bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }

    pub fn name(self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Orientation {
    type Err = TrellisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" | "v" => Ok(Orientation::Vertical),
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            _ => Err(TrellisError::unsupported("Orientation", s)),
        }
    }
}

impl TryFrom<String> for Orientation {
    type Error = TrellisError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Orientation> for String {
    fn from(value: Orientation) -> Self {
        value.name().to_string()
    }
}

impl TryFrom<u8> for Orientation {
    type Error = TrellisError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Orientation::Vertical),
            1 => Ok(Orientation::Horizontal),
            other => Err(TrellisError::unsupported("Orientation", other)),
        }
    }
}

// =============================================================================
// Main/cross axis mapping
// =============================================================================

/// A size expressed along the panel's axes.
///
/// `u` runs along the main axis (the one columns grow in), `v` across it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct UvSize {
    u: f64,
    v: f64,
}

impl UvSize {
    fn from_size(size: Size, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Vertical => Self {
                u: size.height,
                v: size.width,
            },
            Orientation::Horizontal => Self {
                u: size.width,
                v: size.height,
            },
        }
    }

    fn to_size(self, orientation: Orientation) -> Size {
        match orientation {
            Orientation::Vertical => Size::new(self.v, self.u),
            Orientation::Horizontal => Size::new(self.u, self.v),
        }
    }
}

// =============================================================================
// Column packing
// =============================================================================

/// Read-only view of one column after a pass
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Column {
    pub index: usize,
    /// Accumulated main-axis extent of the items placed so far
    pub main_extent: f64,
    /// Largest cross-axis extent of the items placed so far
    pub cross_extent: f64,
}

/// Per-pass column extents. One instance lives for a single measure or
/// arrange pass.
#[derive(Clone, Debug)]
struct ColumnSet {
    main: ColumnBuf,
    cross: ColumnBuf,
}

impl ColumnSet {
    fn new(count: NonZeroUsize) -> Self {
        let count = count.get();
        Self {
            main: SmallVec::from_elem(0.0, count),
            cross: SmallVec::from_elem(0.0, count),
        }
    }

    /// Place an item into the shortest column, returning the column and the
    /// main-axis offset the item starts at.
    fn place(&mut self, item: UvSize) -> (usize, f64) {
        // `main` is never empty: the count is non-zero
        let column = first_min_index(&self.main).unwrap_or(0);
        let offset = self.main[column];
        if greater_than(item.v, self.cross[column]) {
            self.cross[column] = item.v;
        }
        self.main[column] += item.u;
        (column, offset)
    }

    /// Total extent: longest column by summed cross extents
    fn extent(&self) -> UvSize {
        UvSize {
            u: max_extent(&self.main),
            v: self.cross.iter().sum(),
        }
    }

    /// Cross-axis offset of each column (prefix sums of the cross extents)
    fn cross_offsets(&self) -> ColumnBuf {
        let mut offsets = ColumnBuf::with_capacity(self.cross.len());
        let mut running = 0.0;
        for &cross in &self.cross {
            offsets.push(running);
            running += cross;
        }
        offsets
    }

    fn columns(&self) -> Vec<Column> {
        self.main
            .iter()
            .zip(&self.cross)
            .enumerate()
            .map(|(index, (&main_extent, &cross_extent))| Column {
                index,
                main_extent,
                cross_extent,
            })
            .collect()
    }
}

/// Where one item landed during arrange
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ArrangedItem {
    /// Position in the input sequence
    pub index: usize,
    /// Column the item was assigned to, in `[0, max_columns)`
    pub column: usize,
    /// Main-axis extent of the column before this item was added
    pub main_offset: f64,
    /// Final bounds: item's own size at (cross offset, main offset),
    /// swapped for horizontal panels
    pub bounds: Rect,
}

/// Result of an arrange pass
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArrangeOutput {
    /// Size consumed by the columns
    pub size: Size,
    pub items: Vec<ArrangedItem>,
    pub columns: Vec<Column>,
}

/// Measure a sequence of item sizes without keeping any state.
pub fn measure_sizes<I>(sizes: I, orientation: Orientation, max_columns: NonZeroUsize) -> Size
where
    I: IntoIterator<Item = Size>,
{
    let mut columns = ColumnSet::new(max_columns);
    for size in sizes {
        columns.place(UvSize::from_size(size, orientation));
    }
    columns.extent().to_size(orientation)
}

/// Arrange a sequence of item sizes without keeping any state.
///
/// Runs the same column selection as [`measure_sizes`], then lays the
/// columns side by side along the cross axis.
pub fn arrange_sizes(
    sizes: &[Size],
    orientation: Orientation,
    max_columns: NonZeroUsize,
) -> ArrangeOutput {
    let mut columns = ColumnSet::new(max_columns);
    let placements: Vec<(usize, f64)> = sizes
        .iter()
        .map(|&size| columns.place(UvSize::from_size(size, orientation)))
        .collect();

    let cross_offsets = columns.cross_offsets();
    let items = placements
        .into_iter()
        .zip(sizes)
        .enumerate()
        .map(|(index, ((column, main_offset), &size))| {
            let cross_offset = cross_offsets[column];
            let (x, y) = match orientation {
                Orientation::Vertical => (cross_offset, main_offset),
                Orientation::Horizontal => (main_offset, cross_offset),
            };
            ArrangedItem {
                index,
                column,
                main_offset,
                bounds: Rect::new(x, y, size.width, size.height),
            }
        })
        .collect();

    ArrangeOutput {
        size: columns.extent().to_size(orientation),
        items,
        columns: columns.columns(),
    }
}

// =============================================================================
// Configuration
// =============================================================================

fn default_max_columns() -> i64 {
    1
}

/// Panel configuration as read from a settings file.
///
/// `max_columns` is kept signed so that out-of-range values from the source
/// can be reported instead of silently wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterfallConfig {
    pub orientation: Orientation,
    #[serde(default = "default_max_columns")]
    pub max_columns: i64,
}

impl Default for WaterfallConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            max_columns: default_max_columns(),
        }
    }
}

impl WaterfallConfig {
    pub fn validate(&self) -> Result<()> {
        column_count(self.max_columns).map(|_| ())
    }
}

fn column_count(value: i64) -> Result<NonZeroUsize> {
    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(TrellisError::InvalidColumnCount(value))
}

// =============================================================================
// Panel host
// =============================================================================

/// An item the panel can measure and place.
pub trait LayoutChild {
    /// Natural size given the available space. The panel always offers an
    /// unbounded size.
    fn measure(&mut self, available: Size) -> Size;

    /// Size reported by the last `measure`
    fn desired_size(&self) -> Size;

    /// Receive final bounds and the column the item was assigned to.
    fn arrange(&mut self, bounds: Rect, column: usize);
}

/// A fixed-size child, mostly useful for hosts that already know their
/// item sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FixedChild {
    pub size: Size,
    pub bounds: Option<Rect>,
    pub column: Option<usize>,
}

impl FixedChild {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            bounds: None,
            column: None,
        }
    }
}

impl LayoutChild for FixedChild {
    fn measure(&mut self, _available: Size) -> Size {
        self.size
    }

    fn desired_size(&self) -> Size {
        self.size
    }

    fn arrange(&mut self, bounds: Rect, column: usize) {
        self.bounds = Some(bounds);
        self.column = Some(column);
    }
}

/// Panel that packs children into the shortest column.
///
/// # Example
///
/// ```rust
/// use trellis_layout::{FixedChild, WaterfallPanel};
///
/// let mut panel = WaterfallPanel::new(2).unwrap();
/// let mut items: Vec<FixedChild> = [30.0, 50.0, 20.0, 60.0, 40.0]
///     .iter()
///     .map(|&h| FixedChild::new(100.0, h))
///     .collect();
///
/// panel.measure(&mut items);
/// let output = panel.arrange(&mut items);
///
/// assert_eq!(panel.assigned_columns(), &[0, 1, 0, 0, 1]);
/// assert_eq!(output.size.height, 110.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WaterfallPanel {
    orientation: Orientation,
    max_columns: NonZeroUsize,
    assigned: Vec<usize>,
}

impl Default for WaterfallPanel {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            max_columns: NonZeroUsize::MIN,
            assigned: Vec::new(),
        }
    }
}

impl WaterfallPanel {
    /// Create a vertical panel with `max_columns` columns.
    pub fn new(max_columns: i64) -> Result<Self> {
        Ok(Self {
            max_columns: column_count(max_columns)?,
            ..Self::default()
        })
    }

    pub fn from_config(config: &WaterfallConfig) -> Result<Self> {
        Ok(Self::new(config.max_columns)?.with_orientation(config.orientation))
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.set_orientation(orientation);
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns.get()
    }

    /// Change the column count. Values below one are rejected and leave the
    /// panel unchanged.
    pub fn set_max_columns(&mut self, value: i64) -> Result<()> {
        let count = column_count(value)?;
        if count != self.max_columns {
            tracing::debug!(
                "waterfall: max_columns {} -> {}",
                self.max_columns,
                count
            );
            self.max_columns = count;
            self.invalidate();
        }
        Ok(())
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if orientation != self.orientation {
            tracing::debug!(
                "waterfall: orientation {} -> {}",
                self.orientation,
                orientation
            );
            self.orientation = orientation;
            self.invalidate();
        }
    }

    /// Drop the assignments from the last arrange pass
    pub fn invalidate(&mut self) {
        self.assigned.clear();
    }

    /// Column the item at `index` was placed in by the last arrange pass
    pub fn assigned_column(&self, index: usize) -> Option<usize> {
        self.assigned.get(index).copied()
    }

    pub fn assigned_columns(&self) -> &[usize] {
        &self.assigned
    }

    /// Measure every child with unbounded space and return the size the
    /// columns need.
    pub fn measure<C: LayoutChild>(&self, children: &mut [C]) -> Size {
        let size = measure_sizes(
            children.iter_mut().map(|child| child.measure(Size::INFINITY)),
            self.orientation,
            self.max_columns,
        );
        tracing::debug!(
            "waterfall measure: {} items, {} columns, desired {}x{}",
            children.len(),
            self.max_columns,
            size.width,
            size.height
        );
        size
    }

    /// Place every child using its desired size and record its column.
    pub fn arrange<C: LayoutChild>(&mut self, children: &mut [C]) -> ArrangeOutput {
        let sizes: Vec<Size> = children.iter().map(LayoutChild::desired_size).collect();
        let output = arrange_sizes(&sizes, self.orientation, self.max_columns);

        self.assigned.clear();
        self.assigned.extend(output.items.iter().map(|item| item.column));
        for (child, item) in children.iter_mut().zip(&output.items) {
            child.arrange(item.bounds, item.column);
        }

        tracing::debug!(
            "waterfall arrange: {} items into {} columns, size {}x{}",
            output.items.len(),
            self.max_columns,
            output.size.width,
            output.size.height
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_items(heights: &[f64], width: f64) -> Vec<FixedChild> {
        heights.iter().map(|&h| FixedChild::new(width, h)).collect()
    }

    fn two() -> NonZeroUsize {
        NonZeroUsize::new(2).unwrap()
    }

    #[test]
    fn test_two_column_scenario() {
        let mut panel = WaterfallPanel::new(2).unwrap();
        let mut items = column_items(&[30.0, 50.0, 20.0, 60.0, 40.0], 100.0);

        let desired = panel.measure(&mut items);
        assert_eq!(desired, Size::new(200.0, 110.0));

        let output = panel.arrange(&mut items);
        assert_eq!(panel.assigned_columns(), &[0, 1, 0, 0, 1]);

        let offsets: Vec<f64> = output.items.iter().map(|i| i.main_offset).collect();
        assert_eq!(offsets, vec![0.0, 0.0, 30.0, 50.0, 50.0]);

        let extents: Vec<f64> = output.columns.iter().map(|c| c.main_extent).collect();
        assert_eq!(extents, vec![110.0, 90.0]);
        assert_eq!(output.size, desired);
    }

    #[test]
    fn test_arranged_bounds_vertical() {
        let mut panel = WaterfallPanel::new(2).unwrap();
        let mut items = column_items(&[30.0, 50.0, 20.0, 60.0, 40.0], 100.0);
        panel.measure(&mut items);
        panel.arrange(&mut items);

        assert_eq!(items[0].bounds, Some(Rect::new(0.0, 0.0, 100.0, 30.0)));
        assert_eq!(items[1].bounds, Some(Rect::new(100.0, 0.0, 100.0, 50.0)));
        assert_eq!(items[3].bounds, Some(Rect::new(0.0, 50.0, 100.0, 60.0)));
        assert_eq!(items[4].bounds, Some(Rect::new(100.0, 50.0, 100.0, 40.0)));
        assert_eq!(items[4].column, Some(1));
    }

    #[test]
    fn test_horizontal_transposes() {
        let mut panel = WaterfallPanel::new(2)
            .unwrap()
            .with_orientation(Orientation::Horizontal);
        // Widths drive the main axis now.
        let mut items: Vec<FixedChild> = [30.0, 50.0, 20.0]
            .iter()
            .map(|&w| FixedChild::new(w, 10.0))
            .collect();

        let desired = panel.measure(&mut items);
        assert_eq!(desired, Size::new(50.0, 20.0));

        panel.arrange(&mut items);
        assert_eq!(panel.assigned_columns(), &[0, 1, 0]);
        assert_eq!(items[1].bounds, Some(Rect::new(0.0, 10.0, 50.0, 10.0)));
        assert_eq!(items[2].bounds, Some(Rect::new(30.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn test_column_width_is_widest_item() {
        let sizes = [
            Size::new(40.0, 10.0),
            Size::new(60.0, 10.0),
            Size::new(90.0, 10.0),
        ];
        let output = arrange_sizes(&sizes, Orientation::Vertical, two());
        // Column 0 holds items 0 and 2, column 1 holds item 1.
        assert_eq!(output.columns[0].cross_extent, 90.0);
        assert_eq!(output.columns[1].cross_extent, 60.0);
        assert_eq!(output.items[1].bounds.x(), 90.0);
        assert_eq!(output.size, Size::new(150.0, 20.0));
    }

    #[test]
    fn test_ties_go_to_lowest_column() {
        let sizes = [Size::new(10.0, 0.1 + 0.2), Size::new(10.0, 0.3)];
        let output = arrange_sizes(&sizes, Orientation::Vertical, two());
        assert_eq!(output.items[0].column, 0);
        assert_eq!(output.items[1].column, 1);

        // 0.1 + 0.2 and 0.3 differ by one ulp: still a tie, so column 0 wins.
        let third = arrange_sizes(
            &[sizes[0], sizes[1], Size::new(10.0, 5.0)],
            Orientation::Vertical,
            two(),
        );
        assert_eq!(third.items[2].column, 0);
    }

    #[test]
    fn test_more_columns_than_items() {
        let output = arrange_sizes(
            &[Size::new(10.0, 10.0)],
            Orientation::Vertical,
            NonZeroUsize::new(4).unwrap(),
        );
        assert_eq!(output.columns.len(), 4);
        assert_eq!(output.size, Size::new(10.0, 10.0));
    }

    #[test]
    fn test_empty_input() {
        let output = arrange_sizes(&[], Orientation::Vertical, two());
        assert!(output.items.is_empty());
        assert_eq!(output.size, Size::ZERO);
        assert_eq!(measure_sizes([], Orientation::Horizontal, two()), Size::ZERO);
    }

    #[test]
    fn test_invalid_column_count() {
        assert_eq!(
            WaterfallPanel::new(0).unwrap_err(),
            TrellisError::InvalidColumnCount(0)
        );
        assert!(WaterfallPanel::new(-3).is_err());

        let mut panel = WaterfallPanel::new(3).unwrap();
        assert!(panel.set_max_columns(0).is_err());
        assert_eq!(panel.max_columns(), 3);
    }

    #[test]
    fn test_reconfiguration_invalidates() {
        let mut panel = WaterfallPanel::new(2).unwrap();
        let mut items = column_items(&[10.0, 20.0], 5.0);
        panel.measure(&mut items);
        panel.arrange(&mut items);
        assert_eq!(panel.assigned_column(1), Some(1));

        panel.set_max_columns(2).unwrap();
        assert_eq!(panel.assigned_column(1), Some(1));

        panel.set_max_columns(1).unwrap();
        assert_eq!(panel.assigned_column(1), None);

        panel.arrange(&mut items);
        assert_eq!(panel.assigned_columns(), &[0, 0]);

        panel.set_orientation(Orientation::Horizontal);
        assert!(panel.assigned_columns().is_empty());
    }

    #[test]
    fn test_repeated_passes_are_stable() {
        let mut panel = WaterfallPanel::new(3).unwrap();
        let mut items = column_items(&[12.5, 7.25, 33.0, 1.0, 19.75, 8.0, 8.0], 20.0);
        panel.measure(&mut items);
        let first = panel.arrange(&mut items);
        panel.measure(&mut items);
        let second = panel.arrange(&mut items);
        assert_eq!(first, second);
    }

    #[test]
    fn test_orientation_parsing() {
        assert_eq!("Horizontal".parse::<Orientation>().unwrap(), Orientation::Horizontal);
        assert_eq!(" vertical ".parse::<Orientation>().unwrap(), Orientation::Vertical);
        assert!(matches!(
            "diagonal".parse::<Orientation>(),
            Err(TrellisError::UnsupportedValue { .. })
        ));
        assert!(Orientation::try_from(2u8).is_err());
    }

    #[test]
    fn test_orientation_names_match_command_line() {
        for (name, expected) in [
            ("h", Orientation::Horizontal),
            ("VERTICAL", Orientation::Vertical),
            ("Horizontal", Orientation::Horizontal),
        ] {
            let json = format!(r#"{{"orientation":"{name}"}}"#);
            let config: WaterfallConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(config.orientation, expected);
            assert_eq!(name.parse::<Orientation>().unwrap(), expected);
        }
        assert!(serde_json::from_str::<WaterfallConfig>(r#"{"orientation":"diagonal"}"#).is_err());
        assert_eq!(
            serde_json::to_string(&Orientation::Horizontal).unwrap(),
            r#""horizontal""#
        );
    }

    #[test]
    fn test_config_defaults_and_validation() {
        let config: WaterfallConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WaterfallConfig::default());
        assert_eq!(config.max_columns, 1);
        assert_eq!(config.orientation, Orientation::Vertical);

        let config: WaterfallConfig =
            serde_json::from_str(r#"{"orientation":"Horizontal","max_columns":0}"#).unwrap();
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.validate(), Err(TrellisError::InvalidColumnCount(0)));
        assert!(WaterfallPanel::from_config(&config).is_err());
    }
}
