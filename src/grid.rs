//! Row-major grid planning.
//!
//! Items are chunked in catalog order into rows of at most `columns` items
//! (one row when there is no limit). Items sit flush to the top of their row
//! and rows stack downwards, with `padding` between neighbours on both axes.
//!
//! # Example
//!
//! ```
//! use zensprite::{Catalog, GridConfig, Rect, Size, Source};
//!
//! let catalog = Catalog::build(
//!     [Source::new("a.png", 10, 20), Source::new("b.png", 30, 10)],
//!     None,
//! )
//! .unwrap();
//!
//! let plan = GridConfig::new().padding(5).plan(catalog.items()).unwrap();
//!
//! assert_eq!(plan.canvas(), Size::new(45, 20));
//! assert_eq!(plan.placements()[1].rect, Rect::new(15, 0, 30, 10));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::catalog::Item;
use crate::error::LayoutError;
use crate::geometry::{Rect, Size};

/// Grid shape options.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridConfig {
    /// Maximum items per row. `None` puts everything in one row.
    pub columns: Option<u32>,
    /// Gap in pixels between adjacent items and between rows.
    pub padding: u32,
}

impl GridConfig {
    /// Single row, no padding.
    pub const fn new() -> Self {
        Self {
            columns: None,
            padding: 0,
        }
    }

    /// Limit rows to `columns` items each.
    pub const fn columns(mut self, columns: u32) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Set the gap between items and rows.
    pub const fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Reject configurations no plan can be built from.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns == Some(0) {
            return Err(LayoutError::InvalidConfiguration {
                key: "column limit",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Plan `items` with this configuration. Same as [`plan`].
    pub fn plan(&self, items: &[Item]) -> Result<LayoutPlan, LayoutError> {
        plan(items, self)
    }
}

/// Where one item landed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Item id, copied from the catalog.
    pub id: String,
    /// Canvas rectangle the item occupies.
    pub rect: Rect,
}

/// One horizontal band of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowSpan {
    /// Index of the row's first item in catalog order.
    pub start: usize,
    /// Number of items in the row.
    pub len: usize,
    /// Top edge shared by every item in the row.
    pub y: u32,
    /// Item widths plus the gaps between them.
    pub width: u32,
    /// Tallest item in the row.
    pub height: u32,
}

impl RowSpan {
    /// Catalog index range covered by this row.
    pub fn range(&self) -> core::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

/// Computed sprite sheet layout.
///
/// The single source of truth for every coordinate the compositor and the
/// stylesheet use. Built once by [`plan`] and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutPlan {
    canvas: Size,
    padding: u32,
    placements: Vec<Placement>,
    rows: Vec<RowSpan>,
}

impl LayoutPlan {
    /// Composite canvas dimensions.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Gap the plan was computed with.
    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// One placement per catalog item, in catalog order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> &[RowSpan] {
        &self.rows
    }

    /// Placements belonging to `row`.
    pub fn row_placements(&self, row: &RowSpan) -> &[Placement] {
        &self.placements[row.range()]
    }

    /// Fraction of the canvas covered by sprites, in `0.0..=1.0`.
    pub fn occupancy(&self) -> f64 {
        let total = self.canvas.area();
        if total == 0 {
            return 0.0;
        }
        let used: u64 = self.placements.iter().map(|p| p.rect.area()).sum();
        used as f64 / total as f64
    }
}

/// Plan a row-major grid for `items`.
///
/// Fails on an empty slice, on a zero column limit, and when any coordinate
/// would not fit in `u32`. Deterministic: the same inputs always give the
/// same plan.
pub fn plan(items: &[Item], config: &GridConfig) -> Result<LayoutPlan, LayoutError> {
    config.validate()?;
    if items.is_empty() {
        return Err(LayoutError::EmptyInput);
    }

    let per_row = match config.columns {
        Some(columns) => columns as usize,
        None => items.len(),
    };
    let padding = config.padding;

    let mut placements = Vec::with_capacity(items.len());
    let mut rows = Vec::with_capacity(items.len().div_ceil(per_row));
    let mut canvas_width = 0u32;
    let mut y = 0u32;

    for (row_index, chunk) in items.chunks(per_row).enumerate() {
        if row_index > 0 {
            y = add(y, padding)?;
        }

        let start = placements.len();
        let mut x = 0u32;
        let mut height = 0u32;
        for (col, item) in chunk.iter().enumerate() {
            if col > 0 {
                x = add(x, padding)?;
            }
            placements.push(Placement {
                id: String::from(item.id()),
                rect: Rect::at(x, y, item.size()),
            });
            x = add(x, item.width())?;
            height = height.max(item.height());
        }

        rows.push(RowSpan {
            start,
            len: chunk.len(),
            y,
            width: x,
            height,
        });
        canvas_width = canvas_width.max(x);
        y = add(y, height)?;
    }

    let canvas = Size::new(canvas_width, y);
    tracing::debug!(
        items = placements.len(),
        rows = rows.len(),
        width = canvas.width,
        height = canvas.height,
        padding,
        "planned sprite grid"
    );

    Ok(LayoutPlan {
        canvas,
        padding,
        placements,
        rows,
    })
}

fn add(a: u32, b: u32) -> Result<u32, LayoutError> {
    a.checked_add(b).ok_or(LayoutError::DimensionOverflow)
}
