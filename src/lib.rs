//! Sprite sheet layout: pack named images into a row-major grid, then
//! describe where each one landed so it can be cropped back out with CSS.
//!
//! The layout engine is pure geometry with no pixel operations or I/O, and is
//! `no_std` + `alloc` compatible. Compositing, discovery and the command-line
//! tool sit on top of it behind features.
//!
//! # Modules
//!
//! - [`catalog`]: Source names and sizes → sanitized, placement-ready items
//! - [`grid`]: Row/column partitioning and the [`LayoutPlan`]
//! - [`stylesheet`]: CSS offsets rendered from a plan
//! - `svg`: SVG preview of a plan (feature `svg`)
//! - `composite`: Pixel compositing and PNG output (feature `image`)
//! - `discover`: Directory walking and header probing (feature `cli`)
//!
//! # Example
//!
//! ```
//! use zensprite::{Catalog, GridConfig, Rect, Size, Source, Stylesheet};
//!
//! let catalog = Catalog::build(
//!     [
//!         Source::new("A.png", 10, 10),
//!         Source::new("B.png", 10, 10),
//!         Source::new("C.png", 10, 10),
//!     ],
//!     None,
//! )
//! .unwrap();
//!
//! let plan = GridConfig::new().columns(2).plan(catalog.items()).unwrap();
//! assert_eq!(plan.canvas(), Size::new(20, 20));
//! assert_eq!(plan.placements()[2].rect, Rect::new(0, 10, 10, 10));
//!
//! let css = Stylesheet::new("sprite.png").render(&plan);
//! assert!(css.contains(".img.img-c {\n\tbackground-position: -0px -10px;"));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod catalog;
mod error;
pub mod geometry;
pub mod grid;
pub mod stylesheet;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "image")]
pub mod composite;

#[cfg(feature = "cli")]
pub mod discover;

pub use catalog::{Catalog, Collision, Item, Source, build, sanitize_id};
pub use error::LayoutError;
pub use geometry::{Rect, Size};
pub use grid::{GridConfig, LayoutPlan, Placement, RowSpan, plan};
pub use stylesheet::Stylesheet;
