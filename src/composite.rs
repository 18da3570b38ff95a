//! Pixel compositing: copy every sprite onto one canvas at its planned spot.
//!
//! Coordinates come from the [`LayoutPlan`] only; nothing here recomputes
//! geometry. Pixel content comes through [`PixelSource`], so tests and
//! embedders can supply in-memory images instead of files.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageError, ImageFormat, RgbaImage};

use crate::catalog::{Catalog, Item};
use crate::geometry::Size;
use crate::grid::LayoutPlan;

/// Compositing error.
#[derive(Debug, thiserror::Error)]
pub enum CompositeError {
    /// A source image could not be read or decoded.
    #[error("failed to decode {name}")]
    Decode {
        name: String,
        #[source]
        source: ImageError,
    },
    /// The composite could not be encoded or written.
    #[error("failed to write {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
    /// A decoded image differs from the size it was planned at, with no
    /// override to fit it.
    #[error("{name} is {found} but was planned as {expected}")]
    SizeMismatch {
        name: String,
        expected: Size,
        found: Size,
    },
    /// The canvas has more RGBA bytes than one allocation can hold.
    #[error("a {size} sprite sheet is too large to allocate")]
    CanvasTooLarge { size: Size },
    /// The plan was not computed from this catalog.
    #[error("plan does not match catalog: {0}")]
    PlanMismatch(String),
}

/// Supplies decoded pixels for catalog items.
pub trait PixelSource {
    /// Decoded RGBA pixels for `item`, at whatever size the source has.
    fn load(&self, item: &Item) -> Result<RgbaImage, CompositeError>;
}

/// Reads each item's [`name`](Item::name) as a file path.
#[derive(Copy, Clone, Debug, Default)]
pub struct FileSource;

impl PixelSource for FileSource {
    fn load(&self, item: &Item) -> Result<RgbaImage, CompositeError> {
        image::open(item.name())
            .map(|decoded| decoded.to_rgba8())
            .map_err(|source| CompositeError::Decode {
                name: item.name().to_owned(),
                source,
            })
    }
}

impl<F> PixelSource for F
where
    F: Fn(&Item) -> Result<RgbaImage, CompositeError>,
{
    fn load(&self, item: &Item) -> Result<RgbaImage, CompositeError> {
        self(item)
    }
}

/// How an image is fitted to an override cell it doesn't match.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverrideFit {
    /// Resample to exactly the cell size.
    #[default]
    Scale,
    /// Keep the top-left region that fits. Smaller images stay smaller.
    Crop,
}

impl OverrideFit {
    fn apply(self, pixels: &RgbaImage, cell: Size) -> RgbaImage {
        match self {
            Self::Scale => imageops::resize(pixels, cell.width, cell.height, FilterType::Lanczos3),
            Self::Crop => imageops::crop_imm(
                pixels,
                0,
                0,
                cell.width.min(pixels.width()),
                cell.height.min(pixels.height()),
            )
            .to_image(),
        }
    }
}

/// Composite every catalog item onto a transparent canvas of the plan's size.
///
/// `plan` must have been computed from `catalog`. With an override active,
/// mismatched images are fitted per `fit`; otherwise a mismatch is an error.
pub fn compose<S>(
    catalog: &Catalog,
    plan: &LayoutPlan,
    source: &S,
    fit: OverrideFit,
) -> Result<RgbaImage, CompositeError>
where
    S: PixelSource + ?Sized,
{
    if catalog.len() != plan.placements().len() {
        return Err(CompositeError::PlanMismatch(format!(
            "{} items but {} placements",
            catalog.len(),
            plan.placements().len()
        )));
    }

    let canvas_size = plan.canvas();
    if canvas_bytes(canvas_size).is_none() {
        return Err(CompositeError::CanvasTooLarge { size: canvas_size });
    }
    let mut canvas = RgbaImage::new(canvas_size.width, canvas_size.height);

    for (index, (item, placement)) in catalog.iter().zip(plan.placements()).enumerate() {
        if item.id() != placement.id {
            return Err(CompositeError::PlanMismatch(format!(
                "item {index} is {:?} but placement is {:?}",
                item.id(),
                placement.id
            )));
        }

        let cell = placement.rect.size();
        let pixels = source.load(item)?;
        let found = Size::new(pixels.width(), pixels.height());
        let pixels = if found == cell {
            pixels
        } else if catalog.override_size().is_some() {
            fit.apply(&pixels, cell)
        } else {
            return Err(CompositeError::SizeMismatch {
                name: item.name().to_owned(),
                expected: cell,
                found,
            });
        };

        let (x, y) = (placement.rect.x, placement.rect.y);
        imageops::replace(&mut canvas, &pixels, i64::from(x), i64::from(y));
        tracing::trace!(id = %placement.id, x, y, "placed sprite");
    }

    Ok(canvas)
}

/// RGBA byte length of a canvas, if a single buffer can hold it.
fn canvas_bytes(size: Size) -> Option<usize> {
    let bytes = u64::from(size.width)
        .checked_mul(u64::from(size.height))?
        .checked_mul(4)?;
    usize::try_from(bytes).ok().filter(|&n| n <= isize::MAX as usize)
}

/// Encode `canvas` as PNG at `path`.
pub fn write_png(canvas: &RgbaImage, path: &Path) -> Result<(), CompositeError> {
    canvas
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| CompositeError::Encode {
            path: path.to_path_buf(),
            source,
        })
}
