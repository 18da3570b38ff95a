//! Finding source images on disk and reading their sizes.
//!
//! Walk order is fixed so the same folder always yields the same sheet:
//! inside each directory, files come before sub-directories and both are
//! sorted by name. Hidden entries (leading `.`) are skipped entirely.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::catalog::Source;
use crate::geometry::Size;

/// Extensions picked up by discovery, compared case-insensitively.
pub const EXTENSIONS: &[&str] = &["png"];

/// Discovery error.
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    /// The root to scan does not exist or is a file.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    /// A directory entry could not be read.
    #[error("failed to walk {}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    /// An image header could not be read.
    #[error("failed to read image header of {}", .path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// List image files under `root`, descending into sub-directories when
/// `recursive` is set.
pub fn find_images(root: &Path, recursive: bool) -> Result<Vec<PathBuf>, DiscoverError> {
    if !root.is_dir() {
        return Err(DiscoverError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .follow_links(true)
        .sort_by(files_first);

    let mut found = Vec::new();
    // The root itself is exempt so that `.` or a hidden root still works.
    for entry in walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry.map_err(|source| DiscoverError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && has_image_extension(entry.path()) {
            found.push(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), recursive, found = found.len(), "discovered images");
    Ok(found)
}

/// Turn discovered paths into catalog sources.
///
/// Only image headers are read. With an override active nothing is read at
/// all, since intrinsic sizes would be ignored anyway.
pub fn probe(paths: &[PathBuf], override_size: Option<u32>) -> Result<Vec<Source>, DiscoverError> {
    paths
        .iter()
        .map(|path| {
            let name = path.to_string_lossy().into_owned();
            if override_size.is_some() {
                return Ok(Source::without_size(name));
            }
            let (width, height) =
                image::image_dimensions(path).map_err(|source| DiscoverError::Probe {
                    path: path.clone(),
                    source,
                })?;
            tracing::trace!(path = %path.display(), width, height, "probed image");
            Ok(Source {
                name,
                size: Some(Size::new(width, height)),
            })
        })
        .collect()
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}
