//! Item catalog: raw source names and sizes in, placement-ready items out.
//!
//! # Example
//!
//! ```
//! use zensprite::{Catalog, Source};
//!
//! let catalog = Catalog::build(
//!     [Source::new("icons/Home Page.png", 16, 16), Source::new("icons/gear.png", 24, 24)],
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(catalog.items()[0].id(), "home-page");
//! assert_eq!(catalog.items()[1].width(), 24);
//! ```

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::LayoutError;
use crate::geometry::Size;

/// One image as reported by discovery.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Source {
    /// Raw name, usually the file path. The item id is derived from it.
    pub name: String,
    /// Intrinsic pixel size. May be `None` only when an override is active.
    pub size: Option<Size>,
}

impl Source {
    /// Source with known intrinsic dimensions.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            size: Some(Size::new(width, height)),
        }
    }

    /// Source whose dimensions were never read. Only valid with an override.
    pub fn without_size(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
        }
    }
}

/// One image ready for placement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Item {
    id: String,
    name: String,
    size: Size,
}

impl Item {
    /// Sanitized identifier, used as the stylesheet selector suffix.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw source name this item was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placement size: intrinsic, or the override when one is active.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Placement width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Placement height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }
}

/// An id produced by more than one source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collision<'a> {
    pub id: &'a str,
    /// Every source name that sanitized to `id`, in catalog order.
    pub names: Vec<&'a str>,
}

/// Immutable, ordered, non-empty set of items for one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<Item>,
    override_size: Option<u32>,
}

impl Catalog {
    /// Build a catalog from sources in discovery order.
    ///
    /// With `override_size` set, every item becomes `override × override` and
    /// intrinsic sizes are never looked at, so sources may be
    /// [`Source::without_size`].
    pub fn build<I>(sources: I, override_size: Option<u32>) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = Source>,
    {
        if override_size == Some(0) {
            return Err(LayoutError::InvalidConfiguration {
                key: "override size",
                reason: "must be at least 1",
            });
        }

        let sources = sources.into_iter();
        let mut items = Vec::with_capacity(sources.size_hint().0);
        for source in sources {
            let size = match (override_size, source.size) {
                (Some(side), _) => Size::square(side),
                (None, Some(size)) if size.is_empty() => {
                    return Err(LayoutError::ZeroSourceDimension { name: source.name });
                }
                (None, Some(size)) => size,
                (None, None) => return Err(LayoutError::UnknownSize { name: source.name }),
            };
            items.push(Item {
                id: sanitize_id(&source.name),
                name: source.name,
                size,
            });
        }

        if items.is_empty() {
            return Err(LayoutError::EmptyInput);
        }

        tracing::trace!(items = items.len(), ?override_size, "built sprite catalog");
        Ok(Self {
            items,
            override_size,
        })
    }

    /// Items in discovery order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate items in discovery order.
    pub fn iter(&self) -> core::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a built catalog; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The override every item was forced to, if any.
    pub fn override_size(&self) -> Option<u32> {
        self.override_size
    }

    /// Ids shared by more than one item, ordered by first occurrence.
    ///
    /// The catalog keeps colliding items as they are; what to do about them
    /// is up to the caller.
    pub fn duplicate_ids(&self) -> Vec<Collision<'_>> {
        let mut groups: BTreeMap<&str, (usize, Vec<&str>)> = BTreeMap::new();
        for (index, item) in self.items.iter().enumerate() {
            groups
                .entry(item.id())
                .or_insert_with(|| (index, Vec::new()))
                .1
                .push(item.name());
        }

        let mut collisions: Vec<(usize, Collision<'_>)> = groups
            .into_iter()
            .filter(|(_, (_, names))| names.len() > 1)
            .map(|(id, (first, names))| (first, Collision { id, names }))
            .collect();
        collisions.sort_by_key(|(first, _)| *first);
        collisions.into_iter().map(|(_, c)| c).collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = core::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl AsRef<[Item]> for Catalog {
    fn as_ref(&self) -> &[Item] {
        &self.items
    }
}

/// Build a catalog. Same as [`Catalog::build`].
pub fn build<I>(sources: I, override_size: Option<u32>) -> Result<Catalog, LayoutError>
where
    I: IntoIterator<Item = Source>,
{
    Catalog::build(sources, override_size)
}

/// Derive a stylesheet-safe identifier from a raw source name.
///
/// Drops any directory components (`/` or `\`) and the final extension,
/// lowercases, then replaces each character outside `[a-z0-9_-]` with `-`.
/// A leading dot does not start an extension.
pub fn sanitize_id(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };
    stem.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' => c,
            _ => '-',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    // ── sanitize_id ─────────────────────────────────────────────────────

    #[test]
    fn sanitize_strips_directories_and_extension() {
        assert_eq!(sanitize_id("assets/icons/Home.png"), "home");
        assert_eq!(sanitize_id(r"C:\art\Logo.PNG"), "logo");
        assert_eq!(sanitize_id("icons//home.png"), "home");
    }

    #[test]
    fn sanitize_replaces_each_bad_char() {
        assert_eq!(sanitize_id("Big Red  Button.png"), "big-red--button");
        assert_eq!(sanitize_id("a+b=c.png"), "a-b-c");
        assert_eq!(sanitize_id("keep_me-too.png"), "keep_me-too");
    }

    #[test]
    fn sanitize_only_last_extension() {
        assert_eq!(sanitize_id("archive.tar.gz"), "archive-tar");
        assert_eq!(sanitize_id("foo..png"), "foo-");
    }

    #[test]
    fn sanitize_leading_dot_is_not_extension() {
        assert_eq!(sanitize_id(".hidden"), "-hidden");
        assert_eq!(sanitize_id("dir/.hidden.png"), "-hidden");
    }

    #[test]
    fn sanitize_unicode() {
        // Non-ASCII letters survive lowercasing but are outside the allowed set.
        assert_eq!(sanitize_id("Ünïcode.png"), "-n-code");
        assert_eq!(sanitize_id("日本.png"), "--");
    }

    #[test]
    fn sanitize_empty_and_bare_directory() {
        assert_eq!(sanitize_id(""), "");
        assert_eq!(sanitize_id("dir/"), "");
        assert_eq!(sanitize_id("."), "-");
    }

    #[test]
    fn sanitize_is_deterministic() {
        let raw = "Some/Weird Name (2).PNG";
        assert_eq!(sanitize_id(raw), sanitize_id(raw));
        assert_eq!(sanitize_id(raw), "weird-name--2-");
    }

    // ── build ───────────────────────────────────────────────────────────

    #[test]
    fn build_keeps_order_and_intrinsic_sizes() {
        let catalog = Catalog::build(
            vec![
                Source::new("b.png", 30, 10),
                Source::new("a.png", 10, 20),
            ],
            None,
        )
        .unwrap();
        let ids: Vec<&str> = catalog.iter().map(Item::id).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(catalog.items()[0].size(), Size::new(30, 10));
        assert_eq!(catalog.items()[1].name(), "a.png");
        assert_eq!(catalog.override_size(), None);
    }

    #[test]
    fn build_empty_fails() {
        let none: Vec<Source> = Vec::new();
        assert_eq!(Catalog::build(none.clone(), None), Err(LayoutError::EmptyInput));
        assert_eq!(Catalog::build(none, Some(8)), Err(LayoutError::EmptyInput));
    }

    #[test]
    fn build_override_forces_every_size() {
        let catalog = build(
            vec![
                Source::new("a.png", 10, 200),
                Source::new("b.png", 1, 1),
                Source::without_size("c.png"),
            ],
            Some(50),
        )
        .unwrap();
        assert!(catalog.iter().all(|item| item.size() == Size::square(50)));
        assert_eq!(catalog.override_size(), Some(50));
    }

    #[test]
    fn build_override_ignores_zero_intrinsic() {
        let catalog = build(vec![Source::new("a.png", 0, 0)], Some(4)).unwrap();
        assert_eq!(catalog.items()[0].size(), Size::square(4));
    }

    #[test]
    fn build_zero_override_is_invalid() {
        let err = build(vec![Source::new("a.png", 1, 1)], Some(0)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfiguration { .. }));
    }

    #[test]
    fn build_sizeless_without_override() {
        assert_eq!(
            build(vec![Source::without_size("a.png")], None),
            Err(LayoutError::UnknownSize {
                name: "a.png".into()
            })
        );
    }

    #[test]
    fn build_zero_dimension() {
        assert_eq!(
            build(vec![Source::new("flat.png", 10, 0)], None),
            Err(LayoutError::ZeroSourceDimension {
                name: "flat.png".into()
            })
        );
    }

    #[test]
    fn build_does_not_deduplicate() {
        let catalog = build(
            vec![
                Source::new("a/icon.png", 1, 1),
                Source::new("b/icon.png", 2, 2),
            ],
            None,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[0].id(), catalog.items()[1].id());
    }

    // ── duplicate_ids ───────────────────────────────────────────────────

    #[test]
    fn duplicate_ids_reports_all_names_in_order() {
        let catalog = build(
            vec![
                Source::new("z/Star.png", 1, 1),
                Source::new("unique.png", 1, 1),
                Source::new("a/b.png", 1, 1),
                Source::new("y/star.png", 1, 1),
                Source::new("c/B.png", 1, 1),
                Source::new("x/STAR.png", 1, 1),
            ],
            None,
        )
        .unwrap();
        let collisions = catalog.duplicate_ids();
        assert_eq!(
            collisions,
            vec![
                Collision {
                    id: "star",
                    names: vec!["z/Star.png", "y/star.png", "x/STAR.png"],
                },
                Collision {
                    id: "b",
                    names: vec!["a/b.png", "c/B.png"],
                },
            ]
        );
    }

    #[test]
    fn duplicate_ids_empty_when_unique() {
        let catalog = build(
            vec![Source::new("a.png", 1, 1), Source::new("b.png", 1, 1)],
            None,
        )
        .unwrap();
        assert!(catalog.duplicate_ids().is_empty());
    }
}
