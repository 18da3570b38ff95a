//! CSS rendering of a [`LayoutPlan`].
//!
//! One shared rule points at the composite image; one rule per placement
//! gives its background offset and box size. Every number is copied from the
//! plan as-is.
//!
//! ```text
//! .img {
//!     display: inline-block;
//!     background: url('sprite.png') no-repeat;
//! }
//!
//! .img.img-home {
//!     background-position: -0px -0px;
//!     width: 16px;
//!     height: 16px;
//! }
//! ```

use alloc::string::String;
use core::fmt::Write;

use crate::grid::LayoutPlan;

/// Stylesheet options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stylesheet {
    image_url: String,
    class_prefix: String,
    banner: Option<String>,
}

impl Stylesheet {
    /// Class prefix used unless overridden.
    pub const DEFAULT_PREFIX: &'static str = "img";

    /// Stylesheet referencing the composite at `image_url`, as written in
    /// `url(...)`. Usually the image's file name.
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            class_prefix: String::from(Self::DEFAULT_PREFIX),
            banner: Some(String::from(concat!(
                "Generated by zensprite ",
                env!("CARGO_PKG_VERSION")
            ))),
        }
    }

    /// Class shared by every sprite; per-sprite classes are `{prefix}-{id}`.
    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// Comment written at the top. `None` omits it.
    pub fn banner(mut self, banner: Option<String>) -> Self {
        self.banner = banner;
        self
    }

    /// Render CSS for `plan`.
    pub fn render(&self, plan: &LayoutPlan) -> String {
        let mut css = String::with_capacity(128 + plan.placements().len() * 96);
        let prefix = &self.class_prefix;

        if let Some(banner) = &self.banner {
            // `*/` inside the banner would end the comment early.
            let _ = writeln!(css, "/* {} */\n", banner.replace("*/", "* /"));
        }

        let _ = write!(
            css,
            ".{prefix} {{\n\tdisplay: inline-block;\n\tbackground: url('{}') no-repeat;\n}}\n\n",
            escape_url(&self.image_url)
        );

        for placement in plan.placements() {
            let r = placement.rect;
            let _ = write!(
                css,
                ".{prefix}.{prefix}-{} {{\n\tbackground-position: -{}px -{}px;\n\twidth: {}px;\n\theight: {}px;\n}}\n\n",
                placement.id, r.x, r.y, r.width, r.height
            );
        }

        css
    }
}

/// Escape a value for a single-quoted CSS `url()`.
fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '\\' | '\'' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out
}
