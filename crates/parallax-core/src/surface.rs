//! The DOM collaborator.
//!
//! Layout and the offset engine never touch a document directly. They read
//! and write through a [`Surface`], which the browser bindings implement over
//! `web-sys` and [`crate::MemorySurface`] implements over an in-memory tree.

use crate::errors::SurfaceError;
use crate::types::Viewport;

/// Operations the widget needs from a document.
///
/// Class arguments may hold several space-separated class names.
pub trait Surface {
    /// Opaque handle to an element.
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// Current outer size of the page body.
    fn viewport(&self) -> Viewport;

    /// Current vertical scroll position of the page.
    fn scroll_offset(&self) -> f64;

    /// Descendants of `root` carrying `class`, in document order.
    fn find_by_class(&self, root: &Self::Node, class: &str) -> Vec<Self::Node>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), SurfaceError>;

    fn remove_class(&mut self, node: &Self::Node, class: &str) -> Result<(), SurfaceError>;

    /// Value of the `data-<name>` attribute, if present.
    fn data_attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Move every child of `node` into a new `div.<class>` and return it.
    fn wrap_contents(&mut self, node: &Self::Node, class: &str) -> Result<Self::Node, SurfaceError>;

    /// Insert `div.<class> > img[src]` as the first child of `node` and return the `div`.
    fn prepend_background(
        &mut self,
        node: &Self::Node,
        class: &str,
        src: &str,
    ) -> Result<Self::Node, SurfaceError>;

    /// Append `img[src]` as the last child of `parent` and return it.
    fn append_image(&mut self, parent: &Self::Node, src: &str) -> Result<Self::Node, SurfaceError>;

    /// Replace `wrapper` with its own children, in place.
    fn unwrap_contents(&mut self, wrapper: &Self::Node) -> Result<(), SurfaceError>;

    /// Detach `node` from the document.
    fn remove(&mut self, node: &Self::Node) -> Result<(), SurfaceError>;

    /// Horizontal position of `node` relative to the document.
    fn offset_left(&self, node: &Self::Node) -> f64;

    /// Set the CSS width and/or height in pixels.
    fn set_size(
        &mut self,
        node: &Self::Node,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<(), SurfaceError>;

    /// Set the CSS `left` in pixels.
    fn set_left(&mut self, node: &Self::Node, left: f64) -> Result<(), SurfaceError>;

    /// Translate `node` horizontally by `x` pixels.
    fn set_translate_x(&mut self, node: &Self::Node, x: f64) -> Result<(), SurfaceError>;

    /// Remove an inline style property.
    fn clear_style(&mut self, node: &Self::Node, property: &str) -> Result<(), SurfaceError>;
}

/// CSS length in pixels.
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

/// CSS transform for a horizontal translation.
pub fn translate_x(x: f64) -> String {
    format!("translate3d({}px, 0px, 0px)", x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px() {
        assert_eq!(px(800.0), "800px");
        assert_eq!(px(-12.5), "-12.5px");
    }

    #[test]
    fn test_translate_x() {
        assert_eq!(translate_x(-700.0), "translate3d(-700px, 0px, 0px)");
        assert_eq!(translate_x(0.0), "translate3d(0px, 0px, 0px)");
    }
}
