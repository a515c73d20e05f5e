//! Value types shared by the layout builder and the offset engine.

/// Outer size of the page body, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Derived sizing for the slide strip.
///
/// Always rebuilt from `(slide_count, viewport)` with [`Geometry::compute`];
/// never patched field by field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Geometry {
    pub slide_count: usize,
    pub slide_width: f64,
    pub slide_height: f64,
    pub container_width: f64,
    pub container_height: f64,
}

impl Geometry {
    /// Compute geometry for `slide_count` slides filling `viewport`.
    ///
    /// The container is tall enough that scrolling vertically through
    /// `(n - 1)` slide widths pages horizontally through every slide.
    pub fn compute(slide_count: usize, viewport: Viewport) -> Self {
        let n = slide_count as f64;
        let slide_width = viewport.width;
        let slide_height = viewport.height;
        Self {
            slide_count,
            slide_width,
            slide_height,
            container_width: slide_width * n,
            container_height: (n - 1.0) * slide_width + slide_height,
        }
    }
}

impl Default for Geometry {
    /// Sizing used before the first measurement: one 800x600 slide.
    fn default() -> Self {
        Self {
            slide_count: 0,
            slide_width: 800.0,
            slide_height: 600.0,
            container_width: 800.0,
            container_height: 600.0,
        }
    }
}

/// A transparent region of a blurred slide and the crisp image layered into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay<N> {
    /// The `.transparent` element inside the slide.
    pub host: N,
    /// The full-size copy of the slide image appended into `host`.
    pub image: N,
}

/// One horizontally paged content unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide<N> {
    /// Position in the strip, fixed at construction.
    pub index: usize,
    pub background_image: String,
    pub is_blurred: bool,
    pub blurred_image: Option<String>,
    /// The slide element itself.
    pub element: N,
    /// Envelope wrapping the slide's original content.
    pub content: N,
    /// Background layer prepended to the slide.
    pub background: N,
    pub overlays: Vec<Overlay<N>>,
}

impl<N> Slide<N> {
    /// All elements that carry the slide's parallax offset.
    pub fn parallax_layers(&self) -> impl Iterator<Item = &N> {
        std::iter::once(&self.background).chain(self.overlays.iter().map(|o| &o.image))
    }
}

/// Background translation computed for a single slide.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlideOffset {
    pub index: usize,
    pub offset: f64,
}
