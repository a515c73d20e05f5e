//! Geometry measurement and application.

use parallax_core::{Geometry, ParallaxConfig, SurfaceError, Surface};

use crate::builder::Layout;

/// Measure the viewport and compute fresh geometry for `slide_count` slides.
///
/// Reads the surface only; no element is re-wrapped.
pub fn recompute_geometry<S: Surface>(surface: &S, slide_count: usize) -> Geometry {
    Geometry::compute(slide_count, surface.viewport())
}

/// Horizontal position of an overlay image inside its transparent region,
/// chosen so the image lines up with the slide's full-width background.
///
/// `host_offset_left` is measured from the strip's left edge.
pub fn overlay_left(index: usize, slide_width: f64, host_offset_left: f64) -> f64 {
    index as f64 * slide_width - host_offset_left
}

/// Left offset of `host` relative to `strip`.
///
/// Both are measured in page coordinates, so the strip's current
/// translation cancels out.
pub fn offset_in_strip<S: Surface>(surface: &S, strip: &S::Node, host: &S::Node) -> f64 {
    surface.offset_left(host) - surface.offset_left(strip)
}

/// Write `layout.geometry` to the containers, slides and overlay images.
pub fn apply_geometry<S: Surface>(
    surface: &mut S,
    layout: &Layout<S::Node>,
    config: &ParallaxConfig,
) -> Result<(), SurfaceError> {
    let geometry = &layout.geometry;

    surface.set_size(
        &layout.x_container,
        None,
        Some(geometry.container_height - config.container_height_inset),
    )?;
    surface.set_size(
        &layout.strip,
        Some(geometry.container_width),
        Some(geometry.slide_height),
    )?;

    for slide in &layout.slides {
        surface.set_size(
            &slide.element,
            Some(geometry.slide_width),
            Some(geometry.slide_height),
        )?;
        for overlay in &slide.overlays {
            let host_left = offset_in_strip(surface, &layout.strip, &overlay.host);
            let left = overlay_left(slide.index, geometry.slide_width, host_left);
            surface.set_size(&overlay.image, Some(geometry.slide_width), None)?;
            surface.set_left(&overlay.image, left)?;
        }
    }

    Ok(())
}
