//! Undoing the bootstrap.

use parallax_core::{ParallaxConfig, Surface, SurfaceError};

use crate::builder::Layout;

/// Return the root and its slides to their pre-init shape.
///
/// Removes the background layers and overlay images, unwraps the content and
/// strip envelopes, clears every inline style the widget wrote and restores
/// the root's classes.
pub fn restore<S: Surface>(
    surface: &mut S,
    layout: Layout<S::Node>,
    config: &ParallaxConfig,
) -> Result<(), SurfaceError> {
    for slide in &layout.slides {
        for overlay in &slide.overlays {
            surface.remove(&overlay.image)?;
        }
        surface.remove(&slide.background)?;
        surface.unwrap_contents(&slide.content)?;
        surface.clear_style(&slide.element, "width")?;
        surface.clear_style(&slide.element, "height")?;
    }

    surface.unwrap_contents(&layout.strip)?;
    surface.clear_style(&layout.x_container, "height")?;
    surface.remove_class(&layout.x_container, &config.x_container)?;
    if layout.had_container_class {
        surface.add_class(&layout.x_container, &config.slide_container)?;
    }
    log::debug!("restored {} slides", layout.slides.len());
    Ok(())
}
