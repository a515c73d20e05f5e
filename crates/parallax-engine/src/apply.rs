//! Writing offsets to the document.

use parallax_core::{Slide, SlideOffset, Surface, SurfaceError};
use parallax_layout::Layout;

use crate::offsets::{initial_offsets, ScrollFrame};

/// Translate the strip and every recomputed slide's background layers.
pub fn apply_frame<S: Surface>(
    surface: &mut S,
    layout: &Layout<S::Node>,
    frame: &ScrollFrame,
) -> Result<(), SurfaceError> {
    surface.set_translate_x(&layout.strip, frame.strip_offset)?;
    apply_offsets(surface, &layout.slides, &frame.backgrounds)
}

/// Establish the starting parallax position of every slide after the first.
pub fn apply_initial_offsets<S: Surface>(
    surface: &mut S,
    layout: &Layout<S::Node>,
    speed: f64,
) -> Result<(), SurfaceError> {
    let offsets = initial_offsets(&layout.geometry, speed);
    apply_offsets(surface, &layout.slides, &offsets)
}

fn apply_offsets<S: Surface>(
    surface: &mut S,
    slides: &[Slide<S::Node>],
    offsets: &[SlideOffset],
) -> Result<(), SurfaceError> {
    for SlideOffset { index, offset } in offsets {
        let Some(slide) = slides.get(*index) else {
            log::trace!("no slide at index {}, skipping", index);
            continue;
        };
        // The background and its overlays must always move together.
        for layer in slide.parallax_layers() {
            surface.set_translate_x(layer, *offset)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::on_scroll;
    use parallax_core::{MemoryNode, MemorySurface, ParallaxConfig, Viewport};
    use parallax_layout::initialize;

    fn make_widget(surface: &mut MemorySurface, count: usize, blurred: &[usize]) -> Layout<MemoryNode> {
        let root = surface.create_div(surface.body(), "slide-container");
        for i in 0..count {
            let class = if blurred.contains(&i) { "slide blurSlide" } else { "slide" };
            let slide = surface.create_div(root, class);
            surface.create_div(slide, "transparent");
        }
        let config = ParallaxConfig {
            image: Some("bg.jpg".to_string()),
            ..ParallaxConfig::default()
        };
        initialize(surface, &root, &config).unwrap()
    }

    #[test]
    fn test_initial_offsets_skip_first_slide() {
        let mut surface = MemorySurface::new(Viewport::new(1000.0, 700.0));
        let layout = make_widget(&mut surface, 3, &[]);

        apply_initial_offsets(&mut surface, &layout, 0.25).unwrap();

        assert!(surface.style(layout.slides[0].background, "transform").is_none());
        for slide in &layout.slides[1..] {
            assert_eq!(
                surface.style(slide.background, "transform"),
                Some("translate3d(-750px, 0px, 0px)")
            );
        }
    }

    #[test]
    fn test_overlays_follow_background() {
        let mut surface = MemorySurface::new(Viewport::new(1000.0, 700.0));
        let layout = make_widget(&mut surface, 3, &[1]);
        let overlay = layout.slides[1].overlays[0].image;

        apply_initial_offsets(&mut surface, &layout, 0.5).unwrap();
        assert_eq!(surface.style(overlay, "transform"), Some("translate3d(-500px, 0px, 0px)"));

        let frame = on_scroll(1000.0, &layout.geometry, 0.5);
        apply_frame(&mut surface, &layout, &frame).unwrap();
        assert_eq!(
            surface.style(overlay, "transform"),
            surface.style(layout.slides[1].background, "transform")
        );
        assert_eq!(surface.style(overlay, "transform"), Some("translate3d(0px, 0px, 0px)"));
    }

    #[test]
    fn test_apply_frame_moves_strip_and_visible_pair() {
        let mut surface = MemorySurface::new(Viewport::new(1000.0, 700.0));
        let layout = make_widget(&mut surface, 3, &[]);

        let frame = on_scroll(400.0, &layout.geometry, 0.5);
        apply_frame(&mut surface, &layout, &frame).unwrap();

        assert_eq!(surface.style(layout.strip, "transform"), Some("translate3d(-400px, 0px, 0px)"));
        assert_eq!(
            surface.style(layout.slides[0].background, "transform"),
            Some("translate3d(200px, 0px, 0px)")
        );
        assert_eq!(
            surface.style(layout.slides[1].background, "transform"),
            Some("translate3d(-300px, 0px, 0px)")
        );
        assert!(surface.style(layout.slides[2].background, "transform").is_none());
    }

    #[test]
    fn test_out_of_range_offsets_are_skipped() {
        let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
        let layout = make_widget(&mut surface, 1, &[]);
        let offsets = [SlideOffset { index: 5, offset: 10.0 }];
        apply_offsets(&mut surface, &layout.slides, &offsets).unwrap();
        assert!(surface.style(layout.slides[0].background, "transform").is_none());
    }
}
