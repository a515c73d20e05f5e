//! A single parallax widget bound to one root element.

use parallax_core::{Geometry, ParallaxConfig, ParallaxError, Surface};
use parallax_engine::{apply_frame, apply_initial_offsets, on_scroll, ScrollFrame};
use parallax_layout::{apply_geometry, initialize, recompute_geometry, restore, Layout};

/// Live state of one widget instance.
pub struct Widget<S: Surface> {
    config: ParallaxConfig,
    layout: Layout<S::Node>,
}

impl<S: Surface> Widget<S> {
    /// Reshape `root` and set the starting parallax position.
    ///
    /// Fails with [`LayoutError::MissingImageSource`](parallax_core::LayoutError)
    /// before touching the document if any slide lacks an image.
    pub fn init(surface: &mut S, root: &S::Node, config: ParallaxConfig) -> Result<Self, ParallaxError> {
        let mut config = config;
        let layout = initialize(surface, root, &config)?;
        config.record_geometry(&layout.geometry);
        if let Err(err) = apply_initial_offsets(surface, &layout, config.speed) {
            if let Err(undo) = restore(surface, layout, &config) {
                log::error!("could not undo layout after failed init: {}", undo);
            }
            return Err(err.into());
        }
        log::info!(
            "parallax ready: {} slides, speed {}",
            layout.slides.len(),
            config.speed
        );
        Ok(Self { config, layout })
    }

    /// Re-measure the viewport and resize containers, slides and overlays.
    ///
    /// Geometry is written synchronously so the next scroll event sees it.
    pub fn handle_resize(&mut self, surface: &mut S) -> Result<Geometry, ParallaxError> {
        self.layout.geometry = recompute_geometry(surface, self.layout.slides.len());
        self.config.record_geometry(&self.layout.geometry);
        apply_geometry(surface, &self.layout, &self.config)?;
        log::debug!(
            "resized to {}x{}",
            self.layout.geometry.slide_width,
            self.layout.geometry.slide_height
        );
        Ok(self.layout.geometry)
    }

    /// Sample the page's scroll position and translate strip and backgrounds.
    pub fn handle_scroll(&mut self, surface: &mut S) -> Result<ScrollFrame, ParallaxError> {
        let scroll_offset = surface.scroll_offset();
        self.scroll_to(surface, scroll_offset)
    }

    /// Translate strip and backgrounds for an explicit scroll offset.
    pub fn scroll_to(&mut self, surface: &mut S, scroll_offset: f64) -> Result<ScrollFrame, ParallaxError> {
        let frame = on_scroll(scroll_offset, &self.layout.geometry, self.config.speed);
        log::trace!("scroll {} -> strip {}", scroll_offset, frame.strip_offset);
        apply_frame(surface, &self.layout, &frame)?;
        Ok(frame)
    }

    pub fn geometry(&self) -> Geometry {
        self.layout.geometry
    }

    pub fn slide_count(&self) -> usize {
        self.layout.slides.len()
    }

    pub fn speed(&self) -> f64 {
        self.config.speed
    }

    /// Change the parallax speed; takes effect on the next scroll event.
    pub fn set_speed(&mut self, speed: f64) {
        self.config.speed = speed;
    }

    pub fn config(&self) -> &ParallaxConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout<S::Node> {
        &self.layout
    }

    /// Undo the bootstrap and release the instance.
    pub fn destroy(self, surface: &mut S) -> Result<(), ParallaxError> {
        restore(surface, self.layout, &self.config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_core::{LayoutError, MemoryNode, MemorySurface, Viewport};

    fn make_host(surface: &mut MemorySurface, count: usize) -> MemoryNode {
        let root = surface.create_div(surface.body(), "slide-container");
        for i in 0..count {
            let slide = surface.create_div(root, "slide");
            surface.set_attribute(slide, "data-image", &format!("slide-{}.jpg", i));
        }
        root
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_three_slide_walkthrough() {
        let mut surface = MemorySurface::new(Viewport::new(1000.0, 700.0));
        let root = make_host(&mut surface, 3);
        let config = ParallaxConfig {
            speed: 0.3,
            ..ParallaxConfig::default()
        };

        let mut widget = Widget::init(&mut surface, &root, config).unwrap();
        assert_eq!(widget.slide_count(), 3);
        assert_eq!(widget.config().slide_width, 1000.0);
        assert_eq!(widget.config().container_height, 2700.0);

        let initial = parallax_engine::initial_offsets(&widget.geometry(), widget.speed());
        assert!(approx(initial[0].offset, -700.0));

        surface.set_scroll_offset(500.0);
        let frame = widget.handle_scroll(&mut surface).unwrap();
        assert_eq!(frame.strip_offset, -500.0);
        assert!(approx(frame.offset_for(0).unwrap(), 350.0));
        assert_eq!(
            surface.style(widget.layout().strip, "transform"),
            Some("translate3d(-500px, 0px, 0px)")
        );
    }

    #[test]
    fn test_init_sets_initial_offsets() {
        let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
        let root = make_host(&mut surface, 2);
        let config = ParallaxConfig {
            speed: 0.5,
            ..ParallaxConfig::default()
        };

        let widget = Widget::init(&mut surface, &root, config).unwrap();
        let slides = &widget.layout().slides;
        assert!(surface.style(slides[0].background, "transform").is_none());
        assert_eq!(
            surface.style(slides[1].background, "transform"),
            Some("translate3d(-400px, 0px, 0px)")
        );
    }

    #[test]
    fn test_init_without_image_fails() {
        let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
        let root = surface.create_div(surface.body(), "slide-container");
        surface.create_div(root, "slide");

        let result = Widget::init(&mut surface, &root, ParallaxConfig::default());
        assert!(matches!(
            result,
            Err(ParallaxError::Layout(LayoutError::MissingImageSource { index: 0, .. }))
        ));
        assert_eq!(surface.mutation_count(), 0);
    }

    #[test]
    fn test_failed_init_restores_host() {
        let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
        let root = make_host(&mut surface, 2);
        let slides: Vec<MemoryNode> = surface.children(root).to_vec();
        surface.reject_style("transform");

        let result = Widget::init(&mut surface, &root, ParallaxConfig::default());
        assert!(matches!(result, Err(ParallaxError::Surface(_))));
        assert_eq!(surface.children(root), slides.as_slice());
        assert!(surface.has_class(&root, "slide-container"));
        assert!(!surface.has_class(&root, "x-container"));
        for slide in &slides {
            assert_eq!(surface.children(*slide).len(), 0);
        }
    }

    #[test]
    fn test_resize_then_scroll_uses_new_geometry() {
        let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
        let root = make_host(&mut surface, 3);
        let mut widget = Widget::init(&mut surface, &root, ParallaxConfig::default()).unwrap();

        surface.set_viewport(Viewport::new(1000.0, 500.0));
        let geometry = widget.handle_resize(&mut surface).unwrap();
        assert_eq!(geometry.container_width, 3000.0);
        assert_eq!(widget.config().slide_height, 500.0);

        let frame = widget.scroll_to(&mut surface, 900.0).unwrap();
        let indices: Vec<usize> = frame.backgrounds.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_set_speed_applies_on_next_scroll() {
        let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
        let root = make_host(&mut surface, 2);
        let mut widget = Widget::init(&mut surface, &root, ParallaxConfig::default()).unwrap();

        widget.set_speed(1.0);
        let frame = widget.scroll_to(&mut surface, 300.0).unwrap();
        assert!(frame.backgrounds.iter().all(|b| b.offset == 0.0));
    }

    #[test]
    fn test_destroy_restores_host() {
        let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
        let root = make_host(&mut surface, 2);
        let slides: Vec<MemoryNode> = surface.children(root).to_vec();

        let widget = Widget::init(&mut surface, &root, ParallaxConfig::default()).unwrap();
        widget.destroy(&mut surface).unwrap();

        assert_eq!(surface.children(root), slides.as_slice());
        assert!(surface.has_class(&root, "slide-container"));
    }
}
