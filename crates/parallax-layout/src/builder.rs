//! One-time DOM bootstrap.

use parallax_core::{
    config::non_empty, Geometry, LayoutError, Overlay, ParallaxConfig, Slide, Surface,
};

use crate::sizing::{apply_geometry, offset_in_strip, overlay_left, recompute_geometry};

/// Image sources resolved for one slide before any DOM mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidePlan<N> {
    pub index: usize,
    pub element: N,
    pub image: String,
    pub is_blurred: bool,
    pub blurred_image: Option<String>,
}

/// The reshaped widget: containers, slides and their current geometry.
#[derive(Debug, Clone)]
pub struct Layout<N> {
    /// Root element, now the horizontal axis container.
    pub x_container: N,
    /// Wrapper holding every slide; translated as one unit.
    pub strip: N,
    pub slides: Vec<Slide<N>>,
    pub geometry: Geometry,
    /// Whether the root carried the slide container class before init.
    pub had_container_class: bool,
}

/// Resolve image sources for every slide under `root`.
///
/// A slide's own `data-<imageAttribute>` wins over the `image` option. Fails
/// on the first slide with neither; the surface is only read.
pub fn plan_slides<S: Surface>(
    surface: &S,
    root: &S::Node,
    config: &ParallaxConfig,
) -> Result<Vec<SlidePlan<S::Node>>, LayoutError> {
    surface
        .find_by_class(root, &config.slide_class)
        .into_iter()
        .enumerate()
        .map(|(index, element)| plan_slide(surface, index, element, config))
        .collect()
}

fn plan_slide<S: Surface>(
    surface: &S,
    index: usize,
    element: S::Node,
    config: &ParallaxConfig,
) -> Result<SlidePlan<S::Node>, LayoutError> {
    let own_image = surface.data_attribute(&element, &config.image_attribute);
    let image = non_empty(own_image.as_deref())
        .or_else(|| config.default_image())
        .map(str::to_string)
        .ok_or_else(|| LayoutError::MissingImageSource {
            index,
            attribute: config.image_attribute.clone(),
        })?;

    let own_blurred = surface.data_attribute(&element, &config.image_blur_attribute);
    let blurred_image = non_empty(own_blurred.as_deref())
        .or_else(|| config.default_blurred_image())
        .map(str::to_string);

    Ok(SlidePlan {
        index,
        is_blurred: surface.has_class(&element, &config.slide_blur_class),
        element,
        image,
        blurred_image,
    })
}

/// Reshape `root` into a horizontal slide strip.
///
/// Must run exactly once per root element. On error nothing has been written
/// to the surface.
pub fn initialize<S: Surface>(
    surface: &mut S,
    root: &S::Node,
    config: &ParallaxConfig,
) -> Result<Layout<S::Node>, LayoutError> {
    let plans = plan_slides(surface, root, config)?;

    let had_container_class = surface.has_class(root, &config.slide_container);
    surface.add_class(root, &config.x_container)?;
    surface.remove_class(root, &config.slide_container)?;
    let strip = surface.wrap_contents(root, &config.y_container)?;

    let geometry = recompute_geometry(surface, plans.len());
    log::debug!(
        "laying out {} slides at {}x{}",
        geometry.slide_count,
        geometry.slide_width,
        geometry.slide_height
    );

    let slides = plans
        .into_iter()
        .map(|plan| construct_slide(surface, &strip, plan, config, &geometry))
        .collect::<Result<Vec<_>, _>>()?;

    let layout = Layout {
        x_container: root.clone(),
        strip,
        slides,
        geometry,
        had_container_class,
    };
    apply_geometry(surface, &layout, config)?;
    Ok(layout)
}

fn construct_slide<S: Surface>(
    surface: &mut S,
    strip: &S::Node,
    plan: SlidePlan<S::Node>,
    config: &ParallaxConfig,
    geometry: &Geometry,
) -> Result<Slide<S::Node>, LayoutError> {
    let content = surface.wrap_contents(&plan.element, &config.slide_content_class)?;

    let mut background_class = config.slide_background_class.clone();
    let mut background_src = plan.image.as_str();
    let mut overlays = Vec::new();

    if plan.is_blurred {
        for host in surface.find_by_class(&plan.element, &config.transparent_class) {
            let image = surface.append_image(&host, &plan.image)?;
            let host_left = offset_in_strip(surface, strip, &host);
            let left = overlay_left(plan.index, geometry.slide_width, host_left);
            surface.set_size(&image, Some(geometry.slide_width), None)?;
            surface.set_left(&image, left)?;
            overlays.push(Overlay { host, image });
        }

        match &plan.blurred_image {
            Some(blurred) => background_src = blurred.as_str(),
            None => {
                background_class.push(' ');
                background_class.push_str(&config.blur_class);
            }
        }
    }

    let background = surface.prepend_background(&plan.element, &background_class, background_src)?;

    Ok(Slide {
        index: plan.index,
        background_image: plan.image,
        is_blurred: plan.is_blurred,
        blurred_image: plan.blurred_image,
        element: plan.element,
        content,
        background,
        overlays,
    })
}
