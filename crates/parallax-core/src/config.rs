//! Widget configuration.

use crate::types::Geometry;

/// Construction options for a parallax widget.
///
/// Every field is optional when deserializing; missing fields keep the
/// defaults below. The sizing fields are overwritten by the layout builder
/// at init and on every resize.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ParallaxConfig {
    /// Class marking each slide element
    pub slide_class: String,
    /// Class of the envelope wrapping a slide's original content
    pub slide_content_class: String,
    /// Class of the background layer prepended to each slide
    pub slide_background_class: String,
    /// Class removed from the root element once it becomes the outer container
    pub slide_container: String,
    /// Class added to the root element (horizontal axis container)
    pub x_container: String,
    /// Class of the strip wrapper created inside the root element
    pub y_container: String,
    pub slide_width: f64,
    pub slide_height: f64,
    pub container_width: f64,
    pub container_height: f64,
    /// Pixels subtracted from the outer container height
    pub container_height_inset: f64,
    /// Fraction of scroll speed at which backgrounds move, in [0, 1]
    pub speed: f64,
    /// Default background image for slides without their own
    pub image: Option<String>,
    /// Default pre-blurred image for blurred slides
    pub blured_image: Option<String>,
    /// Data attribute holding a slide's own image (`data-<name>`)
    pub image_attribute: String,
    /// Data attribute holding a slide's own pre-blurred image
    pub image_blur_attribute: String,
    /// Class of the regions through which the crisp image shows
    pub transparent_class: String,
    /// Class marking a slide as blurred
    pub slide_blur_class: String,
    /// Class added to the background layer when no pre-blurred image exists
    pub blur_class: String,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        let geometry = Geometry::default();
        Self {
            slide_class: "slide".to_string(),
            slide_content_class: "slide-body".to_string(),
            slide_background_class: "slide-background".to_string(),
            slide_container: "slide-container".to_string(),
            x_container: "x-container".to_string(),
            y_container: "y-container".to_string(),
            slide_width: geometry.slide_width,
            slide_height: geometry.slide_height,
            container_width: geometry.container_width,
            container_height: geometry.container_height,
            container_height_inset: 0.0,
            speed: 0.2,
            image: None,
            blured_image: None,
            image_attribute: "image".to_string(),
            image_blur_attribute: "image-blur".to_string(),
            transparent_class: "transparent".to_string(),
            slide_blur_class: "blurSlide".to_string(),
            blur_class: "blur".to_string(),
        }
    }
}

impl ParallaxConfig {
    /// Parse a configuration object, filling missing options with defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, crate::ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parallax damping factor: the fraction of strip motion applied to backgrounds.
    pub fn damping(&self) -> f64 {
        1.0 - self.speed
    }

    /// Copy measured geometry into the sizing options.
    pub fn record_geometry(&mut self, geometry: &Geometry) {
        self.slide_width = geometry.slide_width;
        self.slide_height = geometry.slide_height;
        self.container_width = geometry.container_width;
        self.container_height = geometry.container_height;
    }

    /// Default image, ignoring empty strings.
    pub fn default_image(&self) -> Option<&str> {
        non_empty(self.image.as_deref())
    }

    /// Default pre-blurred image, ignoring empty strings.
    pub fn default_blurred_image(&self) -> Option<&str> {
        non_empty(self.blured_image.as_deref())
    }
}

/// Treat an empty string the same as a missing value.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
