//! Browser DOM surface.
//!
//! Implements [`Surface`] over `web-sys` elements of the current document.

use parallax_core::{px, translate_x, Surface, SurfaceError, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, Node, Window};

/// The live page: the global window and its document.
pub struct WebSurface {
    window: Window,
    document: Document,
}

impl WebSurface {
    /// Bind to the global window.
    pub fn new() -> Result<Self, SurfaceError> {
        let window = web_sys::window()
            .ok_or_else(|| SurfaceError::operation("window", "no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| SurfaceError::operation("document", "window has no document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn create_div(&self, class: &str) -> Result<Element, SurfaceError> {
        let div = self
            .document
            .create_element("div")
            .map_err(|e| js_error("create_element", e))?;
        div.set_class_name(class);
        Ok(div)
    }

    fn create_image(&self, src: &str) -> Result<Element, SurfaceError> {
        let img = self
            .document
            .create_element("img")
            .map_err(|e| js_error("create_element", e))?;
        img.set_attribute("src", src)
            .map_err(|e| js_error("set_attribute", e))?;
        Ok(img)
    }
}

fn js_error(operation: &str, err: JsValue) -> SurfaceError {
    SurfaceError::operation(operation, format!("{:?}", err))
}

fn style_of(node: &Element) -> Result<CssStyleDeclaration, SurfaceError> {
    node.dyn_ref::<HtmlElement>()
        .map(|el| el.style())
        .ok_or_else(|| SurfaceError::operation("style", "element is not an HTML element"))
}

fn set_style(node: &Element, property: &str, value: &str) -> Result<(), SurfaceError> {
    style_of(node)?
        .set_property(property, value)
        .map_err(|e| js_error("set_property", e))
}

impl Surface for WebSurface {
    type Node = Element;

    fn viewport(&self) -> Viewport {
        match self.document.body() {
            Some(body) => Viewport::new(f64::from(body.offset_width()), f64::from(body.offset_height())),
            None => {
                log::warn!("document has no body, using an empty viewport");
                Viewport::default()
            }
        }
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn find_by_class(&self, root: &Element, class: &str) -> Vec<Element> {
        let list = match root.query_selector_all(&format!(".{}", class)) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("invalid class selector '{}': {:?}", class, err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<(), SurfaceError> {
        let list = node.class_list();
        for name in class.split_whitespace() {
            list.add_1(name).map_err(|e| js_error("add_class", e))?;
        }
        Ok(())
    }

    fn remove_class(&mut self, node: &Element, class: &str) -> Result<(), SurfaceError> {
        let list = node.class_list();
        for name in class.split_whitespace() {
            list.remove_1(name).map_err(|e| js_error("remove_class", e))?;
        }
        Ok(())
    }

    fn data_attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(&format!("data-{}", name))
    }

    fn wrap_contents(&mut self, node: &Element, class: &str) -> Result<Element, SurfaceError> {
        let wrapper = self.create_div(class)?;
        while let Some(child) = node.first_child() {
            wrapper
                .append_child(&child)
                .map_err(|e| js_error("append_child", e))?;
        }
        node.append_child(&wrapper)
            .map_err(|e| js_error("append_child", e))?;
        Ok(wrapper)
    }

    fn prepend_background(&mut self, node: &Element, class: &str, src: &str) -> Result<Element, SurfaceError> {
        let layer = self.create_div(class)?;
        let img = self.create_image(src)?;
        layer
            .append_child(&img)
            .map_err(|e| js_error("append_child", e))?;
        node.insert_before(&layer, node.first_child().as_ref())
            .map_err(|e| js_error("insert_before", e))?;
        Ok(layer)
    }

    fn append_image(&mut self, parent: &Element, src: &str) -> Result<Element, SurfaceError> {
        let img = self.create_image(src)?;
        parent
            .append_child(&img)
            .map_err(|e| js_error("append_child", e))?;
        Ok(img)
    }

    fn unwrap_contents(&mut self, wrapper: &Element) -> Result<(), SurfaceError> {
        let parent = wrapper
            .parent_node()
            .ok_or_else(|| SurfaceError::operation("unwrap_contents", "wrapper is detached"))?;
        let anchor: &Node = wrapper;
        while let Some(child) = wrapper.first_child() {
            parent
                .insert_before(&child, Some(anchor))
                .map_err(|e| js_error("insert_before", e))?;
        }
        wrapper.remove();
        Ok(())
    }

    fn remove(&mut self, node: &Element) -> Result<(), SurfaceError> {
        node.remove();
        Ok(())
    }

    fn offset_left(&self, node: &Element) -> f64 {
        let scroll_x = self.window.scroll_x().unwrap_or(0.0);
        node.get_bounding_client_rect().left() + scroll_x
    }

    fn set_size(&mut self, node: &Element, width: Option<f64>, height: Option<f64>) -> Result<(), SurfaceError> {
        if let Some(width) = width {
            set_style(node, "width", &px(width))?;
        }
        if let Some(height) = height {
            set_style(node, "height", &px(height))?;
        }
        Ok(())
    }

    fn set_left(&mut self, node: &Element, left: f64) -> Result<(), SurfaceError> {
        set_style(node, "left", &px(left))
    }

    fn set_translate_x(&mut self, node: &Element, x: f64) -> Result<(), SurfaceError> {
        set_style(node, "transform", &translate_x(x))
    }

    fn clear_style(&mut self, node: &Element, property: &str) -> Result<(), SurfaceError> {
        style_of(node)?
            .remove_property(property)
            .map(|_| ())
            .map_err(|e| js_error("remove_property", e))
    }
}
