//! WebAssembly bindings for the horizontal parallax widget.
//!
//! A single entry point mirrors the plugin-style calling convention: pass an
//! element (or a list of them) with an options object to construct, or with
//! a method name and arguments to call.
//!
//! ## Example
//!
//! ```js
//! import { horizontalParallax } from 'parallax-wasm';
//!
//! const root = document.querySelector('.slide-container');
//! horizontalParallax(root, { speed: 0.3 });
//!
//! const count = horizontalParallax(root, 'slideCount');
//! horizontalParallax(root, 'speed', [0.5]);
//! horizontalParallax(root, 'destroy');
//! ```

use parallax_core::{ConfigError, DispatchError, ParallaxConfig};
use parallax_widget::{CallOutcome, Invocation, Method};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

mod page;
mod surface;

pub use page::{ElementHandle, HandleTable};
pub use surface::WebSurface;

/// Install the panic hook and route `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();

    // A second init (hot reload) keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Get the version of the widget.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Construct widgets on `elements` or call a method on them.
///
/// Returns `elements` for chainable calls and the getter's value otherwise.
#[wasm_bindgen(js_name = horizontalParallax)]
pub fn horizontal_parallax(elements: JsValue, options: JsValue, args: JsValue) -> Result<JsValue, JsError> {
    let selection = collect_elements(&elements);
    let invocation = parse_invocation(&options, &args).map_err(|e| JsError::new(&e.to_string()))?;

    let outcome = page::invoke(selection, invocation).map_err(|e| JsError::new(&e.to_string()))?;
    match outcome {
        CallOutcome::Chain => Ok(elements),
        CallOutcome::Value(value) => value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e))),
    }
}

fn collect_elements(elements: &JsValue) -> Vec<Element> {
    if let Some(element) = elements.dyn_ref::<Element>() {
        return vec![element.clone()];
    }
    if elements.is_undefined() || elements.is_null() {
        return Vec::new();
    }
    js_sys::Array::from(elements)
        .iter()
        .filter_map(|item| item.dyn_into::<Element>().ok())
        .collect()
}

fn parse_invocation(options: &JsValue, args: &JsValue) -> Result<Invocation, parallax_core::ParallaxError> {
    if options.is_undefined() || options.is_null() {
        return Ok(Invocation::Construct(ParallaxConfig::default()));
    }
    if let Some(name) = options.as_string() {
        let args: Vec<serde_json::Value> = if args.is_undefined() || args.is_null() {
            Vec::new()
        } else {
            serde_wasm_bindgen::from_value(args.clone()).map_err(|e| DispatchError::InvalidArguments {
                method: name.clone(),
                reason: e.to_string(),
            })?
        };
        return Ok(Invocation::Call(Method::parse(&name, &args)?));
    }
    if options.is_object() {
        let config: ParallaxConfig = serde_wasm_bindgen::from_value(options.clone())
            .map_err(|e| ConfigError::Invalid { reason: e.to_string() })?;
        return Ok(Invocation::Construct(config));
    }
    Err(ConfigError::Invalid {
        reason: "expected an options object or a method name".to_string(),
    }
    .into())
}
