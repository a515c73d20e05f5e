//! Page-wide widget state and window listeners.

use std::cell::RefCell;
use std::collections::HashMap;

use parallax_core::{ParallaxError, SurfaceError};
use parallax_widget::{dispatch, CallOutcome, InstanceRegistry, Invocation, Widget};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Window};

use crate::surface::WebSurface;

/// Opaque handle standing in for an element's identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementHandle(u32);

/// Maps elements to stable handles by identity.
pub struct HandleTable<E> {
    entries: Vec<(E, ElementHandle)>,
    next_id: u32,
}

impl<E: PartialEq> HandleTable<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Handle for `element`, assigning a new one on first sight.
    pub fn handle_for(&mut self, element: E) -> ElementHandle {
        if let Some((_, handle)) = self.entries.iter().find(|(e, _)| *e == element) {
            return *handle;
        }
        let handle = ElementHandle(self.next_id);
        self.next_id += 1;
        self.entries.push((element, handle));
        handle
    }

    pub fn release(&mut self, handle: ElementHandle) {
        self.entries.retain(|(_, h)| *h != handle);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<E: PartialEq> Default for HandleTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resize and scroll listeners registered on the window for one widget.
struct Listeners {
    window: Window,
    resize: Closure<dyn FnMut()>,
    scroll: Closure<dyn FnMut()>,
}

impl Listeners {
    fn bind(window: &Window, handle: ElementHandle) -> Result<Self, SurfaceError> {
        let resize = Closure::wrap(Box::new(move || {
            with_page(|page| page.on_resize(handle));
        }) as Box<dyn FnMut()>);
        let scroll = Closure::wrap(Box::new(move || {
            with_page(|page| page.on_scroll(handle));
        }) as Box<dyn FnMut()>);

        window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|e| SurfaceError::operation("add_event_listener", format!("{:?}", e)))?;
        window
            .add_event_listener_with_callback("scroll", scroll.as_ref().unchecked_ref())
            .map_err(|e| SurfaceError::operation("add_event_listener", format!("{:?}", e)))?;

        Ok(Self {
            window: window.clone(),
            resize,
            scroll,
        })
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("scroll", self.scroll.as_ref().unchecked_ref());
    }
}

/// Every widget on the page, plus what the browser needs to drive them.
pub struct Page {
    surface: WebSurface,
    registry: InstanceRegistry<ElementHandle, Widget<WebSurface>>,
    handles: HandleTable<Element>,
    listeners: HashMap<ElementHandle, Listeners>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

/// Run `f` against the page state if it exists and is not already in use.
fn with_page(f: impl FnOnce(&mut Page)) {
    PAGE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(page) = slot.as_mut() {
                f(page);
            }
        }
        Err(_) => log::warn!("parallax event dropped: page state busy"),
    });
}

/// Run an invocation, creating the page state on first use.
pub fn invoke(elements: Vec<Element>, invocation: Invocation) -> Result<CallOutcome, ParallaxError> {
    PAGE.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(Page::new()?);
        }
        match slot.as_mut() {
            Some(page) => page.run(elements, invocation),
            None => Err(SurfaceError::operation("page", "page state unavailable").into()),
        }
    })
}

impl Page {
    fn new() -> Result<Self, SurfaceError> {
        Ok(Self {
            surface: WebSurface::new()?,
            registry: InstanceRegistry::new(),
            handles: HandleTable::new(),
            listeners: HashMap::new(),
        })
    }

    fn run(&mut self, elements: Vec<Element>, invocation: Invocation) -> Result<CallOutcome, ParallaxError> {
        let selection: Vec<(ElementHandle, Element)> = elements
            .into_iter()
            .map(|element| (self.handles.handle_for(element.clone()), element))
            .collect();

        let outcome = dispatch(&mut self.registry, &mut self.surface, &selection, invocation);
        self.sync_listeners(&selection)?;
        outcome
    }

    /// Bind listeners for new instances and drop them for destroyed ones.
    fn sync_listeners(&mut self, selection: &[(ElementHandle, Element)]) -> Result<(), SurfaceError> {
        for (handle, _) in selection {
            let live = self.registry.contains(handle);
            let bound = self.listeners.contains_key(handle);
            if live && !bound {
                let listeners = Listeners::bind(self.surface.window(), *handle)?;
                self.listeners.insert(*handle, listeners);
            } else if !live {
                self.listeners.remove(handle);
                self.handles.release(*handle);
            }
        }
        Ok(())
    }

    fn on_resize(&mut self, handle: ElementHandle) {
        let Page { surface, registry, .. } = self;
        if let Some(widget) = registry.get_mut(&handle) {
            if let Err(err) = widget.handle_resize(surface) {
                log::error!("resize failed: {}", err);
            }
        }
    }

    fn on_scroll(&mut self, handle: ElementHandle) {
        let Page { surface, registry, .. } = self;
        if let Some(widget) = registry.get_mut(&handle) {
            if let Err(err) = widget.handle_scroll(surface) {
                log::error!("scroll update failed: {}", err);
            }
        }
    }
}
