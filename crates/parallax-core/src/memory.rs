//! In-memory document surface.
//!
//! A minimal element tree that implements [`Surface`] without a browser.
//! Nodes live in an arena and are addressed by [`MemoryNode`] handles.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::errors::SurfaceError;
use crate::surface::{px, translate_x, Surface};
use crate::types::Viewport;

/// Handle to a node in a [`MemorySurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryNode(usize);

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    classes: SmallVec<[String; 4]>,
    attributes: IndexMap<String, String>,
    style: IndexMap<String, String>,
    parent: Option<MemoryNode>,
    children: Vec<MemoryNode>,
    offset_left: f64,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: SmallVec::new(),
            attributes: IndexMap::new(),
            style: IndexMap::new(),
            parent: None,
            children: Vec::new(),
            offset_left: 0.0,
        }
    }
}

/// An element tree rooted at a `body` node.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    nodes: Vec<NodeData>,
    body: MemoryNode,
    viewport: Viewport,
    scroll_offset: f64,
    /// Number of mutations made through the [`Surface`] trait
    mutations: usize,
    /// Style properties whose writes are rejected
    rejected_styles: Vec<String>,
}

impl MemorySurface {
    /// Create an empty document with the given body size.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            nodes: vec![NodeData::new("body")],
            body: MemoryNode(0),
            viewport,
            scroll_offset: 0.0,
            mutations: 0,
            rejected_styles: Vec::new(),
        }
    }

    pub fn body(&self) -> MemoryNode {
        self.body
    }

    /// Append a new element under `parent`.
    ///
    /// An unknown `parent` yields a detached element.
    pub fn create_element(&mut self, parent: MemoryNode, tag: &str) -> MemoryNode {
        let known = parent.0 < self.nodes.len();
        let id = self.detached(tag);
        if known {
            self.nodes[parent.0].children.push(id);
            self.nodes[id.0].parent = Some(parent);
        }
        id
    }

    /// Append a `div` with the given classes under `parent`.
    pub fn create_div(&mut self, parent: MemoryNode, class: &str) -> MemoryNode {
        let node = self.create_element(parent, "div");
        self.nodes[node.0].classes.extend(split_classes(class));
        node
    }

    /// Set a raw attribute. Unknown nodes are ignored.
    pub fn set_attribute(&mut self, node: MemoryNode, name: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Set the page-relative left offset reported for `node`.
    pub fn set_offset_left(&mut self, node: MemoryNode, offset_left: f64) {
        if let Some(data) = self.nodes.get_mut(node.0) {
            data.offset_left = offset_left;
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_scroll_offset(&mut self, scroll_offset: f64) {
        self.scroll_offset = scroll_offset;
    }

    pub fn tag(&self, node: MemoryNode) -> Option<&str> {
        self.nodes.get(node.0).map(|n| n.tag.as_str())
    }

    pub fn classes(&self, node: MemoryNode) -> &[String] {
        self.nodes.get(node.0).map(|n| n.classes.as_slice()).unwrap_or_default()
    }

    pub fn attribute(&self, node: MemoryNode, name: &str) -> Option<&str> {
        self.nodes.get(node.0)?.attributes.get(name).map(|s| s.as_str())
    }

    pub fn style(&self, node: MemoryNode, property: &str) -> Option<&str> {
        self.nodes.get(node.0)?.style.get(property).map(|s| s.as_str())
    }

    pub fn parent(&self, node: MemoryNode) -> Option<MemoryNode> {
        self.nodes.get(node.0)?.parent
    }

    pub fn children(&self, node: MemoryNode) -> &[MemoryNode] {
        self.nodes.get(node.0).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    /// Make every later write of the style `property` fail.
    pub fn reject_style(&mut self, property: &str) {
        self.rejected_styles.push(property.to_string());
    }

    fn check(&self, node: &MemoryNode) -> Result<(), SurfaceError> {
        if node.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(SurfaceError::UnknownNode)
        }
    }

    fn collect_by_class(&self, node: MemoryNode, class: &str, out: &mut Vec<MemoryNode>) {
        for &child in &self.nodes[node.0].children {
            if self.nodes[child.0].classes.iter().any(|c| c == class) {
                out.push(child);
            }
            self.collect_by_class(child, class, out);
        }
    }

    fn detached(&mut self, tag: &str) -> MemoryNode {
        let id = MemoryNode(self.nodes.len());
        self.nodes.push(NodeData::new(tag));
        id
    }

    fn set_style(&mut self, node: &MemoryNode, property: &str, value: String) -> Result<(), SurfaceError> {
        self.check(node)?;
        if self.rejected_styles.iter().any(|p| p == property) {
            return Err(SurfaceError::operation("set_style", format!("{} is read-only", property)));
        }
        self.nodes[node.0].style.insert(property.to_string(), value);
        self.mutations += 1;
        Ok(())
    }
}

fn split_classes(class: &str) -> impl Iterator<Item = String> + '_ {
    class.split_whitespace().map(|c| c.to_string())
}

impl Surface for MemorySurface {
    type Node = MemoryNode;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn find_by_class(&self, root: &MemoryNode, class: &str) -> Vec<MemoryNode> {
        let mut found = Vec::new();
        if root.0 < self.nodes.len() {
            self.collect_by_class(*root, class, &mut found);
        }
        found
    }

    fn has_class(&self, node: &MemoryNode, class: &str) -> bool {
        self.nodes
            .get(node.0)
            .map_or(false, |n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: &MemoryNode, class: &str) -> Result<(), SurfaceError> {
        self.check(node)?;
        for name in split_classes(class) {
            let classes = &mut self.nodes[node.0].classes;
            if !classes.contains(&name) {
                classes.push(name);
            }
        }
        self.mutations += 1;
        Ok(())
    }

    fn remove_class(&mut self, node: &MemoryNode, class: &str) -> Result<(), SurfaceError> {
        self.check(node)?;
        let names: Vec<String> = split_classes(class).collect();
        self.nodes[node.0].classes.retain(|c| !names.contains(c));
        self.mutations += 1;
        Ok(())
    }

    fn data_attribute(&self, node: &MemoryNode, name: &str) -> Option<String> {
        self.nodes
            .get(node.0)?
            .attributes
            .get(&format!("data-{}", name))
            .cloned()
    }

    fn wrap_contents(&mut self, node: &MemoryNode, class: &str) -> Result<MemoryNode, SurfaceError> {
        self.check(node)?;
        let wrapper = self.detached("div");
        self.nodes[wrapper.0].classes.extend(split_classes(class));
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in &children {
            self.nodes[child.0].parent = Some(wrapper);
        }
        self.nodes[wrapper.0].children = children;
        self.nodes[wrapper.0].parent = Some(*node);
        self.nodes[node.0].children.push(wrapper);
        self.mutations += 1;
        Ok(wrapper)
    }

    fn prepend_background(
        &mut self,
        node: &MemoryNode,
        class: &str,
        src: &str,
    ) -> Result<MemoryNode, SurfaceError> {
        self.check(node)?;
        let layer = self.detached("div");
        self.nodes[layer.0].classes.extend(split_classes(class));
        self.nodes[layer.0].parent = Some(*node);
        self.nodes[node.0].children.insert(0, layer);
        let img = self.create_element(layer, "img");
        self.set_attribute(img, "src", src);
        self.mutations += 1;
        Ok(layer)
    }

    fn append_image(&mut self, parent: &MemoryNode, src: &str) -> Result<MemoryNode, SurfaceError> {
        self.check(parent)?;
        let img = self.create_element(*parent, "img");
        self.set_attribute(img, "src", src);
        self.mutations += 1;
        Ok(img)
    }

    fn unwrap_contents(&mut self, wrapper: &MemoryNode) -> Result<(), SurfaceError> {
        self.check(wrapper)?;
        let parent = self.nodes[wrapper.0].parent.ok_or(SurfaceError::UnknownNode)?;
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| c == wrapper)
            .ok_or(SurfaceError::UnknownNode)?;
        let children = std::mem::take(&mut self.nodes[wrapper.0].children);
        for child in &children {
            self.nodes[child.0].parent = Some(parent);
        }
        self.nodes[parent.0].children.splice(position..=position, children);
        self.nodes[wrapper.0].parent = None;
        self.mutations += 1;
        Ok(())
    }

    fn remove(&mut self, node: &MemoryNode) -> Result<(), SurfaceError> {
        self.check(node)?;
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| c != node);
        }
        self.mutations += 1;
        Ok(())
    }

    fn offset_left(&self, node: &MemoryNode) -> f64 {
        self.nodes.get(node.0).map_or(0.0, |n| n.offset_left)
    }

    fn set_size(
        &mut self,
        node: &MemoryNode,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<(), SurfaceError> {
        if let Some(width) = width {
            self.set_style(node, "width", px(width))?;
        }
        if let Some(height) = height {
            self.set_style(node, "height", px(height))?;
        }
        Ok(())
    }

    fn set_left(&mut self, node: &MemoryNode, left: f64) -> Result<(), SurfaceError> {
        self.set_style(node, "left", px(left))
    }

    fn set_translate_x(&mut self, node: &MemoryNode, x: f64) -> Result<(), SurfaceError> {
        self.set_style(node, "transform", translate_x(x))
    }

    fn clear_style(&mut self, node: &MemoryNode, property: &str) -> Result<(), SurfaceError> {
        self.check(node)?;
        self.nodes[node.0].style.shift_remove(property);
        self.mutations += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> MemorySurface {
        MemorySurface::new(Viewport::new(800.0, 600.0))
    }

    #[test]
    fn test_find_by_class_document_order() {
        let mut s = surface();
        let root = s.create_div(s.body(), "root");
        let a = s.create_div(root, "slide");
        let inner = s.create_div(a, "slide nested");
        let b = s.create_div(root, "slide");
        assert_eq!(s.find_by_class(&root, "slide"), vec![a, inner, b]);
        assert!(s.find_by_class(&root, "missing").is_empty());
    }

    #[test]
    fn test_wrap_contents_moves_children() {
        let mut s = surface();
        let root = s.create_div(s.body(), "root");
        let a = s.create_div(root, "a");
        let b = s.create_div(root, "b");

        let wrapper = s.wrap_contents(&root, "wrap").unwrap();
        assert_eq!(s.children(root), &[wrapper]);
        assert_eq!(s.children(wrapper), &[a, b]);
        assert_eq!(s.parent(a), Some(wrapper));
        assert!(s.has_class(&wrapper, "wrap"));
    }

    #[test]
    fn test_prepend_background() {
        let mut s = surface();
        let slide = s.create_div(s.body(), "slide");
        let existing = s.create_div(slide, "slide-body");

        let layer = s.prepend_background(&slide, "slide-background blur", "bg.jpg").unwrap();
        assert_eq!(s.children(slide), &[layer, existing]);
        assert!(s.has_class(&layer, "slide-background"));
        assert!(s.has_class(&layer, "blur"));
        let img = s.children(layer)[0];
        assert_eq!(s.tag(img), Some("img"));
        assert_eq!(s.attribute(img, "src"), Some("bg.jpg"));
    }

    #[test]
    fn test_data_attribute() {
        let mut s = surface();
        let slide = s.create_div(s.body(), "slide");
        s.set_attribute(slide, "data-image", "one.jpg");
        assert_eq!(s.data_attribute(&slide, "image").as_deref(), Some("one.jpg"));
        assert!(s.data_attribute(&slide, "image-blur").is_none());
    }

    #[test]
    fn test_class_edits() {
        let mut s = surface();
        let root = s.create_div(s.body(), "slide-container");
        s.add_class(&root, "x-container").unwrap();
        s.add_class(&root, "x-container").unwrap();
        s.remove_class(&root, "slide-container").unwrap();
        assert_eq!(s.classes(root), &["x-container".to_string()]);
    }

    #[test]
    fn test_styles_and_mutation_count() {
        let mut s = surface();
        let node = s.create_div(s.body(), "slide");
        assert_eq!(s.mutation_count(), 0);

        s.set_size(&node, Some(800.0), None).unwrap();
        s.set_translate_x(&node, -160.0).unwrap();
        assert_eq!(s.style(node, "width"), Some("800px"));
        assert!(s.style(node, "height").is_none());
        assert_eq!(s.style(node, "transform"), Some("translate3d(-160px, 0px, 0px)"));
        assert_eq!(s.mutation_count(), 2);
    }

    #[test]
    fn test_unwrap_contents_restores_order() {
        let mut s = surface();
        let root = s.create_div(s.body(), "root");
        let before = s.create_div(root, "before");
        let wrapper = s.create_div(root, "wrap");
        let a = s.create_div(wrapper, "a");
        let b = s.create_div(wrapper, "b");
        let after = s.create_div(root, "after");

        s.unwrap_contents(&wrapper).unwrap();
        assert_eq!(s.children(root), &[before, a, b, after]);
        assert_eq!(s.parent(a), Some(root));
        assert!(s.parent(wrapper).is_none());
    }

    #[test]
    fn test_remove_and_clear_style() {
        let mut s = surface();
        let root = s.create_div(s.body(), "root");
        let child = s.create_div(root, "child");
        s.set_left(&root, 10.0).unwrap();

        s.remove(&child).unwrap();
        s.clear_style(&root, "left").unwrap();
        assert!(s.children(root).is_empty());
        assert!(s.style(root, "left").is_none());
    }

    #[test]
    fn test_unknown_node() {
        let mut s = surface();
        let foreign = MemoryNode(99);
        assert!(matches!(
            s.set_left(&foreign, 1.0),
            Err(SurfaceError::UnknownNode)
        ));
    }

    #[test]
    fn test_helpers_tolerate_foreign_handle() {
        let mut s = surface();
        let foreign = MemoryNode(99);

        s.set_attribute(foreign, "data-image", "a.jpg");
        s.set_offset_left(foreign, 5.0);
        assert!(s.tag(foreign).is_none());
        assert!(s.classes(foreign).is_empty());
        assert!(s.attribute(foreign, "data-image").is_none());
        assert!(s.style(foreign, "width").is_none());
        assert!(s.parent(foreign).is_none());
        assert!(s.children(foreign).is_empty());

        let orphan = s.create_div(foreign, "slide");
        assert!(s.parent(orphan).is_none());
        assert!(s.has_class(&orphan, "slide"));
    }

    #[test]
    fn test_rejected_style() {
        let mut s = surface();
        let node = s.create_div(s.body(), "slide");
        s.reject_style("transform");

        assert!(matches!(
            s.set_translate_x(&node, 10.0),
            Err(SurfaceError::Operation { .. })
        ));
        s.set_left(&node, 10.0).unwrap();
        assert!(s.style(node, "transform").is_none());
    }
}
