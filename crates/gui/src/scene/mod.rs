//! Session scene graph.
//!
//! The scene owns every root node that is drawn. Callers keep a
//! [`NodeHandle`] and take the node back out with [`SceneGraph::remove`].

mod content;
mod node;

use std::collections::HashMap;

pub use content::{populate_default_content, PrimitiveKind, SceneContent};
pub use node::{MaterialSlot, NodeKind, SceneNode};

/// Identifies a root node inside a scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(u64);

/// Root-level add/remove interface of the scene graph
pub trait SceneGraph {
    fn add(&mut self, node: SceneNode) -> NodeHandle;
    /// Detach a root node and hand ownership back to the caller
    fn remove(&mut self, handle: NodeHandle) -> Option<SceneNode>;
    fn node(&self, handle: NodeHandle) -> Option<&SceneNode>;
    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut SceneNode>;

    fn contains(&self, handle: NodeHandle) -> bool {
        self.node(handle).is_some()
    }
}

/// In-memory scene with draw order and an on-demand redraw flag
#[derive(Default)]
pub struct Scene {
    next_handle: u64,
    nodes: HashMap<NodeHandle, SceneNode>,
    order: Vec<NodeHandle>,
    redraw_requested: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root nodes in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &SceneNode)> + '_ {
        self.order
            .iter()
            .filter_map(move |h| self.nodes.get(h).map(|n| (*h, n)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Returns whether a redraw was requested since the last call
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

impl SceneGraph for Scene {
    fn add(&mut self, node: SceneNode) -> NodeHandle {
        self.next_handle += 1;
        let handle = NodeHandle(self.next_handle);
        self.nodes.insert(handle, node);
        self.order.push(handle);
        self.redraw_requested = true;
        handle
    }

    fn remove(&mut self, handle: NodeHandle) -> Option<SceneNode> {
        let node = self.nodes.remove(&handle)?;
        self.order.retain(|h| *h != handle);
        self.redraw_requested = true;
        Some(node)
    }

    fn node(&self, handle: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(&handle)
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut scene = Scene::new();
        let a = scene.add(SceneNode::group("a"));
        let b = scene.add(SceneNode::group("b"));
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);

        let removed = scene.remove(a).unwrap();
        assert_eq!(removed.name, "a");
        assert!(!scene.contains(a));
        assert!(scene.contains(b));
        assert!(scene.remove(a).is_none());
    }

    #[test]
    fn test_iter_keeps_insertion_order() {
        let mut scene = Scene::new();
        for name in ["one", "two", "three"] {
            scene.add(SceneNode::group(name));
        }
        let names: Vec<_> = scene.iter().map(|(_, n)| n.name.clone()).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_redraw_flag() {
        let mut scene = Scene::new();
        assert!(!scene.take_redraw_request());
        scene.add(SceneNode::group("a"));
        assert!(scene.take_redraw_request());
        assert!(!scene.take_redraw_request());
    }
}
