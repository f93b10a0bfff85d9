//! Scene nodes: a tagged tree of groups and renderable meshes

use glam::Mat4;
use shared::Transform;

use crate::helpers::transform_matrix;
use crate::resources::{GeometryHandle, MaterialHandle, ResourcePool};
use crate::viewport::picking::Aabb;

/// Material binding of a mesh: one material, or one per geometry group
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialSlot {
    Single(MaterialHandle),
    Multi(Vec<MaterialHandle>),
}

impl MaterialSlot {
    pub fn handles(&self) -> &[MaterialHandle] {
        match self {
            MaterialSlot::Single(handle) => std::slice::from_ref(handle),
            MaterialSlot::Multi(handles) => handles,
        }
    }

    pub fn len(&self) -> usize {
        self.handles().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Transform-only node
    Group,
    Mesh {
        geometry: GeometryHandle,
        materials: MaterialSlot,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub visible: bool,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn group(name: impl Into<String>) -> Self {
        Self::with_kind(name.into(), NodeKind::Group)
    }

    pub fn mesh(name: impl Into<String>, geometry: GeometryHandle, materials: MaterialSlot) -> Self {
        Self::with_kind(name.into(), NodeKind::Mesh { geometry, materials })
    }

    fn with_kind(name: String, kind: NodeKind) -> Self {
        Self {
            name,
            transform: Transform::new(),
            kind,
            cast_shadow: false,
            receive_shadow: false,
            visible: true,
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    // ── Capabilities ─────────────────────────────────────────

    /// Whether this node draws geometry
    pub fn is_renderable(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh { .. })
    }

    /// Number of materials bound to this node (0 for groups)
    pub fn material_count(&self) -> usize {
        self.materials().len()
    }

    pub fn materials(&self) -> &[MaterialHandle] {
        match &self.kind {
            NodeKind::Mesh { materials, .. } => materials.handles(),
            NodeKind::Group => &[],
        }
    }

    pub fn geometry(&self) -> Option<GeometryHandle> {
        match &self.kind {
            NodeKind::Mesh { geometry, .. } => Some(*geometry),
            NodeKind::Group => None,
        }
    }

    // ── Traversal ────────────────────────────────────────────

    /// Visit this node and all descendants, depth first
    pub fn visit(&self, f: &mut dyn FnMut(&SceneNode)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    pub fn visit_mut(&mut self, f: &mut dyn FnMut(&mut SceneNode)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Visit the subtree with each node's world matrix
    pub fn visit_world(&self, parent: Mat4, f: &mut dyn FnMut(&SceneNode, Mat4)) {
        let world = parent * transform_matrix(&self.transform);
        f(self, world);
        for child in &self.children {
            child.visit_world(world, f);
        }
    }

    /// Bounds of all renderable geometry in the subtree, in the space this
    /// node's transform maps into.
    pub fn world_bounds(&self, pool: &ResourcePool) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        self.visit_world(Mat4::IDENTITY, &mut |node, world| {
            let Some(local) = node
                .geometry()
                .and_then(|g| pool.geometry(g))
                .and_then(|g| g.bounds())
            else {
                return;
            };
            let b = local.transformed(&world);
            bounds = Some(match bounds {
                Some(acc) => acc.union(&b),
                None => b,
            });
        });
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Material;
    use crate::viewport::mesh::cube;
    use glam::Vec3;

    fn mesh_node(pool: &mut ResourcePool, size: f32) -> SceneNode {
        let g = pool.add_geometry(cube(size, size, size));
        let m = pool.add_material(Material::colored([1.0; 4]));
        SceneNode::mesh("mesh", g, MaterialSlot::Single(m))
    }

    #[test]
    fn test_capabilities() {
        let mut pool = ResourcePool::new();
        let group = SceneNode::group("root");
        assert!(!group.is_renderable());
        assert_eq!(group.material_count(), 0);

        let mesh = mesh_node(&mut pool, 1.0);
        assert!(mesh.is_renderable());
        assert_eq!(mesh.material_count(), 1);
    }

    #[test]
    fn test_multi_material_count() {
        let mut pool = ResourcePool::new();
        let g = pool.add_geometry(cube(1.0, 1.0, 1.0));
        let a = pool.add_material(Material::colored([1.0; 4]));
        let b = pool.add_material(Material::colored([0.5; 4]));
        let node = SceneNode::mesh("multi", g, MaterialSlot::Multi(vec![a, b]));
        assert_eq!(node.material_count(), 2);
        assert_eq!(node.materials(), &[a, b]);
    }

    #[test]
    fn test_world_bounds_includes_child_transforms() {
        let mut pool = ResourcePool::new();
        let child = mesh_node(&mut pool, 2.0).with_transform(Transform::from_position([5.0, 0.0, 0.0]));
        let root = SceneNode::group("root")
            .with_child(mesh_node(&mut pool, 2.0))
            .with_child(child);
        let b = root.world_bounds(&pool).unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(b.max, Vec3::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn test_world_bounds_empty_group() {
        let pool = ResourcePool::new();
        assert!(SceneNode::group("empty").world_bounds(&pool).is_none());
    }

    #[test]
    fn test_visit_mut_reaches_all_nodes() {
        let mut pool = ResourcePool::new();
        let mut root = SceneNode::group("root")
            .with_child(SceneNode::group("inner").with_child(mesh_node(&mut pool, 1.0)));
        root.visit_mut(&mut |n| n.visible = false);
        let (mut total, mut visible) = (0, 0);
        root.visit(&mut |n| {
            total += 1;
            if n.visible {
                visible += 1;
            }
        });
        assert_eq!(visible, 0);
        assert_eq!(total, 3);
    }
}
