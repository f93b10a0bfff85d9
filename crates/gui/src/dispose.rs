//! Release of the GPU resources owned by a removed subtree

use std::collections::HashSet;

use crate::resources::{ResourceCounts, ResourceReleaser};
use crate::scene::SceneNode;

/// Release geometry, textures and materials of every renderable node under
/// `object`. Takes the subtree by value: it must already be detached from the
/// scene graph.
///
/// Resources shared inside the subtree are released once. Returns how many
/// resources were actually freed.
pub fn dispose<R: ResourceReleaser + ?Sized>(object: SceneNode, releaser: &mut R) -> ResourceCounts {
    let mut released = ResourceCounts::default();
    let mut seen_geometries = HashSet::new();
    let mut seen_textures = HashSet::new();
    let mut seen_materials = HashSet::new();

    object.visit(&mut |node| {
        if !node.is_renderable() {
            return;
        }
        if let Some(geometry) = node.geometry() {
            if seen_geometries.insert(geometry) && releaser.release_geometry(geometry) {
                released.geometries += 1;
            }
        }
        for &material in node.materials() {
            if !seen_materials.insert(material) {
                continue;
            }
            for texture in releaser.material_textures(material) {
                if seen_textures.insert(texture) && releaser.release_texture(texture) {
                    released.textures += 1;
                }
            }
            if releaser.release_material(material) {
                released.materials += 1;
            }
        }
    });

    tracing::debug!(
        "Disposed '{}': {} geometries, {} textures, {} materials",
        object.name,
        released.geometries,
        released.textures,
        released.materials
    );
    released
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Material, ResourcePool, Texture};
    use crate::scene::MaterialSlot;
    use crate::viewport::mesh::cube;

    fn texture(pool: &mut ResourcePool) -> crate::resources::TextureHandle {
        pool.add_texture(Texture {
            name: None,
            width: 8,
            height: 8,
        })
    }

    #[test]
    fn test_dispose_single_material_mesh() {
        let mut pool = ResourcePool::new();
        let g = pool.add_geometry(cube(1.0, 1.0, 1.0));
        let t = texture(&mut pool);
        let m = pool.add_material(Material {
            name: None,
            base_color: [1.0; 4],
            textures: vec![t],
        });
        let node = SceneNode::mesh("m", g, MaterialSlot::Single(m));

        let released = dispose(node, &mut pool);
        assert_eq!(released.total(), 3);
        assert_eq!(pool.counts().total(), 0);
    }

    #[test]
    fn test_dispose_material_list_and_nested_children() {
        let mut pool = ResourcePool::new();
        let g1 = pool.add_geometry(cube(1.0, 1.0, 1.0));
        let g2 = pool.add_geometry(cube(1.0, 1.0, 1.0));
        let t1 = texture(&mut pool);
        let t2 = texture(&mut pool);
        let m1 = pool.add_material(Material {
            name: None,
            base_color: [1.0; 4],
            textures: vec![t1],
        });
        let m2 = pool.add_material(Material {
            name: None,
            base_color: [1.0; 4],
            textures: vec![t2],
        });
        let root = SceneNode::group("root").with_child(
            SceneNode::group("inner")
                .with_child(SceneNode::mesh("a", g1, MaterialSlot::Multi(vec![m1, m2])))
                .with_child(SceneNode::mesh("b", g2, MaterialSlot::Single(m1))),
        );

        let released = dispose(root, &mut pool);
        assert_eq!(released.geometries, 2);
        assert_eq!(released.textures, 2);
        assert_eq!(released.materials, 2);
        assert_eq!(pool.counts().total(), 0);
    }

    #[test]
    fn test_dispose_shared_texture_released_once() {
        let mut pool = ResourcePool::new();
        let g = pool.add_geometry(cube(1.0, 1.0, 1.0));
        let shared_tex = texture(&mut pool);
        let m1 = pool.add_material(Material {
            name: None,
            base_color: [1.0; 4],
            textures: vec![shared_tex, shared_tex],
        });
        let m2 = pool.add_material(Material {
            name: None,
            base_color: [1.0; 4],
            textures: vec![shared_tex],
        });
        let node = SceneNode::mesh("m", g, MaterialSlot::Multi(vec![m1, m2]));

        let released = dispose(node, &mut pool);
        assert_eq!(released.textures, 1);
        assert_eq!(released.materials, 2);
    }

    #[test]
    fn test_dispose_leaves_other_resources() {
        let mut pool = ResourcePool::new();
        let keep = pool.add_geometry(cube(1.0, 1.0, 1.0));
        let g = pool.add_geometry(cube(1.0, 1.0, 1.0));
        let m = pool.add_material(Material::colored([1.0; 4]));
        dispose(SceneNode::mesh("m", g, MaterialSlot::Single(m)), &mut pool);
        assert!(pool.geometry(keep).is_some());
        assert_eq!(pool.counts().total(), 1);
    }

    #[test]
    fn test_dispose_group_only() {
        let mut pool = ResourcePool::new();
        let released = dispose(SceneNode::group("empty"), &mut pool);
        assert_eq!(released, ResourceCounts::default());
    }
}
