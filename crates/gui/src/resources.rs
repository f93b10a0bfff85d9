//! GPU-backed resources (geometry buffers, textures, materials) and the pool
//! that owns them for the session.
//!
//! Scene nodes only hold handles. A resource stays alive in the pool until it
//! is released, normally by [`crate::dispose::dispose`].

use std::collections::HashMap;

use crate::viewport::mesh::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHandle(u64);

/// Texture image metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub name: Option<String>,
    pub width: u32,
    pub height: u32,
}

/// Surface material; references the textures it samples
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    /// Linear RGBA
    pub base_color: [f32; 4],
    pub textures: Vec<TextureHandle>,
}

impl Material {
    pub fn colored(base_color: [f32; 4]) -> Self {
        Self {
            name: None,
            base_color,
            textures: Vec::new(),
        }
    }
}

/// Number of live resources of each kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceCounts {
    pub geometries: usize,
    pub textures: usize,
    pub materials: usize,
}

impl ResourceCounts {
    pub fn total(&self) -> usize {
        self.geometries + self.textures + self.materials
    }
}

/// Release side of the resource pool, as seen by the disposer
pub trait ResourceReleaser {
    /// Textures referenced by a live material (empty if the material is gone)
    fn material_textures(&self, material: MaterialHandle) -> Vec<TextureHandle>;
    /// Returns false if the handle was not live
    fn release_geometry(&mut self, handle: GeometryHandle) -> bool;
    fn release_texture(&mut self, handle: TextureHandle) -> bool;
    fn release_material(&mut self, handle: MaterialHandle) -> bool;
}

/// Session-wide store of uploaded resources
#[derive(Default)]
pub struct ResourcePool {
    next_id: u64,
    geometries: HashMap<GeometryHandle, Geometry>,
    textures: HashMap<TextureHandle, Texture>,
    materials: HashMap<MaterialHandle, Material>,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // ── Upload ──────────────────────────────────────────────

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryHandle {
        let handle = GeometryHandle(self.next());
        self.geometries.insert(handle, geometry);
        handle
    }

    pub fn add_texture(&mut self, texture: Texture) -> TextureHandle {
        let handle = TextureHandle(self.next());
        self.textures.insert(handle, texture);
        handle
    }

    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle(self.next());
        self.materials.insert(handle, material);
        handle
    }

    // ── Access ──────────────────────────────────────────────

    pub fn geometry(&self, handle: GeometryHandle) -> Option<&Geometry> {
        self.geometries.get(&handle)
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(&handle)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(&handle)
    }

    pub fn material_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material> {
        self.materials.get_mut(&handle)
    }

    pub fn counts(&self) -> ResourceCounts {
        ResourceCounts {
            geometries: self.geometries.len(),
            textures: self.textures.len(),
            materials: self.materials.len(),
        }
    }
}

impl ResourceReleaser for ResourcePool {
    fn material_textures(&self, material: MaterialHandle) -> Vec<TextureHandle> {
        self.materials
            .get(&material)
            .map(|m| m.textures.clone())
            .unwrap_or_default()
    }

    fn release_geometry(&mut self, handle: GeometryHandle) -> bool {
        self.geometries.remove(&handle).is_some()
    }

    fn release_texture(&mut self, handle: TextureHandle) -> bool {
        self.textures.remove(&handle).is_some()
    }

    fn release_material(&mut self, handle: MaterialHandle) -> bool {
        self.materials.remove(&handle).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh::cube;

    #[test]
    fn test_handles_are_distinct() {
        let mut pool = ResourcePool::new();
        let g1 = pool.add_geometry(cube(1.0, 1.0, 1.0));
        let g2 = pool.add_geometry(cube(1.0, 1.0, 1.0));
        assert_ne!(g1, g2);
        assert_eq!(pool.counts().geometries, 2);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut pool = ResourcePool::new();
        let tex = pool.add_texture(Texture {
            name: None,
            width: 4,
            height: 4,
        });
        assert!(pool.release_texture(tex));
        assert!(!pool.release_texture(tex));
        assert_eq!(pool.counts().total(), 0);
    }

    #[test]
    fn test_material_textures_lookup() {
        let mut pool = ResourcePool::new();
        let tex = pool.add_texture(Texture {
            name: Some("albedo".into()),
            width: 2,
            height: 2,
        });
        let mat = pool.add_material(Material {
            name: None,
            base_color: [1.0; 4],
            textures: vec![tex],
        });
        assert_eq!(pool.material_textures(mat), vec![tex]);
        pool.release_material(mat);
        assert!(pool.material_textures(mat).is_empty());
    }
}
