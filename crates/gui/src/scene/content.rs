//! Fixed scene content drawn around loaded models

use shared::Transform;

use super::{MaterialSlot, NodeHandle, Scene, SceneGraph, SceneNode};
use crate::resources::{Material, MaterialHandle, ResourcePool};
use crate::viewport::mesh::{cone, cube, plane, uv_sphere, Geometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Box,
    Sphere,
    Plane,
    Pyramid,
}

impl PrimitiveKind {
    pub fn all() -> [PrimitiveKind; 4] {
        [
            PrimitiveKind::Box,
            PrimitiveKind::Sphere,
            PrimitiveKind::Plane,
            PrimitiveKind::Pyramid,
        ]
    }

    /// Whether the side panel offers a color picker for it
    pub fn color_editable(self) -> bool {
        !matches!(self, PrimitiveKind::Box)
    }
}

/// Handles of the fixed primitives
#[derive(Debug, Clone, Default)]
pub struct SceneContent {
    pub primitives: Vec<(PrimitiveKind, NodeHandle, MaterialHandle)>,
}

impl SceneContent {
    pub fn material(&self, kind: PrimitiveKind) -> Option<MaterialHandle> {
        self.primitives
            .iter()
            .find(|(k, _, _)| *k == kind)
            .map(|(_, _, m)| *m)
    }
}

fn srgb(hex: u32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

/// Add the box, sphere, ground plane and pyramid to the scene
pub fn populate_default_content(scene: &mut Scene, pool: &mut ResourcePool) -> SceneContent {
    let specs: [(PrimitiveKind, &str, Geometry, [f32; 4], Transform); 4] = [
        (
            PrimitiveKind::Box,
            "box",
            cube(1.0, 1.0, 1.0),
            srgb(0xc8b48c),
            Transform::from_position([0.0, 0.5, 0.0]),
        ),
        (
            PrimitiveKind::Sphere,
            "sphere",
            uv_sphere(0.55, 24, 16),
            srgb(0xff0000),
            Transform::from_position([2.2, 0.55, 0.0]),
        ),
        (
            PrimitiveKind::Plane,
            "plane",
            plane(12.0, 12.0),
            srgb(0xd3d3d3),
            Transform {
                rotation: [-std::f32::consts::FRAC_PI_2, 0.0, 0.0],
                ..Transform::new()
            },
        ),
        (
            PrimitiveKind::Pyramid,
            "pyramid",
            cone(0.9, 1.6, 4),
            srgb(0x0077ff),
            Transform {
                position: [-3.5, 0.8, 0.0],
                rotation: [0.0, std::f32::consts::FRAC_PI_4, 0.0],
                scale: [1.0, 1.0, 1.0],
            },
        ),
    ];

    let mut content = SceneContent::default();
    for (kind, name, geometry, color, transform) in specs {
        let geometry = pool.add_geometry(geometry);
        let material = pool.add_material(Material {
            name: Some(name.to_string()),
            ..Material::colored(color)
        });
        let mut node =
            SceneNode::mesh(name, geometry, MaterialSlot::Single(material)).with_transform(transform);
        node.cast_shadow = kind != PrimitiveKind::Plane;
        node.receive_shadow = kind == PrimitiveKind::Plane;
        let handle = scene.add(node);
        content.primitives.push((kind, handle, material));
    }
    content
}
