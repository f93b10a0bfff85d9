//! One-time placement of a freshly loaded model

use shared::Transform;

use super::settings::ImportSettings;
use crate::resources::ResourcePool;
use crate::scene::SceneNode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    pub max_dimension: f32,
    pub forward_offset: f32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        ImportSettings::default().into()
    }
}

impl From<ImportSettings> for NormalizeOptions {
    fn from(s: ImportSettings) -> Self {
        Self {
            max_dimension: s.max_dimension,
            forward_offset: s.forward_offset,
        }
    }
}

impl From<&ImportSettings> for NormalizeOptions {
    fn from(s: &ImportSettings) -> Self {
        s.clone().into()
    }
}

/// Prepare a loaded model root for the scene and return its resulting transform.
///
/// Renderable nodes cast and receive shadows. An oversized model is scaled so
/// its largest dimension equals `max_dimension`; the scale is decided first so
/// that the final model is centered on x, rests on y = 0 and has its near face
/// (min z) at `forward_offset`, clear of the fixed content around the origin.
pub fn normalize(root: &mut SceneNode, pool: &ResourcePool, options: &NormalizeOptions) -> Transform {
    root.visit_mut(&mut |node| {
        if node.is_renderable() {
            node.cast_shadow = true;
            node.receive_shadow = true;
        }
    });

    let Some(bounds) = root.world_bounds(pool) else {
        tracing::debug!("Model '{}' has no geometry, skipping placement", root.name);
        return root.transform;
    };

    let largest = bounds.max_dimension();
    if largest > options.max_dimension {
        let factor = options.max_dimension / largest;
        for s in &mut root.transform.scale {
            *s *= factor;
        }
        tracing::debug!("Scaled '{}' by {factor:.4} (largest dimension {largest:.2})", root.name);
    }

    // Center on the origin
    if let Some(b) = root.world_bounds(pool) {
        let c = b.center();
        root.transform.position[0] -= c.x;
        root.transform.position[1] -= c.y;
        root.transform.position[2] -= c.z;
    }

    // Rest on the ground, near face at the forward offset
    if let Some(b) = root.world_bounds(pool) {
        root.transform.position[1] -= b.min.y;
        root.transform.position[2] += options.forward_offset - b.min.z;
    }

    root.transform
}
