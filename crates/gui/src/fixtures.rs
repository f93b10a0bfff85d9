//! Factory functions and a scripted loader for tests.
//!
//! [`FixtureLoader`] reads the file bytes as a small text command instead of
//! glTF, so tests can describe the model they want to "load":
//!
//! - `box` or `box W H D [X Y Z]`: a box of the given size whose center is at `(X, Y, Z)`
//! - `textured`: a box with two materials sharing one texture
//! - `corrupt`: the load fails
//! - `panic`: the loader panics

use std::sync::atomic::{AtomicUsize, Ordering};

use shared::Transform;

use crate::loader::{LoadedMaterial, LoadedMesh, LoadedTexture, ModelLoader, ModelNode};
use crate::viewport::mesh::{cube, GeometryGroup};

// ── Model factories ─────────────────────────────────────────────

/// A model whose only mesh is a box of size `w`×`h`×`d` centered at the origin
pub fn box_model(w: f32, h: f32, d: f32) -> ModelNode {
    box_model_at(w, h, d, [0.0, 0.0, 0.0])
}

/// Box model whose mesh node is offset to `center`
pub fn box_model_at(w: f32, h: f32, d: f32, center: [f32; 3]) -> ModelNode {
    let geometry = cube(w, h, d);
    let indices = geometry.indices().to_vec();
    let mesh = LoadedMesh {
        positions: geometry.positions,
        indices,
        groups: Vec::new(),
        materials: vec![plain_material(0)],
    };
    ModelNode {
        children: vec![ModelNode {
            name: Some("box".into()),
            transform: Transform::from_position(center),
            mesh: Some(mesh),
            children: Vec::new(),
        }],
        ..ModelNode::group(Some("root".into()))
    }
}

/// Unit box split into two material groups that share one texture
pub fn textured_model() -> ModelNode {
    let geometry = cube(1.0, 1.0, 1.0);
    let indices = geometry.indices().to_vec();
    let half = indices.len() / 2;
    let texture = LoadedTexture {
        index: 0,
        name: Some("albedo".into()),
        width: 64,
        height: 64,
    };
    let mut materials = vec![plain_material(0), plain_material(1)];
    for m in &mut materials {
        m.textures.push(texture.clone());
    }
    let mesh = LoadedMesh {
        groups: vec![
            GeometryGroup {
                start: 0,
                count: half,
                material_index: 0,
            },
            GeometryGroup {
                start: half,
                count: indices.len() - half,
                material_index: 1,
            },
        ],
        positions: geometry.positions,
        indices,
        materials,
    };
    ModelNode {
        mesh: Some(mesh),
        ..ModelNode::group(Some("textured".into()))
    }
}

fn plain_material(index: usize) -> LoadedMaterial {
    LoadedMaterial {
        index: Some(index),
        name: None,
        base_color: [0.8, 0.8, 0.8, 1.0],
        textures: Vec::new(),
    }
}

// ── Scripted loader ─────────────────────────────────────────────

/// Loader that builds models from text commands and counts its calls
#[derive(Default)]
pub struct FixtureLoader {
    calls: AtomicUsize,
}

impl FixtureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `load_from_bytes` ran
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ModelLoader for FixtureLoader {
    fn load_from_bytes(&self, bytes: &[u8]) -> Result<ModelNode, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
        let mut words = text.split_whitespace();
        match words.next() {
            Some("box") => {
                let nums: Vec<f32> = words.map(|w| w.parse().map_err(|_| format!("bad number '{w}'"))).collect::<Result<_, _>>()?;
                match nums.as_slice() {
                    [] => Ok(box_model(1.0, 1.0, 1.0)),
                    [w, h, d] => Ok(box_model(*w, *h, *d)),
                    [w, h, d, x, y, z] => Ok(box_model_at(*w, *h, *d, [*x, *y, *z])),
                    _ => Err("box takes 0, 3 or 6 numbers".to_string()),
                }
            }
            Some("textured") => Ok(textured_model()),
            Some("panic") => panic!("fixture loader asked to panic"),
            _ => Err("malformed model data".to_string()),
        }
    }
}

/// Bytes that make [`FixtureLoader`] produce a box
pub fn box_bytes(w: f32, h: f32, d: f32) -> Vec<u8> {
    format!("box {w} {h} {d}").into_bytes()
}

/// Bytes for a box whose center starts at `center`
pub fn box_bytes_at(w: f32, h: f32, d: f32, center: [f32; 3]) -> Vec<u8> {
    format!("box {w} {h} {d} {} {} {}", center[0], center[1], center[2]).into_bytes()
}
