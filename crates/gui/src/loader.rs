//! Model loading: file type check, the loader collaborator, and the queue
//! that runs loads off the UI thread.
//!
//! A loader turns file bytes into a CPU-side [`ModelNode`] tree. The queue
//! delivers completions through a channel; the UI thread drains it once per
//! frame and uploads each model into the resource pool with [`upload`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use glam::Quat;
use shared::Transform;
use tokio::sync::mpsc;

use crate::error::ViewerError;
use crate::helpers::euler_from_quat;
use crate::resources::{Material, MaterialHandle, ResourcePool, Texture, TextureHandle};
use crate::scene::{MaterialSlot, SceneNode};
use crate::viewport::mesh::{Geometry, GeometryGroup};

/// Accepted model file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Glb,
    Gltf,
}

impl ModelFormat {
    pub const EXTENSIONS: [&'static str; 2] = ["glb", "gltf"];

    /// Detect the format from a file name (extension match is case-insensitive)
    pub fn from_file_name(file_name: &str) -> Result<Self, ViewerError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("glb") => Ok(ModelFormat::Glb),
            Some("gltf") => Ok(ModelFormat::Gltf),
            _ => Err(ViewerError::InvalidFileType {
                file_name: file_name.to_string(),
            }),
        }
    }
}

// ── Parsed model ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTexture {
    /// Index of the texture in the source file, used to share uploads
    pub index: usize,
    pub name: Option<String>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMaterial {
    /// Index in the source file; `None` for the default material
    pub index: Option<usize>,
    pub name: Option<String>,
    pub base_color: [f32; 4],
    pub textures: Vec<LoadedTexture>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    /// One group per source primitive, indexing into `materials`
    pub groups: Vec<GeometryGroup>,
    pub materials: Vec<LoadedMaterial>,
}

/// CPU-side node tree produced by a loader
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    pub name: Option<String>,
    pub transform: Transform,
    pub mesh: Option<LoadedMesh>,
    pub children: Vec<ModelNode>,
}

impl ModelNode {
    pub fn group(name: Option<String>) -> Self {
        Self {
            name,
            transform: Transform::new(),
            mesh: None,
            children: Vec::new(),
        }
    }
}

/// Parses model file bytes
pub trait ModelLoader: Send + Sync {
    fn load_from_bytes(&self, bytes: &[u8]) -> Result<ModelNode, String>;
}

// ── glTF loader ───────────────────────────────────────────────

/// Loader for `.glb` and `.gltf` files with embedded buffers
pub struct GltfLoader;

impl ModelLoader for GltfLoader {
    fn load_from_bytes(&self, bytes: &[u8]) -> Result<ModelNode, String> {
        let (document, buffers, images) = gltf::import_slice(bytes).map_err(|e| e.to_string())?;
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| "file contains no scenes".to_string())?;

        let mut root = ModelNode::group(scene.name().map(String::from));
        for node in scene.nodes() {
            root.children.push(convert_node(&node, &buffers, &images));
        }
        Ok(root)
    }
}

fn convert_node(node: &gltf::Node, buffers: &[gltf::buffer::Data], images: &[gltf::image::Data]) -> ModelNode {
    let (translation, rotation, scale) = node.transform().decomposed();
    ModelNode {
        name: node.name().map(String::from),
        transform: Transform {
            position: translation,
            rotation: euler_from_quat(Quat::from_array(rotation)),
            scale,
        },
        mesh: node.mesh().and_then(|m| convert_mesh(&m, buffers, images)),
        children: node
            .children()
            .map(|child| convert_node(&child, buffers, images))
            .collect(),
    }
}

fn convert_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    images: &[gltf::image::Data],
) -> Option<LoadedMesh> {
    let mut out = LoadedMesh {
        positions: Vec::new(),
        indices: Vec::new(),
        groups: Vec::new(),
        materials: Vec::new(),
    };

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            tracing::warn!(
                "Skipping primitive {} of mesh {}: unsupported mode {:?}",
                primitive.index(),
                mesh.index(),
                primitive.mode()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let base = out.positions.len() as u32;
        out.positions.extend(positions);
        let vertex_count = out.positions.len() as u32 - base;

        let start = out.indices.len();
        match reader.read_indices() {
            Some(indices) => out.indices.extend(indices.into_u32().map(|i| i + base)),
            None => out.indices.extend(base..base + vertex_count),
        }

        out.groups.push(GeometryGroup {
            start,
            count: out.indices.len() - start,
            material_index: out.materials.len(),
        });
        out.materials.push(convert_material(&primitive.material(), images));
    }

    (!out.groups.is_empty()).then_some(out)
}

fn convert_material(material: &gltf::Material, images: &[gltf::image::Data]) -> LoadedMaterial {
    let pbr = material.pbr_metallic_roughness();
    let mut textures: Vec<gltf::Texture> = Vec::new();
    textures.extend(pbr.base_color_texture().map(|info| info.texture()));
    textures.extend(pbr.metallic_roughness_texture().map(|info| info.texture()));
    textures.extend(material.normal_texture().map(|t| t.texture()));
    textures.extend(material.occlusion_texture().map(|t| t.texture()));
    textures.extend(material.emissive_texture().map(|info| info.texture()));

    LoadedMaterial {
        index: material.index(),
        name: material.name().map(String::from),
        base_color: pbr.base_color_factor(),
        textures: textures
            .iter()
            .map(|texture| {
                let image = images.get(texture.source().index());
                LoadedTexture {
                    index: texture.index(),
                    name: texture.name().map(String::from),
                    width: image.map_or(0, |i| i.width),
                    height: image.map_or(0, |i| i.height),
                }
            })
            .collect(),
    }
}

// ── Upload ────────────────────────────────────────────────────

#[derive(Default)]
struct UploadCache {
    textures: HashMap<usize, TextureHandle>,
    materials: HashMap<Option<usize>, MaterialHandle>,
}

/// Upload a parsed model into the resource pool and build its scene node.
///
/// Textures and materials shared inside the file are uploaded once.
pub fn upload(model: ModelNode, pool: &mut ResourcePool) -> SceneNode {
    upload_node(model, pool, &mut UploadCache::default())
}

fn upload_node(model: ModelNode, pool: &mut ResourcePool, cache: &mut UploadCache) -> SceneNode {
    let name = model.name.unwrap_or_default();
    let mut node = match model.mesh {
        Some(mesh) => {
            let materials: Vec<MaterialHandle> = mesh
                .materials
                .iter()
                .map(|m| upload_material(m, pool, cache))
                .collect();
            let geometry = pool.add_geometry(Geometry::new(mesh.positions, mesh.indices).with_groups(mesh.groups));
            let slot = match materials.as_slice() {
                [single] => MaterialSlot::Single(*single),
                _ => MaterialSlot::Multi(materials),
            };
            SceneNode::mesh(name, geometry, slot)
        }
        None => SceneNode::group(name),
    };
    node.transform = model.transform;
    node.children = model
        .children
        .into_iter()
        .map(|child| upload_node(child, pool, cache))
        .collect();
    node
}

fn upload_material(material: &LoadedMaterial, pool: &mut ResourcePool, cache: &mut UploadCache) -> MaterialHandle {
    if let Some(handle) = cache.materials.get(&material.index) {
        return *handle;
    }
    let textures = material
        .textures
        .iter()
        .map(|t| {
            *cache.textures.entry(t.index).or_insert_with(|| {
                pool.add_texture(Texture {
                    name: t.name.clone(),
                    width: t.width,
                    height: t.height,
                })
            })
        })
        .collect();
    let handle = pool.add_material(Material {
        name: material.name.clone(),
        base_color: material.base_color,
        textures,
    });
    cache.materials.insert(material.index, handle);
    handle
}

// ── Load queue ────────────────────────────────────────────────

/// Identifies one submitted load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Result of a load, delivered to the UI thread
#[derive(Debug)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub file_name: String,
    pub result: Result<ModelNode, String>,
}

/// In-memory copy of a file for the duration of one load
pub struct StagedFile {
    bytes: Vec<u8>,
    live: Arc<AtomicUsize>,
}

impl StagedFile {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Counts staged files that have not been released yet
#[derive(Clone, Default)]
pub struct StagingArea {
    live: Arc<AtomicUsize>,
}

impl StagingArea {
    pub fn stage(&self, bytes: Vec<u8>) -> StagedFile {
        self.live.fetch_add(1, Ordering::SeqCst);
        StagedFile {
            bytes,
            live: Arc::clone(&self.live),
        }
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

enum Executor {
    /// Parse during `submit`; the result still arrives through the channel
    Inline,
    Runtime(tokio::runtime::Runtime),
}

/// Runs loads and hands completions back one at a time
pub struct LoadQueue {
    loader: Arc<dyn ModelLoader>,
    executor: Executor,
    staging: StagingArea,
    tx: mpsc::UnboundedSender<LoadCompletion>,
    rx: mpsc::UnboundedReceiver<LoadCompletion>,
    pending: usize,
    next_ticket: u64,
}

impl LoadQueue {
    /// Queue that parses on a background tokio worker
    pub fn background(loader: Arc<dyn ModelLoader>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("glview-loader")
            .build()?;
        Ok(Self::with_executor(loader, Executor::Runtime(runtime)))
    }

    /// Queue that parses synchronously on submit
    pub fn inline(loader: Arc<dyn ModelLoader>) -> Self {
        Self::with_executor(loader, Executor::Inline)
    }

    fn with_executor(loader: Arc<dyn ModelLoader>, executor: Executor) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            loader,
            executor,
            staging: StagingArea::default(),
            tx,
            rx,
            pending: 0,
            next_ticket: 0,
        }
    }

    /// Validate the file name and start parsing.
    ///
    /// Rejected files are never staged and never reach the loader.
    pub fn submit(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<LoadTicket, ViewerError> {
        ModelFormat::from_file_name(file_name)?;

        self.next_ticket += 1;
        let ticket = LoadTicket(self.next_ticket);
        let staged = self.staging.stage(bytes);
        let loader = Arc::clone(&self.loader);
        let tx = self.tx.clone();
        let file_name = file_name.to_string();

        let job = move || {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                loader.load_from_bytes(staged.bytes())
            }))
            .unwrap_or_else(|_| Err("loader panicked".to_string()));
            drop(staged);
            // Receiver lives as long as the queue
            let _ = tx.send(LoadCompletion {
                ticket,
                file_name,
                result,
            });
        };

        match &self.executor {
            Executor::Inline => job(),
            Executor::Runtime(runtime) => {
                runtime.spawn_blocking(job);
            }
        }
        self.pending += 1;
        Ok(ticket)
    }

    /// Next finished load, without blocking
    pub fn try_next(&mut self) -> Option<LoadCompletion> {
        let completion = self.rx.try_recv().ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(completion)
    }

    /// Block until the next load finishes; `None` when nothing is pending
    pub fn wait_next(&mut self) -> Option<LoadCompletion> {
        if self.pending == 0 {
            return None;
        }
        let completion = self.rx.blocking_recv()?;
        self.pending -= 1;
        Some(completion)
    }

    /// Loads submitted but not yet taken from the queue
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Staged files still held by running loads
    pub fn staged(&self) -> usize {
        self.staging.live()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{box_model, FixtureLoader};

    const TRIANGLE_GLTF: &str = r#"{
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [{"name": "tri", "mesh": 0, "translation": [1.0, 2.0, 3.0]}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "indices": 1, "material": 0}]}],
        "materials": [{"name": "red", "pbrMetallicRoughness": {"baseColorFactor": [1.0, 0.0, 0.0, 1.0]}}],
        "accessors": [
            {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
             "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]},
            {"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}
        ],
        "bufferViews": [
            {"buffer": 0, "byteOffset": 0, "byteLength": 36},
            {"buffer": 0, "byteOffset": 36, "byteLength": 6}
        ],
        "buffers": [{"byteLength": 44,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA="}]
    }"#;

    const TWO_PRIMITIVE_GLTF: &str = r#"{
        "asset": {"version": "2.0"},
        "scenes": [{"nodes": [0]}],
        "nodes": [{"mesh": 0}],
        "meshes": [{"primitives": [
            {"attributes": {"POSITION": 0}, "material": 0},
            {"attributes": {"POSITION": 0}, "material": 1}
        ]}],
        "materials": [{"name": "a"}, {"name": "b"}],
        "accessors": [
            {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
             "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]}
        ],
        "bufferViews": [{"buffer": 0, "byteLength": 36}],
        "buffers": [{"byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"}]
    }"#;

    #[test]
    fn test_format_detection() {
        assert_eq!(ModelFormat::from_file_name("duck.glb"), Ok(ModelFormat::Glb));
        assert_eq!(ModelFormat::from_file_name("Scene.GLTF"), Ok(ModelFormat::Gltf));
        assert!(ModelFormat::from_file_name("model.fbx").is_err());
        assert!(ModelFormat::from_file_name("notes.txt").is_err());
        assert!(ModelFormat::from_file_name("glb").is_err());
    }

    #[test]
    fn test_gltf_loader_reads_triangle() {
        let root = GltfLoader.load_from_bytes(TRIANGLE_GLTF.as_bytes()).unwrap();
        assert_eq!(root.children.len(), 1);
        let tri = &root.children[0];
        assert_eq!(tri.name.as_deref(), Some("tri"));
        assert_eq!(tri.transform.position, [1.0, 2.0, 3.0]);

        let mesh = tri.mesh.as_ref().unwrap();
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.materials.len(), 1);
        assert_eq!(mesh.materials[0].base_color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_gltf_loader_multi_primitive_mesh() {
        let root = GltfLoader.load_from_bytes(TWO_PRIMITIVE_GLTF.as_bytes()).unwrap();
        let mesh = root.children[0].mesh.as_ref().unwrap();
        assert_eq!(mesh.groups.len(), 2);
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);

        let mut pool = ResourcePool::new();
        let node = upload(root, &mut pool);
        assert_eq!(node.children[0].material_count(), 2);
        assert!(matches!(
            node.children[0].kind,
            crate::scene::NodeKind::Mesh { materials: MaterialSlot::Multi(_), .. }
        ));
    }

    #[test]
    fn test_gltf_loader_rejects_garbage() {
        assert!(GltfLoader.load_from_bytes(b"definitely not gltf").is_err());
    }

    #[test]
    fn test_upload_shares_textures() {
        let texture = LoadedTexture {
            index: 0,
            name: None,
            width: 16,
            height: 16,
        };
        let material = |index| LoadedMaterial {
            index: Some(index),
            name: None,
            base_color: [1.0; 4],
            textures: vec![texture.clone()],
        };
        let mesh = LoadedMesh {
            positions: vec![[0.0; 3]; 3],
            indices: vec![0, 1, 2],
            groups: Vec::new(),
            materials: vec![material(0), material(1)],
        };
        let model = ModelNode {
            mesh: Some(mesh),
            ..ModelNode::group(Some("m".into()))
        };

        let mut pool = ResourcePool::new();
        let node = upload(model, &mut pool);
        assert_eq!(node.material_count(), 2);
        assert_eq!(pool.counts().textures, 1);
        assert_eq!(pool.counts().materials, 2);
        assert_eq!(pool.counts().geometries, 1);
    }

    #[test]
    fn test_queue_rejects_before_loading() {
        let loader = Arc::new(FixtureLoader::new());
        let mut queue = LoadQueue::inline(loader.clone());
        let err = queue.submit("notes.txt", b"box".to_vec()).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidFileType { .. }));
        assert_eq!(loader.calls(), 0);
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.staged(), 0);
    }

    #[test]
    fn test_inline_queue_delivers_on_poll() {
        let loader = Arc::new(FixtureLoader::new());
        let mut queue = LoadQueue::inline(loader.clone());
        let ticket = queue.submit("a.glb", b"box".to_vec()).unwrap();
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.staged(), 0);

        let done = queue.try_next().unwrap();
        assert_eq!(done.ticket, ticket);
        assert_eq!(done.file_name, "a.glb");
        assert_eq!(done.result.unwrap(), box_model(1.0, 1.0, 1.0));
        assert_eq!(queue.pending(), 0);
        assert!(queue.try_next().is_none());
    }

    #[test]
    fn test_failed_load_releases_staging() {
        let loader = Arc::new(FixtureLoader::new());
        let mut queue = LoadQueue::inline(loader);
        queue.submit("broken.glb", b"corrupt".to_vec()).unwrap();
        let done = queue.try_next().unwrap();
        assert!(done.result.is_err());
        assert_eq!(queue.staged(), 0);
    }

    #[test]
    fn test_panicking_loader_is_reported() {
        let loader = Arc::new(FixtureLoader::new());
        let mut queue = LoadQueue::inline(loader);
        queue.submit("boom.glb", b"panic".to_vec()).unwrap();
        let done = queue.try_next().unwrap();
        assert_eq!(done.result.unwrap_err(), "loader panicked");
        assert_eq!(queue.staged(), 0);
    }

    #[test]
    fn test_background_queue() {
        let loader = Arc::new(FixtureLoader::new());
        let mut queue = LoadQueue::background(loader).unwrap();
        queue.submit("a.glb", b"box".to_vec()).unwrap();
        queue.submit("b.gltf", b"corrupt".to_vec()).unwrap();

        let mut ok = 0;
        let mut failed = 0;
        while let Some(done) = queue.wait_next() {
            match done.result {
                Ok(_) => ok += 1,
                Err(_) => failed += 1,
            }
        }
        assert_eq!((ok, failed), (1, 1));
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.staged(), 0);
    }

    #[test]
    fn test_wait_next_without_pending() {
        let mut queue = LoadQueue::inline(Arc::new(FixtureLoader::new()));
        assert!(queue.wait_next().is_none());
    }
}
