pub mod gizmo;
mod lifecycle;
pub mod normalize;
pub mod registry;
pub mod selection;
pub mod settings;
pub mod sync;

use std::sync::Arc;

pub use gizmo::{GizmoEvent, ManipulationWidget, TransformGizmo};
pub use normalize::NormalizeOptions;
pub use registry::{ModelRecord, ModelRegistry, SelectionOption};
pub use selection::{Selection, SelectionController};
pub use settings::{AppSettings, Language};
pub use sync::{TransformBridge, TransformField};

use crate::loader::{GltfLoader, LoadQueue, ModelLoader};
use crate::resources::ResourcePool;
use crate::scene::{populate_default_content, Scene, SceneContent};

/// Panel visibility flags
pub struct PanelVisibility {
    pub models: bool,
    pub properties: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            models: true,
            properties: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Last message shown in the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Combined application state
pub struct AppState {
    pub scene: Scene,
    pub resources: ResourcePool,
    /// Fixed primitives around the loaded models
    pub content: SceneContent,
    pub registry: ModelRegistry,
    pub selection: SelectionController,
    pub fields: TransformBridge,
    pub loads: LoadQueue,
    pub settings: AppSettings,
    pub panels: PanelVisibility,
    pub status: Option<StatusMessage>,
    /// Show settings window
    pub show_settings_window: bool,
}

impl AppState {
    pub fn new(settings: AppSettings, loads: LoadQueue) -> Self {
        let mut scene = Scene::new();
        let mut resources = ResourcePool::new();
        let content = populate_default_content(&mut scene, &mut resources);
        let selection = SelectionController::new(
            TransformGizmo::new(settings.gizmo.default_mode),
            settings.gizmo.show_gizmo,
        );
        Self {
            scene,
            resources,
            content,
            registry: ModelRegistry::new(),
            selection,
            fields: TransformBridge::new(),
            loads,
            settings,
            panels: PanelVisibility::default(),
            status: None,
            show_settings_window: false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        let loader: Arc<dyn ModelLoader> = Arc::new(GltfLoader);
        let loads = match LoadQueue::background(Arc::clone(&loader)) {
            Ok(queue) => queue,
            Err(e) => {
                tracing::warn!("Failed to start loader runtime, loading inline: {e}");
                LoadQueue::inline(loader)
            }
        };
        Self::new(AppSettings::load(), loads)
    }
}
