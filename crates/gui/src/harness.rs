//! Headless test harness for driving the model lifecycle without a window.
//!
//! Loads run inline through a `FixtureLoader`, so every `load_*` call is
//! applied before it returns.

use std::sync::Arc;

use shared::{Axis, GizmoMode, ModelId, Transform};

use crate::error::ViewerError;
use crate::fixtures::{box_bytes, box_bytes_at, FixtureLoader};
use crate::loader::LoadQueue;
use crate::resources::ResourceCounts;
use crate::state::{AppSettings, AppState, ManipulationWidget, TransformField};

/// Headless test harness: application state plus the fixture loader
pub struct TestHarness {
    pub state: AppState,
    loader: Arc<FixtureLoader>,
}

impl TestHarness {
    /// Create a harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let loader = Arc::new(FixtureLoader::new());
        let queue = LoadQueue::inline(loader.clone());
        Self {
            state: AppState::new(settings, queue),
            loader,
        }
    }

    // ── Loading ──────────────────────────────────────────────

    /// Submit raw bytes under a file name and apply the result
    pub fn load_bytes(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<ModelId, ViewerError> {
        self.state.load_file(file_name, bytes)?;
        let completion = self.state.loads.wait_next().ok_or_else(|| ViewerError::LoadFailure {
            file_name: file_name.to_string(),
            reason: "no completion".to_string(),
        })?;
        self.state.finish_load(completion)
    }

    /// Load a unit box under the given file name
    pub fn load(&mut self, file_name: &str) -> Result<ModelId, ViewerError> {
        self.load_bytes(file_name, box_bytes(1.0, 1.0, 1.0))
    }

    /// Load a box of the given size
    pub fn load_box(&mut self, file_name: &str, w: f32, h: f32, d: f32) -> Result<ModelId, ViewerError> {
        self.load_bytes(file_name, box_bytes(w, h, d))
    }

    /// Load a box centred somewhere off the origin
    pub fn load_box_at(&mut self, file_name: &str, size: [f32; 3], center: [f32; 3]) -> Result<ModelId, ViewerError> {
        self.load_bytes(file_name, box_bytes_at(size[0], size[1], size[2], center))
    }

    /// How many times the loader was invoked
    pub fn loader_calls(&self) -> usize {
        self.loader.calls()
    }

    // ── Selection ────────────────────────────────────────────

    pub fn select(&mut self, id: &str) -> Result<(), ViewerError> {
        self.state.select_model(id)
    }

    pub fn deselect(&mut self) {
        self.state.deselect();
    }

    pub fn selected(&self) -> Option<ModelId> {
        self.state.selection.selected().cloned()
    }

    // ── Fields ───────────────────────────────────────────────

    pub fn field(&self, field: TransformField) -> String {
        self.state.fields.field(field).to_string()
    }

    /// Type into a field and finish editing
    pub fn set_field(&mut self, field: TransformField, text: &str) {
        self.state.edit_field(field, text);
        self.state.commit_fields();
    }

    pub fn position_field(&self, axis: Axis) -> String {
        self.field(TransformField::Position(axis))
    }

    pub fn rotation_field(&self, axis: Axis) -> String {
        self.field(TransformField::Rotation(axis))
    }

    pub fn scale_field(&self, axis: Axis) -> String {
        self.field(TransformField::Scale(axis))
    }

    // ── Model operations ─────────────────────────────────────

    pub fn delete(&mut self, id: &str) -> Result<(), ViewerError> {
        self.state.delete_model(id)
    }

    pub fn delete_selected(&mut self) -> Result<(), ViewerError> {
        self.state.delete_selected()
    }

    pub fn reset(&mut self) -> Result<(), ViewerError> {
        self.state.reset_selected()
    }

    pub fn set_show_gizmo(&mut self, show: bool) {
        self.state.set_show_gizmo(show);
    }

    pub fn set_mode(&mut self, mode: GizmoMode) -> bool {
        self.state.set_gizmo_mode(mode)
    }

    /// Full drag along one axis: begin, move by `amount`, end
    pub fn drag(&mut self, axis: Axis, amount: f32) -> bool {
        if !self.state.begin_gizmo_drag(axis) {
            return false;
        }
        self.state.gizmo_drag(amount);
        self.state.end_gizmo_drag();
        true
    }

    // ── Queries ──────────────────────────────────────────────

    pub fn model_count(&self) -> usize {
        self.state.registry.len()
    }

    pub fn transform_of(&self, id: &str) -> Option<Transform> {
        self.state.model_transform(id)
    }

    pub fn default_transform_of(&self, id: &str) -> Option<Transform> {
        self.state.registry.get(id).map(|r| *r.default_transform())
    }

    /// Whether the gizmo is attached to the given model
    pub fn gizmo_attached_to(&self, id: &str) -> bool {
        let widget = self.state.selection.widget();
        let handle = self.state.registry.get(id).map(|r| r.scene_object());
        handle.is_some() && widget.target() == handle && widget.enabled() && widget.visible()
    }

    pub fn gizmo_attached(&self) -> bool {
        self.state.selection.widget().target().is_some()
    }

    pub fn resource_counts(&self) -> ResourceCounts {
        self.state.resources.counts()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.state.status.as_ref().map(|s| s.text.as_str())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
