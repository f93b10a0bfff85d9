//! Model lifecycle operations: loading, selection, editing, deletion

use std::path::Path;

use shared::{Axis, GizmoMode, ModelId, Transform};

use super::{AppState, StatusKind, StatusMessage, TransformField};
use crate::error::ViewerError;
use crate::loader::{LoadCompletion, LoadTicket, ModelFormat};
use crate::scene::{PrimitiveKind, SceneGraph};
use crate::state::normalize::NormalizeOptions;
use crate::viewport::picking::{pick_nearest, Aabb, Ray};

impl AppState {
    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    fn report(&mut self, error: &ViewerError) {
        if error.is_silent() {
            tracing::debug!("{error}");
        } else {
            tracing::warn!("{error}");
            self.set_status(StatusKind::Error, error.to_string());
        }
    }

    // ── Loading ──────────────────────────────────────────────

    /// Submit file contents for loading. Unsupported extensions fail here
    /// and never reach the loader.
    pub fn load_file(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<LoadTicket, ViewerError> {
        match self.loads.submit(file_name, bytes) {
            Ok(ticket) => {
                tracing::info!("Loading {file_name}");
                Ok(ticket)
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Read a file from disk and submit it
    pub fn load_path(&mut self, path: &Path) -> Result<LoadTicket, ViewerError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if let Err(e) = ModelFormat::from_file_name(&file_name) {
            self.report(&e);
            return Err(e);
        }
        match std::fs::read(path) {
            Ok(bytes) => self.load_file(&file_name, bytes),
            Err(io) => {
                let e = ViewerError::LoadFailure {
                    file_name,
                    reason: io.to_string(),
                };
                self.report(&e);
                Err(e)
            }
        }
    }

    /// Apply every finished load. Called once per frame.
    pub fn poll_loads(&mut self) -> Vec<ModelId> {
        let mut loaded = Vec::new();
        while let Some(completion) = self.loads.try_next() {
            if let Ok(id) = self.finish_load(completion) {
                loaded.push(id);
            }
        }
        loaded
    }

    /// Register a finished load and select it
    pub fn finish_load(&mut self, completion: LoadCompletion) -> Result<ModelId, ViewerError> {
        let LoadCompletion {
            file_name, result, ..
        } = completion;

        let model = match result {
            Ok(model) => model,
            Err(reason) => {
                let e = ViewerError::LoadFailure { file_name, reason };
                self.report(&e);
                return Err(e);
            }
        };

        let options = NormalizeOptions::from(&self.settings.import);
        let id = self
            .registry
            .register(&file_name, model, &mut self.scene, &mut self.resources, &options);
        self.scene.request_redraw();
        self.set_status(StatusKind::Info, format!("Loaded {file_name}"));
        self.select_model(&id)?;
        Ok(id)
    }

    // ── Selection ────────────────────────────────────────────

    pub fn select_model(&mut self, id: &str) -> Result<(), ViewerError> {
        if let Err(e) = self.selection.select(id, &self.registry) {
            self.report(&e);
            return Err(e);
        }
        self.refresh_fields();
        self.scene.request_redraw();
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
        self.fields.clear();
        self.scene.request_redraw();
    }

    /// Object → Fields for the current selection
    fn refresh_fields(&mut self) {
        match self.selected_transform() {
            Some(transform) => self.fields.object_to_fields(&transform),
            None => self.fields.clear(),
        }
    }

    fn selected_transform_mut(&mut self) -> Option<&mut Transform> {
        let id = self.selection.selected()?;
        let handle = self.registry.get(id)?.scene_object();
        self.scene.node_mut(handle).map(|node| &mut node.transform)
    }

    pub fn selected_transform(&self) -> Option<Transform> {
        let id = self.selection.selected()?;
        self.model_transform(id)
    }

    pub fn model_transform(&self, id: &str) -> Option<Transform> {
        let handle = self.registry.get(id)?.scene_object();
        self.scene.node(handle).map(|node| node.transform)
    }

    /// World bounds of a loaded model
    pub fn model_bounds(&self, id: &str) -> Option<Aabb> {
        let handle = self.registry.get(id)?.scene_object();
        self.scene.node(handle)?.world_bounds(&self.resources)
    }

    /// Nearest model hit by the ray
    pub fn pick_model(&self, ray: &Ray) -> Option<ModelId> {
        let candidates: Vec<(&ModelId, Aabb)> = self
            .registry
            .list()
            .filter_map(|record| Some((record.id(), self.model_bounds(record.id())?)))
            .collect();
        pick_nearest(ray, candidates)
    }

    /// Viewport click: select the model under the cursor, or deselect on empty space
    pub fn click_select(&mut self, ray: &Ray) -> Option<ModelId> {
        match self.pick_model(ray) {
            Some(id) => {
                self.select_model(&id).ok()?;
                Some(id)
            }
            None => {
                self.deselect();
                None
            }
        }
    }

    // ── Removal ──────────────────────────────────────────────

    /// Delete a model. If it was selected, the gizmo is detached first and
    /// selection moves to the neighbouring record.
    pub fn delete_model(&mut self, id: &str) -> Result<(), ViewerError> {
        if !self.registry.contains(id) {
            let e = ViewerError::StaleReference(id.to_string());
            self.report(&e);
            return Err(e);
        }

        let fallback = if self.selection.is_selected(id) {
            let next = self.registry.neighbor_of(id);
            self.deselect();
            next
        } else {
            None
        };

        let name = self
            .registry
            .get(id)
            .map(|r| r.display_name().to_string())
            .unwrap_or_default();
        self.registry.remove(id, &mut self.scene, &mut self.resources);
        self.scene.request_redraw();
        self.set_status(StatusKind::Info, format!("Removed {name}"));

        if let Some(next) = fallback {
            self.select_model(&next)?;
        }
        Ok(())
    }

    pub fn delete_selected(&mut self) -> Result<(), ViewerError> {
        match self.selection.selected().cloned() {
            Some(id) => self.delete_model(&id),
            None => Ok(()),
        }
    }

    // ── Editing ──────────────────────────────────────────────

    /// Restore the transform captured at load time
    pub fn reset_model(&mut self, id: &str) -> Result<(), ViewerError> {
        let Some(record) = self.registry.get(id) else {
            let e = ViewerError::StaleReference(id.to_string());
            self.report(&e);
            return Err(e);
        };
        let default = *record.default_transform();
        let handle = record.scene_object();
        let selected = self.selection.is_selected(id);

        if let Some(node) = self.scene.node_mut(handle) {
            if selected {
                self.fields.reset(&default, &mut node.transform);
            } else {
                node.transform = default;
            }
        }
        self.scene.request_redraw();
        Ok(())
    }

    pub fn reset_selected(&mut self) -> Result<(), ViewerError> {
        match self.selection.selected().cloned() {
            Some(id) => self.reset_model(&id),
            None => Ok(()),
        }
    }

    /// User typed into a field; pushes all nine fields to the selected model
    pub fn edit_field(&mut self, field: TransformField, text: impl Into<String>) {
        if self.selection.selected().is_none() {
            return;
        }
        self.fields.edit(field, text);

        let mut fields = std::mem::take(&mut self.fields);
        if let Some(transform) = self.selected_transform_mut() {
            if fields.fields_to_object(transform) {
                self.scene.request_redraw();
            }
        }
        self.fields = fields;
    }

    /// Editing finished (focus lost or Enter): show the applied values
    pub fn commit_fields(&mut self) {
        self.refresh_fields();
    }

    pub fn set_show_gizmo(&mut self, show: bool) {
        self.settings.gizmo.show_gizmo = show;
        self.selection.toggle_preference(show, &self.registry);
        self.scene.request_redraw();
    }

    pub fn set_gizmo_mode(&mut self, mode: GizmoMode) -> bool {
        let changed = self.selection.set_mode(mode);
        if changed {
            self.scene.request_redraw();
        }
        changed
    }

    // ── Gizmo drag ───────────────────────────────────────────

    pub fn begin_gizmo_drag(&mut self, axis: Axis) -> bool {
        self.selection.begin_drag(axis)
    }

    /// Move the selected model along the active axis
    pub fn gizmo_drag(&mut self, amount: f32) {
        let Some(id) = self.selection.selected() else {
            return;
        };
        let Some(handle) = self.registry.get(id).map(|r| r.scene_object()) else {
            return;
        };
        if let Some(node) = self.scene.node_mut(handle) {
            self.selection.drag(&mut node.transform, amount);
        }
        self.process_gizmo_events();
    }

    pub fn end_gizmo_drag(&mut self) {
        self.selection.end_drag();
        self.process_gizmo_events();
    }

    /// Drain widget notifications; a change refreshes the fields
    pub fn process_gizmo_events(&mut self) {
        let events = self.selection.take_events();
        if events.contains(&super::GizmoEvent::Changed) {
            self.refresh_fields();
            self.scene.request_redraw();
        }
    }

    // ── Scene content ────────────────────────────────────────

    /// Recolor one of the fixed primitives. The box keeps its color.
    pub fn set_primitive_color(&mut self, kind: PrimitiveKind, rgb: [f32; 3]) -> bool {
        if !kind.color_editable() {
            return false;
        }
        let Some(material) = self
            .content
            .material(kind)
            .and_then(|handle| self.resources.material_mut(handle))
        else {
            return false;
        };
        material.base_color = [rgb[0], rgb[1], rgb[2], 1.0];
        self.scene.request_redraw();
        true
    }

    pub fn primitive_color(&self, kind: PrimitiveKind) -> Option<[f32; 3]> {
        let material = self.resources.material(self.content.material(kind)?)?;
        let [r, g, b, _] = material.base_color;
        Some([r, g, b])
    }
}
