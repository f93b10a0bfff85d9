//! Selection state machine and gizmo attachment.
//!
//! The widget is attached exactly when a model is selected and the
//! show-gizmo preference is on. Orbit input is off while a drag runs.

use shared::{GizmoMode, ModelId};

use super::gizmo::{GizmoEvent, ManipulationWidget, TransformGizmo};
use super::registry::ModelRegistry;
use crate::error::ViewerError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Selected(ModelId),
}

pub struct SelectionController<W: ManipulationWidget = TransformGizmo> {
    state: Selection,
    show_gizmo: bool,
    orbit_enabled: bool,
    widget: W,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(TransformGizmo::default(), true)
    }
}

impl<W: ManipulationWidget> SelectionController<W> {
    pub fn new(widget: W, show_gizmo: bool) -> Self {
        let mut controller = Self {
            state: Selection::None,
            show_gizmo,
            orbit_enabled: true,
            widget,
        };
        controller.widget.detach();
        controller.widget.set_enabled(false);
        controller.widget.set_visible(false);
        controller
    }

    pub fn selection(&self) -> &Selection {
        &self.state
    }

    pub fn selected(&self) -> Option<&ModelId> {
        match &self.state {
            Selection::Selected(id) => Some(id),
            Selection::None => None,
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected().is_some_and(|s| s == id)
    }

    pub fn show_gizmo(&self) -> bool {
        self.show_gizmo
    }

    /// Whether camera orbit input is accepted
    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    // ── Transitions ──────────────────────────────────────────

    /// Select a model; fails with `StaleReference` if it is not registered
    pub fn select(&mut self, id: &str, registry: &ModelRegistry) -> Result<(), ViewerError> {
        if !registry.contains(id) {
            return Err(ViewerError::StaleReference(id.to_string()));
        }
        if !self.is_selected(id) {
            self.widget.end_drag();
        }
        self.state = Selection::Selected(id.to_string());
        self.sync_widget(registry);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.state = Selection::None;
        self.widget.detach();
        self.widget.set_enabled(false);
        self.widget.set_visible(false);
        self.orbit_enabled = true;
    }

    /// Change the show-gizmo preference; selection is kept
    pub fn toggle_preference(&mut self, show_gizmo: bool, registry: &ModelRegistry) {
        self.show_gizmo = show_gizmo;
        self.sync_widget(registry);
    }

    /// Switch the gizmo mode. Ignored (returns false) while the widget is disabled.
    pub fn set_mode(&mut self, mode: GizmoMode) -> bool {
        if !self.widget.enabled() {
            return false;
        }
        self.widget.set_mode(mode);
        true
    }

    pub fn mode(&self) -> GizmoMode {
        self.widget.mode()
    }

    fn sync_widget(&mut self, registry: &ModelRegistry) {
        let target = self
            .selected()
            .filter(|_| self.show_gizmo)
            .and_then(|id| registry.get(id))
            .map(|record| record.scene_object());

        match target {
            Some(handle) => {
                self.widget.attach(handle);
                self.widget.set_enabled(true);
                self.widget.set_visible(true);
            }
            None => {
                self.widget.detach();
                self.widget.set_enabled(false);
                self.widget.set_visible(false);
            }
        }
        self.drain_drag_state();
    }

    // ── Widget interaction ───────────────────────────────────

    pub fn begin_drag(&mut self, axis: shared::Axis) -> bool {
        let started = self.widget.begin_drag(axis);
        self.drain_drag_state();
        started
    }

    pub fn drag(&mut self, object: &mut shared::Transform, amount: f32) {
        self.widget.drag(object, amount);
    }

    pub fn end_drag(&mut self) {
        self.widget.end_drag();
    }

    /// Take widget notifications, updating orbit gating on drag begin/end
    pub fn take_events(&mut self) -> Vec<GizmoEvent> {
        let events = self.widget.take_events();
        for event in &events {
            match event {
                GizmoEvent::DragStarted => self.orbit_enabled = false,
                GizmoEvent::DragEnded => self.orbit_enabled = true,
                GizmoEvent::Changed => {}
            }
        }
        events
    }

    fn drain_drag_state(&mut self) {
        self.orbit_enabled = !self.widget.dragging();
    }
}
