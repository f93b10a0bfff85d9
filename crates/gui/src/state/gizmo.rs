//! Manipulation widget: attaches to one scene object and edits its transform
//! while the user drags a handle.

use shared::{Axis, GizmoMode, Transform};

use crate::codec::clamp_scale;
use crate::scene::NodeHandle;

/// Notification emitted by the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoEvent {
    /// The attached object's transform was edited by a drag
    Changed,
    DragStarted,
    DragEnded,
}

pub trait ManipulationWidget {
    fn attach(&mut self, target: NodeHandle);
    fn detach(&mut self);
    fn target(&self) -> Option<NodeHandle>;

    fn mode(&self) -> GizmoMode;
    fn set_mode(&mut self, mode: GizmoMode);

    fn enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
    fn visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);

    /// Start dragging a handle; refused unless attached and enabled
    fn begin_drag(&mut self, axis: Axis) -> bool;
    /// Apply a drag step of `amount` along the active axis to `object`
    fn drag(&mut self, object: &mut Transform, amount: f32);
    fn end_drag(&mut self);
    fn dragging(&self) -> bool;
    fn active_axis(&self) -> Option<Axis>;

    /// Drain pending notifications
    fn take_events(&mut self) -> Vec<GizmoEvent>;
}

/// Translate/rotate/scale gizmo
#[derive(Debug, Default)]
pub struct TransformGizmo {
    target: Option<NodeHandle>,
    mode: GizmoMode,
    enabled: bool,
    visible: bool,
    active_axis: Option<Axis>,
    events: Vec<GizmoEvent>,
}

impl TransformGizmo {
    pub fn new(mode: GizmoMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}

impl ManipulationWidget for TransformGizmo {
    fn attach(&mut self, target: NodeHandle) {
        if self.target != Some(target) {
            self.end_drag();
        }
        self.target = Some(target);
    }

    fn detach(&mut self) {
        self.end_drag();
        self.target = None;
    }

    fn target(&self) -> Option<NodeHandle> {
        self.target
    }

    fn mode(&self) -> GizmoMode {
        self.mode
    }

    fn set_mode(&mut self, mode: GizmoMode) {
        self.mode = mode;
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.end_drag();
        }
        self.enabled = enabled;
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn begin_drag(&mut self, axis: Axis) -> bool {
        if self.target.is_none() || !self.enabled {
            return false;
        }
        if self.active_axis.is_none() {
            self.events.push(GizmoEvent::DragStarted);
        }
        self.active_axis = Some(axis);
        true
    }

    fn drag(&mut self, object: &mut Transform, amount: f32) {
        let Some(axis) = self.active_axis else {
            return;
        };
        if amount == 0.0 || !amount.is_finite() {
            return;
        }
        let i = axis.index();
        match self.mode {
            GizmoMode::Translate => object.position[i] += amount,
            GizmoMode::Rotate => object.rotation[i] += amount,
            GizmoMode::Scale => object.scale[i] = clamp_scale(object.scale[i] + amount),
        }
        self.events.push(GizmoEvent::Changed);
    }

    fn end_drag(&mut self) {
        if self.active_axis.take().is_some() {
            self.events.push(GizmoEvent::DragEnded);
        }
    }

    fn dragging(&self) -> bool {
        self.active_axis.is_some()
    }

    fn active_axis(&self) -> Option<Axis> {
        self.active_axis
    }

    fn take_events(&mut self) -> Vec<GizmoEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SCALE_EPSILON;
    use crate::scene::{Scene, SceneGraph, SceneNode};

    fn attached_gizmo() -> TransformGizmo {
        let mut scene = Scene::new();
        let handle = scene.add(SceneNode::group("target"));
        let mut g = TransformGizmo::new(GizmoMode::Translate);
        g.attach(handle);
        g.set_enabled(true);
        g
    }

    #[test]
    fn test_drag_requires_attachment() {
        let mut g = TransformGizmo::default();
        g.set_enabled(true);
        assert!(!g.begin_drag(Axis::X));
        assert!(g.take_events().is_empty());
    }

    #[test]
    fn test_drag_requires_enabled() {
        let mut g = attached_gizmo();
        g.set_enabled(false);
        assert!(!g.begin_drag(Axis::X));
    }

    #[test]
    fn test_translate_drag_emits_events() {
        let mut g = attached_gizmo();
        let mut t = Transform::new();
        assert!(g.begin_drag(Axis::Y));
        g.drag(&mut t, 0.5);
        g.drag(&mut t, 0.25);
        g.end_drag();
        assert_eq!(t.position, [0.0, 0.75, 0.0]);
        assert_eq!(
            g.take_events(),
            vec![
                GizmoEvent::DragStarted,
                GizmoEvent::Changed,
                GizmoEvent::Changed,
                GizmoEvent::DragEnded
            ]
        );
        assert!(!g.dragging());
    }

    #[test]
    fn test_rotate_and_scale_modes() {
        let mut g = attached_gizmo();
        let mut t = Transform::new();
        g.set_mode(GizmoMode::Rotate);
        g.begin_drag(Axis::Z);
        g.drag(&mut t, 0.1);
        assert_eq!(t.rotation, [0.0, 0.0, 0.1]);

        g.set_mode(GizmoMode::Scale);
        g.drag(&mut t, -5.0);
        assert_eq!(t.scale[2], SCALE_EPSILON);
    }

    #[test]
    fn test_detach_ends_drag() {
        let mut g = attached_gizmo();
        g.begin_drag(Axis::X);
        g.take_events();
        g.detach();
        assert!(g.target().is_none());
        assert_eq!(g.take_events(), vec![GizmoEvent::DragEnded]);
    }

    #[test]
    fn test_drag_without_active_axis_is_ignored() {
        let mut g = attached_gizmo();
        let mut t = Transform::new();
        g.drag(&mut t, 1.0);
        assert_eq!(t, Transform::new());
        assert!(g.take_events().is_empty());
    }
}
