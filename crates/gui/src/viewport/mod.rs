//! 3D viewport panel: camera input, click picking, gizmo drags and painting

mod camera;
mod gizmo;
pub use glview_gui_lib::viewport::picking;
mod renderer;

use egui::Ui;
use glam::Vec3;

use crate::i18n::t;
use crate::state::{AppState, ManipulationWidget};
use camera::OrbitCamera;
use gizmo::{drag_amount, gizmo_hit_test, gizmo_segments};

/// 3D viewport panel
pub struct ViewportPanel {
    camera: OrbitCamera,
}

impl ViewportPanel {
    pub fn new(fov_degrees: f32) -> Self {
        Self {
            camera: OrbitCamera::new(fov_degrees),
        }
    }

    pub fn reset_camera(&mut self) {
        let fov = self.camera.fov.to_degrees();
        self.camera = OrbitCamera::new(fov);
    }

    pub fn set_fov(&mut self, fov_degrees: f32) {
        self.camera.fov = fov_degrees.to_radians();
    }

    /// Point the camera at the selected model
    pub fn focus_selection(&mut self, state: &AppState) {
        let bounds = state.selection.selected().and_then(|id| state.model_bounds(id));
        if let Some(bounds) = bounds {
            self.camera.frame(&bounds);
        }
    }

    /// Gizmo position: center of the selected model's bounds, while the gizmo is shown
    fn gizmo_center(state: &AppState) -> Option<Vec3> {
        if !state.selection.widget().visible() {
            return None;
        }
        let id = state.selection.selected()?;
        state.model_bounds(id).map(|b| b.center())
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        self.handle_gizmo_drag(&response, rect, state);
        self.handle_camera(&response, ui, state);
        self.handle_click(&response, rect, state);

        if !ui.is_rect_visible(rect) {
            return;
        }

        let segments = Self::gizmo_center(state)
            .map(|center| {
                let widget = state.selection.widget();
                gizmo_segments(center, state.settings.gizmo.size, widget.mode(), widget.active_axis())
            })
            .unwrap_or_default();
        renderer::paint_viewport(ui, rect, &self.camera, state, &segments);

        self.draw_overlays(ui, rect, state);
    }

    fn handle_gizmo_drag(&mut self, response: &egui::Response, rect: egui::Rect, state: &mut AppState) {
        let size = state.settings.gizmo.size;

        if response.drag_started_by(egui::PointerButton::Primary) && !response.ctx.input(|i| i.modifiers.alt) {
            let pos = response.interact_pointer_pos().or_else(|| response.hover_pos());
            if let (Some(pos), Some(center)) = (pos, Self::gizmo_center(state)) {
                let ray = self.camera.screen_ray(pos, rect);
                if let Some(axis) = gizmo_hit_test(&ray, center, size, state.selection.mode()) {
                    state.begin_gizmo_drag(axis);
                }
            }
        }

        if !state.selection.widget().dragging() {
            return;
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            let widget = state.selection.widget();
            if let (Some(axis), Some(center)) = (widget.active_axis(), Self::gizmo_center(state)) {
                let amount = drag_amount(
                    &self.camera,
                    center,
                    axis,
                    widget.mode(),
                    size,
                    response.drag_delta(),
                    rect,
                );
                state.gizmo_drag(amount);
            }
        }
        if response.drag_stopped() || !response.dragged_by(egui::PointerButton::Primary) {
            state.end_gizmo_drag();
        }
    }

    fn handle_camera(&mut self, response: &egui::Response, ui: &Ui, state: &AppState) {
        // Orbit is suspended while the gizmo is being dragged
        if state.selection.orbit_enabled() && !state.selection.widget().dragging() {
            if response.dragged_by(egui::PointerButton::Primary) || response.dragged_by(egui::PointerButton::Middle) {
                let delta = response.drag_delta();
                self.camera.rotate(delta.x * 0.5, delta.y * 0.5);
            }
            if response.dragged_by(egui::PointerButton::Secondary) {
                let delta = response.drag_delta();
                self.camera.pan(delta.x * 0.01, delta.y * 0.01);
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }
    }

    fn handle_click(&mut self, response: &egui::Response, rect: egui::Rect, state: &mut AppState) {
        if !response.clicked() {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let ray = self.camera.screen_ray(pos, rect);

        // A click on a gizmo handle is not a pick
        let on_gizmo = Self::gizmo_center(state)
            .and_then(|center| gizmo_hit_test(&ray, center, state.settings.gizmo.size, state.selection.mode()))
            .is_some();
        if !on_gizmo {
            state.click_select(&ray);
        }
    }

    fn draw_overlays(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let painter = ui.painter_at(rect);

        if state.registry.is_empty() {
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 20.0),
                egui::Align2::CENTER_BOTTOM,
                t("status.nav_hint"),
                egui::FontId::proportional(11.0),
                egui::Color32::from_rgb(100, 100, 110),
            );
        }

        let overlay_rect = egui::Rect::from_min_size(
            egui::pos2(rect.right() - 140.0, rect.top() + 4.0),
            egui::vec2(136.0, 44.0),
        );
        painter.rect_filled(overlay_rect, 4.0, egui::Color32::from_rgba_premultiplied(0, 0, 0, 140));
        painter.text(
            overlay_rect.min + egui::vec2(6.0, 4.0),
            egui::Align2::LEFT_TOP,
            format!(
                "Dist: {:.1}\nYaw: {:.0}  Pitch: {:.0}",
                self.camera.distance,
                self.camera.yaw.to_degrees(),
                self.camera.pitch.to_degrees(),
            ),
            egui::FontId::monospace(10.0),
            egui::Color32::from_rgb(160, 160, 170),
        );
    }
}
