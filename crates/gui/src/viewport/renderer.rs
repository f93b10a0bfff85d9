//! Wireframe rendering for the viewport using egui's painter

use egui::{Color32, Rect, Stroke, Ui};
use glam::{Mat4, Vec3};

use super::camera::OrbitCamera;
use crate::resources::ResourcePool;
use crate::scene::{NodeHandle, SceneNode};
use crate::state::settings::{AxisSettings, GridSettings};
use crate::state::AppState;

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

fn material_color(node: &SceneNode, pool: &ResourcePool) -> Option<Color32> {
    let material = pool.material(*node.materials().first()?)?;
    let [r, g, b, _] = material.base_color;
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Some(Color32::from_rgb(channel(r), channel(g), channel(b)))
}

/// Paint background, grid, axes, every scene node and the gizmo
pub fn paint_viewport(
    ui: &Ui,
    rect: Rect,
    camera: &OrbitCamera,
    state: &AppState,
    gizmo: &[(Vec3, Vec3, Color32)],
) {
    let painter = ui.painter_at(rect);
    let viewport = &state.settings.viewport;

    painter.rect_filled(rect, 0.0, rgb(viewport.background_color));

    if state.settings.grid.visible {
        draw_grid(&painter, rect, camera, &state.settings.grid);
    }
    if state.settings.axes.visible {
        draw_axes(&painter, rect, camera, &state.settings.axes);
    }

    let selected_root = state
        .selection
        .selected()
        .and_then(|id| state.registry.get(id))
        .map(|r| r.scene_object());
    let model_roots: Vec<NodeHandle> = state.registry.list().map(|r| r.scene_object()).collect();

    for (handle, root) in state.scene.iter() {
        if !root.visible {
            continue;
        }
        let is_model = model_roots.contains(&handle);
        let stroke = if selected_root == Some(handle) {
            Some(Stroke::new(1.6, rgb(viewport.selection_color)))
        } else if is_model {
            Some(Stroke::new(1.0, rgb(viewport.model_color)))
        } else {
            None
        };
        draw_node(&painter, rect, camera, root, &state.resources, stroke);
    }

    for &(a, b, color) in gizmo {
        draw_line_3d(&painter, rect, camera, a, b, Stroke::new(2.5, color));
    }
}

/// Draw a subtree as wireframe. Without an explicit stroke each mesh uses
/// its first material's color.
fn draw_node(
    painter: &egui::Painter,
    rect: Rect,
    camera: &OrbitCamera,
    root: &SceneNode,
    pool: &ResourcePool,
    stroke: Option<Stroke>,
) {
    root.visit_world(Mat4::IDENTITY, &mut |node, world| {
        if !node.visible {
            return;
        }
        let Some(geometry) = node.geometry().and_then(|g| pool.geometry(g)) else {
            return;
        };
        let stroke = stroke.unwrap_or_else(|| {
            Stroke::new(0.8, material_color(node, pool).unwrap_or(Color32::GRAY))
        });

        let projected: Vec<Option<egui::Pos2>> = geometry
            .positions
            .iter()
            .map(|p| camera.project(world.transform_point3(Vec3::from_array(*p)), rect))
            .collect();
        for &(a, b) in geometry.edges() {
            if let (Some(Some(pa)), Some(Some(pb))) = (projected.get(a as usize), projected.get(b as usize)) {
                painter.line_segment([*pa, *pb], stroke);
            }
        }
    });
}

fn draw_grid(painter: &egui::Painter, rect: Rect, camera: &OrbitCamera, settings: &GridSettings) {
    let alpha = (settings.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    let stroke = Stroke::new(0.5, Color32::from_rgba_unmultiplied(90, 90, 90, alpha));

    let extent = settings.range as f32 * settings.size;
    for i in -settings.range..=settings.range {
        let f = i as f32 * settings.size;
        draw_line_3d(painter, rect, camera, Vec3::new(f, 0.0, -extent), Vec3::new(f, 0.0, extent), stroke);
        draw_line_3d(painter, rect, camera, Vec3::new(-extent, 0.0, f), Vec3::new(extent, 0.0, f), stroke);
    }
}

fn draw_axes(painter: &egui::Painter, rect: Rect, camera: &OrbitCamera, settings: &AxisSettings) {
    let Some(origin) = camera.project(Vec3::ZERO, rect) else {
        return;
    };
    let axes = [
        (Vec3::X, "X", Color32::from_rgb(220, 50, 50)),
        (Vec3::Y, "Y", Color32::from_rgb(50, 200, 50)),
        (Vec3::Z, "Z", Color32::from_rgb(50, 100, 220)),
    ];
    for (dir, label, color) in axes {
        let Some(end) = camera.project(dir * settings.length, rect) else {
            continue;
        };
        painter.line_segment([origin, end], Stroke::new(settings.thickness, color));
        if settings.show_labels {
            painter.text(end, egui::Align2::LEFT_BOTTOM, label, egui::FontId::monospace(10.0), color);
        }
    }
}

fn draw_line_3d(painter: &egui::Painter, rect: Rect, camera: &OrbitCamera, a: Vec3, b: Vec3, stroke: Stroke) {
    if let (Some(pa), Some(pb)) = (camera.project(a, rect), camera.project(b, rect)) {
        if rect.contains(pa) || rect.contains(pb) {
            painter.line_segment([pa, pb], stroke);
        }
    }
}
