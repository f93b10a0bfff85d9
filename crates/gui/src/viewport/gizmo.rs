use egui::Color32;
use glam::Vec3;
use shared::{Axis, GizmoMode};

use super::camera::OrbitCamera;
use super::picking::Ray;

/// Pick tolerance as a fraction of the handle length
const HIT_TOLERANCE: f32 = 0.1;
const RING_SEGMENTS: usize = 48;
/// Radians per pixel of drag in rotate mode
const ROTATE_SPEED: f32 = 0.01;

pub fn axis_direction(axis: Axis) -> Vec3 {
    match axis {
        Axis::X => Vec3::X,
        Axis::Y => Vec3::Y,
        Axis::Z => Vec3::Z,
    }
}

pub fn axis_color(axis: Axis, active: bool) -> Color32 {
    if active {
        return Color32::from_rgb(255, 220, 60);
    }
    match axis {
        Axis::X => Color32::from_rgb(230, 60, 60),
        Axis::Y => Color32::from_rgb(60, 210, 60),
        Axis::Z => Color32::from_rgb(60, 110, 235),
    }
}

/// Test which handle the ray grabs: axis lines for translate/scale, rings for rotate.
pub fn gizmo_hit_test(ray: &Ray, center: Vec3, size: f32, mode: GizmoMode) -> Option<Axis> {
    let threshold = size * HIT_TOLERANCE;
    let mut best: Option<(Axis, f32)> = None;

    for axis in Axis::all() {
        let dir = axis_direction(axis);
        let dist = match mode {
            GizmoMode::Translate | GizmoMode::Scale => ray_segment_distance(ray, center, center + dir * size),
            GizmoMode::Rotate => match ray_plane_hit(ray, center, dir) {
                Some(hit) => ((hit - center).length() - size).abs(),
                None => continue,
            },
        };
        if dist < threshold && best.is_none_or(|(_, d)| dist < d) {
            best = Some((axis, dist));
        }
    }

    best.map(|(axis, _)| axis)
}

/// Convert a screen drag into the amount passed to the widget:
/// world units for translate, radians for rotate, scale factor delta for scale.
pub fn drag_amount(
    camera: &OrbitCamera,
    center: Vec3,
    axis: Axis,
    mode: GizmoMode,
    size: f32,
    screen_delta: egui::Vec2,
    rect: egui::Rect,
) -> f32 {
    if mode == GizmoMode::Rotate {
        return (screen_delta.x - screen_delta.y) * ROTATE_SPEED;
    }

    let dir = axis_direction(axis);
    let (Some(p0), Some(p1)) = (camera.project(center, rect), camera.project(center + dir, rect)) else {
        return 0.0;
    };
    let screen_axis = p1 - p0;
    let pixels_per_unit = screen_axis.length();
    if pixels_per_unit < 1.0 {
        return 0.0;
    }
    let world = screen_delta.dot(screen_axis / pixels_per_unit) / pixels_per_unit;

    match mode {
        GizmoMode::Scale => world / size,
        _ => world,
    }
}

/// Line segments of the gizmo in world space
pub fn gizmo_segments(center: Vec3, size: f32, mode: GizmoMode, active: Option<Axis>) -> Vec<(Vec3, Vec3, Color32)> {
    let mut segments = Vec::new();
    for axis in Axis::all() {
        let color = axis_color(axis, active == Some(axis));
        let dir = axis_direction(axis);
        match mode {
            GizmoMode::Translate => {
                let tip = center + dir * size;
                segments.push((center, tip, color));
                let (u, v) = perpendiculars(dir);
                let back = tip - dir * size * 0.15;
                for side in [u, -u, v, -v] {
                    segments.push((tip, back + side * size * 0.06, color));
                }
            }
            GizmoMode::Scale => {
                let tip = center + dir * size;
                segments.push((center, tip, color));
                let (u, v) = perpendiculars(dir);
                let h = size * 0.06;
                let corners = [tip + (u + v) * h, tip + (u - v) * h, tip - (u + v) * h, tip - (u - v) * h];
                for i in 0..4 {
                    segments.push((corners[i], corners[(i + 1) % 4], color));
                }
            }
            GizmoMode::Rotate => {
                let (u, v) = perpendiculars(dir);
                let point = |i: usize| {
                    let a = i as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
                    center + (u * a.cos() + v * a.sin()) * size
                };
                for i in 0..RING_SEGMENTS {
                    segments.push((point(i), point(i + 1), color));
                }
            }
        }
    }
    segments
}

// ── Helpers ──────────────────────────────────────────────────

fn perpendiculars(dir: Vec3) -> (Vec3, Vec3) {
    let u = dir.any_orthonormal_vector();
    (u, dir.cross(u))
}

fn ray_plane_hit(ray: &Ray, point: Vec3, normal: Vec3) -> Option<Vec3> {
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denom;
    (t >= 0.0).then(|| ray.origin + ray.direction * t)
}

/// Minimum distance between a ray and a line segment.
fn ray_segment_distance(ray: &Ray, start: Vec3, end: Vec3) -> f32 {
    let u = ray.direction;
    let v = end - start;
    let w = ray.origin - start;

    let a = u.dot(u);
    let b = u.dot(v);
    let c = v.dot(v);
    let d = u.dot(w);
    let e = v.dot(w);
    let denom = a * c - b * b;

    let (s, t) = if denom < 1e-7 {
        // Nearly parallel
        (0.0, if b > c { d / b } else { e / c })
    } else {
        ((b * e - c * d) / denom, (a * e - b * d) / denom)
    };
    let t = t.clamp(0.0, 1.0);
    let s = s.max(0.0);

    ((ray.origin + u * s) - (start + v * t)).length()
}
