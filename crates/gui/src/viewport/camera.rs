use glam::{Mat4, Vec3, Vec4};

use super::picking::{Aabb, Ray};

const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

/// Orbit camera around a target point
pub struct OrbitCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl OrbitCamera {
    /// Camera at (6, 5, 6) looking at the origin
    pub fn new(fov_degrees: f32) -> Self {
        let eye = Vec3::new(6.0, 5.0, 6.0);
        let distance = eye.length();
        Self {
            yaw: eye.x.atan2(eye.z),
            pitch: (eye.y / distance).asin(),
            distance,
            target: Vec3::ZERO,
            fov: fov_degrees.to_radians(),
        }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx.to_radians();
        self.pitch = (self.pitch + dy.to_radians()).clamp(-1.5, 1.5);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta)).clamp(0.5, FAR * 0.5);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let right = self.right_vector();
        let up = self.up_vector();
        // Scale with distance so panning feels the same at any zoom
        let k = self.distance * 0.1;
        self.target += (-right * dx + up * dy) * k;
    }

    /// Look at a box from a distance that fits it in view
    pub fn frame(&mut self, bounds: &Aabb) {
        self.target = bounds.center();
        let radius = bounds.size().length() * 0.5;
        let fit = radius / (self.fov * 0.5).sin().max(0.1);
        self.distance = fit.clamp(1.0, FAR * 0.5);
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cp * sy, sp, cp * cy)
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, NEAR, FAR)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        self.right_vector().cross(fwd).normalize_or_zero()
    }

    /// Project a world point to screen coords; `None` behind the camera
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let aspect = rect.width() / rect.height();
        let p = self.view_projection(aspect) * point.extend(1.0);
        if p.w <= NEAR {
            return None;
        }
        let ndc = p.truncate() / p.w;
        Some(egui::pos2(
            rect.center().x + ndc.x * rect.width() * 0.5,
            rect.center().y - ndc.y * rect.height() * 0.5,
        ))
    }

    /// Cast a ray from a screen position into the scene
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let aspect = rect.width() / rect.height();
        let ndc_x = (screen_pos.x - rect.center().x) / (rect.width() * 0.5);
        let ndc_y = -(screen_pos.y - rect.center().y) / (rect.height() * 0.5);

        let inverse = self.view_projection(aspect).inverse();
        let near = inverse * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far = inverse * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        Ray {
            origin: self.eye_position(),
            direction: (far - near).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_initial_eye() {
        let cam = OrbitCamera::new(60.0);
        let eye = cam.eye_position();
        assert!((eye - Vec3::new(6.0, 5.0, 6.0)).length() < 1e-4);
    }

    #[test]
    fn test_target_projects_to_center() {
        let cam = OrbitCamera::new(60.0);
        let p = cam.project(Vec3::ZERO, rect()).unwrap();
        assert!((p - rect().center()).length() < 1e-3);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let cam = OrbitCamera::new(60.0);
        let ray = cam.screen_ray(rect().center(), rect());
        let to_target = (cam.target - ray.origin).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999);
    }

    #[test]
    fn test_frame_moves_target() {
        let mut cam = OrbitCamera::new(60.0);
        let bounds = Aabb {
            min: Vec3::new(2.0, 0.0, 2.0),
            max: Vec3::new(4.0, 2.0, 4.0),
        };
        cam.frame(&bounds);
        assert_eq!(cam.target, Vec3::new(3.0, 1.0, 3.0));
        assert!(cam.distance >= 1.0);
    }
}
