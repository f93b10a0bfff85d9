//! Transform math shared by the scene graph, model normalization and the viewport

use glam::{EulerRot, Mat4, Quat, Vec3};
use shared::Transform;

/// Rotation quaternion for XYZ Euler angles in radians
pub fn rotation_quat(rotation: [f32; 3]) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation[0], rotation[1], rotation[2])
}

/// XYZ Euler angles (radians) of a rotation quaternion
pub fn euler_from_quat(q: Quat) -> [f32; 3] {
    let (x, y, z) = q.to_euler(EulerRot::XYZ);
    [x, y, z]
}

/// Local matrix of a transform: translate * rotate * scale
pub fn transform_matrix(t: &Transform) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::from_array(t.scale),
        rotation_quat(t.rotation),
        Vec3::from_array(t.position),
    )
}

/// First 8 characters of an id, for compact display
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_matrix() {
        assert_eq!(transform_matrix(&Transform::new()), Mat4::IDENTITY);
    }

    #[test]
    fn test_euler_quat_roundtrip() {
        let rotation = [0.3, -0.4, 0.5];
        let back = euler_from_quat(rotation_quat(rotation));
        for (a, b) in rotation.iter().zip(back.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_translation_applies_after_scale() {
        let t = Transform {
            position: [0.0, 1.0, 0.0],
            rotation: [0.0; 3],
            scale: [2.0, 2.0, 2.0],
        };
        let p = transform_matrix(&t).transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(2.0, 3.0, 2.0));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
