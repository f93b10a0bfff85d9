use glam::{Mat4, Vec3};

/// A ray in world space
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Bounds of a point set, `None` when the set is empty
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self { min: first, max: first };
        for p in iter {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
        }
        Some(aabb)
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest extent along any axis
    pub fn max_dimension(&self) -> f32 {
        self.size().max_element()
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of this box after an affine transform
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        let corners = self.corners().map(|c| matrix.transform_point3(c));
        let mut out = Aabb {
            min: corners[0],
            max: corners[0],
        };
        for c in &corners[1..] {
            out.min = out.min.min(*c);
            out.max = out.max.max(*c);
        }
        out
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Pick the nearest object whose AABB is intersected by the ray.
pub fn pick_nearest<'a, K: Clone + 'a>(
    ray: &Ray,
    candidates: impl IntoIterator<Item = (&'a K, Aabb)>,
) -> Option<K> {
    let mut best: Option<(&K, f32)> = None;

    for (id, aabb) in candidates {
        if let Some(dist) = ray_aabb(ray, &aabb) {
            if best.as_ref().is_none_or(|(_, d)| dist < *d) {
                best = Some((id, dist));
            }
        }
    }

    best.map(|(id, _)| id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(center: Vec3) -> Aabb {
        Aabb {
            min: center - Vec3::splat(0.5),
            max: center + Vec3::splat(0.5),
        }
    }

    #[test]
    fn test_from_points() {
        let aabb = Aabb::from_points([Vec3::new(1.0, -2.0, 0.0), Vec3::new(-1.0, 3.0, 4.0)]).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 4.0));
        assert_eq!(aabb.max_dimension(), 5.0);
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_transformed_by_scale_and_translation() {
        let aabb = unit_box_at(Vec3::ZERO);
        let m = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::IDENTITY,
            Vec3::new(0.0, 1.0, 0.0),
        );
        let out = aabb.transformed(&m);
        assert_eq!(out.min, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(out.max, Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_ray_hits_box() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        let dist = ray_aabb(&ray, &unit_box_at(Vec3::ZERO)).unwrap();
        assert!((dist - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_box() {
        let ray = Ray {
            origin: Vec3::new(3.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert!(ray_aabb(&ray, &unit_box_at(Vec3::ZERO)).is_none());
    }

    #[test]
    fn test_pick_nearest_prefers_closer() {
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        let far = "far".to_string();
        let near = "near".to_string();
        let picked = pick_nearest(
            &ray,
            [(&far, unit_box_at(Vec3::ZERO)), (&near, unit_box_at(Vec3::new(0.0, 0.0, 3.0)))],
        );
        assert_eq!(picked.as_deref(), Some("near"));
    }
}
