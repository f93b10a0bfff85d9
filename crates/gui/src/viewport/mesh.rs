use std::collections::HashSet;

use glam::Vec3;

use super::picking::Aabb;

/// Index range of a geometry drawn with one entry of a material list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryGroup {
    pub start: usize,
    pub count: usize,
    pub material_index: usize,
}

/// CPU-side triangle geometry: positions plus triangle indices.
///
/// Bounds and wireframe edges are derived once at construction.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
    /// Material groups; empty when the whole geometry uses one material
    pub groups: Vec<GeometryGroup>,
    bounds: Option<Aabb>,
    edges: Vec<(u32, u32)>,
}

impl Geometry {
    pub fn new(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        let bounds = Aabb::from_points(positions.iter().map(|p| Vec3::from_array(*p)));
        let edges = unique_edges(&indices);
        Self {
            positions,
            indices,
            groups: Vec::new(),
            bounds,
            edges,
        }
    }

    pub fn with_groups(mut self, groups: Vec<GeometryGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// Local-space bounds, `None` for an empty geometry
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique triangle edges as vertex index pairs (for wireframe drawing)
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }
}

fn unique_edges(indices: &[u32]) -> Vec<(u32, u32)> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = if a < b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                edges.push(key);
            }
        }
    }
    edges
}

// ── Primitive generation ──────────────────────────────────────

/// Axis-aligned box centered at the origin
pub fn cube(w: f32, h: f32, d: f32) -> Geometry {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [[Vec3; 4]; 6] = [
        // Front (+Z)
        [Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)],
        // Back (-Z)
        [Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)],
        // Right (+X)
        [Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)],
        // Left (-X)
        [Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)],
        // Top (+Y)
        [Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)],
        // Bottom (-Y)
        [Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)],
    ];

    let mut positions = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for quad in &faces {
        let base = positions.len() as u32;
        positions.extend(quad.iter().map(|v| v.to_array()));
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    Geometry::new(positions, indices)
}

/// UV sphere centered at the origin
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Geometry {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut positions = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    for ring in 0..=rings {
        let theta = ring as f32 / rings as f32 * std::f32::consts::PI;
        for seg in 0..=segments {
            let phi = seg as f32 / segments as f32 * std::f32::consts::TAU;
            positions.push([
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ]);
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::new();
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            if ring != 0 {
                indices.extend_from_slice(&[a, b, a + 1]);
            }
            if ring != rings - 1 {
                indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }
    }
    Geometry::new(positions, indices)
}

/// Flat plane in the local XY plane (rotate to lay it on the ground)
pub fn plane(width: f32, height: f32) -> Geometry {
    let hw = width * 0.5;
    let hh = height * 0.5;
    Geometry::new(
        vec![[-hw, -hh, 0.0], [hw, -hh, 0.0], [hw, hh, 0.0], [-hw, hh, 0.0]],
        vec![0, 1, 2, 0, 2, 3],
    )
}

/// Cone along Y centered at half height; four radial segments give a pyramid
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(3);
    let half = height * 0.5;
    let mut positions = vec![[0.0, half, 0.0], [0.0, -half, 0.0]];
    for i in 0..radial_segments {
        let angle = i as f32 / radial_segments as f32 * std::f32::consts::TAU;
        positions.push([radius * angle.sin(), -half, radius * angle.cos()]);
    }

    let mut indices = Vec::new();
    for i in 0..radial_segments {
        let a = 2 + i;
        let b = 2 + (i + 1) % radial_segments;
        indices.extend_from_slice(&[0, a, b]);
        indices.extend_from_slice(&[1, b, a]);
    }
    Geometry::new(positions, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_bounds() {
        let g = cube(2.0, 4.0, 6.0);
        let b = g.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(g.triangle_count(), 12);
    }

    #[test]
    fn test_cube_edges_are_unique() {
        let g = cube(1.0, 1.0, 1.0);
        // 6 faces * (4 outline + 1 diagonal)
        assert_eq!(g.edges().len(), 30);
    }

    #[test]
    fn test_edges_survive_with_groups() {
        let g = Geometry::new(vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], vec![0, 1, 2]).with_groups(vec![
            GeometryGroup {
                start: 0,
                count: 3,
                material_index: 0,
            },
        ]);
        assert_eq!(g.edges(), &[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(g.indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_sphere_bounds() {
        let g = uv_sphere(0.55, 16, 12);
        let b = g.bounds().unwrap();
        assert!((b.max.y - 0.55).abs() < 1e-5);
        assert!((b.min.y + 0.55).abs() < 1e-5);
    }

    #[test]
    fn test_cone_pyramid() {
        let g = cone(0.9, 1.6, 4);
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(g.triangle_count(), 8);
        let b = g.bounds().unwrap();
        assert!((b.size().y - 1.6).abs() < 1e-5);
    }

    #[test]
    fn test_empty_geometry_has_no_bounds() {
        let g = Geometry::new(Vec::new(), Vec::new());
        assert!(g.bounds().is_none());
        assert!(g.edges().is_empty());
    }
}
