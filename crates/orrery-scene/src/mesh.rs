use glam::{Vec2, Vec3};

/// Sphere geometry as parallel attribute arrays plus a triangle index list.
///
/// Kept as plain data so the renderer decides its own interleaving. UVs are
/// equirectangular, matching the projection of the planet textures.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Generates a latitude/longitude sphere with `segments` subdivisions in both
/// axes.
///
/// With `inward` the triangle winding is reversed and normals point at the
/// center, for geometry viewed from inside (the star sphere).
pub fn generate_uv_sphere(radius: f32, segments: u32, inward: bool) -> SphereMesh {
    let segments = segments.max(3);
    let ring_stride = segments + 1;

    let vertex_count = (ring_stride * ring_stride) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for iy in 0..=segments {
        let v = iy as f32 / segments as f32;
        let phi = v * std::f32::consts::PI;
        for ix in 0..=segments {
            let u = ix as f32 / segments as f32;
            let theta = u * std::f32::consts::TAU;

            let unit = Vec3::new(
                -theta.cos() * phi.sin(),
                phi.cos(),
                theta.sin() * phi.sin(),
            );

            positions.push(unit * radius);
            normals.push(if inward { -unit } else { unit });
            uvs.push(Vec2::new(u, v));
        }
    }

    // Pole rings collapse to a point; skip the degenerate triangle there.
    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    for iy in 0..segments {
        for ix in 0..segments {
            let a = iy * ring_stride + ix + 1;
            let b = iy * ring_stride + ix;
            let c = (iy + 1) * ring_stride + ix;
            let d = (iy + 1) * ring_stride + ix + 1;

            if iy != 0 {
                if inward {
                    indices.extend_from_slice(&[a, d, b]);
                } else {
                    indices.extend_from_slice(&[a, b, d]);
                }
            }
            if iy != segments - 1 {
                if inward {
                    indices.extend_from_slice(&[b, d, c]);
                } else {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }
    }

    SphereMesh {
        positions,
        normals,
        uvs,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_lie_on_radius() {
        let mesh = generate_uv_sphere(2.5, 16, false);
        for pos in &mesh.positions {
            assert!((pos.length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_indices_in_bounds_and_triangular() {
        let mesh = generate_uv_sphere(1.0, 64, false);
        assert_eq!(mesh.indices.len() % 3, 0);
        let max = mesh.vertex_count() as u32;
        for &i in &mesh.indices {
            assert!(i < max);
        }
    }

    #[test]
    fn test_uvs_cover_unit_square() {
        let mesh = generate_uv_sphere(1.0, 8, false);
        for uv in &mesh.uvs {
            assert!((0.0..=1.0).contains(&uv.x));
            assert!((0.0..=1.0).contains(&uv.y));
        }
        assert!(mesh.uvs.iter().any(|uv| uv.x == 0.0));
        assert!(mesh.uvs.iter().any(|uv| uv.x == 1.0));
    }

    #[test]
    fn test_outward_normals_match_positions() {
        let mesh = generate_uv_sphere(3.0, 12, false);
        for (pos, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!(n.dot(pos.normalize()) > 0.999);
        }
    }

    #[test]
    fn test_inward_normals_point_at_center() {
        let mesh = generate_uv_sphere(50.0, 12, true);
        for (pos, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!(n.dot(pos.normalize()) < -0.999);
        }
    }

    #[test]
    fn test_inward_flips_winding() {
        let out = generate_uv_sphere(1.0, 8, false);
        let inn = generate_uv_sphere(1.0, 8, true);
        assert_eq!(out.indices.len(), inn.indices.len());
        // First triangle of the outward sphere faces away from the origin,
        // the inward one faces toward it.
        let face_sign = |mesh: &SphereMesh| {
            let [a, b, c] = [
                mesh.positions[mesh.indices[0] as usize],
                mesh.positions[mesh.indices[1] as usize],
                mesh.positions[mesh.indices[2] as usize],
            ];
            (b - a).cross(c - a).dot((a + b + c) / 3.0)
        };
        assert!(face_sign(&out) > 0.0);
        assert!(face_sign(&inn) < 0.0);
    }

    #[test]
    fn test_minimum_segment_clamp() {
        let mesh = generate_uv_sphere(1.0, 1, false);
        assert!(mesh.triangle_count() > 0);
    }
}
