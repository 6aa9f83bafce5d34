//! View and projection matrix generation with reverse-Z.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Uniform data for a camera: view-projection plus world position for
/// specular-free lighting that still needs the eye point.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
}

/// A camera generating view and projection matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    pub projection: Projection,
    /// Near clip plane distance (positive).
    pub near: f32,
    /// Far clip plane distance (positive, > near).
    pub far: f32,
}

/// Projection type.
#[derive(Debug, Clone)]
pub enum Projection {
    /// Perspective projection for the 3D scene.
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width / height.
        aspect_ratio: f32,
    },
    /// Orthographic projection for the heading overlay.
    Orthographic { half_width: f32, half_height: f32 },
}

impl Camera {
    /// View matrix: the inverse of the camera's world transform.
    pub fn view_matrix(&self) -> Mat4 {
        (Mat4::from_translation(self.position) * Mat4::from_quat(self.rotation)).inverse()
    }

    /// Projection matrix with reverse-Z: near maps to z=1, far to z=0.
    /// Implemented by swapping near/far in the standard projections.
    pub fn projection_matrix(&self) -> Mat4 {
        match &self.projection {
            Projection::Perspective {
                fov_y,
                aspect_ratio,
            } => Mat4::perspective_rh(*fov_y, *aspect_ratio, self.far, self.near),
            Projection::Orthographic {
                half_width,
                half_height,
            } => Mat4::orthographic_rh(
                -*half_width,
                *half_width,
                -*half_height,
                *half_height,
                self.far,
                self.near,
            ),
        }
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Forward direction (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Update the aspect ratio for perspective projection.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if let Projection::Perspective { aspect_ratio, .. } = &mut self.projection {
            *aspect_ratio = width / height;
        }
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            camera_pos: [self.position.x, self.position.y, self.position.z, 0.0],
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 4.5),
            rotation: Quat::IDENTITY,
            projection: Projection::Perspective {
                fov_y: 75.0_f32.to_radians(),
                aspect_ratio: 16.0 / 9.0,
            },
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_sits_back_on_z() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 4.5));
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
        if let Projection::Perspective { fov_y, .. } = camera.projection {
            assert!((fov_y - 75.0_f32.to_radians()).abs() < 1e-6);
        } else {
            panic!("expected perspective projection");
        }
    }

    #[test]
    fn test_identity_rotation_looks_down_neg_z() {
        let forward = Camera::default().forward();
        assert!((forward - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_set_aspect_ratio() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1280.0, 720.0);
        if let Projection::Perspective { aspect_ratio, .. } = camera.projection {
            assert!((aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
        } else {
            panic!("expected perspective projection");
        }
    }

    #[test]
    fn test_view_matrix_inverts_camera_transform() {
        let camera = Camera {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Camera::default()
        };
        let reconstructed = camera.view_matrix().inverse().col(3).truncate();
        assert!((reconstructed - camera.position).length() < 1e-4);
    }

    #[test]
    fn test_reverse_z_maps_near_to_one() {
        let camera = Camera::default();
        let proj = camera.projection_matrix();
        // A point on the near plane should land at z=1 in NDC, a distant
        // point near z=0.
        let near_point = proj * glam::Vec4::new(0.0, 0.0, -camera.near, 1.0);
        assert!((near_point.z / near_point.w - 1.0).abs() < 1e-4);
        let far_point = proj * glam::Vec4::new(0.0, 0.0, -camera.far, 1.0);
        assert!((far_point.z / far_point.w).abs() < 1e-4);
    }

    #[test]
    fn test_ortho_projection_bounds() {
        let camera = Camera {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            projection: Projection::Orthographic {
                half_width: 640.0,
                half_height: 360.0,
            },
            near: 0.1,
            far: 100.0,
        };
        let proj = camera.projection_matrix();
        let right_edge = proj * glam::Vec4::new(640.0, 0.0, -50.0, 1.0);
        assert!((right_edge.x / right_edge.w - 1.0).abs() < 1e-4);
        let top_edge = proj * glam::Vec4::new(0.0, 360.0, -50.0, 1.0);
        assert!((top_edge.y / top_edge.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_uniform_layout_size() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
