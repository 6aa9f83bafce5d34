use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// The three-light rig of the scene: white ambient fill, a key directional
/// light, and a point light opposite it.
#[derive(Debug, Clone, Copy)]
pub struct LightingRig {
    pub ambient_color: Vec3,
    pub ambient_intensity: f32,
    pub directional_position: Vec3,
    pub directional_intensity: f32,
    pub point_position: Vec3,
    pub point_intensity: f32,
    pub point_range: f32,
}

impl Default for LightingRig {
    fn default() -> Self {
        Self {
            ambient_color: Vec3::ONE,
            ambient_intensity: 0.4,
            directional_position: Vec3::new(5.0, 5.0, 5.0),
            directional_intensity: 1.2,
            point_position: Vec3::new(-5.0, 3.0, 5.0),
            point_intensity: 0.5,
            point_range: 100.0,
        }
    }
}

/// GPU-side lighting data. vec4-aligned for WGSL uniform layout rules.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightingUniform {
    /// rgb = ambient color, w = intensity.
    pub ambient: [f32; 4],
    /// xyz = direction toward the light, w = intensity.
    pub directional: [f32; 4],
    /// xyz = position, w = range.
    pub point_position_range: [f32; 4],
    /// x = intensity, rest padding.
    pub point_intensity: [f32; 4],
}

impl LightingRig {
    pub fn to_uniform(&self) -> LightingUniform {
        let dir = self.directional_position.normalize_or_zero();
        LightingUniform {
            ambient: [
                self.ambient_color.x,
                self.ambient_color.y,
                self.ambient_color.z,
                self.ambient_intensity,
            ],
            directional: [dir.x, dir.y, dir.z, self.directional_intensity],
            point_position_range: [
                self.point_position.x,
                self.point_position.y,
                self.point_position.z,
                self.point_range,
            ],
            point_intensity: [self.point_intensity, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rig_matches_scene() {
        let rig = LightingRig::default();
        assert_eq!(rig.ambient_intensity, 0.4);
        assert_eq!(rig.directional_intensity, 1.2);
        assert_eq!(rig.point_intensity, 0.5);
        assert_eq!(rig.point_range, 100.0);
        assert_eq!(rig.point_position, Vec3::new(-5.0, 3.0, 5.0));
    }

    #[test]
    fn test_uniform_direction_is_normalized() {
        let uni = LightingRig::default().to_uniform();
        let len = (uni.directional[0].powi(2)
            + uni.directional[1].powi(2)
            + uni.directional[2].powi(2))
        .sqrt();
        assert!((len - 1.0).abs() < 1e-5);
        assert_eq!(uni.directional[3], 1.2);
    }

    #[test]
    fn test_uniform_size_is_vec4_aligned() {
        assert_eq!(std::mem::size_of::<LightingUniform>(), 64);
    }
}
