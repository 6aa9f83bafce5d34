use glam::Vec3;

/// Number of planets on the orbit ring.
pub const PLANET_COUNT: usize = 4;

/// Forward tilt of the planet group, radians.
pub const GROUP_TILT_X: f32 = 0.25;

/// Vertical offset of the planet group.
pub const GROUP_OFFSET_Y: f32 = -0.1;

/// Camera distance from the origin along +Z.
pub const CAMERA_DISTANCE: f32 = 4.5;

/// Vertical field of view, radians.
pub const CAMERA_FOV_Y: f32 = 75.0 * std::f32::consts::PI / 180.0;

/// Planet and orbit radii, selected once from the viewport width at scene
/// build time. Later resizes keep the layout that was chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereLayout {
    pub sphere_radius: f32,
    pub orbit_radius: f32,
}

impl SphereLayout {
    /// Picks the compact layout below `breakpoint` logical pixels, the
    /// regular one at or above it.
    pub fn for_viewport_width(logical_width: f64, breakpoint: f64) -> Self {
        if logical_width < breakpoint {
            Self {
                sphere_radius: 0.7,
                orbit_radius: 2.0,
            }
        } else {
            Self {
                sphere_radius: 1.0,
                orbit_radius: 3.0,
            }
        }
    }
}

/// Positions of the four planets on the orbit ring, in group-local space.
///
/// Planet `i` sits at angle `i/4 · τ` on the XZ plane.
pub fn planet_positions(orbit_radius: f32) -> [Vec3; PLANET_COUNT] {
    std::array::from_fn(|i| {
        let angle = i as f32 / PLANET_COUNT as f32 * std::f32::consts::TAU;
        Vec3::new(orbit_radius * angle.cos(), 0.0, orbit_radius * angle.sin())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_selects_compact_below() {
        let layout = SphereLayout::for_viewport_width(499.0, 500.0);
        assert_eq!(layout.sphere_radius, 0.7);
        assert_eq!(layout.orbit_radius, 2.0);
    }

    #[test]
    fn test_breakpoint_selects_regular_at_boundary() {
        let layout = SphereLayout::for_viewport_width(500.0, 500.0);
        assert_eq!(layout.sphere_radius, 1.0);
        assert_eq!(layout.orbit_radius, 3.0);
    }

    #[test]
    fn test_planets_evenly_spaced_on_ring() {
        let positions = planet_positions(3.0);
        for pos in &positions {
            assert!((pos.length() - 3.0).abs() < 1e-5);
            assert_eq!(pos.y, 0.0);
        }
        // Quarter-turn spacing: consecutive planets are orthogonal.
        for i in 0..PLANET_COUNT {
            let a = positions[i].normalize();
            let b = positions[(i + 1) % PLANET_COUNT].normalize();
            assert!(a.dot(b).abs() < 1e-5);
        }
    }

    #[test]
    fn test_first_planet_on_positive_x() {
        let positions = planet_positions(2.0);
        assert!((positions[0] - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }
}
