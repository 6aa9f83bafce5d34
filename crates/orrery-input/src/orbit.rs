//! Drag-orbit camera controller.
//!
//! Left-drag orbits the camera around the scene origin at a fixed distance.
//! The wheel is deliberately not consumed here; it belongs to the scroll
//! sequencer.

use glam::{Quat, Vec3};

/// Radians of rotation per logical pixel of drag at sensitivity 1.0.
const RADIANS_PER_PIXEL: f32 = 0.005;

/// Keep the pitch off the poles so the view never flips.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.05;

/// Orbits around the origin, yaw-then-pitch, at a fixed distance.
#[derive(Debug, Clone)]
pub struct OrbitController {
    yaw: f32,
    pitch: f32,
    distance: f32,
    sensitivity: f32,
}

impl OrbitController {
    pub fn new(distance: f32, sensitivity: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            sensitivity,
        }
    }

    /// Apply a drag delta in logical pixels. Dragging right orbits the
    /// camera to the right of the scene, dragging up orbits above it.
    pub fn apply_drag(&mut self, delta_x: f32, delta_y: f32) {
        let scale = RADIANS_PER_PIXEL * self.sensitivity;
        self.yaw -= delta_x * scale;
        self.pitch = (self.pitch - delta_y * scale).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Camera orientation: looking at the origin from the orbit position.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Camera position on the orbit sphere.
    pub fn position(&self) -> Vec3 {
        self.rotation() * Vec3::new(0.0, 0.0, self.distance)
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}
