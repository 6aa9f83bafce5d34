//! Scene content for Orrery: sphere meshes, planet ring layout, the lighting
//! rig, and the procedural star background fallback.
//!
//! This crate is pure data — no GPU types. The app crate interleaves mesh
//! data into vertex buffers and uploads textures.

mod layout;
mod lighting;
mod mesh;
mod stars;

pub use layout::{
    CAMERA_DISTANCE, CAMERA_FOV_Y, GROUP_OFFSET_Y, GROUP_TILT_X, PLANET_COUNT, SphereLayout,
    planet_positions,
};
pub use lighting::{LightingRig, LightingUniform};
pub use mesh::{SphereMesh, generate_uv_sphere};
pub use stars::{STAR_SPHERE_RADIUS, generate_star_texture};
