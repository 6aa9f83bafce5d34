//! wgpu rendering for the orrery scene: GPU context, surface handling,
//! cameras, depth, mesh buffers, textures, and the three scene pipelines
//! (background sphere, lit planets, screen-space overlay).

pub mod background_pipeline;
pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod overlay_pipeline;
pub mod pass;
pub mod scene_pipeline;
pub mod surface;
pub mod texture;

pub use background_pipeline::{BACKGROUND_SHADER_SOURCE, BackgroundPipeline, draw_background};
pub use buffer::{
    BufferAllocator, IndexData, MeshBuffer, VertexPositionColor, VertexPositionNormalUv,
};
pub use camera::{Camera, CameraUniform, Projection};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use overlay_pipeline::{OVERLAY_SHADER_SOURCE, OverlayPipeline, OverlayUniform, draw_overlay};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use scene_pipeline::{ModelUniform, SCENE_SHADER_SOURCE, ScenePipeline, draw_planet};
pub use surface::{PhysicalSize, SurfaceResizeEvent, SurfaceWrapper};
pub use texture::{ManagedTexture, TextureError, TextureManager};
