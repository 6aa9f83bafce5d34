//! Window creation and event handling via winit.
//!
//! Provides [`AppState`] which implements winit's [`ApplicationHandler`]
//! trait, and [`run`] / [`run_with_config`] to start the event loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::{Mat4, Vec3};
use orrery_config::Config;
use orrery_input::{MouseState, OrbitController};
use orrery_render::{
    BACKGROUND_SHADER_SOURCE, BackgroundPipeline, BufferAllocator, Camera, DepthBuffer,
    FrameEncoder, IndexData, ManagedTexture, MeshBuffer, ModelUniform, OVERLAY_SHADER_SOURCE,
    OverlayPipeline, OverlayUniform, Projection, RenderContext, RenderPassBuilder,
    SCENE_SHADER_SOURCE, SPACE_BLACK, ScenePipeline, SurfaceResizeEvent, SurfaceWrapper,
    TextureManager, VertexPositionNormalUv, draw_background, draw_overlay, draw_planet,
    init_render_context_blocking,
};
use orrery_scene::{
    CAMERA_DISTANCE, GROUP_OFFSET_Y, GROUP_TILT_X, LightingRig, PLANET_COUNT, STAR_SPHERE_RADIUS,
    SphereLayout, SphereMesh, generate_star_texture, generate_uv_sphere, planet_positions,
};
use orrery_sequencer::{Sequencer, SequencerTiming};
use orrery_tween::Timeline;
use tracing::{error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::{MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::frame::FrameClock;
use crate::overlay;

/// Procedural star texture dimensions (equirectangular, 2:1).
const STAR_TEXTURE_WIDTH: u32 = 2048;
const STAR_TEXTURE_HEIGHT: u32 = 1024;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }
    attrs
}

/// World transform of the planet group: vertical drop, forward tilt, then the
/// sequencer-driven rotation.
pub fn group_transform(rotation_y: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, GROUP_OFFSET_Y, 0.0))
        * Mat4::from_rotation_x(GROUP_TILT_X)
        * Mat4::from_rotation_y(rotation_y)
}

/// Application state that manages the window, GPU context, and scene.
pub struct AppState {
    /// The window handle, wrapped in `Arc` for sharing with the renderer.
    pub window: Option<Arc<Window>>,
    /// GPU context owning device, queue, and surface.
    pub gpu: Option<RenderContext>,
    /// Surface size tracking in physical and logical pixels.
    pub surface_wrapper: SurfaceWrapper,
    /// Application configuration.
    pub config: Config,
    frame_clock: FrameClock,
    mouse_state: MouseState,
    orbit: OrbitController,
    sequencer: Sequencer,
    timeline: Timeline,
    camera: Camera,
    overlay_camera: Camera,
    lighting: LightingRig,
    layout: SphereLayout,
    planet_positions: [Vec3; PLANET_COUNT],
    depth_buffer: Option<DepthBuffer>,
    scene_pipeline: Option<ScenePipeline>,
    background_pipeline: Option<BackgroundPipeline>,
    overlay_pipeline: Option<OverlayPipeline>,
    planet_textures: Vec<Arc<ManagedTexture>>,
    star_texture: Option<Arc<ManagedTexture>>,
    planet_mesh: Option<MeshBuffer>,
    star_mesh: Option<MeshBuffer>,
    banner_meshes: Vec<MeshBuffer>,
    marker_mesh: Option<MeshBuffer>,
    camera_buffer: Option<wgpu::Buffer>,
    camera_bind_group: Option<wgpu::BindGroup>,
    background_camera_bind_group: Option<wgpu::BindGroup>,
    lighting_bind_group: Option<wgpu::BindGroup>,
    model_buffers: Vec<wgpu::Buffer>,
    model_bind_groups: Vec<wgpu::BindGroup>,
    banner_uniform_buffers: Vec<wgpu::Buffer>,
    banner_bind_groups: Vec<wgpu::BindGroup>,
    marker_uniform_buffer: Option<wgpu::Buffer>,
    marker_bind_group: Option<wgpu::BindGroup>,
}

impl AppState {
    /// Creates a new `AppState` with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new `AppState` from a [`Config`].
    pub fn with_config(config: Config) -> Self {
        let timing = SequencerTiming {
            throttle: Duration::from_millis(config.sequencer.throttle_ms),
            step_secs: config.sequencer.step_secs,
            wrap_secs: config.sequencer.wrap_secs,
        };
        let heading_count = config.scene.headings.len();
        let orbit = OrbitController::new(CAMERA_DISTANCE, config.input.orbit_sensitivity);

        Self {
            window: None,
            gpu: None,
            surface_wrapper: SurfaceWrapper::new(config.window.width, config.window.height, 1.0),
            config,
            frame_clock: FrameClock::new(),
            mouse_state: MouseState::new(),
            orbit,
            sequencer: Sequencer::new(timing),
            timeline: Timeline::new(heading_count),
            camera: Camera::default(),
            overlay_camera: Camera {
                position: Vec3::new(0.0, 0.0, 10.0),
                projection: Projection::Orthographic {
                    half_width: 640.0,
                    half_height: 360.0,
                },
                near: 0.1,
                far: 100.0,
                ..Camera::default()
            },
            lighting: LightingRig::default(),
            layout: SphereLayout::for_viewport_width(f64::MAX, 500.0),
            planet_positions: [Vec3::ZERO; PLANET_COUNT],
            depth_buffer: None,
            scene_pipeline: None,
            background_pipeline: None,
            overlay_pipeline: None,
            planet_textures: Vec::new(),
            star_texture: None,
            planet_mesh: None,
            star_mesh: None,
            banner_meshes: Vec::new(),
            marker_mesh: None,
            camera_buffer: None,
            camera_bind_group: None,
            background_camera_bind_group: None,
            lighting_bind_group: None,
            model_buffers: Vec::new(),
            model_bind_groups: Vec::new(),
            banner_uniform_buffers: Vec::new(),
            banner_bind_groups: Vec::new(),
            marker_uniform_buffer: None,
            marker_bind_group: None,
        }
    }

    /// Returns the current physical surface width.
    pub fn surface_width(&self) -> u32 {
        self.surface_wrapper.physical_size().width
    }

    /// Returns the current physical surface height.
    pub fn surface_height(&self) -> u32 {
        self.surface_wrapper.physical_size().height
    }

    /// Returns the sphere layout chosen at scene construction.
    pub fn layout(&self) -> SphereLayout {
        self.layout
    }

    /// Builds every GPU resource the scene needs: pipelines, textures, the
    /// sphere meshes, and the uniform buffers with their bind groups.
    fn initialize_rendering(&mut self, gpu: &RenderContext) {
        let width = self.surface_width();
        let height = self.surface_height();
        let logical_w = self.surface_wrapper.logical_width();
        let logical_h = self.surface_wrapper.logical_height();

        self.camera.set_aspect_ratio(width as f32, height as f32);
        self.overlay_camera.projection = Projection::Orthographic {
            half_width: logical_w as f32 / 2.0,
            half_height: logical_h as f32 / 2.0,
        };

        let depth_buffer = DepthBuffer::new(&gpu.device, width, height);

        let scene_shader = gpu
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("scene-shader"),
                source: wgpu::ShaderSource::Wgsl(SCENE_SHADER_SOURCE.into()),
            });
        let background_shader = gpu
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("background-shader"),
                source: wgpu::ShaderSource::Wgsl(BACKGROUND_SHADER_SOURCE.into()),
            });
        let overlay_shader = gpu
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("overlay-shader"),
                source: wgpu::ShaderSource::Wgsl(OVERLAY_SHADER_SOURCE.into()),
            });

        let mut texture_manager = TextureManager::new(&gpu.device);

        let scene_pipeline = ScenePipeline::new(
            &gpu.device,
            &scene_shader,
            gpu.surface_format,
            DepthBuffer::FORMAT,
            texture_manager.bind_group_layout(),
        );
        let background_pipeline = BackgroundPipeline::new(
            &gpu.device,
            &background_shader,
            gpu.surface_format,
            DepthBuffer::FORMAT,
            texture_manager.bind_group_layout(),
        );
        let overlay_pipeline = OverlayPipeline::new(
            &gpu.device,
            &overlay_shader,
            gpu.surface_format,
            DepthBuffer::FORMAT,
        );

        let mut planet_textures = Vec::with_capacity(PLANET_COUNT);
        for i in 0..PLANET_COUNT {
            let placeholder = self
                .config
                .scene
                .placeholder_colors
                .get(i)
                .copied()
                .unwrap_or([0.5, 0.5, 0.5]);
            let name = format!("planet-{i}");
            let texture = match self.config.scene.planet_textures.get(i) {
                Some(path) => texture_manager.load_or_placeholder(
                    &gpu.device,
                    &gpu.queue,
                    &name,
                    path,
                    placeholder,
                ),
                None => texture_manager.solid_color(&gpu.device, &gpu.queue, &name, placeholder),
            }
            .expect("1x1 placeholder creation cannot fail");
            planet_textures.push(texture);
        }

        let star_texture = match texture_manager.load_from_path(
            &gpu.device,
            &gpu.queue,
            "stars",
            &self.config.scene.star_texture,
        ) {
            Ok(texture) => texture,
            Err(err) => {
                warn!("Star texture failed to load: {err}; generating procedural stars");
                let data = generate_star_texture(
                    self.config.scene.star_seed,
                    STAR_TEXTURE_WIDTH,
                    STAR_TEXTURE_HEIGHT,
                );
                texture_manager
                    .create_rgba8(
                        &gpu.device,
                        &gpu.queue,
                        "stars",
                        &data,
                        STAR_TEXTURE_WIDTH,
                        STAR_TEXTURE_HEIGHT,
                    )
                    .expect("procedural star texture has matching dimensions")
            }
        };

        // The layout is chosen once from the startup viewport; resizes keep it.
        let layout =
            SphereLayout::for_viewport_width(logical_w, self.config.scene.narrow_breakpoint);
        info!(
            sphere_radius = layout.sphere_radius,
            orbit_radius = layout.orbit_radius,
            "scene layout selected"
        );
        self.layout = layout;
        self.planet_positions = planet_positions(layout.orbit_radius);

        let allocator = BufferAllocator::new(&gpu.device);

        let planet_sphere = generate_uv_sphere(
            layout.sphere_radius,
            self.config.scene.sphere_segments,
            false,
        );
        let planet_vertices = interleave_sphere(&planet_sphere);
        let planet_mesh = allocator.create_mesh(
            "planet-sphere",
            bytemuck::cast_slice(&planet_vertices),
            IndexData::U32(&planet_sphere.indices),
        );

        let star_sphere = generate_uv_sphere(
            STAR_SPHERE_RADIUS,
            self.config.scene.sphere_segments,
            true,
        );
        let star_vertices = interleave_sphere(&star_sphere);
        let star_mesh = allocator.create_mesh(
            "star-sphere",
            bytemuck::cast_slice(&star_vertices),
            IndexData::U32(&star_sphere.indices),
        );

        let camera_buffer = allocator.create_uniform("camera-uniform", &self.camera.to_uniform());
        let camera_bind_group = uniform_bind_group(
            &gpu.device,
            &scene_pipeline.camera_bind_group_layout,
            &camera_buffer,
            "scene-camera-bind-group",
        );
        let background_camera_bind_group = uniform_bind_group(
            &gpu.device,
            &background_pipeline.camera_bind_group_layout,
            &camera_buffer,
            "background-camera-bind-group",
        );

        let lighting_buffer =
            allocator.create_uniform("lighting-uniform", &self.lighting.to_uniform());
        let lighting_bind_group = uniform_bind_group(
            &gpu.device,
            &scene_pipeline.lighting_bind_group_layout,
            &lighting_buffer,
            "lighting-bind-group",
        );

        let group = group_transform(self.timeline.rotation_y());
        let mut model_buffers = Vec::with_capacity(PLANET_COUNT);
        let mut model_bind_groups = Vec::with_capacity(PLANET_COUNT);
        for (i, position) in self.planet_positions.iter().enumerate() {
            let model = ModelUniform {
                model: (group * Mat4::from_translation(*position)).to_cols_array_2d(),
            };
            let buffer = allocator.create_uniform(&format!("planet-model-{i}"), &model);
            let bind_group = uniform_bind_group(
                &gpu.device,
                &scene_pipeline.model_bind_group_layout,
                &buffer,
                &format!("planet-model-bind-group-{i}"),
            );
            model_buffers.push(buffer);
            model_bind_groups.push(bind_group);
        }

        let overlay_vp = self.overlay_camera.view_projection_matrix().to_cols_array_2d();
        let banner_meshes = overlay::build_heading_banners(
            &allocator,
            &self.config.scene.headings,
            logical_w as f32,
            logical_h as f32,
        );
        let mut banner_uniform_buffers = Vec::with_capacity(banner_meshes.len());
        let mut banner_bind_groups = Vec::with_capacity(banner_meshes.len());
        for i in 0..banner_meshes.len() {
            let uniform = OverlayUniform {
                view_proj: overlay_vp,
                offset: [0.0; 4],
            };
            let buffer = allocator.create_uniform(&format!("heading-uniform-{i}"), &uniform);
            let bind_group = uniform_bind_group(
                &gpu.device,
                &overlay_pipeline.uniform_bind_group_layout,
                &buffer,
                &format!("heading-bind-group-{i}"),
            );
            banner_uniform_buffers.push(buffer);
            banner_bind_groups.push(bind_group);
        }

        if self.config.input.cursor_marker {
            let uniform = OverlayUniform {
                view_proj: overlay_vp,
                offset: [0.0; 4],
            };
            let buffer = allocator.create_uniform("marker-uniform", &uniform);
            let bind_group = uniform_bind_group(
                &gpu.device,
                &overlay_pipeline.uniform_bind_group_layout,
                &buffer,
                "marker-bind-group",
            );
            self.marker_mesh = Some(overlay::build_marker_quad(&allocator));
            self.marker_uniform_buffer = Some(buffer);
            self.marker_bind_group = Some(bind_group);
        }

        self.depth_buffer = Some(depth_buffer);
        self.scene_pipeline = Some(scene_pipeline);
        self.background_pipeline = Some(background_pipeline);
        self.overlay_pipeline = Some(overlay_pipeline);
        self.planet_textures = planet_textures;
        self.star_texture = Some(star_texture);
        self.planet_mesh = Some(planet_mesh);
        self.star_mesh = Some(star_mesh);
        self.banner_meshes = banner_meshes;
        self.camera_buffer = Some(camera_buffer);
        self.camera_bind_group = Some(camera_bind_group);
        self.background_camera_bind_group = Some(background_camera_bind_group);
        self.lighting_bind_group = Some(lighting_bind_group);
        self.model_buffers = model_buffers;
        self.model_bind_groups = model_bind_groups;
        self.banner_uniform_buffers = banner_uniform_buffers;
        self.banner_bind_groups = banner_bind_groups;
    }

    /// Propagates a surface size change to the GPU, cameras, and the overlay
    /// layout. The sphere layout deliberately stays as chosen at startup.
    fn handle_surface_resize(&mut self, event: SurfaceResizeEvent) {
        self.camera.set_aspect_ratio(
            event.physical.width as f32,
            event.physical.height as f32,
        );
        self.overlay_camera.projection = Projection::Orthographic {
            half_width: event.logical_width as f32 / 2.0,
            half_height: event.logical_height as f32 / 2.0,
        };

        if let Some(gpu) = &mut self.gpu {
            gpu.resize(event.physical.width, event.physical.height);
            if let Some(depth) = &mut self.depth_buffer {
                depth.resize(&gpu.device, event.physical.width, event.physical.height);
            }
            // Banner geometry is laid out in logical pixels; rebuild it for
            // the new viewport.
            let allocator = BufferAllocator::new(&gpu.device);
            self.banner_meshes = overlay::build_heading_banners(
                &allocator,
                &self.config.scene.headings,
                event.logical_width as f32,
                event.logical_height as f32,
            );
        }
    }

    /// Advances input, the sequencer, and the timeline, then renders a frame.
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.frame_clock.tick();

        let wheel = self.mouse_state.wheel_delta_y();
        if wheel != 0.0
            && let Some(event) = self
                .sequencer
                .on_wheel(wheel, Instant::now(), &mut self.timeline)
        {
            info!(?event, step = self.sequencer.step(), "scroll step");
        }
        self.timeline.tick(dt);

        if self.mouse_state.is_button_pressed(MouseButton::Left) {
            let delta = self.mouse_state.delta();
            self.orbit.apply_drag(delta.x, delta.y);
        }
        self.camera.position = self.orbit.position();
        self.camera.rotation = self.orbit.rotation();

        self.upload_uniforms();

        let frame = match &self.gpu {
            Some(gpu) => gpu.get_current_texture(),
            None => return,
        };

        match frame {
            Ok(surface_texture) => {
                let Some(gpu) = &self.gpu else { return };
                let mut frame_encoder =
                    FrameEncoder::new(&gpu.device, Arc::new(gpu.queue.clone()), surface_texture);

                if let (
                    Some(depth_buffer),
                    Some(scene_pipeline),
                    Some(background_pipeline),
                    Some(overlay_pipeline),
                ) = (
                    &self.depth_buffer,
                    &self.scene_pipeline,
                    &self.background_pipeline,
                    &self.overlay_pipeline,
                ) {
                    let pass_builder = RenderPassBuilder::new()
                        .clear_color(SPACE_BLACK)
                        .depth(depth_buffer.view.clone(), DepthBuffer::CLEAR_VALUE)
                        .label("scene-pass");
                    {
                        let mut render_pass = frame_encoder.begin_render_pass(&pass_builder);

                        if let (Some(star_mesh), Some(star_texture), Some(camera_bg)) = (
                            &self.star_mesh,
                            &self.star_texture,
                            &self.background_camera_bind_group,
                        ) {
                            draw_background(
                                &mut render_pass,
                                background_pipeline,
                                camera_bg,
                                &star_texture.bind_group,
                                star_mesh,
                            );
                        }

                        if let (Some(planet_mesh), Some(camera_bg), Some(lighting_bg)) = (
                            &self.planet_mesh,
                            &self.camera_bind_group,
                            &self.lighting_bind_group,
                        ) {
                            for (texture, model_bg) in self
                                .planet_textures
                                .iter()
                                .zip(&self.model_bind_groups)
                            {
                                draw_planet(
                                    &mut render_pass,
                                    scene_pipeline,
                                    camera_bg,
                                    &texture.bind_group,
                                    model_bg,
                                    lighting_bg,
                                    planet_mesh,
                                );
                            }
                        }

                        for (banner, bind_group) in
                            self.banner_meshes.iter().zip(&self.banner_bind_groups)
                        {
                            draw_overlay(&mut render_pass, overlay_pipeline, bind_group, banner);
                        }

                        if self.mouse_state.is_cursor_in_window()
                            && let (Some(marker), Some(bind_group)) =
                                (&self.marker_mesh, &self.marker_bind_group)
                        {
                            draw_overlay(&mut render_pass, overlay_pipeline, bind_group, marker);
                        }
                    }
                }

                frame_encoder.submit_and_present();
            }
            Err(orrery_render::SurfaceError::Lost) => {
                let size = self.surface_wrapper.physical_size();
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
            }
            Err(orrery_render::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(orrery_render::SurfaceError::Timeout) => {
                warn!("Surface timeout, skipping frame");
            }
        }

        // Clear per-frame transient input state after all systems have run.
        self.mouse_state.clear_transients();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Writes the camera, per-planet model, and overlay uniforms for this
    /// frame.
    fn upload_uniforms(&mut self) {
        let Some(gpu) = &self.gpu else { return };

        if let Some(buffer) = &self.camera_buffer {
            gpu.queue
                .write_buffer(buffer, 0, bytemuck::bytes_of(&self.camera.to_uniform()));
        }

        let group = group_transform(self.timeline.rotation_y());
        for (buffer, position) in self.model_buffers.iter().zip(&self.planet_positions) {
            let uniform = ModelUniform {
                model: (group * Mat4::from_translation(*position)).to_cols_array_2d(),
            };
            gpu.queue
                .write_buffer(buffer, 0, bytemuck::bytes_of(&uniform));
        }

        let overlay_vp = self.overlay_camera.view_projection_matrix().to_cols_array_2d();
        let logical_h = self.surface_wrapper.logical_height() as f32;
        for (i, buffer) in self.banner_uniform_buffers.iter().enumerate() {
            let dy = overlay::heading_offset_pixels(self.timeline.heading_offset(i), logical_h);
            let uniform = OverlayUniform {
                view_proj: overlay_vp,
                offset: [0.0, dy, 0.0, 0.0],
            };
            gpu.queue
                .write_buffer(buffer, 0, bytemuck::bytes_of(&uniform));
        }

        if let Some(buffer) = &self.marker_uniform_buffer {
            let pos = overlay::marker_offset(
                self.mouse_state.position(),
                self.surface_wrapper.logical_width() as f32,
                logical_h,
            );
            let uniform = OverlayUniform {
                view_proj: overlay_vp,
                offset: [pos.x, pos.y, 0.0, 0.0],
            };
            gpu.queue
                .write_buffer(buffer, 0, bytemuck::bytes_of(&uniform));
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.surface_wrapper = SurfaceWrapper::new(size.width, size.height, window.scale_factor());

        match init_render_context_blocking(window.clone()) {
            Ok(gpu) => {
                info!(format = ?gpu.surface_format, "GPU initialized");
                self.initialize_rendering(&gpu);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(resize) = self.surface_wrapper.handle_resize(size.width, size.height) {
                    self.handle_surface_resize(resize);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let size = self.window.as_ref().map(|w| w.inner_size());
                if let Some(size) = size {
                    let resize = self.surface_wrapper.handle_scale_factor_changed(
                        scale_factor,
                        size.width,
                        size.height,
                    );
                    self.handle_surface_resize(resize);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(self.surface_wrapper.scale_factor());
                self.mouse_state.on_cursor_moved(logical.x, logical.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_state.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse_state.on_scroll(delta);
            }
            WindowEvent::CursorEntered { .. } => {
                self.mouse_state.on_cursor_entered();
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_state.on_cursor_left();
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

fn interleave_sphere(mesh: &SphereMesh) -> Vec<VertexPositionNormalUv> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .zip(&mesh.uvs)
        .map(|((position, normal), uv)| VertexPositionNormalUv {
            position: [position.x, position.y, position.z],
            normal: [normal.x, normal.y, normal.z],
            uv: [uv.x, uv.y],
        })
        .collect()
}

fn uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

/// Creates an event loop and runs the application with the default config.
///
/// This function blocks until the window is closed.
#[instrument]
pub fn run() {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = AppState::new();
    event_loop.run_app(&mut app).expect("Event loop failed");
}

/// Creates an event loop and runs the application with the given config.
///
/// This function blocks until the window is closed.
#[instrument(skip(config))]
pub fn run_with_config(config: Config) {
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = AppState::with_config(config);
    event_loop.run_app(&mut app).expect("Event loop failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_initial_dimensions_follow_config() {
        let state = AppState::new();
        assert_eq!(state.surface_width(), 1280);
        assert_eq!(state.surface_height(), 720);
    }

    #[test]
    fn test_app_state_starts_without_window() {
        let state = AppState::new();
        assert!(state.window.is_none());
        assert!(state.gpu.is_none());
    }

    #[test]
    fn test_resize_tracking() {
        let mut state = AppState::new();
        state.surface_wrapper.handle_resize(1920, 1080);
        assert_eq!(state.surface_width(), 1920);
        assert_eq!(state.surface_height(), 1080);
    }

    #[test]
    fn test_window_attributes_do_not_panic() {
        let _attrs = window_attributes_from_config(&Config::default());
    }

    #[test]
    fn test_group_transform_applies_offset_and_tilt() {
        let origin = group_transform(0.0).transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, GROUP_OFFSET_Y, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_quarter_turn_carries_first_planet_toward_camera_axis() {
        // Planet 0 starts at +X on the ring; a quarter turn of the group
        // swings it to -Z (before the tilt), i.e. away from the camera.
        let local = Vec3::new(3.0, 0.0, 0.0);
        let flat = Mat4::from_rotation_y(FRAC_PI_2).transform_point3(local);
        assert!((flat - Vec3::new(0.0, 0.0, -3.0)).length() < 1e-5);

        let world = group_transform(FRAC_PI_2).transform_point3(local);
        // Tilt and offset move it slightly, but it stays on the -Z side.
        assert!(world.z < -2.5);
    }

    #[test]
    fn test_timeline_heading_channels_match_config() {
        let state = AppState::new();
        assert_eq!(state.timeline.heading_count(), 4);
    }
}
