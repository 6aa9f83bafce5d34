//! Surface size tracking across platforms.
//!
//! Keeps physical pixels (for GPU configuration) and logical pixels (for the
//! narrow-viewport breakpoint and overlay layout) in sync, and clamps the
//! zero-size windows Wayland hands out before the compositor assigns a size.

/// Minimum surface dimension, prevents zero-size panics.
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Physical pixel dimensions of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

/// Produced when the surface dimensions or scale factor change.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceResizeEvent {
    pub physical: PhysicalSize,
    pub logical_width: f64,
    pub logical_height: f64,
    pub scale_factor: f64,
}

/// Tracks window surface dimensions in both physical and logical pixels.
pub struct SurfaceWrapper {
    physical_width: u32,
    physical_height: u32,
    logical_width: f64,
    logical_height: f64,
    scale_factor: f64,
}

impl SurfaceWrapper {
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        let width = physical_width.max(MIN_SURFACE_DIMENSION);
        let height = physical_height.max(MIN_SURFACE_DIMENSION);
        Self {
            physical_width: width,
            physical_height: height,
            logical_width: width as f64 / scale_factor,
            logical_height: height as f64 / scale_factor,
            scale_factor,
        }
    }

    /// Handle a window resize. Returns `None` when the clamped dimensions
    /// are unchanged.
    pub fn handle_resize(
        &mut self,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<SurfaceResizeEvent> {
        let width = physical_width.max(MIN_SURFACE_DIMENSION);
        let height = physical_height.max(MIN_SURFACE_DIMENSION);

        if width == self.physical_width && height == self.physical_height {
            return None;
        }

        self.physical_width = width;
        self.physical_height = height;
        self.logical_width = width as f64 / self.scale_factor;
        self.logical_height = height as f64 / self.scale_factor;

        Some(SurfaceResizeEvent {
            physical: PhysicalSize { width, height },
            logical_width: self.logical_width,
            logical_height: self.logical_height,
            scale_factor: self.scale_factor,
        })
    }

    /// Handle a scale factor change (moving between displays, user scaling).
    /// Always produces an event: the logical size moves with the scale
    /// factor even when the physical size stays put.
    pub fn handle_scale_factor_changed(
        &mut self,
        new_scale_factor: f64,
        new_physical_width: u32,
        new_physical_height: u32,
    ) -> SurfaceResizeEvent {
        self.scale_factor = new_scale_factor;
        if let Some(event) = self.handle_resize(new_physical_width, new_physical_height) {
            return event;
        }

        // Same physical size, new scale: the logical dimensions still moved.
        self.logical_width = self.physical_width as f64 / new_scale_factor;
        self.logical_height = self.physical_height as f64 / new_scale_factor;
        SurfaceResizeEvent {
            physical: self.physical_size(),
            logical_width: self.logical_width,
            logical_height: self.logical_height,
            scale_factor: new_scale_factor,
        }
    }

    pub fn physical_size(&self) -> PhysicalSize {
        PhysicalSize {
            width: self.physical_width,
            height: self.physical_height,
        }
    }

    pub fn logical_width(&self) -> f64 {
        self.logical_width
    }

    pub fn logical_height(&self) -> f64 {
        self.logical_height
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Width / height, for the perspective camera.
    pub fn aspect_ratio(&self) -> f32 {
        self.physical_width as f32 / self.physical_height as f32
    }
}
