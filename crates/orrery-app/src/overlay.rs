//! Heading-column and cursor-marker overlay layout.
//!
//! The overlay lives in logical pixels under an orthographic camera centered
//! on the viewport, y up. Each heading gets a banner quad one viewport below
//! the previous, so the column scrolls through the view as the sequencer
//! steps: an offset of -100% raises every banner by one viewport height.

use glam::Vec2;
use orrery_render::{BufferAllocator, IndexData, MeshBuffer, VertexPositionColor};

/// Banner quad height in logical pixels.
pub const BANNER_HEIGHT: f32 = 72.0;

/// Banner width per heading character, logical pixels.
pub const BANNER_CHAR_WIDTH: f32 = 30.0;

/// Cursor marker half-extent, logical pixels.
pub const MARKER_HALF_SIZE: f32 = 10.0;

const BANNER_COLOR: [f32; 4] = [0.92, 0.94, 1.0, 0.85];
const MARKER_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.6];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// Convert a heading offset in percent of viewport height to a y offset in
/// centered overlay pixels. -100% moves the column up one full viewport.
pub fn heading_offset_pixels(offset_percent: f32, logical_height: f32) -> f32 {
    -offset_percent / 100.0 * logical_height
}

/// Cursor position in logical window coordinates (origin top-left, y down)
/// converted to centered overlay coordinates (origin center, y up).
pub fn marker_offset(cursor: Vec2, logical_width: f32, logical_height: f32) -> Vec2 {
    Vec2::new(
        cursor.x - logical_width / 2.0,
        logical_height / 2.0 - cursor.y,
    )
}

/// Resting center of banner `index`: banner 0 fills the initial view, each
/// later banner sits one viewport height below it.
pub fn banner_center_y(index: usize, logical_height: f32) -> f32 {
    -(index as f32) * logical_height
}

fn banner_quad(index: usize, heading: &str, logical_width: f32, logical_height: f32) -> [VertexPositionColor; 4] {
    let half_w = (heading.chars().count() as f32 * BANNER_CHAR_WIDTH)
        .min(logical_width * 0.8)
        / 2.0;
    let half_h = BANNER_HEIGHT / 2.0;
    let cy = banner_center_y(index, logical_height);

    [
        VertexPositionColor {
            position: [-half_w, cy - half_h, 0.0],
            color: BANNER_COLOR,
        },
        VertexPositionColor {
            position: [half_w, cy - half_h, 0.0],
            color: BANNER_COLOR,
        },
        VertexPositionColor {
            position: [half_w, cy + half_h, 0.0],
            color: BANNER_COLOR,
        },
        VertexPositionColor {
            position: [-half_w, cy + half_h, 0.0],
            color: BANNER_COLOR,
        },
    ]
}

/// Build one banner mesh per heading, laid out as a vertical column.
pub fn build_heading_banners(
    allocator: &BufferAllocator,
    headings: &[String],
    logical_width: f32,
    logical_height: f32,
) -> Vec<MeshBuffer> {
    headings
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let verts = banner_quad(i, heading, logical_width, logical_height);
            let label = format!("heading-banner-{i}");
            allocator.create_mesh(
                &label,
                bytemuck::cast_slice(&verts),
                IndexData::U16(&QUAD_INDICES),
            )
        })
        .collect()
}

/// Build the cursor-follow marker quad, centered on the overlay origin. Its
/// per-frame position comes through the offset uniform.
pub fn build_marker_quad(allocator: &BufferAllocator) -> MeshBuffer {
    let h = MARKER_HALF_SIZE;
    let verts = [
        VertexPositionColor {
            position: [-h, -h, 0.0],
            color: MARKER_COLOR,
        },
        VertexPositionColor {
            position: [h, -h, 0.0],
            color: MARKER_COLOR,
        },
        VertexPositionColor {
            position: [h, h, 0.0],
            color: MARKER_COLOR,
        },
        VertexPositionColor {
            position: [-h, h, 0.0],
            color: MARKER_COLOR,
        },
    ];
    allocator.create_mesh(
        "cursor-marker",
        bytemuck::cast_slice(&verts),
        IndexData::U16(&QUAD_INDICES),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_of_minus_hundred_is_one_viewport_up() {
        assert_eq!(heading_offset_pixels(-100.0, 720.0), 720.0);
        assert_eq!(heading_offset_pixels(0.0, 720.0), 0.0);
        assert_eq!(heading_offset_pixels(-200.0, 720.0), 1440.0);
    }

    #[test]
    fn test_banner_column_descends_one_viewport_per_step() {
        assert_eq!(banner_center_y(0, 720.0), 0.0);
        assert_eq!(banner_center_y(1, 720.0), -720.0);
        assert_eq!(banner_center_y(3, 720.0), -2160.0);
    }

    #[test]
    fn test_second_banner_lands_centered_after_one_step() {
        // One forward step: offset -100% raises banner 1 from -720 to 0.
        let y = banner_center_y(1, 720.0) + heading_offset_pixels(-100.0, 720.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_marker_offset_centers_cursor() {
        let center = marker_offset(Vec2::new(640.0, 360.0), 1280.0, 720.0);
        assert_eq!(center, Vec2::ZERO);
    }

    #[test]
    fn test_marker_offset_flips_y() {
        // Top-left corner of the window maps to the upper-left quadrant.
        let corner = marker_offset(Vec2::ZERO, 1280.0, 720.0);
        assert_eq!(corner, Vec2::new(-640.0, 360.0));
    }

    #[test]
    fn test_banner_quad_width_tracks_heading_length() {
        let short = banner_quad(0, "Io", 1280.0, 720.0);
        let long = banner_quad(0, "Volcanic", 1280.0, 720.0);
        assert!(long[1].position[0] > short[1].position[0]);
    }

    #[test]
    fn test_banner_quad_clamped_to_viewport() {
        let heading = "a".repeat(200);
        let quad = banner_quad(0, &heading, 1000.0, 720.0);
        assert!(quad[1].position[0] <= 400.0);
    }
}
