//! Procedural star background: a deterministic star catalog baked into an
//! equirectangular RGBA8 image. Used when the configured star texture cannot
//! be loaded from disk.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Radius of the inward-facing background sphere.
pub const STAR_SPHERE_RADIUS: f32 = 50.0;

/// A single star on the sky sphere.
#[derive(Clone, Debug)]
struct Star {
    direction: glam::Vec3,
    brightness: f32,
    color: [f32; 3],
}

/// Generates a deterministic star catalog for a seed.
fn generate_catalog(seed: u64, count: u32) -> Vec<Star> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut stars = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let theta = rng.random::<f32>() * std::f32::consts::TAU;
        let phi = (1.0 - 2.0 * rng.random::<f32>()).acos();
        let direction =
            glam::Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());

        // Power-law: many dim, few bright.
        let brightness = rng.random::<f32>().powf(4.0).clamp(0.0, 1.0);
        let temperature = 2000.0 + brightness * 28000.0;

        stars.push(Star {
            direction,
            brightness,
            color: blackbody_to_rgb(temperature),
        });
    }

    stars
}

/// Convert a blackbody temperature in Kelvin to an approximate sRGB color.
///
/// Simplified Planckian locus approximation (Tanner Helland algorithm).
fn blackbody_to_rgb(temperature_k: f32) -> [f32; 3] {
    let t = temperature_k / 100.0;
    let r = if t <= 66.0 {
        1.0
    } else {
        (329.698_73 * (t - 60.0).powf(-0.133_204_76) / 255.0).clamp(0.0, 1.0)
    };
    let g = if t <= 66.0 {
        (99.470_8 * t.ln() - 161.119_57).clamp(0.0, 255.0) / 255.0
    } else {
        (288.122_17 * (t - 60.0).powf(-0.075_514_85) / 255.0).clamp(0.0, 1.0)
    };
    let b = if t >= 66.0 {
        1.0
    } else if t <= 19.0 {
        0.0
    } else {
        (138.517_73 * (t - 10.0).ln() - 305.044_8).clamp(0.0, 255.0) / 255.0
    };
    [r, g, b]
}

/// Map a unit direction to equirectangular UV, matching the sphere mesh UVs.
fn direction_to_equirect_uv(dir: glam::Vec3) -> (f32, f32) {
    let u = 0.5 + dir.z.atan2(-dir.x) / std::f32::consts::TAU;
    let v = 0.5 - dir.y.clamp(-1.0, 1.0).asin() / std::f32::consts::PI;
    (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
}

/// Bake a seeded star catalog into an equirectangular RGBA8 image, ready for
/// GPU upload to the background sphere texture.
pub fn generate_star_texture(seed: u64, width: u32, height: u32) -> Vec<u8> {
    let stars = generate_catalog(seed, 4000);
    log::debug!(
        "baking {} stars into a {width}x{height} background texture (seed {seed})",
        stars.len()
    );
    let mut pixels = vec![[0.0f32; 3]; (width * height) as usize];

    for star in &stars {
        let (u, v) = direction_to_equirect_uv(star.direction);
        let px = ((u * width as f32) as u32).min(width - 1);
        let py = ((v * height as f32) as u32).min(height - 1);

        // Additive blend: dim stars sharing a pixel accumulate.
        let b = star.brightness * 8.0 + 0.4;
        let idx = (py * width + px) as usize;
        for c in 0..3 {
            pixels[idx][c] = (pixels[idx][c] + star.color[c] * b).min(1.0);
        }

        // Bright stars bleed into the four neighbors for a glow.
        if star.brightness > 0.3 {
            let glow = star.brightness * 0.6;
            for (dx, dy) in [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)] {
                let nx = (px as i32 + dx).rem_euclid(width as i32) as u32;
                let ny = py as i32 + dy;
                if ny < 0 || ny >= height as i32 {
                    continue;
                }
                let ni = (ny as u32 * width + nx) as usize;
                for c in 0..3 {
                    pixels[ni][c] = (pixels[ni][c] + star.color[c] * glow).min(1.0);
                }
            }
        }
    }

    let mut bytes = Vec::with_capacity(pixels.len() * 4);
    for pixel in &pixels {
        bytes.push((pixel[0] * 255.0) as u8);
        bytes.push((pixel[1] * 255.0) as u8);
        bytes.push((pixel[2] * 255.0) as u8);
        bytes.push(255);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_directions_are_unit_vectors() {
        for (i, star) in generate_catalog(42, 1000).iter().enumerate() {
            let len = star.direction.length();
            assert!(
                (len - 1.0).abs() < 1e-5,
                "Star {i} direction is not a unit vector: length = {len}"
            );
        }
    }

    #[test]
    fn test_catalog_covers_full_sky() {
        let stars = generate_catalog(42, 4000);
        let mut octant_counts = [0u32; 8];
        for star in &stars {
            let d = star.direction;
            let octant = ((d.x >= 0.0) as usize)
                | (((d.y >= 0.0) as usize) << 1)
                | (((d.z >= 0.0) as usize) << 2);
            octant_counts[octant] += 1;
        }
        for (i, &count) in octant_counts.iter().enumerate() {
            assert!(
                (250..=750).contains(&count),
                "Octant {i} has {count} stars, expected roughly 500"
            );
        }
    }

    #[test]
    fn test_brightness_distribution_skews_dim() {
        let stars = generate_catalog(42, 4000);
        let dim = stars.iter().filter(|s| s.brightness < 0.1).count();
        let bright = stars.iter().filter(|s| s.brightness > 0.5).count();
        assert!(
            dim > bright * 3,
            "Expected many more dim stars ({dim}) than bright stars ({bright})"
        );
    }

    #[test]
    fn test_same_seed_bakes_identical_texture() {
        let a = generate_star_texture(123, 64, 32);
        let b = generate_star_texture(123, 64, 32);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_bakes_different_texture() {
        let a = generate_star_texture(1, 64, 32);
        let b = generate_star_texture(9999, 64, 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_texture_is_opaque_rgba8() {
        let bytes = generate_star_texture(42, 32, 16);
        assert_eq!(bytes.len(), 32 * 16 * 4);
        for alpha in bytes.iter().skip(3).step_by(4) {
            assert_eq!(*alpha, 255);
        }
    }

    #[test]
    fn test_texture_has_lit_pixels() {
        let bytes = generate_star_texture(42, 256, 128);
        let lit = bytes
            .chunks_exact(4)
            .filter(|p| p[0] > 0 || p[1] > 0 || p[2] > 0)
            .count();
        assert!(lit > 100, "Expected many lit pixels, got {lit}");
    }

    #[test]
    fn test_equirect_uv_poles_and_equator() {
        let (_, v_top) = direction_to_equirect_uv(glam::Vec3::Y);
        let (_, v_bottom) = direction_to_equirect_uv(glam::Vec3::NEG_Y);
        assert!(v_top.abs() < 1e-5);
        assert!((v_bottom - 1.0).abs() < 1e-5);

        let (_, v_eq) = direction_to_equirect_uv(glam::Vec3::Z);
        assert!((v_eq - 0.5).abs() < 1e-5);
    }
}
