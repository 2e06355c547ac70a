//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by the camera's max depth
//! - Sky gradient background
//! - Anti-aliasing via multi-sampling
//! - Gamma correction on output

use crate::{Camera, Hittable};
use rand::RngCore;
use rtow_math::{Color, Interval, Ray};
use std::time::Instant;

/// Minimum hit distance; keeps scattered rays from re-hitting their own origin.
pub const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Channel range before scaling to bytes.
const INTENSITY: Interval = Interval::new(0.000, 0.999);

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in each attenuation.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // Bounce limit reached, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.intersect(ray, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY)) else {
        return sky_color(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Vertical white-to-blue gradient seen by rays that escape the scene.
pub fn sky_color(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-encoded 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let to_byte = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// Returns the averaged linear color; pass it through `color_to_rgb`
/// for display.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth(), rng);
    }

    pixel_color * camera.samples_scale()
}

/// Linear color image in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Display bytes for the pixel at (x, y).
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        color_to_rgb(self.get(x, y))
    }

    /// Convert to packed RGB bytes (for display or saving).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb(*color))
            .collect()
    }
}

/// Render the entire scene to an image buffer on the calling thread.
///
/// Pixels are visited row by row, so a seeded `rng` gives the same image
/// on every run.
pub fn render(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
    let start = Instant::now();
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        camera.image_width(),
        camera.image_height(),
        camera.samples_per_pixel(),
        camera.max_depth()
    );

    let mut image = ImageBuffer::new(camera.image_width(), camera.image_height());

    for y in 0..camera.image_height() {
        for x in 0..camera.image_width() {
            let color = render_pixel(camera, world, x, y, rng);
            image.set(x, y, color);
        }
        log::trace!("Finished row {}", y);
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}
