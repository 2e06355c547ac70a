//! rtow renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for spheres with diffuse, metal and glass
//! materials. Intersection is a brute-force linear scan over the scene.
//!
//! The usual flow is:
//!
//! ```ignore
//! let camera = CameraConfig::default().with_quality(50, 10).build()?;
//! let mut rng = StdRng::seed_from_u64(0);
//! let image = render(&camera, &world, &mut rng);
//! ```

mod bucket;
mod camera;
mod hittable;
mod material;
mod renderer;
mod sphere;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::{Camera, CameraConfig, ConfigError, ConfigResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Absorber, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, sky_color, ImageBuffer,
    SHADOW_ACNE_EPSILON,
};
pub use sphere::Sphere;

/// Re-export math types from rtow_math
pub use rtow_math::{Color, Interval, Point3, Ray, Vec3};
