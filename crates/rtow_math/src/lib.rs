//! Math types for the rtow path tracer.
//!
//! Vectors are `glam::DVec3`; the renderer works in double precision
//! throughout. `Point3` and `Color` are naming aliases only.

mod interval;
mod ray;
pub mod sampling;

pub use glam::DVec3;
pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{gen_f64, gen_range_f64, Vec3Ext};

/// Three-component double precision vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color, nominally in [0, 1] per channel.
pub type Color = Vec3;
