//! Vector helpers shared by the camera and the materials.
//!
//! Every random helper takes the generator explicitly so a seeded
//! `StdRng` reproduces a render bit for bit.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Components below this magnitude count as zero for `near_zero`.
pub const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Lower bound on the squared length accepted by `random_unit_vector`.
///
/// Anything smaller would underflow to zero on normalization.
pub const MIN_SAMPLE_LENGTH_SQUARED: f64 = 1e-160;

/// Uniform draw in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform draw in [min, max).
#[inline]
pub fn gen_range_f64(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Sampling and optics helpers on top of `glam::DVec3`.
pub trait Vec3Ext: Sized {
    /// True if every component is within `NEAR_ZERO_EPSILON` of zero.
    fn near_zero(&self) -> bool;

    /// Vector with each component drawn uniformly from [0, 1).
    fn random(rng: &mut dyn RngCore) -> Self;

    /// Vector with each component drawn uniformly from [min, max).
    fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Self;

    /// Uniformly distributed direction on the unit sphere.
    fn random_unit_vector(rng: &mut dyn RngCore) -> Self;

    /// Uniformly distributed point inside the unit disk in the x-y plane.
    fn random_in_unit_disk(rng: &mut dyn RngCore) -> Self;

    /// Offset inside the [-0.5, 0.5] x [-0.5, 0.5] square in the x-y plane.
    fn sample_square(rng: &mut dyn RngCore) -> Self;

    /// Mirror `self` about the normal `n`.
    fn reflect_about(&self, n: Self) -> Self;

    /// Bend the unit vector `self` through a surface with normal `n`.
    fn refract_through(&self, n: Self, etai_over_etat: f64) -> Self;
}

impl Vec3Ext for Vec3 {
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }

    fn random(rng: &mut dyn RngCore) -> Self {
        Vec3::new(gen_f64(rng), gen_f64(rng), gen_f64(rng))
    }

    fn random_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Self {
        Vec3::new(
            gen_range_f64(rng, min, max),
            gen_range_f64(rng, min, max),
            gen_range_f64(rng, min, max),
        )
    }

    fn random_unit_vector(rng: &mut dyn RngCore) -> Self {
        // Rejection sampling keeps the distribution uniform on the sphere
        loop {
            let p = Vec3::random_range(rng, -1.0, 1.0);
            let len_sq = p.length_squared();
            if MIN_SAMPLE_LENGTH_SQUARED < len_sq && len_sq <= 1.0 {
                return p / len_sq.sqrt();
            }
        }
    }

    fn random_in_unit_disk(rng: &mut dyn RngCore) -> Self {
        loop {
            let p = Vec3::new(
                gen_range_f64(rng, -1.0, 1.0),
                gen_range_f64(rng, -1.0, 1.0),
                0.0,
            );
            if p.length_squared() < 1.0 {
                return p;
            }
        }
    }

    fn sample_square(rng: &mut dyn RngCore) -> Self {
        Vec3::new(gen_f64(rng) - 0.5, gen_f64(rng) - 0.5, 0.0)
    }

    #[inline]
    fn reflect_about(&self, n: Self) -> Self {
        *self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refract_through(&self, n: Self, etai_over_etat: f64) -> Self {
        let cos_theta = (-*self).dot(n).min(1.0);
        let r_out_perp = etai_over_etat * (*self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}
