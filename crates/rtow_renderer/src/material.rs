//! Material trait for surface scattering.

use crate::hittable::HitRecord;
use rand::RngCore;
use rtow_math::{gen_f64, Color, Ray, Vec3, Vec3Ext};

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Color multiplier applied to the light carried back along `scattered`
    pub attenuation: Color,
    /// The continuation ray leaving the surface
    pub scattered: Ray,
}

impl ScatterResult {
    pub fn new(attenuation: Color, scattered: Ray) -> Self {
        Self {
            attenuation,
            scattered,
        }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and scattered ray if the ray scatters,
    /// or None if the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;
}

/// A material that absorbs everything it is hit by.
#[derive(Debug, Clone, Copy, Default)]
pub struct Absorber;

impl Material for Absorber {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

/// Offset the normal by a unit vector, falling back to the normal when
/// the two nearly cancel out.
fn diffuse_direction(normal: Vec3, unit_offset: Vec3) -> Vec3 {
    let direction = normal + unit_offset;
    if direction.near_zero() {
        normal
    } else {
        direction
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let scatter_direction = diffuse_direction(rec.normal, Vec3::random_unit_vector(rng));
        Some(ScatterResult::new(
            self.albedo,
            Ray::new(rec.p, scatter_direction),
        ))
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, capped at 1.0
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = ray_in.direction().reflect_about(rec.normal).normalize()
            + self.fuzz * Vec3::random_unit_vector(rng);
        let scattered = Ray::new(rec.p, reflected);

        // Fuzz can push the reflection below the surface; treat that as absorbed
        if scattered.direction().dot(rec.normal) > 0.0 {
            Some(ScatterResult::new(self.albedo, scattered))
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Refractive index in vacuum or air, or the ratio of the material's
    /// refractive index over that of the enclosing medium
    refraction_index: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    pub fn refraction_index(&self) -> f64 {
        self.refraction_index
    }

    /// Schlick's approximation for reflectance.
    pub fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
        let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f64(rng)
        {
            unit_direction.reflect_about(rec.normal)
        } else {
            unit_direction.refract_through(rec.normal, refraction_ratio)
        };

        Some(ScatterResult::new(Color::ONE, Ray::new(rec.p, direction)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Record for a hit at the origin on a surface facing +Y.
    fn record_facing_up<'a>(material: &'a dyn Material, front_face: bool) -> HitRecord<'a> {
        HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Y,
            material,
            t: 1.0,
            front_face,
        }
    }

    /// Generator whose every `f64` draw is `value`.
    fn constant_draw(value: f64) -> StepRng {
        StepRng::new(((value * (1u64 << 53) as f64) as u64) << 11, 0)
    }

    #[test]
    fn test_constant_draw_stub() {
        let mut rng = constant_draw(0.5);
        assert_eq!(gen_f64(&mut rng), 0.5);
        assert_eq!(gen_f64(&mut rng), 0.5);
    }

    #[test]
    fn test_absorber_never_scatters() {
        let rec = record_facing_up(&Absorber, true);
        let ray = Ray::new(Vec3::Y, -Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Absorber.scatter(&ray, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_lambertian_scatters_with_albedo() {
        let material = Lambertian::new(Color::new(0.8, 0.3, 0.1));
        let rec = record_facing_up(&material, true);
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), -Vec3::Y);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..500 {
            let result = material
                .scatter(&ray, &rec, &mut rng)
                .expect("lambertian always scatters");
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.1));
            assert_eq!(result.scattered.origin(), rec.p);
            assert!(!result.scattered.direction().near_zero());
            // normal + unit vector never points below the surface
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_diffuse_direction_degenerate_falls_back_to_normal() {
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(diffuse_direction(normal, -normal), normal);
        assert_eq!(
            diffuse_direction(normal, Vec3::new(5e-9, 0.0, -1.0 + 5e-9)),
            normal
        );
        assert_eq!(diffuse_direction(normal, Vec3::X), Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_metal_fuzz_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, 0.25).fuzz(), 0.25);
    }

    #[test]
    fn test_metal_without_fuzz_is_perfect_mirror() {
        let material = Metal::new(Color::new(0.7, 0.6, 0.5), 0.0);
        let rec = record_facing_up(&material, true);
        let mut rng = StdRng::seed_from_u64(3);

        let d = Vec3::new(2.0, -1.0, 0.5);
        let n = rec.normal;
        let ray = Ray::new(rec.p - d, d);
        let result = material.scatter(&ray, &rec, &mut rng).expect("mirror reflects");

        let expected = (d - 2.0 * d.dot(n) * n).normalize();
        assert_eq!(result.scattered.direction(), expected);
        assert_eq!(result.attenuation, Color::new(0.7, 0.6, 0.5));
    }

    #[test]
    fn test_metal_absorbs_grazing_fuzzed_reflection() {
        // Fully fuzzed reflection of a grazing ray often dips below the surface
        let material = Metal::new(Color::ONE, 1.0);
        let rec = record_facing_up(&material, true);
        let ray = Ray::new(Vec3::new(-1.0, 1e-3, 0.0), Vec3::new(1.0, -1e-3, 0.0));
        let mut rng = StdRng::seed_from_u64(4);

        let mut absorbed = 0;
        for _ in 0..200 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_reflectance_at_normal_incidence_is_r0() {
        let ratio: f64 = 1.0 / 1.5;
        let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
        assert!((Dielectric::reflectance(1.0, ratio) - r0).abs() < 1e-15);
        assert!((r0 - 0.04).abs() < 1e-12);
        // Grazing angles reflect everything
        assert!((Dielectric::reflectance(0.0, ratio) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_dielectric_normal_incidence_refracts_above_r0() {
        let material = Dielectric::new(1.5);
        let rec = record_facing_up(&material, true);
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -3.0, 0.0));

        for draw in [0.05, 0.5, 0.999] {
            let mut rng = constant_draw(draw);
            let result = material.scatter(&ray, &rec, &mut rng).expect("glass never absorbs");
            assert_eq!(result.attenuation, Color::ONE);
            // Straight through the surface
            assert!((result.scattered.direction() - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-12);
        }
    }

    #[test]
    fn test_dielectric_normal_incidence_reflects_below_r0() {
        let material = Dielectric::new(1.5);
        let rec = record_facing_up(&material, true);
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -3.0, 0.0));

        let mut rng = constant_draw(0.0);
        let result = material.scatter(&ray, &rec, &mut rng).expect("glass never absorbs");
        assert!((result.scattered.direction() - Vec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Dielectric::new(1.5);
        // Leaving the glass (back face) at 60 degrees: 1.5 * sin(60) > 1
        let rec = record_facing_up(&material, false);
        let d = Vec3::new(60f64.to_radians().sin(), -60f64.to_radians().cos(), 0.0);
        let ray = Ray::new(rec.p - d, d);

        // A draw near one would otherwise always pick refraction
        let mut rng = constant_draw(0.999);
        let result = material.scatter(&ray, &rec, &mut rng).expect("glass never absorbs");
        let expected = d.reflect_about(rec.normal);
        assert!((result.scattered.direction() - expected).length() < 1e-12);
        assert_eq!(result.attenuation, Color::ONE);
    }
}
