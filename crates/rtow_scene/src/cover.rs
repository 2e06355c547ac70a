//! The "final render" cover scene: three large spheres on a ground
//! plane surrounded by a grid of small random spheres.

use rand::RngCore;
use rtow_math::{gen_f64, gen_range_f64, Color, Point3, Vec3Ext};

use crate::scene::{MaterialKind, SceneDescription};

/// Grid extent; small spheres are placed for a, b in [-GRID, GRID).
const GRID: i32 = 11;

/// Radius of the small scattered spheres.
const SMALL_RADIUS: f64 = 0.2;

/// Generate the cover scene description.
///
/// All randomness comes from `rng`, so a seeded generator always yields
/// the same scene.
pub fn cover_scene(rng: &mut dyn RngCore) -> SceneDescription {
    let mut scene = SceneDescription::default();

    let ground = scene.add_material(
        "ground",
        MaterialKind::Lambertian {
            albedo: Color::new(0.5, 0.5, 0.5),
        },
    );
    scene.add_sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground);

    // Small spheres may not overlap the big metal sphere's footprint
    let keep_clear = Point3::new(4.0, SMALL_RADIUS, 0.0);

    for a in -GRID..GRID {
        for b in -GRID..GRID {
            let choose_mat = gen_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * gen_f64(rng),
                SMALL_RADIUS,
                b as f64 + 0.9 * gen_f64(rng),
            );

            if (center - keep_clear).length() <= 0.9 {
                continue;
            }

            let kind = if choose_mat < 0.8 {
                MaterialKind::Lambertian {
                    albedo: Color::random(rng) * Color::random(rng),
                }
            } else if choose_mat < 0.95 {
                MaterialKind::Metal {
                    albedo: Color::random_range(rng, 0.5, 1.0),
                    fuzz: gen_range_f64(rng, 0.0, 0.5),
                }
            } else {
                MaterialKind::Dielectric {
                    refraction_index: 1.5,
                }
            };
            let name = scene.add_material(format!("small_{}_{}", a, b), kind);
            scene.add_sphere(center, SMALL_RADIUS, name);
        }
    }

    let glass = scene.add_material("glass", MaterialKind::Dielectric { refraction_index: 1.5 });
    scene.add_sphere(Point3::new(0.0, 1.0, 0.0), 1.0, glass);

    let matte = scene.add_material(
        "matte",
        MaterialKind::Lambertian {
            albedo: Color::new(0.4, 0.2, 0.1),
        },
    );
    scene.add_sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, matte);

    let mirror = scene.add_material(
        "mirror",
        MaterialKind::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    );
    scene.add_sphere(Point3::new(4.0, 1.0, 0.0), 1.0, mirror);

    log::debug!("Cover scene has {} spheres", scene.spheres.len());
    scene
}
