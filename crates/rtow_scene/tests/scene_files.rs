//! Loads the scene files shipped with the workspace.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rtow_renderer::{render, Hittable, Interval, Ray, Vec3};
use rtow_scene::{cover_scene, load_scene, SceneDescription};
use std::path::PathBuf;

fn scene_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../scenes")
        .join(name)
}

#[test]
fn three_spheres_loads_and_renders() {
    let scene = load_scene(scene_path("three_spheres.json")).unwrap();
    assert_eq!(scene.object_count(), 5);
    assert_eq!(scene.camera.look_from, Vec3::new(-2.0, 2.0, 1.0));

    // Straight down onto the ground sphere
    let ray = Ray::new(Vec3::new(3.0, 1.0, -1.0), Vec3::new(0.0, -1.0, 0.0));
    assert!(scene
        .world
        .intersect(&ray, Interval::new(0.001, f64::INFINITY)).is_some());

    let camera = scene
        .camera
        .clone()
        .with_resolution(16, 16.0 / 9.0)
        .with_quality(1, 4)
        .build()
        .unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let image = render(&camera, &scene.world, &mut rng);
    assert_eq!((image.width, image.height), (16, 9));
}

#[test]
fn cover_scene_survives_json() {
    let mut rng = StdRng::seed_from_u64(11);
    let description = cover_scene(&mut rng);
    let json = description.to_json().unwrap();
    let parsed = SceneDescription::from_json(&json).unwrap();

    assert_eq!(parsed.spheres.len(), description.spheres.len());
    assert_eq!(parsed.build().unwrap().object_count(), description.spheres.len());
}
