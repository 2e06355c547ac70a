//! Scene description types.
//!
//! A `SceneDescription` is plain data: a camera, a table of named
//! materials and a list of spheres that refer to materials by name.
//! `build` turns it into a renderable `Scene`, creating one shared
//! material per table entry.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rtow_math::{Color, Point3};
use rtow_renderer::{
    CameraConfig, ConfigError, Dielectric, HittableList, Lambertian, Material, Metal, Sphere,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid camera: {0}")]
    Camera(#[from] ConfigError),

    #[error("Material '{0}' is defined more than once")]
    DuplicateMaterial(String),

    #[error("Sphere {index} refers to unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: &'static str },

    #[error("Invalid sphere {index}: {reason}")]
    InvalidSphere { index: usize, reason: &'static str },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Surface behaviour of a material entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialKind {
    /// Diffuse reflector
    Lambertian { albedo: Color },
    /// Mirror with optional roughness in [0, 1]
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
    },
    /// Clear refractive material such as glass
    Dielectric { refraction_index: f64 },
}

impl MaterialKind {
    fn validate(&self) -> Result<(), &'static str> {
        let color_ok = |c: &Color| c.is_finite() && c.min_element() >= 0.0;
        match self {
            MaterialKind::Lambertian { albedo } if !color_ok(albedo) => {
                Err("albedo must be finite and non-negative")
            }
            MaterialKind::Metal { albedo, .. } if !color_ok(albedo) => {
                Err("albedo must be finite and non-negative")
            }
            MaterialKind::Metal { fuzz, .. } if !(fuzz.is_finite() && *fuzz >= 0.0) => {
                Err("fuzz must be finite and non-negative")
            }
            MaterialKind::Dielectric { refraction_index }
                if !(refraction_index.is_finite() && *refraction_index > 0.0) =>
            {
                Err("refraction index must be positive and finite")
            }
            _ => Ok(()),
        }
    }

    fn instantiate(&self) -> Arc<dyn Material> {
        match self {
            MaterialKind::Lambertian { albedo } => Arc::new(Lambertian::new(*albedo)),
            MaterialKind::Metal { albedo, fuzz } => Arc::new(Metal::new(*albedo, *fuzz)),
            MaterialKind::Dielectric { refraction_index } => {
                Arc::new(Dielectric::new(*refraction_index))
            }
        }
    }
}

/// A named entry in the material table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    /// Name spheres use to refer to this material
    pub name: String,

    #[serde(flatten)]
    pub kind: MaterialKind,
}

impl MaterialDesc {
    pub fn new(name: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A sphere entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f64,
    /// Name of an entry in the material table
    pub material: String,
}

impl SphereDesc {
    pub fn new(center: Point3, radius: f64, material: impl Into<String>) -> Self {
        Self {
            center,
            radius,
            material: material.into(),
        }
    }
}

/// Serializable description of a whole scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Camera settings; defaults apply when omitted
    pub camera: CameraConfig,
    pub materials: Vec<MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

/// A renderable scene.
pub struct Scene {
    /// All spheres, intersected by linear scan
    pub world: HittableList,
    /// Camera settings the scene was described with
    pub camera: CameraConfig,
}

impl Scene {
    /// Number of top-level objects in the world.
    pub fn object_count(&self) -> usize {
        self.world.len()
    }
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the description as pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a material entry, returning its name for use in `add_sphere`.
    pub fn add_material(&mut self, name: impl Into<String>, kind: MaterialKind) -> String {
        let desc = MaterialDesc::new(name, kind);
        let name = desc.name.clone();
        self.materials.push(desc);
        name
    }

    /// Add a sphere that uses the named material.
    pub fn add_sphere(&mut self, center: Point3, radius: f64, material: impl Into<String>) {
        self.spheres.push(SphereDesc::new(center, radius, material));
    }

    /// Validate the description and build the renderable scene.
    ///
    /// Each material entry becomes a single `Arc` shared by every sphere
    /// that names it.
    pub fn build(&self) -> SceneResult<Scene> {
        self.camera.validate()?;

        let mut table: HashMap<&str, Arc<dyn Material>> =
            HashMap::with_capacity(self.materials.len());
        for desc in &self.materials {
            desc.kind
                .validate()
                .map_err(|reason| SceneError::InvalidMaterial {
                    name: desc.name.clone(),
                    reason,
                })?;
            if let MaterialKind::Metal { fuzz, .. } = desc.kind {
                if fuzz > 1.0 {
                    log::warn!("Material '{}' fuzz {} will be clamped to 1", desc.name, fuzz);
                }
            }
            if table.insert(desc.name.as_str(), desc.kind.instantiate()).is_some() {
                return Err(SceneError::DuplicateMaterial(desc.name.clone()));
            }
        }

        let mut world = HittableList::new();
        for (index, desc) in self.spheres.iter().enumerate() {
            if !desc.center.is_finite() {
                return Err(SceneError::InvalidSphere {
                    index,
                    reason: "center must be finite",
                });
            }
            if !desc.radius.is_finite() {
                return Err(SceneError::InvalidSphere {
                    index,
                    reason: "radius must be finite",
                });
            }
            if desc.radius < 0.0 {
                log::warn!("Sphere {} has negative radius {}, clamping to 0", index, desc.radius);
            }

            let material = table
                .get(desc.material.as_str())
                .ok_or_else(|| SceneError::UnknownMaterial {
                    index,
                    name: desc.material.clone(),
                })?;
            world.add(Box::new(Sphere::new(desc.center, desc.radius, material.clone())));
        }

        log::info!(
            "Built scene with {} materials and {} spheres",
            self.materials.len(),
            world.len()
        );

        Ok(Scene {
            world,
            camera: self.camera.clone(),
        })
    }
}

/// Load a scene description from a JSON file and build it.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    log::info!("Loading scene from {}", path.display());
    SceneDescription::from_json(&json)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtow_math::{Interval, Ray, Vec3};
    use rtow_renderer::Hittable;

    const THREE_SPHERES: &str = r#"
{
    "camera": {
        "image_width": 200,
        "samples_per_pixel": 4,
        "look_from": [0.0, 1.0, 5.0],
        "look_at": [0.0, 1.0, 0.0],
        "defocus_angle": 0.0
    },
    "materials": [
        { "name": "ground", "type": "lambertian", "albedo": [0.5, 0.5, 0.5] },
        { "name": "glass", "type": "dielectric", "refraction_index": 1.5 },
        { "name": "steel", "type": "metal", "albedo": [0.7, 0.6, 0.5] }
    ],
    "spheres": [
        { "center": [0.0, -1000.0, 0.0], "radius": 1000.0, "material": "ground" },
        { "center": [0.0, 1.0, 0.0], "radius": 1.0, "material": "glass" },
        { "center": [4.0, 1.0, 0.0], "radius": 1.0, "material": "steel" }
    ]
}
"#;

    #[test]
    fn test_parse_and_build() {
        let desc = SceneDescription::from_json(THREE_SPHERES).unwrap();
        assert_eq!(desc.materials.len(), 3);
        assert_eq!(
            desc.materials[2].kind,
            MaterialKind::Metal {
                albedo: Color::new(0.7, 0.6, 0.5),
                fuzz: 0.0
            }
        );

        // Omitted camera fields keep their defaults
        assert_eq!(desc.camera.image_width, 200);
        assert_eq!(desc.camera.max_depth, CameraConfig::default().max_depth);
        assert_eq!(desc.camera.vup, Vec3::Y);

        let scene = desc.build().unwrap();
        assert_eq!(scene.object_count(), 3);
        assert_eq!(scene.camera.samples_per_pixel, 4);
    }

    #[test]
    fn test_built_world_is_intersectable() {
        let scene = SceneDescription::from_json(THREE_SPHERES).unwrap().build().unwrap();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = scene
            .world
            .intersect(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("looking straight at the glass sphere");
        assert!((rec.t - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_json_round_trip() {
        let desc = SceneDescription::from_json(THREE_SPHERES).unwrap();
        let again = SceneDescription::from_json(&desc.to_json().unwrap()).unwrap();
        assert_eq!(desc, again);
    }

    #[test]
    fn test_unknown_material() {
        let mut desc = SceneDescription::default();
        desc.add_material("ground", MaterialKind::Lambertian { albedo: Color::splat(0.5) });
        desc.add_sphere(Vec3::ZERO, 1.0, "ground");
        desc.add_sphere(Vec3::X, 1.0, "missing");

        match desc.build() {
            Err(SceneError::UnknownMaterial { index, name }) => {
                assert_eq!(index, 1);
                assert_eq!(name, "missing");
            }
            other => panic!("expected unknown material, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_duplicate_material() {
        let mut desc = SceneDescription::default();
        desc.add_material("a", MaterialKind::Dielectric { refraction_index: 1.5 });
        desc.add_material("a", MaterialKind::Dielectric { refraction_index: 1.3 });
        assert!(matches!(desc.build(), Err(SceneError::DuplicateMaterial(name)) if name == "a"));
    }

    #[test]
    fn test_invalid_material_parameters() {
        let cases = [
            MaterialKind::Lambertian { albedo: Color::new(-0.1, 0.5, 0.5) },
            MaterialKind::Metal { albedo: Color::ONE, fuzz: -1.0 },
            MaterialKind::Metal { albedo: Color::splat(f64::NAN), fuzz: 0.0 },
            MaterialKind::Dielectric { refraction_index: 0.0 },
        ];
        for kind in cases {
            let mut desc = SceneDescription::default();
            desc.add_material("bad", kind);
            assert!(matches!(desc.build(), Err(SceneError::InvalidMaterial { .. })));
        }
    }

    #[test]
    fn test_negative_radius_is_clamped_not_rejected() {
        let mut desc = SceneDescription::default();
        let m = desc.add_material("m", MaterialKind::Lambertian { albedo: Color::ONE });
        desc.add_sphere(Vec3::ZERO, -2.0, m);
        assert_eq!(desc.build().unwrap().object_count(), 1);
    }

    #[test]
    fn test_non_finite_sphere_rejected() {
        let mut desc = SceneDescription::default();
        let m = desc.add_material("m", MaterialKind::Lambertian { albedo: Color::ONE });
        desc.add_sphere(Vec3::ZERO, f64::INFINITY, m);
        assert!(matches!(desc.build(), Err(SceneError::InvalidSphere { index: 0, .. })));
    }

    #[test]
    fn test_invalid_camera_rejected() {
        let mut desc = SceneDescription::default();
        desc.camera.samples_per_pixel = 0;
        assert!(matches!(
            desc.build(),
            Err(SceneError::Camera(ConfigError::ZeroSamples))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SceneDescription::from_json("{ \"spheres\": 3 }"),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_scene("/definitely/not/here.json"),
            Err(SceneError::Io(_))
        ));
    }
}
