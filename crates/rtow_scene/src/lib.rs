//! rtow scene - scene descriptions for the rtow path tracer.
//!
//! This crate provides:
//!
//! - **Scene descriptions**: serializable `SceneDescription` with a named
//!   material table, loaded from JSON
//! - **Cover scene**: the classic random-spheres scene, generated from a
//!   caller-supplied random source
//!
//! # Example
//!
//! ```ignore
//! use rtow_scene::load_scene;
//!
//! let scene = load_scene("scenes/three_spheres.json")?;
//! println!("Loaded {} objects", scene.object_count());
//! ```

pub mod cover;
pub mod scene;

pub use cover::cover_scene;
pub use scene::{
    load_scene, MaterialDesc, MaterialKind, Scene, SceneDescription, SceneError, SceneResult,
    SphereDesc,
};
