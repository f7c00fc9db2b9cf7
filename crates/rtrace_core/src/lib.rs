//! rtrace core - scene model, triangle meshes and scene file loading.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `Camera`, `Material`, `PointLight`
//! - **Geometry**: `Mesh` over a shared `VertexArena`, behind the `Hittable` trait
//! - **Loading**: XML scene files via `load_scene`
//!
//! # Example
//!
//! ```ignore
//! use rtrace_core::load_scene;
//!
//! let scene = load_scene("scene.xml")?;
//! println!("{} meshes, {} triangles", scene.mesh_count(), scene.triangle_count());
//! ```

pub mod camera;
pub mod hittable;
pub mod loader;
pub mod mesh;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, NearPlane};
pub use hittable::{HitRecord, Hittable};
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use mesh::{Mesh, MeshError, VertexArena};
pub use scene::{Material, PointLight, Scene};
