//! Scene and polygon-mesh data for exporters.
//!
//! Meshes are stored the way modelling tools store them: vertices own positions & normals, faces
//! are runs of *loops* (face corners), and per-corner attributes such as texture coordinates live
//! on the loops. [Triangulators](triangulate::Triangulate) turn those faces into triangles without
//! losing the loop attributes, and [scenes](Scene) tie meshes to their materials and textures.

#[cfg(feature = "deserialize")]
pub mod de;

pub mod triangulate;
pub use triangulate::{EarClip, Fan, Triangle, Triangulate, TriangulateError};

mod data;
pub use data::*;
