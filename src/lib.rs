//! Exporter for `.ahh` geometry: indexed triangle lists with texture references.
//!
//! Modelling tools store meshes as polygons whose corners (*loops*) point at shared vertices and
//! carry their own texture coordinates. `.ahh` consumers want a single index buffer over vertices
//! which own every attribute. Getting from one to the other means:
//!
//! 1. [triangulating](hedron::Triangulate) every polygon,
//! 2. [deduplicating](corner) the corners of every triangle on `(vertex, texture coordinate)`,
//! 3. [remapping](convention) Z-up positions & normals to Y-up,
//! 4. [writing](ser) texture references, triangles, positions, normals, and texture coordinates.
//!
//! [export] does all of that for the active object of a [Scene](hedron::Scene).
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

pub mod convention;
pub mod corner;
pub mod error;
mod export;
pub mod flatten;
pub mod ser;
pub mod textures;

pub use convention::AxisConvention;
pub use corner::{CornerKey, CornerTable, CornerVertex};
pub use error::{Error, ErrorCategory};
pub use export::*;
pub use flatten::{flatten, FlatMesh};
pub use textures::texture_refs;

pub use hedron;
