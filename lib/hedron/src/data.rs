//! # See Also
//!
//! * [Blender BMesh design](https://wiki.blender.org/wiki/Source/Modeling/BMesh/Design), for the
//!   vertex/loop/face split used by [Mesh]

mod mesh;
mod scene;

pub use mesh::*;
pub use scene::*;
