//! Type definitions for vertex & loop attribute data

use nalgebra::{Point2, Point3, Vector3};

/// Vertex position; right-handed, Z-up.
pub type Position = Point3<f32>;
/// Vertex normal; right-handed, Z-up.
pub type Normal = Vector3<f32>;
/// Loop texture coordinate; (0, 0) is the lower left corner of the image.
pub type Texcoord = Point2<f32>;
