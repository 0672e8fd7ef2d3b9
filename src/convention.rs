//! Coordinate system conventions.
//!
//! Scenes are right-handed and Z-up. The `.ahh` format is consumed by Y-up renderers, so
//! positions & normals are remapped on the way out; texture space is left alone.

use nalgebra::Vector3;

/// How 3D vectors are remapped when written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisConvention {
    /// `(x, y, z) -> (x, z, y)`
    #[default]
    ZUpToYUp,
    /// Written as-is.
    Preserve,
}

impl AxisConvention {
    #[inline]
    pub fn apply(self, v: &Vector3<f32>) -> Vector3<f32> {
        match self {
            AxisConvention::ZUpToYUp => swap_yz(v),
            AxisConvention::Preserve => *v,
        }
    }

    /// Undo [apply](Self::apply).
    #[inline]
    pub fn invert(self, v: &Vector3<f32>) -> Vector3<f32> {
        // the swap is its own inverse
        self.apply(v)
    }
}

/// Swap the Y and Z components of a vector.
#[inline]
pub fn swap_yz(v: &Vector3<f32>) -> Vector3<f32> {
    Vector3::new(v.x, v.z, v.y)
}

#[cfg(test)]
mod tests {
    use nalgebra::vector;

    use super::*;

    #[test]
    fn z_up_to_y_up() {
        let up = AxisConvention::ZUpToYUp.apply(&Vector3::z());
        assert_eq!(up, Vector3::y());
        let v = vector![1.0, 2.0, 3.0];
        assert_eq!(AxisConvention::ZUpToYUp.apply(&v), vector![1.0, 3.0, 2.0]);
        assert_eq!(AxisConvention::Preserve.apply(&v), v);
    }

    #[quickcheck_macros::quickcheck]
    fn invert(x: f32, y: f32, z: f32) -> bool {
        let v = vector![x, y, z];
        [AxisConvention::ZUpToYUp, AxisConvention::Preserve]
            .into_iter()
            .all(|c| {
                let back = c.invert(&c.apply(&v));
                back.iter().zip(v.iter()).all(|(a, b)| a.to_bits() == b.to_bits())
            })
    }
}
