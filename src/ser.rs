//! Serialization of [FlatMeshes](crate::FlatMesh) as `.ahh` geometry.
//!
//! # Notes
//!
//! ## `.ahh` Structure
//!
//! An `.ahh` file is UTF-8 text holding one record per line. Each record is a tag followed by
//! whitespace-separated fields. Records appear in blocks, always in this order:
//!
//! * `tf <path>`: absolute path to a texture image used by the mesh; zero or more. `<path>` is
//!   the rest of the line.
//! * `f <i0> <i1> <i2>`: a triangle; one per triangle. Indices are 0-based positions within the
//!   vertex blocks below, in winding order.
//! * `v <x> <z> <y>`: vertex position; one per vertex. Y-up, so components are swapped relative to
//!   the Z-up source scene.
//! * `vn <x> <z> <y>`: vertex normal; one per vertex, swapped like `v`.
//! * `vt <u> <v>`: vertex texture coordinate; one per vertex.
//!
//! The `v`, `vn` & `vt` blocks have the same length; the `n`th record of each describes vertex
//! `n`. Real numbers are written in fixed-point notation with [DEFAULT_PRECISION] fractional
//! digits, unless configured otherwise.
//!
//! ## Example
//!
//! ```text
//! tf /home/ash/textures/crate.png
//! f 0 1 2
//! v 0.000000 0.000000 0.000000
//! v 1.000000 0.000000 0.000000
//! v 0.000000 1.000000 0.000000
//! vn 0.000000 1.000000 0.000000
//! vn 0.000000 1.000000 0.000000
//! vn 0.000000 1.000000 0.000000
//! vt 0.000000 0.000000
//! vt 1.000000 0.000000
//! vt 0.000000 1.000000
//! ```

use std::{io, path::Path};

use ahh_common::ArrayIndex;
use nalgebra::Vector3;

use crate::{convention::AxisConvention, flatten::FlatMesh};

/// Default number of digits written after the decimal point.
pub const DEFAULT_PRECISION: usize = 6;

/// Record tags.
pub mod tag {
    pub const TEXTURE_FILE: &str = "tf";
    pub const FACE: &str = "f";
    pub const POSITION: &str = "v";
    pub const NORMAL: &str = "vn";
    pub const TEXCOORD: &str = "vt";
}

/// Writes `.ahh` records to an [io::Write].
///
/// The writer doesn't buffer; wrap files in a [BufWriter](std::io::BufWriter).
#[derive(Debug)]
pub struct AhhWriter<W: io::Write> {
    out: W,
    precision: usize,
    convention: AxisConvention,
}

impl<W: io::Write> AhhWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            precision: DEFAULT_PRECISION,
            convention: AxisConvention::default(),
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_convention(mut self, convention: AxisConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn texture_file(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "{} {}", tag::TEXTURE_FILE, path.display())
    }

    pub fn face<Idx: ArrayIndex>(&mut self, [a, b, c]: [Idx; 3]) -> io::Result<()> {
        writeln!(self.out, "{} {a} {b} {c}", tag::FACE)
    }

    pub fn position(&mut self, p: &Vector3<f32>) -> io::Result<()> {
        self.vec3(tag::POSITION, p)
    }

    pub fn normal(&mut self, n: &Vector3<f32>) -> io::Result<()> {
        self.vec3(tag::NORMAL, n)
    }

    pub fn texcoord(&mut self, u: f32, v: f32) -> io::Result<()> {
        let p = self.precision;
        writeln!(self.out, "{} {u:.p$} {v:.p$}", tag::TEXCOORD)
    }

    fn vec3(&mut self, tag: &str, v: &Vector3<f32>) -> io::Result<()> {
        let v = self.convention.apply(v);
        let p = self.precision;
        writeln!(self.out, "{tag} {:.p$} {:.p$} {:.p$}", v.x, v.y, v.z)
    }

    /// Write the face, position, normal & texcoord blocks of a mesh.
    pub fn mesh<Idx: ArrayIndex>(&mut self, mesh: &FlatMesh<Idx>) -> io::Result<()> {
        for &tri in mesh.triangles() {
            self.face(tri)?;
        }
        for vert in mesh.vertices() {
            self.position(&vert.position.coords)?;
        }
        for vert in mesh.vertices() {
            self.normal(&vert.normal)?;
        }
        for vert in mesh.vertices() {
            self.texcoord(vert.uv.x, vert.uv.y)?;
        }
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::vector;

    use super::*;

    fn written(f: impl FnOnce(&mut AhhWriter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut w = AhhWriter::new(Vec::new());
        f(&mut w).unwrap();
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn records() {
        assert_eq!(written(|w| w.face([0u32, 1, 2])), "f 0 1 2\n");
        assert_eq!(
            written(|w| w.position(&vector![1.0, 2.0, 3.5])),
            "v 1.000000 3.500000 2.000000\n"
        );
        assert_eq!(
            written(|w| w.normal(&vector![0.0, 0.0, 1.0])),
            "vn 0.000000 1.000000 0.000000\n"
        );
        assert_eq!(written(|w| w.texcoord(0.25, 1.0)), "vt 0.250000 1.000000\n");
    }

    #[test]
    fn precision_and_convention() {
        let out = {
            let mut w = AhhWriter::new(Vec::new())
                .with_precision(2)
                .with_convention(AxisConvention::Preserve);
            w.position(&vector![1.0, 2.0, 3.0]).unwrap();
            w.texcoord(0.126, 0.5).unwrap();
            String::from_utf8(w.finish().unwrap()).unwrap()
        };
        assert_eq!(out, "v 1.00 2.00 3.00\nvt 0.13 0.50\n");
    }

    #[test]
    fn signed_zero() {
        // negative zero keeps its sign, like C's `%f`
        assert_eq!(
            written(|w| w.normal(&vector![-0.0, 0.0, -1.0])),
            "vn -0.000000 -1.000000 0.000000\n"
        );
        assert_eq!(written(|w| w.texcoord(-0.0, 0.0)), "vt -0.000000 0.000000\n");
    }

    #[cfg(unix)]
    #[test]
    fn texture_file() {
        assert_eq!(
            written(|w| w.texture_file(Path::new("/tex/a b.png"))),
            "tf /tex/a b.png\n"
        );
    }
}
