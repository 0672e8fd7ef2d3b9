//! Splitting polygonal [Faces](crate::Face) into triangles.
//!
//! Triangulators only ever see faces with more than 3 loops; triangles pass through
//! [Triangulate::triangulate] untouched. Every triangle produced is made of loops copied from its
//! source face, so loop attributes (vertex, UV) survive triangulation, and triangles keep the
//! winding of the face they came from.

use nalgebra::{Point2, Vector3};

use crate::{FaceId, Loop, Mesh};

/// Three loops in winding order.
pub type Triangle = [Loop; 3];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriangulateError {
    #[error("face {face} has no area; cannot triangulate it")]
    Degenerate { face: FaceId },
    #[error("found no ear to clip in face {face}; is it self-intersecting?")]
    NoEar { face: FaceId },
}

/// Something which can turn polygons into triangles.
pub trait Triangulate {
    /// Append the triangles of `face` to `out`. `face` has more than 3 loops.
    fn triangulate_polygon(
        &self,
        mesh: &Mesh,
        face: FaceId,
        out: &mut Vec<Triangle>,
    ) -> Result<(), TriangulateError>;

    /// Triangulate every face of a mesh, in face order.
    fn triangulate(&self, mesh: &Mesh) -> Result<Vec<Triangle>, TriangulateError> {
        let mut out = Vec::with_capacity(mesh.triangle_count());
        for id in mesh.face_ids() {
            if let [a, b, c] = *mesh.face_loops(id) {
                out.push([a, b, c]);
                continue;
            }
            let before = out.len();
            self.triangulate_polygon(mesh, id, &mut out)?;
            tracing::trace!(
                face = %id,
                loops = mesh.face(id).len(),
                triangles = out.len() - before,
                "triangulated polygon"
            );
        }
        Ok(out)
    }
}

impl<T: Triangulate + ?Sized> Triangulate for &T {
    #[inline]
    fn triangulate_polygon(
        &self,
        mesh: &Mesh,
        face: FaceId,
        out: &mut Vec<Triangle>,
    ) -> Result<(), TriangulateError> {
        (**self).triangulate_polygon(mesh, face, out)
    }
}

/// Fan triangulation around each face's first loop.
///
/// Only correct for convex polygons; never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fan;

impl Triangulate for Fan {
    fn triangulate_polygon(
        &self,
        mesh: &Mesh,
        face: FaceId,
        out: &mut Vec<Triangle>,
    ) -> Result<(), TriangulateError> {
        let loops = mesh.face_loops(face);
        let first = loops[0];
        out.extend(loops[1..].windows(2).map(|w| [first, w[0], w[1]]));
        Ok(())
    }
}

/// Ear-clipping triangulation; handles concave polygons.
///
/// Each polygon is projected onto the axis plane closest to its plane (by its Newell normal) and
/// clipped there, so mildly non-planar polygons work as well. Polygons with no area are rejected.
///
/// # See Also
///
/// * [Triangulation by Ear Clipping](https://www.geometrictools.com/Documentation/TriangulationByEarClipping.pdf)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EarClip;

impl Triangulate for EarClip {
    fn triangulate_polygon(
        &self,
        mesh: &Mesh,
        face: FaceId,
        out: &mut Vec<Triangle>,
    ) -> Result<(), TriangulateError> {
        let loops = mesh.face_loops(face);
        let normal = mesh.face_normal_unnormalized(face);
        if !(normal.norm_squared() > 0.0 && normal.iter().all(|c| c.is_finite())) {
            return Err(TriangulateError::Degenerate { face });
        }
        let points: Vec<Point2<f32>> = loops
            .iter()
            .map(|l| project(&mesh.vertex(l.vertex).position.coords, &normal))
            .collect();

        let mut remaining: Vec<usize> = (0..loops.len()).collect();
        while remaining.len() > 3 {
            let m = remaining.len();
            let corner = |i: usize| {
                (
                    remaining[(i + m - 1) % m],
                    remaining[i],
                    remaining[(i + 1) % m],
                )
            };
            // start at 1 so convex polygons come out as a fan around the first loop
            let ear = (1..=m)
                .map(|i| i % m)
                .find(|&i| {
                    let (a, b, c) = corner(i);
                    turn(&points, a, b, c) == Turn::Convex
                        && !remaining.iter().any(|&p| {
                            p != a && p != b && p != c && inside(&points, a, b, c, p)
                        })
                })
                .or_else(|| {
                    (1..=m).map(|i| i % m).find(|&i| {
                        let (a, b, c) = corner(i);
                        turn(&points, a, b, c) == Turn::Straight
                    })
                })
                .ok_or(TriangulateError::NoEar { face })?;
            let (a, b, c) = corner(ear);
            out.push([loops[a], loops[b], loops[c]]);
            remaining.remove(ear);
        }
        out.push([
            loops[remaining[0]],
            loops[remaining[1]],
            loops[remaining[2]],
        ]);
        Ok(())
    }
}

/// Drop the axis along which `normal` is largest, keeping the projected polygon counter-clockwise.
fn project(p: &Vector3<f32>, normal: &Vector3<f32>) -> Point2<f32> {
    let axis = normal.iamax();
    let (u, v) = match axis {
        0 => (p.y, p.z),
        1 => (p.z, p.x),
        _ => (p.x, p.y),
    };
    if normal[axis] < 0.0 {
        Point2::new(v, u)
    } else {
        Point2::new(u, v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Convex,
    Straight,
    Reflex,
}

fn turn(points: &[Point2<f32>], a: usize, b: usize, c: usize) -> Turn {
    let ab = points[b] - points[a];
    let bc = points[c] - points[b];
    let cross = ab.perp(&bc);
    let tolerance = f32::EPSILON * ab.norm() * bc.norm();
    if cross > tolerance {
        Turn::Convex
    } else if cross < -tolerance {
        Turn::Reflex
    } else {
        Turn::Straight
    }
}

/// Whether `p` lies inside or on the counter-clockwise triangle `abc`. Points coincident with a
/// corner don't count.
fn inside(points: &[Point2<f32>], a: usize, b: usize, c: usize, p: usize) -> bool {
    let pt = points[p];
    if pt == points[a] || pt == points[b] || pt == points[c] {
        return false;
    }
    let edge = |from: usize, to: usize| (points[to] - points[from]).perp(&(pt - points[from]));
    edge(a, b) >= 0.0 && edge(b, c) >= 0.0 && edge(c, a) >= 0.0
}
