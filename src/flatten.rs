//! Flattening polygon meshes into indexed triangle lists.

use ahh_common::ArrayIndex;
use hedron::{Mesh, Triangulate};

use crate::{
    corner::{CornerTable, CornerVertex},
    error::Error,
};

/// An indexed triangle list: triangles index into a table of unique [CornerVertices](CornerVertex).
#[derive(Debug, Clone)]
pub struct FlatMesh<Idx: ArrayIndex = u32> {
    triangles: Vec<[Idx; 3]>,
    corners: CornerTable<Idx>,
}

impl<Idx: ArrayIndex> FlatMesh<Idx> {
    /// Triangles in face order; each one's corners are in the winding order of its source face.
    #[inline]
    pub fn triangles(&self) -> &[[Idx; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn corners(&self) -> &CornerTable<Idx> {
        &self.corners
    }

    #[inline]
    pub fn vertices(&self) -> &[CornerVertex] {
        self.corners.entries()
    }
}

/// Triangulate `mesh` and deduplicate the corners of its triangles.
///
/// Indices are handed out in order of first appearance, walking triangles in order and the loops
/// of each triangle in order; the first corner-vertex seen is `0`.
pub fn flatten<Idx, T>(mesh: &Mesh, triangulator: &T) -> Result<FlatMesh<Idx>, Error>
where
    Idx: ArrayIndex,
    T: Triangulate + ?Sized,
{
    let tris = triangulator.triangulate(mesh)?;
    let mut corners = CornerTable::with_capacity(mesh.vertices().len());
    let mut triangles = Vec::with_capacity(tris.len());
    for [a, b, c] in &tris {
        triangles.push([
            corners.insert(mesh, a)?,
            corners.insert(mesh, b)?,
            corners.insert(mesh, c)?,
        ]);
    }
    tracing::debug!(
        faces = mesh.faces().len(),
        triangles = triangles.len(),
        loops = tris.len() * 3,
        corners = corners.len(),
        "flattened mesh"
    );
    Ok(FlatMesh { triangles, corners })
}
