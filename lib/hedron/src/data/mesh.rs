pub mod attribute;

use std::ops::Range;

use attribute::{Normal, Position, Texcoord};
use nalgebra::Vector3;

/// Identity of a [Vertex] within its [Mesh].
///
/// Two [Loops](Loop) touch the same vertex iff their `VertexId`s are equal; vertex *values* are
/// never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u32);

/// Index of a [Face] within its [Mesh].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(u32);

static_assertions::assert_eq_size!(VertexId, u32);
static_assertions::assert_eq_size!(FaceId, u32);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FaceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl std::fmt::Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// A point shared by every face corner that touches it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Position,
    pub normal: Normal,
}

/// One corner of a [Face].
///
/// Texture coordinates belong to the corner rather than the vertex, so two loops at the same
/// vertex may disagree about them (ex. along a UV seam).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loop {
    pub vertex: VertexId,
    pub uv: Texcoord,
}

impl Loop {
    #[inline]
    pub fn new(vertex: VertexId, uv: Texcoord) -> Self {
        Self { vertex, uv }
    }
}

/// A polygon; a run of loops in winding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    loops: Range<u32>,
}

impl Face {
    /// Number of corners of this face.
    #[inline]
    pub fn len(&self) -> usize {
        self.loops.len()
    }

    /// Always false for faces from a [Mesh]; they have at least 3 loops.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    #[inline]
    fn range(&self) -> Range<usize> {
        self.loops.start as usize..self.loops.end as usize
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("faces need at least 3 loops; got {0}")]
    FaceTooSmall(usize),
    #[error("loop references vertex {vertex}, but the mesh has only {count} vertices")]
    VertexOutOfRange { vertex: VertexId, count: usize },
    #[error("mesh element count exceeds u32::MAX")]
    TooLarge,
}

/// A set of vertices, loops, and faces.
///
/// # Invariants
///
/// * every face has at least 3 loops
/// * every loop references a vertex of this mesh
/// * the loop ranges of faces are disjoint and cover `loops` in face order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    loops: Vec<Loop>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn builder() -> MeshBuilder {
        MeshBuilder::default()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Iterate over every face with its id.
    pub fn face_ids(&self) -> impl ExactSizeIterator<Item = FaceId> + '_ {
        (0..self.faces.len() as u32).map(FaceId)
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    /// The loops of a face, in winding order.
    #[inline]
    pub fn face_loops(&self, id: FaceId) -> &[Loop] {
        &self.loops[self.faces[id.index()].range()]
    }

    /// True if this mesh has no faces to speak of.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Number of triangles this mesh yields once every face is split into triangles.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.len() - 2).sum()
    }

    /// Newell's normal of a face; its length is twice the face's (projected) area.
    pub fn face_normal_unnormalized(&self, id: FaceId) -> Vector3<f32> {
        let loops = self.face_loops(id);
        let mut n = Vector3::zeros();
        for (i, l) in loops.iter().enumerate() {
            let cur = self.vertex(l.vertex).position;
            let next = self.vertex(loops[(i + 1) % loops.len()].vertex).position;
            n.x += (cur.y - next.y) * (cur.z + next.z);
            n.y += (cur.z - next.z) * (cur.x + next.x);
            n.z += (cur.x - next.x) * (cur.y + next.y);
        }
        n
    }

    /// Give every vertex whose normal is zero the area-weighted average of the normals of the
    /// faces around it.
    ///
    /// Vertices not touched by any face keep a zero normal.
    pub fn fill_missing_normals(&mut self) {
        if self.vertices.iter().all(|v| v.normal != Vector3::zeros()) {
            return;
        }
        let sums = self.face_normal_sums();
        for (vert, sum) in self.vertices.iter_mut().zip(sums) {
            if vert.normal == Vector3::zeros() {
                vert.normal = sum.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);
            }
        }
    }

    fn face_normal_sums(&self) -> Vec<Vector3<f32>> {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];
        for id in self.face_ids() {
            let n = self.face_normal_unnormalized(id);
            for l in self.face_loops(id) {
                sums[l.vertex.index()] += n;
            }
        }
        sums
    }
}

/// Incremental, validating constructor for [Meshes](Mesh).
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    mesh: Mesh,
}

impl MeshBuilder {
    pub fn with_capacity(vertices: usize, loops: usize, faces: usize) -> Self {
        Self {
            mesh: Mesh {
                vertices: Vec::with_capacity(vertices),
                loops: Vec::with_capacity(loops),
                faces: Vec::with_capacity(faces),
            },
        }
    }

    pub fn add_vertex(&mut self, position: Position, normal: Normal) -> Result<VertexId, MeshError> {
        let id = u32::try_from(self.mesh.vertices.len()).map_err(|_| MeshError::TooLarge)?;
        self.mesh.vertices.push(Vertex { position, normal });
        Ok(VertexId(id))
    }

    /// Add a face from its loops, given in winding order.
    pub fn add_face<I>(&mut self, loops: I) -> Result<FaceId, MeshError>
    where
        I: IntoIterator<Item = Loop>,
    {
        let start = self.mesh.loops.len();
        let count = self.mesh.vertices.len();
        for l in loops {
            if l.vertex.index() >= count {
                self.mesh.loops.truncate(start);
                return Err(MeshError::VertexOutOfRange {
                    vertex: l.vertex,
                    count,
                });
            }
            self.mesh.loops.push(l);
        }
        let len = self.mesh.loops.len() - start;
        if len < 3 {
            self.mesh.loops.truncate(start);
            return Err(MeshError::FaceTooSmall(len));
        }
        let (Ok(start), Ok(end), Ok(id)) = (
            u32::try_from(start),
            u32::try_from(self.mesh.loops.len()),
            u32::try_from(self.mesh.faces.len()),
        ) else {
            self.mesh.loops.truncate(start);
            return Err(MeshError::TooLarge);
        };
        self.mesh.faces.push(Face { loops: start..end });
        Ok(FaceId(id))
    }

    /// Set the normal of a vertex that was already added.
    pub fn set_normal(&mut self, vertex: VertexId, normal: Normal) -> Result<(), MeshError> {
        let count = self.mesh.vertices.len();
        let vert = self
            .mesh
            .vertices
            .get_mut(vertex.index())
            .ok_or(MeshError::VertexOutOfRange { vertex, count })?;
        vert.normal = normal;
        Ok(())
    }

    pub fn build(self) -> Mesh {
        self.mesh
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{point, vector};

    use super::*;

    fn square() -> Mesh {
        let mut b = Mesh::builder();
        let ids: Vec<_> = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]
            .into_iter()
            .map(|[x, y]| b.add_vertex(point![x, y, 0.0], Vector3::zeros()).unwrap())
            .collect();
        b.add_face(ids.iter().map(|&v| Loop::new(v, point![0.0, 0.0])))
            .unwrap();
        b.build()
    }

    #[test]
    fn rejects_small_faces() {
        let mut b = Mesh::builder();
        let a = b.add_vertex(point![0.0, 0.0, 0.0], Vector3::z()).unwrap();
        let c = b.add_vertex(point![1.0, 0.0, 0.0], Vector3::z()).unwrap();
        let err = b
            .add_face([Loop::new(a, point![0.0, 0.0]), Loop::new(c, point![0.0, 0.0])])
            .unwrap_err();
        assert_eq!(err, MeshError::FaceTooSmall(2));
        assert!(b.build().loops().is_empty());
    }

    #[test]
    fn rejects_foreign_vertices() {
        let mut b = Mesh::builder();
        let a = b.add_vertex(point![0.0, 0.0, 0.0], Vector3::z()).unwrap();
        let err = b
            .add_face([a, a, VertexId(5)].map(|v| Loop::new(v, point![0.0, 0.0])))
            .unwrap_err();
        assert!(matches!(err, MeshError::VertexOutOfRange { count: 1, .. }));
    }

    #[test]
    fn newell_area() {
        let mesh = square();
        let n = mesh.face_normal_unnormalized(FaceId(0));
        assert_eq!(n, vector![0.0, 0.0, 8.0]);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn normals_from_faces() {
        let mut mesh = square();
        mesh.fill_missing_normals();
        for v in mesh.vertices() {
            assert_eq!(v.normal, Vector3::z());
        }
    }

    #[test]
    fn keeps_given_normals() {
        let mut b = MeshBuilder::with_capacity(4, 4, 1);
        let ids: Vec<_> = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]
            .into_iter()
            .map(|[x, y]| b.add_vertex(point![x, y, 0.0], Vector3::zeros()).unwrap())
            .collect();
        b.add_face(ids.iter().map(|&v| Loop::new(v, point![0.0, 0.0])))
            .unwrap();
        b.set_normal(ids[2], Vector3::x()).unwrap();
        let mut mesh = b.build();
        mesh.fill_missing_normals();
        assert_eq!(mesh.vertex(ids[2]).normal, Vector3::x());
        assert_eq!(mesh.vertex(ids[0]).normal, Vector3::z());
    }
}
