//! Corner-vertices: the unit of deduplication when flattening a mesh.
//!
//! A [Loop] in a polygon mesh refers to a shared vertex (position & normal) and carries its own
//! texture coordinate. Flattened geometry has no such split; every emitted vertex owns all of its
//! attributes. A *corner-vertex* is the pair `(vertex identity, texture coordinate)`: loops which
//! agree on both become one emitted vertex, loops which differ in either become separate ones.

use std::collections::{hash_map::Entry, HashMap};

use ahh_common::ArrayIndex;
use hedron::{
    attribute::{Normal, Position, Texcoord},
    Loop, Mesh, VertexId,
};

use crate::error::Error;

/// The deduplication key of a [Loop].
///
/// Vertices compare by identity; texture coordinates by exact value. `-0.0` and `0.0` are the
/// same value, while coordinates one ULP apart are not. NaNs compare by bit pattern, so a NaN
/// coordinate matches an identical NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CornerKey {
    pub vertex: VertexId,
    uv: [u32; 2],
}

impl CornerKey {
    pub fn new(l: &Loop) -> Self {
        Self {
            vertex: l.vertex,
            uv: [canonical_bits(l.uv.x), canonical_bits(l.uv.y)],
        }
    }
}

impl From<&Loop> for CornerKey {
    #[inline]
    fn from(l: &Loop) -> Self {
        Self::new(l)
    }
}

#[inline]
fn canonical_bits(c: f32) -> u32 {
    // folds -0.0 onto 0.0; NaN payloads are kept
    if c == 0.0 {
        0
    } else {
        c.to_bits()
    }
}

/// An emitted vertex, with the attributes of its source vertex & loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerVertex {
    pub vertex: VertexId,
    pub position: Position,
    pub normal: Normal,
    pub uv: Texcoord,
}

/// Insertion-ordered set of unique [CornerVertices](CornerVertex).
///
/// # Invariants
///
/// * no two entries share a [CornerKey]
/// * entries are never removed or reordered, so an index, once handed out, stays valid
#[derive(Debug, Clone)]
pub struct CornerTable<Idx: ArrayIndex = u32> {
    entries: Vec<CornerVertex>,
    lookup: HashMap<CornerKey, Idx>,
}

impl<Idx: ArrayIndex> Default for CornerTable<Idx> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
        }
    }
}

impl<Idx: ArrayIndex> CornerTable<Idx> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            lookup: HashMap::with_capacity(capacity),
        }
    }

    /// Get the index of the corner-vertex of `l`, appending it first if it's new.
    ///
    /// Fails if a new entry would not be addressable by `Idx`.
    pub fn insert(&mut self, mesh: &Mesh, l: &Loop) -> Result<Idx, Error> {
        match self.lookup.entry(CornerKey::new(l)) {
            Entry::Occupied(e) => Ok(*e.get()),
            Entry::Vacant(e) => {
                let idx =
                    Idx::from_position(self.entries.len()).ok_or_else(|| Error::IndexOverflow {
                        count: self.entries.len() + 1,
                        index_type: Idx::type_name(),
                    })?;
                let vert = mesh.vertex(l.vertex);
                self.entries.push(CornerVertex {
                    vertex: l.vertex,
                    position: vert.position,
                    normal: vert.normal,
                    uv: l.uv,
                });
                e.insert(idx);
                Ok(idx)
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order.
    #[inline]
    pub fn entries(&self) -> &[CornerVertex] {
        &self.entries
    }
}
