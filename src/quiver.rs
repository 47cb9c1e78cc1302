//! Directed multigraph container for quivers.
//!
//! Generic over vertex and arrow payloads; the container tracks identity,
//! incidence, parallel-arrow numbering, and translation links, and knows
//! nothing about dimension vectors or knitting. Stores are ordered maps so
//! iteration is always in ascending id order.
//!
//! # Invariants
//! - Ids are unique among live vertices/arrows; freed ids may be reused,
//!   smallest first.
//! - `m_id`s of the parallel arrows sharing `(source, target)` are exactly
//!   `0..count`, in insertion order.
//! - Endpoint arrow lists hold precisely the incident arrow ids, in
//!   insertion order, all arrow kinds included.
//! - `tau_destination` chains terminate at a vertex that is its own
//!   destination; propagation happens when a trans arrow is inserted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for a vertex.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(u32);

impl VertexId {
    /// Creates a `VertexId` from a raw `u32`.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` representation.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an arrow.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrowId(u32);

impl ArrowId {
    /// Creates an `ArrowId` from a raw `u32`.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` representation.
    #[inline]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ArrowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vertex with its incidence lists, translation links, and payload.
#[derive(Debug, Clone)]
pub struct Vertex<V> {
    /// Unique identifier.
    pub id: VertexId,
    /// Display name; defaults to the decimal id.
    pub name: String,
    /// Incoming arrows in insertion order.
    pub in_arrows: Vec<ArrowId>,
    /// Outgoing arrows in insertion order.
    pub out_arrows: Vec<ArrowId>,
    /// Translation target, set when a trans arrow leaves this vertex.
    pub tau: Option<VertexId>,
    /// Endpoint of the translation chain; self when no trans arrow was seen.
    pub tau_destination: VertexId,
    /// User-defined payload.
    pub data: V,
}

impl<V> Vertex<V> {
    fn new(id: VertexId, data: V) -> Self {
        Self {
            id,
            name: id.as_u32().to_string(),
            in_arrows: Vec::new(),
            out_arrows: Vec::new(),
            tau: None,
            tau_destination: id,
            data,
        }
    }
}

/// An arrow between two vertices.
#[derive(Debug, Clone)]
pub struct Arrow<A> {
    /// Unique identifier.
    pub id: ArrowId,
    pub source: VertexId,
    pub target: VertexId,
    /// Whether this arrow encodes the Auslander-Reiten translation.
    pub trans: bool,
    /// Dense index among the parallel arrows sharing `(source, target)`.
    pub m_id: u32,
    /// User-defined payload.
    pub data: A,
}

/// Directed multigraph with payload-generic vertices and arrows.
#[derive(Debug, Clone, Default)]
pub struct Quiver<V, A> {
    vertices: BTreeMap<VertexId, Vertex<V>>,
    arrows: BTreeMap<ArrowId, Arrow<A>>,
    adjacency: BTreeMap<(VertexId, VertexId), u32>,
    loops: u32,
}

impl<V, A> Quiver<V, A> {
    /// Creates an empty quiver.
    pub fn new() -> Self {
        Self {
            vertices: BTreeMap::new(),
            arrows: BTreeMap::new(),
            adjacency: BTreeMap::new(),
            loops: 0,
        }
    }

    /// Whether the quiver has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn arrow_count(&self) -> usize {
        self.arrows.len()
    }

    /// Number of loops (arrows whose source equals their target).
    #[inline]
    pub fn loop_count(&self) -> u32 {
        self.loops
    }

    /// Number of parallel arrows from `source` to `target`.
    #[inline]
    pub fn arrow_count_between(&self, source: VertexId, target: VertexId) -> u32 {
        self.adjacency.get(&(source, target)).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<V>> {
        self.vertices.get(&id)
    }

    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex<V>> {
        self.vertices.get_mut(&id)
    }

    #[inline]
    pub fn arrow(&self, id: ArrowId) -> Option<&Arrow<A>> {
        self.arrows.get(&id)
    }

    #[inline]
    pub fn arrow_mut(&mut self, id: ArrowId) -> Option<&mut Arrow<A>> {
        self.arrows.get_mut(&id)
    }

    /// Iterates vertices in ascending id order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<V>> {
        self.vertices.values()
    }

    /// Iterates arrows in ascending id order.
    pub fn arrows(&self) -> impl Iterator<Item = &Arrow<A>> {
        self.arrows.values()
    }

    /// Inserts a vertex under the smallest free id and returns that id.
    pub fn add_vertex(&mut self, data: V) -> VertexId {
        let id = self.free_vertex_id();
        self.vertices.insert(id, Vertex::new(id, data));
        id
    }

    /// Inserts a vertex under an explicit id.
    ///
    /// Returns `None` when the id is already taken; collision is not an
    /// error on this surface.
    pub fn add_vertex_with_id(&mut self, id: VertexId, data: V) -> Option<VertexId> {
        if self.vertices.contains_key(&id) {
            return None;
        }
        self.vertices.insert(id, Vertex::new(id, data));
        Some(id)
    }

    /// Inserts an arrow under the smallest free id.
    ///
    /// Returns `None` when either endpoint is missing. On success the arrow
    /// receives the next dense `m_id` among its parallels, both endpoint
    /// lists are extended, and a trans arrow rewires the source's `tau` and
    /// `tau_destination`.
    pub fn add_arrow(
        &mut self,
        source: VertexId,
        target: VertexId,
        trans: bool,
        data: A,
    ) -> Option<ArrowId> {
        let id = self.free_arrow_id();
        self.insert_arrow(id, source, target, trans, data)
    }

    /// Inserts an arrow under an explicit id; `None` on id collision or
    /// missing endpoint.
    pub fn add_arrow_with_id(
        &mut self,
        id: ArrowId,
        source: VertexId,
        target: VertexId,
        trans: bool,
        data: A,
    ) -> Option<ArrowId> {
        if self.arrows.contains_key(&id) {
            return None;
        }
        self.insert_arrow(id, source, target, trans, data)
    }

    fn insert_arrow(
        &mut self,
        id: ArrowId,
        source: VertexId,
        target: VertexId,
        trans: bool,
        data: A,
    ) -> Option<ArrowId> {
        if !self.vertices.contains_key(&source) || !self.vertices.contains_key(&target) {
            return None;
        }
        let m_id = self.arrow_count_between(source, target);
        self.arrows.insert(
            id,
            Arrow {
                id,
                source,
                target,
                trans,
                m_id,
                data,
            },
        );
        *self.adjacency.entry((source, target)).or_insert(0) += 1;
        if source == target {
            self.loops += 1;
        }
        if let Some(s) = self.vertices.get_mut(&source) {
            s.out_arrows.push(id);
        }
        if let Some(t) = self.vertices.get_mut(&target) {
            t.in_arrows.push(id);
        }
        if trans {
            let destination = match self.vertices.get(&target) {
                Some(t) => t.tau_destination,
                None => target,
            };
            if let Some(s) = self.vertices.get_mut(&source) {
                s.tau = Some(target);
                s.tau_destination = destination;
            }
        }
        Some(id)
    }

    /// Removes an arrow, restoring `m_id` density among its parallels and
    /// the adjacency/loop counts. Tau links set by a trans arrow stay in
    /// place. Returns whether the arrow existed.
    pub fn remove_arrow(&mut self, id: ArrowId) -> bool {
        let Some(arrow) = self.arrows.remove(&id) else {
            return false;
        };
        for other in self.arrows.values_mut() {
            if other.source == arrow.source
                && other.target == arrow.target
                && other.m_id > arrow.m_id
            {
                other.m_id -= 1;
            }
        }
        if let Some(count) = self.adjacency.get_mut(&(arrow.source, arrow.target)) {
            *count -= 1;
            if *count == 0 {
                self.adjacency.remove(&(arrow.source, arrow.target));
            }
        }
        if arrow.source == arrow.target {
            self.loops -= 1;
        }
        if let Some(s) = self.vertices.get_mut(&arrow.source) {
            s.out_arrows.retain(|&a| a != id);
        }
        if let Some(t) = self.vertices.get_mut(&arrow.target) {
            t.in_arrows.retain(|&a| a != id);
        }
        true
    }

    /// Removes a vertex together with all incident arrows. Returns whether
    /// the vertex existed.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        if !self.vertices.contains_key(&id) {
            return false;
        }
        let incident: Vec<ArrowId> = self
            .arrows
            .values()
            .filter(|a| a.source == id || a.target == id)
            .map(|a| a.id)
            .collect();
        for arrow in incident {
            self.remove_arrow(arrow);
        }
        self.vertices.remove(&id);
        true
    }

    fn free_vertex_id(&self) -> VertexId {
        let mut candidate = 0u32;
        for id in self.vertices.keys() {
            if id.as_u32() == candidate {
                candidate += 1;
            } else {
                break;
            }
        }
        VertexId::new(candidate)
    }

    fn free_arrow_id(&self) -> ArrowId {
        let mut candidate = 0u32;
        for id in self.arrows.keys() {
            if id.as_u32() == candidate {
                candidate += 1;
            } else {
                break;
            }
        }
        ArrowId::new(candidate)
    }
}
